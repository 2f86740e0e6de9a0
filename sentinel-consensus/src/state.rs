// SPDX-License-Identifier: PMPL-1.0-or-later
//! The closed state enumeration for the consensus FSM, and sensor inputs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-tick health tag for one of the three sensors feeding a [`crate::Consensus`].
///
/// Typically produced upstream by tagging a `sentinel_drift::Drift` channel's
/// classification: a stable channel is `Healthy`, a drifting-but-plausible
/// channel is `Degraded`, and a latched-`Fault` channel is `Faulty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorHealth {
    Healthy,
    Degraded,
    Faulty,
}

/// One sensor's reading for the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorInput {
    pub value: f64,
    pub health: SensorHealth,
}

impl SensorInput {
    pub fn new(value: f64, health: SensorHealth) -> Self {
        Self { value, health }
    }

    fn is_active(&self) -> bool {
        self.health != SensorHealth::Faulty && self.value.is_finite()
    }
}

pub(crate) fn is_active(input: &SensorInput) -> bool {
    input.is_active()
}

/// Lifecycle state of the consensus voter.
///
/// Exhaustively matched everywhere it is consumed -- there is no "unknown"
/// or default variant, so the FSM cannot be in an undefined state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConsensusState {
    /// No tick has been accepted yet.
    Init,
    /// `active_sensors >= 2` and `spread <= max_deviation`.
    Agree,
    /// `active_sensors >= 2`, all `Healthy`, but `spread > max_deviation`.
    Disagree,
    /// Any active sensor is `Degraded`, or exactly 2 sensors are active.
    Degraded,
    /// Fewer than 2 active sensors this tick.
    NoQuorum,
    /// Sticky fault: internal fault or re-entry. Cleared only by `reset`.
    Fault,
}

impl std::fmt::Display for ConsensusState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConsensusState::Init => "INIT",
            ConsensusState::Agree => "AGREE",
            ConsensusState::Disagree => "DISAGREE",
            ConsensusState::Degraded => "DEGRADED",
            ConsensusState::NoQuorum => "NO_QUORUM",
            ConsensusState::Fault => "FAULT",
        };
        write!(f, "{s}")
    }
}
