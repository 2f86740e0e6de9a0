// SPDX-License-Identifier: PMPL-1.0-or-later
//! The closed state enumeration for the drift FSM.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trend classification for a single drift channel.
///
/// Exhaustively matched everywhere it is consumed -- there is no "unknown"
/// or default variant, so the FSM cannot be in an undefined state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DriftState {
    /// Warming up: fewer than `n_min` accepted samples since the last reset
    /// or gap-reseed.
    Learning,
    /// `|slope| <= max_safe_slope`.
    Stable,
    /// `slope > max_safe_slope`.
    DriftingUp,
    /// `slope < -max_safe_slope`.
    DriftingDown,
    /// Sticky fault: a non-finite observation or internal re-entry was
    /// detected. Cleared only by `reset`.
    Fault,
}

impl std::fmt::Display for DriftState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DriftState::Learning => "LEARNING",
            DriftState::Stable => "STABLE",
            DriftState::DriftingUp => "DRIFTING_UP",
            DriftState::DriftingDown => "DRIFTING_DOWN",
            DriftState::Fault => "FAULT",
        };
        write!(f, "{s}")
    }
}
