// SPDX-License-Identifier: PMPL-1.0-or-later
//! Immutable configuration for a [`crate::Consensus`] instance.

use crate::error::ConsensusError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a [`crate::Consensus`] voter, validated once at
/// [`crate::Consensus::init`] and immutable for the lifetime of the instance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConsensusConfig {
    /// Maximum permitted spread (`max(active) - min(active)`) for `Agree`.
    pub max_deviation: f64,
    /// Sensor index (0, 1, or 2) used to break exact two-sensor ties.
    pub tie_breaker: usize,
    /// Warm-up tick count (currently informational; voting is stateless per tick).
    pub n_min: u32,
    /// Selects the voting method: `false` = median / mid-value, `true` = weighted average by health.
    pub use_weighted_avg: bool,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            max_deviation: 1.0,
            tie_breaker: 0,
            n_min: 1,
            use_weighted_avg: false,
        }
    }
}

impl ConsensusConfig {
    pub(crate) fn validate(&self) -> Result<(), ConsensusError> {
        if !(self.max_deviation > 0.0) {
            return Err(ConsensusError::Config("max_deviation must be > 0"));
        }
        if self.tie_breaker > 2 {
            return Err(ConsensusError::Config("tie_breaker must be 0, 1, or 2"));
        }
        Ok(())
    }
}
