// SPDX-License-Identifier: PMPL-1.0-or-later
//! Immutable configuration for a [`crate::Drift`] instance.

use crate::error::DriftError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a single [`crate::Drift`] channel, validated once at
/// [`crate::Drift::init`] and immutable for the lifetime of the instance.
///
/// To change configuration, call [`crate::Drift::reset`] and construct a new
/// instance from a new `DriftConfig` -- there are no post-init mutators.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriftConfig {
    /// EMA smoothing factor, in `(0, 1]`.
    pub alpha: f64,
    /// Magnitude threshold separating `Stable` from `DriftingUp`/`DriftingDown`.
    pub max_safe_slope: f64,
    /// Physical ceiling used for time-to-failure extrapolation.
    pub upper_limit: f64,
    /// Physical floor used for time-to-failure extrapolation.
    pub lower_limit: f64,
    /// Minimum accepted-sample count before leaving `Learning`.
    pub n_min: u32,
    /// Gap (milliseconds) above which `reset_on_gap` governs behavior.
    pub max_gap: u64,
    /// If true, a gap exceeding `max_gap` reseeds the EMA instead of erroring.
    pub reset_on_gap: bool,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            max_safe_slope: 0.05,
            upper_limit: 100.0,
            lower_limit: 0.0,
            n_min: 5,
            max_gap: 5_000,
            reset_on_gap: true,
        }
    }
}

impl DriftConfig {
    /// Validate range constraints. Mirrors `drift_init`'s config checks.
    pub(crate) fn validate(&self) -> Result<(), DriftError> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(DriftError::Config("alpha must be in (0, 1]"));
        }
        if !(self.max_safe_slope > 0.0) {
            return Err(DriftError::Config("max_safe_slope must be > 0"));
        }
        if !(self.upper_limit > self.lower_limit) {
            return Err(DriftError::Config("upper_limit must be > lower_limit"));
        }
        if self.n_min < 2 {
            return Err(DriftError::Config("n_min must be >= 2"));
        }
        Ok(())
    }
}
