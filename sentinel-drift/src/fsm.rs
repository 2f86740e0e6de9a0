// SPDX-License-Identifier: PMPL-1.0-or-later
//! The drift state machine itself.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::DriftConfig;
use crate::error::DriftError;
use crate::state::DriftState;

/// Result of one accepted [`Drift::update`] tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftResult {
    pub state: DriftState,
    pub slope: f64,
    pub ema_value: f64,
    pub ttf: f64,
    pub has_ttf: bool,
}

/// Single-channel rate-of-change and trend detector.
///
/// `Drift` is a synchronous, allocation-free state machine: construct it
/// with [`Drift::init`], feed it `(value, timestamp_ms)` observations one at
/// a time with [`Drift::update`], and read its classification back through
/// the accessor methods. There is no I/O and no internal locking -- callers
/// that share an instance across threads must serialize `update`/`reset`
/// themselves.
#[derive(Debug)]
pub struct Drift {
    config: DriftConfig,
    state: DriftState,
    n: u32,
    ema_value: f64,
    slope: f64,
    last_value: f64,
    last_ts: u64,
    initialized: bool,
    fault_sticky: bool,
    last_ttf: f64,
    has_ttf: bool,
    in_use: AtomicBool,
}

impl Drift {
    /// Validate `config` and construct a fresh instance in `Learning`.
    pub fn init(config: DriftConfig) -> Result<Self, DriftError> {
        config.validate()?;
        Ok(Self {
            config,
            state: DriftState::Learning,
            n: 0,
            ema_value: 0.0,
            slope: 0.0,
            last_value: 0.0,
            last_ts: 0,
            initialized: false,
            fault_sticky: false,
            last_ttf: 0.0,
            has_ttf: false,
            in_use: AtomicBool::new(false),
        })
    }

    /// Clear all runtime state (including sticky faults) and return to
    /// `Learning`. `config` is preserved.
    pub fn reset(&mut self) {
        self.state = DriftState::Learning;
        self.n = 0;
        self.ema_value = 0.0;
        self.slope = 0.0;
        self.last_value = 0.0;
        self.last_ts = 0;
        self.initialized = false;
        self.fault_sticky = false;
        self.last_ttf = 0.0;
        self.has_ttf = false;
        self.in_use.store(false, Ordering::SeqCst);
    }

    /// Advance the FSM by one observation tick.
    ///
    /// `ts` is a monotonic millisecond timestamp. Returns the classification
    /// on success; see [`DriftError`] for the failure taxonomy.
    pub fn update(&mut self, value: f64, ts: u64) -> Result<DriftResult, DriftError> {
        // Re-entry guard: a second concurrent call on this instance (which
        // should never happen -- the FSM is not re-entrant) is converted into
        // a sticky fault instead of silently corrupting state.
        if self
            .in_use
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            self.fault_sticky = true;
            self.state = DriftState::Fault;
            return Err(DriftError::Fault);
        }
        let result = self.update_inner(value, ts);
        self.in_use.store(false, Ordering::SeqCst);
        result
    }

    fn update_inner(&mut self, value: f64, ts: u64) -> Result<DriftResult, DriftError> {
        if self.fault_sticky {
            return Err(DriftError::Fault);
        }

        if !value.is_finite() {
            self.fault_sticky = true;
            self.state = DriftState::Fault;
            tracing::warn!(value, "drift: non-finite observation, latching FAULT");
            return Err(DriftError::Domain);
        }

        if self.initialized && ts <= self.last_ts {
            tracing::debug!(ts, last_ts = self.last_ts, "drift: timestamp regression, discarding sample");
            return Err(DriftError::Temporal);
        }

        if !self.initialized {
            self.ema_value = value;
            self.slope = 0.0;
            self.last_value = value;
            self.last_ts = ts;
            self.n = 1;
            self.initialized = true;
            self.state = DriftState::Learning;
            self.has_ttf = false;
            return Ok(self.snapshot());
        }

        let dt = ts - self.last_ts;
        if dt > self.config.max_gap && self.config.reset_on_gap {
            self.ema_value = value;
            self.slope = 0.0;
            self.last_value = value;
            self.last_ts = ts;
            self.n = 1;
            self.state = DriftState::Learning;
            self.has_ttf = false;
            self.last_ttf = 0.0;
            tracing::info!(dt, max_gap = self.config.max_gap, "drift: gap exceeded max_gap, reseeding EMA");
            return Ok(self.snapshot());
        }

        let raw_slope = (value - self.last_value) / (dt as f64);
        let alpha = self.config.alpha;
        let new_ema = alpha * value + (1.0 - alpha) * self.ema_value;
        let new_slope = alpha * raw_slope + (1.0 - alpha) * self.slope;

        if !new_ema.is_finite() || !new_slope.is_finite() {
            // An EMA of finite inputs cannot itself diverge, but we guard
            // defensively in case a future smoothing formula changes that.
            self.fault_sticky = true;
            self.state = DriftState::Fault;
            return Err(DriftError::Domain);
        }

        self.ema_value = new_ema;
        self.slope = new_slope;
        self.n += 1;
        self.last_value = value;
        self.last_ts = ts;

        self.state = if self.n < self.config.n_min {
            DriftState::Learning
        } else if self.slope.abs() <= self.config.max_safe_slope {
            DriftState::Stable
        } else if self.slope > 0.0 {
            DriftState::DriftingUp
        } else {
            DriftState::DriftingDown
        };

        self.recompute_ttf();
        Ok(self.snapshot())
    }

    fn recompute_ttf(&mut self) {
        let drifting = matches!(self.state, DriftState::DriftingUp | DriftState::DriftingDown);
        if drifting && self.slope != 0.0 {
            let ttf = if self.slope > 0.0 {
                (self.config.upper_limit - self.ema_value) / self.slope
            } else {
                (self.ema_value - self.config.lower_limit) / (-self.slope)
            };
            self.has_ttf = ttf > 0.0;
            self.last_ttf = ttf;
        } else {
            self.has_ttf = false;
            self.last_ttf = 0.0;
        }
    }

    fn snapshot(&self) -> DriftResult {
        DriftResult {
            state: self.state,
            slope: self.slope,
            ema_value: self.ema_value,
            ttf: self.last_ttf,
            has_ttf: self.has_ttf,
        }
    }

    pub fn state(&self) -> DriftState {
        self.state
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn ema_value(&self) -> f64 {
        self.ema_value
    }

    pub fn ttf(&self) -> f64 {
        self.last_ttf
    }

    pub fn has_ttf(&self) -> bool {
        self.has_ttf
    }

    pub fn is_faulted(&self) -> bool {
        self.fault_sticky
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }
}
