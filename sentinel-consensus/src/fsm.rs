// SPDX-License-Identifier: PMPL-1.0-or-later
//! The consensus state machine itself.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::ConsensusConfig;
use crate::error::ConsensusError;
use crate::state::{is_active, ConsensusState, SensorHealth, SensorInput};

/// Result of one [`Consensus::update`] tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsensusResult {
    pub value: f64,
    pub confidence: f64,
    pub state: ConsensusState,
    pub active_sensors: u8,
    pub sensors_agree: bool,
    pub spread: f64,
    pub valid: bool,
    pub used: [bool; 3],
}

/// Triple-modular-redundant voter: fuses three `(value, health)` sensor
/// readings into one trusted value, tolerant of a single liar.
///
/// `Consensus` is a pure function of `(state, config, input)` -- no time
/// source, no RNG, no I/O. Identical inputs and config always produce a
/// byte-identical output.
#[derive(Debug)]
pub struct Consensus {
    config: ConsensusConfig,
    state: ConsensusState,
    last_value: f64,
    n: u64,
    fault_reentry: bool,
    in_use: AtomicBool,
}

impl Consensus {
    /// Validate `config` and construct a fresh instance in `Init`.
    pub fn init(config: ConsensusConfig) -> Result<Self, ConsensusError> {
        config.validate()?;
        Ok(Self {
            config,
            state: ConsensusState::Init,
            last_value: 0.0,
            n: 0,
            fault_reentry: false,
            in_use: AtomicBool::new(false),
        })
    }

    /// Clear `last_value`, `n`, and the sticky fault; return to `Init`.
    /// `config` is preserved.
    pub fn reset(&mut self) {
        self.state = ConsensusState::Init;
        self.last_value = 0.0;
        self.n = 0;
        self.fault_reentry = false;
        self.in_use.store(false, Ordering::SeqCst);
    }

    /// Vote on three sensor readings for the current tick.
    pub fn update(&mut self, inputs: [SensorInput; 3]) -> Result<ConsensusResult, ConsensusError> {
        if self
            .in_use
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            self.fault_reentry = true;
            self.state = ConsensusState::Fault;
            return Err(ConsensusError::Fault);
        }
        let result = self.update_inner(inputs);
        self.in_use.store(false, Ordering::SeqCst);
        result
    }

    fn update_inner(&mut self, inputs: [SensorInput; 3]) -> Result<ConsensusResult, ConsensusError> {
        if self.fault_reentry {
            return Err(ConsensusError::Fault);
        }

        let used: [bool; 3] = [
            is_active(&inputs[0]),
            is_active(&inputs[1]),
            is_active(&inputs[2]),
        ];
        let active_sensors = used.iter().filter(|&&u| u).count() as u8;

        if active_sensors < 2 {
            self.state = ConsensusState::NoQuorum;
            tracing::warn!(active_sensors, "consensus: no quorum, falling back to last known value");
            let fallback = ConsensusResult {
                value: self.last_value,
                confidence: 0.1,
                state: ConsensusState::NoQuorum,
                active_sensors,
                sensors_agree: false,
                spread: 0.0,
                valid: false,
                used,
            };
            return Err(ConsensusError::Quorum(fallback));
        }

        // Fixed-capacity scratch: at most 3 sensors, collected without allocating.
        let mut active_values = [(0usize, 0.0f64); 3];
        let mut active_count = 0usize;
        for (i, s) in inputs.iter().enumerate() {
            if used[i] {
                active_values[active_count] = (i, s.value);
                active_count += 1;
            }
        }
        let active_values = &active_values[..active_count];

        let spread = {
            let max = active_values.iter().map(|(_, v)| *v).fold(f64::MIN, f64::max);
            let min = active_values.iter().map(|(_, v)| *v).fold(f64::MAX, f64::min);
            max - min
        };

        let value = self.vote(&inputs, active_values);

        let sensors_agree = spread <= self.config.max_deviation;
        let any_degraded = inputs.iter().enumerate().any(|(i, s)| used[i] && s.health == SensorHealth::Degraded);

        self.state = if any_degraded || active_sensors == 2 {
            ConsensusState::Degraded
        } else if sensors_agree {
            ConsensusState::Agree
        } else {
            ConsensusState::Disagree
        };

        let degraded_count = inputs.iter().enumerate().filter(|(i, s)| used[*i] && s.health == SensorHealth::Degraded).count() as f64;
        let excluded_count = (3 - active_sensors) as f64;
        let spread_penalty = (spread / self.config.max_deviation).min(0.5).max(0.0);
        let confidence = (1.0 - 0.25 * degraded_count - 0.5 * excluded_count - spread_penalty).clamp(0.0, 1.0);

        self.last_value = value;
        self.n += 1;

        Ok(ConsensusResult {
            value,
            confidence,
            state: self.state,
            active_sensors,
            sensors_agree,
            spread,
            valid: active_sensors >= 2 && value.is_finite(),
            used,
        })
    }

    fn vote(&self, inputs: &[SensorInput; 3], active_values: &[(usize, f64)]) -> f64 {
        if self.config.use_weighted_avg {
            let mut weighted_sum = 0.0;
            let mut weight_total = 0.0;
            for &(i, v) in active_values {
                let w = match inputs[i].health {
                    SensorHealth::Healthy => 1.0,
                    SensorHealth::Degraded => 0.5,
                    SensorHealth::Faulty => 0.0,
                };
                weighted_sum += w * v;
                weight_total += w;
            }
            if weight_total > 0.0 {
                weighted_sum / weight_total
            } else {
                active_values.iter().map(|(_, v)| *v).sum::<f64>() / active_values.len() as f64
            }
        } else if active_values.len() == 3 {
            let mut sorted = [active_values[0], active_values[1], active_values[2]];
            sorted.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));
            sorted[1].1
        } else {
            let tb = self.config.tie_breaker;
            if let Some((_, v)) = active_values.iter().find(|(i, _)| *i == tb) {
                *v
            } else {
                active_values.iter().map(|(_, v)| *v).sum::<f64>() / active_values.len() as f64
            }
        }
    }

    pub fn state(&self) -> ConsensusState {
        self.state
    }

    pub fn is_faulted(&self) -> bool {
        self.fault_reentry
    }

    pub fn last_value(&self) -> f64 {
        self.last_value
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }
}
