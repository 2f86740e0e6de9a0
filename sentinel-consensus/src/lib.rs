// SPDX-License-Identifier: PMPL-1.0-or-later
//! Sentinel Consensus -- triple-modular-redundant sensor voter.
//!
//! `Consensus` fuses three `(value, health)` sensor readings into one
//! trusted value per tick, tolerant of a single liar: median/mid-value
//! selection (or weighted averaging) ignores outliers, quorum detection
//! catches outages, and a sticky fault latch protects against re-entrant
//! misuse. It is a pure, synchronous, allocation-free computation object
//! with no time source and no RNG -- identical inputs always produce a
//! byte-identical output.

mod config;
mod error;
mod fsm;
mod state;

pub use config::ConsensusConfig;
pub use error::ConsensusError;
pub use fsm::{Consensus, ConsensusResult};
pub use state::{ConsensusState, SensorHealth, SensorInput};

#[cfg(test)]
mod tests {
    use super::*;

    /// Scenario 5: one liar. Median ignores the outlier.
    #[test]
    fn single_liar_is_ignored_by_median() {
        let mut c = Consensus::init(ConsensusConfig::default()).unwrap();
        let inputs = [
            SensorInput::new(100.0, SensorHealth::Healthy),
            SensorInput::new(100.2, SensorHealth::Healthy),
            SensorInput::new(99999.0, SensorHealth::Healthy),
        ];
        let r = c.update(inputs).unwrap();
        assert_eq!(r.value, 100.2);
        assert_eq!(r.state, ConsensusState::Disagree);
        assert!(r.valid);
        assert!((100.0..=100.2).contains(&r.value));
    }

    /// Scenario 6: no quorum falls back to the last known value.
    #[test]
    fn no_quorum_falls_back_to_last_value() {
        let mut c = Consensus::init(ConsensusConfig::default()).unwrap();
        c.update([
            SensorInput::new(75.0, SensorHealth::Healthy),
            SensorInput::new(75.5, SensorHealth::Healthy),
            SensorInput::new(75.2, SensorHealth::Healthy),
        ])
        .unwrap();

        let err = c
            .update([
                SensorInput::new(80.0, SensorHealth::Healthy),
                SensorInput::new(0.0, SensorHealth::Faulty),
                SensorInput::new(0.0, SensorHealth::Faulty),
            ])
            .unwrap_err();

        match err {
            ConsensusError::Quorum(fallback) => {
                assert_eq!(c.state(), ConsensusState::NoQuorum);
                assert!((fallback.confidence - 0.1).abs() < 1e-9);
                assert!(!fallback.valid);
            }
            other => panic!("expected Quorum, got {other:?}"),
        }
    }

    /// Scenario 7: one degraded sensor lowers confidence but keeps voting.
    #[test]
    fn degraded_sensor_lowers_confidence() {
        let mut c = Consensus::init(ConsensusConfig::default()).unwrap();
        let r = c
            .update([
                SensorInput::new(50.0, SensorHealth::Healthy),
                SensorInput::new(50.2, SensorHealth::Degraded),
                SensorInput::new(50.1, SensorHealth::Healthy),
            ])
            .unwrap();
        assert_eq!(r.state, ConsensusState::Degraded);
        assert!(r.confidence > 0.5 && r.confidence < 1.0);
    }

    /// Scenario 8: identical readings give exact agreement.
    #[test]
    fn identical_readings_give_full_confidence() {
        let mut c = Consensus::init(ConsensusConfig::default()).unwrap();
        let r = c
            .update([
                SensorInput::new(42.0, SensorHealth::Healthy),
                SensorInput::new(42.0, SensorHealth::Healthy),
                SensorInput::new(42.0, SensorHealth::Healthy),
            ])
            .unwrap();
        assert_eq!(r.value, 42.0);
        assert_eq!(r.spread, 0.0);
        assert!(r.sensors_agree);
        assert_eq!(r.confidence, 1.0);
        assert_eq!(r.state, ConsensusState::Agree);
    }

    /// CONTRACT-1 / single-fault tolerance: two agreeing healthy sensors
    /// bound the output regardless of a wild third reading.
    #[test]
    fn single_fault_tolerance() {
        let mut c = Consensus::init(ConsensusConfig::default()).unwrap();
        let r = c
            .update([
                SensorInput::new(10.0, SensorHealth::Healthy),
                SensorInput::new(10.5, SensorHealth::Healthy),
                SensorInput::new(-5000.0, SensorHealth::Healthy),
            ])
            .unwrap();
        assert!(r.value >= 10.0 && r.value <= 10.5);
    }

    /// CONTRACT-2 / bounded output: the consensus value never exceeds the
    /// range of the active readings.
    #[test]
    fn bounded_output_within_active_range() {
        let mut c = Consensus::init(ConsensusConfig::default()).unwrap();
        let r = c
            .update([
                SensorInput::new(1.0, SensorHealth::Healthy),
                SensorInput::new(5.0, SensorHealth::Healthy),
                SensorInput::new(3.0, SensorHealth::Healthy),
            ])
            .unwrap();
        assert!(r.value >= 1.0 && r.value <= 5.0);
    }

    /// CONTRACT-4 / degradation monotonicity.
    #[test]
    fn confidence_decreases_monotonically_with_degradation() {
        let all_healthy = {
            let mut c = Consensus::init(ConsensusConfig::default()).unwrap();
            c.update([
                SensorInput::new(50.0, SensorHealth::Healthy),
                SensorInput::new(50.0, SensorHealth::Healthy),
                SensorInput::new(50.0, SensorHealth::Healthy),
            ])
            .unwrap()
            .confidence
        };
        let one_degraded = {
            let mut c = Consensus::init(ConsensusConfig::default()).unwrap();
            c.update([
                SensorInput::new(50.0, SensorHealth::Healthy),
                SensorInput::new(50.0, SensorHealth::Degraded),
                SensorInput::new(50.0, SensorHealth::Healthy),
            ])
            .unwrap()
            .confidence
        };
        let two_degraded = {
            let mut c = Consensus::init(ConsensusConfig::default()).unwrap();
            c.update([
                SensorInput::new(50.0, SensorHealth::Degraded),
                SensorInput::new(50.0, SensorHealth::Degraded),
                SensorInput::new(50.0, SensorHealth::Healthy),
            ])
            .unwrap()
            .confidence
        };
        let no_quorum = 0.1;

        assert!(all_healthy > one_degraded);
        assert!(one_degraded > two_degraded);
        assert!(two_degraded > no_quorum);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut c = Consensus::init(ConsensusConfig::default()).unwrap();
        c.update([
            SensorInput::new(1.0, SensorHealth::Healthy),
            SensorInput::new(1.0, SensorHealth::Healthy),
            SensorInput::new(1.0, SensorHealth::Healthy),
        ])
        .unwrap();
        assert!(!c.is_faulted());
        c.reset();
        c.reset();
        assert_eq!(c.state(), ConsensusState::Init);
    }

    #[test]
    fn config_validation_rejects_out_of_range() {
        assert!(Consensus::init(ConsensusConfig { max_deviation: 0.0, ..ConsensusConfig::default() }).is_err());
        assert!(Consensus::init(ConsensusConfig { tie_breaker: 3, ..ConsensusConfig::default() }).is_err());
    }

    #[test]
    fn weighted_average_mode_weighs_by_health() {
        let mut c = Consensus::init(ConsensusConfig {
            use_weighted_avg: true,
            ..ConsensusConfig::default()
        })
        .unwrap();
        let r = c
            .update([
                SensorInput::new(100.0, SensorHealth::Healthy),
                SensorInput::new(200.0, SensorHealth::Degraded),
                SensorInput::new(100.0, SensorHealth::Healthy),
            ])
            .unwrap();
        // weights: 1.0, 0.5, 1.0 -> (100 + 100 + 100) / 2.5 = 120
        assert!((r.value - 120.0).abs() < 1e-9);
    }

    #[test]
    fn two_active_tie_breaker_selects_indexed_sensor() {
        let mut c = Consensus::init(ConsensusConfig {
            tie_breaker: 0,
            ..ConsensusConfig::default()
        })
        .unwrap();
        let r = c
            .update([
                SensorInput::new(10.0, SensorHealth::Healthy),
                SensorInput::new(20.0, SensorHealth::Healthy),
                SensorInput::new(0.0, SensorHealth::Faulty),
            ])
            .unwrap();
        assert_eq!(r.value, 10.0);
    }

    #[test]
    fn two_active_tie_breaker_pointing_at_excluded_sensor_falls_back_to_mean() {
        let mut c = Consensus::init(ConsensusConfig {
            tie_breaker: 2,
            ..ConsensusConfig::default()
        })
        .unwrap();
        let r = c
            .update([
                SensorInput::new(10.0, SensorHealth::Healthy),
                SensorInput::new(20.0, SensorHealth::Healthy),
                SensorInput::new(0.0, SensorHealth::Faulty),
            ])
            .unwrap();
        assert_eq!(r.value, 15.0);
    }

    /// Edge case: a NaN-valued sensor is excluded from voting, not a fault.
    #[test]
    fn nan_sensor_value_is_excluded_not_faulted() {
        let mut c = Consensus::init(ConsensusConfig::default()).unwrap();
        let r = c
            .update([
                SensorInput::new(50.0, SensorHealth::Healthy),
                SensorInput::new(50.1, SensorHealth::Healthy),
                SensorInput::new(f64::NAN, SensorHealth::Healthy),
            ])
            .unwrap();
        assert_eq!(r.active_sensors, 2);
        assert_eq!(r.used, [true, true, false]);
        assert!(!c.is_faulted());
    }
}
