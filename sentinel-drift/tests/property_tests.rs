// SPDX-License-Identifier: PMPL-1.0-or-later
//! Property-based tests for the drift detector.

use proptest::prelude::*;
use sentinel_drift::{Drift, DriftConfig, DriftState};

fn arb_jitter() -> impl Strategy<Value = f64> {
    -1.0f64..1.0f64
}

proptest! {
    /// Noise immunity: constant signal plus bounded iid jitter stays within
    /// max_safe_slope once warmed up, for alpha <= 0.1.
    #[test]
    fn noise_immunity(jitters in prop::collection::vec(arb_jitter(), 30..60)) {
        let mut d = Drift::init(DriftConfig {
            alpha: 0.1,
            max_safe_slope: 0.05,
            n_min: 5,
            ..DriftConfig::default()
        }).unwrap();

        let mut ts = 1000u64;
        let mut last_state = DriftState::Learning;
        for jitter in &jitters {
            let r = d.update(50.0 + jitter, ts).unwrap();
            last_state = r.state;
            ts += 100;
        }

        prop_assert!(matches!(last_state, DriftState::Stable | DriftState::Learning));
        prop_assert!(d.slope().abs() < 0.05);
    }

    /// Every accepted update keeps the FSM in a valid, defined state and
    /// increments n by exactly one.
    #[test]
    fn invariants_hold_over_random_streams(values in prop::collection::vec(0.0f64..100.0, 1..200)) {
        let mut d = Drift::init(DriftConfig::default()).unwrap();
        let mut ts = 1000u64;
        let mut prev_n = 0u32;
        for v in &values {
            if d.update(*v, ts).is_ok() {
                prop_assert_eq!(d.n(), prev_n + 1);
                prev_n = d.n();
            }
            if d.is_faulted() {
                prop_assert_eq!(d.state(), DriftState::Fault);
            }
            ts += 100;
        }
    }

    /// Determinism: two freshly-initialized FSMs fed the same sequence agree.
    #[test]
    fn deterministic_replay(values in prop::collection::vec(0.0f64..100.0, 1..100)) {
        let cfg = DriftConfig::default();
        let mut a = Drift::init(cfg).unwrap();
        let mut b = Drift::init(cfg).unwrap();
        let mut ts = 1000u64;
        for v in &values {
            let ra = a.update(*v, ts);
            let rb = b.update(*v, ts);
            prop_assert_eq!(ra.is_ok(), rb.is_ok());
            if let (Ok(ra), Ok(rb)) = (ra, rb) {
                prop_assert_eq!(ra.state, rb.state);
                prop_assert_eq!(ra.slope.to_bits(), rb.slope.to_bits());
            }
            ts += 100;
        }
    }
}
