// SPDX-License-Identifier: PMPL-1.0-or-later
//! Scenario catalogue for the Drift FSM.
//!
//! Grounded in `demo_stable_signal` .. `demo_time_gap` from the reference
//! C demo: each scenario exercises one contract or invariant and prints a
//! banner plus a result table. Informational only -- not part of the
//! library's public API.

use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table};
use sentinel_drift::{Drift, DriftConfig, DriftState};

use crate::ui::banner;

/// One row of a scenario's printed trace.
struct Row {
    i: u32,
    value: f64,
    ts: u64,
    outcome: String,
}

fn table_of(rows: &[Row]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("i"),
        Cell::new("value"),
        Cell::new("ts"),
        Cell::new("outcome"),
    ]);
    for r in rows {
        table.add_row(vec![
            Cell::new(r.i),
            Cell::new(format!("{:.2}", r.value)),
            Cell::new(r.ts),
            Cell::new(&r.outcome),
        ]);
    }
    table
}

fn outcome_of(d: &Drift, result: Result<sentinel_drift::DriftResult, sentinel_drift::DriftError>) -> String {
    match result {
        Ok(r) => format!(
            "slope={:+.4} ttf={} state={}",
            r.slope,
            if r.has_ttf { format!("{:.1}", r.ttf) } else { "n/a".into() },
            r.state
        ),
        Err(e) => format!("ERROR: {e} (faulted={})", d.is_faulted()),
    }
}

/// Demo 1: a constant signal settles to `Stable` with ~zero slope.
pub fn stable_signal(base: &DriftConfig) {
    banner(
        "Drift 1: Stable Signal (LEARNING -> STABLE)",
        "D-INV-2",
        "A constant signal should settle to STABLE with zero slope.",
    );
    let cfg = DriftConfig { n_min: 5, ..*base };
    let mut d = Drift::init(cfg).unwrap();
    let mut ts = 1000u64;
    let mut rows = Vec::new();
    for i in 1..=10u32 {
        let r = d.update(50.0, ts);
        rows.push(Row { i, value: 50.0, ts, outcome: outcome_of(&d, r) });
        ts += 100;
    }
    println!("{}", table_of(&rows));
    println!("  final: slope={:.6} state={}", d.slope(), d.state());
}

/// Demo 2: a linear ramp is classified `DriftingUp` with a TTF estimate.
pub fn ramp_up(base: &DriftConfig) {
    banner(
        "Drift 2: Ramp Detection (STABLE -> DRIFTING_UP)",
        "CONTRACT-3 (TTF accuracy)",
        "A linearly increasing signal should trigger DRIFTING_UP.",
    );
    let cfg = DriftConfig { n_min: 3, max_safe_slope: 0.05, alpha: 0.3, ..*base };
    let mut d = Drift::init(cfg).unwrap();
    let mut ts = 1000u64;
    let mut value = 20.0;
    let mut rows = Vec::new();
    for i in 1..=15u32 {
        let r = d.update(value, ts);
        rows.push(Row { i, value, ts, outcome: outcome_of(&d, r) });
        value += 10.0;
        ts += 100;
    }
    println!("{}", table_of(&rows));
    println!("  final: slope={:.4} state={}", d.slope(), d.state());
}

/// Demo 3: bounded jitter around a constant should not trigger drift.
///
/// Uses a small deterministic xorshift in place of libc's seeded `rand` so
/// the trace is reproducible without adding an RNG dependency.
pub fn noise_immunity(base: &DriftConfig) {
    banner(
        "Drift 3: Noise Immunity (Jitter Does Not Trigger Drift)",
        "CONTRACT-2 (noise immunity)",
        "Small bounded jitter around a constant should remain STABLE.",
    );
    let cfg = DriftConfig { n_min: 5, max_safe_slope: 0.05, alpha: 0.1, ..*base };
    let mut d = Drift::init(cfg).unwrap();
    let mut ts = 1000u64;
    let mut seed = 0x2545F4914F6CDD1Du64;
    let mut rows = Vec::new();
    for i in 1..=20u32 {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let jitter = ((seed % 400) as f64 / 100.0) - 2.0;
        let value = 50.0 + jitter;
        let r = d.update(value, ts);
        rows.push(Row { i, value, ts, outcome: outcome_of(&d, r) });
        ts += 100;
    }
    println!("{}", table_of(&rows));
    println!("  final: slope={:.6} state={}", d.slope(), d.state());
}

/// Demo 4: a single spike shifts slope by at most `alpha * raw_slope`.
pub fn spike_resistance(base: &DriftConfig) {
    banner(
        "Drift 4: Spike Resistance (Single Outlier)",
        "spike bound (sec. 8)",
        "A single spike should shift slope by at most alpha * spike_slope.",
    );
    let cfg = DriftConfig { n_min: 5, max_safe_slope: 1.0, alpha: 0.1, ..*base };
    let mut d = Drift::init(cfg).unwrap();
    let mut ts = 1000u64;
    let mut rows = Vec::new();
    for i in 1..=10u32 {
        let r = d.update(50.0, ts);
        rows.push(Row { i, value: 50.0, ts, outcome: outcome_of(&d, r) });
        ts += 100;
    }
    let r = d.update(150.0, ts);
    let slope_after_spike = d.slope();
    rows.push(Row { i: 11, value: 150.0, ts, outcome: outcome_of(&d, r) });
    ts += 100;
    for i in 12..=20u32 {
        let r = d.update(50.0, ts);
        rows.push(Row { i, value: 50.0, ts, outcome: outcome_of(&d, r) });
        ts += 100;
    }
    println!("{}", table_of(&rows));
    println!("  slope immediately after spike: {slope_after_spike:.4} (bound: {:.4})", 0.1 * 1.0 * 1.1);
    println!("  final slope after recovery: {:.6}", d.slope());
}

/// Demo 5: extrapolated time-to-failure against `upper_limit`.
pub fn ttf_calculation(base: &DriftConfig) {
    banner(
        "Drift 5: Time-To-Failure Calculation",
        "CONTRACT-3 (TTF accuracy)",
        "Estimate when the signal will hit the configured upper limit.",
    );
    let cfg = DriftConfig {
        n_min: 3,
        upper_limit: 100.0,
        lower_limit: 0.0,
        max_safe_slope: 0.05,
        alpha: 0.5,
        ..*base
    };
    let mut d = Drift::init(cfg).unwrap();
    let mut ts = 1000u64;
    let mut value = 40.0;
    let mut rows = Vec::new();
    for i in 1..=10u32 {
        let r = d.update(value, ts);
        rows.push(Row { i, value, ts, outcome: outcome_of(&d, r) });
        value += 5.0;
        ts += 100;
    }
    println!("{}", table_of(&rows));
    println!("  at value={:.0}, slope={:.4}: ttf~{:.0}ms", value - 5.0, d.slope(), d.ttf());
}

/// Demo 6: a NaN observation latches a sticky `Fault`, cleared only by `reset`.
pub fn fault_handling(base: &DriftConfig) {
    banner(
        "Drift 6: Fault Handling (NaN Injection)",
        "D-INV-3 (sticky fault)",
        "Inject NaN -- expect FAULT state, sticky until reset.",
    );
    let mut d = Drift::init(*base).unwrap();
    let mut ts = 1000u64;
    for _ in 0..5 {
        d.update(50.0, ts).unwrap();
        ts += 100;
    }
    println!("  before fault: state={} faulted={}", d.state(), d.is_faulted());

    let err = d.update(f64::NAN, ts).unwrap_err();
    println!("  after NaN: state={} faulted={} error={err}", d.state(), d.is_faulted());
    ts += 100;

    for _ in 0..3 {
        let err = d.update(50.0, ts).unwrap_err();
        println!("  recovery attempt rejected: {err}");
        ts += 100;
    }

    d.reset();
    println!("  after reset: state={} faulted={}", d.state(), d.is_faulted());
}

/// Demo 7: a gap beyond `max_gap` with `reset_on_gap` reseeds the EMA.
pub fn time_gap(base: &DriftConfig) {
    banner(
        "Drift 7: Time-Gap Handling (Stale Data Protection)",
        "sec. 8 scenario 4",
        "A large time gap triggers an auto-reset to prevent a corrupted slope.",
    );
    let cfg = DriftConfig { n_min: 3, max_gap: 1000, reset_on_gap: true, ..*base };
    let mut d = Drift::init(cfg).unwrap();
    let mut ts = 1000u64;
    for i in 0..5 {
        d.update(50.0 + i as f64, ts).unwrap();
        println!("  ts={ts}: n={} state={}", d.n(), d.state());
        ts += 100;
    }
    ts += 5000;
    d.update(60.0, ts).unwrap();
    println!("  ts={ts}: n={} state={} (auto-reset triggered)", d.n(), d.state());
    assert_eq!(d.state(), DriftState::Learning);
}

pub fn run_all(base: &DriftConfig) {
    println!();
    println!("{}", "+------------------------------------------------------------------+".cyan());
    println!("{}", "|           Sentinel Drift -- Rate & Trend Detection                |".cyan().bold());
    println!("{}", "+------------------------------------------------------------------+".cyan());

    stable_signal(base);
    ramp_up(base);
    noise_immunity(base);
    spike_resistance(base);
    ttf_calculation(base);
    fault_handling(base);
    time_gap(base);
}
