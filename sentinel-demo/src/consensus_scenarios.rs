// SPDX-License-Identifier: PMPL-1.0-or-later
//! Scenario catalogue for the Consensus FSM.
//!
//! Grounded in `demo_all_agree` .. `demo_degraded_sensors` from the
//! reference C demo: each scenario exercises one contract or invariant and
//! prints a banner plus a result table. Informational only -- not part of
//! the library's public API.

use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table};
use sentinel_consensus::{Consensus, ConsensusConfig, ConsensusError, SensorHealth, SensorInput};

use crate::ui::banner;

fn print_inputs(inputs: &[SensorInput; 3]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![Cell::new("sensor"), Cell::new("value"), Cell::new("health")]);
    for (i, s) in inputs.iter().enumerate() {
        table.add_row(vec![
            Cell::new(format!("S{i}")),
            Cell::new(format!("{:.2}", s.value)),
            Cell::new(format!("{:?}", s.health)),
        ]);
    }
    println!("{table}");
}

fn print_result(out: &Result<sentinel_consensus::ConsensusResult, ConsensusError>) {
    let r = match out {
        Ok(r) => r,
        Err(ConsensusError::Quorum(fallback)) => fallback,
        Err(e) => {
            println!("  result: ERROR {e}");
            return;
        }
    };
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![Cell::new("field"), Cell::new("value")]);
    table.add_row(vec![Cell::new("value"), Cell::new(format!("{:.2}", r.value))]);
    table.add_row(vec![Cell::new("confidence"), Cell::new(format!("{:.2}", r.confidence))]);
    table.add_row(vec![Cell::new("state"), Cell::new(format!("{}", r.state))]);
    table.add_row(vec![Cell::new("active_sensors"), Cell::new(r.active_sensors)]);
    table.add_row(vec![Cell::new("sensors_agree"), Cell::new(r.sensors_agree)]);
    table.add_row(vec![Cell::new("spread"), Cell::new(format!("{:.2}", r.spread))]);
    table.add_row(vec![Cell::new("valid"), Cell::new(r.valid)]);
    table.add_row(vec![Cell::new("used"), Cell::new(format!("{:?}", r.used))]);
    println!("{table}");
}

/// Demo 1: three healthy sensors agreeing.
pub fn all_agree(base: &ConsensusConfig) {
    banner("Consensus 1: Normal Operation (All Sensors Agree)", "C-INV-2", "All three sensors report similar values.");
    let mut c = Consensus::init(*base).unwrap();
    let inputs = [
        SensorInput::new(100.0, SensorHealth::Healthy),
        SensorInput::new(100.5, SensorHealth::Healthy),
        SensorInput::new(100.2, SensorHealth::Healthy),
    ];
    print_inputs(&inputs);
    print_result(&c.update(inputs));
}

/// Demo 2: one liar, outvoted by the median (CONTRACT-1).
pub fn single_fault(base: &ConsensusConfig) {
    banner(
        "Consensus 2: Single Fault Tolerance (One Liar)",
        "CONTRACT-1",
        "Sensor 2 reports garbage. Mid-value selection ignores it.",
    );
    let mut c = Consensus::init(*base).unwrap();
    let inputs = [
        SensorInput::new(100.0, SensorHealth::Healthy),
        SensorInput::new(100.5, SensorHealth::Healthy),
        SensorInput::new(9999.0, SensorHealth::Healthy),
    ];
    print_inputs(&inputs);
    print_result(&c.update(inputs));
}

/// Demo 3: a slowly drifting (Byzantine) sensor is still outvoted.
pub fn byzantine_fault(base: &ConsensusConfig) {
    banner(
        "Consensus 3: Byzantine Fault (Subtle Liar Drifts Over Time)",
        "CONTRACT-1",
        "Sensor 2 starts correct but slowly drifts away over ten ticks.",
    );
    let mut c = Consensus::init(ConsensusConfig { max_deviation: 2.0, ..*base }).unwrap();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("step"),
        Cell::new("s0"),
        Cell::new("s1"),
        Cell::new("s2 (liar)"),
        Cell::new("consensus"),
        Cell::new("state"),
    ]);
    let ground_truth = 100.0f64;
    for step in 0..10i64 {
        let s0 = ground_truth + ((step % 3) - 1) as f64 * 0.1;
        let s1 = ground_truth + ((step % 2) as f64 - 0.5) * 0.1;
        let s2 = ground_truth + step as f64 * 1.5;
        let inputs = [
            SensorInput::new(s0, SensorHealth::Healthy),
            SensorInput::new(s1, SensorHealth::Healthy),
            SensorInput::new(s2, SensorHealth::Healthy),
        ];
        let r = c.update(inputs).unwrap();
        table.add_row(vec![
            Cell::new(step),
            Cell::new(format!("{s0:.1}")),
            Cell::new(format!("{s1:.1}")),
            Cell::new(format!("{s2:.1}")),
            Cell::new(format!("{:.1}", r.value)),
            Cell::new(format!("{}", r.state)),
        ]);
    }
    println!("{table}");
    println!("  note: despite S2 drifting to +13.5, consensus stayed near 100.");
}

/// Demo 4: a sensor marked `Faulty` by upstream Drift is excluded from voting.
pub fn degraded_mode(base: &ConsensusConfig) {
    banner(
        "Consensus 4: Degraded Mode (Upstream Marks Sensor Faulty)",
        "C-INV-5 (bounded output)",
        "Sensor 2 is marked FAULTY by upstream Drift and excluded.",
    );
    let mut c = Consensus::init(*base).unwrap();
    let inputs = [
        SensorInput::new(50.0, SensorHealth::Healthy),
        SensorInput::new(50.3, SensorHealth::Healthy),
        SensorInput::new(999.0, SensorHealth::Faulty),
    ];
    print_inputs(&inputs);
    print_result(&c.update(inputs));
}

/// Demo 5: two sensors down falls back to the last known value (C-INV-3).
pub fn no_quorum(base: &ConsensusConfig) {
    banner(
        "Consensus 5: No Quorum (Insufficient Healthy Sensors)",
        "C-INV-3",
        "Two sensors marked FAULTY. Consensus cannot be achieved.",
    );
    let mut c = Consensus::init(*base).unwrap();
    let good = c
        .update([
            SensorInput::new(75.0, SensorHealth::Healthy),
            SensorInput::new(75.5, SensorHealth::Healthy),
            SensorInput::new(75.2, SensorHealth::Healthy),
        ])
        .unwrap();
    println!("  first update (all healthy): consensus = {:.1}", good.value);

    let bad = [
        SensorInput::new(80.0, SensorHealth::Healthy),
        SensorInput::new(0.0, SensorHealth::Faulty),
        SensorInput::new(0.0, SensorHealth::Faulty),
    ];
    print_inputs(&bad);
    print_result(&c.update(bad));
}

/// Demo 6: readings beyond `max_deviation` still vote, but flag disagreement.
pub fn disagreement(base: &ConsensusConfig) {
    banner(
        "Consensus 6: Disagreement (Spread Exceeds Tolerance)",
        "sec. 8 scenario 5",
        "Sensors give different readings beyond max_deviation.",
    );
    let mut c = Consensus::init(ConsensusConfig { max_deviation: 1.0, ..*base }).unwrap();
    let inputs = [
        SensorInput::new(100.0, SensorHealth::Healthy),
        SensorInput::new(102.0, SensorHealth::Healthy),
        SensorInput::new(104.0, SensorHealth::Healthy),
    ];
    print_inputs(&inputs);
    print_result(&c.update(inputs));
}

/// Demo 7: mid-value selection compared against a naive average.
pub fn voting_methods(base: &ConsensusConfig) {
    banner(
        "Consensus 7: Voting Methods Comparison",
        "sec. 4.2 step 5",
        "Compare mid-value selection against weighted/naive averaging.",
    );
    let inputs = [
        SensorInput::new(100.0, SensorHealth::Healthy),
        SensorInput::new(100.0, SensorHealth::Healthy),
        SensorInput::new(200.0, SensorHealth::Healthy),
    ];
    print_inputs(&inputs);

    let mut mid = Consensus::init(ConsensusConfig { use_weighted_avg: false, ..*base }).unwrap();
    let r_mid = mid.update(inputs).unwrap();
    let naive_avg = (100.0 + 100.0 + 200.0) / 3.0;

    println!("  mid-value selection: {:.1}", r_mid.value);
    println!("  naive average:       {naive_avg:.1}");
    println!("  mid-value protects against the outlier (200.0).");
}

/// Demo 8: degraded sensors still vote, but confidence drops.
pub fn degraded_sensors(base: &ConsensusConfig) {
    banner(
        "Consensus 8: Degraded Sensors (Lower Confidence)",
        "CONTRACT-4",
        "Sensors marked DEGRADED still contribute but reduce confidence.",
    );
    let mut c = Consensus::init(*base).unwrap();

    let r = c
        .update([
            SensorInput::new(50.0, SensorHealth::Healthy),
            SensorInput::new(50.2, SensorHealth::Healthy),
            SensorInput::new(50.1, SensorHealth::Healthy),
        ])
        .unwrap();
    println!("  all HEALTHY: confidence = {:.2}", r.confidence);

    c.reset();
    let r = c
        .update([
            SensorInput::new(50.0, SensorHealth::Healthy),
            SensorInput::new(50.2, SensorHealth::Degraded),
            SensorInput::new(50.1, SensorHealth::Healthy),
        ])
        .unwrap();
    println!("  one DEGRADED: confidence = {:.2}", r.confidence);

    c.reset();
    let r = c
        .update([
            SensorInput::new(50.0, SensorHealth::Degraded),
            SensorInput::new(50.2, SensorHealth::Degraded),
            SensorInput::new(50.1, SensorHealth::Healthy),
        ])
        .unwrap();
    println!("  two DEGRADED: confidence = {:.2}", r.confidence);
}

pub fn run_all(base: &ConsensusConfig) {
    println!();
    println!("{}", "+------------------------------------------------------------------+".cyan());
    println!("{}", "|           Sentinel Consensus -- TMR Voter                         |".cyan().bold());
    println!("{}", "+------------------------------------------------------------------+".cyan());

    all_agree(base);
    single_fault(base);
    byzantine_fault(base);
    degraded_mode(base);
    no_quorum(base);
    disagreement(base);
    voting_methods(base);
    degraded_sensors(base);
}
