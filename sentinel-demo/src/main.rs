// SPDX-License-Identifier: PMPL-1.0-or-later
//! Sentinel demo -- scenario runner for `sentinel-drift` and `sentinel-consensus`.
//!
//! Prints a banner and result table per scenario, mirroring the reference
//! C demo's two modules. Purely informational: nothing here is part of
//! either library crate's stable interface.

mod config;
mod consensus_scenarios;
mod drift_scenarios;
mod ui;

use clap::Parser;
use colored::Colorize;
use config::DemoConfig;
use sentinel_consensus::Consensus;
use sentinel_drift::Drift;
use std::path::PathBuf;

/// Run the Sentinel scenario catalogue.
#[derive(Parser, Debug)]
#[command(name = "sentinel-demo", version, about = "Drift + Consensus scenario runner")]
struct Cli {
    /// Optional JSON file with `{"drift": ..., "consensus": ...}` baseline config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run only the drift scenarios.
    #[arg(long)]
    drift_only: bool,

    /// Run only the consensus scenarios.
    #[arg(long)]
    consensus_only: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let demo_config = match &cli.config {
        Some(path) => {
            let cfg = DemoConfig::load(path)?;
            tracing::info!(path = %path.display(), "loaded baseline config");
            cfg
        }
        None => DemoConfig::default(),
    };

    Drift::init(demo_config.drift)?;
    Consensus::init(demo_config.consensus)?;

    println!();
    println!(
        "{}",
        "  \"Temperature is normal now, but rising too fast.\"".italic()
    );

    if !cli.consensus_only {
        drift_scenarios::run_all(&demo_config.drift);
    }
    if !cli.drift_only {
        consensus_scenarios::run_all(&demo_config.consensus);
    }

    println!();
    println!("{}", "demo complete.".green().bold());
    Ok(())
}
