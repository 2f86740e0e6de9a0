// SPDX-License-Identifier: PMPL-1.0-or-later
//! Optional JSON config file for the demo's default scenario parameters.

use anyhow::Context;
use sentinel_consensus::ConsensusConfig;
use sentinel_drift::DriftConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `{ "drift": DriftConfig, "consensus": ConsensusConfig }`, loaded via
/// `--config <path>`. Each scenario still overrides the fields it demos;
/// this only seeds the baseline `DriftConfig::default()`/`ConsensusConfig::default()`
/// a scenario starts from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    pub drift: DriftConfig,
    pub consensus: ConsensusConfig,
}

impl DemoConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let cfg: DemoConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(cfg)
    }
}
