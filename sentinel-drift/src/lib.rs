// SPDX-License-Identifier: PMPL-1.0-or-later
//! Sentinel Drift -- single-channel rate-of-change and trend detector.
//!
//! `Drift` watches one sensor channel over time and classifies its trend
//! (`Stable`, `DriftingUp`, `DriftingDown`) from an exponentially smoothed
//! slope, estimates time-to-failure against configured physical limits, and
//! latches into a sticky `Fault` state on a non-finite observation. It is a
//! pure, synchronous, allocation-free computation object: `init`, `update`,
//! `reset`, and a handful of read accessors. There is no I/O in this crate.

mod config;
mod error;
mod fsm;
mod state;

pub use config::DriftConfig;
pub use error::DriftError;
pub use fsm::{Drift, DriftResult};
pub use state::DriftState;
