// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error taxonomy for the consensus voter.

use thiserror::Error;

use crate::fsm::ConsensusResult;

/// Errors returned by [`crate::Consensus::update`] and [`crate::Consensus::init`].
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConsensusError {
    /// A required configuration value was out of range.
    #[error("consensus config out of range: {0}")]
    Config(&'static str),

    /// Fewer than two sensors were active this tick. Non-sticky: `state`
    /// moves to `NoQuorum`. Carries the fallback result -- the last known
    /// value at very low confidence -- so callers get it without a second
    /// accessor call.
    #[error("fewer than 2 active sensors; no quorum")]
    Quorum(ConsensusResult),

    /// The FSM is latched in `Fault` (internal fault or re-entry) and must
    /// be `reset` before further use.
    #[error("consensus FSM is latched in FAULT; call reset() first")]
    Fault,
}
