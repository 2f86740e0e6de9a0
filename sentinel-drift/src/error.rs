// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error taxonomy for the drift detector.

use thiserror::Error;

/// Errors returned by [`crate::Drift::update`] and [`crate::Drift::init`].
///
/// The taxonomy separates programmer errors (caught at `init`), transient
/// errors (the sample is discarded but the FSM stays coherent), and sticky
/// errors (the FSM latches into [`crate::DriftState::Fault`] until `reset`).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftError {
    /// A required configuration value was out of range.
    #[error("drift config out of range: {0}")]
    Config(&'static str),

    /// The observed value was NaN or infinite. Sticky: latches `Fault`.
    #[error("non-finite observation (NaN or +/-Inf)")]
    Domain,

    /// `ts` was not strictly greater than the previously accepted timestamp.
    /// Non-sticky: the sample is discarded and the FSM is otherwise untouched.
    #[error("timestamp did not advance past the last accepted sample")]
    Temporal,

    /// The FSM is latched in `Fault` and must be `reset` before further use.
    #[error("drift FSM is latched in FAULT; call reset() first")]
    Fault,
}
