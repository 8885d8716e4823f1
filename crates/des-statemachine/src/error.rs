// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State-machine error taxonomy.
//!
//! `IllegalTransition` is a contract violation (spec.md §7, kind 1) — the
//! caller asked for a transition the matrix never permits, and the core
//! never attempts to recover from it. `TransitionFailure` is a recoverable
//! application-level failure (kind 2): a `Prepare` handler vetoed the
//! transition, the state was rolled back, and the caller may inspect the
//! accumulated reasons and retry.

use crate::handler::FailureReason;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransitionError<S: std::fmt::Debug> {
    #[error("transition from {from:?} to {to:?} is not permitted")]
    IllegalTransition { from: S, to: S },

    #[error("transition failed: {}", reasons.iter().map(|r| r.message.as_str()).collect::<Vec<_>>().join("; "))]
    TransitionFailure { reasons: Vec<FailureReason> },
}
