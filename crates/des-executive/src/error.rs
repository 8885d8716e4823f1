// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Executive error taxonomy.
//!
//! `CausalityViolation` and `IllegalSuspension` are contract violations —
//! caller bugs surfaced immediately, never recovered by the executive
//! itself (spec.md §7, kind 1). `InvalidRunState` covers lifecycle calls
//! made from a state that does not permit them (e.g. `reset()` while
//! `Running`).

use crate::executive::RunState;
use crate::time::SimTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutiveError {
    #[error("event requested at {requested} is before current time {now}")]
    CausalityViolation { requested: SimTime, now: SimTime },

    #[error("suspend/join called outside a live detachable event")]
    IllegalSuspension,

    #[error("operation requires executive state in {expected:?}, was {actual:?}")]
    InvalidRunState { expected: &'static [RunState], actual: RunState },
}
