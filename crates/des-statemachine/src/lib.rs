// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! des-statemachine: the generic transition-matrix state machine
//! (spec.md §4.2) used to drive the model-wide lifecycle
//! (`Idle -> Validated -> Running -> Paused -> Finished`).
//!
//! [`StateMachine`] is generic over the state enumeration `S` and an
//! opaque user-data payload `D` threaded through every handler, the way
//! `spec.md` leaves both unspecified ("an enumerated state set", "userData").
//! [`model_state::ModelState`] is the concrete enumeration the rest of the
//! workspace (the `des-model` root package) instantiates it with.

pub mod error;
pub mod handler;
pub mod model_state;
pub mod state_machine;

pub use error::TransitionError;
pub use handler::{FailureReason, HandlerId, HandlerScope};
pub use model_state::ModelState;
pub use state_machine::StateMachine;
