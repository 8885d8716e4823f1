// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The concrete model-wide lifecycle state enumeration (spec.md §2):
//! `Idle -> Validated -> Running -> Paused -> Finished`.

use crate::state_machine::StateMachine;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelState {
    Idle,
    Validated,
    Running,
    Paused,
    Finished,
}

des_core::simple_display! {
    ModelState {
        Idle => "idle",
        Validated => "validated",
        Running => "running",
        Paused => "paused",
        Finished => "finished",
    }
}

impl ModelState {
    /// Builds a [`StateMachine`] pre-wired with the legal transitions of
    /// the model lifecycle: validate before run, pause/resume while
    /// running, and finish from either running or paused. Re-validation
    /// after finishing is permitted (a finished model may be rebuilt and
    /// re-run), matching the Executive's own `Stopped/Finished -> reset`
    /// re-entrancy.
    pub fn machine<D>() -> StateMachine<ModelState, D> {
        let mut m = StateMachine::new(ModelState::Idle);
        m.allow(ModelState::Idle, ModelState::Validated);
        m.allow(ModelState::Validated, ModelState::Running);
        m.allow(ModelState::Running, ModelState::Paused);
        m.allow(ModelState::Paused, ModelState::Running);
        m.allow(ModelState::Running, ModelState::Finished);
        m.allow(ModelState::Paused, ModelState::Finished);
        m.allow(ModelState::Finished, ModelState::Idle);
        m
    }
}
