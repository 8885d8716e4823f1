// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Model-level error taxonomy: every subsystem error a [`crate::Model`]
//! call can surface, plus the facade's own `UnknownMixture` (spec.md §7
//! applies unchanged within each subsystem; this enum only adds the
//! seam between them).

use des_chem::ChemError;
use des_chem::MixtureId;
use des_executive::ExecutiveError;
use des_statemachine::{ModelState, TransitionError};
use des_taskgraph::TaskGraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("lifecycle: {0}")]
    Lifecycle(#[from] TransitionError<ModelState>),

    #[error("executive: {0}")]
    Executive(#[from] ExecutiveError),

    #[error("task graph: {0}")]
    TaskGraph(#[from] TaskGraphError),

    #[error("chemistry: {0}")]
    Chem(#[from] ChemError),

    #[error("unknown mixture {0}")]
    UnknownMixture(MixtureId),
}
