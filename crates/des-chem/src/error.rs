// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chemistry-engine error taxonomy (spec.md §7).
//!
//! `UnknownMaterial` and `ReactionDefinitionError` are contract violations
//! (kind 1) — caller bugs surfaced immediately. `InsufficientMass` and
//! `UnconvergedReaction` are runtime numeric conditions (kind 3), as is
//! `Incalculable`, this crate's realization of spec.md's
//! `IncalculableTimeToSetpoint` for the boiling-point solver: "always
//! raised; never retried by the core" per spec.md §9's resolved open
//! question.

use crate::ids::MaterialId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChemError {
    #[error("unknown material {0}")]
    UnknownMaterial(MaterialId),

    #[error("cannot remove {requested} kg of material {material}: only {available} kg present")]
    InsufficientMass { material: MaterialId, requested: f64, available: f64 },

    #[error("reaction {name:?} is ill-defined: {reason}")]
    ReactionDefinitionError { name: String, reason: String },

    #[error("reaction fixpoint did not converge within {max_iterations} iterations")]
    UnconvergedReaction { max_iterations: usize },

    #[error("cannot estimate a setpoint: {0}")]
    Incalculable(String),

    #[error("failed to load material catalog: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read material catalog: {0}")]
    Io(#[from] std::io::Error),
}
