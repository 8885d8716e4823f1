// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! des-chem: the material/mixture data model, thermal mixing, vapor
//! pressure/boiling-point models, and the stoichiometric reaction
//! processor (spec.md §4.4, §4.5).

pub mod catalog;
pub mod error;
pub mod ids;
pub mod material;
pub mod mixture;
pub mod reaction;
pub mod substance;
pub mod vapor;

pub use catalog::{CsvOverride, MaterialCatalog};
pub use error::ChemError;
pub use ids::{MaterialId, MixtureId, ReactionId};
pub use material::{MaterialState, MaterialType, MaterialTypeSpec};
pub use mixture::{ChangeKind, Mixture};
pub use reaction::{Reaction, ReactionProcessor};
pub use substance::Substance;
