// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

des_core::define_id! {
    /// Identifies a [`crate::MaterialType`], stable across a
    /// [`crate::MaterialCatalog`]'s lifetime.
    pub struct MaterialId("mat-");
}

des_core::define_id! {
    /// Identifies a [`crate::Mixture`] for `ReactionProcessor::watch`.
    pub struct MixtureId("mix-");
}

des_core::define_id! {
    /// Identifies a [`crate::Reaction`].
    pub struct ReactionId("rxn-");
}
