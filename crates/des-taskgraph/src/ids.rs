// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Newtype identifiers for graph entities, minted the way `des-core`'s
//! `oj_core`-derived `define_id!` mints every other entity id in the
//! workspace.

des_core::define_id! {
    /// Identifies a [`crate::Task`] (spec.md's Edge).
    pub struct TaskId("tsk-");
}

des_core::define_id! {
    /// Identifies a [`crate::Vertex`] (a task's pre- or post-vertex).
    pub struct VertexId("vtx-");
}

des_core::define_id! {
    /// Identifies a [`crate::Synchronizer`].
    pub struct SynchronizerId("syn-");
}
