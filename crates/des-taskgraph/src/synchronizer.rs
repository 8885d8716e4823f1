// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! VertexSynchronizer: couples vertices from multiple branches so they
//! "fire" together and share validity (spec.md §3, §4.3).
//!
//! Per design note 1 of spec.md, the synchronizer holds plain ids of its
//! member vertices (not weak back-references — `des-taskgraph` has no use
//! for weak references per design note 6; explicit membership owned by the
//! graph is simpler and has no lifetime to get wrong).

use crate::ids::{SynchronizerId, VertexId};

#[derive(Clone, Debug)]
pub struct Synchronizer {
    pub id: SynchronizerId,
    pub members: Vec<VertexId>,
}

impl Synchronizer {
    pub(crate) fn new(members: Vec<VertexId>) -> Self {
        Self { id: SynchronizerId::new(), members }
    }
}
