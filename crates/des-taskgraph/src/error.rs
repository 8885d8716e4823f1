// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task graph error taxonomy.

use crate::ids::{TaskId, VertexId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskGraphError {
    #[error("unknown task {0}")]
    UnknownTask(TaskId),

    #[error("unknown vertex {0}")]
    UnknownVertex(VertexId),

    #[error("task {0} already has a parent; composition requires removing it from its current parent first")]
    AlreadyHasParent(TaskId),
}
