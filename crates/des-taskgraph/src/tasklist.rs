// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TaskList: the ordered, convenience view over a chain of tasks living in
//! a shared [`TaskGraph`] (spec.md §4.3).
//!
//! A `TaskList` does not own a graph — it is a thin, ordered index into
//! one, the way several independent branches of a larger simulation share
//! one `TaskGraph` and are cross-linked by [`crate::Synchronizer`]s. Every
//! mutating method takes `&mut TaskGraph` explicitly rather than holding a
//! borrow, so that building a multi-branch model (several `TaskList`s over
//! one graph, wired together afterwards) is ordinary, borrow-checker-clean
//! Rust.

use crate::error::TaskGraphError;
use crate::graph::TaskGraph;
use crate::ids::TaskId;

#[derive(Default)]
pub struct TaskList {
    members: Vec<TaskId>,
}

impl TaskList {
    pub fn new() -> Self {
        Self { members: Vec::new() }
    }

    pub fn tasks(&self) -> &[TaskId] {
        &self.members
    }

    /// Appends a new task to the end of the list, chained after the
    /// current last member (if any).
    pub fn append_task(&mut self, graph: &mut TaskGraph, name: impl Into<String>) -> Result<TaskId, TaskGraphError> {
        let id = graph.add_task(name);
        if let Some(&last) = self.members.last() {
            graph.connect(last, id)?;
        }
        self.members.push(id);
        Ok(id)
    }

    /// Inserts a new task immediately before `existing`.
    pub fn add_task_before(
        &mut self,
        graph: &mut TaskGraph,
        existing: TaskId,
        name: impl Into<String>,
    ) -> Result<TaskId, TaskGraphError> {
        let pos = self.position(existing)?;
        let new_id = graph.add_task(name);
        graph.insert_before(existing, new_id)?;
        self.members.insert(pos, new_id);
        Ok(new_id)
    }

    /// Inserts a new task immediately after `existing`.
    pub fn add_task_after(
        &mut self,
        graph: &mut TaskGraph,
        existing: TaskId,
        name: impl Into<String>,
    ) -> Result<TaskId, TaskGraphError> {
        let pos = self.position(existing)?;
        let new_id = graph.add_task(name);
        graph.insert_after(existing, new_id)?;
        self.members.insert(pos + 1, new_id);
        Ok(new_id)
    }

    /// Removes `existing` from both the list and the graph.
    pub fn remove_task(&mut self, graph: &mut TaskGraph, existing: TaskId) -> Result<(), TaskGraphError> {
        let pos = self.position(existing)?;
        graph.remove_task(existing)?;
        self.members.remove(pos);
        Ok(())
    }

    fn position(&self, id: TaskId) -> Result<usize, TaskGraphError> {
        self.members.iter().position(|&t| t == id).ok_or(TaskGraphError::UnknownTask(id))
    }
}

#[cfg(test)]
#[path = "tasklist_tests.rs"]
mod tests;
