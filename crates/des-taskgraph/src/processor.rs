// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TaskProcessor: walks the graph in topological order and executes tasks
//! whose `aggregate_valid` is false (spec.md §4.3's "Task execution").
//!
//! Started by the model's `StateMachine` transitioning to `Running`
//! (spec.md §2's control flow); here that wiring is left to the caller
//! (the `des-model` root package's `Model` facade) — `TaskProcessor::run`
//! is a plain function over a [`TaskGraph`] and a caller-supplied executor
//! closure, not itself bound to the executive or state machine.

use crate::error::TaskGraphError;
use crate::graph::TaskGraph;
use crate::ids::TaskId;

/// Result of attempting to execute one task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The task ran and completed successfully; `self_valid` is set.
    Completed,
    /// The task ran and failed; `self_valid` stays false.
    Failed(String),
    /// The task was already `aggregate_valid` and was not re-executed.
    SkippedValid,
}

pub struct TaskProcessor;

impl TaskProcessor {
    /// Walks `graph` in topological order, calling `execute` on every task
    /// whose `aggregate_valid` is currently false. A `Completed` outcome
    /// sets `self_valid := true`, which triggers the validity service's
    /// re-evaluation (spec.md §4.3) before the walk continues — a task
    /// later in topological order may become valid-to-skip as a result of
    /// an upstream completion earlier in the same walk.
    pub fn run(
        graph: &mut TaskGraph,
        mut execute: impl FnMut(&TaskGraph, TaskId) -> TaskOutcome,
    ) -> Result<Vec<(TaskId, TaskOutcome)>, TaskGraphError> {
        let mut results = Vec::new();
        for id in graph.execution_order() {
            let already_valid = graph.task(id).map(|t| t.aggregate_valid()).unwrap_or(false);
            if already_valid {
                results.push((id, TaskOutcome::SkippedValid));
                continue;
            }
            let outcome = execute(graph, id);
            match &outcome {
                TaskOutcome::Completed => {
                    graph.set_self_valid(id, true)?;
                    tracing::debug!(task = %id, "task completed");
                }
                TaskOutcome::Failed(reason) => {
                    tracing::warn!(task = %id, reason, "task failed");
                }
                TaskOutcome::SkippedValid => {}
            }
            results.push((id, outcome));
        }
        Ok(results)
    }
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
