// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `TaskGraph`: the shared store of every [`Task`], [`Vertex`], and
//! [`Synchronizer`], and the home of the validity service (spec.md §4.3).
//!
//! **Validity recomputation strategy.** `aggregate_valid` is the greatest
//! boolean fixpoint of a monotone system of equations — each task's
//! equation is a conjunction (`self_valid && all-predecessors &&
//! all-children && synchronizer-consistent`), and conjunctions of booleans
//! are monotone, so starting from the optimistic assignment
//! `aggregate_valid := self_valid` and iterating the equations down to a
//! fixpoint always converges to *the* correct greatest fixpoint — which is
//! exactly "the pure bottom-up recomputation from leaves" spec.md's
//! stable-fixpoint invariant (§4.3, §8) requires, regardless of how tangled
//! the cross-branch synchronizer wiring gets. This sidesteps the
//! documented correctness gap in the original task-removal algorithm
//! (design note 1, open questions) entirely: there is no separate
//! incremental-update code path to get subtly wrong, only one recompute
//! function every mutation calls. The worklist-with-visited-set shape
//! design note 1 asks for is realized here as the bounded relaxation loop
//! in [`TaskGraph::recompute`] rather than a hand-rolled graph walk.

use crate::error::TaskGraphError;
use crate::ids::{SynchronizerId, TaskId, VertexId};
use crate::synchronizer::Synchronizer;
use crate::task::Task;
use crate::vertex::{Vertex, VertexRole};
use std::collections::HashMap;

#[derive(Default)]
pub struct TaskGraph {
    tasks: HashMap<TaskId, Task>,
    vertices: HashMap<VertexId, Vertex>,
    synchronizers: HashMap<SynchronizerId, Synchronizer>,
    predecessors: HashMap<TaskId, Vec<TaskId>>,
    successors: HashMap<TaskId, Vec<TaskId>>,
    parent: HashMap<TaskId, Option<TaskId>>,
    children: HashMap<TaskId, Vec<TaskId>>,
    /// Deterministic iteration order for `recompute`, matching task
    /// creation order so unrelated test runs are reproducible.
    order: Vec<TaskId>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.order.iter().filter_map(|id| self.tasks.get(id))
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub fn predecessors_of(&self, id: TaskId) -> &[TaskId] {
        self.predecessors.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn successors_of(&self, id: TaskId) -> &[TaskId] {
        self.successors.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn children_of(&self, id: TaskId) -> &[TaskId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn parent_of(&self, id: TaskId) -> Option<TaskId> {
        self.parent.get(&id).copied().flatten()
    }

    /// Creates a new, initially disconnected task with a fresh pre/post
    /// vertex pair.
    pub fn add_task(&mut self, name: impl Into<String>) -> TaskId {
        let id = TaskId::new();
        let pre = Vertex::new(VertexRole::Pre, id);
        let post = Vertex::new(VertexRole::Post, id);
        let (pre_id, post_id) = (pre.id, post.id);
        self.vertices.insert(pre_id, pre);
        self.vertices.insert(post_id, post);
        self.tasks.insert(id, Task::new(name, pre_id, post_id));
        self.predecessors.insert(id, Vec::new());
        self.successors.insert(id, Vec::new());
        self.parent.insert(id, None);
        self.children.insert(id, Vec::new());
        self.order.push(id);
        self.recompute();
        id
    }

    /// Connects `pred`'s post-vertex forward to `succ`'s pre-vertex: an
    /// edge in the execution DAG (not hierarchy).
    pub fn connect(&mut self, pred: TaskId, succ: TaskId) -> Result<(), TaskGraphError> {
        self.require(pred)?;
        self.require(succ)?;
        if let Some(list) = self.successors.get_mut(&pred) {
            list.push(succ);
        }
        if let Some(list) = self.predecessors.get_mut(&succ) {
            list.push(pred);
        }
        self.recompute();
        Ok(())
    }

    pub fn disconnect(&mut self, pred: TaskId, succ: TaskId) -> Result<(), TaskGraphError> {
        self.require(pred)?;
        self.require(succ)?;
        if let Some(list) = self.successors.get_mut(&pred) {
            list.retain(|&t| t != succ);
        }
        if let Some(list) = self.predecessors.get_mut(&succ) {
            list.retain(|&t| t != pred);
        }
        self.recompute();
        Ok(())
    }

    /// Establishes hierarchical composition: `child`'s pre-vertex is
    /// reachable from `parent`'s pre-vertex through the child subgraph
    /// (spec.md §4.3). A task may have at most one parent.
    pub fn add_child(&mut self, parent: TaskId, child: TaskId) -> Result<(), TaskGraphError> {
        self.require(parent)?;
        self.require(child)?;
        if self.parent.get(&child).copied().flatten().is_some() {
            return Err(TaskGraphError::AlreadyHasParent(child));
        }
        if let Some(list) = self.children.get_mut(&parent) {
            list.push(child);
        }
        self.parent.insert(child, Some(parent));
        self.recompute();
        Ok(())
    }

    /// Groups vertices from (typically) different branches into a
    /// synchronizer that shares validity across its members.
    pub fn make_synchronizer(&mut self, members: Vec<VertexId>) -> Result<SynchronizerId, TaskGraphError> {
        for &v in &members {
            if !self.vertices.contains_key(&v) {
                return Err(TaskGraphError::UnknownVertex(v));
            }
        }
        let sync = Synchronizer::new(members.clone());
        let id = sync.id;
        for v in members {
            if let Some(vertex) = self.vertices.get_mut(&v) {
                vertex.synchronizer = Some(id);
            }
        }
        self.synchronizers.insert(id, sync);
        self.recompute();
        Ok(id)
    }

    /// Inserts `new_task` immediately before `existing`, splicing it into
    /// `existing`'s predecessor edges. Invalidates `existing` (new upstream
    /// work is by definition unvalidated) per spec.md §4.3.
    pub fn insert_before(&mut self, existing: TaskId, new_task: TaskId) -> Result<(), TaskGraphError> {
        self.require(existing)?;
        self.require(new_task)?;
        let preds = self.predecessors_of(existing).to_vec();
        for p in preds {
            self.disconnect(p, existing)?;
            self.connect(p, new_task)?;
        }
        self.connect(new_task, existing)?;
        self.set_self_valid(existing, false)?;
        Ok(())
    }

    /// Inserts `new_task` immediately after `existing`, splicing it into
    /// `existing`'s successor edges. Leaves `existing`'s validity intact.
    pub fn insert_after(&mut self, existing: TaskId, new_task: TaskId) -> Result<(), TaskGraphError> {
        self.require(existing)?;
        self.require(new_task)?;
        let succs = self.successors_of(existing).to_vec();
        for s in succs {
            self.disconnect(existing, s)?;
            self.connect(new_task, s)?;
        }
        self.connect(existing, new_task)?;
        Ok(())
    }

    /// Removes `id`, splicing its predecessors directly to its successors.
    /// Per spec.md §4.3, `id`'s downstream tasks become invalid (their
    /// upstream boundary moved) — this is implemented by clearing
    /// `self_valid` on `id`'s direct former successors, not merely their
    /// cached aggregate flag, since their prior completion no longer
    /// certifies against the new upstream set.
    pub fn remove_task(&mut self, id: TaskId) -> Result<(), TaskGraphError> {
        self.require(id)?;
        let preds = self.predecessors_of(id).to_vec();
        let succs = self.successors_of(id).to_vec();
        for p in &preds {
            self.disconnect(*p, id)?;
        }
        for s in &succs {
            self.disconnect(id, *s)?;
        }
        for p in &preds {
            for s in &succs {
                self.connect(*p, *s)?;
            }
        }
        for s in &succs {
            self.set_self_valid(*s, false)?;
        }
        if let Some(parent) = self.parent.get(&id).copied().flatten() {
            if let Some(kids) = self.children.get_mut(&parent) {
                kids.retain(|&k| k != id);
            }
        }
        for child in self.children.get(&id).cloned().unwrap_or_default() {
            self.parent.insert(child, None);
        }
        for vertex_id in [self.tasks[&id].pre_vertex, self.tasks[&id].post_vertex] {
            if let Some(v) = self.vertices.remove(&vertex_id) {
                if let Some(sync_id) = v.synchronizer {
                    if let Some(sync) = self.synchronizers.get_mut(&sync_id) {
                        sync.members.retain(|&m| m != vertex_id);
                    }
                }
            }
        }
        self.tasks.remove(&id);
        self.predecessors.remove(&id);
        self.successors.remove(&id);
        self.parent.remove(&id);
        self.children.remove(&id);
        self.order.retain(|&t| t != id);
        self.recompute();
        Ok(())
    }

    /// Sets `self_valid` on `id` and runs the validity recompute. This is
    /// the service's entry point for both directions of spec.md §4.3's
    /// rules: completing a task (`true`) and explicitly invalidating one
    /// (`false`).
    pub fn set_self_valid(&mut self, id: TaskId, valid: bool) -> Result<(), TaskGraphError> {
        self.require(id)?;
        if let Some(t) = self.tasks.get_mut(&id) {
            t.self_valid = valid;
        }
        self.recompute();
        Ok(())
    }

    fn require(&self, id: TaskId) -> Result<(), TaskGraphError> {
        if self.tasks.contains_key(&id) {
            Ok(())
        } else {
            Err(TaskGraphError::UnknownTask(id))
        }
    }

    /// Topological execution order (Kahn's algorithm over the
    /// predecessor/successor DAG). Ties broken by creation order.
    pub fn execution_order(&self) -> Vec<TaskId> {
        let mut indegree: HashMap<TaskId, usize> =
            self.order.iter().map(|&id| (id, self.predecessors_of(id).len())).collect();
        let mut ready: Vec<TaskId> = self.order.iter().copied().filter(|id| indegree[id] == 0).collect();
        let mut out = Vec::with_capacity(self.order.len());
        while !ready.is_empty() {
            ready.sort_by_key(|id| self.order.iter().position(|o| o == id).unwrap_or(usize::MAX));
            let next = ready.remove(0);
            out.push(next);
            for &succ in self.successors_of(next) {
                if let Some(d) = indegree.get_mut(&succ) {
                    *d -= 1;
                    if *d == 0 {
                        ready.push(succ);
                    }
                }
            }
        }
        out
    }

    /// Recomputes `aggregate_valid` (and the derived `upstream_valid`) for
    /// every task to the pure greatest fixpoint. See module docs for why
    /// this is always correct rather than merely "usually correct".
    fn recompute(&mut self) {
        for id in &self.order {
            if let Some(t) = self.tasks.get_mut(id) {
                t.aggregate_valid = t.self_valid;
            }
        }
        let max_iterations = self.order.len() + self.synchronizers.len() + 1;
        for _ in 0..max_iterations {
            let mut changed = false;
            for &id in &self.order {
                let preds_ok = self.predecessors_of(id).iter().all(|p| self.tasks[p].aggregate_valid);
                let children_ok = self.children_of(id).iter().all(|c| self.tasks[c].aggregate_valid);
                let sync_ok = self.sync_consistent(id);
                let Some(t) = self.tasks.get(&id) else { continue };
                let upstream_valid = preds_ok;
                let new_aggregate = t.self_valid && preds_ok && children_ok && sync_ok;
                if new_aggregate != t.aggregate_valid || upstream_valid != t.upstream_valid {
                    if let Some(t) = self.tasks.get_mut(&id) {
                        t.aggregate_valid = new_aggregate;
                        t.upstream_valid = upstream_valid;
                    }
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
    }

    fn sync_consistent(&self, id: TaskId) -> bool {
        let Some(task) = self.tasks.get(&id) else { return true };
        for vertex_id in [task.pre_vertex, task.post_vertex] {
            let Some(vertex) = self.vertices.get(&vertex_id) else { continue };
            let Some(sync_id) = vertex.synchronizer else { continue };
            let Some(sync) = self.synchronizers.get(&sync_id) else { continue };
            for &peer in &sync.members {
                if peer == vertex_id {
                    continue;
                }
                if let Some(peer_vertex) = self.vertices.get(&peer) {
                    if let Some(peer_task) = self.tasks.get(&peer_vertex.owner) {
                        if !peer_task.aggregate_valid {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
