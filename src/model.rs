// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Model: the single root every piece of a simulation hangs off (spec.md
//! §2, design note 3 — no global/singleton scheduler or emissions
//! service, everything explicit and owned).
//!
//! `Model` wires an [`Executive`], a model-lifecycle [`StateMachine`], a
//! [`TaskGraph`], a [`MaterialCatalog`], and a [`ReactionProcessor`]
//! together the way the teacher's `Executor` wires `RuntimeDeps` plus a
//! `Scheduler` behind one constructor. Mixtures are owned here rather
//! than by `des-chem` itself, since §5 of spec.md makes the owning
//! context (here, `Model`) responsible for serializing all access to them
//! through the executive pump.

use crate::error::ModelError;
use des_chem::{MaterialCatalog, Mixture, MixtureId, ReactionProcessor};
use des_executive::{Executive, RunState};
use des_statemachine::{ModelState, StateMachine};
use des_taskgraph::{TaskGraph, TaskId, TaskOutcome, TaskProcessor};
use indexmap::IndexMap;

/// The root simulation object. Owns every subsystem; there is exactly one
/// per simulation run.
pub struct Model {
    executive: Executive,
    lifecycle: StateMachine<ModelState, ()>,
    graph: TaskGraph,
    catalog: MaterialCatalog,
    reactions: ReactionProcessor,
    mixtures: IndexMap<MixtureId, Mixture>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        Self {
            executive: Executive::new(),
            lifecycle: ModelState::machine(),
            graph: TaskGraph::new(),
            catalog: MaterialCatalog::new(),
            reactions: ReactionProcessor::new(),
            mixtures: IndexMap::new(),
        }
    }

    pub fn executive(&self) -> &Executive {
        &self.executive
    }

    pub fn executive_mut(&mut self) -> &mut Executive {
        &mut self.executive
    }

    pub fn state(&self) -> ModelState {
        self.lifecycle.current()
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut TaskGraph {
        &mut self.graph
    }

    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut MaterialCatalog {
        &mut self.catalog
    }

    pub fn reactions(&self) -> &ReactionProcessor {
        &self.reactions
    }

    pub fn reactions_mut(&mut self) -> &mut ReactionProcessor {
        &mut self.reactions
    }

    pub fn mixture(&self, id: MixtureId) -> Option<&Mixture> {
        self.mixtures.get(&id)
    }

    /// Adopts `mixture` into the model, returning its id. Does not
    /// register it with the reaction processor — call
    /// [`Model::reactions_mut`]`().watch(...)` for mixtures that should
    /// react.
    pub fn add_mixture(&mut self, mixture: Mixture) -> MixtureId {
        let id = mixture.id();
        self.mixtures.insert(id, mixture);
        id
    }

    /// The sanctioned way to mutate a mixture owned by this model: runs
    /// `f` against it, then immediately runs the reaction processor to a
    /// fixpoint (spec.md §4.5's "on every Contents-kind change to a
    /// watched mixture..."). [`des_chem::ReactionProcessor`] has no event
    /// bus of its own to hook a mixture's own change notifications
    /// without aliasing `&mut Mixture` back into itself, so this method
    /// — not `Mixture::add_material` called directly by a caller holding
    /// some other handle to the mixture — is what stands in for that
    /// hook (design note 3 of spec.md: explicit owned context objects).
    pub fn mutate_mixture<R>(
        &mut self,
        id: MixtureId,
        f: impl FnOnce(&mut Mixture) -> R,
    ) -> Result<R, ModelError> {
        let mixture = self.mixtures.get_mut(&id).ok_or(ModelError::UnknownMixture(id))?;
        let result = f(mixture);
        self.reactions.react(mixture)?;
        Ok(result)
    }

    /// Walks the task graph in topological order, executing every task
    /// whose `aggregate_valid` is false via `execute` (spec.md §4.3's
    /// "Task execution", normally driven by the `StateMachine`
    /// transitioning to `Running`; here left to the caller to invoke from
    /// wherever in the simulation's event flow it belongs, since only the
    /// model author knows what "executing a task" means for their plant).
    pub fn process_tasks(
        &mut self,
        execute: impl FnMut(&TaskGraph, TaskId) -> TaskOutcome,
    ) -> Result<Vec<(TaskId, TaskOutcome)>, ModelError> {
        Ok(TaskProcessor::run(&mut self.graph, execute)?)
    }

    /// `Idle -> Validated` (spec.md §2's lifecycle).
    pub fn validate(&mut self) -> Result<(), ModelError> {
        self.lifecycle.do_transition(ModelState::Validated, &())?;
        Ok(())
    }

    /// `Validated -> Running`, then pumps the executive until it drains
    /// to `Finished` or a receiver pauses it.
    pub fn run(&mut self) -> Result<(), ModelError> {
        self.lifecycle.do_transition(ModelState::Running, &())?;
        self.executive.start()?;
        if self.executive.state() == RunState::Finished {
            self.lifecycle.do_transition(ModelState::Finished, &())?;
        }
        Ok(())
    }

    /// Pauses a running executive and mirrors that into the lifecycle.
    /// Normally called from within a receiver holding `&mut Executive`,
    /// not from outside `run()` — see [`des_executive::Executive::pause`].
    pub fn pause(&mut self) -> Result<(), ModelError> {
        self.executive.pause()?;
        self.lifecycle.do_transition(ModelState::Paused, &())?;
        Ok(())
    }

    /// `Paused -> Running`, resuming the pump until it drains or pauses
    /// again.
    pub fn resume(&mut self) -> Result<(), ModelError> {
        self.lifecycle.do_transition(ModelState::Running, &())?;
        self.executive.resume()?;
        if self.executive.state() == RunState::Finished {
            self.lifecycle.do_transition(ModelState::Finished, &())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
