// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The transition-matrix state machine itself: [`StateMachine::do_transition`]
//! implements the four-step protocol of spec.md §4.2 exactly.

use crate::error::TransitionError;
use crate::handler::{FailureReason, HandlerId, HandlerScope};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

type Prepare<S, D> = Box<dyn FnMut(S, S, &D) -> Option<FailureReason>>;
type Commit<S, D> = Box<dyn FnMut(S, S, &D)>;
type Rollback<S, D> = Box<dyn FnMut(S, S, &D, &[FailureReason])>;

struct Registration<F, S> {
    id: HandlerId,
    scope: HandlerScope<S>,
    priority: i64,
    seq: u64,
    handler: F,
}

/// A transition-matrix state machine over state enumeration `S`, threading
/// an opaque per-call payload `D` through every handler (spec.md §4.2's
/// `userData`).
///
/// `S` must be `Copy + Eq + Hash`: the matrix and handler scopes are keyed
/// on it directly rather than through indirection, matching how small the
/// state enumerations this drives actually are (five states for the model
/// lifecycle).
pub struct StateMachine<S, D = ()> {
    current: S,
    permitted: HashSet<(S, S)>,
    follow_on: HashMap<S, S>,
    prepares: Vec<Registration<Prepare<S, D>, S>>,
    commits: Vec<Registration<Commit<S, D>, S>>,
    rollbacks: Vec<Registration<Rollback<S, D>, S>>,
    next_id: u64,
    next_seq: u64,
}

impl<S, D> StateMachine<S, D>
where
    S: Copy + Eq + Hash + std::fmt::Debug,
{
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            permitted: HashSet::new(),
            follow_on: HashMap::new(),
            prepares: Vec::new(),
            commits: Vec::new(),
            rollbacks: Vec::new(),
            next_id: 0,
            next_seq: 0,
        }
    }

    pub fn current(&self) -> S {
        self.current
    }

    /// Marks `(from, to)` as a legal transition in the matrix.
    pub fn allow(&mut self, from: S, to: S) -> &mut Self {
        self.permitted.insert((from, to));
        self
    }

    pub fn is_permitted(&self, from: S, to: S) -> bool {
        self.permitted.contains(&(from, to))
    }

    /// Declares that entering `state` should immediately trigger a further
    /// transition to `next` (spec.md's "follow-on state").
    pub fn set_follow_on(&mut self, state: S, next: S) -> &mut Self {
        self.follow_on.insert(state, next);
        self
    }

    fn next_handler_id(&mut self) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub fn on_prepare(
        &mut self,
        scope: HandlerScope<S>,
        priority: i64,
        handler: impl FnMut(S, S, &D) -> Option<FailureReason> + 'static,
    ) -> HandlerId {
        let id = self.next_handler_id();
        let seq = self.next_seq();
        self.prepares.push(Registration { id, scope, priority, seq, handler: Box::new(handler) });
        id
    }

    pub fn on_commit(
        &mut self,
        scope: HandlerScope<S>,
        priority: i64,
        handler: impl FnMut(S, S, &D) + 'static,
    ) -> HandlerId {
        let id = self.next_handler_id();
        let seq = self.next_seq();
        self.commits.push(Registration { id, scope, priority, seq, handler: Box::new(handler) });
        id
    }

    pub fn on_rollback(
        &mut self,
        scope: HandlerScope<S>,
        priority: i64,
        handler: impl FnMut(S, S, &D, &[FailureReason]) + 'static,
    ) -> HandlerId {
        let id = self.next_handler_id();
        let seq = self.next_seq();
        self.rollbacks.push(Registration { id, scope, priority, seq, handler: Box::new(handler) });
        id
    }

    pub fn unregister_prepare(&mut self, id: HandlerId) {
        self.prepares.retain(|r| r.id != id);
    }

    pub fn unregister_commit(&mut self, id: HandlerId) {
        self.commits.retain(|r| r.id != id);
    }

    pub fn unregister_rollback(&mut self, id: HandlerId) {
        self.rollbacks.retain(|r| r.id != id);
    }

    /// Runs the four-step transition protocol of spec.md §4.2.
    pub fn do_transition(&mut self, target: S, user_data: &D) -> Result<(), TransitionError<S>>
    where
        S: std::fmt::Debug,
    {
        let from = self.current;
        if !self.is_permitted(from, target) {
            return Err(TransitionError::IllegalTransition { from, to: target });
        }

        let mut order: Vec<usize> = (0..self.prepares.len())
            .filter(|&i| self.prepares[i].scope.matches(&from, &target))
            .collect();
        order.sort_by_key(|&i| {
            let r = &self.prepares[i];
            (r.scope.rank(), r.priority, r.seq)
        });
        let mut reasons = Vec::new();
        for i in order {
            if let Some(reason) = (self.prepares[i].handler)(from, target, user_data) {
                reasons.push(reason);
            }
        }

        if reasons.is_empty() {
            let mut order: Vec<usize> = (0..self.commits.len())
                .filter(|&i| self.commits[i].scope.matches(&from, &target))
                .collect();
            order.sort_by_key(|&i| {
                let r = &self.commits[i];
                (r.scope.rank(), r.priority, r.seq)
            });
            for i in order {
                (self.commits[i].handler)(from, target, user_data);
            }
            self.current = target;
            tracing::info!(?from, to = ?target, "state transition committed");
            if let Some(&follow_on) = self.follow_on.get(&target) {
                return self.do_transition(follow_on, user_data);
            }
            Ok(())
        } else {
            let mut order: Vec<usize> = (0..self.rollbacks.len())
                .filter(|&i| self.rollbacks[i].scope.matches(&from, &target))
                .collect();
            order.sort_by_key(|&i| {
                let r = &self.rollbacks[i];
                (r.scope.rank(), r.priority, r.seq)
            });
            order.reverse();
            for i in order {
                (self.rollbacks[i].handler)(from, target, user_data, &reasons);
            }
            tracing::warn!(?from, to = ?target, reasons = reasons.len(), "state transition rolled back");
            Err(TransitionError::TransitionFailure { reasons })
        }
    }
}

#[cfg(test)]
#[path = "state_machine_tests.rs"]
mod tests;
