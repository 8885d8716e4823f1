// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler registration: `Prepare`/`Commit`/`Rollback` callbacks, the scope
//! they run under, and the accumulated failure reasons a vetoed transition
//! carries back to the caller.

/// A reason a `Prepare` handler gave for vetoing a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailureReason {
    pub message: String,
    pub context: Option<String>,
}

impl FailureReason {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), context: None }
    }

    pub fn with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self { message: message.into(), context: Some(context.into()) }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.context {
            Some(ctx) => write!(f, "{} ({ctx})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Which transitions a registered handler applies to.
///
/// `Specific` handlers run before `FromAny`/`ToAny`, which run before
/// `Universal` — "handlers registered on (any, target) run after specific
/// (source, target) handlers; universal handlers run last within each
/// phase" (spec.md §4.2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandlerScope<S> {
    /// Bound to one exact `(source, target)` pair.
    Specific(S, S),
    /// Bound to every transition outbound from `source`, any target.
    FromAny(S),
    /// Bound to every transition inbound to `target`, any source.
    ToAny(S),
    /// Runs for every transition.
    Universal,
}

impl<S: PartialEq> HandlerScope<S> {
    pub(crate) fn matches(&self, from: &S, to: &S) -> bool {
        match self {
            HandlerScope::Specific(s, t) => s == from && t == to,
            HandlerScope::FromAny(s) => s == from,
            HandlerScope::ToAny(t) => t == to,
            HandlerScope::Universal => true,
        }
    }

    /// Ordinal used to order specific-before-outbound/inbound-before-universal
    /// within a phase, independent of registration priority.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            HandlerScope::Specific(..) => 0,
            HandlerScope::FromAny(_) | HandlerScope::ToAny(_) => 1,
            HandlerScope::Universal => 2,
        }
    }
}

/// Handle returned by handler-registration methods, used to deregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(pub(crate) u64);
