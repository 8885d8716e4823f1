// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event identity and the queue ordering key.

use crate::time::{Priority, SimTime};
use std::cmp::Ordering;

des_core::define_id! {
    /// Identifies a single requested event. Returned by `request_event`
    /// and used by `unrequest_event`/`join`.
    pub struct EventKey("evt-");
}

/// How an event's receiver is executed by the pump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Runs to completion on the pumping thread before the pump continues.
    Synchronous,
    /// Runs as a cooperatively-scheduled context that may suspend or join.
    Detachable,
    /// Runs on a separate worker; the pump does not wait for it.
    Asynchronous,
}

des_core::simple_display! {
    EventKind {
        Synchronous => "synchronous",
        Detachable => "detachable",
        Asynchronous => "asynchronous",
    }
}

/// A snapshot of an event's scheduling metadata, without its receiver.
///
/// Returned by introspection APIs and passed to `unrequest_events`
/// predicates — the receiver closure itself is never inspectable.
#[derive(Clone, Debug)]
pub struct EventInfo {
    pub key: EventKey,
    pub when: SimTime,
    pub priority: Priority,
    pub sequence: u64,
    pub kind: EventKind,
    pub daemon: bool,
    /// Caller-supplied identifier used for bulk cancellation (the
    /// "target object" or "callback identity" predicates spec.md
    /// describes in the abstract); see [`crate::EventFilter`].
    pub tag: Option<String>,
}

/// Ordering key used by the event heap: ascending `when`, descending
/// `priority`, ascending `sequence`. `Ord` is defined so that the
/// *most urgent* key compares greatest, since `BinaryHeap` is a max-heap
/// and the pump always wants to pop the most urgent event next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct QueueKey {
    pub when: SimTime,
    pub priority: Priority,
    pub sequence: u64,
}

impl Ord for QueueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .when
            .cmp(&self.when)
            .then_with(|| self.priority.cmp(&other.priority))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A predicate builder for `unrequest_events`, combining simple selectors
/// with `&&`-style conjunction via [`EventFilter::and`].
pub struct EventFilter {
    predicate: Box<dyn Fn(&EventInfo) -> bool>,
}

impl EventFilter {
    pub fn new(predicate: impl Fn(&EventInfo) -> bool + 'static) -> Self {
        Self { predicate: Box::new(predicate) }
    }

    /// Matches a single event by key.
    pub fn by_key(key: EventKey) -> Self {
        Self::new(move |info| info.key == key)
    }

    /// Matches all events of a given kind.
    pub fn by_kind(kind: EventKind) -> Self {
        Self::new(move |info| info.kind == kind)
    }

    /// Matches all events carrying the given tag.
    pub fn by_tag(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self::new(move |info| info.tag.as_deref() == Some(tag.as_str()))
    }

    /// Matches all events scheduled strictly before `when`.
    pub fn before(when: SimTime) -> Self {
        Self::new(move |info| info.when < when)
    }

    /// Combines two filters with logical AND.
    pub fn and(self, other: EventFilter) -> Self {
        Self::new(move |info| (self.predicate)(info) && (other.predicate)(info))
    }

    pub(crate) fn matches(&self, info: &EventInfo) -> bool {
        (self.predicate)(info)
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
