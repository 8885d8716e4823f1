// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The event pump: a priority-ordered heap plus the run-state lifecycle
//! (`Stopped -> Running -> {Paused, Finished}`) and detachable-event
//! bookkeeping described in spec.md §4.1.
//!
//! There is no global/singleton scheduler (design note 3 of spec.md): every
//! piece of mutable state the pump needs lives on `Executive` itself, and
//! callers own their `Executive` the way the teacher's `Model`/`Executor`
//! own their `RuntimeDeps`.
//!
//! `currentEventController()` from the abstract spec is realized here by
//! handing the [`crate::DetachableController`] directly to a detachable's
//! receiver closure instead of exposing it through an implicit
//! "current event" accessor — a closure argument is the idiomatic Rust
//! shape for "context available only while this callback runs", and avoids
//! a thread-local.

use crate::detachable::{DetachableController, DetachableFuture};
use crate::error::ExecutiveError;
use crate::event::{EventFilter, EventInfo, EventKey, EventKind, QueueKey};
use crate::time::{Priority, SimTime};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

/// Run-state of the [`Executive`]. See spec.md §3 "Executive state".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunState {
    Stopped,
    Running,
    Paused,
    Finished,
}

/// A caller-supplied callback, tagged by how the pump should run it.
pub enum Receiver {
    /// Runs to completion on the pumping thread.
    Synchronous(Box<dyn FnOnce(&mut Executive, SimTime)>),
    /// Spawns a cooperatively-scheduled context; the pump drives it via
    /// `DetachableController` until it returns, suspends, or joins.
    Detachable(Box<dyn FnOnce(DetachableController) -> DetachableFuture>),
    /// Dispatched to a separate worker; the pump does not wait for it.
    Asynchronous(Box<dyn FnOnce(SimTime) + Send + 'static>),
}

impl Receiver {
    fn kind(&self) -> EventKind {
        match self {
            Receiver::Synchronous(_) => EventKind::Synchronous,
            Receiver::Detachable(_) => EventKind::Detachable,
            Receiver::Asynchronous(_) => EventKind::Asynchronous,
        }
    }
}

enum Work {
    User(Receiver),
    /// Resumes the live detachable originally requested under this key
    /// (its wake time arrived, or its join set became satisfied).
    Resume(EventKey),
}

struct QueueEntry {
    key: QueueKey,
    event_key: EventKey,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}
impl Eq for QueueEntry {}
impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

struct PendingEvent {
    info: EventInfo,
    work: Work,
}

struct LiveDetachable {
    future: DetachableFuture,
    controller: DetachableController,
    priority: Priority,
    daemon: bool,
    tag: Option<String>,
}

/// Handle returned by the `on_*` lifecycle registration methods, used to
/// `unregister` an observer. Explicit deregistration rather than weak
/// references, per design note 6 of spec.md.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

macro_rules! observer_slot {
    ($register:ident, $fire:ident, $field:ident, $arg:ty, $doc:expr) => {
        #[doc = $doc]
        pub fn $register(&mut self, cb: impl FnMut($arg) + 'static) -> ObserverId {
            let id = self.next_observer();
            self.$field.push((id, Box::new(cb)));
            id
        }

        fn $fire(&mut self, arg: $arg)
        where
            $arg: Copy,
        {
            for (_, cb) in &mut self.$field {
                cb(arg);
            }
        }
    };
}

fn noop_waker() -> Waker {
    fn clone(_: *const ()) -> RawWaker {
        RawWaker::new(std::ptr::null(), &VTABLE)
    }
    fn noop(_: *const ()) {}
    static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
    unsafe { Waker::from_raw(RawWaker::new(std::ptr::null(), &VTABLE)) }
}

/// The executive: owns the event heap, the run-state, and every live
/// detachable context. See spec.md §4.1.
pub struct Executive {
    now: SimTime,
    state: RunState,
    heap: BinaryHeap<QueueEntry>,
    pending: HashMap<EventKey, PendingEvent>,
    next_sequence: u64,
    live_detachables: HashMap<EventKey, LiveDetachable>,
    /// target event key -> detachable keys currently joined on it
    join_waiters: HashMap<EventKey, Vec<EventKey>>,
    /// joining detachable key -> targets not yet fired/unrequested
    join_remaining: HashMap<EventKey, HashSet<EventKey>>,
    next_observer_id: u64,
    started: Vec<(ObserverId, Box<dyn FnMut(SimTime)>)>,
    started_once: Vec<Box<dyn FnOnce(SimTime)>>,
    paused: Vec<(ObserverId, Box<dyn FnMut(SimTime)>)>,
    resumed: Vec<(ObserverId, Box<dyn FnMut(SimTime)>)>,
    stopped: Vec<(ObserverId, Box<dyn FnMut(SimTime)>)>,
    finished: Vec<(ObserverId, Box<dyn FnMut(SimTime)>)>,
    aborted: Vec<(ObserverId, Box<dyn FnMut(&EventInfo)>)>,
    clock_about_to_change: Vec<(ObserverId, Box<dyn FnMut(SimTime)>)>,
}

impl Default for Executive {
    fn default() -> Self {
        Self::new()
    }
}

impl Executive {
    pub fn new() -> Self {
        Self {
            now: SimTime::ZERO,
            state: RunState::Stopped,
            heap: BinaryHeap::new(),
            pending: HashMap::new(),
            next_sequence: 0,
            live_detachables: HashMap::new(),
            join_waiters: HashMap::new(),
            join_remaining: HashMap::new(),
            next_observer_id: 0,
            started: Vec::new(),
            started_once: Vec::new(),
            paused: Vec::new(),
            resumed: Vec::new(),
            stopped: Vec::new(),
            finished: Vec::new(),
            aborted: Vec::new(),
            clock_about_to_change: Vec::new(),
        }
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    fn next_observer(&mut self) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        id
    }

    observer_slot!(on_started, fire_started, started, SimTime, "Fires on every `start()` call.");
    observer_slot!(on_paused, fire_paused, paused, SimTime, "Fires on every `pause()` call.");
    observer_slot!(on_resumed, fire_resumed, resumed, SimTime, "Fires on every `resume()` call.");
    observer_slot!(on_stopped, fire_stopped, stopped, SimTime, "Fires on every `stop()` call.");
    observer_slot!(on_finished, fire_finished, finished, SimTime, "Fires when the pump drains to completion.");
    observer_slot!(
        on_clock_about_to_change,
        fire_clock_about_to_change,
        clock_about_to_change,
        SimTime,
        "Fires immediately before `now` advances to a later timestamp."
    );

    /// Fires exactly once across the lifetime of this `Executive`, on the
    /// first `start()` call, then unregisters itself.
    pub fn on_started_once(&mut self, cb: impl FnOnce(SimTime) + 'static) {
        self.started_once.push(Box::new(cb));
    }

    /// Fires when an event callback is aborted by an unexpected panic.
    pub fn on_aborted(&mut self, cb: impl FnMut(&EventInfo) + 'static) -> ObserverId {
        let id = self.next_observer();
        self.aborted.push((id, Box::new(cb)));
        id
    }

    /// Removes a previously registered observer from every lifecycle slot.
    pub fn unregister(&mut self, id: ObserverId) {
        self.started.retain(|(i, _)| *i != id);
        self.paused.retain(|(i, _)| *i != id);
        self.resumed.retain(|(i, _)| *i != id);
        self.stopped.retain(|(i, _)| *i != id);
        self.finished.retain(|(i, _)| *i != id);
        self.aborted.retain(|(i, _)| *i != id);
        self.clock_about_to_change.retain(|(i, _)| *i != id);
    }

    fn fire_aborted(&mut self, info: &EventInfo) {
        for (_, cb) in &mut self.aborted {
            cb(info);
        }
    }

    // ---- scheduling -----------------------------------------------------

    pub fn request_event(
        &mut self,
        receiver: Receiver,
        when: SimTime,
        priority: Priority,
    ) -> Result<EventKey, ExecutiveError> {
        self.request_event_tagged(receiver, when, priority, None)
    }

    pub fn request_event_tagged(
        &mut self,
        receiver: Receiver,
        when: SimTime,
        priority: Priority,
        tag: Option<String>,
    ) -> Result<EventKey, ExecutiveError> {
        if when < self.now {
            return Err(ExecutiveError::CausalityViolation { requested: when, now: self.now });
        }
        let kind = receiver.kind();
        Ok(self.insert(Work::User(receiver), when, priority, false, tag, kind))
    }

    pub fn request_daemon_event(
        &mut self,
        receiver: Receiver,
        when: SimTime,
        priority: Priority,
    ) -> Result<EventKey, ExecutiveError> {
        if when < self.now {
            return Err(ExecutiveError::CausalityViolation { requested: when, now: self.now });
        }
        let kind = receiver.kind();
        Ok(self.insert(Work::User(receiver), when, priority, true, None, kind))
    }

    fn insert(
        &mut self,
        work: Work,
        when: SimTime,
        priority: Priority,
        daemon: bool,
        tag: Option<String>,
        kind: EventKind,
    ) -> EventKey {
        let key = EventKey::new();
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let info = EventInfo { key, when, priority, sequence, kind, daemon, tag };
        self.heap.push(QueueEntry { key: QueueKey { when, priority, sequence }, event_key: key });
        self.pending.insert(key, PendingEvent { info, work });
        key
    }

    /// Removes a still-queued event. Idempotent no-op if already fired or
    /// previously unrequested.
    pub fn unrequest_event(&mut self, key: EventKey) -> bool {
        if self.pending.remove(&key).is_some() {
            self.resolve_key_fired(key);
            true
        } else {
            false
        }
    }

    /// Removes every still-queued event matching `filter`. Returns the
    /// number removed.
    pub fn unrequest_events(&mut self, filter: &EventFilter) -> usize {
        let matches: Vec<EventKey> =
            self.pending.values().filter(|p| filter.matches(&p.info)).map(|p| p.info.key).collect();
        for key in &matches {
            self.pending.remove(key);
            self.resolve_key_fired(*key);
        }
        matches.len()
    }

    // ---- lifecycle --------------------------------------------------------

    pub fn start(&mut self) -> Result<(), ExecutiveError> {
        self.require_state(&[RunState::Stopped])?;
        self.state = RunState::Running;
        tracing::info!(now = %self.now, "executive started");
        self.fire_started(self.now);
        for cb in std::mem::take(&mut self.started_once) {
            cb(self.now);
        }
        self.pump()
    }

    pub fn pause(&mut self) -> Result<(), ExecutiveError> {
        self.require_state(&[RunState::Running])?;
        self.state = RunState::Paused;
        tracing::info!(now = %self.now, "executive paused");
        self.fire_paused(self.now);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), ExecutiveError> {
        self.require_state(&[RunState::Paused])?;
        self.state = RunState::Running;
        tracing::info!(now = %self.now, "executive resumed");
        self.fire_resumed(self.now);
        self.pump()
    }

    pub fn stop(&mut self) -> Result<(), ExecutiveError> {
        self.require_state(&[RunState::Running, RunState::Paused])?;
        self.abort_live_detachables();
        self.heap.clear();
        self.pending.clear();
        self.join_waiters.clear();
        self.join_remaining.clear();
        self.state = RunState::Stopped;
        tracing::info!(now = %self.now, "executive stopped");
        self.fire_stopped(self.now);
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), ExecutiveError> {
        self.require_state(&[RunState::Stopped, RunState::Finished])?;
        self.now = SimTime::ZERO;
        self.heap.clear();
        self.pending.clear();
        self.live_detachables.clear();
        self.join_waiters.clear();
        self.join_remaining.clear();
        self.state = RunState::Stopped;
        Ok(())
    }

    fn require_state(&self, expected: &'static [RunState]) -> Result<(), ExecutiveError> {
        if expected.contains(&self.state) {
            Ok(())
        } else {
            Err(ExecutiveError::InvalidRunState { expected, actual: self.state })
        }
    }

    fn abort_live_detachables(&mut self) {
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        for (_, mut live) in self.live_detachables.drain() {
            live.controller.mark_aborted();
            // Drive the context forward once so its cleanup (if any) runs
            // past the `.await` that now resolves to `Err(Aborted)`.
            let _ = live.future.as_mut().poll(&mut cx);
        }
    }

    // ---- the pump -----------------------------------------------------

    fn should_finish(&self) -> bool {
        self.live_detachables.is_empty() && self.pending.values().all(|p| p.info.daemon)
    }

    fn pump(&mut self) -> Result<(), ExecutiveError> {
        while self.state == RunState::Running {
            if self.should_finish() {
                self.state = RunState::Finished;
                tracing::info!(now = %self.now, "executive finished");
                self.fire_finished(self.now);
                return Ok(());
            }
            let Some(entry) = self.pop_next() else {
                // Lazily-deleted entries exhausted without a live candidate;
                // should_finish() above would already have caught this, but
                // guard against drift.
                self.state = RunState::Finished;
                self.fire_finished(self.now);
                return Ok(());
            };
            if entry.info.when > self.now {
                self.fire_clock_about_to_change(entry.info.when);
                self.now = entry.info.when;
            }
            self.dispatch(entry);
        }
        Ok(())
    }

    /// Pops the heap until it finds an entry still present in `pending`
    /// (earlier pops may have been unrequested and are lazily discarded).
    fn pop_next(&mut self) -> Option<PendingEvent> {
        while let Some(top) = self.heap.pop() {
            if let Some(pending) = self.pending.remove(&top.event_key) {
                return Some(pending);
            }
        }
        None
    }

    fn dispatch(&mut self, pending: PendingEvent) {
        let PendingEvent { info, work } = pending;
        tracing::debug!(
            seq = info.sequence,
            when = %info.when,
            priority = info.priority.as_f64(),
            kind = %info.kind,
            "dispatch"
        );
        match work {
            Work::User(receiver) => self.dispatch_user(info, receiver),
            Work::Resume(original_key) => {
                if let Some(live) = self.live_detachables.remove(&original_key) {
                    live.controller.set_now(self.now);
                    self.poll_detachable(original_key, live.future, live.controller, live.priority, live.daemon, live.tag);
                }
            }
        }
    }

    fn dispatch_user(&mut self, info: EventInfo, receiver: Receiver) {
        match receiver {
            Receiver::Synchronous(f) => {
                let now = self.now;
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(self, now)));
                match result {
                    Ok(()) => self.resolve_key_fired(info.key),
                    Err(_) => self.abort(info),
                }
            }
            Receiver::Detachable(spawn) => {
                let controller = DetachableController::new(self.now);
                let result =
                    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| spawn(controller.clone())));
                match result {
                    Ok(future) => {
                        self.poll_detachable(info.key, future, controller, info.priority, info.daemon, info.tag)
                    }
                    Err(_) => self.abort(info),
                }
            }
            Receiver::Asynchronous(f) => {
                let now = self.now;
                let _ = std::thread::spawn(move || f(now));
                self.resolve_key_fired(info.key);
            }
        }
    }

    fn poll_detachable(
        &mut self,
        key: EventKey,
        mut future: DetachableFuture,
        controller: DetachableController,
        priority: Priority,
        daemon: bool,
        tag: Option<String>,
    ) {
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| future.as_mut().poll(&mut cx)));
        match result {
            Ok(Poll::Ready(())) => self.resolve_key_fired(key),
            Ok(Poll::Pending) => match controller.take_wake_request() {
                Some(crate::detachable::WakeRequest::At(when)) => {
                    self.live_detachables.insert(
                        key,
                        LiveDetachable { future, controller, priority, daemon, tag: tag.clone() },
                    );
                    self.schedule_resume(key, when, priority, daemon, tag);
                }
                Some(crate::detachable::WakeRequest::Join(keys)) => {
                    self.live_detachables.insert(
                        key,
                        LiveDetachable { future, controller, priority, daemon, tag: tag.clone() },
                    );
                    self.register_join(key, keys, priority, daemon, tag);
                }
                None => {
                    // Suspended without registering a wake request: nothing
                    // will ever resume it. Keep it live (so `stop()` can
                    // still abort/clean it up) but it is otherwise inert.
                    self.live_detachables
                        .insert(key, LiveDetachable { future, controller, priority, daemon, tag });
                }
            },
            Err(_) => {
                let info = EventInfo { key, when: self.now, priority, sequence: 0, kind: EventKind::Detachable, daemon, tag };
                self.abort(info);
            }
        }
    }

    fn schedule_resume(&mut self, original_key: EventKey, when: SimTime, priority: Priority, daemon: bool, tag: Option<String>) {
        self.insert(Work::Resume(original_key), when, priority, daemon, tag, EventKind::Detachable);
    }

    fn register_join(
        &mut self,
        joiner: EventKey,
        targets: Vec<EventKey>,
        priority: Priority,
        daemon: bool,
        tag: Option<String>,
    ) {
        let mut remaining = HashSet::new();
        for target in targets {
            if self.is_outstanding(target) {
                remaining.insert(target);
                self.join_waiters.entry(target).or_default().push(joiner);
            }
        }
        if remaining.is_empty() {
            self.schedule_resume(joiner, self.now, priority, daemon, tag);
        } else {
            self.join_remaining.insert(joiner, remaining);
        }
    }

    fn is_outstanding(&self, key: EventKey) -> bool {
        self.pending.contains_key(&key) || self.live_detachables.contains_key(&key)
    }

    /// Notifies any joiners that `key`'s event has fired or been cancelled.
    fn resolve_key_fired(&mut self, key: EventKey) {
        let Some(joiners) = self.join_waiters.remove(&key) else { return };
        for joiner in joiners {
            let done = if let Some(remaining) = self.join_remaining.get_mut(&joiner) {
                remaining.remove(&key);
                remaining.is_empty()
            } else {
                false
            };
            if done {
                self.join_remaining.remove(&joiner);
                if let Some(live) = self.live_detachables.get(&joiner) {
                    let (priority, daemon, tag) = (live.priority, live.daemon, live.tag.clone());
                    self.schedule_resume(joiner, self.now, priority, daemon, tag);
                }
            }
        }
    }

    fn abort(&mut self, info: EventInfo) {
        tracing::error!(seq = info.sequence, kind = %info.kind, "executive aborted: event callback panicked");
        self.abort_live_detachables();
        self.heap.clear();
        self.pending.clear();
        self.join_waiters.clear();
        self.join_remaining.clear();
        self.state = RunState::Stopped;
        self.fire_aborted(&info);
    }
}

#[cfg(test)]
#[path = "executive_tests.rs"]
mod tests;
