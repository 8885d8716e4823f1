// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coroutine-style detachable events.
//!
//! A detachable event's receiver is an `async` block: `.await`ing
//! [`DetachableController::suspend_for`]/`suspend_until`/`join` is the
//! event's only suspension point, and the executive is the only thing
//! that ever polls the resulting future — there is no OS thread, no
//! executor, and no `unsafe` pinning trick involved (every future here is
//! `Unpin`, since it holds no self-references).
//!
//! This is the "callback-chained continuation" option design note 2 of
//! spec.md names as an alternative to a stackful coroutine: `async`/
//! `.await` desugars to exactly that, and polling it by hand keeps the
//! whole executive single-threaded with respect to simulated time.

use crate::event::EventKey;
use crate::time::SimTime;
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Duration;

/// The future a detachable's receiver produces. Boxed because each
/// detachable's `async` block has a distinct, anonymous type.
pub type DetachableFuture = Pin<Box<dyn Future<Output = ()>>>;

/// Signalled to a suspended detachable when `Executive::stop()` aborts it.
/// The detachable's cleanup logic (if any) runs synchronously as the
/// `async` block unwinds past the `.await` that returned this error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aborted;

#[derive(Debug)]
pub(crate) enum WakeRequest {
    At(SimTime),
    Join(Vec<EventKey>),
}

#[derive(Debug)]
struct ControllerInner {
    wake_request: Option<WakeRequest>,
    aborted: bool,
    now: SimTime,
}

/// Handle a detachable receiver uses to suspend itself. Cloning is cheap
/// (an `Rc` bump) — the clone shares the same suspension request slot.
#[derive(Clone, Debug)]
pub struct DetachableController {
    inner: Rc<RefCell<ControllerInner>>,
}

impl DetachableController {
    pub(crate) fn new(now: SimTime) -> Self {
        Self { inner: Rc::new(RefCell::new(ControllerInner { wake_request: None, aborted: false, now })) }
    }

    /// The simulated time at the instant this controller was last handed
    /// to the detachable (i.e. when it started or most recently resumed).
    pub fn now(&self) -> SimTime {
        self.inner.borrow().now
    }

    pub(crate) fn set_now(&self, now: SimTime) {
        self.inner.borrow_mut().now = now;
    }

    /// Suspends the calling detachable until simulated time `when`.
    pub fn suspend_until(&self, when: SimTime) -> SuspendFuture {
        SuspendFuture { ctl: self.clone(), when, registered: false }
    }

    /// Suspends the calling detachable for `duration`, relative to `now()`.
    pub fn suspend_for(&self, duration: Duration) -> SuspendFuture {
        self.suspend_until(self.now() + duration)
    }

    /// Suspends the calling detachable until every event in `keys` has
    /// fired or been unrequested.
    pub fn join(&self, keys: impl IntoIterator<Item = EventKey>) -> JoinFuture {
        JoinFuture { ctl: self.clone(), keys: keys.into_iter().collect(), registered: false }
    }

    pub(crate) fn take_wake_request(&self) -> Option<WakeRequest> {
        self.inner.borrow_mut().wake_request.take()
    }

    pub(crate) fn mark_aborted(&self) {
        self.inner.borrow_mut().aborted = true;
    }

    fn is_aborted(&self) -> bool {
        self.inner.borrow().aborted
    }
}

/// Future returned by [`DetachableController::suspend_until`]/`suspend_for`.
pub struct SuspendFuture {
    ctl: DetachableController,
    when: SimTime,
    registered: bool,
}

impl Future for SuspendFuture {
    type Output = Result<(), Aborted>;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if this.ctl.is_aborted() {
            return Poll::Ready(Err(Aborted));
        }
        if this.registered {
            return Poll::Ready(Ok(()));
        }
        this.registered = true;
        this.ctl.inner.borrow_mut().wake_request = Some(WakeRequest::At(this.when));
        Poll::Pending
    }
}

/// Future returned by [`DetachableController::join`].
pub struct JoinFuture {
    ctl: DetachableController,
    keys: Vec<EventKey>,
    registered: bool,
}

impl Future for JoinFuture {
    type Output = Result<(), Aborted>;

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if this.ctl.is_aborted() {
            return Poll::Ready(Err(Aborted));
        }
        if this.registered {
            return Poll::Ready(Ok(()));
        }
        this.registered = true;
        let keys = std::mem::take(&mut this.keys);
        this.ctl.inner.borrow_mut().wake_request = Some(WakeRequest::Join(keys));
        Poll::Pending
    }
}

#[cfg(test)]
#[path = "detachable_tests.rs"]
mod tests;
