//! Single-slot mailbox between the audio thread and a query thread.
//!
//! Holds at most one pending request and one reply. A newer reply overwrites
//! an unclaimed older one. Only atomics are touched on the audio side.

use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::task::AtomicWaker;

use crate::node::Shared;

/// Reply slot is empty.
const EMPTY: u8 = 0;
/// Reply slot holds a phase.
const PHASE: u8 = 1;
/// The processor declined the request.
const DECLINED: u8 = 2;

pub(crate) struct Mailbox {
    requested: AtomicBool,
    state: AtomicU8,
    reply: AtomicU32,
    closed: AtomicBool,
    waker: AtomicWaker,
}

impl Mailbox {
    pub(crate) fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
            state: AtomicU8::new(EMPTY),
            reply: AtomicU32::new(0),
            closed: AtomicBool::new(false),
            waker: AtomicWaker::new(),
        }
    }

    /// Query side: leave a request for the next block.
    pub(crate) fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Audio side: claim the pending request, if any.
    pub(crate) fn take_request(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }

    /// Audio side: publish an answer. `None` declines the request.
    pub(crate) fn post(&self, phase: Option<f32>) {
        match phase {
            Some(phase) => {
                self.reply.store(phase.to_bits(), Ordering::Relaxed);
                self.state.store(PHASE, Ordering::Release);
            }
            None => self.state.store(DECLINED, Ordering::Release),
        }
        self.waker.wake();
    }

    /// Query side: claim the latest answer.
    ///
    /// The outer `Option` is whether an answer arrived, the inner one whether
    /// the processor could give a phase.
    pub(crate) fn take_reply(&self) -> Option<Option<f32>> {
        match self.state.swap(EMPTY, Ordering::AcqRel) {
            PHASE => Some(Some(f32::from_bits(self.reply.load(Ordering::Relaxed)))),
            DECLINED => Some(None),
            _ => None,
        }
    }

    /// No further answers will be posted.
    pub(crate) fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            self.waker.wake();
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Debug for Mailbox {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mailbox")
            .field("requested", &self.requested)
            .field("state", &self.state)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

/// Future returned by [`NodeHandle::query_phase`](crate::NodeHandle::query_phase).
///
/// Resolves to the processor's playback phase once the audio thread has
/// rendered the next block, or to `None` if the processor does not track a
/// phase or was retired first.
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct PhaseQuery {
    shared: Arc<Shared>,
}

impl PhaseQuery {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    fn ready(&self) -> Option<Option<f32>> {
        let mailbox = &self.shared.mailbox;
        match mailbox.take_reply() {
            Some(reply) => Some(reply),
            None if mailbox.is_closed() => Some(None),
            None => None,
        }
    }
}

impl Future for PhaseQuery {
    type Output = Option<f32>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Some(reply) = self.ready() {
            return Poll::Ready(reply);
        }

        self.shared.mailbox.waker.register(cx.waker());

        // An answer may have landed between the first check and registering.
        match self.ready() {
            Some(reply) => Poll::Ready(reply),
            None => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_reply_wins() {
        let mailbox = Mailbox::new();
        assert_eq!(mailbox.take_reply(), None);

        mailbox.post(Some(0.25));
        mailbox.post(Some(0.5));
        assert_eq!(mailbox.take_reply(), Some(Some(0.5)));
        assert_eq!(mailbox.take_reply(), None);

        mailbox.post(None);
        assert_eq!(mailbox.take_reply(), Some(None));
    }

    #[test]
    fn requests_are_claimed_once() {
        let mailbox = Mailbox::new();
        assert!(!mailbox.take_request());
        mailbox.request();
        mailbox.request();
        assert!(mailbox.take_request());
        assert!(!mailbox.take_request());
    }
}
