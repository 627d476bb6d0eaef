use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::mailbox::{Mailbox, PhaseQuery};

/// State shared between a processor on the audio thread and its handle.
#[derive(Debug)]
pub(crate) struct Shared {
    /// Cleared by the host to retire the processor.
    pub(crate) active: AtomicBool,
    pub(crate) mailbox: Mailbox,
}

impl Shared {
    pub(crate) fn new() -> Self {
        Self {
            active: AtomicBool::new(true),
            mailbox: Mailbox::new(),
        }
    }
}

/// Host-side handle to a running processor.
///
/// Dropping the handle retires the processor: its next process call returns
/// `false` and the host is expected to stop calling it.
#[derive(Debug)]
pub struct NodeHandle {
    name: &'static str,
    shared: Arc<Shared>,
}

impl NodeHandle {
    pub(crate) fn new(name: &'static str, shared: Arc<Shared>) -> Self {
        Self { name, shared }
    }

    /// Name the processor was registered under.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the processor is still rendering.
    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::Acquire)
    }

    /// Retires the processor. Idempotent.
    ///
    /// Pending and later phase queries resolve to `None`.
    pub fn retire(&self) {
        if self.shared.active.swap(false, Ordering::AcqRel) {
            log::info!("retiring `{}` processor", self.name);
        }
        self.shared.mailbox.close();
    }

    /// Asks the processor for its playback phase.
    ///
    /// The answer reflects the block boundary after the request; an unclaimed
    /// answer from an earlier query is discarded.
    pub fn query_phase(&self) -> PhaseQuery {
        self.request_phase();
        PhaseQuery::new(Arc::clone(&self.shared))
    }

    /// Fire-and-forget form of [`NodeHandle::query_phase`].
    pub fn request_phase(&self) {
        let mailbox = &self.shared.mailbox;
        mailbox.take_reply();
        mailbox.request();
    }

    /// Collects the answer to the last request, if it has arrived.
    pub fn take_phase(&self) -> Option<f32> {
        self.shared.mailbox.take_reply().flatten()
    }
}

impl Drop for NodeHandle {
    fn drop(&mut self) {
        self.retire();
    }
}
