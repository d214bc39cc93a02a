//! Latest-wins preview requests.
//!
//! Interactive callers submit a request on every parameter change. The slot keeps only the newest
//! one; a worker renders it and drops the result if a newer request arrived meanwhile.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use crate::assets::decode::SourceImage;
use crate::effects::params::EffectParams;
use crate::foundation::error::GlimmerResult;
use crate::pipeline::session::EffectSession;
use crate::render::surface::FrameRGBA;

/// Identifies one submitted request. Later submissions compare greater.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Submission sequence number, starting at 1.
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct SlotState<T> {
    pending: Option<(Ticket, T)>,
    latest: u64,
    closed: bool,
}

/// Single-slot request queue where a new submission replaces any request not yet taken.
#[derive(Debug)]
pub struct PreviewSlot<T> {
    state: Mutex<SlotState<T>>,
    ready: Condvar,
}

impl<T> Default for PreviewSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PreviewSlot<T> {
    /// Empty, open slot.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState {
                pending: None,
                latest: 0,
                closed: false,
            }),
            ready: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue `req`, superseding whatever is pending.
    ///
    /// Requests submitted after [`PreviewSlot::close`] are dropped without being queued.
    pub fn submit(&self, req: T) -> Ticket {
        let mut st = self.lock();
        st.latest += 1;
        let ticket = Ticket(st.latest);
        if st.closed {
            return ticket;
        }
        if let Some((stale, _)) = st.pending.replace((ticket, req)) {
            tracing::trace!(superseded = stale.0, by = ticket.0, "preview request replaced");
        }
        self.ready.notify_one();
        ticket
    }

    /// Take the pending request without waiting.
    pub fn take(&self) -> Option<(Ticket, T)> {
        self.lock().pending.take()
    }

    /// Wait for a request. Returns `None` once the slot is closed and drained.
    pub fn wait_take(&self) -> Option<(Ticket, T)> {
        let mut st = self.lock();
        loop {
            if let Some(req) = st.pending.take() {
                return Some(req);
            }
            if st.closed {
                return None;
            }
            st = self.ready.wait(st).unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Return `true` when no request was submitted after `ticket`.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.lock().latest == ticket.0
    }

    /// Stop accepting requests and wake any waiting worker.
    pub fn close(&self) {
        self.lock().closed = true;
        self.ready.notify_all();
    }

    /// Return `true` after [`PreviewSlot::close`].
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

/// One preview job.
#[derive(Clone, Debug)]
pub struct PreviewRequest {
    /// Untouched source bitmap.
    pub source: SourceImage,
    /// Parameters to render with.
    pub params: EffectParams,
}

/// Serve `slot` on the calling thread until it is closed.
///
/// Only the newest request is rendered. A result whose ticket was superseded while rendering is
/// discarded instead of being passed to `on_result`. Returns the number of results delivered.
pub fn run_preview_worker<F>(
    slot: &PreviewSlot<PreviewRequest>,
    session: &mut EffectSession,
    mut on_result: F,
) -> usize
where
    F: FnMut(Ticket, GlimmerResult<FrameRGBA>),
{
    let mut delivered = 0;
    while let Some((ticket, req)) = slot.wait_take() {
        let out = session.preview(&req.source, &req.params);
        if !slot.is_current(ticket) {
            tracing::debug!(ticket = ticket.0, "dropping stale preview");
            continue;
        }
        on_result(ticket, out);
        delivered += 1;
    }
    delivered
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/preview.rs"]
mod tests;
