//! `Driver` — the pending-callback queue.
//!
//! The host's frame and timer pacing primitives, modeled as one ordered
//! queue of (deadline, handle) pairs.  The owner drains due handles in
//! deadline order and dispatches each to whoever scheduled it.  A handle
//! fires at most once; cancellation is exact and idempotent.
//!
//! A `BTreeSet` keyed by `(deadline, handle)` gives O(log n) schedule,
//! pop, and cancel for the handful of callbacks ever outstanding (the
//! animator keeps at most three).

use std::collections::BTreeSet;

/// Duration of one display frame at 60 Hz, in whole milliseconds.
pub const FRAME_MS: u64 = 1000 / 60;

/// Identity of one scheduled callback.  Never reused within a `Driver`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Handle(u64);

/// Ordered queue of pending callback deadlines.
#[derive(Default)]
pub struct Driver {
    pending: BTreeSet<(u64, Handle)>,
    next_handle: u64,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a callback `delay_ms` after `now_ms`.
    pub fn set_timeout(&mut self, now_ms: u64, delay_ms: u64) -> Handle {
        let handle = Handle(self.next_handle);
        self.next_handle += 1;
        self.pending.insert((now_ms + delay_ms, handle));
        handle
    }

    /// Schedule a callback for the next display refresh.
    pub fn request_frame(&mut self, now_ms: u64) -> Handle {
        self.set_timeout(now_ms, FRAME_MS)
    }

    /// Drop a pending callback.  Returns `false` if it already fired or
    /// was already cancelled.
    pub fn cancel(&mut self, handle: Handle) -> bool {
        let entry = self.pending.iter().find(|(_, h)| *h == handle).copied();
        match entry {
            Some(entry) => self.pending.remove(&entry),
            None => false,
        }
    }

    /// Remove and return the earliest callback due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Handle> {
        let &(deadline, handle) = self.pending.iter().next()?;
        if deadline > now_ms {
            return None;
        }
        self.pending.remove(&(deadline, handle));
        Some(handle)
    }

    /// Deadline of the earliest pending callback.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.iter().next().map(|&(deadline, _)| deadline)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
