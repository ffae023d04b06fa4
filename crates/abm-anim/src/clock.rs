//! Millisecond clocks: real time for interactive runs, manual time for
//! headless batches and tests.

use std::time::Instant;

/// Source of monotonic milliseconds since some fixed origin.
pub trait Clock {
    fn now_ms(&self) -> u64;

    /// Let time reach `deadline_ms`: sleep for a real clock, jump for a
    /// manual one.  No-op if the deadline already passed.
    fn wait_until(&mut self, deadline_ms: u64);
}

/// Wall-clock time measured from construction.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn wait_until(&mut self, deadline_ms: u64) {
        let now = self.now_ms();
        if deadline_ms > now {
            std::thread::sleep(std::time::Duration::from_millis(deadline_ms - now));
        }
    }
}

/// A clock that only moves when told to.  Headless batch runs advance it
/// deadline-by-deadline, so a "simulated second" takes as long as the
/// steps themselves do.
#[derive(Default)]
pub struct ManualClock {
    now: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }

    pub fn set(&mut self, ms: u64) {
        debug_assert!(ms >= self.now, "manual clock never rewinds");
        self.now = ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn wait_until(&mut self, deadline_ms: u64) {
        if deadline_ms > self.now {
            self.now = deadline_ms;
        }
    }
}
