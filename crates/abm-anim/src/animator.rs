//! `Animator` — the run-state machine and pacing logic.
//!
//! Two pacing strategies, chosen by `multi_step`:
//!
//! - **single-step** (interactive): one frame callback per display
//!   refresh; each firing performs one step and one draw, but only while
//!   the measured draw throughput is below the target rate.
//! - **multi-step** (headless/batch): steps run on their own fast timer,
//!   bounded so the cumulative tick count tracks `rate * elapsed`; draws
//!   (when not headless) are paced separately on frames.
//!
//! A step or draw error is terminal: the animator cancels everything and
//! parks in [`RunState::Faulted`] until `reset`.

use abm_core::AbmResult;

use crate::driver::{Driver, Handle};

/// Interval of the multi-step tick timer.
const STEP_TIMER_MS: u64 = 10;

/// What the animator drives: one simulation step, one draw pass.
pub trait Animated {
    fn step(&mut self) -> AbmResult<()>;
    fn draw(&mut self) -> AbmResult<()>;
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    Stopped,
    Running,
    /// A step or draw returned an error.  Terminal until `reset`.
    Faulted,
}

pub struct Animator {
    state: RunState,
    /// Target steps (and draws) per second.
    rate: f64,
    multi_step: bool,
    headless: bool,

    ticks: u64,
    draws: u64,

    // Measurement baseline: set on start and on rate change.
    baseline_ms: u64,
    baseline_ticks: u64,
    baseline_draws: u64,

    // The three possible outstanding callbacks.
    frame: Option<Handle>,
    step_timer: Option<Handle>,
    draw_frame: Option<Handle>,
}

impl Animator {
    pub fn new(rate: f64, multi_step: bool, headless: bool) -> Self {
        Self {
            state: RunState::Stopped,
            rate,
            multi_step,
            headless,
            ticks: 0,
            draws: 0,
            baseline_ms: 0,
            baseline_ticks: 0,
            baseline_draws: 0,
            frame: None,
            step_timer: None,
            draw_frame: None,
        }
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn is_multi_step(&self) -> bool {
        self.multi_step
    }

    /// Steps performed since construction or the last `reset`.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Draws performed since construction or the last `reset`.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Measured step throughput since the last baseline.  Zero until any
    /// time has elapsed.
    pub fn ticks_per_sec(&self, now_ms: u64) -> f64 {
        Self::per_sec(self.ticks - self.baseline_ticks, now_ms - self.baseline_ms)
    }

    /// Measured draw throughput since the last baseline.
    pub fn draws_per_sec(&self, now_ms: u64) -> f64 {
        Self::per_sec(self.draws - self.baseline_draws, now_ms - self.baseline_ms)
    }

    fn per_sec(count: u64, elapsed_ms: u64) -> f64 {
        if elapsed_ms == 0 {
            0.0
        } else {
            count as f64 * 1000.0 / elapsed_ms as f64
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Stopped → Running.  Resets the measurement baseline (not the
    /// counters) and schedules the first callback of the active pacing
    /// strategy.  No-op when already running or faulted.
    pub fn start(&mut self, now_ms: u64, driver: &mut Driver) {
        if self.state != RunState::Stopped {
            return;
        }
        self.state = RunState::Running;
        self.rebase(now_ms);
        self.schedule(now_ms, driver);
    }

    /// Running → Stopped.  Cancels every outstanding callback.  Idempotent.
    pub fn stop(&mut self, driver: &mut Driver) {
        self.cancel_all(driver);
        if self.state == RunState::Running {
            self.state = RunState::Stopped;
        }
    }

    pub fn toggle(&mut self, now_ms: u64, driver: &mut Driver) {
        match self.state {
            RunState::Running => self.stop(driver),
            RunState::Stopped => self.start(now_ms, driver),
            RunState::Faulted => {}
        }
    }

    /// One forced step (and draw, unless headless), regardless of run
    /// state.  Stops continuous animation first if it was running.
    pub fn once(&mut self, driver: &mut Driver, target: &mut dyn Animated) -> AbmResult<()> {
        if self.state == RunState::Running {
            self.stop(driver);
        }
        self.run_step(driver, target)?;
        if !self.headless {
            self.run_draw(driver, target)?;
        }
        Ok(())
    }

    /// Change the target rate.  Resets the measurement baseline so the
    /// throughput readings reflect the new target, but keeps the
    /// cumulative counters.
    pub fn set_rate(&mut self, now_ms: u64, rate: f64) {
        self.rate = rate;
        self.rebase(now_ms);
    }

    /// Back to a pristine stopped state with zeroed counters.  Cancels
    /// outstanding callbacks and clears a fault.
    pub fn reset(&mut self, driver: &mut Driver) {
        self.cancel_all(driver);
        self.state = RunState::Stopped;
        self.ticks = 0;
        self.draws = 0;
        self.baseline_ms = 0;
        self.baseline_ticks = 0;
        self.baseline_draws = 0;
    }

    fn rebase(&mut self, now_ms: u64) {
        self.baseline_ms = now_ms;
        self.baseline_ticks = self.ticks;
        self.baseline_draws = self.draws;
    }

    fn schedule(&mut self, now_ms: u64, driver: &mut Driver) {
        if self.multi_step {
            self.step_timer = Some(driver.set_timeout(now_ms, STEP_TIMER_MS));
            if !self.headless {
                self.draw_frame = Some(driver.request_frame(now_ms));
            }
        } else {
            self.frame = Some(driver.request_frame(now_ms));
        }
    }

    fn cancel_all(&mut self, driver: &mut Driver) {
        for slot in [&mut self.frame, &mut self.step_timer, &mut self.draw_frame] {
            if let Some(handle) = slot.take() {
                driver.cancel(handle);
            }
        }
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    /// Run the callback behind a due `handle`.  Handles that are not the
    /// animator's (stale, or owned by someone else) are ignored.
    pub fn fire(
        &mut self,
        handle: Handle,
        now_ms: u64,
        driver: &mut Driver,
        target: &mut dyn Animated,
    ) -> AbmResult<()> {
        if self.frame == Some(handle) {
            self.frame = None;
            self.on_frame(now_ms, driver, target)
        } else if self.step_timer == Some(handle) {
            self.step_timer = None;
            self.on_step_timer(now_ms, driver, target)
        } else if self.draw_frame == Some(handle) {
            self.draw_frame = None;
            self.on_draw_frame(now_ms, driver, target)
        } else {
            Ok(())
        }
    }

    /// Single-step pacing: step + draw while under the target rate, then
    /// reschedule for the next refresh.
    fn on_frame(
        &mut self,
        now_ms: u64,
        driver: &mut Driver,
        target: &mut dyn Animated,
    ) -> AbmResult<()> {
        if self.state != RunState::Running {
            return Ok(());
        }
        if self.draws_per_sec(now_ms) < self.rate {
            self.run_step(driver, target)?;
            self.run_draw(driver, target)?;
        }
        self.frame = Some(driver.request_frame(now_ms));
        Ok(())
    }

    /// Multi-step pacing: catch the cumulative tick count up to
    /// `rate * elapsed`, then reschedule the timer.
    fn on_step_timer(
        &mut self,
        now_ms: u64,
        driver: &mut Driver,
        target: &mut dyn Animated,
    ) -> AbmResult<()> {
        if self.state != RunState::Running {
            return Ok(());
        }
        let target_ticks = self.rate * (now_ms - self.baseline_ms) as f64 / 1000.0;
        while ((self.ticks - self.baseline_ticks) as f64) < target_ticks {
            self.run_step(driver, target)?;
        }
        self.step_timer = Some(driver.set_timeout(now_ms, STEP_TIMER_MS));
        Ok(())
    }

    /// Draw pacing for multi-step mode: one draw per refresh while under
    /// the target rate.
    fn on_draw_frame(
        &mut self,
        now_ms: u64,
        driver: &mut Driver,
        target: &mut dyn Animated,
    ) -> AbmResult<()> {
        if self.state != RunState::Running {
            return Ok(());
        }
        if self.draws_per_sec(now_ms) < self.rate {
            self.run_draw(driver, target)?;
        }
        self.draw_frame = Some(driver.request_frame(now_ms));
        Ok(())
    }

    fn run_step(&mut self, driver: &mut Driver, target: &mut dyn Animated) -> AbmResult<()> {
        match target.step() {
            Ok(()) => {
                self.ticks += 1;
                Ok(())
            }
            Err(error) => {
                self.fault(driver);
                Err(error)
            }
        }
    }

    fn run_draw(&mut self, driver: &mut Driver, target: &mut dyn Animated) -> AbmResult<()> {
        match target.draw() {
            Ok(()) => {
                self.draws += 1;
                Ok(())
            }
            Err(error) => {
                self.fault(driver);
                Err(error)
            }
        }
    }

    fn fault(&mut self, driver: &mut Driver) {
        self.cancel_all(driver);
        self.state = RunState::Faulted;
    }
}
