//! Unit tests for the driver queue and the animator state machine.

#[cfg(test)]
mod driver {
    use crate::driver::{Driver, FRAME_MS};

    #[test]
    fn pops_in_deadline_order() {
        let mut driver = Driver::new();
        let late = driver.set_timeout(0, 50);
        let early = driver.set_timeout(0, 10);
        assert_eq!(driver.next_deadline(), Some(10));

        assert_eq!(driver.pop_due(9), None);
        assert_eq!(driver.pop_due(10), Some(early));
        assert_eq!(driver.pop_due(100), Some(late));
        assert!(driver.is_empty());
    }

    #[test]
    fn request_frame_uses_the_frame_quantum() {
        let mut driver = Driver::new();
        driver.request_frame(100);
        assert_eq!(driver.next_deadline(), Some(100 + FRAME_MS));
    }

    #[test]
    fn cancel_is_exact_and_idempotent() {
        let mut driver = Driver::new();
        let a = driver.set_timeout(0, 10);
        let b = driver.set_timeout(0, 10);

        assert!(driver.cancel(a));
        assert!(!driver.cancel(a));
        assert_eq!(driver.len(), 1);
        assert_eq!(driver.pop_due(10), Some(b));
        // Firing consumes the handle; cancelling it afterwards is a no-op.
        assert!(!driver.cancel(b));
    }

    #[test]
    fn a_handle_fires_at_most_once() {
        let mut driver = Driver::new();
        let handle = driver.set_timeout(0, 5);
        assert_eq!(driver.pop_due(5), Some(handle));
        assert_eq!(driver.pop_due(500), None);
    }
}

#[cfg(test)]
mod animator {
    use abm_core::{AbmError, AbmResult};

    use crate::animator::{Animated, Animator, RunState};
    use crate::clock::{Clock, ManualClock};
    use crate::driver::Driver;

    /// Counts callbacks; optionally fails on the nth step.
    #[derive(Default)]
    struct Probe {
        steps: u64,
        draws: u64,
        fail_step_at: Option<u64>,
    }

    impl Animated for Probe {
        fn step(&mut self) -> AbmResult<()> {
            if self.fail_step_at == Some(self.steps) {
                return Err(AbmError::Config("induced step failure".into()));
            }
            self.steps += 1;
            Ok(())
        }

        fn draw(&mut self) -> AbmResult<()> {
            self.draws += 1;
            Ok(())
        }
    }

    /// Drain the driver deadline-by-deadline until `end_ms`, advancing the
    /// clock to each deadline — the headless batch loop in miniature.
    fn run_until(
        clock: &mut ManualClock,
        driver: &mut Driver,
        animator: &mut Animator,
        probe: &mut Probe,
        end_ms: u64,
    ) -> AbmResult<()> {
        while let Some(deadline) = driver.next_deadline() {
            if deadline > end_ms {
                break;
            }
            clock.set(deadline);
            while let Some(handle) = driver.pop_due(clock.now_ms()) {
                animator.fire(handle, clock.now_ms(), driver, probe)?;
            }
        }
        Ok(())
    }

    #[test]
    fn multi_step_converges_to_the_target_rate() {
        let mut clock = ManualClock::new();
        let mut driver = Driver::new();
        let mut probe = Probe::default();
        let mut animator = Animator::new(30.0, true, true);

        animator.start(clock.now_ms(), &mut driver);
        run_until(&mut clock, &mut driver, &mut animator, &mut probe, 1000).unwrap();

        let rate = animator.ticks_per_sec(clock.now_ms());
        assert!((rate - 30.0).abs() <= 2.0, "ticks/sec {rate}");
        assert!(animator.ticks() >= 28 && animator.ticks() <= 32, "{}", animator.ticks());
        // Headless: the draw path never runs.
        assert_eq!(probe.draws, 0);
        assert_eq!(animator.draws(), 0);
    }

    #[test]
    fn single_step_paces_draws_against_the_rate() {
        let mut clock = ManualClock::new();
        let mut driver = Driver::new();
        let mut probe = Probe::default();
        let mut animator = Animator::new(30.0, false, false);

        animator.start(clock.now_ms(), &mut driver);
        run_until(&mut clock, &mut driver, &mut animator, &mut probe, 1000).unwrap();

        // Frames arrive at ~60/sec; steps and draws stay near 30.
        assert_eq!(probe.steps, probe.draws);
        assert!(probe.draws >= 25 && probe.draws <= 35, "{}", probe.draws);
        // The next frame is always kept scheduled while running.
        assert_eq!(driver.len(), 1);
    }

    #[test]
    fn multi_step_draws_when_not_headless() {
        let mut clock = ManualClock::new();
        let mut driver = Driver::new();
        let mut probe = Probe::default();
        let mut animator = Animator::new(30.0, true, false);

        animator.start(clock.now_ms(), &mut driver);
        run_until(&mut clock, &mut driver, &mut animator, &mut probe, 1000).unwrap();

        assert!(probe.steps >= 28, "{}", probe.steps);
        assert!(probe.draws >= 25 && probe.draws <= 35, "{}", probe.draws);
    }

    #[test]
    fn stop_cancels_every_pending_callback_and_is_idempotent() {
        let mut clock = ManualClock::new();
        let mut driver = Driver::new();
        let mut animator = Animator::new(30.0, true, false);

        animator.start(clock.now_ms(), &mut driver);
        assert_eq!(driver.len(), 2); // step timer + draw frame

        animator.stop(&mut driver);
        assert_eq!(animator.state(), RunState::Stopped);
        assert!(driver.is_empty());

        animator.stop(&mut driver);
        assert_eq!(animator.state(), RunState::Stopped);
    }

    #[test]
    fn toggle_flips_between_stopped_and_running() {
        let mut clock = ManualClock::new();
        let mut driver = Driver::new();
        let mut animator = Animator::new(30.0, false, false);

        animator.toggle(clock.now_ms(), &mut driver);
        assert_eq!(animator.state(), RunState::Running);
        animator.toggle(clock.now_ms(), &mut driver);
        assert_eq!(animator.state(), RunState::Stopped);
        assert!(driver.is_empty());
    }

    #[test]
    fn once_steps_and_draws_exactly_once() {
        let mut clock = ManualClock::new();
        let mut driver = Driver::new();
        let mut probe = Probe::default();
        let mut animator = Animator::new(30.0, false, false);

        animator.start(clock.now_ms(), &mut driver);
        animator.once(&mut driver, &mut probe).unwrap();

        // Running animation was stopped first.
        assert_eq!(animator.state(), RunState::Stopped);
        assert!(driver.is_empty());
        assert_eq!(probe.steps, 1);
        assert_eq!(probe.draws, 1);
    }

    #[test]
    fn once_skips_the_draw_when_headless() {
        let mut driver = Driver::new();
        let mut probe = Probe::default();
        let mut animator = Animator::new(30.0, true, true);
        animator.once(&mut driver, &mut probe).unwrap();
        assert_eq!(probe.steps, 1);
        assert_eq!(probe.draws, 0);
    }

    #[test]
    fn set_rate_resets_the_baseline_but_not_the_counters() {
        let mut clock = ManualClock::new();
        let mut driver = Driver::new();
        let mut probe = Probe::default();
        let mut animator = Animator::new(30.0, true, true);

        animator.start(clock.now_ms(), &mut driver);
        run_until(&mut clock, &mut driver, &mut animator, &mut probe, 500).unwrap();
        let before = animator.ticks();
        assert!(before > 0);

        animator.set_rate(clock.now_ms(), 60.0);
        assert_eq!(animator.ticks(), before);
        // Fresh baseline: no elapsed time yet, so throughput reads zero.
        assert_eq!(animator.ticks_per_sec(clock.now_ms()), 0.0);

        run_until(&mut clock, &mut driver, &mut animator, &mut probe, 1500).unwrap();
        let rate = animator.ticks_per_sec(clock.now_ms());
        assert!((rate - 60.0).abs() <= 4.0, "ticks/sec {rate}");
    }

    #[test]
    fn a_step_error_faults_the_animator() {
        let mut clock = ManualClock::new();
        let mut driver = Driver::new();
        let mut probe = Probe { fail_step_at: Some(5), ..Default::default() };
        let mut animator = Animator::new(30.0, true, true);

        animator.start(clock.now_ms(), &mut driver);
        let result = run_until(&mut clock, &mut driver, &mut animator, &mut probe, 1000);

        assert!(result.is_err());
        assert_eq!(animator.state(), RunState::Faulted);
        assert!(driver.is_empty(), "no callback may outlive a fault");
        assert_eq!(animator.ticks(), 5);

        // Faulted is terminal for start/toggle.
        animator.start(clock.now_ms(), &mut driver);
        assert_eq!(animator.state(), RunState::Faulted);
        assert!(driver.is_empty());

        // Only reset clears it.
        animator.reset(&mut driver);
        assert_eq!(animator.state(), RunState::Stopped);
        assert_eq!(animator.ticks(), 0);
    }

    #[test]
    fn stale_handles_are_ignored() {
        let mut clock = ManualClock::new();
        let mut driver = Driver::new();
        let mut probe = Probe::default();
        let mut animator = Animator::new(30.0, false, false);

        // A handle the animator never scheduled.
        let foreign = driver.set_timeout(clock.now_ms(), 1);
        clock.advance(1);
        animator.fire(foreign, clock.now_ms(), &mut driver, &mut probe).unwrap();
        assert_eq!(probe.steps, 0);
    }

    #[test]
    fn throughput_is_zero_before_time_elapses() {
        let mut driver = Driver::new();
        let mut animator = Animator::new(30.0, false, false);
        animator.start(0, &mut driver);
        assert_eq!(animator.ticks_per_sec(0), 0.0);
        assert_eq!(animator.draws_per_sec(0), 0.0);
    }
}
