//=========================================================================
// Fixed Step Scheduler
//=========================================================================
//
// Converts variable frame times into a count of fixed-size update ticks
// plus an interpolation factor for rendering between two fixed states.
//
// Architecture:
//   elapsed ms → accumulator → { ticks: while acc >= dt, alpha: acc / dt }
//
// A negative elapsed time is the reset signal used on discontinuities
// (scene change, transition start/end) to avoid catch-up bursts.
//
//=========================================================================

//=== FixedStep ===========================================================

/// Outcome of one [`FixedStepScheduler::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStep {
    /// Number of fixed updates due this frame.
    pub ticks: u32,

    /// Position between the last two fixed states, in `[0, 1]`.
    pub alpha: f64,
}

impl FixedStep {
    /// Step produced by a reset: nothing due, fully interpolated.
    pub const RESET: Self = Self { ticks: 0, alpha: 1.0 };
}

//=== FixedStepScheduler ==================================================

/// Fixed-timestep accumulator.
#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    fixed_dt_ms: f64,
    accumulator: f64,
    last: FixedStep,
}

impl FixedStepScheduler {
    //--- Construction -----------------------------------------------------

    /// Creates a scheduler with the given step duration.
    ///
    /// `0` disables fixed stepping: every frame then yields zero ticks and
    /// an alpha of `1.0`.
    ///
    /// # Panics
    ///
    /// Panics if `fixed_dt_ms` is negative or not finite.
    pub fn new(fixed_dt_ms: f64) -> Self {
        assert!(
            fixed_dt_ms.is_finite() && fixed_dt_ms >= 0.0,
            "Fixed timestep must be finite and non-negative, got {}",
            fixed_dt_ms
        );
        Self {
            fixed_dt_ms,
            accumulator: 0.0,
            last: FixedStep::RESET,
        }
    }

    /// Creates a scheduler stepping `framerate` times per second.
    ///
    /// A framerate of `0` disables fixed stepping.
    pub fn from_framerate(framerate: u32) -> Self {
        Self::new(Self::dt_for_framerate(framerate))
    }

    /// Step duration in milliseconds for a framerate (`0` when disabled).
    pub fn dt_for_framerate(framerate: u32) -> f64 {
        if framerate > 0 {
            1000.0 / f64::from(framerate)
        } else {
            0.0
        }
    }

    //--- Configuration ----------------------------------------------------

    /// Changes the step duration. The accumulator is kept.
    ///
    /// # Panics
    ///
    /// Panics if `fixed_dt_ms` is negative or not finite.
    pub fn set_fixed_dt(&mut self, fixed_dt_ms: f64) {
        assert!(
            fixed_dt_ms.is_finite() && fixed_dt_ms >= 0.0,
            "Fixed timestep must be finite and non-negative, got {}",
            fixed_dt_ms
        );
        self.fixed_dt_ms = fixed_dt_ms;
    }

    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt_ms
    }

    //--- Scheduling -------------------------------------------------------

    /// Feeds `elapsed_ms` of real time and returns the ticks due and alpha.
    ///
    /// A negative `elapsed_ms` resets the accumulator and returns
    /// [`FixedStep::RESET`].
    pub fn advance(&mut self, elapsed_ms: f64) -> FixedStep {
        if elapsed_ms < 0.0 {
            self.accumulator = 0.0;
            self.last = FixedStep::RESET;
            return self.last;
        }

        self.accumulator += elapsed_ms;

        let dt = self.fixed_dt_ms;
        if dt <= 0.0 {
            // Nothing consumes the accumulator when stepping is disabled.
            self.accumulator = 0.0;
            self.last = FixedStep { ticks: 0, alpha: 1.0 };
            return self.last;
        }

        let mut ticks = 0;
        while self.accumulator >= dt {
            ticks += 1;
            self.accumulator -= dt;
        }

        self.last = FixedStep {
            ticks,
            alpha: (self.accumulator / dt).clamp(0.0, 1.0),
        };
        self.last
    }

    /// Discards accumulated time.
    pub fn reset(&mut self) -> FixedStep {
        self.advance(-1.0)
    }

    //--- Queries ----------------------------------------------------------

    /// Residual time not yet consumed by a fixed tick.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Result of the most recent `advance`.
    pub fn last_step(&self) -> FixedStep {
        self.last
    }
}

impl Default for FixedStepScheduler {
    fn default() -> Self {
        Self::new(0.0)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn whole_steps_are_counted() {
        let mut scheduler = FixedStepScheduler::new(20.0);

        let step = scheduler.advance(45.0);

        assert_eq!(step.ticks, 2);
        assert!((step.alpha - 0.25).abs() < EPSILON);
        assert!((scheduler.accumulator() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn residual_carries_to_next_frame() {
        let mut scheduler = FixedStepScheduler::new(20.0);

        assert_eq!(scheduler.advance(15.0).ticks, 0);
        assert_eq!(scheduler.advance(15.0).ticks, 1);
        assert!((scheduler.accumulator() - 10.0).abs() < EPSILON);
    }

    #[test]
    fn accounting_identity_holds_over_a_sequence() {
        let dt = 16.0;
        let mut scheduler = FixedStepScheduler::new(dt);
        let frames = [3.0, 17.5, 0.0, 33.3, 16.0, 90.1, 1.2, 15.9];

        let mut total_ticks = 0;
        for elapsed in frames {
            let step = scheduler.advance(elapsed);
            total_ticks += step.ticks;
            assert!(scheduler.accumulator() >= 0.0);
            assert!(scheduler.accumulator() < dt);
            assert!((0.0..=1.0).contains(&step.alpha));
        }

        let consumed = f64::from(total_ticks) * dt + scheduler.accumulator();
        let fed: f64 = frames.iter().sum();
        assert!((consumed - fed).abs() < 1e-6);
    }

    #[test]
    fn reset_yields_no_ticks_and_full_alpha() {
        let mut scheduler = FixedStepScheduler::new(10.0);
        scheduler.advance(37.0);

        assert_eq!(scheduler.advance(-1.0), FixedStep::RESET);
        assert_eq!(scheduler.reset(), FixedStep::RESET);
        assert_eq!(scheduler.accumulator(), 0.0);
    }

    #[test]
    fn advance_after_reset_starts_fresh() {
        let mut reset = FixedStepScheduler::new(10.0);
        reset.advance(9.0);
        reset.reset();

        let mut fresh = FixedStepScheduler::new(10.0);

        assert_eq!(reset.advance(14.0), fresh.advance(14.0));
    }

    #[test]
    fn disabled_stepping_is_variable_only() {
        let mut scheduler = FixedStepScheduler::new(0.0);

        let step = scheduler.advance(250.0);

        assert_eq!(step, FixedStep { ticks: 0, alpha: 1.0 });
        assert_eq!(scheduler.accumulator(), 0.0);
    }

    #[test]
    fn framerate_conversion() {
        assert_eq!(FixedStepScheduler::dt_for_framerate(50), 20.0);
        assert_eq!(FixedStepScheduler::dt_for_framerate(0), 0.0);
        assert_eq!(FixedStepScheduler::from_framerate(100).fixed_dt(), 10.0);
    }

    #[test]
    #[should_panic(expected = "Fixed timestep must be finite and non-negative")]
    fn negative_timestep_panics() {
        FixedStepScheduler::new(-5.0);
    }
}
