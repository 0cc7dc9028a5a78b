//=========================================================================
// Frame Clock
//=========================================================================
//
// Measures real time between frames and caps the frame rate.
//
// Architecture:
//   TimeSource (now / sleep) → FrameClock::tick() → elapsed ms
//                                   └─ every 10 ticks → fps estimate
//
// Pacing never shortens a frame: under load the reported elapsed time is
// larger than the ideal period.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use log::trace;

//=== Constants ===========================================================

/// Number of ticks between two FPS estimates.
const FPS_WINDOW: u32 = 10;

/// Delays shorter than this are not worth a sleep.
const MIN_DELAY_MS: f64 = 2.0;

//=== TimeSource ==========================================================

/// Millisecond time source used by [`FrameClock`].
///
/// Abstracts the wall clock so pacing can be driven by a manual clock in
/// tests or by a simulated clock in headless runs.
pub trait TimeSource {
    /// Milliseconds elapsed since an arbitrary fixed origin.
    fn now_ms(&self) -> f64;

    /// Blocks the calling thread for `ms` milliseconds.
    ///
    /// `busy` requests an accurate spin-wait instead of an OS sleep.
    fn delay_ms(&self, ms: f64, busy: bool);
}

/// Wall clock backed by [`Instant`] and [`thread::sleep`].
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn delay_ms(&self, ms: f64, busy: bool) {
        if ms <= 0.0 {
            return;
        }
        let duration = Duration::from_secs_f64(ms / 1000.0);
        if busy {
            let deadline = Instant::now() + duration;
            while Instant::now() < deadline {
                std::hint::spin_loop();
            }
        } else {
            thread::sleep(duration);
        }
    }
}

//=== FrameClock ==========================================================

/// Tracks elapsed time between frames and estimates the frame rate.
pub struct FrameClock<T: TimeSource = SystemTimeSource> {
    source: T,
    started: bool,
    last_tick: f64,
    fps: f64,
    fps_count: u32,
    fps_tick: f64,
}

impl FrameClock<SystemTimeSource> {
    /// Creates a clock driven by the wall clock.
    pub fn new() -> Self {
        Self::with_source(SystemTimeSource::new())
    }
}

impl Default for FrameClock<SystemTimeSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> FrameClock<T> {
    //--- Construction -----------------------------------------------------

    /// Creates a clock driven by an arbitrary time source.
    pub fn with_source(source: T) -> Self {
        let now = source.now_ms();
        Self {
            source,
            started: false,
            last_tick: now,
            fps: 0.0,
            fps_count: 0,
            fps_tick: now,
        }
    }

    //--- Ticking ----------------------------------------------------------

    /// Marks a frame boundary and returns the milliseconds since the last one.
    ///
    /// The first tick (unless [`restart`](Self::restart) ran before) only
    /// starts the measurement and returns 0.
    ///
    /// With `target_fps == 0` no throttling happens. Otherwise the call blocks
    /// until the ideal period `1000 / target_fps` has elapsed (spinning when
    /// `busy_loop` is set). The returned value is the actual elapsed time.
    pub fn tick(&mut self, target_fps: u32, busy_loop: bool) -> f64 {
        if !self.started {
            self.restart();
            self.fps_tick = self.last_tick;
            return 0.0;
        }

        let mut now = self.source.now_ms();
        let mut elapsed = now - self.last_tick;

        if target_fps > 0 {
            let period = 1000.0 / f64::from(target_fps);
            if elapsed < period {
                let delay = period - elapsed;
                if delay >= MIN_DELAY_MS {
                    self.source.delay_ms(delay, busy_loop);
                    now = self.source.now_ms();
                    elapsed = now - self.last_tick;
                }
            }
        }

        self.last_tick = now;
        self.update_fps(now);
        elapsed.max(0.0)
    }

    /// Restarts the measurement so the next tick reports only the time
    /// elapsed from now.
    pub fn restart(&mut self) {
        self.started = true;
        self.last_tick = self.source.now_ms();
    }

    //--- Queries ----------------------------------------------------------

    /// Smoothed frame rate, refreshed every ten ticks.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Current time reported by the underlying source.
    pub fn now_ms(&self) -> f64 {
        self.source.now_ms()
    }

    //--- Internal Helpers -------------------------------------------------

    fn update_fps(&mut self, now: f64) {
        self.fps_count += 1;
        if self.fps_count >= FPS_WINDOW {
            let window_ms = now - self.fps_tick;
            if window_ms > 0.0 {
                self.fps = f64::from(self.fps_count) / (window_ms / 1000.0);
            }
            trace!(target: "time", "FPS estimate: {:.2}", self.fps);
            self.fps_count = 0;
            self.fps_tick = now;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
