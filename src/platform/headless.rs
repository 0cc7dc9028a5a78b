//=========================================================================
// Headless Window
//=========================================================================
//
// Window backend without any OS window: renders into a `FrameBuffer`,
// receives events only through its channel, and paces frames either with
// the wall clock or with a simulated clock.
//
// Architecture:
//   event_sender() ──PlatformEvent──> channel ──> SceneWindow collector
//   tick() → FrameClock<HeadlessTime> (system or simulated)
//   present() → presented count (+ optional frame recording)
//
// Used for tests, tools and offline rendering.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::rc::Rc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformEvent, Window};
use crate::core::render::{FrameBuffer, Image, Renderer};
use crate::core::time::{FrameClock, SystemTimeSource, TimeSource};

//=== HeadlessTime ========================================================

/// Time source of a headless window.
#[derive(Debug, Clone)]
enum HeadlessTime {
    System(SystemTimeSource),

    /// Manual clock: sleeping only advances the counter.
    Simulated(Rc<Cell<f64>>),
}

impl TimeSource for HeadlessTime {
    fn now_ms(&self) -> f64 {
        match self {
            Self::System(source) => source.now_ms(),
            Self::Simulated(now) => now.get(),
        }
    }

    fn delay_ms(&self, ms: f64, busy: bool) {
        match self {
            Self::System(source) => source.delay_ms(ms, busy),
            Self::Simulated(now) => now.set(now.get() + ms.max(0.0)),
        }
    }
}

//=== HeadlessWindow ======================================================

/// In-memory window.
///
/// With [`HeadlessWindow::with_frame_time`] every tick advances a
/// simulated clock by a fixed amount and never sleeps, which makes runs
/// deterministic.
pub struct HeadlessWindow {
    renderer: FrameBuffer,
    clock: FrameClock<HeadlessTime>,
    simulated: Option<(Rc<Cell<f64>>, f64)>,
    sender: Sender<PlatformEvent>,
    receiver: Receiver<PlatformEvent>,
    open: bool,
    input_suspended: bool,
    frame_limit: Option<u64>,
    ticks: u64,
    presented: u64,
    recording: bool,
    frames: Vec<Image>,
}

impl HeadlessWindow {
    //--- Construction -----------------------------------------------------

    pub fn new(width: u32, height: u32) -> Self {
        let (sender, receiver) = unbounded();
        info!(target: "platform", "Headless window created: {}x{}", width, height);

        Self {
            renderer: FrameBuffer::new(width, height),
            clock: FrameClock::with_source(HeadlessTime::System(SystemTimeSource::new())),
            simulated: None,
            sender,
            receiver,
            open: true,
            input_suspended: false,
            frame_limit: None,
            ticks: 0,
            presented: 0,
            recording: false,
            frames: Vec::new(),
        }
    }

    /// Switches to a simulated clock advancing `frame_ms` per tick.
    ///
    /// # Panics
    ///
    /// Panics if `frame_ms` is negative or not finite.
    pub fn with_frame_time(mut self, frame_ms: f64) -> Self {
        assert!(
            frame_ms.is_finite() && frame_ms >= 0.0,
            "Frame time must be finite and non-negative, got {}",
            frame_ms
        );
        let now = Rc::new(Cell::new(0.0));
        self.clock = FrameClock::with_source(HeadlessTime::Simulated(Rc::clone(&now)));
        self.simulated = Some((now, frame_ms));
        self
    }

    /// Closes the window instead of running tick number `frames + 1`.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Keeps a copy of every presented display target.
    pub fn with_recording(mut self) -> Self {
        self.recording = true;
        self
    }

    //--- Accessors --------------------------------------------------------

    /// Sending half of the event channel, for feeding input.
    pub fn event_sender(&self) -> Sender<PlatformEvent> {
        self.sender.clone()
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of presented frames.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Recorded frames, oldest first (empty unless recording).
    pub fn frames(&self) -> &[Image] {
        &self.frames
    }

    pub fn is_input_suspended(&self) -> bool {
        self.input_suspended
    }

    /// Current time of the window clock.
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }
}

impl Window for HeadlessWindow {
    type Renderer = FrameBuffer;

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        if self.open {
            debug!(target: "platform", "Headless window closed after {} ticks", self.ticks);
        }
        self.open = false;
    }

    fn tick(&mut self, framerate: u32, busy_loop: bool) -> f64 {
        if self.frame_limit.is_some_and(|limit| self.ticks >= limit) {
            self.close();
            return 0.0;
        }
        self.ticks += 1;

        match &self.simulated {
            Some((now, frame_ms)) => {
                now.set(now.get() + frame_ms);
                self.clock.tick(0, busy_loop)
            }
            None => self.clock.tick(framerate, busy_loop),
        }
    }

    fn restart_clock(&mut self) {
        self.clock.restart();
    }

    fn fps(&self) -> f64 {
        self.clock.fps()
    }

    fn pump_events(&mut self) {}

    fn event_receiver(&self) -> Receiver<PlatformEvent> {
        self.receiver.clone()
    }

    fn renderer(&mut self) -> &mut FrameBuffer {
        &mut self.renderer
    }

    fn present(&mut self) {
        self.presented += 1;
        if self.recording {
            self.frames.push(self.renderer.display().clone());
        }
    }

    fn suspend_input(&mut self) {
        self.input_suspended = true;
    }

    fn resume_input(&mut self) {
        self.input_suspended = false;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
