//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contract between window backends and the scene core: the events a
// backend sends, the errors it reports, and the `Window` trait the loop
// drives.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Receiver;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::render::Renderer;

//=== PlatformEvent =======================================================

/// Events sent from a backend to the core over a channel.
#[derive(Debug, Clone)]
pub enum PlatformEvent {
    /// Input events gathered during one pump, in arrival order.
    Inputs {
        discrete: Vec<InputEvent>,
        continuous: Vec<InputEvent>,
    },

    /// The window closed (user request honoured or backend shutdown).
    WindowClosed,
}

//=== PlatformError =======================================================

/// Backend initialization and runtime errors.
#[derive(Debug)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    EventLoopCreation(String),

    /// Event loop execution error.
    EventLoopExecution(String),

    /// The OS refused to create the window.
    WindowCreation(String),
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::WindowCreation(e) => write!(f, "Window creation failed: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== Window ==============================================================

/// Display surface driven by `SceneWindow`.
///
/// A backend owns the OS window (or nothing, when headless), a renderer,
/// and the sending half of a [`PlatformEvent`] channel.
pub trait Window {
    type Renderer: Renderer;

    /// Returns `false` once the window was closed.
    fn is_open(&self) -> bool;

    /// Closes the window. The loop stops at its next iteration.
    fn close(&mut self);

    /// Paces the frame and returns the milliseconds since the last tick.
    ///
    /// `framerate == 0` means unthrottled.
    fn tick(&mut self, framerate: u32, busy_loop: bool) -> f64;

    /// Restarts frame measurement: the next `tick` only counts the time
    /// elapsed from this call.
    fn restart_clock(&mut self);

    /// Measured frame rate.
    fn fps(&self) -> f64;

    /// Lets the backend process OS events and forward them to the channel.
    fn pump_events(&mut self);

    /// Receiving half of the backend's event channel.
    fn event_receiver(&self) -> Receiver<PlatformEvent>;

    fn renderer(&mut self) -> &mut Self::Renderer;

    /// Shows the display target.
    fn present(&mut self);

    /// Called when the window becomes stuck (transition running).
    fn suspend_input(&mut self) {}

    /// Called when the window leaves the stuck state.
    fn resume_input(&mut self) {}
}
