//=========================================================================
// Platform Subsystem
//
// Window backends implementing the core `Window` trait.
//
// Architecture:
// ```text
//  SceneWindow frame:
//  ┌───────────────────────────────────────────────┐
//  │ window.tick()        FrameClock pacing        │
//  │ window.pump_events() ─┐                       │
//  │                       ↓                       │
//  │   Winit (pump_app_events, zero timeout)       │
//  │     ↓                                         │
//  │   InputProcessor  (winit → InputEvent)        │
//  │     ↓                                         │
//  │   InputBuffer     (discrete / continuous)     │
//  │     ↓ flush once per pump                     │
//  │   Channel ──PlatformEvent──> EventCollector   │
//  └───────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **The pump is the frame boundary**: the scene loop owns the thread and
//   lets winit process pending OS events once per frame, so all input of
//   a frame is sent as one batch
// - **Sticky modifiers**: modifier state persists across events until
//   winit reports a change
// - **Close behavior**: a close request closes, iconifies or is ignored
//   depending on `WindowConfig::close_behavior`
// - **Headless backend**: same contract without an OS window, for tests
//   and offline rendering
//
//=========================================================================

//=== Submodules ==========================================================

mod headless;
mod input_buffer;
mod input_processor;

pub use headless::HeadlessWindow;

//=== External Crates =====================================================

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window as OsWindow, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use crate::core::render::Image;
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== Constants ===========================================================

/// Capacity of the backend → core channel.
const CHANNEL_CAPACITY: usize = 128;

//=== CloseBehavior =======================================================

/// What happens when the user asks the OS to close the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloseBehavior {
    /// Close the window and stop the scene loop.
    #[default]
    Close,

    /// Minimize the window instead.
    Iconify,

    /// Ignore the request.
    Nothing,
}

//=== WindowConfig ========================================================

/// Creation parameters of a [`WinitWindow`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub size: (u32, u32),
    pub resizable: bool,
    pub close_behavior: CloseBehavior,
}

impl WindowConfig {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            size: (width, height),
            ..Self::default()
        }
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_close_behavior(mut self, close_behavior: CloseBehavior) -> Self {
        self.close_behavior = close_behavior;
        self
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Diamond Engine".to_string(),
            size: (800, 600),
            resizable: false,
            close_behavior: CloseBehavior::Close,
        }
    }
}

//=== Presenter ===========================================================

/// Blits the display target onto the OS window (softbuffer, pixels, …).
pub type Presenter = Box<dyn FnMut(&OsWindow, &Image)>;

//=== WinitApp ============================================================

/// Winit application state: the OS window and the input pipeline.
struct WinitApp {
    config: WindowConfig,

    /// OS window handle (None until `resumed()` created it).
    window: Option<OsWindow>,

    buffer: InputBuffer,
    input_processor: InputProcessor,
    event_sender: Sender<PlatformEvent>,

    /// Last size reported by the OS, waiting to be applied to the renderer.
    resized: Option<(u32, u32)>,

    closed: bool,
    error: Option<PlatformError>,
}

impl WinitApp {
    fn new(config: WindowConfig, event_sender: Sender<PlatformEvent>) -> Self {
        Self {
            config,
            window: None,
            buffer: InputBuffer::new(),
            input_processor: InputProcessor::new(),
            event_sender,
            resized: None,
            closed: false,
            error: None,
        }
    }

    /// Sends the events buffered during this pump as one batch.
    ///
    /// A full or disconnected channel drops the batch with a warning.
    fn flush_input_buffer(&mut self) {
        let Some((discrete, continuous)) = self.buffer.drain() else {
            return;
        };
        let (discrete_count, continuous_count) = (discrete.len(), continuous.len());

        trace!(
            target: "platform::input",
            "Flushing {} discrete + {} continuous events",
            discrete_count,
            continuous_count
        );

        match self.event_sender.try_send(PlatformEvent::Inputs { discrete, continuous }) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => warn!(
                target: "platform::input",
                "Event channel full, dropping {} events",
                discrete_count + continuous_count
            ),
            Err(TrySendError::Disconnected(_)) => warn!(
                target: "platform::input",
                "Channel disconnected, dropping {} events",
                discrete_count + continuous_count
            ),
        }
    }

    /// Applies the configured close behavior.
    fn handle_close_request(&mut self) {
        match self.config.close_behavior {
            CloseBehavior::Close => {
                info!(target: "platform", "Window close requested");
                self.close();
            }
            CloseBehavior::Iconify => {
                debug!(target: "platform", "Close request: iconifying window");
                if let Some(window) = &self.window {
                    window.set_minimized(true);
                }
            }
            CloseBehavior::Nothing => {
                debug!(target: "platform", "Close request ignored");
            }
        }
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.window = None;
        if self.event_sender.try_send(PlatformEvent::WindowClosed).is_err() {
            warn!(target: "platform", "Could not report window closure to the core");
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for WinitApp {
    /// Creates the OS window on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.closed {
            return;
        }

        let (width, height) = self.config.size;
        let attrs = OsWindow::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(width, height))
            .with_resizable(self.config.resizable);

        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    size.width,
                    size.height,
                    window.scale_factor()
                );
                self.resized = Some((size.width, size.height));
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.error = Some(PlatformError::WindowCreation(e.to_string()));
                self.close();
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                self.handle_close_request();
                if self.closed {
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(size) => {
                self.resized = Some((size.width, size.height));
            }
            _ => {}
        }

        if let Some(input) = self.input_processor.process(&event) {
            self.buffer.push(input);
        }
    }
}

//=== WinitWindow =========================================================

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux", target_os = "android"))]
mod pumped {
    use std::time::Duration;

    use log::{debug, info};
    use winit::event_loop::{ControlFlow, EventLoop};
    use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};

    use super::*;
    use crate::core::platform_bridge::Window;
    use crate::core::render::{FrameBuffer, Renderer};
    use crate::core::time::FrameClock;

    /// OS window driven by the scene loop.
    ///
    /// The loop keeps the thread; winit only runs while `pump_events` lets
    /// it process pending OS events. Drawing happens in a `FrameBuffer`;
    /// a [`Presenter`] shows it on screen.
    ///
    /// Must be created on the main thread (winit requirement on macOS).
    pub struct WinitWindow {
        event_loop: EventLoop<()>,
        app: WinitApp,
        receiver: Receiver<PlatformEvent>,
        renderer: FrameBuffer,
        clock: FrameClock,
        presenter: Option<Presenter>,
        open: bool,
    }

    impl WinitWindow {
        /// Creates the event loop and the OS window.
        ///
        /// # Errors
        ///
        /// Returns [`PlatformError`] if the event loop or the window cannot
        /// be created.
        pub fn new(config: WindowConfig) -> Result<Self, PlatformError> {
            let event_loop = EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;
            event_loop.set_control_flow(ControlFlow::Poll);

            let (sender, receiver) = bounded(CHANNEL_CAPACITY);
            let (width, height) = config.size;

            let mut window = Self {
                event_loop,
                app: WinitApp::new(config, sender),
                receiver,
                renderer: FrameBuffer::new(width, height),
                clock: FrameClock::new(),
                presenter: None,
                open: true,
            };

            // The first pump delivers `resumed`, which creates the window.
            window.pump();
            if let Some(error) = window.app.error.take() {
                return Err(error);
            }
            Ok(window)
        }

        /// Installs the function showing each presented frame.
        pub fn with_presenter(mut self, presenter: impl FnMut(&OsWindow, &Image) + 'static) -> Self {
            self.presenter = Some(Box::new(presenter));
            self
        }

        /// The OS window, once created and until closed.
        pub fn os_window(&self) -> Option<&OsWindow> {
            self.app.window.as_ref()
        }

        fn pump(&mut self) {
            let status = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.app);
            if let PumpStatus::Exit(code) = status {
                info!(target: "platform", "Event loop exited with code {}", code);
                self.app.close();
            }

            if let Some((width, height)) = self.app.resized.take() {
                if (width, height) != self.renderer.size() && width > 0 && height > 0 {
                    debug!(target: "platform", "Resizing frame buffer to {}x{}", width, height);
                    self.renderer.resize(width, height);
                }
            }

            self.app.flush_input_buffer();
            if self.app.closed {
                self.open = false;
            }
        }
    }

    impl Window for WinitWindow {
        type Renderer = FrameBuffer;

        fn is_open(&self) -> bool {
            self.open
        }

        fn close(&mut self) {
            self.open = false;
            self.app.close();
        }

        fn tick(&mut self, framerate: u32, busy_loop: bool) -> f64 {
            self.clock.tick(framerate, busy_loop)
        }

        fn restart_clock(&mut self) {
            self.clock.restart();
        }

        fn fps(&self) -> f64 {
            self.clock.fps()
        }

        fn pump_events(&mut self) {
            if self.open {
                self.pump();
            }
        }

        fn event_receiver(&self) -> Receiver<PlatformEvent> {
            self.receiver.clone()
        }

        fn renderer(&mut self) -> &mut FrameBuffer {
            &mut self.renderer
        }

        fn present(&mut self) {
            if let (Some(presenter), Some(window)) = (self.presenter.as_mut(), self.app.window.as_ref()) {
                presenter(window, self.renderer.display());
            }
        }

        fn suspend_input(&mut self) {
            self.app.buffer.set_suspended(true);
        }

        fn resume_input(&mut self) {
            self.app.buffer.set_suspended(false);
        }
    }
}

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux", target_os = "android"))]
pub use pumped::WinitWindow;

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, Modifiers};

    fn app(close_behavior: CloseBehavior) -> (WinitApp, Receiver<PlatformEvent>) {
        let (tx, rx) = bounded(CHANNEL_CAPACITY);
        let config = WindowConfig::default().with_close_behavior(close_behavior);
        (WinitApp::new(config, tx), rx)
    }

    #[test]
    fn config_defaults() {
        let config = WindowConfig::new("Game", 320, 240);

        assert_eq!(config.title, "Game");
        assert_eq!(config.size, (320, 240));
        assert!(!config.resizable);
        assert_eq!(config.close_behavior, CloseBehavior::Close);
    }

    #[test]
    fn flush_empty_buffer_is_noop() {
        let (mut app, rx) = app(CloseBehavior::Close);

        app.flush_input_buffer();

        assert!(rx.try_recv().is_err(), "No events should be sent for empty buffer");
    }

    #[test]
    fn flush_sends_buffered_events_as_one_batch() {
        let (mut app, rx) = app(CloseBehavior::Close);
        app.buffer.push(InputEvent::KeyDown { key: KeyCode::Space, modifiers: Modifiers::NONE });
        app.buffer.push(InputEvent::MouseMoved { x: 1.0, y: 1.0 });

        app.flush_input_buffer();
        app.flush_input_buffer();

        match rx.try_recv() {
            Ok(PlatformEvent::Inputs { discrete, continuous }) => {
                assert_eq!(discrete.len(), 1);
                assert_eq!(continuous.len(), 1);
            }
            other => panic!("Expected Inputs event, got {:?}", other),
        }
        assert!(rx.try_recv().is_err(), "Second flush should not send");
    }

    #[test]
    fn flush_handles_disconnected_channel() {
        let (mut app, rx) = app(CloseBehavior::Close);
        app.buffer.push(InputEvent::Focused(true));
        drop(rx);

        app.flush_input_buffer();
        assert!(app.buffer.is_empty());
    }

    #[test]
    fn close_request_honours_behavior() {
        let (mut closing, rx) = app(CloseBehavior::Close);
        closing.handle_close_request();
        closing.handle_close_request();
        assert!(closing.closed);
        assert!(matches!(rx.try_recv(), Ok(PlatformEvent::WindowClosed)));
        assert!(rx.try_recv().is_err(), "Closure is reported once");

        let (mut ignoring, rx) = app(CloseBehavior::Nothing);
        ignoring.handle_close_request();
        assert!(!ignoring.closed);
        assert!(rx.try_recv().is_err());
    }
}
