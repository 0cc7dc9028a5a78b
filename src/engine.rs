//=========================================================================
// Scene Window
//
// Main entry point: owns a window backend and a scene manager, and runs
// the frame loop, the dialog sub-loops and the scene-change protocol.
//
// Architecture:
// ```text
//     SceneWindowBuilder ──build(window)──> SceneWindow ──run(initial)──> [Loop]
//         │                                     │
//         ├─ with_framerate()                   ├─ register_scene() / register_dialog()
//         ├─ with_fixed_framerate()             └─ post_event()
//         └─ with_busy_loop()
//
//  Frame:
//     tick → pump → collect → advance(FixedStep)
//       → callbacks → events → fixed × ticks → interpolation → update
//       → render → present
//
//  Scene change (LoopSignal::NewScene):
//     quit_before (previous, closing) → start_loop_before (next)
//       → transition (stuck) → quit / destroy outgoing
//       → clear events → start_loop (next) → reset scheduler and clock
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::error::SceneError;
use crate::core::input::{InputEvent, InputState};
use crate::core::platform_bridge::{EventCollector, TickControl, Window};
use crate::core::render::Renderer;
use crate::core::scene::{
    FrameTiming, LoopSignal, NavigationRequest, Scene, SceneArgs, SceneEnv, SceneKey, SceneManager, SceneRef,
    SceneResult, SceneSignal, SceneStart,
};
use crate::core::time::{FixedStep, FixedStepScheduler};
use crate::core::transition::driver::{self, TransitionHost};
use crate::core::transition::TransitionContext;

//=== LoopConfig ==========================================================

/// Window-level pacing defaults, overridden by scene preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LoopConfig {
    framerate: u32,
    fixed_framerate: u32,
    busy_loop: bool,
}

//=== SceneWindowBuilder ==================================================

/// Builder for configuring and constructing a [`SceneWindow`].
///
/// # Default Values
///
/// - **Framerate**: 60 frames per second
/// - **Fixed framerate**: 50 fixed updates per second
/// - **Busy loop**: disabled (the clock sleeps between frames)
///
/// # Examples
///
/// ```no_run
/// use diamond_engine::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Key { Title }
/// impl SceneKey for Key {}
///
/// struct Title;
/// impl Scene<Key, FrameBuffer> for Title {
///     fn render(&mut self, ctx: &mut RenderContext<'_, Key, FrameBuffer>) -> Result<(), SceneError> {
///         ctx.renderer().clear(Color::WHITE, false);
///         Ok(())
///     }
/// }
///
/// let mut window = SceneWindowBuilder::new()
///     .with_framerate(120)
///     .with_fixed_framerate(60)
///     .build(HeadlessWindow::new(320, 240));
///
/// window.register_scene(Key::Title, || Title);
/// window.run(Key::Title, SceneArgs::new())?;
/// # Ok::<(), SceneError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SceneWindowBuilder {
    config: LoopConfig,
}

impl SceneWindowBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: LoopConfig {
                framerate: 60,
                fixed_framerate: 50,
                busy_loop: false,
            },
        }
    }

    /// Sets the frame rate used when no scene requests one.
    ///
    /// Default: 60
    ///
    /// # Panics
    ///
    /// Panics if `framerate == 0`.
    pub fn with_framerate(mut self, framerate: u32) -> Self {
        assert!(framerate > 0, "Framerate must be positive, got {}", framerate);
        self.config.framerate = framerate;
        self
    }

    /// Sets the fixed-update rate used when no scene requests one.
    ///
    /// `0` makes fixed updates follow the frame rate.
    ///
    /// Default: 50
    pub fn with_fixed_framerate(mut self, fixed_framerate: u32) -> Self {
        self.config.fixed_framerate = fixed_framerate;
        self
    }

    /// Spin-waits instead of sleeping between frames (more accurate pacing,
    /// one core busy).
    pub fn with_busy_loop(mut self, busy_loop: bool) -> Self {
        self.config.busy_loop = busy_loop;
        self
    }

    /// Builds the scene window around `window`.
    pub fn build<K: SceneKey, W: Window>(self, window: W) -> SceneWindow<K, W> {
        info!(
            target: "scene",
            "Building scene window (framerate: {}, fixed: {}, busy loop: {})",
            self.config.framerate,
            self.config.fixed_framerate,
            self.config.busy_loop
        );

        let collector = EventCollector::new(window.event_receiver());
        SceneWindow {
            window,
            manager: SceneManager::new(),
            collector,
            input: InputState::new(),
            scheduler: FixedStepScheduler::default(),
            config: self.config,
            running: false,
            stuck_depth: 0,
            timing: FrameTiming::default(),
        }
    }
}

impl Default for SceneWindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== SceneWindow =========================================================

/// Scene loop over a window backend.
///
/// Scenes navigate by returning signals from their hooks (see
/// [`SceneContext`](crate::core::scene::SceneContext)); the window turns
/// them into scene changes, dialog sub-loops or window closure.
pub struct SceneWindow<K: SceneKey, W: Window> {
    window: W,
    manager: SceneManager<K, W::Renderer>,
    collector: EventCollector,
    input: InputState,
    scheduler: FixedStepScheduler,
    config: LoopConfig,
    running: bool,
    stuck_depth: u32,
    timing: FrameTiming,
}

impl<K: SceneKey, W: Window> SceneWindow<K, W> {
    /// Builds a scene window with default settings.
    pub fn new(window: W) -> Self {
        SceneWindowBuilder::new().build(window)
    }

    //--- Registration -----------------------------------------------------

    pub fn register_scene<F, S>(&mut self, key: K, factory: F)
    where
        F: Fn() -> S + 'static,
        S: Scene<K, W::Renderer> + 'static,
    {
        self.manager.register_scene(key, factory);
    }

    pub fn register_dialog<F, S>(&mut self, key: K, factory: F)
    where
        F: Fn() -> S + 'static,
        S: Scene<K, W::Renderer> + 'static,
    {
        self.manager.register_dialog(key, factory);
    }

    //--- Configuration ----------------------------------------------------

    /// # Panics
    ///
    /// Panics if `framerate == 0`.
    pub fn set_default_framerate(&mut self, framerate: u32) {
        assert!(framerate > 0, "Framerate must be positive, got {}", framerate);
        self.config.framerate = framerate;
    }

    pub fn set_default_fixed_framerate(&mut self, fixed_framerate: u32) {
        self.config.fixed_framerate = fixed_framerate;
    }

    pub fn default_framerate(&self) -> u32 {
        self.config.framerate
    }

    pub fn default_fixed_framerate(&self) -> u32 {
        self.config.fixed_framerate
    }

    //--- Accessors --------------------------------------------------------

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn manager(&self) -> &SceneManager<K, W::Renderer> {
        &self.manager
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns `true` while input and callbacks are suspended.
    pub fn is_stuck(&self) -> bool {
        self.stuck_depth > 0
    }

    pub fn into_window(self) -> W {
        self.window
    }

    //--- Events -----------------------------------------------------------

    /// Queues an application event for the running scene.
    pub fn post_event(&mut self, event: InputEvent) {
        self.collector.post(event);
    }

    /// Runs `f` with input and callbacks suspended. Calls nest.
    pub fn stuck<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.set_stuck(true);
        let result = f(self);
        self.set_stuck(false);
        result
    }

    //--- Execution --------------------------------------------------------

    /// Starts `initial` and runs until the window closes.
    ///
    /// Every scene and dialog is quit and destroyed before returning, even
    /// on failure.
    ///
    /// # Errors
    ///
    /// - [`SceneError::AlreadyRunning`] / [`SceneError::WindowClosed`] when
    ///   the loop cannot start.
    /// - Any navigation misuse or hook failure, which stops the loop.
    /// - [`SceneError::Teardown`] if the final teardown failed after a
    ///   clean run.
    pub fn run(&mut self, initial: K, args: SceneArgs) -> Result<(), SceneError> {
        if self.running {
            return Err(SceneError::AlreadyRunning);
        }
        if !self.window.is_open() {
            return Err(SceneError::WindowClosed);
        }

        info!(target: "scene", "Scene loop starting with {:?}", initial);
        self.running = true;

        let result = self.main_loop(initial, args);

        let teardown = {
            let env = SceneEnv::new(&self.input, self.timing);
            self.manager.clear(env)
        };
        self.running = false;
        while self.stuck_depth > 0 {
            self.set_stuck(false);
        }
        info!(target: "scene", "Scene loop stopped");

        match (result, teardown) {
            (Err(e), Err(teardown)) => {
                error!(target: "scene", "Teardown after failure also failed: {}", teardown);
                Err(e)
            }
            (Err(e), Ok(())) => Err(e),
            (Ok(()), teardown) => teardown,
        }
    }

    //--- Main Loop --------------------------------------------------------

    fn main_loop(&mut self, initial: K, args: SceneArgs) -> Result<(), SceneError> {
        let env = SceneEnv::new(&self.input, self.timing);
        self.manager.clear(env)?;
        self.scheduler.reset();

        let env = SceneEnv::new(&self.input, self.timing);
        let request = match self.manager.go_to(SceneStart::new(initial).with_args(args), env)? {
            LoopSignal::NewScene(request) => request,
            other => return Err(SceneError::SignalEscaped(format!("{:?} while starting", other))),
        };
        let first = SceneRef::Scene(request.next);

        let env = SceneEnv::new(&self.input, self.timing);
        during_transition(
            self.manager.start_loop_before_transition(first, env),
            "on_start_loop_before_transition",
        )?;
        let env = SceneEnv::new(&self.input, self.timing);
        let started = self.manager.start_loop(first, env);
        self.restart_pacing();
        let mut pending = self.after_hook(started)?;

        loop {
            match pending.take() {
                Some(LoopSignal::NewScene(request)) => {
                    pending = self.scene_transition(request)?;
                    continue;
                }
                Some(LoopSignal::Close) => {
                    info!(target: "scene", "Window close requested by scene");
                    self.window.close();
                }
                Some(LoopSignal::DialogStop) => {
                    return Err(SceneError::SignalEscaped("dialog stop outside a dialog".into()));
                }
                Some(LoopSignal::SameScene(_)) | None => {}
            }

            if !self.window.is_open() {
                break;
            }
            pending = self.run_frame()?;
        }
        Ok(())
    }

    /// Runs one frame for the current scene or dialog.
    ///
    /// Returns the loop signal a hook produced, which ends the frame
    /// before rendering.
    fn run_frame(&mut self) -> Result<Option<LoopSignal<K, W::Renderer>>, SceneError> {
        let elapsed = self.begin_frame();
        if !self.window.is_open() {
            return Ok(None);
        }
        let step = self.scheduler.advance(elapsed);
        trace!(target: "time", "Frame: {:.2} ms, {} fixed ticks, alpha {:.2}", elapsed, step.ticks, step.alpha);

        if let Some(target) = self.manager.current() {
            if let Err(signal) = self.update_scene(target, elapsed, step) {
                if let Some(loop_signal) = self.handle_signal(signal)? {
                    return Ok(Some(loop_signal));
                }
            }
        }

        if let Some(target) = self.manager.current() {
            self.manager.render(target, self.window.renderer())?;
        }
        self.window.present();
        Ok(None)
    }

    /// Paces the frame, pumps the backend and collects its events.
    ///
    /// Returns the elapsed time of the frame in milliseconds.
    fn begin_frame(&mut self) -> f64 {
        let framerate = self.manager.framerate().unwrap_or(self.config.framerate);
        let fixed_framerate = match self.manager.fixed_framerate().unwrap_or(self.config.fixed_framerate) {
            0 => framerate,
            fixed => fixed,
        };
        self.scheduler.set_fixed_dt(FixedStepScheduler::dt_for_framerate(fixed_framerate));
        let busy_loop = self.config.busy_loop || self.manager.busy_loop();

        let elapsed = self.window.tick(framerate, busy_loop);
        self.window.pump_events();
        if self.collector.collect_frame() == TickControl::Exit {
            info!(target: "platform", "Window closed");
            self.window.close();
        }

        self.timing = FrameTiming {
            fps: self.window.fps(),
            delta_ms: elapsed,
            size: self.window.renderer().size(),
        };
        elapsed
    }

    /// Callbacks, events, fixed updates, interpolation and update.
    fn update_scene(&mut self, target: SceneRef<K>, elapsed: f64, step: FixedStep) -> SceneResult<K, W::Renderer> {
        if self.stuck_depth == 0 {
            let env = SceneEnv::new(&self.input, self.timing);
            self.manager.process_callbacks(target, elapsed, env)?;
        }

        let events = self.collector.take_events();
        self.input.begin_frame();
        let mut dispatched = Ok(());
        for event in &events {
            self.input.record(event);
            if dispatched.is_ok() {
                let env = SceneEnv::new(&self.input, self.timing);
                dispatched = self.manager.handle_event(target, event, env);
            }
        }
        self.input.end_frame();
        dispatched?;

        let env = SceneEnv::new(&self.input, self.timing);
        for _ in 0..step.ticks {
            self.manager.fixed_update(target, env)?;
        }
        self.manager.interpolation_update(target, step.alpha, env)?;
        self.manager.update(target, env)
    }

    //--- Signals ----------------------------------------------------------

    fn after_hook(&mut self, result: SceneResult<K, W::Renderer>) -> Result<Option<LoopSignal<K, W::Renderer>>, SceneError> {
        match result {
            Ok(()) => Ok(None),
            Err(signal) => self.handle_signal(signal),
        }
    }

    /// Turns a hook signal into the loop signal its owner must handle.
    ///
    /// Dialogs open synchronously here; their sub-loop returns once they
    /// close, or with the signal that ended it.
    fn handle_signal(&mut self, signal: SceneSignal<K, W::Renderer>) -> Result<Option<LoopSignal<K, W::Renderer>>, SceneError> {
        match signal {
            SceneSignal::Error(e) => Err(e),
            SceneSignal::OpenDialog { key, args } => self.open_dialog(key, args),
            signal => {
                let env = SceneEnv::new(&self.input, self.timing);
                match self.manager.resolve(signal, env)? {
                    LoopSignal::SameScene(key) => {
                        debug!(target: "scene", "Navigation to running scene {:?} ignored", key);
                        Ok(None)
                    }
                    resolved => Ok(Some(resolved)),
                }
            }
        }
    }

    //--- Scene Change -----------------------------------------------------

    fn scene_transition(&mut self, request: NavigationRequest<K, W::Renderer>) -> Result<Option<LoopSignal<K, W::Renderer>>, SceneError> {
        let NavigationRequest {
            previous,
            next,
            transition,
            closing,
        } = request;
        debug!(target: "scene", "Scene change {:?} -> {:?} (closing {:?})", previous, next, closing);

        for key in previous.iter().chain(closing.iter()) {
            let env = SceneEnv::new(&self.input, self.timing);
            during_transition(
                self.manager.quit_before_transition(SceneRef::Scene(*key), env),
                "on_quit_before_transition",
            )?;
        }

        let env = SceneEnv::new(&self.input, self.timing);
        during_transition(
            self.manager.start_loop_before_transition(SceneRef::Scene(next), env),
            "on_start_loop_before_transition",
        )?;

        if let (Some(previous), Some(half)) = (previous, transition.as_ref()) {
            driver::play(self, SceneRef::Scene(previous), SceneRef::Scene(next), half)?;
        }

        let env = SceneEnv::new(&self.input, self.timing);
        self.manager.closing_scenes(previous, &closing, env)?;

        if self.collector.clear() == TickControl::Exit {
            info!(target: "platform", "Window closed during scene change");
            self.window.close();
        }

        let env = SceneEnv::new(&self.input, self.timing);
        let started = self.manager.start_loop(SceneRef::Scene(next), env);
        self.restart_pacing();
        self.after_hook(started)
    }

    /// Drops the time spent outside the frame loop (loading, `awake`,
    /// `on_start_loop`) so it never turns into catch-up fixed updates.
    fn restart_pacing(&mut self) {
        self.scheduler.reset();
        self.window.restart_clock();
    }

    //--- Dialogs ----------------------------------------------------------

    /// Opens a dialog and runs its sub-loop until it closes.
    ///
    /// The dialog is quit and destroyed whatever ended the sub-loop.
    fn open_dialog(&mut self, key: K, args: SceneArgs) -> Result<Option<LoopSignal<K, W::Renderer>>, SceneError> {
        let env = SceneEnv::new(&self.input, self.timing);
        let index = self.manager.push_dialog(key, args, env)?;

        let outcome = self.dialog_loop(SceneRef::Dialog(index));

        let env = SceneEnv::new(&self.input, self.timing);
        let closed = self.manager.pop_dialog(env);

        match (outcome, closed) {
            (Ok(signal), Ok(())) => Ok(signal),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Err(closed)) => {
                error!(target: "scene", "Closing dialog {:?} after failure also failed: {}", key, closed);
                Err(e)
            }
            (Err(e), Ok(())) => Err(e),
        }
    }

    fn dialog_loop(&mut self, dialog: SceneRef<K>) -> Result<Option<LoopSignal<K, W::Renderer>>, SceneError> {
        let env = SceneEnv::new(&self.input, self.timing);
        during_transition(
            self.manager.start_loop_before_transition(dialog, env),
            "on_start_loop_before_transition",
        )?;
        self.play_dialog_transition(dialog, TransitionContext::Show)?;

        let env = SceneEnv::new(&self.input, self.timing);
        let started = self.manager.start_loop(dialog, env);
        let mut pending = self.after_hook(started)?;

        loop {
            match pending.take() {
                Some(LoopSignal::DialogStop) => {
                    let env = SceneEnv::new(&self.input, self.timing);
                    during_transition(
                        self.manager.quit_before_transition(dialog, env),
                        "on_quit_before_transition",
                    )?;
                    self.play_dialog_transition(dialog, TransitionContext::Hide)?;
                    return Ok(None);
                }
                Some(signal @ (LoopSignal::NewScene(_) | LoopSignal::Close)) => return Ok(Some(signal)),
                Some(LoopSignal::SameScene(_)) | None => {}
            }

            if !self.window.is_open() {
                return Ok(None);
            }
            pending = self.run_frame()?;
        }
    }

    /// Plays the dialog's entry (`Show`) or exit (`Hide`) transition
    /// against its master, if it has one.
    fn play_dialog_transition(&mut self, dialog: SceneRef<K>, context: TransitionContext) -> Result<(), SceneError> {
        let transition = match context {
            TransitionContext::Show => self.manager.entry_transition(dialog),
            TransitionContext::Hide => self.manager.exit_transition(dialog),
        };
        let (Some(transition), Some(master)) = (transition, self.manager.master_of(dialog)) else {
            return Ok(());
        };

        let half = transition.half(context);
        match context {
            TransitionContext::Show => driver::play(self, master, dialog, &half),
            TransitionContext::Hide => driver::play(self, dialog, master, &half),
        }
    }

    //--- Stuck State ------------------------------------------------------

    fn set_stuck_state(&mut self, stuck: bool) {
        if stuck {
            self.stuck_depth += 1;
            if self.stuck_depth == 1 {
                trace!(target: "platform::input", "Input suspended");
                self.collector.set_blocked(true);
                self.input.set_frozen(true);
                self.window.suspend_input();
            }
        } else if self.stuck_depth > 0 {
            self.stuck_depth -= 1;
            if self.stuck_depth == 0 {
                trace!(target: "platform::input", "Input resumed");
                self.collector.set_blocked(false);
                self.input.set_frozen(false);
                self.window.resume_input();
            }
        }
    }
}

//=== Transition Host =====================================================

impl<K: SceneKey, W: Window> TransitionHost for SceneWindow<K, W> {
    type Renderer = W::Renderer;
    type Frame = SceneRef<K>;

    fn renderer(&mut self) -> &mut W::Renderer {
        self.window.renderer()
    }

    fn draw_frame(&mut self, frame: SceneRef<K>) -> Result<(), SceneError> {
        self.manager.render(frame, self.window.renderer())
    }

    fn is_open(&self) -> bool {
        self.window.is_open()
    }

    fn next_step(&mut self) -> FixedStep {
        let elapsed = self.begin_frame();
        self.scheduler.advance(elapsed)
    }

    fn present(&mut self) {
        self.window.present();
    }

    fn set_stuck(&mut self, stuck: bool) {
        self.set_stuck_state(stuck);
    }
}

//=== Helpers =============================================================

/// Rejects navigation requested while a scene change is in progress.
fn during_transition<K: SceneKey, R: Renderer>(result: SceneResult<K, R>, hook: &str) -> Result<(), SceneError> {
    match result {
        Ok(()) => Ok(()),
        Err(SceneSignal::Error(e)) => Err(e),
        Err(signal) => Err(SceneError::NavigationDuringTransition(format!(
            "{} requested from {}",
            signal.name(),
            hook
        ))),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform_bridge::PlatformEvent;
    use crate::core::testing::{count, lifecycle, new_log, Log, RecordingScene, RecordingTransition, TestKey};
    use crate::core::transition::Transition;
    use crate::platform::HeadlessWindow;

    type TestWindow = SceneWindow<TestKey, HeadlessWindow>;

    fn headless(frames: u64) -> HeadlessWindow {
        HeadlessWindow::new(4, 4).with_frame_time(10.0).with_frame_limit(frames)
    }

    fn register_plain(window: &mut TestWindow, log: &Log, keys: &[(TestKey, &'static str)]) {
        for &(key, name) in keys {
            let log = log.clone();
            window.register_scene(key, move || RecordingScene::new(name, &log));
        }
    }

    //=====================================================================
    // SceneWindowBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = SceneWindowBuilder::new();
        assert_eq!(builder.config.framerate, 60);
        assert_eq!(builder.config.fixed_framerate, 50);
        assert!(!builder.config.busy_loop);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let window: TestWindow = SceneWindowBuilder::new()
            .with_framerate(120)
            .with_fixed_framerate(0)
            .with_busy_loop(true)
            .build(headless(1));

        assert_eq!(window.default_framerate(), 120);
        assert_eq!(window.default_fixed_framerate(), 0);
        assert!(window.config.busy_loop);
    }

    #[test]
    #[should_panic(expected = "Framerate must be positive")]
    fn builder_with_framerate_panics_on_zero() {
        SceneWindowBuilder::new().with_framerate(0);
    }

    //=====================================================================
    // Run Tests
    //=====================================================================

    #[test]
    fn run_refuses_a_closed_window() {
        let mut window: TestWindow = SceneWindow::new(headless(1));
        window.window_mut().close();

        assert!(matches!(window.run(TestKey::A, SceneArgs::new()), Err(SceneError::WindowClosed)));
    }

    #[test]
    fn run_with_unknown_scene_fails() {
        let mut window: TestWindow = SceneWindow::new(headless(1));

        assert!(matches!(window.run(TestKey::A, SceneArgs::new()), Err(SceneError::UnknownScene(_))));
        assert!(!window.is_running());
    }

    #[test]
    fn scene_change_with_transition_runs_the_full_protocol() {
        let log = new_log();
        let mut window: TestWindow = SceneWindow::new(headless(5));
        let slide = Transition::returning(RecordingTransition::new(&log, 2));
        {
            let log = log.clone();
            window.register_scene(TestKey::A, move || {
                let slide = slide.clone();
                RecordingScene::new("A", &log).with_update(move |ctx| {
                    ctx.start_with(SceneStart::new(TestKey::B).with_transition(slide.clone()))
                })
            });
        }
        register_plain(&mut window, &log, &[(TestKey::B, "B")]);

        window.run(TestKey::A, SceneArgs::new()).unwrap();

        assert_eq!(
            lifecycle(&log),
            vec![
                "A.awake",
                "A.start_loop_before",
                "A.start_loop",
                "B.awake",
                "A.quit_before",
                "B.start_loop_before",
                "T.init(Show)",
                "T.frame",
                "T.frame",
                "T.destroy",
                "A.quit",
                "B.start_loop",
                "B.quit",
                "B.destroy",
                "A.destroy",
            ]
        );
        // Three transition frames, then one regular frame of B.
        assert_eq!(window.window().presented(), 4);
        assert!(!window.is_stuck());
    }

    #[test]
    fn user_events_reach_the_running_scene() {
        let log = new_log();
        let mut window: TestWindow = SceneWindow::new(headless(1));
        register_plain(&mut window, &log, &[(TestKey::A, "A")]);

        window.post_event(InputEvent::User(7));
        window.run(TestKey::A, SceneArgs::new()).unwrap();

        assert_eq!(count(&log, "A.user(7)"), 1);
    }

    #[test]
    fn stale_events_are_dropped_after_a_scene_change() {
        let log = new_log();
        let window = headless(3);
        let sender = window.event_sender();
        let mut window: TestWindow = SceneWindow::new(window);
        {
            let log = log.clone();
            window.register_scene(TestKey::A, move || {
                let sender = sender.clone();
                RecordingScene::new("A", &log).with_update(move |ctx| {
                    let stale = PlatformEvent::Inputs {
                        discrete: vec![InputEvent::User(1)],
                        continuous: vec![],
                    };
                    sender.send(stale).map_err(SceneError::hook)?;
                    ctx.start(TestKey::B)
                })
            });
        }
        register_plain(&mut window, &log, &[(TestKey::B, "B")]);

        window.run(TestKey::A, SceneArgs::new()).unwrap();

        assert_eq!(count(&log, "B.start_loop"), 1);
        assert!(count(&log, "B.update") > 0);
        assert_eq!(count(&log, "B.user(1)"), 0);
    }

    #[test]
    fn stopping_the_last_scene_closes_the_window() {
        let log = new_log();
        let mut window: TestWindow = SceneWindow::new(headless(10));
        {
            let log = log.clone();
            window.register_scene(TestKey::A, move || RecordingScene::new("A", &log).with_update(|ctx| ctx.stop()));
        }

        window.run(TestKey::A, SceneArgs::new()).unwrap();

        assert!(!window.window().is_open());
        assert_eq!(window.window().ticks(), 1);
        assert_eq!(lifecycle(&log), vec!["A.awake", "A.start_loop_before", "A.start_loop", "A.quit", "A.destroy"]);
    }

    #[test]
    fn navigating_to_the_running_scene_keeps_looping() {
        let log = new_log();
        let mut window: TestWindow = SceneWindow::new(headless(3));
        {
            let log = log.clone();
            window.register_scene(TestKey::A, move || {
                RecordingScene::new("A", &log).with_update(|ctx| ctx.start(TestKey::A))
            });
        }

        window.run(TestKey::A, SceneArgs::new()).unwrap();

        assert_eq!(count(&log, "A.update"), 3);
        assert_eq!(lifecycle(&log), vec!["A.awake", "A.start_loop_before", "A.start_loop", "A.quit", "A.destroy"]);
    }

    #[test]
    fn slow_startup_does_not_burst_fixed_updates() {
        let log = new_log();
        // Real clock: the time spent before the loop must not be caught up.
        let mut window: TestWindow = SceneWindow::new(HeadlessWindow::new(4, 4).with_frame_limit(1));
        register_plain(&mut window, &log, &[(TestKey::A, "A")]);

        std::thread::sleep(std::time::Duration::from_millis(300));
        window.run(TestKey::A, SceneArgs::new()).unwrap();

        assert_eq!(count(&log, "A.update"), 1);
        assert!(count(&log, "A.fixed") <= 1, "{} fixed updates", count(&log, "A.fixed"));
    }

    #[test]
    fn navigation_during_a_transition_is_fatal() {
        let log = new_log();
        let mut window: TestWindow = SceneWindow::new(headless(10));
        {
            let log = log.clone();
            window.register_scene(TestKey::A, move || {
                RecordingScene::new("A", &log)
                    .with_update(|ctx| ctx.start(TestKey::B))
                    .with_quit_before(|ctx| ctx.start(TestKey::C))
            });
        }
        register_plain(&mut window, &log, &[(TestKey::B, "B"), (TestKey::C, "C")]);

        let result = window.run(TestKey::A, SceneArgs::new());

        assert!(matches!(result, Err(SceneError::NavigationDuringTransition(_))));
        assert_eq!(count(&log, "A.destroy"), 1);
        assert_eq!(count(&log, "B.destroy"), 1);
        assert_eq!(count(&log, "C.awake"), 0);
        assert!(!window.is_running());
    }

    //=====================================================================
    // Dialog Tests
    //=====================================================================

    #[test]
    fn dialog_runs_its_own_loop_and_returns_to_the_opener() {
        let log = new_log();
        let mut window: TestWindow = SceneWindow::new(headless(7));
        let fade = Transition::returning(RecordingTransition::new(&log, 1));
        {
            let log = log.clone();
            window.register_scene(TestKey::A, move || {
                let mut opened = false;
                RecordingScene::new("A", &log).with_update(move |ctx| {
                    if opened {
                        return Ok(());
                    }
                    opened = true;
                    ctx.open_dialog(TestKey::D1)
                })
            });
        }
        {
            let log = log.clone();
            window.register_dialog(TestKey::D1, move || {
                RecordingScene::new("D1", &log)
                    .with_dialog_transitions(Some(fade.clone()), Some(fade.clone()))
                    .with_update(|ctx| ctx.stop())
            });
        }

        window.run(TestKey::A, SceneArgs::new()).unwrap();

        assert_eq!(
            lifecycle(&log),
            vec![
                "A.awake",
                "A.start_loop_before",
                "A.start_loop",
                "D1.awake",
                "D1.start_loop_before",
                "T.init(Show)",
                "T.frame",
                "T.destroy",
                "D1.start_loop",
                "D1.quit_before",
                "T.init(Hide)",
                "T.frame",
                "T.destroy",
                "D1.quit",
                "D1.destroy",
                "A.quit",
                "A.destroy",
            ]
        );
        assert_eq!(window.manager().dialog_count(), 0);
    }

    #[test]
    fn scene_change_from_a_dialog_closes_it() {
        let log = new_log();
        let mut window: TestWindow = SceneWindow::new(headless(4));
        {
            let log = log.clone();
            window.register_scene(TestKey::A, move || {
                RecordingScene::new("A", &log).with_update(|ctx| ctx.open_dialog(TestKey::D1))
            });
        }
        register_plain(&mut window, &log, &[(TestKey::B, "B")]);
        {
            let log = log.clone();
            window.register_dialog(TestKey::D1, move || {
                RecordingScene::new("D1", &log).with_update(|ctx| ctx.start(TestKey::B))
            });
        }

        window.run(TestKey::A, SceneArgs::new()).unwrap();

        let entries = lifecycle(&log);
        let position = |entry: &str| entries.iter().position(|e| e == entry).unwrap();
        assert!(position("D1.destroy") < position("A.quit_before"));
        assert!(position("A.quit") < position("B.start_loop"));
        assert_eq!(count(&log, "D1.awake"), 1);
    }

    //=====================================================================
    // Stuck Tests
    //=====================================================================

    #[test]
    fn stuck_blocks_input_and_nests() {
        let mut window: TestWindow = SceneWindow::new(headless(1));

        window.stuck(|window| {
            assert!(window.is_stuck());
            window.stuck(|window| assert!(window.window().is_input_suspended()));
            assert!(window.is_stuck());
        });

        assert!(!window.is_stuck());
        assert!(!window.window().is_input_suspended());
    }

    #[test]
    fn frames_render_the_current_scene() {
        let log = new_log();
        let mut window: TestWindow = SceneWindow::new(headless(2));
        {
            let log = log.clone();
            let red = crate::core::render::Color::rgb(255, 0, 0);
            window.register_scene(TestKey::A, move || RecordingScene::new("A", &log).with_background(red));
        }

        window.run(TestKey::A, SceneArgs::new()).unwrap();

        assert_eq!(count(&log, "A.render"), 2);
        assert_eq!(count(&log, "A.update"), 2);
        assert_eq!(
            window.window_mut().renderer().display().pixel(3, 3),
            Some(crate::core::render::Color::rgb(255, 0, 0))
        );
    }
}
