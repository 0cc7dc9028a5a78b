//=========================================================================
// Test Doubles
//=========================================================================
//
// Shared fixtures for unit tests: a scene that records its hooks, a
// scripted transition, and helpers to read the recorded order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::error::SceneError;
use crate::core::input::InputEvent;
use crate::core::render::{Color, FrameBuffer, Image, Renderer};
use crate::core::scene::{CallbackId, RenderContext, Scene, SceneArgs, SceneContext, SceneKey, SceneResult};
use crate::core::transition::{
    ReturningSceneTransition, SceneTransition, Transition, TransitionBody, TransitionContext, TransitionControl,
    TransitionResult,
};

//=== Keys & Log ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TestKey {
    A,
    B,
    C,
    D1,
    D2,
}

impl SceneKey for TestKey {}

pub(crate) type Log = Rc<RefCell<Vec<String>>>;

pub(crate) type Ctx<'a> = SceneContext<'a, TestKey, FrameBuffer>;

pub(crate) type TestResult = SceneResult<TestKey, FrameBuffer>;

pub(crate) type Hook = Box<dyn FnMut(&mut Ctx<'_>) -> TestResult>;

pub(crate) fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Entries excluding per-frame hooks (updates, renders, events).
pub(crate) fn lifecycle(log: &Log) -> Vec<String> {
    const FRAME_HOOKS: [&str; 6] = [".update", ".fixed", ".interp", ".render", ".event", ".callback"];
    log.borrow()
        .iter()
        .filter(|entry| !FRAME_HOOKS.iter().any(|hook| entry.ends_with(hook)))
        .cloned()
        .collect()
}

/// Number of entries equal to `entry`.
pub(crate) fn count(log: &Log, entry: &str) -> usize {
    log.borrow().iter().filter(|e| *e == entry).count()
}

//=== RecordingScene ======================================================

/// Scene logging every hook as `"<name>.<hook>"`.
pub(crate) struct RecordingScene {
    name: &'static str,
    log: Log,
    background: Option<Color>,
    draws: Option<TestKey>,
    framerate: u32,
    fixed_framerate: u32,
    fail_quit: bool,
    fail_destroy: bool,
    on_start_loop: Option<Hook>,
    on_update: Option<Hook>,
    on_quit_before: Option<Hook>,
    on_callback: Option<Box<dyn FnMut(&mut Ctx<'_>, CallbackId) -> TestResult>>,
    entry: Option<Transition<FrameBuffer>>,
    exit: Option<Transition<FrameBuffer>>,
}

impl RecordingScene {
    pub(crate) fn new(name: &'static str, log: &Log) -> Self {
        Self {
            name,
            log: Rc::clone(log),
            background: None,
            draws: None,
            framerate: 0,
            fixed_framerate: 0,
            fail_quit: false,
            fail_destroy: false,
            on_start_loop: None,
            on_update: None,
            on_quit_before: None,
            on_callback: None,
            entry: None,
            exit: None,
        }
    }

    pub(crate) fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Draws `key` underneath itself on every render.
    pub(crate) fn drawing(mut self, key: TestKey) -> Self {
        self.draws = Some(key);
        self
    }

    pub(crate) fn with_framerate(mut self, framerate: u32, fixed_framerate: u32) -> Self {
        self.framerate = framerate;
        self.fixed_framerate = fixed_framerate;
        self
    }

    pub(crate) fn failing_quit(mut self) -> Self {
        self.fail_quit = true;
        self
    }

    pub(crate) fn failing_destroy(mut self) -> Self {
        self.fail_destroy = true;
        self
    }

    pub(crate) fn with_start_loop(mut self, hook: impl FnMut(&mut Ctx<'_>) -> TestResult + 'static) -> Self {
        self.on_start_loop = Some(Box::new(hook));
        self
    }

    pub(crate) fn with_update(mut self, hook: impl FnMut(&mut Ctx<'_>) -> TestResult + 'static) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub(crate) fn with_quit_before(mut self, hook: impl FnMut(&mut Ctx<'_>) -> TestResult + 'static) -> Self {
        self.on_quit_before = Some(Box::new(hook));
        self
    }

    pub(crate) fn with_callback(
        mut self,
        hook: impl FnMut(&mut Ctx<'_>, CallbackId) -> TestResult + 'static,
    ) -> Self {
        self.on_callback = Some(Box::new(hook));
        self
    }

    pub(crate) fn with_dialog_transitions(
        mut self,
        entry: Option<Transition<FrameBuffer>>,
        exit: Option<Transition<FrameBuffer>>,
    ) -> Self {
        self.entry = entry;
        self.exit = exit;
        self
    }

    fn record(&self, hook: &str) {
        self.log.borrow_mut().push(format!("{}.{}", self.name, hook));
    }
}

impl Scene<TestKey, FrameBuffer> for RecordingScene {
    fn awake(&mut self, _ctx: &mut Ctx<'_>, args: &mut SceneArgs) -> Result<(), SceneError> {
        match args.get::<&'static str>("tag") {
            Some(tag) => self.record(&format!("awake({})", tag)),
            None => self.record("awake"),
        }
        Ok(())
    }

    fn on_restart(&mut self, _ctx: &mut Ctx<'_>, _args: &mut SceneArgs) -> Result<(), SceneError> {
        self.record("restart");
        Ok(())
    }

    fn on_start_loop_before_transition(&mut self, _ctx: &mut Ctx<'_>) -> TestResult {
        self.record("start_loop_before");
        Ok(())
    }

    fn on_start_loop(&mut self, ctx: &mut Ctx<'_>) -> TestResult {
        self.record("start_loop");
        match self.on_start_loop.as_mut() {
            Some(hook) => hook(ctx),
            None => Ok(()),
        }
    }

    fn on_quit_before_transition(&mut self, ctx: &mut Ctx<'_>) -> TestResult {
        self.record("quit_before");
        match self.on_quit_before.as_mut() {
            Some(hook) => hook(ctx),
            None => Ok(()),
        }
    }

    fn on_quit(&mut self, _ctx: &mut Ctx<'_>) -> TestResult {
        self.record("quit");
        if self.fail_quit {
            return Err(SceneError::msg(format!("{} quit failed", self.name)).into());
        }
        Ok(())
    }

    fn on_destroy(&mut self) -> Result<(), SceneError> {
        self.record("destroy");
        if self.fail_destroy {
            return Err(SceneError::msg(format!("{} destroy failed", self.name)));
        }
        Ok(())
    }

    fn handle_event(&mut self, _ctx: &mut Ctx<'_>, event: &InputEvent) -> TestResult {
        if let InputEvent::User(code) = event {
            self.log.borrow_mut().push(format!("{}.user({})", self.name, code));
        }
        self.record("event");
        Ok(())
    }

    fn fixed_update(&mut self, _ctx: &mut Ctx<'_>) -> TestResult {
        self.record("fixed");
        Ok(())
    }

    fn interpolation_update(&mut self, _ctx: &mut Ctx<'_>, _alpha: f64) -> TestResult {
        self.record("interp");
        Ok(())
    }

    fn update(&mut self, ctx: &mut Ctx<'_>) -> TestResult {
        self.record("update");
        match self.on_update.as_mut() {
            Some(hook) => hook(ctx),
            None => Ok(()),
        }
    }

    fn on_callback(&mut self, ctx: &mut Ctx<'_>, id: CallbackId) -> TestResult {
        self.record("callback");
        match self.on_callback.as_mut() {
            Some(hook) => hook(ctx, id),
            None => Ok(()),
        }
    }

    fn render(&mut self, ctx: &mut RenderContext<'_, TestKey, FrameBuffer>) -> Result<(), SceneError> {
        self.record("render");
        if let Some(key) = self.draws {
            ctx.draw_scene(key)?;
        }
        if let Some(color) = self.background {
            // Mark the top-left pixel so composited output can be inspected.
            ctx.renderer().target_mut().set_pixel(0, 0, color);
        }
        Ok(())
    }

    fn background_color(&self) -> Option<Color> {
        self.background
    }

    fn framerate(&self) -> u32 {
        self.framerate
    }

    fn fixed_framerate(&self) -> u32 {
        self.fixed_framerate
    }

    fn entry_transition(&self) -> Option<Transition<FrameBuffer>> {
        self.entry.clone()
    }

    fn exit_transition(&self) -> Option<Transition<FrameBuffer>> {
        self.exit.clone()
    }
}

//=== RecordingTransition =================================================

/// Transition logging `"T.init(<context>)"`, `"T.frame"` and `"T.destroy"`.
///
/// Stops after `frames` rendered frames. Draws the previous image at full
/// opacity, then the next one at the interpolation progress.
pub(crate) struct RecordingTransition {
    log: Log,
    frames: usize,
}

impl RecordingTransition {
    pub(crate) fn new(log: &Log, frames: usize) -> Self {
        Self { log: Rc::clone(log), frames }
    }

    fn body(&self, previous: Image, actual: Image) -> Box<dyn TransitionBody<FrameBuffer>> {
        Box::new(RecordingBody {
            log: Rc::clone(&self.log),
            remaining: self.frames,
            previous,
            actual,
            progress: 0.0,
        })
    }
}

impl SceneTransition<FrameBuffer> for RecordingTransition {
    fn init(&self, previous: Image, actual: Image) -> Result<Box<dyn TransitionBody<FrameBuffer>>, SceneError> {
        self.log.borrow_mut().push("T.init".into());
        Ok(self.body(previous, actual))
    }
}

impl ReturningSceneTransition<FrameBuffer> for RecordingTransition {
    fn init(
        &self,
        previous: Image,
        actual: Image,
        context: TransitionContext,
    ) -> Result<Box<dyn TransitionBody<FrameBuffer>>, SceneError> {
        self.log.borrow_mut().push(format!("T.init({:?})", context));
        Ok(self.body(previous, actual))
    }
}

struct RecordingBody {
    log: Log,
    remaining: usize,
    previous: Image,
    actual: Image,
    progress: f32,
}

impl TransitionBody<FrameBuffer> for RecordingBody {
    fn update(&mut self) -> TransitionResult {
        if self.remaining == 0 {
            return Ok(TransitionControl::Stop);
        }
        self.remaining -= 1;
        self.progress = (self.progress + 0.5).min(1.0);
        Ok(TransitionControl::Continue)
    }

    fn render(&mut self, renderer: &mut FrameBuffer) -> Result<(), SceneError> {
        self.log.borrow_mut().push("T.frame".into());
        renderer.clear(Color::BLACK, false);
        renderer.draw_image(&self.previous, (0.0, 0.0), 1.0);
        renderer.draw_image(&self.actual, (0.0, 0.0), self.progress);
        Ok(())
    }

    fn destroy(&mut self) {
        self.log.borrow_mut().push("T.destroy".into());
    }
}
