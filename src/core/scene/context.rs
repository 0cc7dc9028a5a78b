//=========================================================================
// Scene Context
//=========================================================================
//
// Handle given to every scene hook.
//
// Navigation helpers build the `SceneSignal` the hook returns; they never
// act immediately:
//
// ```ignore
// fn update(&mut self, ctx: &mut SceneContext<'_, Key, FrameBuffer>) -> SceneResult<Key, FrameBuffer> {
//     if ctx.input().is_key_pressed(KeyCode::Enter) {
//         return ctx.start(Key::Game);
//     }
//     Ok(())
// }
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::marker::PhantomData;

//=== Internal Dependencies ===============================================

use super::callbacks::{CallbackId, SceneCallbacks};
use super::scene_manager::SceneManager;
use super::signal::{SceneResult, SceneSignal, SceneStart};
use super::{SceneArgs, SceneKey, SceneKind};
use crate::core::error::SceneError;
use crate::core::input::InputState;
use crate::core::render::Renderer;

//=== SceneEnv ============================================================

/// Per-frame values shared by every context created during a frame.
#[derive(Debug, Clone, Copy)]
pub struct SceneEnv<'a> {
    pub(crate) input: &'a InputState,
    pub(crate) timing: FrameTiming,
}

impl<'a> SceneEnv<'a> {
    pub fn new(input: &'a InputState, timing: FrameTiming) -> Self {
        Self { input, timing }
    }
}

/// Timing and surface facts of the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTiming {
    pub fps: f64,
    pub delta_ms: f64,
    pub size: (u32, u32),
}

//=== SceneContext ========================================================

pub struct SceneContext<'a, K: SceneKey, R: Renderer> {
    key: K,
    kind: SceneKind,
    looping: bool,
    pub(crate) callbacks: &'a mut SceneCallbacks,
    env: SceneEnv<'a>,
    _renderer: PhantomData<fn(&mut R)>,
}

impl<'a, K: SceneKey, R: Renderer> SceneContext<'a, K, R> {
    pub(crate) fn new(
        key: K,
        kind: SceneKind,
        looping: bool,
        callbacks: &'a mut SceneCallbacks,
        env: SceneEnv<'a>,
    ) -> Self {
        Self {
            key,
            kind,
            looping,
            callbacks,
            env,
            _renderer: PhantomData,
        }
    }

    //--- Navigation -------------------------------------------------------

    /// Starts `key` without transition.
    pub fn start(&self, key: K) -> SceneResult<K, R> {
        Err(SceneSignal::GoTo(SceneStart::new(key)))
    }

    /// Starts a scene with a transition, arguments or `stop_self`.
    pub fn start_with(&self, start: SceneStart<K, R>) -> SceneResult<K, R> {
        Err(SceneSignal::GoTo(start))
    }

    /// Returns to the previous scene, or closes this dialog.
    ///
    /// Stopping the last scene closes the window.
    pub fn stop(&self) -> SceneResult<K, R> {
        Err(SceneSignal::GoBack)
    }

    /// Opens a dialog over the current scene or dialog.
    ///
    /// The current hook ends; the frame resumes at its render step once
    /// the dialog closes.
    pub fn open_dialog(&self, key: K) -> SceneResult<K, R> {
        self.open_dialog_with(key, SceneArgs::new())
    }

    pub fn open_dialog_with(&self, key: K, args: SceneArgs) -> SceneResult<K, R> {
        Err(SceneSignal::OpenDialog { key, args })
    }

    pub fn close_window(&self) -> SceneResult<K, R> {
        Err(SceneSignal::CloseWindow)
    }

    //--- Callbacks --------------------------------------------------------

    /// Schedules `Scene::on_callback` after `delay_ms` of looping time.
    pub fn after(&mut self, delay_ms: f64) -> CallbackId {
        self.callbacks.after(delay_ms)
    }

    /// Schedules `Scene::on_callback` now and then every `period_ms`.
    pub fn every(&mut self, period_ms: f64) -> CallbackId {
        self.callbacks.every(period_ms)
    }

    pub fn cancel(&mut self, id: CallbackId) -> bool {
        self.callbacks.cancel(id)
    }

    //--- Queries ----------------------------------------------------------

    pub fn key(&self) -> K {
        self.key
    }

    pub fn is_dialog(&self) -> bool {
        self.kind == SceneKind::Dialog
    }

    /// Returns `true` if this scene is the one receiving updates.
    pub fn looping(&self) -> bool {
        self.looping
    }

    pub fn input(&self) -> &InputState {
        self.env.input
    }

    pub fn fps(&self) -> f64 {
        self.env.timing.fps
    }

    /// Real time of the last frame, in milliseconds.
    pub fn delta_ms(&self) -> f64 {
        self.env.timing.delta_ms
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.env.timing.size
    }
}

//=== RenderContext =======================================================

/// Handle given to `Scene::render`: the renderer, plus access to the
/// scenes below in the stack.
///
/// ```ignore
/// fn render(&mut self, ctx: &mut RenderContext<'_, Key, FrameBuffer>) -> Result<(), SceneError> {
///     ctx.draw_scene(Key::Game)?;
///     ctx.renderer().draw_image(&self.veil, (0.0, 0.0), 0.5);
///     Ok(())
/// }
/// ```
pub struct RenderContext<'a, K: SceneKey, R: Renderer> {
    key: K,
    renderer: &'a mut R,
    manager: &'a mut SceneManager<K, R>,
}

impl<'a, K: SceneKey, R: Renderer> RenderContext<'a, K, R> {
    pub(crate) fn new(key: K, renderer: &'a mut R, manager: &'a mut SceneManager<K, R>) -> Self {
        Self { key, renderer, manager }
    }

    pub fn renderer(&mut self) -> &mut R {
        &mut *self.renderer
    }

    /// Key of the scene being rendered.
    pub fn key(&self) -> K {
        self.key
    }

    /// Draws another started scene (not a dialog, not the looping one)
    /// without filling its background.
    ///
    /// # Errors
    ///
    /// [`SceneError::Draw`] for a scene that cannot be drawn, or the
    /// failure of its `render`.
    pub fn draw_scene(&mut self, key: K) -> Result<(), SceneError> {
        self.manager.draw_scene(key, &mut *self.renderer)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
