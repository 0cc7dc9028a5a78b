//=========================================================================
// Scene System
//=========================================================================
//
// Scene lifecycle, scene/dialog stacks and navigation.
//
// Architecture:
//   SceneManager
//     ├─ registry: HashMap<K, factory + SceneKind>
//     ├─ scenes:   HashMap<K, SceneSlot>   (cached scene instances)
//     ├─ stack:    Vec<K>                  (top = last)
//     ├─ dialogs:  Vec<SceneSlot>          (top = last, never cached)
//     └─ returning transitions per key
//
// Lifecycle:
//   (uncreated) → awake → Awaken → on_start_loop → Looping
//   Looping → on_quit → Suspended → on_restart → … → Looping
//   any → on_quit (unless Suspended) → on_destroy → Destroyed
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use crate::core::error::SceneError;
use crate::core::input::InputEvent;
use crate::core::render::{Color, Renderer};
use crate::core::transition::Transition;

//=== Module Declarations =================================================

mod args;
mod callbacks;
mod context;
mod scene_manager;
mod signal;

//=== Public API ==========================================================

pub use args::SceneArgs;
pub use callbacks::{CallbackId, SceneCallbacks};
pub use context::{FrameTiming, RenderContext, SceneContext, SceneEnv};
pub use scene_manager::{SceneManager, SceneRef};
pub use signal::{LoopSignal, NavigationRequest, SceneResult, SceneSignal, SceneStart};

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// A key names one scene (at most one live instance per manager) or one
/// dialog type. Typically implemented by an application enum.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + 'static {}

//=== SceneKind ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneKind {
    /// Full-screen scene living in the scene stack.
    Scene,

    /// Modal overlay living in the dialog stack.
    Dialog,
}

//=== SceneState ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneState {
    /// `awake` ran; the loop has not started yet.
    Awaken,

    /// Receiving updates (or about to, once its transition ends).
    Looping,

    /// Left through a navigation; `on_quit` ran.
    Suspended,

    /// `on_destroy` ran. The instance is gone.
    Destroyed,
}

//=== Scene Trait =========================================================

/// Behaviour of a scene or dialog.
///
/// Only `render` is required. Hooks that may navigate return
/// [`SceneResult`]; the others can only fail.
///
/// # Minimal Implementation
///
/// ```rust
/// # use diamond_engine::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum Key { Title }
/// # impl SceneKey for Key {}
/// struct Title;
///
/// impl Scene<Key, FrameBuffer> for Title {
///     fn render(&mut self, ctx: &mut RenderContext<'_, Key, FrameBuffer>) -> Result<(), SceneError> {
///         ctx.renderer().clear(Color::WHITE, false);
///         Ok(())
///     }
/// }
/// ```
pub trait Scene<K: SceneKey, R: Renderer> {
    //--- Lifecycle --------------------------------------------------------

    /// First navigation to the scene. Runs once per instance.
    fn awake(&mut self, _ctx: &mut SceneContext<'_, K, R>, _args: &mut SceneArgs) -> Result<(), SceneError> {
        Ok(())
    }

    /// Navigation to a cached instance.
    fn on_restart(&mut self, _ctx: &mut SceneContext<'_, K, R>, _args: &mut SceneArgs) -> Result<(), SceneError> {
        Ok(())
    }

    /// Runs before the scene is captured for its entry transition.
    fn on_start_loop_before_transition(&mut self, _ctx: &mut SceneContext<'_, K, R>) -> SceneResult<K, R> {
        Ok(())
    }

    /// Runs once the scene receives updates.
    fn on_start_loop(&mut self, _ctx: &mut SceneContext<'_, K, R>) -> SceneResult<K, R> {
        Ok(())
    }

    /// Runs before the scene is captured for its exit transition.
    fn on_quit_before_transition(&mut self, _ctx: &mut SceneContext<'_, K, R>) -> SceneResult<K, R> {
        Ok(())
    }

    /// The scene stops receiving updates.
    fn on_quit(&mut self, _ctx: &mut SceneContext<'_, K, R>) -> SceneResult<K, R> {
        Ok(())
    }

    /// The instance leaves every stack for good.
    fn on_destroy(&mut self) -> Result<(), SceneError> {
        Ok(())
    }

    //--- Frame ------------------------------------------------------------

    fn handle_event(&mut self, _ctx: &mut SceneContext<'_, K, R>, _event: &InputEvent) -> SceneResult<K, R> {
        Ok(())
    }

    fn fixed_update(&mut self, _ctx: &mut SceneContext<'_, K, R>) -> SceneResult<K, R> {
        Ok(())
    }

    /// `alpha` is the position between the last two fixed updates.
    fn interpolation_update(&mut self, _ctx: &mut SceneContext<'_, K, R>, _alpha: f64) -> SceneResult<K, R> {
        Ok(())
    }

    fn update(&mut self, _ctx: &mut SceneContext<'_, K, R>) -> SceneResult<K, R> {
        Ok(())
    }

    /// A callback scheduled with `after` or `every` is due.
    fn on_callback(&mut self, _ctx: &mut SceneContext<'_, K, R>, _id: CallbackId) -> SceneResult<K, R> {
        Ok(())
    }

    /// Draws the scene. The background color is already filled.
    fn render(&mut self, ctx: &mut RenderContext<'_, K, R>) -> Result<(), SceneError>;

    //--- Presentation -----------------------------------------------------

    /// Fill color behind the scene.
    ///
    /// `None` means black for scenes and transparent for dialogs.
    fn background_color(&self) -> Option<Color> {
        None
    }

    /// Preferred frame rate; `0` defers to the scenes below or the window.
    fn framerate(&self) -> u32 {
        0
    }

    /// Preferred fixed-update rate; `0` defers like `framerate`.
    fn fixed_framerate(&self) -> u32 {
        0
    }

    /// Requests spin-wait pacing while this scene is on top.
    fn busy_loop(&self) -> bool {
        false
    }

    /// Transition played when this dialog opens (dialogs only).
    fn entry_transition(&self) -> Option<Transition<R>> {
        None
    }

    /// Transition played when this dialog closes (dialogs only).
    fn exit_transition(&self) -> Option<Transition<R>> {
        None
    }
}
