//=========================================================================
// Prelude
//=========================================================================
//
// Everything a game needs to write scenes and transitions:
//
// ```ignore
// use diamond_engine::prelude::*;
// ```
//
//=========================================================================

pub use crate::core::error::SceneError;
pub use crate::core::input::{InputEvent, InputState, KeyCode, Modifiers, MouseButton};
pub use crate::core::platform_bridge::Window;
pub use crate::core::render::{Color, FrameBuffer, Image, Renderer};
pub use crate::core::scene::{
    CallbackId, RenderContext, Scene, SceneArgs, SceneContext, SceneKey, SceneResult, SceneStart,
};
pub use crate::core::transition::{
    ReturningSceneTransition, SceneTransition, Transition, TransitionBody, TransitionContext, TransitionControl,
    TransitionResult,
};
pub use crate::engine::{SceneWindow, SceneWindowBuilder};
pub use crate::platform::HeadlessWindow;
