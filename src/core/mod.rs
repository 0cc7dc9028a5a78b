//=========================================================================
// Core Systems
//
// Backend-independent half of the engine: scenes and their lifecycle,
// transitions, frame pacing, input state and the contract window
// backends implement.
//
// Architecture:
// ```text
//   platform_bridge ──PlatformEvent──> EventCollector ──InputEvent──> scene
//   time            ──FixedStep──────> SceneWindow frame loop
//   scene           ──SceneSignal────> SceneManager ──LoopSignal──> loop
//   transition      ──TransitionHalf─> driver (captures, stuck window)
//   render          ──Renderer───────> scenes, dialogs, transitions
// ```
//
// Notes:
// Nothing in here knows about winit. Backends live in `crate::platform`
// and talk to the core only through the `Window` trait and the event
// channel.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod error;
pub mod input;
pub mod platform_bridge;
pub mod render;
pub mod scene;
pub mod time;
pub mod transition;

#[cfg(test)]
pub(crate) mod testing;
