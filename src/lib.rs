//=========================================================================
// Diamond Engine — Library Root
//
// Scene lifecycle and transition engine for 2D games.
//
// Responsibilities:
// - Expose the scene loop (`SceneWindow`) and its builder
// - Expose the window backends (`WinitWindow`, `HeadlessWindow`)
// - Keep the scene core usable without any OS window
//
// Typical usage:
// ```no_run
// use diamond_engine::prelude::*;
// use diamond_engine::{WindowConfig, WinitWindow};
//
// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
// enum Key { Title }
// impl SceneKey for Key {}
//
// struct Title;
// impl Scene<Key, FrameBuffer> for Title {
//     fn render(&mut self, ctx: &mut RenderContext<'_, Key, FrameBuffer>) -> Result<(), SceneError> {
//         ctx.renderer().clear(Color::WHITE, false);
//         Ok(())
//     }
// }
//
// fn main() -> Result<(), SceneError> {
//     let window = WinitWindow::new(WindowConfig::new("Diamond", 640, 480))?;
//     let mut scenes = SceneWindow::new(window);
//     scenes.register_scene(Key::Title, || Title);
//     scenes.run(Key::Title, SceneArgs::new())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the scene system and everything it needs; it is public so
// applications can implement their own `Window` or `Renderer`.
//
// `platform` holds the concrete window backends.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` defines the scene loop driving a window.
//
mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{SceneWindow, SceneWindowBuilder};
pub use platform::{CloseBehavior, HeadlessWindow, WindowConfig};

#[cfg(any(target_os = "windows", target_os = "macos", target_os = "linux", target_os = "android"))]
pub use platform::WinitWindow;
