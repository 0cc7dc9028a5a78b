//=========================================================================
// Navigation Signals
//=========================================================================
//
// Control flow between scene hooks, the scene manager and the loops.
//
// Architecture:
//   Scene hook ──Err(SceneSignal)──> SceneWindow
//      GoTo / GoBack ──> SceneManager::resolve() ──> LoopSignal
//      OpenDialog    ──> dialog sub-loop (synchronous)
//      CloseWindow   ──> LoopSignal::Close
//      Error         ──> propagated as SceneError
//
//   LoopSignal::NewScene   → main loop (transition protocol)
//   LoopSignal::SameScene  → ignored
//   LoopSignal::DialogStop → innermost dialog sub-loop
//   LoopSignal::Close      → window closed
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::{SceneArgs, SceneKey};
use crate::core::error::SceneError;
use crate::core::render::Renderer;
use crate::core::transition::{Transition, TransitionHalf};

//=== SceneStart ==========================================================

/// A request to start a scene, with its options.
pub struct SceneStart<K: SceneKey, R: Renderer> {
    pub(crate) key: K,
    pub(crate) transition: Option<Transition<R>>,
    pub(crate) remove_actual: bool,
    pub(crate) args: SceneArgs,
}

impl<K: SceneKey, R: Renderer> SceneStart<K, R> {
    pub fn new(key: K) -> Self {
        Self {
            key,
            transition: None,
            remove_actual: false,
            args: SceneArgs::new(),
        }
    }

    /// Plays `transition` when switching.
    pub fn with_transition(mut self, transition: Transition<R>) -> Self {
        self.transition = Some(transition);
        self
    }

    /// Removes the current scene from the stack once the new one runs.
    pub fn stop_self(mut self) -> Self {
        self.remove_actual = true;
        self
    }

    /// Adds a named argument for `awake` / `on_restart`.
    pub fn arg<T: 'static>(mut self, name: &'static str, value: T) -> Self {
        self.args.insert(name, value);
        self
    }

    pub fn with_args(mut self, args: SceneArgs) -> Self {
        self.args = args;
        self
    }

    pub fn key(&self) -> K {
        self.key
    }
}

impl<K: SceneKey, R: Renderer> fmt::Debug for SceneStart<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneStart")
            .field("key", &self.key)
            .field("transition", &self.transition)
            .field("remove_actual", &self.remove_actual)
            .field("args", &self.args)
            .finish()
    }
}

//=== SceneSignal =========================================================

/// Request returned by a scene hook instead of `Ok(())`.
pub enum SceneSignal<K: SceneKey, R: Renderer> {
    GoTo(SceneStart<K, R>),
    GoBack,
    OpenDialog { key: K, args: SceneArgs },
    CloseWindow,
    Error(SceneError),
}

/// Return type of the scene hooks that may navigate.
pub type SceneResult<K, R> = Result<(), SceneSignal<K, R>>;

impl<K: SceneKey, R: Renderer> SceneSignal<K, R> {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GoTo(_) => "start scene",
            Self::GoBack => "stop scene",
            Self::OpenDialog { .. } => "open dialog",
            Self::CloseWindow => "close window",
            Self::Error(_) => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl<K: SceneKey, R: Renderer> From<SceneError> for SceneSignal<K, R> {
    fn from(error: SceneError) -> Self {
        Self::Error(error)
    }
}

impl<K: SceneKey, R: Renderer> fmt::Debug for SceneSignal<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoTo(start) => f.debug_tuple("GoTo").field(start).finish(),
            Self::GoBack => f.write_str("GoBack"),
            Self::OpenDialog { key, args } => f
                .debug_struct("OpenDialog")
                .field("key", key)
                .field("args", args)
                .finish(),
            Self::CloseWindow => f.write_str("CloseWindow"),
            Self::Error(e) => f.debug_tuple("Error").field(e).finish(),
        }
    }
}

//=== NavigationRequest ===================================================

/// Resolved scene change, consumed by the main loop.
pub struct NavigationRequest<K: SceneKey, R: Renderer> {
    /// Scene running before the change (`None` only for the first scene).
    pub previous: Option<K>,

    /// Scene running after the change.
    pub next: K,

    /// Transition half to play, if any.
    pub transition: Option<TransitionHalf<R>>,

    /// Scenes popped from the stack besides `previous`, nearest first.
    pub closing: Vec<K>,
}

impl<K: SceneKey, R: Renderer> fmt::Debug for NavigationRequest<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationRequest")
            .field("previous", &self.previous)
            .field("next", &self.next)
            .field("transition", &self.transition)
            .field("closing", &self.closing)
            .finish()
    }
}

//=== LoopSignal ==========================================================

/// Outcome of resolving a navigation signal.
pub enum LoopSignal<K: SceneKey, R: Renderer> {
    NewScene(NavigationRequest<K, R>),

    /// Navigation to the scene already running. No hook was called.
    SameScene(K),

    /// The topmost dialog asked to close.
    DialogStop,

    /// The window must close.
    Close,
}

impl<K: SceneKey, R: Renderer> fmt::Debug for LoopSignal<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewScene(request) => f.debug_tuple("NewScene").field(request).finish(),
            Self::SameScene(key) => f.debug_tuple("SameScene").field(key).finish(),
            Self::DialogStop => f.write_str("DialogStop"),
            Self::Close => f.write_str("Close"),
        }
    }
}
