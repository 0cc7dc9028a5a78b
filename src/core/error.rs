//=========================================================================
// Scene Errors
//=========================================================================
//
// Error type shared by the scene manager, the transition driver and the
// window loop.
//
// Navigation itself is not an error: scene hooks request it through
// `SceneSignal` values. `SceneError` covers misuse of the API, failures
// reported by user hooks, and backend failures.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::error::Error;
use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::PlatformError;

//=== SceneError ==========================================================

#[derive(Debug)]
pub enum SceneError {
    /// No factory was registered for the key.
    UnknownScene(String),

    /// `go_to` was called with a key registered as a dialog.
    DialogNavigation(String),

    /// `open_dialog` was called with a key registered as a scene.
    SceneNavigationToDialog(String),

    /// A dialog was opened while no scene is running.
    NoSceneForDialog(String),

    /// `run()` was called while the window is already running.
    AlreadyRunning,

    /// `run()` was called on a closed window.
    WindowClosed,

    /// A hook requested navigation while a transition was being set up or
    /// played.
    NavigationDuringTransition(String),

    /// A control-flow signal reached a loop that cannot handle it.
    SignalEscaped(String),

    /// `draw_scene` was asked for a scene that cannot be drawn.
    Draw(String),

    /// Failure reported by user code.
    Hook(Box<dyn Error>),

    /// Window backend failure.
    Platform(PlatformError),

    /// Every failure observed while tearing the stacks down.
    Teardown(Vec<SceneError>),
}

impl SceneError {
    /// Wraps an arbitrary error raised by a scene or transition.
    pub fn hook<E>(error: E) -> Self
    where
        E: Into<Box<dyn Error>>,
    {
        Self::Hook(error.into())
    }

    /// Builds a hook failure from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Hook(message.into().into())
    }
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownScene(key) => write!(f, "Scene {} is not registered", key),
            Self::DialogNavigation(key) => {
                write!(f, "{} is a dialog and must be opened with open_dialog()", key)
            }
            Self::SceneNavigationToDialog(key) => {
                write!(f, "{} is a scene and must be started with start()", key)
            }
            Self::NoSceneForDialog(key) => {
                write!(f, "Trying to open dialog {} without open scene", key)
            }
            Self::AlreadyRunning => write!(f, "SceneWindow already running"),
            Self::WindowClosed => write!(f, "Window not open"),
            Self::NavigationDuringTransition(what) => {
                write!(f, "Navigation is forbidden during a scene transition ({})", what)
            }
            Self::SignalEscaped(what) => write!(f, "Unhandled scene signal: {}", what),
            Self::Draw(what) => write!(f, "Cannot draw scene: {}", what),
            Self::Hook(e) => write!(f, "Scene hook failed: {}", e),
            Self::Platform(e) => write!(f, "Platform error: {}", e),
            Self::Teardown(errors) => {
                write!(f, "{} scene(s) failed during teardown", errors.len())?;
                for error in errors {
                    write!(f, "; {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl Error for SceneError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Hook(e) => Some(e.as_ref()),
            Self::Platform(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlatformError> for SceneError {
    fn from(error: PlatformError) -> Self {
        Self::Platform(error)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
