//=========================================================================
// Input Events
//
// Backend-independent representation of the events a scene receives.
//
// Responsibilities:
// - Represent keyboard, mouse and window events in a portable way
// - Carry modifier state alongside discrete key/button events
// - Provide a user-event variant for events posted by the application
//
// Event Flow:
// ```text
// Platform Backend (winit / headless)
//         ↓  PlatformEvent::Inputs
//    EventCollector (frame queue)
//         ↓
//    InputState (held keys/buttons) + Scene::handle_event()
// ```
//
//=========================================================================

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Side buttons, thumb buttons and anything else.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier (layout independent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Key reported by the platform but not mapped by the engine.
    Unidentified,
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt), left and right merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };
}

//=== InputEvent ==========================================================

/// Event delivered to the running scene.
///
/// Discrete events (keys, buttons, window changes) keep their order.
/// Continuous events (`MouseMoved`) may be coalesced by the backend so that
/// only the latest position of a frame survives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown { key: KeyCode, modifiers: Modifiers },
    KeyUp { key: KeyCode, modifiers: Modifiers },
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },

    /// Cursor position in window pixels, top-left origin.
    MouseMoved { x: f32, y: f32 },

    /// Wheel rotation in lines (positive `y` scrolls up).
    MouseWheel { x: f32, y: f32 },

    /// The drawable area changed size.
    Resized { width: u32, height: u32 },

    /// The window gained (`true`) or lost (`false`) focus.
    Focused(bool),

    /// Application-defined event posted through `SceneWindow::post_event`.
    User(u32),

    /// Platform event the engine does not model.
    Unidentified,
}

impl InputEvent {
    /// Continuous events may be merged with a later event of the same kind.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MouseMoved { .. })
    }

    /// Keyboard and mouse events, as opposed to window and user events.
    ///
    /// Only these are dropped while input handling is suspended.
    pub fn is_device_input(&self) -> bool {
        matches!(
            self,
            Self::KeyDown { .. }
                | Self::KeyUp { .. }
                | Self::MouseButtonDown { .. }
                | Self::MouseButtonUp { .. }
                | Self::MouseMoved { .. }
                | Self::MouseWheel { .. }
        )
    }

    /// Modifier state carried by the event, if any.
    pub fn modifiers(&self) -> Option<Modifiers> {
        match self {
            Self::KeyDown { modifiers, .. }
            | Self::KeyUp { modifiers, .. }
            | Self::MouseButtonDown { modifiers, .. }
            | Self::MouseButtonUp { modifiers, .. } => Some(*modifiers),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
