//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit window events into engine InputEvents.
//
// Architecture:
//   WindowEvent → InputProcessor::process() → InputEvent → InputBuffer
//
// Modifier state is cached from ModifiersChanged and stamped on every
// subsequent key/button event. Key repeats and keys the engine does not
// map are filtered out.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== Constants ===========================================================

/// Pixels per wheel line, used to express touchpad deltas in lines.
const PIXELS_PER_LINE: f32 = 40.0;

//=== InputProcessor ======================================================

/// Stateful winit → engine event converter.
pub(crate) struct InputProcessor {
    current_modifiers: Modifiers,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            current_modifiers: Modifiers::NONE,
        }
    }

    //--- Dispatch ---------------------------------------------------------

    /// Converts one window event. Returns `None` for events the engine
    /// ignores or that only update internal state.
    pub(crate) fn process(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(state) => {
                self.update_modifiers(state.state());
                None
            }
            WindowEvent::KeyboardInput { event, .. } => self.process_key_event(event),
            WindowEvent::MouseInput { state, button, .. } => Some(self.process_mouse_button(*button, *state)),
            WindowEvent::CursorMoved { position, .. } => {
                Some(InputEvent::MouseMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                })
            }
            WindowEvent::MouseWheel { delta, .. } => Some(Self::process_wheel(*delta)),
            WindowEvent::Resized(size) => Some(InputEvent::Resized {
                width: size.width,
                height: size.height,
            }),
            WindowEvent::Focused(focused) => {
                if !focused {
                    self.current_modifiers = Modifiers::NONE;
                }
                Some(InputEvent::Focused(*focused))
            }
            _ => None,
        }
    }

    //--- Modifier State Management ----------------------------------------

    pub(crate) fn update_modifiers(&mut self, modifiers_state: ModifiersState) {
        self.current_modifiers = Modifiers::from(modifiers_state);
    }

    pub(crate) fn current_modifiers(&self) -> Modifiers {
        self.current_modifiers
    }

    //--- Event Conversion -------------------------------------------------

    fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }
        let key = match key_event.physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };
        if key == KeyCode::Unidentified {
            return None;
        }
        Some(self.key_input_event(key, key_event.state))
    }

    pub(crate) fn process_mouse_button(&self, button: WinitMouseButton, state: ElementState) -> InputEvent {
        let button = MouseButton::from(button);
        let modifiers = self.current_modifiers;

        match state {
            ElementState::Pressed => InputEvent::MouseButtonDown { button, modifiers },
            ElementState::Released => InputEvent::MouseButtonUp { button, modifiers },
        }
    }

    /// Wheel deltas are reported in lines; pixel deltas are scaled down.
    pub(crate) fn process_wheel(delta: MouseScrollDelta) -> InputEvent {
        match delta {
            MouseScrollDelta::LineDelta(x, y) => InputEvent::MouseWheel { x, y },
            MouseScrollDelta::PixelDelta(position) => InputEvent::MouseWheel {
                x: position.x as f32 / PIXELS_PER_LINE,
                y: position.y as f32 / PIXELS_PER_LINE,
            },
        }
    }

    pub(crate) fn key_input_event(&self, key: KeyCode, state: ElementState) -> InputEvent {
        let modifiers = self.current_modifiers;
        match state {
            ElementState::Pressed => InputEvent::KeyDown { key, modifiers },
            ElementState::Released => InputEvent::KeyUp { key, modifiers },
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Winit already folds macOS Cmd into Ctrl and Option into Alt.
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            Digit0 => KeyCode::Digit0, Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2, Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4, Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6, Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8, Digit9 => KeyCode::Digit9,

            KeyA => KeyCode::KeyA, KeyB => KeyCode::KeyB, KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD, KeyE => KeyCode::KeyE, KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG, KeyH => KeyCode::KeyH, KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ, KeyK => KeyCode::KeyK, KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM, KeyN => KeyCode::KeyN, KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP, KeyQ => KeyCode::KeyQ, KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS, KeyT => KeyCode::KeyT, KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV, KeyW => KeyCode::KeyW, KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY, KeyZ => KeyCode::KeyZ,

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            _ => KeyCode::Unidentified,
        }
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::{PhysicalPosition, PhysicalSize};

    fn make_modifiers(shift: bool, ctrl: bool, alt: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        if shift { state.insert(ModifiersState::SHIFT); }
        if ctrl { state.insert(ModifiersState::CONTROL); }
        if alt { state.insert(ModifiersState::ALT); }
        state
    }

    #[test]
    fn starts_with_no_modifiers() {
        let processor = InputProcessor::new();
        assert_eq!(processor.current_modifiers(), Modifiers::NONE);
    }

    #[test]
    fn modifiers_are_stamped_on_key_events() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(true, true, false));

        let event = processor.key_input_event(KeyCode::KeyS, ElementState::Released);

        assert_eq!(
            event,
            InputEvent::KeyUp {
                key: KeyCode::KeyS,
                modifiers: Modifiers { shift: true, ctrl: true, alt: false },
            }
        );
    }

    #[test]
    fn mouse_buttons_carry_modifiers() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(false, false, true));

        let event = processor.process_mouse_button(WinitMouseButton::Back, ElementState::Pressed);

        assert_eq!(
            event,
            InputEvent::MouseButtonDown { button: MouseButton::Other, modifiers: Modifiers::ALT }
        );
    }

    #[test]
    fn window_events_are_converted() {
        let mut processor = InputProcessor::new();

        assert_eq!(
            processor.process(&WindowEvent::Resized(PhysicalSize::new(640, 480))),
            Some(InputEvent::Resized { width: 640, height: 480 })
        );
        assert_eq!(
            processor.process(&WindowEvent::Focused(true)),
            Some(InputEvent::Focused(true))
        );
        assert_eq!(processor.process(&WindowEvent::CloseRequested), None);
    }

    #[test]
    fn losing_focus_resets_modifiers() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(true, false, false));

        processor.process(&WindowEvent::Focused(false));

        assert_eq!(processor.current_modifiers(), Modifiers::NONE);
    }

    #[test]
    fn pixel_wheel_deltas_are_scaled_to_lines() {
        let line = InputProcessor::process_wheel(MouseScrollDelta::LineDelta(0.0, 2.0));
        let pixel = InputProcessor::process_wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 80.0)));

        assert_eq!(line, InputEvent::MouseWheel { x: 0.0, y: 2.0 });
        assert_eq!(pixel, InputEvent::MouseWheel { x: 0.0, y: 2.0 });
    }

    #[test]
    fn keycode_conversion() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::NumpadEnter), KeyCode::Enter);
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
    }
}
