//=========================================================================
// Input State
//=========================================================================
//
// Held keys/buttons and per-frame edges, queried by scenes through their
// context.
//
// Architecture:
//   InputEvent → record() → HashSet (keys/buttons held) → query
//
// Frame lifecycle: begin_frame() → record()* → end_frame() → query
//
// While frozen (window stuck during a transition) the state ignores every
// event, so a key released during a transition still reads as held
// afterwards until its release is observed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== InputState ==========================================================

/// Persistent input state plus the edges observed during the last frame.
#[derive(Debug, Default)]
pub struct InputState {
    //--- Persistent State ------------------------------------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,

    //--- Frame Deltas ----------------------------------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    frame_start_position: (f32, f32),
    mouse_delta: (f32, f32),

    frozen: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Forgets the previous frame's edges.
    pub(crate) fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.frame_start_position = self.mouse_position;
    }

    /// Applies one event. Ignored while frozen.
    pub(crate) fn record(&mut self, event: &InputEvent) {
        if self.frozen {
            return;
        }

        if let Some(modifiers) = event.modifiers() {
            self.modifiers = modifiers;
        }

        match *event {
            InputEvent::KeyDown { key, .. } => {
                if self.keys_down.insert(key) {
                    self.keys_pressed.insert(key);
                }
            }
            InputEvent::KeyUp { key, .. } => {
                if self.keys_down.remove(&key) {
                    self.keys_released.insert(key);
                }
            }
            InputEvent::MouseButtonDown { button, .. } => {
                if self.buttons_down.insert(button) {
                    self.buttons_pressed.insert(button);
                }
            }
            InputEvent::MouseButtonUp { button, .. } => {
                if self.buttons_down.remove(&button) {
                    self.buttons_released.insert(button);
                }
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (x, y);
            }
            // Losing focus means releases will never be reported.
            InputEvent::Focused(false) => {
                self.keys_down.clear();
                self.buttons_down.clear();
                self.modifiers = Modifiers::NONE;
            }
            _ => {}
        }
    }

    /// Computes the mouse delta of the frame.
    pub(crate) fn end_frame(&mut self) {
        self.mouse_delta = (
            self.mouse_position.0 - self.frame_start_position.0,
            self.mouse_position.1 - self.frame_start_position.1,
        );
    }

    //--- Freezing ---------------------------------------------------------

    /// Stops or resumes tracking. Freezing also drops pending edges.
    pub(crate) fn set_frozen(&mut self, frozen: bool) {
        if frozen && !self.frozen {
            self.begin_frame();
            self.mouse_delta = (0.0, 0.0);
        }
        self.frozen = frozen;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// Returns `true` if the key went down during the last frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns `true` while the key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if the key went up during the last frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    /// Mouse position in window pixels, top-left origin.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Mouse movement during the last frame.
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    fn frame(state: &mut InputState, events: &[InputEvent]) {
        state.begin_frame();
        for event in events {
            state.record(event);
        }
        state.end_frame();
    }

    #[test]
    fn key_press_is_an_edge_and_a_hold() {
        let mut state = InputState::new();

        frame(&mut state, &[key_down(KeyCode::KeyA)]);
        assert!(state.is_key_pressed(KeyCode::KeyA));
        assert!(state.is_key_down(KeyCode::KeyA));

        frame(&mut state, &[]);
        assert!(!state.is_key_pressed(KeyCode::KeyA));
        assert!(state.is_key_down(KeyCode::KeyA));

        frame(&mut state, &[key_up(KeyCode::KeyA)]);
        assert!(state.is_key_released(KeyCode::KeyA));
        assert!(!state.is_key_down(KeyCode::KeyA));
    }

    #[test]
    fn repeated_key_down_is_not_a_new_press() {
        let mut state = InputState::new();

        frame(&mut state, &[key_down(KeyCode::Space)]);
        frame(&mut state, &[key_down(KeyCode::Space)]);

        assert!(!state.is_key_pressed(KeyCode::Space));
    }

    #[test]
    fn mouse_delta_is_per_frame() {
        let mut state = InputState::new();

        frame(&mut state, &[InputEvent::MouseMoved { x: 10.0, y: 5.0 }]);
        assert_eq!(state.mouse_delta(), (10.0, 5.0));

        frame(&mut state, &[]);
        assert_eq!(state.mouse_delta(), (0.0, 0.0));
        assert_eq!(state.mouse_position(), (10.0, 5.0));
    }

    #[test]
    fn button_edges_are_tracked() {
        let mut state = InputState::new();
        let down = InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::SHIFT };

        frame(&mut state, &[down]);

        assert!(state.is_button_pressed(MouseButton::Left));
        assert!(state.is_button_down(MouseButton::Left));
        assert_eq!(state.modifiers(), Modifiers::SHIFT);
    }

    #[test]
    fn frozen_state_ignores_events() {
        let mut state = InputState::new();
        frame(&mut state, &[key_down(KeyCode::KeyW)]);

        state.set_frozen(true);
        frame(&mut state, &[key_up(KeyCode::KeyW), key_down(KeyCode::KeyS)]);

        assert!(state.is_key_down(KeyCode::KeyW));
        assert!(!state.is_key_down(KeyCode::KeyS));
        assert!(!state.is_key_pressed(KeyCode::KeyW));

        state.set_frozen(false);
        frame(&mut state, &[key_up(KeyCode::KeyW)]);
        assert!(state.is_key_released(KeyCode::KeyW));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut state = InputState::new();
        frame(&mut state, &[key_down(KeyCode::KeyA)]);

        frame(&mut state, &[InputEvent::Focused(false)]);

        assert!(!state.is_key_down(KeyCode::KeyA));
    }
}
