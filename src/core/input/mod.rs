//=========================================================================
// Input
//
// Portable input events and the input state scenes query.
//
// Responsibilities:
// - Define the event vocabulary shared by every window backend
// - Track held keys/buttons and per-frame edges
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use state_tracker::InputState;
