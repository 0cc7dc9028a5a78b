//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges window backends (winit, headless) with the scene core.
//
// Backends implement `Window` and push `PlatformEvent`s into a channel;
// the core drains that channel through an `EventCollector`. Swapping a
// backend never touches scene code.
//
// Components:
// - `interface`: Window trait, event and error types (the contract)
// - `event_collector`: Core-side event queue with blocking support
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event_collector;
pub mod interface;

//=== Public API ==========================================================

pub use event_collector::{EventCollector, TickControl};
pub use interface::{PlatformError, PlatformEvent, Window};
