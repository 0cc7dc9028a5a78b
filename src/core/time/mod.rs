//=========================================================================
// Time
//=========================================================================
//
// Frame pacing and fixed-timestep scheduling.
//
// Architecture:
//   FrameClock::tick() ──elapsed ms──> FixedStepScheduler::advance()
//                                          └─> FixedStep { ticks, alpha }
//
//=========================================================================

//=== Module Declarations =================================================

mod fixed_step;
mod frame_clock;

//=== Public API ==========================================================

pub use fixed_step::{FixedStep, FixedStepScheduler};
pub use frame_clock::{FrameClock, SystemTimeSource, TimeSource};
