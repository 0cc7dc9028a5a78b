//=========================================================================
// Input Buffer
//
// Collects the input events a backend receives during one pump, split
// into discrete and continuous events.
//
// Responsibilities:
// - Keep discrete events (keys, buttons, window changes) in order
// - Coalesce continuous events so only the latest cursor position survives
// - Drop device input while the window is stuck
//
// Notes:
// The buffer is drained once per pump into a single
// `PlatformEvent::Inputs` batch.
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================
//
// Transient event store for one pump of the backend.
//
pub(crate) struct InputBuffer {
    discrete: Vec<InputEvent>,
    continuous: Option<InputEvent>,
    suspended: bool,
}

impl InputBuffer {
    //--- Construction -----------------------------------------------------
    pub(crate) fn new() -> Self {
        const DISCRETE_BASE: usize = 64;

        Self {
            discrete: Vec::with_capacity(DISCRETE_BASE),
            continuous: None,
            suspended: false,
        }
    }

    //--- Event Handling ---------------------------------------------------
    //
    // Continuous events replace the previous one; discrete events are
    // appended. Device input is ignored while suspended.
    //
    pub(crate) fn push(&mut self, event: InputEvent) {
        if self.suspended && event.is_device_input() {
            return;
        }
        if event.is_continuous() {
            self.continuous = Some(event);
        } else {
            self.discrete.push(event);
        }
    }

    //--- Suspension -------------------------------------------------------
    pub(crate) fn set_suspended(&mut self, suspended: bool) {
        if suspended {
            self.discrete.retain(|event| !event.is_device_input());
            self.continuous = None;
        }
        self.suspended = suspended;
    }

    pub(crate) fn is_suspended(&self) -> bool {
        self.suspended
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns the buffered `(discrete, continuous)` events and clears the
    // buffer, or `None` when nothing was buffered.
    //
    pub(crate) fn drain(&mut self) -> Option<(Vec<InputEvent>, Vec<InputEvent>)> {
        if self.is_empty() {
            return None;
        }
        let discrete = std::mem::take(&mut self.discrete);
        let continuous = self.continuous.take().into_iter().collect();
        Some((discrete, continuous))
    }

    //--- Utilities --------------------------------------------------------
    pub(crate) fn len(&self) -> usize {
        self.discrete.len() + usize::from(self.continuous.is_some())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.discrete.is_empty() && self.continuous.is_none()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
