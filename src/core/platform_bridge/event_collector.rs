//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side queue of the events a scene will see this frame.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → pending queue → take_events()
//                                   └─ WindowClosed / disconnect → TickControl::Exit
//
// Bounded draining prevents starvation. While blocked (window stuck) input
// batches are discarded as they arrive; window closure is still observed.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::input::InputEvent;

//=== Constants ===========================================================

const MAX_EVENTS_PER_FRAME: usize = 100;

//=== TickControl =========================================================

/// Loop control signal returned by [`EventCollector::collect_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Drains backend events into a per-frame queue.
pub struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    pending: VecDeque<InputEvent>,
    blocked: bool,
}

impl EventCollector {
    pub fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            pending: VecDeque::with_capacity(16),
            blocked: false,
        }
    }

    //--- Collection -------------------------------------------------------

    /// Moves pending backend events into the queue (bounded per frame).
    pub fn collect_frame(&mut self) -> TickControl {
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    drained += 1;
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                }
                Err(TryRecvError::Disconnected) => {
                    warn!(target: "platform", "Event channel disconnected");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!(target: "platform", "Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    /// Appends an application event (always accepted, even while blocked).
    pub fn post(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Takes every queued event in arrival order.
    pub fn take_events(&mut self) -> Vec<InputEvent> {
        self.pending.drain(..).collect()
    }

    /// Discards queued events and everything already sent by the backend.
    ///
    /// Window closure found in the channel is reported rather than lost.
    pub fn clear(&mut self) -> TickControl {
        let dropped = self.pending.len();
        self.pending.clear();

        let mut control = TickControl::Continue;
        loop {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::WindowClosed) => control = TickControl::Exit,
                Ok(PlatformEvent::Inputs { .. }) => {}
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    control = TickControl::Exit;
                    break;
                }
            }
        }

        if dropped > 0 {
            trace!(target: "platform", "Cleared {} stale events", dropped);
        }
        control
    }

    //--- Blocking ---------------------------------------------------------

    /// Blocks or unblocks input. Blocking drops what is already queued.
    pub fn set_blocked(&mut self, blocked: bool) {
        if blocked {
            self.pending.clear();
        }
        self.blocked = blocked;
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    //--- Internal Helpers -------------------------------------------------

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                if !self.blocked {
                    self.pending.extend(discrete);
                    self.pending.extend(continuous);
                }
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
