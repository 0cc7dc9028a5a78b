//=========================================================================
// Scene Callbacks
//=========================================================================
//
// Deferred and periodic callbacks scheduled by a scene.
//
// Architecture:
//   ctx.after(ms) / ctx.every(ms) → CallbackId
//   loop (scene looping, window not stuck):
//     begin_pass(elapsed) → due queue → next_due() → Scene::on_callback(id)
//
// Time only flows while the owning scene is looping: a suspended scene or
// a stuck window does not consume its callbacks' delays. The whole set
// lives in the scene's slot and is dropped with it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

//=== CallbackId ==========================================================

/// Handle of a scheduled callback, unique within its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(u64);

//=== ScheduledCallback ===================================================

#[derive(Debug, Clone)]
struct ScheduledCallback {
    id: CallbackId,
    period_ms: f64,
    remaining_ms: f64,
    repeat: bool,
}

//=== SceneCallbacks ======================================================

/// Callbacks registered by one scene.
#[derive(Debug, Default)]
pub struct SceneCallbacks {
    next_id: u64,
    scheduled: Vec<ScheduledCallback>,
    due: VecDeque<CallbackId>,
}

impl SceneCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Scheduling -------------------------------------------------------

    /// Fires once after `delay_ms` of looping time.
    pub fn after(&mut self, delay_ms: f64) -> CallbackId {
        let delay = delay_ms.max(0.0);
        self.schedule(delay, delay, false)
    }

    /// Fires on the next processing pass, then every `period_ms`.
    pub fn every(&mut self, period_ms: f64) -> CallbackId {
        self.schedule(period_ms.max(0.0), 0.0, true)
    }

    /// Cancels a callback. Returns `false` if it was not scheduled.
    pub fn cancel(&mut self, id: CallbackId) -> bool {
        self.due.retain(|due| *due != id);
        let before = self.scheduled.len();
        self.scheduled.retain(|callback| callback.id != id);
        before != self.scheduled.len()
    }

    /// Cancels everything, including callbacks already due.
    pub fn cancel_all(&mut self) {
        self.scheduled.clear();
        self.due.clear();
    }

    //--- Processing -------------------------------------------------------

    /// Consumes `elapsed_ms` and queues every callback that became due.
    ///
    /// A repeating callback fires at most once per pass and restarts its
    /// period from the pass that fired it.
    pub(crate) fn begin_pass(&mut self, elapsed_ms: f64) {
        let elapsed = elapsed_ms.max(0.0);
        let mut fired = Vec::new();

        for callback in &mut self.scheduled {
            callback.remaining_ms -= elapsed;
            if callback.remaining_ms <= 0.0 {
                fired.push(callback.id);
                callback.remaining_ms = callback.period_ms;
            }
        }

        self.scheduled
            .retain(|callback| callback.repeat || !fired.contains(&callback.id));
        self.due.extend(fired);
    }

    /// Next callback to dispatch in this pass.
    ///
    /// Cancelling a callback from another callback's handler removes it
    /// from the queue as well.
    pub(crate) fn next_due(&mut self) -> Option<CallbackId> {
        self.due.pop_front()
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_scheduled(&self, id: CallbackId) -> bool {
        self.scheduled.iter().any(|callback| callback.id == id)
    }

    pub fn len(&self) -> usize {
        self.scheduled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }

    //--- Internal Helpers -------------------------------------------------

    fn schedule(&mut self, period_ms: f64, first_delay_ms: f64, repeat: bool) -> CallbackId {
        let id = CallbackId(self.next_id);
        self.next_id += 1;
        self.scheduled.push(ScheduledCallback {
            id,
            period_ms,
            remaining_ms: first_delay_ms,
            repeat,
        });
        id
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
