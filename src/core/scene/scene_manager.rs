//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns every scene instance, the scene stack and the dialog stack, and
// mediates creation, reactivation, suspension and destruction.
//
// Scenes are created lazily from registered factories and cached by key
// until they leave the stack for good. Dialogs are created for each
// opening and destroyed when they close.
//
// Navigation never runs the loop: `go_to` / `go_back` mutate the stacks
// and return a `LoopSignal` describing what the owning loop must do.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::mem;

use log::{debug, error, warn};

//=== Internal Dependencies ===============================================

use super::callbacks::SceneCallbacks;
use super::context::{RenderContext, SceneContext, SceneEnv};
use super::signal::{LoopSignal, NavigationRequest, SceneResult, SceneSignal, SceneStart};
use super::{Scene, SceneArgs, SceneKey, SceneKind, SceneState};
use crate::core::error::SceneError;
use crate::core::input::InputEvent;
use crate::core::render::{Color, Renderer};
use crate::core::transition::{Transition, TransitionContext};

//=== SceneRef ============================================================

/// Addresses a live scene or dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneRef<K> {
    /// Cached scene instance.
    Scene(K),

    /// Dialog at this index of the dialog stack (0 = bottom).
    Dialog(usize),
}

//=== Internal Types ======================================================

type SceneFactory<K, R> = Box<dyn Fn() -> Box<dyn Scene<K, R>>>;

struct Registration<K: SceneKey, R: Renderer> {
    kind: SceneKind,
    factory: SceneFactory<K, R>,
}

struct SceneSlot<K: SceneKey, R: Renderer> {
    key: K,
    kind: SceneKind,
    state: SceneState,
    master: Option<SceneRef<K>>,
    scene: Box<dyn Scene<K, R>>,
    callbacks: SceneCallbacks,
}

/// Stands in for a scene while it renders, so the scene can be handed
/// the manager through its `RenderContext`.
struct Detached;

impl<K: SceneKey, R: Renderer> Scene<K, R> for Detached {
    fn render(&mut self, _ctx: &mut RenderContext<'_, K, R>) -> Result<(), SceneError> {
        Ok(())
    }
}

impl<K: SceneKey, R: Renderer> SceneSlot<K, R> {
    fn background_color(&self) -> Color {
        self.scene.background_color().unwrap_or(match self.kind {
            SceneKind::Scene => Color::BLACK,
            SceneKind::Dialog => Color::TRANSPARENT,
        })
    }
}

//=== SceneManager ========================================================

/// Scene registry, stacks and lifecycle state machine.
pub struct SceneManager<K: SceneKey, R: Renderer> {
    registry: HashMap<K, Registration<K, R>>,
    scenes: HashMap<K, SceneSlot<K, R>>,
    stack: Vec<K>,
    dialogs: Vec<SceneSlot<K, R>>,
    returning: HashMap<K, Transition<R>>,
}

impl<K: SceneKey, R: Renderer> SceneManager<K, R> {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            registry: HashMap::new(),
            scenes: HashMap::new(),
            stack: Vec::new(),
            dialogs: Vec::new(),
            returning: HashMap::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers the factory building the scene for `key`.
    ///
    /// The factory runs on the first navigation to `key`, and again after
    /// the previous instance was destroyed.
    pub fn register_scene<F, S>(&mut self, key: K, factory: F)
    where
        F: Fn() -> S + 'static,
        S: Scene<K, R> + 'static,
    {
        self.register(key, SceneKind::Scene, Box::new(move || Box::new(factory())));
    }

    /// Registers the factory building the dialog for `key`.
    pub fn register_dialog<F, S>(&mut self, key: K, factory: F)
    where
        F: Fn() -> S + 'static,
        S: Scene<K, R> + 'static,
    {
        self.register(key, SceneKind::Dialog, Box::new(move || Box::new(factory())));
    }

    pub fn is_registered(&self, key: K) -> bool {
        self.registry.contains_key(&key)
    }

    pub fn kind_of(&self, key: K) -> Option<SceneKind> {
        self.registry.get(&key).map(|registration| registration.kind)
    }

    //--- Queries ----------------------------------------------------------

    /// Topmost scene of the scene stack (dialogs excluded).
    pub fn top(&self) -> Option<K> {
        self.stack.last().copied()
    }

    /// Topmost dialog, or the topmost scene when no dialog is open.
    pub fn current(&self) -> Option<SceneRef<K>> {
        match self.dialogs.len() {
            0 => self.top().map(SceneRef::Scene),
            len => Some(SceneRef::Dialog(len - 1)),
        }
    }

    /// Scene stack, bottom first.
    pub fn stack(&self) -> &[K] {
        &self.stack
    }

    /// Every live scene and dialog, dialogs first, topmost first.
    pub fn from_top_to_bottom(&self) -> Vec<SceneRef<K>> {
        (0..self.dialogs.len())
            .rev()
            .map(SceneRef::Dialog)
            .chain(self.stack.iter().rev().map(|key| SceneRef::Scene(*key)))
            .collect()
    }

    pub fn dialog_count(&self) -> usize {
        self.dialogs.len()
    }

    pub fn dialog_key(&self, index: usize) -> Option<K> {
        self.dialogs.get(index).map(|slot| slot.key)
    }

    /// Returns `true` if `key` is in the scene stack or the dialog stack.
    pub fn started(&self, key: K) -> bool {
        self.stack.contains(&key) || self.dialogs.iter().any(|slot| slot.key == key)
    }

    /// Returns `true` if a scene instance exists for `key`.
    pub fn is_awaken(&self, key: K) -> bool {
        self.scenes.contains_key(&key)
    }

    /// Lifecycle state of the cached scene for `key`.
    pub fn state(&self, key: K) -> Option<SceneState> {
        self.scenes.get(&key).map(|slot| slot.state)
    }

    pub fn state_of(&self, target: SceneRef<K>) -> Option<SceneState> {
        self.slot(target).map(|slot| slot.state)
    }

    /// Scene or dialog a dialog was opened over.
    pub fn master_of(&self, target: SceneRef<K>) -> Option<SceneRef<K>> {
        self.slot(target).and_then(|slot| slot.master)
    }

    /// Returning transition remembered for navigating back to `key`.
    pub fn returning_transition(&self, key: K) -> Option<&Transition<R>> {
        self.returning.get(&key)
    }

    pub fn key_of(&self, target: SceneRef<K>) -> Option<K> {
        self.slot(target).map(|slot| slot.key)
    }

    pub fn background_color(&self, target: SceneRef<K>) -> Option<Color> {
        self.slot(target).map(SceneSlot::background_color)
    }

    //--- Pacing Preferences -----------------------------------------------

    /// First non-zero frame rate requested from the top down.
    pub fn framerate(&self) -> Option<u32> {
        self.slots_top_to_bottom()
            .map(|slot| slot.scene.framerate())
            .find(|framerate| *framerate > 0)
    }

    /// First non-zero fixed-update rate requested from the top down.
    pub fn fixed_framerate(&self) -> Option<u32> {
        self.slots_top_to_bottom()
            .map(|slot| slot.scene.fixed_framerate())
            .find(|framerate| *framerate > 0)
    }

    /// Whether the current scene or dialog asks for spin-wait pacing.
    pub fn busy_loop(&self) -> bool {
        self.current()
            .and_then(|target| self.slot(target))
            .is_some_and(|slot| slot.scene.busy_loop())
    }

    /// Entry transition of a dialog.
    pub fn entry_transition(&self, target: SceneRef<K>) -> Option<Transition<R>> {
        self.slot(target).and_then(|slot| slot.scene.entry_transition())
    }

    /// Exit transition of a dialog.
    pub fn exit_transition(&self, target: SceneRef<K>) -> Option<Transition<R>> {
        self.slot(target).and_then(|slot| slot.scene.exit_transition())
    }

    //--- Navigation -------------------------------------------------------

    /// Makes `start.key` the topmost scene.
    ///
    /// Never returns a plain success: the result is either `SameScene`
    /// (nothing happened) or `NewScene`, which the main loop turns into a
    /// transition.
    pub fn go_to(&mut self, start: SceneStart<K, R>, env: SceneEnv<'_>) -> Result<LoopSignal<K, R>, SceneError> {
        let SceneStart {
            key,
            transition,
            remove_actual,
            mut args,
        } = start;

        match self.kind_of(key) {
            None => return Err(SceneError::UnknownScene(format!("{:?}", key))),
            Some(SceneKind::Dialog) => return Err(SceneError::DialogNavigation(format!("{:?}", key))),
            Some(SceneKind::Scene) => {}
        }

        let previous = self.top();

        if self.scenes.contains_key(&key) {
            if previous == Some(key) {
                debug!(target: "scene", "Scene {:?} is already running", key);
                return Ok(LoopSignal::SameScene(key));
            }
            self.call(SceneRef::Scene(key), env, |scene, ctx| scene.on_restart(ctx, &mut args))??;
        } else {
            self.create_scene(key, &mut args, env)?;
        }

        let mut chosen = None;
        let mut closing = Vec::new();

        if previous.is_none() || !self.stack.contains(&key) {
            debug!(target: "scene", "Pushing scene {:?} (previous: {:?})", key, previous);
            self.stack.push(key);

            if let Some(previous) = previous {
                if let Some(transition) = transition {
                    if transition.is_returning() {
                        self.returning.insert(previous, transition.clone());
                    }
                    chosen = Some(transition.half(TransitionContext::Show));
                }
                if remove_actual {
                    debug!(target: "scene", "Removing scene {:?} from stack", previous);
                    self.stack.retain(|k| *k != previous);
                }
            }
        } else {
            let recorded = self.returning.remove(&key);
            while let Some(&closed) = self.stack.last() {
                if closed == key {
                    break;
                }
                self.stack.pop();
                if Some(closed) != previous {
                    closing.push(closed);
                }
                self.returning.remove(&closed);
            }
            debug!(target: "scene", "Returning to scene {:?}, closing {:?}", key, closing);

            chosen = recorded
                .or(transition)
                .map(|transition| transition.half(TransitionContext::Hide));
        }

        Ok(LoopSignal::NewScene(NavigationRequest {
            previous,
            next: key,
            transition: chosen,
            closing,
        }))
    }

    /// Closes the topmost dialog, returns to the previous scene, or closes
    /// the window when only one scene is left.
    pub fn go_back(&mut self, env: SceneEnv<'_>) -> Result<LoopSignal<K, R>, SceneError> {
        if !self.dialogs.is_empty() {
            return Ok(LoopSignal::DialogStop);
        }
        if self.stack.len() <= 1 {
            debug!(target: "scene", "Last scene stopped, closing window");
            return Ok(LoopSignal::Close);
        }
        let key = self.stack[self.stack.len() - 2];
        self.go_to(SceneStart::new(key), env)
    }

    /// Converts a navigation signal into what the loop must do.
    ///
    /// Dialog opening is not resolved here: it belongs to the window loop.
    pub fn resolve(&mut self, signal: SceneSignal<K, R>, env: SceneEnv<'_>) -> Result<LoopSignal<K, R>, SceneError> {
        match signal {
            SceneSignal::GoTo(start) => self.go_to(start, env),
            SceneSignal::GoBack => self.go_back(env),
            SceneSignal::CloseWindow => Ok(LoopSignal::Close),
            SceneSignal::Error(error) => Err(error),
            SceneSignal::OpenDialog { key, .. } => {
                Err(SceneError::SignalEscaped(format!("open dialog {:?}", key)))
            }
        }
    }

    //--- Dialogs ----------------------------------------------------------

    /// Creates a dialog over the current scene or dialog and awakes it.
    ///
    /// Returns the dialog's index in the dialog stack.
    pub fn push_dialog(&mut self, key: K, mut args: SceneArgs, env: SceneEnv<'_>) -> Result<usize, SceneError> {
        let registration = match self.registry.get(&key) {
            None => return Err(SceneError::UnknownScene(format!("{:?}", key))),
            Some(registration) if registration.kind == SceneKind::Scene => {
                return Err(SceneError::SceneNavigationToDialog(format!("{:?}", key)));
            }
            Some(registration) => registration,
        };
        if self.stack.is_empty() {
            return Err(SceneError::NoSceneForDialog(format!("{:?}", key)));
        }
        let master = self.current();

        self.dialogs.push(SceneSlot {
            key,
            kind: SceneKind::Dialog,
            state: SceneState::Awaken,
            master,
            scene: (registration.factory)(),
            callbacks: SceneCallbacks::new(),
        });
        let index = self.dialogs.len() - 1;
        debug!(target: "scene", "Opening dialog {:?} over {:?}", key, master);

        let awaken = self
            .call(SceneRef::Dialog(index), env, |scene, ctx| scene.awake(ctx, &mut args))
            .and_then(|result| result);
        if let Err(error) = awaken {
            self.dialogs.pop();
            return Err(error);
        }
        Ok(index)
    }

    /// Quits and destroys the topmost dialog.
    ///
    /// The dialog leaves the stack even if one of its hooks fails.
    pub fn pop_dialog(&mut self, env: SceneEnv<'_>) -> Result<(), SceneError> {
        let Some(index) = self.dialogs.len().checked_sub(1) else {
            return Ok(());
        };

        let mut errors = Vec::new();
        if let Err(error) = self.exit_scene(SceneRef::Dialog(index), env) {
            errors.push(error);
        }
        if let Some(mut slot) = self.dialogs.pop() {
            debug!(target: "scene", "Closing dialog {:?}", slot.key);
            slot.callbacks.cancel_all();
            slot.state = SceneState::Destroyed;
            if let Err(error) = slot.scene.on_destroy() {
                errors.push(error);
            }
        }
        combine(errors)
    }

    //--- Lifecycle --------------------------------------------------------

    pub fn start_loop_before_transition(&mut self, target: SceneRef<K>, env: SceneEnv<'_>) -> SceneResult<K, R> {
        self.hook(target, env, |scene, ctx| scene.on_start_loop_before_transition(ctx))
    }

    /// Marks the scene as looping and runs `on_start_loop`.
    pub fn start_loop(&mut self, target: SceneRef<K>, env: SceneEnv<'_>) -> SceneResult<K, R> {
        if let Some(slot) = self.slot_mut(target) {
            slot.state = SceneState::Looping;
        }
        self.hook(target, env, |scene, ctx| scene.on_start_loop(ctx))
    }

    /// Cancels the scene's callbacks, then runs `on_quit_before_transition`.
    ///
    /// Scenes already suspended only lose their callbacks.
    pub fn quit_before_transition(&mut self, target: SceneRef<K>, env: SceneEnv<'_>) -> SceneResult<K, R> {
        let Some(slot) = self.slot_mut(target) else {
            return Err(missing(target).into());
        };
        slot.callbacks.cancel_all();
        if slot.state == SceneState::Suspended {
            return Ok(());
        }
        self.hook(target, env, |scene, ctx| scene.on_quit_before_transition(ctx))
    }

    /// Finishes a scene change: every outgoing scene quits, and those no
    /// longer in the stack are destroyed.
    ///
    /// Every scene gets its attempt even if another fails.
    pub fn closing_scenes(&mut self, previous: Option<K>, closing: &[K], env: SceneEnv<'_>) -> Result<(), SceneError> {
        let mut errors = Vec::new();

        for key in closing.iter().rev().copied().chain(previous) {
            if let Err(error) = self.exit_scene(SceneRef::Scene(key), env) {
                errors.push(error);
            }
            if !self.started(key) {
                if let Err(error) = self.delete_scene(key) {
                    errors.push(error);
                }
            }
        }
        combine(errors)
    }

    /// Quits and destroys every scene and dialog, topmost first.
    ///
    /// Failures are logged and reported together once every scene had its
    /// teardown attempt.
    pub fn clear(&mut self, env: SceneEnv<'_>) -> Result<(), SceneError> {
        let mut errors = Vec::new();

        while !self.dialogs.is_empty() {
            if let Err(e) = self.pop_dialog(env) {
                error!(target: "scene", "Dialog teardown failed: {}", e);
                errors.push(e);
            }
        }

        self.returning.clear();
        let mut keys: Vec<K> = self.stack.drain(..).rev().collect();
        let leftovers: Vec<K> = self.scenes.keys().copied().filter(|key| !keys.contains(key)).collect();
        keys.extend(leftovers);

        for key in keys {
            let quit = self.exit_scene(SceneRef::Scene(key), env);
            let destroy = self.delete_scene(key);
            for e in [quit, destroy].into_iter().filter_map(Result::err) {
                error!(target: "scene", "Teardown of scene {:?} failed: {}", key, e);
                errors.push(e);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SceneError::Teardown(errors))
        }
    }

    //--- Frame Hooks ------------------------------------------------------

    /// Dispatches the scene's due callbacks after `elapsed_ms` of looping.
    pub fn process_callbacks(&mut self, target: SceneRef<K>, elapsed_ms: f64, env: SceneEnv<'_>) -> SceneResult<K, R> {
        self.hook(target, env, |scene, ctx| {
            ctx.callbacks.begin_pass(elapsed_ms);
            while let Some(id) = ctx.callbacks.next_due() {
                scene.on_callback(ctx, id)?;
            }
            Ok(())
        })
    }

    pub fn handle_event(&mut self, target: SceneRef<K>, event: &InputEvent, env: SceneEnv<'_>) -> SceneResult<K, R> {
        self.hook(target, env, |scene, ctx| scene.handle_event(ctx, event))
    }

    pub fn fixed_update(&mut self, target: SceneRef<K>, env: SceneEnv<'_>) -> SceneResult<K, R> {
        self.hook(target, env, |scene, ctx| scene.fixed_update(ctx))
    }

    pub fn interpolation_update(&mut self, target: SceneRef<K>, alpha: f64, env: SceneEnv<'_>) -> SceneResult<K, R> {
        self.hook(target, env, |scene, ctx| scene.interpolation_update(ctx, alpha))
    }

    pub fn update(&mut self, target: SceneRef<K>, env: SceneEnv<'_>) -> SceneResult<K, R> {
        self.hook(target, env, |scene, ctx| scene.update(ctx))
    }

    //--- Rendering --------------------------------------------------------

    /// Renders a scene over its background color.
    ///
    /// A dialog renders its master first, then blends its own background
    /// over it before drawing itself.
    pub fn render(&mut self, target: SceneRef<K>, renderer: &mut R) -> Result<(), SceneError> {
        let (master, color) = match self.slot(target) {
            Some(slot) => (slot.master, slot.background_color()),
            None => return Err(missing(target)),
        };

        match master {
            Some(master) => {
                self.render(master, renderer)?;
                renderer.clear(color, true);
            }
            None => renderer.clear(color, false),
        }

        self.render_scene(target, renderer)
    }

    /// Draws a started scene below the current one, without its
    /// background color.
    ///
    /// # Errors
    ///
    /// [`SceneError::Draw`] if `key` is a dialog, is not started, has no
    /// instance or is the scene looping at the top of the stack.
    pub fn draw_scene(&mut self, key: K, renderer: &mut R) -> Result<(), SceneError> {
        if self.kind_of(key) == Some(SceneKind::Dialog) {
            return Err(SceneError::Draw(format!("{:?} is a dialog", key)));
        }
        if !self.stack.contains(&key) {
            return Err(SceneError::Draw(format!("{:?} is not started", key)));
        }
        if !self.is_awaken(key) {
            return Err(SceneError::Draw(format!("{:?} has no instance", key)));
        }
        if self.top() == Some(key) {
            return Err(SceneError::Draw(format!("{:?} is the looping scene", key)));
        }
        self.render_scene(SceneRef::Scene(key), renderer)
    }

    //--- Internal Helpers -------------------------------------------------

    fn register(&mut self, key: K, kind: SceneKind, factory: SceneFactory<K, R>) {
        if self.registry.insert(key, Registration { kind, factory }).is_some() {
            warn!(target: "scene", "Scene {:?} was already registered and has been replaced", key);
        }
    }

    fn slot(&self, target: SceneRef<K>) -> Option<&SceneSlot<K, R>> {
        match target {
            SceneRef::Scene(key) => self.scenes.get(&key),
            SceneRef::Dialog(index) => self.dialogs.get(index),
        }
    }

    fn slot_mut(&mut self, target: SceneRef<K>) -> Option<&mut SceneSlot<K, R>> {
        match target {
            SceneRef::Scene(key) => self.scenes.get_mut(&key),
            SceneRef::Dialog(index) => self.dialogs.get_mut(index),
        }
    }

    fn render_scene(&mut self, target: SceneRef<K>, renderer: &mut R) -> Result<(), SceneError> {
        let placeholder: Box<dyn Scene<K, R>> = Box::new(Detached);
        let (key, mut scene) = match self.slot_mut(target) {
            Some(slot) => (slot.key, mem::replace(&mut slot.scene, placeholder)),
            None => return Err(missing(target)),
        };
        let result = scene.render(&mut RenderContext::new(key, renderer, self));
        if let Some(slot) = self.slot_mut(target) {
            slot.scene = scene;
        }
        result
    }

    fn slots_top_to_bottom(&self) -> impl Iterator<Item = &SceneSlot<K, R>> + '_ {
        self.dialogs
            .iter()
            .rev()
            .chain(self.stack.iter().rev().filter_map(move |key| self.scenes.get(key)))
    }

    /// Runs `f` with the scene and a context bound to its slot.
    fn call<T>(
        &mut self,
        target: SceneRef<K>,
        env: SceneEnv<'_>,
        f: impl FnOnce(&mut dyn Scene<K, R>, &mut SceneContext<'_, K, R>) -> T,
    ) -> Result<T, SceneError> {
        let looping = self.current() == Some(target);
        let slot = self.slot_mut(target).ok_or_else(|| missing(target))?;
        let mut ctx = SceneContext::new(slot.key, slot.kind, looping, &mut slot.callbacks, env);
        Ok(f(slot.scene.as_mut(), &mut ctx))
    }

    fn hook(
        &mut self,
        target: SceneRef<K>,
        env: SceneEnv<'_>,
        f: impl FnOnce(&mut dyn Scene<K, R>, &mut SceneContext<'_, K, R>) -> SceneResult<K, R>,
    ) -> SceneResult<K, R> {
        self.call(target, env, f).unwrap_or_else(|error| Err(SceneSignal::Error(error)))
    }

    fn create_scene(&mut self, key: K, args: &mut SceneArgs, env: SceneEnv<'_>) -> Result<(), SceneError> {
        let registration = self
            .registry
            .get(&key)
            .ok_or_else(|| SceneError::UnknownScene(format!("{:?}", key)))?;

        debug!(target: "scene", "Creating scene {:?}", key);
        let slot = SceneSlot {
            key,
            kind: SceneKind::Scene,
            state: SceneState::Awaken,
            master: None,
            scene: (registration.factory)(),
            callbacks: SceneCallbacks::new(),
        };
        self.scenes.insert(key, slot);

        let awaken = self
            .call(SceneRef::Scene(key), env, |scene, ctx| scene.awake(ctx, args))
            .and_then(|result| result);
        if awaken.is_err() {
            self.scenes.remove(&key);
        }
        awaken
    }

    /// Runs `on_quit` unless the scene is already suspended.
    fn exit_scene(&mut self, target: SceneRef<K>, env: SceneEnv<'_>) -> Result<(), SceneError> {
        let Some(slot) = self.slot_mut(target) else {
            return Ok(());
        };
        if slot.state == SceneState::Suspended {
            return Ok(());
        }
        slot.state = SceneState::Suspended;

        match self.hook(target, env, |scene, ctx| scene.on_quit(ctx)) {
            Ok(()) => Ok(()),
            Err(SceneSignal::Error(error)) => Err(error),
            Err(signal) => Err(SceneError::NavigationDuringTransition(format!(
                "{} requested from on_quit",
                signal.name()
            ))),
        }
    }

    /// Evicts a cached scene: drops its callbacks and runs `on_destroy`.
    fn delete_scene(&mut self, key: K) -> Result<(), SceneError> {
        let Some(mut slot) = self.scenes.remove(&key) else {
            return Ok(());
        };
        debug!(target: "scene", "Destroying scene {:?}", key);
        self.returning.remove(&key);
        slot.callbacks.cancel_all();
        slot.state = SceneState::Destroyed;
        slot.scene.on_destroy()
    }
}

impl<K: SceneKey, R: Renderer> Default for SceneManager<K, R> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Helpers =============================================================

fn missing<K: SceneKey>(target: SceneRef<K>) -> SceneError {
    SceneError::UnknownScene(format!("{:?}", target))
}

fn combine(mut errors: Vec<SceneError>) -> Result<(), SceneError> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(SceneError::Teardown(errors)),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
