//=========================================================================
// Scene Transitions
//=========================================================================
//
// Strategy objects animating the switch between two captured frames.
//
// Architecture:
//   Transition<R> (cloneable handle)
//     ├─ Simple(SceneTransition)        → init(prev, cur)          → body
//     └─ Returning(ReturningSceneTransition)
//                                      → init(prev, cur, Show|Hide) → body
//
//   body: TransitionBody → TransitionCoroutine (resume per step, destroy once)
//                        → driver (captures, stuck window, presents)
//
// A returning transition used to leave a scene is remembered by the scene
// manager; navigating back to that scene plays its `Hide` half.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::error::SceneError;
use crate::core::render::Renderer;

//=== Module Declarations =================================================

mod coroutine;
pub(crate) mod driver;

//=== Public API ==========================================================

pub use coroutine::TransitionCoroutine;

//=== Transition Vocabulary ===============================================

/// Which half of a returning transition is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionContext {
    /// Moving forward to a newly started scene.
    Show,

    /// Moving back to the scene the transition originally left.
    Hide,
}

/// One resume of a transition coroutine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionStep {
    /// One fixed-timestep update.
    Fixed,

    /// The per-frame pass: interpolation update, update, render.
    Interpolate(f64),
}

/// Returned by transition body hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionControl {
    Continue,

    /// Ends the transition. Nothing else runs for this step.
    Stop,
}

pub type TransitionResult = Result<TransitionControl, SceneError>;

//=== TransitionBody ======================================================

/// Running state of one transition playback.
///
/// Created by a transition strategy from the two captured frames, driven
/// by a [`TransitionCoroutine`], and destroyed exactly once.
pub trait TransitionBody<R: Renderer> {
    fn fixed_update(&mut self) -> TransitionResult {
        Ok(TransitionControl::Continue)
    }

    fn interpolation_update(&mut self, _alpha: f64) -> TransitionResult {
        Ok(TransitionControl::Continue)
    }

    fn update(&mut self) -> TransitionResult {
        Ok(TransitionControl::Continue)
    }

    /// Draws the current frame of the animation onto the transition canvas.
    fn render(&mut self, renderer: &mut R) -> Result<(), SceneError>;

    /// Releases resources. Runs once, whatever ended the playback.
    fn destroy(&mut self) {}
}

//=== Strategies ==========================================================

/// Transition played only when moving forward.
pub trait SceneTransition<R: Renderer> {
    fn init(&self, previous: R::Image, actual: R::Image) -> Result<Box<dyn TransitionBody<R>>, SceneError>;
}

/// Transition with a forward (`Show`) and a backward (`Hide`) half.
pub trait ReturningSceneTransition<R: Renderer> {
    fn init(
        &self,
        previous: R::Image,
        actual: R::Image,
        context: TransitionContext,
    ) -> Result<Box<dyn TransitionBody<R>>, SceneError>;
}

//=== Transition Handle ===================================================

/// Shared handle to a transition strategy.
pub enum Transition<R: Renderer> {
    Simple(Rc<dyn SceneTransition<R>>),
    Returning(Rc<dyn ReturningSceneTransition<R>>),
}

impl<R: Renderer> Transition<R> {
    pub fn simple<T>(transition: T) -> Self
    where
        T: SceneTransition<R> + 'static,
    {
        Self::Simple(Rc::new(transition))
    }

    pub fn returning<T>(transition: T) -> Self
    where
        T: ReturningSceneTransition<R> + 'static,
    {
        Self::Returning(Rc::new(transition))
    }

    pub fn is_returning(&self) -> bool {
        matches!(self, Self::Returning(_))
    }

    /// Selects the half to play. Simple transitions always play forward.
    pub fn half(&self, context: TransitionContext) -> TransitionHalf<R> {
        let context = match self {
            Self::Simple(_) => TransitionContext::Show,
            Self::Returning(_) => context,
        };
        TransitionHalf {
            transition: self.clone(),
            context,
        }
    }

    /// Returns `true` if both handles share the same strategy object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Simple(a), Self::Simple(b)) => Rc::ptr_eq(a, b),
            (Self::Returning(a), Self::Returning(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<R: Renderer> Clone for Transition<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Simple(t) => Self::Simple(Rc::clone(t)),
            Self::Returning(t) => Self::Returning(Rc::clone(t)),
        }
    }
}

impl<R: Renderer> fmt::Debug for Transition<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(_) => f.write_str("Transition::Simple"),
            Self::Returning(_) => f.write_str("Transition::Returning"),
        }
    }
}

//=== TransitionHalf ======================================================

/// A transition together with the half chosen for one navigation.
pub struct TransitionHalf<R: Renderer> {
    transition: Transition<R>,
    context: TransitionContext,
}

impl<R: Renderer> TransitionHalf<R> {
    pub fn transition(&self) -> &Transition<R> {
        &self.transition
    }

    pub fn context(&self) -> TransitionContext {
        self.context
    }

    /// Builds the body for the two captured frames.
    pub fn init(&self, previous: R::Image, actual: R::Image) -> Result<Box<dyn TransitionBody<R>>, SceneError> {
        match &self.transition {
            Transition::Simple(t) => t.init(previous, actual),
            Transition::Returning(t) => t.init(previous, actual, self.context),
        }
    }
}

impl<R: Renderer> Clone for TransitionHalf<R> {
    fn clone(&self) -> Self {
        Self {
            transition: self.transition.clone(),
            context: self.context,
        }
    }
}

impl<R: Renderer> fmt::Debug for TransitionHalf<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionHalf")
            .field("transition", &self.transition)
            .field("context", &self.context)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::FrameBuffer;

    struct Noop;

    impl TransitionBody<FrameBuffer> for Noop {
        fn render(&mut self, _renderer: &mut FrameBuffer) -> Result<(), SceneError> {
            Ok(())
        }
    }

    struct Slide;

    impl ReturningSceneTransition<FrameBuffer> for Slide {
        fn init(
            &self,
            _previous: crate::core::render::Image,
            _actual: crate::core::render::Image,
            _context: TransitionContext,
        ) -> Result<Box<dyn TransitionBody<FrameBuffer>>, SceneError> {
            Ok(Box::new(Noop))
        }
    }

    struct Cut;

    impl SceneTransition<FrameBuffer> for Cut {
        fn init(
            &self,
            _previous: crate::core::render::Image,
            _actual: crate::core::render::Image,
        ) -> Result<Box<dyn TransitionBody<FrameBuffer>>, SceneError> {
            Ok(Box::new(Noop))
        }
    }

    #[test]
    fn simple_transitions_always_show() {
        let cut = Transition::<FrameBuffer>::simple(Cut);

        assert_eq!(cut.half(TransitionContext::Hide).context(), TransitionContext::Show);
        assert!(!cut.is_returning());
    }

    #[test]
    fn returning_transitions_keep_requested_half() {
        let slide = Transition::<FrameBuffer>::returning(Slide);

        assert_eq!(slide.half(TransitionContext::Hide).context(), TransitionContext::Hide);
        assert!(slide.is_returning());
    }

    #[test]
    fn clones_share_the_strategy() {
        let slide = Transition::<FrameBuffer>::returning(Slide);
        let other = Transition::<FrameBuffer>::returning(Slide);

        assert!(slide.ptr_eq(&slide.clone()));
        assert!(!slide.ptr_eq(&other));
        assert!(slide.half(TransitionContext::Show).transition().ptr_eq(&slide));
    }
}
