//=========================================================================
// Transition Coroutine
//=========================================================================
//
// Resumable wrapper around a `TransitionBody`.
//
// Architecture:
//   resume(Fixed)            → body.fixed_update()
//   resume(Interpolate(a))   → body.interpolation_update(a) → update() → render()
//   Stop / error / drop      → body.destroy() (exactly once)
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{TransitionBody, TransitionControl, TransitionStep};
use crate::core::error::SceneError;
use crate::core::render::Renderer;

//=== TransitionCoroutine =================================================

/// Drives one transition playback step by step.
///
/// The body is destroyed as soon as it stops, fails, or the coroutine is
/// dropped (including while unwinding from a panic).
pub struct TransitionCoroutine<R: Renderer> {
    body: Option<Box<dyn TransitionBody<R>>>,
}

impl<R: Renderer> TransitionCoroutine<R> {
    pub fn new(body: Box<dyn TransitionBody<R>>) -> Self {
        Self { body: Some(body) }
    }

    /// Advances the playback by one step.
    ///
    /// Resuming a finished coroutine returns `Stop` without calling the body.
    pub fn resume(&mut self, renderer: &mut R, step: TransitionStep) -> Result<TransitionControl, SceneError> {
        let Some(body) = self.body.as_mut() else {
            return Ok(TransitionControl::Stop);
        };

        let outcome = match step {
            TransitionStep::Fixed => body.fixed_update(),
            TransitionStep::Interpolate(alpha) => Self::frame(body.as_mut(), renderer, alpha),
        };

        match outcome {
            Ok(TransitionControl::Continue) => Ok(TransitionControl::Continue),
            Ok(TransitionControl::Stop) => {
                self.finish();
                Ok(TransitionControl::Stop)
            }
            Err(error) => {
                self.finish();
                Err(error)
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.body.is_none()
    }

    /// Ends the playback early.
    pub fn finish(&mut self) {
        if let Some(mut body) = self.body.take() {
            body.destroy();
        }
    }

    fn frame(body: &mut dyn TransitionBody<R>, renderer: &mut R, alpha: f64) -> Result<TransitionControl, SceneError> {
        if body.interpolation_update(alpha)? == TransitionControl::Stop {
            return Ok(TransitionControl::Stop);
        }
        if body.update()? == TransitionControl::Stop {
            return Ok(TransitionControl::Stop);
        }
        body.render(renderer)?;
        Ok(TransitionControl::Continue)
    }
}

impl<R: Renderer> Drop for TransitionCoroutine<R> {
    fn drop(&mut self) {
        self.finish();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::FrameBuffer;
    use crate::core::transition::TransitionResult;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Scripted {
        log: Log,
        stop_after_frames: usize,
        frames: usize,
        fail_on_fixed: bool,
    }

    impl Scripted {
        fn new(log: &Log, stop_after_frames: usize) -> Self {
            Self {
                log: Rc::clone(log),
                stop_after_frames,
                frames: 0,
                fail_on_fixed: false,
            }
        }
    }

    impl TransitionBody<FrameBuffer> for Scripted {
        fn fixed_update(&mut self) -> TransitionResult {
            self.log.borrow_mut().push("fixed".into());
            if self.fail_on_fixed {
                return Err(SceneError::msg("boom"));
            }
            Ok(TransitionControl::Continue)
        }

        fn interpolation_update(&mut self, alpha: f64) -> TransitionResult {
            self.log.borrow_mut().push(format!("alpha {alpha}"));
            Ok(TransitionControl::Continue)
        }

        fn update(&mut self) -> TransitionResult {
            self.frames += 1;
            if self.frames > self.stop_after_frames {
                return Ok(TransitionControl::Stop);
            }
            Ok(TransitionControl::Continue)
        }

        fn render(&mut self, _renderer: &mut FrameBuffer) -> Result<(), SceneError> {
            self.log.borrow_mut().push("render".into());
            Ok(())
        }

        fn destroy(&mut self) {
            self.log.borrow_mut().push("destroy".into());
        }
    }

    #[test]
    fn interpolate_step_runs_update_chain() {
        let log = Log::default();
        let mut fb = FrameBuffer::new(1, 1);
        let mut coroutine = TransitionCoroutine::new(Box::new(Scripted::new(&log, 5)));

        coroutine.resume(&mut fb, TransitionStep::Fixed).unwrap();
        coroutine.resume(&mut fb, TransitionStep::Interpolate(0.5)).unwrap();

        assert_eq!(*log.borrow(), vec!["fixed", "alpha 0.5", "render"]);
    }

    #[test]
    fn stop_destroys_once_and_skips_render() {
        let log = Log::default();
        let mut fb = FrameBuffer::new(1, 1);
        let mut coroutine = TransitionCoroutine::new(Box::new(Scripted::new(&log, 0)));

        let control = coroutine.resume(&mut fb, TransitionStep::Interpolate(1.0)).unwrap();

        assert_eq!(control, TransitionControl::Stop);
        assert!(coroutine.is_finished());
        assert_eq!(
            coroutine.resume(&mut fb, TransitionStep::Fixed).unwrap(),
            TransitionControl::Stop
        );
        drop(coroutine);
        assert_eq!(*log.borrow(), vec!["alpha 1", "destroy"]);
    }

    #[test]
    fn body_error_destroys_before_propagating() {
        let log = Log::default();
        let mut fb = FrameBuffer::new(1, 1);
        let mut body = Scripted::new(&log, 5);
        body.fail_on_fixed = true;
        let mut coroutine = TransitionCoroutine::new(Box::new(body));

        assert!(coroutine.resume(&mut fb, TransitionStep::Fixed).is_err());
        assert_eq!(*log.borrow(), vec!["fixed", "destroy"]);
    }

    #[test]
    fn dropping_a_running_coroutine_destroys_body() {
        let log = Log::default();
        let coroutine = TransitionCoroutine::<FrameBuffer>::new(Box::new(Scripted::new(&log, 5)));

        drop(coroutine);

        assert_eq!(*log.borrow(), vec!["destroy"]);
    }
}
