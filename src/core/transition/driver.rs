//=========================================================================
// Transition Driver
//=========================================================================
//
// Plays one transition half between two frames of a host window.
//
// Architecture:
//   capture(previous) ─┐
//   capture(actual)   ─┴─> half.init() → TransitionCoroutine
//
//   stuck ── per frame ──────────────────────────────────────────────┐
//     next_step() → Fixed × ticks → Interpolate(alpha) → flush canvas │
//   ─────────────────────────────────────────────────────────────────┘
//   canvas → display, unstuck
//
// The transition draws into an offscreen canvas that survives between
// frames; each flush copies it onto the display and presents it.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{TransitionControl, TransitionCoroutine, TransitionHalf, TransitionStep};
use crate::core::error::SceneError;
use crate::core::render::{Color, Renderer};
use crate::core::time::FixedStep;

//=== TransitionHost ======================================================

/// Window-side services a transition needs while it plays.
pub(crate) trait TransitionHost {
    type Renderer: Renderer;

    /// Identifies something the host can draw (a scene, a dialog).
    type Frame: Copy;

    fn renderer(&mut self) -> &mut Self::Renderer;

    /// Draws `frame` into the renderer's current target.
    fn draw_frame(&mut self, frame: Self::Frame) -> Result<(), SceneError>;

    fn is_open(&self) -> bool;

    /// Paces one frame and returns the fixed ticks due for it.
    fn next_step(&mut self) -> FixedStep;

    fn present(&mut self);

    /// Blocks or restores user input around the playback.
    fn set_stuck(&mut self, stuck: bool);
}

//=== Playback ============================================================

/// Plays `half` from `previous` to `actual` until it stops or the window
/// closes.
pub(crate) fn play<H: TransitionHost>(
    host: &mut H,
    previous: H::Frame,
    actual: H::Frame,
    half: &TransitionHalf<H::Renderer>,
) -> Result<(), SceneError> {
    let previous_image = capture(host, previous)?;
    let actual_image = capture(host, actual)?;

    debug!(target: "scene::transition", "Starting transition {:?}", half);
    let mut coroutine = TransitionCoroutine::new(half.init(previous_image, actual_image)?);

    host.set_stuck(true);
    host.renderer().begin_capture();

    let result = run(host, &mut coroutine);
    coroutine.finish();

    let canvas = host.renderer().end_capture();
    host.renderer().draw_image(&canvas, (0.0, 0.0), 1.0);
    host.set_stuck(false);

    debug!(target: "scene::transition", "Transition ended");
    result
}

fn run<H: TransitionHost>(host: &mut H, coroutine: &mut TransitionCoroutine<H::Renderer>) -> Result<(), SceneError> {
    while host.is_open() && !coroutine.is_finished() {
        let step = host.next_step();

        let mut control = TransitionControl::Continue;
        for _ in 0..step.ticks {
            control = coroutine.resume(host.renderer(), TransitionStep::Fixed)?;
            if control == TransitionControl::Stop {
                break;
            }
        }
        if control == TransitionControl::Continue {
            coroutine.resume(host.renderer(), TransitionStep::Interpolate(step.alpha))?;
        }

        flush(host);
    }
    Ok(())
}

/// Shows the canvas, then reopens it with its content kept.
fn flush<H: TransitionHost>(host: &mut H) {
    let canvas = host.renderer().end_capture();
    let renderer = host.renderer();
    renderer.clear(Color::BLACK, false);
    renderer.draw_image(&canvas, (0.0, 0.0), 1.0);
    host.present();

    let renderer = host.renderer();
    renderer.begin_capture();
    renderer.draw_image(&canvas, (0.0, 0.0), 1.0);
}

/// Renders `frame` offscreen. The capture is closed even if drawing fails.
fn capture<H: TransitionHost>(
    host: &mut H,
    frame: H::Frame,
) -> Result<<H::Renderer as Renderer>::Image, SceneError> {
    host.renderer().begin_capture();
    let drawn = host.draw_frame(frame);
    let image = host.renderer().end_capture();
    drawn.map(|()| image)
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{FrameBuffer, Image};
    use crate::core::testing::{new_log, RecordingTransition};
    use crate::core::transition::{SceneTransition, Transition, TransitionBody, TransitionContext};

    struct FakeHost {
        renderer: FrameBuffer,
        frames_left: Option<usize>,
        presented: usize,
        stuck: Vec<bool>,
        fail_draw: bool,
    }

    impl FakeHost {
        fn new() -> Self {
            Self {
                renderer: FrameBuffer::new(2, 2),
                frames_left: None,
                presented: 0,
                stuck: Vec::new(),
                fail_draw: false,
            }
        }
    }

    impl TransitionHost for FakeHost {
        type Renderer = FrameBuffer;
        type Frame = Color;

        fn renderer(&mut self) -> &mut FrameBuffer {
            &mut self.renderer
        }

        fn draw_frame(&mut self, frame: Color) -> Result<(), SceneError> {
            if self.fail_draw {
                return Err(SceneError::msg("draw failed"));
            }
            self.renderer.clear(frame, false);
            Ok(())
        }

        fn is_open(&self) -> bool {
            self.frames_left != Some(0)
        }

        fn next_step(&mut self) -> FixedStep {
            if let Some(left) = self.frames_left.as_mut() {
                *left -= 1;
            }
            FixedStep { ticks: 1, alpha: 0.5 }
        }

        fn present(&mut self) {
            self.presented += 1;
        }

        fn set_stuck(&mut self, stuck: bool) {
            self.stuck.push(stuck);
        }
    }

    struct Broken;

    impl SceneTransition<FrameBuffer> for Broken {
        fn init(&self, _previous: Image, _actual: Image) -> Result<Box<dyn TransitionBody<FrameBuffer>>, SceneError> {
            Err(SceneError::msg("broken"))
        }
    }

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn plays_until_the_body_stops() {
        let log = new_log();
        let half = Transition::simple(RecordingTransition::new(&log, 2)).half(TransitionContext::Show);
        let mut host = FakeHost::new();

        play(&mut host, RED, BLUE, &half).unwrap();

        assert_eq!(*log.borrow(), vec!["T.init", "T.frame", "T.frame", "T.destroy"]);
        assert_eq!(host.presented, 3);
        assert_eq!(host.stuck, vec![true, false]);
        assert!(!host.renderer.is_capturing());
        // Last frame shows the next scene at full opacity.
        assert_eq!(host.renderer.display().pixel(1, 1), Some(BLUE));
    }

    #[test]
    fn closing_the_window_interrupts_playback() {
        let log = new_log();
        let half = Transition::simple(RecordingTransition::new(&log, 10)).half(TransitionContext::Show);
        let mut host = FakeHost::new();
        host.frames_left = Some(1);

        play(&mut host, RED, BLUE, &half).unwrap();

        assert_eq!(*log.borrow(), vec!["T.init", "T.frame", "T.destroy"]);
        assert_eq!(host.presented, 1);
        assert_eq!(host.stuck, vec![true, false]);
    }

    #[test]
    fn failed_init_leaves_the_host_untouched() {
        let half = Transition::simple(Broken).half(TransitionContext::Show);
        let mut host = FakeHost::new();

        let result = play(&mut host, RED, BLUE, &half);

        assert!(matches!(result, Err(SceneError::Hook(_))));
        assert!(host.stuck.is_empty());
        assert!(!host.renderer.is_capturing());
    }

    #[test]
    fn failed_capture_is_closed() {
        let log = new_log();
        let half = Transition::simple(RecordingTransition::new(&log, 1)).half(TransitionContext::Show);
        let mut host = FakeHost::new();
        host.fail_draw = true;

        assert!(play(&mut host, RED, BLUE, &half).is_err());
        assert!(!host.renderer.is_capturing());
        assert!(log.borrow().is_empty());
    }
}
