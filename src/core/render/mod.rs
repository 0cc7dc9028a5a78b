//=========================================================================
// Rendering Interface
//=========================================================================
//
// The narrow renderer contract consumed by the scene core.
//
// Scenes draw through a `Renderer`; the transition driver additionally
// needs to capture frames into offscreen images and draw those images
// back. Presenting the finished frame belongs to the `Window`.
//
// Architecture:
//   Renderer ──begin_capture()──> offscreen target (stackable)
//            <──end_capture()──── Image
//            ──draw_image()────> current target
//
//=========================================================================

//=== Module Declarations =================================================

mod framebuffer;

//=== Public API ==========================================================

pub use framebuffer::{FrameBuffer, Image};

//=== Color ===============================================================

/// Straight-alpha RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Returns the color with its alpha scaled by `opacity` (clamped to `[0, 1]`).
    pub fn with_opacity(self, opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Self {
            a: (f32::from(self.a) * opacity).round() as u8,
            ..self
        }
    }

    /// Composites `self` over `dst` (source-over).
    pub fn blend_over(self, dst: Color) -> Color {
        match self.a {
            255 => return self,
            0 => return dst,
            _ => {}
        }

        let src_a = f32::from(self.a) / 255.0;
        let dst_a = f32::from(dst.a) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return Color::TRANSPARENT;
        }

        let channel = |s: u8, d: u8| -> u8 {
            let s = f32::from(s) * src_a;
            let d = f32::from(d) * dst_a * (1.0 - src_a);
            ((s + d) / out_a).round().clamp(0.0, 255.0) as u8
        };

        Color {
            r: channel(self.r, dst.r),
            g: channel(self.g, dst.g),
            b: channel(self.b, dst.b),
            a: (out_a * 255.0).round() as u8,
        }
    }
}

//=== Renderer Trait ======================================================

/// Drawing surface used by scenes, dialogs and transitions.
///
/// Captures nest: every `begin_capture` redirects drawing into a fresh
/// offscreen target until the matching `end_capture`, which returns the
/// captured image and restores the previous target.
pub trait Renderer {
    /// Offscreen image produced by a capture.
    type Image;

    /// Size of the drawing surface in pixels.
    fn size(&self) -> (u32, u32);

    /// Fills the current target with `color`.
    ///
    /// Without `blend_alpha` the fill is opaque whatever the alpha of
    /// `color`. With it the color is composited over the existing pixels
    /// (used to layer dialogs over their master).
    fn clear(&mut self, color: Color, blend_alpha: bool);

    /// Draws a captured image onto the current target.
    fn draw_image(&mut self, image: &Self::Image, offset: (f32, f32), opacity: f32);

    /// Redirects drawing into a new offscreen target.
    fn begin_capture(&mut self);

    /// Ends the innermost capture and returns what was drawn into it.
    ///
    /// Without an active capture this returns a copy of the display target.
    fn end_capture(&mut self) -> Self::Image;

    /// Returns true while at least one capture is active.
    fn is_capturing(&self) -> bool;
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_source_replaces_destination() {
        assert_eq!(Color::WHITE.blend_over(Color::BLACK), Color::WHITE);
    }

    #[test]
    fn transparent_source_keeps_destination() {
        let dst = Color::rgb(10, 20, 30);
        assert_eq!(Color::TRANSPARENT.blend_over(dst), dst);
    }

    #[test]
    fn half_alpha_mixes_channels() {
        let src = Color::rgba(255, 0, 0, 128);
        let out = src.blend_over(Color::rgb(0, 0, 255));

        assert_eq!(out.a, 255);
        assert!(out.r > 120 && out.r < 135, "r = {}", out.r);
        assert!(out.b > 120 && out.b < 135, "b = {}", out.b);
    }

    #[test]
    fn opacity_scales_alpha() {
        assert_eq!(Color::WHITE.with_opacity(0.5).a, 128);
        assert_eq!(Color::WHITE.with_opacity(2.0).a, 255);
        assert_eq!(Color::WHITE.with_opacity(-1.0).a, 0);
    }
}
