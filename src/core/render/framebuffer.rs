//=========================================================================
// Frame Buffer
//=========================================================================
//
// CPU-side RGBA renderer implementing the `Renderer` contract.
//
// The display target is a plain pixel buffer; captures push additional
// buffers of the same size. Backends present the display target however
// they like (window blit, screenshot, nothing in headless runs).
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Color, Renderer};

//=== Image ===============================================================

/// Owned RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Image {
    /// Creates an image filled with `color`.
    pub fn new(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            self.pixels[index] = color;
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

//=== FrameBuffer =========================================================

/// Software renderer over an in-memory display target.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    display: Image,
    captures: Vec<Image>,
}

impl FrameBuffer {
    //--- Construction -----------------------------------------------------

    pub fn new(width: u32, height: u32) -> Self {
        Self {
            display: Image::new(width, height, Color::BLACK),
            captures: Vec::new(),
        }
    }

    //--- Display Access ---------------------------------------------------

    /// The display target (what a backend presents).
    pub fn display(&self) -> &Image {
        &self.display
    }

    /// Resizes every target, discarding their content.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.display = Image::new(width, height, Color::BLACK);
        for capture in &mut self.captures {
            *capture = Image::new(width, height, Color::TRANSPARENT);
        }
    }

    /// Mutable access to the target currently drawn into.
    pub fn target_mut(&mut self) -> &mut Image {
        self.captures.last_mut().unwrap_or(&mut self.display)
    }

    pub fn target(&self) -> &Image {
        self.captures.last().unwrap_or(&self.display)
    }
}

impl Renderer for FrameBuffer {
    type Image = Image;

    fn size(&self) -> (u32, u32) {
        (self.display.width, self.display.height)
    }

    fn clear(&mut self, color: Color, blend_alpha: bool) {
        let target = self.target_mut();
        if blend_alpha {
            for pixel in &mut target.pixels {
                *pixel = color.blend_over(*pixel);
            }
        } else {
            target.pixels.fill(color.with_alpha(255));
        }
    }

    fn draw_image(&mut self, image: &Image, offset: (f32, f32), opacity: f32) {
        let (dx, dy) = (offset.0.round() as i64, offset.1.round() as i64);
        let target = self.target_mut();

        for y in 0..image.height {
            let ty = i64::from(y) + dy;
            if ty < 0 || ty >= i64::from(target.height) {
                continue;
            }
            for x in 0..image.width {
                let tx = i64::from(x) + dx;
                if tx < 0 || tx >= i64::from(target.width) {
                    continue;
                }
                let src = image.pixels[image.index(x, y)].with_opacity(opacity);
                let index = target.index(tx as u32, ty as u32);
                target.pixels[index] = src.blend_over(target.pixels[index]);
            }
        }
    }

    fn begin_capture(&mut self) {
        let (width, height) = self.size();
        self.captures.push(Image::new(width, height, Color::TRANSPARENT));
    }

    fn end_capture(&mut self) -> Image {
        self.captures.pop().unwrap_or_else(|| self.display.clone())
    }

    fn is_capturing(&self) -> bool {
        !self.captures.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
