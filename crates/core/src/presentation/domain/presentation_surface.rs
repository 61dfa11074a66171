use crate::shared::frame::Frame;
use crate::shared::region::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }

    pub const WHITE: Color = Color::hex(0xffffff);
    pub const BLACK: Color = Color::hex(0x000000);
    pub const SUCCESS: Color = Color::hex(0x27ae60);
    pub const WARNING: Color = Color::hex(0xe74c3c);
    pub const INFO: Color = Color::hex(0x3498db);

    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Drawable area onto which frames and overlays are composited.
///
/// Coordinates are surface pixels; shapes partly outside the surface are
/// clipped by the implementation.
pub trait PresentationSurface: Send {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Erases everything drawn so far.
    fn clear(&mut self);

    /// Paints a video frame over the whole surface.
    fn draw_frame(&mut self, frame: &Frame);

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: u32);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draws `text` with its baseline starting at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: i32, y: i32, color: Color);

    /// Flushes the composited surface to its consumer. Default: no-op.
    fn present(&mut self) {}
}
