use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontRef, GlyphId, PxScale, ScaleFont};
use image::{Rgb, RgbImage};

use crate::presentation::domain::presentation_surface::{Color, PresentationSurface};
use crate::shared::frame::Frame;
use crate::shared::region::Rect;

const LABEL_FONT: &[u8] = include_bytes!("../../../assets/DejaVuSans.ttf");
const LABEL_FONT_PX: f32 = 16.0;

/// A text label placed on the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

/// In-memory RGB canvas backed by the `image` crate.
///
/// Text is rasterized with the bundled DejaVu Sans at 16 px, `y` being the
/// baseline. Labels are also kept as a record of what was written. When an
/// output path is set, every `present` writes the canvas to that file.
pub struct RasterSurface {
    canvas: RgbImage,
    font: Option<FontRef<'static>>,
    labels: Vec<TextLabel>,
    output: Option<PathBuf>,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        let font = FontRef::try_from_slice(LABEL_FONT)
            .map_err(|e| log::warn!("Label font unusable, text will not be drawn: {e}"))
            .ok();
        Self {
            canvas: RgbImage::new(width, height),
            font,
            labels: Vec::new(),
            output: None,
        }
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.canvas.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Writes the canvas to `path`; the format follows the extension.
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.canvas.save(path)?;
        Ok(())
    }

    fn fill_clipped(&mut self, rect: Rect, color: Color) {
        let Some(rect) = rect.clamp_to(self.canvas.width(), self.canvas.height()) else {
            return;
        };
        let pixel = Rgb(color.to_rgb());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.canvas.put_pixel(x as u32, y as u32, pixel);
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, baseline: i32, color: Color) {
        let Some(font) = &self.font else {
            return;
        };
        let scaled = font.as_scaled(PxScale::from(LABEL_FONT_PX));
        let (width, height) = self.canvas.dimensions();
        let ink = color.to_rgb();
        let canvas = &mut self.canvas;

        let mut caret = x as f32;
        let mut previous: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scaled.scale(), point(caret, baseline as f32));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
            outlined.draw(|gx, gy, coverage| {
                let px = left.saturating_add(gx as i32);
                let py = top.saturating_add(gy as i32);
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    return;
                }
                let alpha = coverage.clamp(0.0, 1.0);
                let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                for (channel, &target) in pixel.0.iter_mut().zip(ink.iter()) {
                    let blended = f32::from(*channel) * (1.0 - alpha) + f32::from(target) * alpha;
                    *channel = blended.round() as u8;
                }
            });
        }
    }
}

impl PresentationSurface for RasterSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn clear(&mut self) {
        for pixel in self.canvas.pixels_mut() {
            *pixel = Rgb(Color::BLACK.to_rgb());
        }
        self.labels.clear();
    }

    fn draw_frame(&mut self, frame: &Frame) {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        let Some(img) = frame.clone().into_rgb_image() else {
            log::warn!(
                "Frame {} has inconsistent pixel data, not drawn",
                frame.index()
            );
            return;
        };
        self.canvas = if img.dimensions() == (w, h) {
            img
        } else {
            image::imageops::resize(&img, w, h, image::imageops::FilterType::Triangle)
        };
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: u32) {
        let lw = line_width.clamp(1, 1024) as i32;
        // Centered on the rectangle edge, like a canvas stroke.
        let inset = lw / 2;
        let outer = Rect::new(
            rect.x.saturating_sub(inset),
            rect.y.saturating_sub(inset),
            rect.width.saturating_add(lw - 1),
            rect.height.saturating_add(lw - 1),
        );
        self.fill_clipped(Rect::new(outer.x, outer.y, outer.width, lw), color);
        self.fill_clipped(
            Rect::new(outer.x, outer.bottom().saturating_sub(lw), outer.width, lw),
            color,
        );
        self.fill_clipped(Rect::new(outer.x, outer.y, lw, outer.height), color);
        self.fill_clipped(
            Rect::new(outer.right().saturating_sub(lw), outer.y, lw, outer.height),
            color,
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill_clipped(rect, color);
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        self.draw_text(text, x, y, color);
        self.labels.push(TextLabel {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }

    fn present(&mut self) {
        if let Some(path) = self.output.clone() {
            if let Err(e) = self.save(&path) {
                log::error!("Failed to write overlay to {}: {e}", path.display());
            }
        }
    }
}
