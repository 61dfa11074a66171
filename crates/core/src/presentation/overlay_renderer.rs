use crate::presentation::domain::presentation_surface::{Color, PresentationSurface};
use crate::shared::detection::{Detection, RecognitionResult};
use crate::shared::frame::Frame;
use crate::shared::region::Rect;

pub const BOX_LINE_WIDTH: u32 = 3;
pub const LABEL_STRIP_HEIGHT: i32 = 25;
pub const LABEL_TEXT_INSET_X: i32 = 5;
pub const LABEL_TEXT_BASELINE: i32 = 8;

/// Composites a recognition result over the frame it was sampled from.
///
/// Every render starts from a cleared surface, so repeated calls never
/// accumulate boxes from earlier results.
#[derive(Clone, Debug)]
pub struct OverlayRenderer {
    known_color: Color,
    unknown_color: Color,
    text_color: Color,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self {
            known_color: Color::SUCCESS,
            unknown_color: Color::WARNING,
            text_color: Color::WHITE,
        }
    }

    pub fn render(
        &self,
        surface: &mut dyn PresentationSurface,
        frame: Option<&Frame>,
        result: &RecognitionResult,
    ) {
        surface.clear();
        if let Some(frame) = frame {
            surface.draw_frame(frame);
        }
        for detection in result.detections() {
            self.draw_detection(surface, detection);
        }
        surface.present();
    }

    /// Erases frame and overlay.
    pub fn clear(&self, surface: &mut dyn PresentationSurface) {
        surface.clear();
        surface.present();
    }

    pub fn color_for(&self, detection: &Detection) -> Color {
        if detection.is_unknown() {
            self.unknown_color
        } else {
            self.known_color
        }
    }

    fn draw_detection(&self, surface: &mut dyn PresentationSurface, detection: &Detection) {
        let color = self.color_for(detection);
        let rect = detection.location.to_rect();
        surface.stroke_rect(rect, color, BOX_LINE_WIDTH);

        let strip = Rect::new(
            rect.x,
            rect.y.saturating_sub(LABEL_STRIP_HEIGHT),
            rect.width,
            LABEL_STRIP_HEIGHT,
        );
        surface.fill_rect(strip, color);
        surface.fill_text(
            &detection.label(),
            rect.x.saturating_add(LABEL_TEXT_INSET_X),
            rect.y.saturating_sub(LABEL_TEXT_BASELINE),
            self.text_color,
        );
    }
}

impl Default for OverlayRenderer {
    fn default() -> Self {
        Self::new()
    }
}
