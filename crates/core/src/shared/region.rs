use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in surface pixels. `y` may be negative for
/// shapes drawn above the top edge (label strips on faces near the top).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Intersection with a `width x height` canvas anchored at the origin,
    /// or `None` when nothing is visible.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Rect> {
        let x1 = self.x.max(0);
        let y1 = self.y.max(0);
        let x2 = self.right().min(width as i32);
        let y2 = self.bottom().min(height as i32);
        let clamped = Rect::new(x1, y1, x2.saturating_sub(x1), y2.saturating_sub(y1));
        (!clamped.is_empty()).then_some(clamped)
    }
}

/// Face bounding box as reported by the recognition service:
/// `[top, right, bottom, left]` in pixels of the sampled frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct FaceLocation {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl FaceLocation {
    pub fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Coordinates come from the network, so extreme values saturate
    /// instead of overflowing.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.right.saturating_sub(self.left),
            self.bottom.saturating_sub(self.top),
        )
    }
}

impl From<[i32; 4]> for FaceLocation {
    fn from([top, right, bottom, left]: [i32; 4]) -> Self {
        Self::new(top, right, bottom, left)
    }
}

impl From<FaceLocation> for [i32; 4] {
    fn from(loc: FaceLocation) -> Self {
        [loc.top, loc.right, loc.bottom, loc.left]
    }
}

impl std::fmt::Display for FaceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.top, self.right, self.bottom, self.left
        )
    }
}
