//! Axis-aligned hitboxes
//!
//! Every hitbox is derived from its owner's position and displayed size each
//! time it is needed; nothing stores a rectangle as ground truth.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Screen-space rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle with top-left corner at `pos`
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, pos.x + size.x, pos.y + size.y)
    }

    /// Sprite rect shrunk on each side by `floor(size / divisor)`
    ///
    /// Sprites carry transparent padding; the inset keeps grazing contact
    /// from registering as a hit.
    pub fn inset_from(pos: Vec2, size: Vec2, divisor: f32) -> Self {
        let sx = (size.x / divisor).floor();
        let sy = (size.y / divisor).floor();
        Self::new(pos.x + sx, pos.y + sy, pos.x + size.x - sx, pos.y + size.y - sy)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// True unless one rect lies entirely left, right, above or below the other.
/// Touching edges count as overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.right < b.left || a.left > b.right || a.bottom < b.top || a.top > b.bottom)
}
