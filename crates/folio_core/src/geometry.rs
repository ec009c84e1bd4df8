//! On-screen geometry

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in viewport pixels
///
/// Field order and names match a DOM `getBoundingClientRect()` subset so the
/// value can round-trip through route query strings unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Full-viewport rectangle anchored at the origin
    pub const fn viewport(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.left.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Linear interpolation of every edge
    pub fn lerp(&self, other: &Rect, t: f32) -> Rect {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Rect {
            top: mix(self.top, other.top),
            left: mix(self.left, other.left),
            width: mix(self.width, other.width),
            height: mix(self.height, other.height),
        }
    }
}
