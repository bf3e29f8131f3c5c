//! Disc-shaped brush geometry

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Smallest brush radius front ends allow
pub const MIN_BRUSH_RADIUS: u32 = 1;
/// Largest brush radius front ends allow
pub const MAX_BRUSH_RADIUS: u32 = 30;

/// Offsets `(dx, dy)` with `dx² + dy² <= radius²`, row by row
///
/// Radius 0 yields the center cell only.
pub fn disc_offsets(radius: u32) -> impl Iterator<Item = IVec2> {
    let r = i32::try_from(radius).unwrap_or(i32::MAX / 2);
    (-r..=r).flat_map(move |dy| {
        (-r..=r).filter_map(move |dx| {
            in_disc(i64::from(dx), i64::from(dy), radius).then_some(IVec2::new(dx, dy))
        })
    })
}

/// Whether offset `(dx, dy)` lies inside the disc of `radius`
pub(crate) fn in_disc(dx: i64, dy: i64, radius: u32) -> bool {
    let r = i128::from(radius);
    let (dx, dy) = (i128::from(dx), i128::from(dy));
    dx * dx + dy * dy <= r * r
}

/// Brush radius clamped to `[MIN_BRUSH_RADIUS, MAX_BRUSH_RADIUS]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct BrushSize(u32);

impl BrushSize {
    pub fn new(radius: u32) -> Self {
        Self(radius.clamp(MIN_BRUSH_RADIUS, MAX_BRUSH_RADIUS))
    }

    pub fn radius(self) -> u32 {
        self.0
    }

    pub fn grow(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    pub fn shrink(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for BrushSize {
    fn default() -> Self {
        Self(3)
    }
}

impl From<u32> for BrushSize {
    fn from(radius: u32) -> Self {
        Self::new(radius)
    }
}

impl From<BrushSize> for u32 {
    fn from(size: BrushSize) -> Self {
        size.0
    }
}
