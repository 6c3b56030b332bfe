//! Pixel-to-region ownership map.
//!
//! The shape preprocessor labels every canvas pixel either with [`OUTSIDE`] or with
//! `region_id + REGION_OFFSET`. The layout only ever reads this map.
use glam::Vec2;

use crate::error::{Error, Result};

/// Raw label for pixels outside every region.
pub const OUTSIDE: u32 = 0;

/// Offset added to a region index in the raw labels. Labels below the offset are reserved
/// for background and contour pixels.
pub const REGION_OFFSET: u32 = 2;

/// Pixel ownership map of size `width x height`.
#[derive(Clone, Debug)]
pub struct RegionMap {
    width: usize,
    height: usize,
    labels: Vec<u32>,
}

impl RegionMap {
    /// Creates a map with every pixel outside all regions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            labels: vec![OUTSIDE; width * height],
        }
    }

    /// Wraps raw row-major labels (`labels[y * width + x]`).
    pub fn from_raw(width: usize, height: usize, labels: Vec<u32>) -> Result<Self> {
        if labels.len() != width * height {
            return Err(Error::ShapeMismatch(format!(
                "region map has {} labels, expected {}x{}",
                labels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            labels,
        })
    }

    /// Map dimensions as `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Assigns pixel `(x, y)` to `region_id`. Out-of-bounds writes are ignored.
    pub fn set_region(&mut self, x: usize, y: usize, region_id: usize) {
        if x < self.width && y < self.height {
            self.labels[y * self.width + x] = region_id as u32 + REGION_OFFSET;
        }
    }

    /// Region owning pixel `(x, y)`, if any.
    pub fn region_at(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
            return None;
        }
        let label = self.labels[y as usize * self.width + x as usize];
        label
            .checked_sub(REGION_OFFSET)
            .map(|region_id| region_id as usize)
    }

    /// Region owning the pixel that contains `p`.
    #[inline]
    pub fn region_at_point(&self, p: Vec2) -> Option<usize> {
        if !p.x.is_finite() || !p.y.is_finite() {
            return None;
        }
        self.region_at(p.x.floor() as isize, p.y.floor() as isize)
    }

    /// Returns `true` if the pixel containing `p` belongs to `region_id`.
    #[inline]
    pub fn is_in_region(&self, p: Vec2, region_id: usize) -> bool {
        self.region_at_point(p) == Some(region_id)
    }
}
