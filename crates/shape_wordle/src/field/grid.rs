//! Dense per-region distance field storage.
//!
//! A [`DistanceField`] stores one value per canvas pixel. Values `>= 0` are distances to the
//! nearest shape boundary; negative values mark background. Cells are addressed `(x, y)` with
//! `x` along the canvas width.
use glam::Vec2;
use tracing::warn;

/// Value used for background cells and for reads outside the grid.
pub const BACKGROUND: f32 = -1.0;

/// Number of smoothing passes applied to freshly scattered samples.
pub const SMOOTHING_PASSES: usize = 3;

const SMOOTHING_KERNEL: [[f32; 3]; 3] = [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]];
const SMOOTHING_NORM: f32 = 16.0;

/// A sparse distance sample produced by the shape preprocessor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceSample {
    pub x: usize,
    pub y: usize,
    pub value: f32,
}

impl DistanceSample {
    pub fn new(x: usize, y: usize, value: f32) -> Self {
        Self { x, y, value }
    }
}

/// Dense distance field covering the whole canvas.
#[derive(Clone, Debug)]
pub struct DistanceField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl DistanceField {
    /// Creates a field of the given size with every cell set to [`BACKGROUND`].
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![BACKGROUND; width * height],
        }
    }

    /// Scatters sparse samples into a background-initialized field.
    ///
    /// Samples outside the canvas are skipped.
    pub fn from_samples(width: usize, height: usize, samples: &[DistanceSample]) -> Self {
        let mut field = Self::new(width, height);
        let mut skipped = 0usize;
        for s in samples {
            if s.x < width && s.y < height {
                field.set(s.x, s.y, s.value);
            } else {
                skipped += 1;
            }
        }
        if skipped > 0 {
            warn!("Skipped {} distance samples outside the {}x{} canvas.", skipped, width, height);
        }
        field
    }

    /// Field dimensions as `(width, height)`.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Value at integer cell `(x, y)`, [`BACKGROUND`] when out of bounds.
    #[inline]
    pub fn get(&self, x: isize, y: isize) -> f32 {
        if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
            return BACKGROUND;
        }
        self.data[self.index(x as usize, y as usize)]
    }

    /// Sets the value of cell `(x, y)`. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.data[i] = value;
        }
    }

    /// Value of the cell containing the raster position `p`.
    #[inline]
    pub fn value_at(&self, p: Vec2) -> f32 {
        if !p.x.is_finite() || !p.y.is_finite() {
            return BACKGROUND;
        }
        self.get(p.x.floor() as isize, p.y.floor() as isize)
    }

    /// One in-place pass of the 3x3 binomial smoothing kernel.
    ///
    /// Cells are visited column by column and already-smoothed neighbours feed later cells.
    /// The outermost ring is left untouched.
    pub fn smooth(&mut self) {
        if self.width < 3 || self.height < 3 {
            return;
        }
        for x in 1..self.width - 1 {
            for y in 1..self.height - 1 {
                let mut value = 0.0;
                for (i, row) in SMOOTHING_KERNEL.iter().enumerate() {
                    for (j, k) in row.iter().enumerate() {
                        value += k * self.data[self.index(x + i - 1, y + j - 1)];
                    }
                }
                let idx = self.index(x, y);
                self.data[idx] = value / SMOOTHING_NORM;
            }
        }
    }

    /// Applies [`DistanceField::smooth`] `passes` times.
    pub fn smooth_n(&mut self, passes: usize) {
        for _ in 0..passes {
            self.smooth();
        }
    }
}
