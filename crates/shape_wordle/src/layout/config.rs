//! Layout configuration and the mutable font scale.
use crate::error::{Error, Result};
use crate::words::Orientation;

/// Per-word iteration budget of the spiral search.
pub const DEFAULT_ITERATION_LIMIT: usize = 12_000;

/// How the allocator weighs regions against each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegionPolicy {
    /// Larger regions get more and heavier words.
    #[default]
    Area,
    /// Regions with a larger primary extreme point get more and heavier words.
    DistanceValue,
}

/// How the global font size is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillMode {
    /// Largest size within the configured range that keeps every region below the fill bound.
    #[default]
    Bounded,
    /// Grow or shrink the size until regions are nearly full, ignoring the configured maximum.
    Max,
}

/// Calibration constants of the allocator and the placement engine.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    /// Words whose weight differs from this get per-glyph collision boxes.
    pub glyph_box_weight: f32,
    /// Words with exactly this weight are checked for containment without shrinking.
    pub containment_weight: f32,
    /// Words with exactly this weight are seeded further from their anchor.
    pub seed_spread_weight: f32,
    /// Regions at or below this value get no words when a strong region exists.
    pub weak_region_value: f32,
    /// A region above this value counts as strong.
    pub strong_region_value: f32,
    /// Regions below this value only accept short names.
    pub short_name_region_value: f32,
    /// Longest name accepted by regions below `short_name_region_value`.
    pub short_name_len: usize,
    /// Extreme points below this value get no words.
    pub min_point_value: f32,
    /// Max-fill mode grows the font while the fullest region stays below this ratio.
    pub max_fill_low: f32,
    /// Max-fill mode shrinks the font while the emptiest region stays above this ratio.
    pub max_fill_high: f32,
    /// Bounded mode keeps every region at or below this ratio.
    pub bounded_fill: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            glyph_box_weight: 0.5,
            containment_weight: 0.7,
            seed_spread_weight: 0.8,
            weak_region_value: 18.0,
            strong_region_value: 45.0,
            short_name_region_value: 24.0,
            short_name_len: 5,
            min_point_value: 20.0,
            max_fill_low: 0.75,
            max_fill_high: 0.8,
            bounded_fill: 0.65,
        }
    }
}

/// Configuration for a layout run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    /// Canvas width in pixels.
    pub width: usize,
    /// Canvas height in pixels.
    pub height: usize,
    /// Number of tokens turned into keywords.
    pub keywords_num: usize,
    pub min_font_size: f32,
    /// Upper bound of the font-size search; only the starting point in max-fill mode.
    pub max_font_size: f32,
    pub region_policy: RegionPolicy,
    pub fill_mode: FillMode,
    /// Tolerance for weight comparisons against the thresholds.
    pub eps: f32,
    pub orientation: Orientation,
    pub font_family: String,
    pub thresholds: Thresholds,
    /// Spiral search iterations per word and pass.
    pub iteration_limit: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 600,
            keywords_num: 60,
            min_font_size: 2.0,
            max_font_size: 100.0,
            region_policy: RegionPolicy::default(),
            fill_mode: FillMode::default(),
            eps: 1e-7,
            orientation: Orientation::default(),
            font_family: "Arial".into(),
            thresholds: Thresholds::default(),
            iteration_limit: DEFAULT_ITERATION_LIMIT,
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`] for a canvas of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_keywords_num(mut self, keywords_num: usize) -> Self {
        self.keywords_num = keywords_num;
        self
    }

    /// Sets the font size range.
    pub fn with_font_sizes(mut self, min_font_size: f32, max_font_size: f32) -> Self {
        self.min_font_size = min_font_size;
        self.max_font_size = max_font_size;
        self
    }

    pub fn with_region_policy(mut self, region_policy: RegionPolicy) -> Self {
        self.region_policy = region_policy;
        self
    }

    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    pub fn with_eps(mut self, eps: f32) -> Self {
        self.eps = eps;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_iteration_limit(mut self, iteration_limit: usize) -> Self {
        self.iteration_limit = iteration_limit;
        self
    }

    /// Returns `true` when `weight` equals `target` within [`LayoutConfig::eps`].
    #[inline]
    pub fn weight_is(&self, weight: f32, target: f32) -> bool {
        (weight - target).abs() <= self.eps
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.width < 5 || self.height < 5 {
            return Err(Error::InvalidConfig(
                "canvas must be at least 5x5 pixels".into(),
            ));
        }
        if self.keywords_num == 0 {
            return Err(Error::InvalidConfig("keywords_num must be > 0".into()));
        }
        if self.min_font_size.is_nan() || self.min_font_size <= 0.0 {
            return Err(Error::InvalidConfig("min_font_size must be > 0".into()));
        }
        if self.max_font_size.is_nan() || self.max_font_size < self.min_font_size {
            return Err(Error::InvalidConfig(
                "max_font_size must be >= min_font_size".into(),
            ));
        }
        if self.eps.is_nan() || self.eps < 0.0 {
            return Err(Error::InvalidConfig("eps must be >= 0".into()));
        }
        if self.iteration_limit == 0 {
            return Err(Error::InvalidConfig("iteration_limit must be > 0".into()));
        }
        let t = &self.thresholds;
        if t.bounded_fill <= 0.0 || t.max_fill_low <= 0.0 || t.max_fill_high < t.max_fill_low {
            return Err(Error::InvalidConfig(
                "fill thresholds must be > 0 with max_fill_high >= max_fill_low".into(),
            ));
        }
        Ok(())
    }
}

/// The global font scale of a layout run.
///
/// The allocator picks the initial maximum size and the orchestrator shrinks it on placement
/// failure. Word font sizes interpolate between the bounds by the square root of the weight.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontScale {
    pub min_font_size: f32,
    pub max_font_size: f32,
}

impl FontScale {
    pub fn new(min_font_size: f32, max_font_size: f32) -> Self {
        Self {
            min_font_size,
            max_font_size,
        }
    }

    /// The configured range, before any search.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.min_font_size, config.max_font_size)
    }

    /// Copy with a different maximum.
    pub fn with_max(self, max_font_size: f32) -> Self {
        Self {
            max_font_size,
            ..self
        }
    }

    /// Font size for a word of the given weight.
    #[inline]
    pub fn font_size(&self, weight: f32) -> f32 {
        (self.max_font_size - self.min_font_size) * weight.sqrt() + self.min_font_size
    }
}
