//! Word allocation, font sizing and spiral placement.
//!
//! The usual entry point is [`runner::ShapeWordle`]. The individual stages are public so that
//! callers with their own preprocessing can drive them directly:
//! [`allocate::allocate_words`] followed by [`wordle::generate_wordle`].
use crate::field::{Region, RegionMap};
use crate::text::TextMeasure;

pub mod allocate;
pub mod boxes;
pub mod config;
pub mod events;
pub mod order;
pub mod runner;
pub mod spiral;
pub mod wordle;

pub use config::{FillMode, FontScale, LayoutConfig, RegionPolicy, Thresholds};

/// Read-only inputs shared by the placement stages.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    pub regions: &'a [Region],
    pub region_map: &'a RegionMap,
    pub config: &'a LayoutConfig,
    pub measure: &'a dyn TextMeasure,
}

impl<'a> LayoutContext<'a> {
    pub fn new(
        regions: &'a [Region],
        region_map: &'a RegionMap,
        config: &'a LayoutConfig,
        measure: &'a dyn TextMeasure,
    ) -> Self {
        Self {
            regions,
            region_map,
            config,
            measure,
        }
    }
}
