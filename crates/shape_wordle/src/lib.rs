#![forbid(unsafe_code)]
//! shape_wordle: word clouds laid out inside arbitrary silhouettes.
//!
//! Modules:
//! - geometry: segment and convex polygon intersection, rotation helpers
//! - field: per-region distance fields, ownership map, extreme point preprocessing
//! - text: text measurement trait, memoizing cache, deterministic metrics
//! - words: tokens, keywords and orientation policies
//! - layout: allocation, font-size search, spiral placement, orchestration and events
//!
//! Silhouette extraction, text shaping and rendering are left to the caller. The crate consumes
//! per-region contours with sparse distance samples, a pixel ownership map and a
//! [`text::TextMeasure`] implementation, and produces positioned words.
use rand::Rng;

pub mod error;
pub mod field;
pub mod geometry;
pub mod layout;
pub mod text;
pub mod words;

/// Convenient re-exports for common types. Import with `use shape_wordle::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::field::{
        preprocess_distance_field, DistanceField, DistanceSample, ExtremePoint, Region,
        RegionMap, RegionShape,
    };
    pub use crate::layout::config::{FillMode, FontScale, LayoutConfig, RegionPolicy, Thresholds};
    pub use crate::layout::events::{
        EventSink, FnSink, LayoutEvent, LayoutEventKind, MultiSink, VecSink,
    };
    pub use crate::layout::runner::{LayoutResult, PlacedWord, ShapeWordle};
    pub use crate::layout::wordle::generate_wordle;
    pub use crate::layout::allocate::allocate_words;
    pub use crate::text::{FixedAdvanceMetrics, MeasureCache, TextExtent, TextMeasure};
    pub use crate::words::{
        prepare_filling_words, prepare_keywords, FillingWord, GlyphBox, Orientation, Token, Word,
    };
}

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn Rng) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}
