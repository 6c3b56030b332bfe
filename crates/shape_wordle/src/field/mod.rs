//! Distance-field subsystem: dense per-region fields, pixel ownership and extreme points.
//!
//! Raw shape input ([`RegionShape`]) is turned into [`Region`]s by
//! [`preprocess_distance_field`]; the placement engine later reads the smoothed fields and
//! the [`RegionMap`].
pub mod extreme;
pub mod grid;
pub mod ownership;
pub mod preprocess;

pub use extreme::ExtremePoint;
pub use grid::{DistanceField, DistanceSample, BACKGROUND};
pub use ownership::RegionMap;
pub use preprocess::{
    preprocess_distance_field, preprocess_distance_field_with_events, Region, RegionShape,
};
