//! Turns raw shape input into layout-ready [`Region`]s.
//!
//! Each region's sparse distance samples are scattered into a dense [`DistanceField`],
//! smoothed, and scanned for extreme points. Extreme points are then filtered per region,
//! merged across regions and given influence ratios.
use glam::Vec2;
use mint::Vector2;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::field::extreme::{
    assign_ratios, collapse_near_maximum, find_extremes, merge_close_points, ExtremePoint,
};
use crate::field::grid::{DistanceField, DistanceSample, SMOOTHING_PASSES};
use crate::layout::events::{EventSink, LayoutEvent, LayoutEventKind};

/// One connected shape component as delivered by the shape preprocessor.
#[derive(Clone, Debug)]
pub struct RegionShape {
    /// Closed boundary polygon in raster space.
    pub contour: Vec<Vec2>,
    /// Sparse interior distance samples.
    pub samples: Vec<DistanceSample>,
    /// Pixel area of the component.
    pub area: f32,
}

impl RegionShape {
    pub fn new<P, I>(contour: I, samples: Vec<DistanceSample>, area: f32) -> Self
    where
        P: Into<Vector2<f32>>,
        I: IntoIterator<Item = P>,
    {
        Self {
            contour: contour
                .into_iter()
                .map(|p| Vec2::from(p.into()))
                .collect(),
            samples,
            area,
        }
    }
}

/// A shape component ready for allocation and placement.
#[derive(Clone, Debug)]
pub struct Region {
    /// Closed boundary polygon.
    pub contour: Vec<Vec2>,
    /// Smoothed distance field.
    pub field: DistanceField,
    /// Anchor points, sorted by value descending.
    pub extreme_points: Vec<ExtremePoint>,
    /// Pixel area.
    pub area: f32,
    /// Value of the primary extreme point.
    pub value: f32,
    /// Number of words the allocator targets for this region.
    pub words_num: usize,
    /// Maximum word weight the allocator accepts for this region.
    pub words_weight: f32,
}

impl Region {
    /// The primary (highest value) extreme point.
    pub fn top_point(&self) -> Option<&ExtremePoint> {
        self.extreme_points.first()
    }
}

/// Builds regions from raw shape input on a `width x height` canvas.
///
/// Fails with [`Error::EmptyRegion`] if a region has no interior pixel inside the scan
/// window, and with [`Error::ShapeMismatch`] if the shape list is empty.
pub fn preprocess_distance_field(
    shapes: &[RegionShape],
    width: usize,
    height: usize,
) -> Result<Vec<Region>> {
    preprocess_distance_field_with_events(shapes, width, height, &mut ())
}

/// Like [`preprocess_distance_field`], reporting a [`LayoutEvent::Warning`] for every region
/// whose extreme points were all merged into a neighbour's.
pub fn preprocess_distance_field_with_events(
    shapes: &[RegionShape],
    width: usize,
    height: usize,
    sink: &mut dyn EventSink,
) -> Result<Vec<Region>> {
    if shapes.is_empty() {
        return Err(Error::ShapeMismatch("no regions supplied".into()));
    }

    let mut fields = Vec::with_capacity(shapes.len());
    let mut candidates = Vec::new();
    let mut strongest: Vec<ExtremePoint> = Vec::with_capacity(shapes.len());

    for (region_id, shape) in shapes.iter().enumerate() {
        let mut field = DistanceField::from_samples(width, height, &shape.samples);
        field.smooth_n(SMOOTHING_PASSES);

        let scan = find_extremes(&field, region_id)?;
        let fallback = ExtremePoint::new(scan.center, scan.max_value, region_id);
        let points = collapse_near_maximum(scan, region_id);
        debug!(
            "Region {}: {} extreme point candidates, max {:.2}.",
            region_id,
            points.len(),
            fallback.value
        );

        strongest.push(fallback);
        candidates.extend(points);
        fields.push(field);
    }

    let merged = merge_close_points(candidates);

    let regions = shapes
        .iter()
        .zip(fields)
        .enumerate()
        .map(|(region_id, (shape, field))| {
            let mut own: Vec<ExtremePoint> = merged
                .iter()
                .filter(|p| p.region_id == region_id)
                .cloned()
                .collect();
            if own.is_empty() {
                warn!(
                    "Region {} lost all extreme points to a neighbour; keeping its maximum.",
                    region_id
                );
                if sink.wants(LayoutEventKind::Warning) {
                    sink.send(LayoutEvent::Warning {
                        context: format!("region {region_id}"),
                        message: "all extreme points merged into a neighbour; kept the maximum"
                            .into(),
                    });
                }
                own.push(strongest[region_id].clone());
            }
            let extreme_points = assign_ratios(own);
            let value = extreme_points.first().map_or(0.0, |p| p.value);
            Region {
                contour: shape.contour.clone(),
                field,
                extreme_points,
                area: shape.area,
                value,
                words_num: 0,
                words_weight: 0.0,
            }
        })
        .collect();

    Ok(regions)
}
