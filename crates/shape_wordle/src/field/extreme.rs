//! Extreme point detection and filtering.
//!
//! Extreme points are strict local maxima of a smoothed [`DistanceField`]. They anchor the
//! placement of salient words near the widest interior areas of a region.
use glam::Vec2;

use crate::error::{Error, Result};
use crate::field::grid::DistanceField;
use crate::geometry::{distance, round_to};

/// Cells closer than this to the canvas edge are never scanned.
pub const SCAN_BORDER: usize = 2;

/// Local maxima closer than this to the global maximum collapse into it.
pub const COLLAPSE_RADIUS: f32 = 100.0;

/// Extreme points closer than this to each other are merged across regions.
pub const MERGE_RADIUS: f32 = 60.0;

/// An anchor point for word placement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtremePoint {
    /// Raster position.
    pub position: Vec2,
    /// Distance-field value at the position.
    pub value: f32,
    /// Region this point was found in.
    pub region_id: usize,
    /// Share of the region's influence, `value^2` normalized over the region's points.
    pub ratio: f32,
    /// Maximum word weight the allocator accepts for this point.
    pub ep_weight: f32,
    /// Number of words the allocator assigns to this point.
    pub ep_number: usize,
}

impl ExtremePoint {
    pub fn new(position: Vec2, value: f32, region_id: usize) -> Self {
        Self {
            position,
            value,
            region_id,
            ratio: 0.0,
            ep_weight: 0.0,
            ep_number: 0,
        }
    }
}

/// Result of scanning a field for maxima.
#[derive(Clone, Debug)]
pub struct FieldScan {
    /// Strict local maxima in scan order.
    pub local_maxima: Vec<ExtremePoint>,
    /// Global maximum value.
    pub max_value: f32,
    /// Position of the global maximum.
    pub center: Vec2,
}

/// Scans `field` (excluding a [`SCAN_BORDER`] margin) for its global maximum and all strict
/// local maxima among foreground cells.
///
/// Fails with [`Error::EmptyRegion`] when no foreground cell lies inside the scan window.
pub fn find_extremes(field: &DistanceField, region_id: usize) -> Result<FieldScan> {
    let (w, h) = field.size();
    let mut local_maxima = Vec::new();
    let mut best: Option<(f32, Vec2)> = None;

    for x in SCAN_BORDER..w.saturating_sub(SCAN_BORDER) {
        for y in SCAN_BORDER..h.saturating_sub(SCAN_BORDER) {
            let (xi, yi) = (x as isize, y as isize);
            let v = field.get(xi, yi);
            if v < 0.0 {
                continue;
            }
            if best.is_none_or(|(max, _)| v > max) {
                best = Some((v, Vec2::new(x as f32, y as f32)));
            }

            let is_peak = (-1..=1)
                .flat_map(|dx| (-1..=1).map(move |dy| (dx, dy)))
                .filter(|&(dx, dy)| dx != 0 || dy != 0)
                .all(|(dx, dy)| field.get(xi + dx, yi + dy) < v);
            if is_peak {
                local_maxima.push(ExtremePoint::new(
                    Vec2::new(x as f32, y as f32),
                    v.abs(),
                    region_id,
                ));
            }
        }
    }

    let (max_value, center) = best.ok_or(Error::EmptyRegion { region_id })?;
    Ok(FieldScan {
        local_maxima,
        max_value,
        center,
    })
}

/// Removes the local maximum sitting on the global maximum and pulls nearby maxima onto it.
///
/// A point within [`COLLAPSE_RADIUS`] of the center either takes over the center's position
/// and value, or is dropped when its predecessor already sits on the center. When no point
/// is near the center, the center itself is appended.
pub fn collapse_near_maximum(scan: FieldScan, region_id: usize) -> Vec<ExtremePoint> {
    let FieldScan {
        local_maxima,
        max_value,
        center,
    } = scan;
    let mut points: Vec<ExtremePoint> = local_maxima
        .into_iter()
        .filter(|p| p.position != center)
        .collect();

    let mut touched = false;
    let mut i = 0;
    while i < points.len() {
        if distance(points[i].position, center) < COLLAPSE_RADIUS {
            if i >= 1 && points[i - 1].position == center {
                points.remove(i);
            } else if points[i].value < max_value {
                points[i].position = center;
                points[i].value = max_value;
            }
            touched = true;
        }
        i += 1;
    }

    if !touched {
        points.push(ExtremePoint::new(center, max_value, region_id));
    }
    points
}

/// Greedily merges points closer than [`MERGE_RADIUS`], keeping the higher value.
pub fn merge_close_points(points: Vec<ExtremePoint>) -> Vec<ExtremePoint> {
    let mut kept: Vec<ExtremePoint> = Vec::with_capacity(points.len());
    for item in points {
        let mut has_close = false;
        for existing in kept.iter_mut() {
            if distance(item.position, existing.position) < MERGE_RADIUS {
                if existing.value < item.value {
                    *existing = item.clone();
                }
                has_close = true;
            }
        }
        if !has_close {
            kept.push(item);
        }
    }
    kept
}

/// Sorts a region's points by value (descending) and assigns rounded influence ratios.
pub fn assign_ratios(mut points: Vec<ExtremePoint>) -> Vec<ExtremePoint> {
    points.sort_by(|a, b| b.value.total_cmp(&a.value));
    let sum: f32 = points.iter().map(|p| p.value * p.value).sum();
    for p in points.iter_mut() {
        p.ratio = if sum > 0.0 {
            round_to(p.value * p.value / sum, 2)
        } else {
            0.0
        };
        p.value = round_to(p.value, 2);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::grid::DistanceSample;

    fn field_with_peaks(size: usize, peaks: &[(usize, usize, f32)]) -> DistanceField {
        // Cone-shaped bumps on a flat interior of value 1.
        let mut samples = Vec::new();
        for x in 0..size {
            for y in 0..size {
                let mut v: f32 = 1.0;
                for &(px, py, h) in peaks {
                    let d = ((x as f32 - px as f32).powi(2) + (y as f32 - py as f32).powi(2)).sqrt();
                    v = v.max(h - d);
                }
                samples.push(DistanceSample::new(x, y, v));
            }
        }
        DistanceField::from_samples(size, size, &samples)
    }

    #[test]
    fn scan_finds_global_and_local_maxima() {
        let field = field_with_peaks(40, &[(10, 10, 8.0), (30, 30, 12.0)]);
        let scan = find_extremes(&field, 0).unwrap();
        assert_eq!(scan.max_value, 12.0);
        assert_eq!(scan.center, Vec2::new(30.0, 30.0));
        let positions: Vec<_> = scan.local_maxima.iter().map(|p| p.position).collect();
        assert!(positions.contains(&Vec2::new(10.0, 10.0)));
        assert!(positions.contains(&Vec2::new(30.0, 30.0)));
    }

    #[test]
    fn scan_of_background_field_fails() {
        let field = DistanceField::new(10, 10);
        let err = find_extremes(&field, 3).unwrap_err();
        assert!(matches!(err, Error::EmptyRegion { region_id: 3 }));
    }

    #[test]
    fn collapse_appends_center_when_nothing_is_near() {
        let scan = FieldScan {
            local_maxima: vec![
                ExtremePoint::new(Vec2::new(10.0, 10.0), 40.0, 0),
                ExtremePoint::new(Vec2::new(300.0, 10.0), 20.0, 0),
            ],
            max_value: 40.0,
            center: Vec2::new(10.0, 10.0),
        };
        let points = collapse_near_maximum(scan, 0);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].position, Vec2::new(10.0, 10.0));
        assert_eq!(points[1].value, 40.0);
    }

    #[test]
    fn collapse_pulls_near_points_onto_center() {
        let scan = FieldScan {
            local_maxima: vec![
                ExtremePoint::new(Vec2::new(50.0, 50.0), 30.0, 0),
                ExtremePoint::new(Vec2::new(60.0, 50.0), 10.0, 0),
                ExtremePoint::new(Vec2::new(400.0, 50.0), 12.0, 0),
            ],
            max_value: 35.0,
            center: Vec2::new(55.0, 55.0),
        };
        let points = collapse_near_maximum(scan, 0);
        // The first point collapses, the second follows a center point and is removed.
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].position, Vec2::new(55.0, 55.0));
        assert_eq!(points[0].value, 35.0);
        assert_eq!(points[1].position, Vec2::new(400.0, 50.0));
    }

    #[test]
    fn merge_keeps_larger_value() {
        let points = vec![
            ExtremePoint::new(Vec2::new(0.0, 0.0), 10.0, 0),
            ExtremePoint::new(Vec2::new(30.0, 0.0), 20.0, 1),
            ExtremePoint::new(Vec2::new(200.0, 0.0), 5.0, 1),
        ];
        let merged = merge_close_points(points);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].value, 20.0);
        assert_eq!(merged[0].region_id, 1);
    }

    #[test]
    fn merge_is_idempotent_on_separated_points() {
        let points = vec![
            ExtremePoint::new(Vec2::new(0.0, 0.0), 10.0, 0),
            ExtremePoint::new(Vec2::new(61.0, 0.0), 20.0, 0),
            ExtremePoint::new(Vec2::new(0.0, 70.0), 5.0, 1),
        ];
        let merged = merge_close_points(points.clone());
        assert_eq!(merged, points);
        assert_eq!(merge_close_points(merged.clone()), merged);
    }

    #[test]
    fn ratios_sum_to_one_within_rounding() {
        let points = vec![
            ExtremePoint::new(Vec2::new(0.0, 0.0), 12.346, 0),
            ExtremePoint::new(Vec2::new(100.0, 0.0), 33.3, 0),
            ExtremePoint::new(Vec2::new(200.0, 0.0), 21.0, 0),
        ];
        let points = assign_ratios(points);
        assert_eq!(points[0].value, 33.3);
        assert_eq!(points[2].value, 12.35);
        let sum: f32 = points.iter().map(|p| p.ratio).sum();
        assert!((sum - 1.0).abs() <= 0.005 * points.len() as f32 + 1e-6);
        assert!(points.windows(2).all(|w| w[0].ratio >= w[1].ratio));
    }
}
