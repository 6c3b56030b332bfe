//! Geometry kernel shared by the distance-field preprocessor and the placement engine.
//!
//! All functions are pure and operate on [`Vec2`] points in raster space. Intersection
//! tests are inclusive: touching segments and touching polygons count as intersecting.
use glam::Vec2;

/// Four corners of a (possibly rotated) rectangle, in winding order.
pub type Quad = [Vec2; 4];

/// Length of a 2D vector.
#[inline]
pub fn norm(v: Vec2) -> f32 {
    v.length()
}

/// Computes `(a - c) × (b - c)`.
#[inline]
pub fn cross(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (a - c).perp_dot(b - c)
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(u: Vec2, v: Vec2) -> f32 {
    u.distance(v)
}

/// Returns `true` if segment `a`-`b` intersects segment `c`-`d`.
///
/// Bounding boxes are rejected first, then both straddle tests are evaluated with
/// [`cross`]. Colinear or touching segments whose boxes overlap are reported as
/// intersecting.
pub fn segments_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    !(a.x.max(b.x) < c.x.min(d.x)
        || a.y.max(b.y) < c.y.min(d.y)
        || c.x.max(d.x) < a.x.min(b.x)
        || c.y.max(d.y) < a.y.min(b.y)
        || cross(c, b, a) * cross(b, d, a) < 0.0
        || cross(a, d, c) * cross(d, b, c) < 0.0)
}

/// Returns `true` if segment `p1`-`p2` crosses any edge of the closed polygon `contour`.
pub fn crosses_boundary(contour: &[Vec2], p1: Vec2, p2: Vec2) -> bool {
    let n = contour.len();
    if n < 2 {
        return false;
    }
    (0..n).any(|i| segments_intersect(p1, p2, contour[i], contour[(i + 1) % n]))
}

/// Separating axis test for two convex polygons.
///
/// Projects both polygons onto the edge normals of each. Returns `false` only when one
/// axis strictly separates the projections; touching intervals intersect.
pub fn convex_polygons_intersect(a: &[Vec2], b: &[Vec2]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    for polygon in [a, b] {
        let n = polygon.len();
        for j in 0..n {
            let p1 = polygon[j];
            let p2 = polygon[(j + 1) % n];
            let normal = Vec2::new(p2.y - p1.y, p1.x - p2.x);

            let (min_a, max_a) = project(a, normal);
            let (min_b, max_b) = project(b, normal);
            if max_a < min_b || max_b < min_a {
                return false;
            }
        }
    }
    true
}

fn project(polygon: &[Vec2], axis: Vec2) -> (f32, f32) {
    polygon
        .iter()
        .map(|p| axis.dot(*p))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

/// Rotates `p` around `center` by `angle` radians.
#[inline]
pub fn rotate_about(p: Vec2, center: Vec2, angle: f32) -> Vec2 {
    center + Vec2::from_angle(angle).rotate(p - center)
}

/// Rotates every corner of `quad` around `center`; a zero angle returns the quad unchanged.
pub fn rotate_quad(quad: Quad, center: Vec2, angle: f32) -> Quad {
    if angle == 0.0 {
        return quad;
    }
    quad.map(|p| rotate_about(p, center, angle))
}

/// Axis-aligned rectangle from its top-left corner and full size.
pub fn rect(origin: Vec2, size: Vec2) -> Quad {
    [
        origin,
        Vec2::new(origin.x + size.x, origin.y),
        origin + size,
        Vec2::new(origin.x, origin.y + size.y),
    ]
}

/// Rounds `value` to `digits` decimal places, halves away from zero.
#[inline]
pub fn round_to(value: f32, digits: i32) -> f32 {
    let pow = 10f32.powi(digits);
    (value * pow).round() / pow
}
