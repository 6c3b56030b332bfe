//! Curvature-adaptive spiral search.
//!
//! A word starts near its extreme point and is pushed along the iso-lines of the region's
//! distance field. The tangential step follows the local radius of curvature, estimated from
//! Sobel derivatives of the field, and a normal correction proportional to the swept angle
//! makes the path drift outward. The search stops at the first position where the word lies
//! inside its region and clears every obstacle.
use std::f32::consts::TAU;

use glam::Vec2;

use crate::field::DistanceField;
use crate::geometry::{crosses_boundary, Quad};
use crate::layout::boxes::{corner_points, polygons_overlap, word_polygons};
use crate::layout::LayoutContext;
use crate::words::Word;

const GRAD_X: [[f32; 3]; 3] = [[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]];
const GRAD_Y: [[f32; 3]; 3] = [[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]];

/// Tangential step is `2 * pi * R / STEP_DIVISOR` for radius of curvature `R`.
const STEP_DIVISOR: f32 = 10.0;
const MAX_TANGENT_STEP: f32 = 1.2;
const MIN_TANGENT_STEP: f32 = 1.0;
const FALLBACK_TANGENT_STEP: f32 = 2.0;
const NORMAL_SPEED: f32 = 0.8;
const MIN_CURVATURE: f32 = 0.001;
/// Positions closer than this to the canvas edge are rejected.
const EDGE_MARGIN: f32 = 2.0;
/// Moves attempted per outer iteration before the word is tested.
pub const MOVES_PER_ITERATION: usize = 5;
/// Containment shrink for words whose weight is not the containment weight.
const CONTAINMENT_SHRINK: f32 = 0.9;

/// Second derivatives of the distance field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hessian {
    pub xx: f32,
    pub xy: f32,
    pub yy: f32,
}

fn gradient_at(field: &DistanceField, x: isize, y: isize) -> Vec2 {
    let mut grad = Vec2::ZERO;
    for i in 0..3 {
        for j in 0..3 {
            let local = -field.get(x + i as isize - 1, y + j as isize - 1);
            grad.x += local * GRAD_X[i][j];
            grad.y += local * GRAD_Y[i][j];
        }
    }
    grad
}

#[inline]
fn cell(p: Vec2) -> (isize, isize) {
    (p.x.floor() as isize, p.y.floor() as isize)
}

/// Sobel gradient of the negated distance field at the cell containing `p`.
///
/// The negation of this vector points toward the nearest boundary.
pub fn sdf_gradient(field: &DistanceField, p: Vec2) -> Vec2 {
    let (x, y) = cell(p);
    gradient_at(field, x, y)
}

/// Sobel derivatives of [`sdf_gradient`] around the cell containing `p`.
pub fn hessian(field: &DistanceField, p: Vec2) -> Hessian {
    let (x, y) = cell(p);
    let mut h = Hessian::default();
    for i in 0..3 {
        for j in 0..3 {
            let g = gradient_at(field, x + i as isize - 1, y + j as isize - 1);
            h.xx += g.x * GRAD_X[i][j];
            h.xy += g.x * GRAD_Y[i][j];
            h.yy += g.y * GRAD_Y[i][j];
        }
    }
    h
}

/// Signed angle from `a` to `b`, zero when either vector has no length.
fn swept_angle(a: Vec2, b: Vec2) -> f32 {
    let (la, lb) = (a.length(), b.length());
    if la <= f32::EPSILON || lb <= f32::EPSILON {
        return 0.0;
    }
    let theta = (a.dot(b) / la / lb).clamp(-1.0, 1.0).acos();
    if a.perp_dot(b) < 0.0 {
        -theta
    } else {
        theta
    }
}

/// One spiral step from `pos` around the extreme point `center`.
///
/// The normal correction grows with the angle the step sweeps as seen from `center`.
/// Returns `None` when the step would leave the canvas margin or the region interior.
pub fn iterate(
    field: &DistanceField,
    center: Vec2,
    pos: Vec2,
    width: usize,
    height: usize,
) -> Option<Vec2> {
    let raw = -sdf_gradient(field, pos);
    let (normal, len) = match raw.length() {
        l if l > f32::EPSILON => (raw, l),
        // Flat field: head away from the center.
        _ => ((pos - center).try_normalize().unwrap_or(Vec2::X), 1.0),
    };
    let tangent = normal.perp();

    let h = hessian(field, pos);
    let projected = Vec2::new(
        tangent.x * h.xx + tangent.y * h.xy,
        tangent.x * h.xy + tangent.y * h.yy,
    );
    let curvature = (tangent.dot(projected) / (len * len * len)).max(MIN_CURVATURE);
    let radius = 1.0 / curvature;
    let step = TAU * radius / STEP_DIVISOR;

    let mut dr = tangent * step / len;
    let dr_len = dr.length();
    if dr_len > MAX_TANGENT_STEP {
        dr *= MAX_TANGENT_STEP / dr_len;
    }
    if dr.length() < MIN_TANGENT_STEP {
        dr = tangent * FALLBACK_TANGENT_STEP / len;
    }

    let mut next = pos + dr;
    let dtheta = swept_angle(pos - center, next - center);
    next += (NORMAL_SPEED * dtheta).abs() * normal / len;

    let (w, h) = (width as f32, height as f32);
    if !next.is_finite()
        || next.x < EDGE_MARGIN
        || next.x > w - EDGE_MARGIN
        || next.y < EDGE_MARGIN
        || next.y > h - EDGE_MARGIN
        || field.value_at(next) <= 0.0
    {
        return None;
    }
    Some(next)
}

/// Returns `true` if the word rectangle lies inside `region_id` and crosses no contour.
///
/// Corners are shrunk toward the word center unless the word has the containment weight.
pub fn is_in_shape_word(word: &Word, ctx: &LayoutContext<'_>, region_id: usize) -> bool {
    let config = ctx.config;
    let ratio = if config.weight_is(word.weight, config.thresholds.containment_weight) {
        1.0
    } else {
        CONTAINMENT_SHRINK
    };
    let corners = corner_points(word, ratio);
    if !corners
        .iter()
        .all(|&c| ctx.region_map.is_in_region(c, region_id))
    {
        return false;
    }
    !ctx.regions.iter().any(|region| {
        (0..4).any(|i| crosses_boundary(&region.contour, corners[i], corners[(i + 1) % 4]))
    })
}

/// Places single words along the spiral of their region.
pub struct SpiralPlacer<'a> {
    ctx: LayoutContext<'a>,
}

impl<'a> SpiralPlacer<'a> {
    pub fn new(ctx: LayoutContext<'a>) -> Self {
        Self { ctx }
    }

    /// Moves `word` from its seeded position along the spiral around `center` until it fits
    /// inside `region_id` without touching any of `obstacles`.
    ///
    /// Returns the number of iterations used, or `None` when the iteration limit is reached.
    /// On success the word is marked placed.
    pub fn layout(
        &self,
        word: &mut Word,
        region_id: usize,
        center: Vec2,
        obstacles: &[Vec<Quad>],
    ) -> Option<usize> {
        let config = self.ctx.config;
        let field = &self.ctx.regions.get(region_id)?.field;
        let mut last_collided: Option<usize> = None;

        for n in 0..config.iteration_limit {
            for _ in 0..MOVES_PER_ITERATION {
                match iterate(field, center, word.position, config.width, config.height) {
                    Some(next) => word.position = next,
                    None => break,
                }
            }

            let polygons = word_polygons(word);
            if let Some(i) = last_collided {
                if polygons_overlap(&obstacles[i], &polygons) {
                    continue;
                }
            }
            if !is_in_shape_word(word, &self.ctx, region_id) {
                continue;
            }
            last_collided = obstacles
                .iter()
                .position(|obstacle| polygons_overlap(obstacle, &polygons));
            if last_collided.is_none() {
                word.placed = true;
                return Some(n + 1);
            }
        }
        None
    }
}
