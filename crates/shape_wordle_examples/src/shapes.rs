use glam::Vec2;
use shape_wordle::prelude::*;

/// Analytic silhouettes used in place of an image-based shape preprocessor.
#[derive(Debug, Clone, Copy)]
pub enum SyntheticShape {
    Rect { min: Vec2, max: Vec2 },
    Disc { center: Vec2, radius: f32 },
    Diamond { center: Vec2, radius: f32 },
}

impl SyntheticShape {
    /// Distance from `p` to the boundary, negative outside.
    pub fn signed_distance(&self, p: Vec2) -> f32 {
        match *self {
            SyntheticShape::Rect { min, max } => (p.x - min.x)
                .min(max.x - p.x)
                .min(p.y - min.y)
                .min(max.y - p.y),
            SyntheticShape::Disc { center, radius } => radius - p.distance(center),
            SyntheticShape::Diamond { center, radius } => {
                let d = p - center;
                (radius - d.x.abs() - d.y.abs()) / std::f32::consts::SQRT_2
            }
        }
    }

    /// Closed boundary polygon.
    pub fn contour(&self) -> Vec<Vec2> {
        match *self {
            SyntheticShape::Rect { min, max } => vec![
                min,
                Vec2::new(max.x, min.y),
                max,
                Vec2::new(min.x, max.y),
            ],
            SyntheticShape::Disc { center, radius } => (0..64)
                .map(|i| {
                    let t = i as f32 / 64.0 * std::f32::consts::TAU;
                    center + Vec2::from_angle(t) * radius
                })
                .collect(),
            SyntheticShape::Diamond { center, radius } => vec![
                center - Vec2::Y * radius,
                center + Vec2::X * radius,
                center + Vec2::Y * radius,
                center - Vec2::X * radius,
            ],
        }
    }
}

/// Rasterizes `shapes` on a `width x height` canvas into region inputs and an ownership map.
///
/// Earlier shapes win where shapes overlap.
pub fn build_regions(
    shapes: &[SyntheticShape],
    width: usize,
    height: usize,
) -> (Vec<RegionShape>, RegionMap) {
    let mut map = RegionMap::new(width, height);
    let mut samples: Vec<Vec<DistanceSample>> = vec![Vec::new(); shapes.len()];

    for y in 0..height {
        for x in 0..width {
            let p = Vec2::new(x as f32, y as f32);
            let owner = shapes
                .iter()
                .enumerate()
                .map(|(id, s)| (id, s.signed_distance(p)))
                .find(|&(_, d)| d >= 0.0);
            if let Some((id, d)) = owner {
                map.set_region(x, y, id);
                samples[id].push(DistanceSample::new(x, y, d));
            }
        }
    }

    let regions = shapes
        .iter()
        .zip(samples)
        .map(|(shape, samples)| {
            let area = samples.len() as f32;
            RegionShape::new(shape.contour(), samples, area)
        })
        .collect();
    (regions, map)
}

const VOCABULARY: &[&str] = &[
    "rust", "borrow", "lifetime", "trait", "crate", "cargo", "enum", "match", "iterator",
    "closure", "generic", "macro", "module", "slice", "vector", "string", "option", "result",
    "thread", "async", "future", "pin", "box", "arc", "mutex", "channel", "unsafe", "const",
    "static", "struct", "impl", "where", "dyn", "ref", "move", "loop", "while", "yield", "tuple",
    "array", "hash", "map", "set", "heap", "stack", "layout", "shape", "field", "spiral",
    "region", "glyph", "font", "word", "cloud", "point", "curve", "edge", "area", "weight",
    "token",
];

/// The first `count` vocabulary words with weights falling off from 1.
pub fn sample_tokens(count: usize) -> Vec<Token> {
    VOCABULARY
        .iter()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(i, name)| Token::new(*name, 1.0 / (1.0 + i as f32 * 0.15)))
        .collect()
}
