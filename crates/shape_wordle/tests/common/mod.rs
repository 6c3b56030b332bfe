#![allow(dead_code)]

use glam::Vec2;
use shape_wordle::layout::boxes::{polygons_overlap, word_polygons};
use shape_wordle::prelude::*;

/// Chebyshev distance samples of the square `(x0, y0, side)`.
pub fn chebyshev_samples(x0: usize, y0: usize, side: usize) -> Vec<DistanceSample> {
    let mut samples = Vec::with_capacity(side * side);
    for x in x0..x0 + side {
        for y in y0..y0 + side {
            let d = (x - x0)
                .min(x0 + side - 1 - x)
                .min(y - y0)
                .min(y0 + side - 1 - y);
            samples.push(DistanceSample::new(x, y, d as f32));
        }
    }
    samples
}

pub fn square_shape(x0: usize, y0: usize, side: usize) -> RegionShape {
    let (a, b) = (x0 as f32, (x0 + side - 1) as f32);
    let (c, d) = (y0 as f32, (y0 + side - 1) as f32);
    RegionShape::new(
        [[a, c], [b, c], [b, d], [a, d]],
        chebyshev_samples(x0, y0, side),
        (side * side) as f32,
    )
}

pub fn square_shapes(squares: &[(usize, usize, usize)]) -> Vec<RegionShape> {
    squares
        .iter()
        .map(|&(x, y, side)| square_shape(x, y, side))
        .collect()
}

/// Ownership map for squares given as `(x0, y0, side)`, labelled in order.
pub fn square_region_map(
    width: usize,
    height: usize,
    squares: &[(usize, usize, usize)],
) -> RegionMap {
    let mut map = RegionMap::new(width, height);
    for (region_id, &(x0, y0, side)) in squares.iter().enumerate() {
        for x in x0..x0 + side {
            for y in y0..y0 + side {
                map.set_region(x, y, region_id);
            }
        }
    }
    map
}

/// The square `[0, side - 1]^2` with one extreme point of full ratio at its center.
pub fn centered_square_region(side: usize) -> Region {
    let half = (side / 2) as f32;
    let far = (side - 1) as f32;
    let mut center = ExtremePoint::new(Vec2::splat(half), half, 0);
    center.ratio = 1.0;
    Region {
        contour: vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(far, 0.0),
            Vec2::new(far, far),
            Vec2::new(0.0, far),
        ],
        field: DistanceField::from_samples(side, side, &chebyshev_samples(0, 0, side)),
        extreme_points: vec![center],
        area: (side * side) as f32,
        value: half,
        words_num: 0,
        words_weight: 0.0,
    }
}

/// `names` with weights falling off by `step` from 1.
pub fn weighted_tokens(names: &[&str], step: f32) -> Vec<Token> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Token::new(*name, 1.0 - i as f32 * step))
        .collect()
}

/// Panics if any two placed words overlap, in any region.
pub fn assert_no_overlap(words: &[Word]) {
    let placed: Vec<&Word> = words.iter().filter(|w| w.placed).collect();
    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            assert!(
                !polygons_overlap(&word_polygons(a), &word_polygons(b)),
                "'{}' (region {:?}) overlaps '{}' (region {:?})",
                a.name,
                a.region_id,
                b.name,
                b.region_id
            );
        }
    }
}
