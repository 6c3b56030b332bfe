//! Collision geometry of words.
//!
//! A word is either a single padded rectangle around its position or, when its weight is far
//! from [`Thresholds::glyph_box_weight`](crate::layout::config::Thresholds), a row box at
//! x-height plus one box per glyph that rises above or drops below it. Both forms rotate
//! about the word position.
use glam::Vec2;

use crate::geometry::{convex_polygons_intersect, rect, rotate_quad, Quad};
use crate::layout::config::{FontScale, LayoutConfig};
use crate::text::TextMeasure;
use crate::words::{GlyphBox, Word};

/// Padding around glyph boxes before any placement bump.
pub const BOX_GAP: f32 = 2.0;

/// Glyph whose extent defines the x-height row box.
pub const REFERENCE_GLYPH: &str = "a";

/// Measures `word` at the size `scale` gives its weight and rebuilds its boxes.
pub fn create_box(
    word: &mut Word,
    scale: &FontScale,
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) {
    let font_size = scale.font_size(word.weight);
    let family = word.font_family.clone();
    let family = family.as_str();
    let advance = measure.measure_width(&word.name, font_size, family);
    let extent = measure.measure_extent(font_size, family, &word.name);

    word.font_size = font_size;
    word.gap = BOX_GAP;
    word.width = advance / 2.0 + 2.0;
    word.descent = extent.descent;
    word.height = extent.height / 2.0 + 2.0;

    if config.weight_is(word.weight, config.thresholds.glyph_box_weight) {
        word.boxes = None;
        return;
    }

    let gap = word.gap;
    let reference = measure.measure_extent(font_size, family, REFERENCE_GLYPH);
    let ref_half_height = reference.height / 2.0;
    let baseline = word.height - word.descent;

    let mut boxes = vec![GlyphBox::new(
        -word.width,
        baseline + reference.descent - 2.0 * (ref_half_height + gap),
        word.width,
        ref_half_height + gap,
    )];

    let left = -(word.width - gap);
    let mut occupied = 0.0;
    let mut buf = [0u8; 4];
    for c in word.name.chars() {
        let glyph = measure.measure_extent(font_size, family, c.encode_utf8(&mut buf));
        let half_height = glyph.height / 2.0;
        let half_width = glyph.width / 2.0;
        if half_height != ref_half_height {
            boxes.push(GlyphBox::new(
                occupied + left - gap,
                baseline + glyph.descent - 2.0 * half_height - 2.0 * gap,
                half_width + gap,
                half_height + gap,
            ));
        }
        occupied += half_width * 2.0;
    }
    word.boxes = Some(boxes);
}

/// Collision polygons of `word` at its current position and angle.
pub fn word_polygons(word: &Word) -> Vec<Quad> {
    let pos = word.position;
    let quads: Vec<Quad> = match &word.boxes {
        Some(boxes) => boxes
            .iter()
            .map(|b| rect(b.offset + pos, b.half_size * 2.0))
            .collect(),
        None => {
            let half = Vec2::new(word.width, word.height);
            vec![rect(pos - half, half * 2.0)]
        }
    };
    quads
        .into_iter()
        .map(|q| rotate_quad(q, pos, word.angle))
        .collect()
}

/// Corners of the word rectangle scaled by `ratio` about the position, then rotated.
pub fn corner_points(word: &Word, ratio: f32) -> Quad {
    let half = Vec2::new(word.width, word.height) * ratio;
    rotate_quad(
        rect(word.position - half, half * 2.0),
        word.position,
        word.angle,
    )
}

/// Returns `true` if any polygon of `a` intersects any polygon of `b`.
pub fn polygons_overlap(a: &[Quad], b: &[Quad]) -> bool {
    a.iter()
        .any(|pa| b.iter().any(|pb| convex_polygons_intersect(pa, pb)))
}
