mod common;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shape_wordle::layout::spiral::is_in_shape_word;
use shape_wordle::layout::LayoutContext;
use shape_wordle::prelude::*;

use common::{
    assert_no_overlap, centered_square_region, square_region_map, square_shapes, weighted_tokens,
};

const SIDE: usize = 101;

fn tokens() -> Vec<Token> {
    vec![
        Token::new("alpha", 0.9),
        Token::new("beta", 0.5),
        Token::new("gamma", 0.1),
    ]
}

fn engine(max_font_size: f32) -> ShapeWordle<MeasureCache<FixedAdvanceMetrics>> {
    let config = LayoutConfig::new(SIDE, SIDE)
        .with_keywords_num(3)
        .with_font_sizes(4.0, max_font_size);
    ShapeWordle::try_new(config, MeasureCache::new(FixedAdvanceMetrics::default()))
        .expect("valid config")
}

fn run_square(max_font_size: f32, seed: u64) -> (LayoutResult, Vec<LayoutEvent>) {
    let engine = engine(max_font_size);
    let map = square_region_map(SIDE, SIDE, &[(0, 0, SIDE)]);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sink = VecSink::new();
    let result = engine
        .run_prepared(
            &tokens(),
            vec![centered_square_region(SIDE)],
            &map,
            &mut rng,
            &mut sink,
        )
        .expect("layout runs");
    (result, sink.into_inner())
}

#[test]
fn square_region_holds_three_words_without_overlap() {
    let (result, events) = run_square(24.0, 42);
    assert!(result.success);
    assert!(result.all_placed());

    let regions = vec![centered_square_region(SIDE)];
    let map = square_region_map(SIDE, SIDE, &[(0, 0, SIDE)]);
    let config = LayoutConfig::new(SIDE, SIDE);
    let metrics = FixedAdvanceMetrics::default();
    let ctx = LayoutContext::new(&regions, &map, &config, &metrics);
    for word in &result.words {
        assert!(is_in_shape_word(word, &ctx, 0), "'{}' leaves the square", word.name);
    }
    assert_no_overlap(&result.words);

    assert!(matches!(events.first(), Some(LayoutEvent::RunStarted { .. })));
    assert!(matches!(
        events.last(),
        Some(LayoutEvent::RunFinished {
            placed: 3,
            total: 3,
            ..
        })
    ));
}

#[test]
fn narrower_font_range_shrinks_every_word() {
    let (wide, _) = run_square(24.0, 7);
    let (narrow, _) = run_square(12.0, 7);
    assert!(narrow.max_font_size < wide.max_font_size);
    for (w, n) in wide.words.iter().zip(&narrow.words) {
        assert_eq!(w.name, n.name);
        assert!(n.font_size < w.font_size, "'{}' did not shrink", n.name);
    }
}

#[test]
fn same_seed_gives_same_layout() {
    let (a, _) = run_square(20.0, 99);
    let (b, _) = run_square(20.0, 99);
    assert_eq!(a.placed_words(), b.placed_words());
    assert_eq!(a.filling_words, b.filling_words);
}

#[test]
fn full_run_on_two_regions_reports_every_word() {
    let squares = [(0, 0, 120), (150, 20, 80)];
    let map = square_region_map(240, 140, &squares);
    let config = LayoutConfig::new(240, 140)
        .with_keywords_num(8)
        .with_font_sizes(4.0, 30.0)
        .with_iteration_limit(3000);
    let engine = ShapeWordle::try_new(config, FixedAdvanceMetrics::default()).expect("config");
    let tokens = weighted_tokens(
        &["sun", "moon", "star", "sky", "cloud", "rain", "wind", "snow"],
        0.1,
    );
    let mut rng = StdRng::seed_from_u64(17);

    let result = engine
        .run(&tokens, &square_shapes(&squares), &map, &mut rng)
        .expect("layout runs");

    assert_eq!(result.words.len(), 8);
    let view = result.placed_words();
    for word in view.iter().filter(|w| w.placed) {
        let region = word.region_id.expect("placed words have a region");
        assert_eq!(map.region_at_point(word.position), Some(region));
    }
    assert!(result.placed_count() > 0);
    assert_no_overlap(&result.words);
}

#[test]
fn adjacent_regions_never_share_word_space() {
    // Two squares with a common edge, so boxes near the seam could reach across it.
    let squares = [(0, 0, 90), (90, 0, 90)];
    let map = square_region_map(180, 90, &squares);
    let config = LayoutConfig::new(180, 90)
        .with_keywords_num(10)
        .with_font_sizes(4.0, 22.0)
        .with_iteration_limit(3000);
    let engine = ShapeWordle::try_new(config, MeasureCache::new(FixedAdvanceMetrics::default()))
        .expect("config");
    let tokens = weighted_tokens(
        &[
            "north", "south", "east", "west", "up", "down", "left", "right", "in", "out",
        ],
        0.09,
    );

    for seed in [1, 2, 3] {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = engine
            .run(&tokens, &square_shapes(&squares), &map, &mut rng)
            .expect("layout runs");
        let regions_used: Vec<Option<usize>> = result
            .words
            .iter()
            .filter(|w| w.placed)
            .map(|w| w.region_id)
            .collect();
        assert!(regions_used.contains(&Some(0)) && regions_used.contains(&Some(1)));
        assert_no_overlap(&result.words);
    }
}
