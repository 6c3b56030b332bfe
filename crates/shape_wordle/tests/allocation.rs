mod common;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shape_wordle::prelude::*;

use common::square_shapes;

fn keywords(count: usize, config: &LayoutConfig, seed: u64) -> Vec<Word> {
    let tokens: Vec<Token> = (0..count)
        .map(|i| Token::new(format!("w{i}"), 1.0 - i as f32 / count as f32))
        .collect();
    let mut rng = StdRng::seed_from_u64(seed);
    prepare_keywords(
        &tokens,
        count,
        &config.font_family,
        config.orientation,
        &mut rng,
    )
    .expect("keywords")
}

fn assert_counts_match(words: &[Word], regions: &[Region]) {
    assert_eq!(
        regions.iter().map(|r| r.words_num).sum::<usize>(),
        words.len()
    );
    for region in regions {
        let points: usize = region.extreme_points.iter().map(|p| p.ep_number).sum();
        assert_eq!(points, region.words_num);
    }
    for word in words {
        let region = word.region_id.expect("region assigned");
        let ep = word.ep_id.expect("extreme point assigned");
        assert!(ep < regions[region].extreme_points.len());
    }
}

#[test]
fn allocation_covers_every_word_across_regions() {
    let squares = [(0, 0, 120), (150, 20, 80)];
    let mut regions = preprocess_distance_field(&square_shapes(&squares), 240, 140)
        .expect("preprocess");
    let config = LayoutConfig::new(240, 140).with_keywords_num(12);
    let mut words = keywords(12, &config, 3);

    let scale = allocate_words(
        &mut words,
        &mut regions,
        &config,
        &FixedAdvanceMetrics::default(),
    )
    .expect("allocation");

    assert_counts_match(&words, &regions);
    for region in &regions {
        let ratios: f32 = region.extreme_points.iter().map(|p| p.ratio).sum();
        assert!((ratios - 1.0).abs() <= 0.02);
    }
    assert!(scale.max_font_size >= config.min_font_size);
    assert!(scale.max_font_size <= config.max_font_size);
}

#[test]
fn rounding_up_in_many_equal_regions_keeps_the_word_count() {
    // Every region's share rounds up, so the totals overshoot before rebalancing.
    let squares = [(0, 0, 40), (80, 0, 40), (160, 0, 40), (240, 0, 40)];
    let mut regions = preprocess_distance_field(&square_shapes(&squares), 300, 60)
        .expect("preprocess");
    let config = LayoutConfig::new(300, 60).with_keywords_num(2);
    let mut words = keywords(2, &config, 5);

    allocate_words(
        &mut words,
        &mut regions,
        &config,
        &FixedAdvanceMetrics::default(),
    )
    .expect("allocation");

    assert_counts_match(&words, &regions);
    assert_eq!(regions.iter().filter(|r| r.words_num > 0).count(), 2);
}
