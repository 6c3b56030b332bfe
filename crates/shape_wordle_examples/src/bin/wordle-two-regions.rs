use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shape_wordle::prelude::*;
use shape_wordle_examples::{
    build_regions, init_tracing, render_layout_to_png, sample_tokens, RenderConfig,
    SyntheticShape,
};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let (width, height) = (600, 360);

    // A large body and a smaller satellite.
    let shapes = [
        SyntheticShape::Rect {
            min: Vec2::new(20.0, 40.0),
            max: Vec2::new(360.0, 320.0),
        },
        SyntheticShape::Diamond {
            center: Vec2::new(480.0, 180.0),
            radius: 110.0,
        },
    ];
    let (regions, region_map) = build_regions(&shapes, width, height);

    for policy in [RegionPolicy::Area, RegionPolicy::DistanceValue] {
        let config = LayoutConfig::new(width, height)
            .with_keywords_num(50)
            .with_font_sizes(5.0, 64.0)
            .with_region_policy(policy)
            .with_orientation(Orientation::HorizontalAndVertical);
        let wordle =
            ShapeWordle::try_new(config, MeasureCache::new(FixedAdvanceMetrics::default()))?;

        let mut rng = StdRng::seed_from_u64(7);
        let result = wordle.run(&sample_tokens(50), &regions, &region_map, &mut rng)?;

        let name = match policy {
            RegionPolicy::Area => "wordle-two-regions-area.png",
            RegionPolicy::DistanceValue => "wordle-two-regions-distance.png",
        };
        render_layout_to_png(&result, &region_map, &RenderConfig::new(2), name)?;
    }
    Ok(())
}
