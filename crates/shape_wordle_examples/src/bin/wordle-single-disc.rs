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
    let (width, height) = (400, 400);

    let shapes = [SyntheticShape::Disc {
        center: Vec2::new(200.0, 200.0),
        radius: 180.0,
    }];
    let (regions, region_map) = build_regions(&shapes, width, height);

    let config = LayoutConfig::new(width, height)
        .with_keywords_num(40)
        .with_font_sizes(6.0, 72.0);
    let wordle = ShapeWordle::try_new(config, MeasureCache::new(FixedAdvanceMetrics::default()))?;

    let mut rng = StdRng::seed_from_u64(42);
    let result = wordle.run(&sample_tokens(40), &regions, &region_map, &mut rng)?;

    render_layout_to_png(
        &result,
        &region_map,
        &RenderConfig::new(2),
        "wordle-single-disc.png",
    )?;
    Ok(())
}
