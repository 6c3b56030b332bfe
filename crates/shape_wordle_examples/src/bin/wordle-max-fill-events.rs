use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shape_wordle::prelude::*;
use shape_wordle_examples::{
    build_regions, init_tracing, render_layout_to_png, sample_tokens, RenderConfig,
    SyntheticShape,
};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let (width, height) = (360, 360);

    let shapes = [SyntheticShape::Diamond {
        center: Vec2::new(180.0, 180.0),
        radius: 170.0,
    }];
    let (regions, region_map) = build_regions(&shapes, width, height);

    let config = LayoutConfig::new(width, height)
        .with_keywords_num(30)
        .with_font_sizes(4.0, 40.0)
        .with_fill_mode(FillMode::Max)
        .with_orientation(Orientation::PitchAndTilt);
    let wordle = ShapeWordle::try_new(config, MeasureCache::new(FixedAdvanceMetrics::default()))?;

    let mut log = FnSink::new(|event: LayoutEvent| match event {
        LayoutEvent::FontSizeChosen {
            max_font_size,
            fill_ratios,
        } => info!("Font size {max_font_size} fills {fill_ratios:?}."),
        LayoutEvent::FontShrunk {
            region_id,
            max_font_size,
        } => info!("Region {region_id} restarts at {max_font_size}."),
        LayoutEvent::SnapshotRestored { region_id } => {
            info!("Region {region_id} fell back to the last complete layout.")
        }
        _ => {}
    });
    let mut stats = VecSink::only([LayoutEventKind::WordPlaced, LayoutEventKind::WordFailed]);
    let mut sinks: MultiSink<&mut dyn EventSink> = MultiSink::new();
    sinks.push(&mut log);
    sinks.push(&mut stats);

    let mut rng = StdRng::seed_from_u64(2024);
    let result = wordle.run_with_events(
        &sample_tokens(30),
        &regions,
        &region_map,
        &mut rng,
        &mut sinks,
    )?;
    drop(sinks);

    info!(
        "{} placements, {} failures, success: {}.",
        stats.count(LayoutEventKind::WordPlaced),
        stats.count(LayoutEventKind::WordFailed),
        result.success
    );
    render_layout_to_png(
        &result,
        &region_map,
        &RenderConfig::new(2),
        "wordle-max-fill-events.png",
    )?;
    Ok(())
}
