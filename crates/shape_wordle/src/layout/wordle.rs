//! Region-by-region placement with font shrinking and snapshot fallback.
//!
//! Words are placed region after region in a shared processing order. When a word cannot be
//! placed the whole layout shrinks by one font-size step and the region starts over. Below
//! [`MIN_RETRY_FONT_SIZE`] the last layout in which every finished region was complete is
//! restored instead.
use rand::Rng;
use tracing::{debug, info, warn};

use crate::layout::boxes::{create_box, word_polygons};
use crate::layout::config::FontScale;
use crate::layout::events::{EventSink, LayoutEvent, LayoutEventKind};
use crate::layout::order::{processing_order, seed_position, shuffled_count};
use crate::layout::spiral::SpiralPlacer;
use crate::layout::LayoutContext;
use crate::words::Word;

/// Smallest global font size at which a failed region may still shrink and retry.
pub const MIN_RETRY_FONT_SIZE: f32 = 10.0;

/// Outcome of [`generate_wordle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordleOutcome {
    /// Font scale of the returned layout.
    pub scale: FontScale,
    /// `true` if every region was placed completely.
    pub success: bool,
    /// Number of font-size shrink steps taken.
    pub restarts: usize,
}

/// Copy of the layout after the last fully placed region.
struct Snapshot {
    words: Vec<Word>,
    scale: FontScale,
}

impl Snapshot {
    fn capture(words: &[Word], scale: FontScale) -> Self {
        Self {
            words: words.to_vec(),
            scale,
        }
    }

    fn restore(self, words: &mut [Word]) -> FontScale {
        words.clone_from_slice(&self.words);
        self.scale
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Sizing,
    PlacingRegion(usize),
    Restarting(usize),
    FallingBack(usize),
    Done,
}

fn rebuild_boxes(words: &mut [Word], scale: &FontScale, ctx: &LayoutContext<'_>) {
    for word in words.iter_mut() {
        create_box(word, scale, ctx.config, ctx.measure);
    }
}

/// Places every allocated word of region `region_id`, stopping at the first failure.
///
/// Words already placed in other regions count as obstacles. Returns `true` if all of them
/// were placed.
fn place_region(
    ctx: &LayoutContext<'_>,
    placer: &SpiralPlacer<'_>,
    words: &mut [Word],
    order: &[usize],
    region_id: usize,
    rng: &mut dyn Rng,
    sink: &mut dyn EventSink,
) -> bool {
    let region = &ctx.regions[region_id];
    let mut obstacles: Vec<_> = words
        .iter()
        .filter(|w| w.placed && w.region_id != Some(region_id))
        .map(word_polygons)
        .collect();

    for &index in order {
        let word = &mut words[index];
        if word.region_id != Some(region_id) {
            continue;
        }
        word.width += 1.0;
        word.height += 1.0;
        word.gap += 1.0;

        let anchor = word
            .ep_id
            .and_then(|ep| region.extreme_points.get(ep))
            .or_else(|| region.top_point());
        let Some(anchor) = anchor else {
            warn!(
                "Region {} has no extreme points; skipping '{}'.",
                region_id, word.name
            );
            continue;
        };
        let seed = seed_position(word, anchor, region_id, ctx.region_map, ctx.config, rng);
        word.position = match seed {
            Some(seed) => seed,
            None => {
                warn!(
                    "No seed for '{}' found near ({:.1}, {:.1}); starting at the anchor.",
                    word.name, anchor.position.x, anchor.position.y
                );
                if sink.wants(LayoutEventKind::Warning) {
                    sink.send(LayoutEvent::Warning {
                        context: format!("word '{}'", word.name),
                        message: format!(
                            "no seed position in region {region_id}; using the anchor"
                        ),
                    });
                }
                anchor.position
            }
        };

        match placer.layout(word, region_id, anchor.position, &obstacles) {
            Some(iterations) => {
                obstacles.push(word_polygons(word));
                if sink.wants(LayoutEventKind::WordPlaced) {
                    sink.send(LayoutEvent::WordPlaced {
                        index,
                        name: word.name.clone(),
                        position: word.position,
                        iterations,
                    });
                }
            }
            None => {
                debug!(
                    "Word '{}' found no position in region {} after {} iterations.",
                    word.name, region_id, ctx.config.iteration_limit
                );
                if sink.wants(LayoutEventKind::WordFailed) {
                    sink.send(LayoutEvent::WordFailed {
                        index,
                        name: word.name.clone(),
                        region_id,
                    });
                }
                return false;
            }
        }
    }
    true
}

/// Lays out allocated `words` region by region, starting from `scale`.
///
/// Every word must carry a region and extreme point assignment, as produced by
/// [`allocate_words`](crate::layout::allocate::allocate_words). Words of a region that was
/// not completed keep `placed == false`.
pub fn generate_wordle(
    ctx: &LayoutContext<'_>,
    words: &mut [Word],
    mut scale: FontScale,
    rng: &mut dyn Rng,
    sink: &mut dyn EventSink,
) -> WordleOutcome {
    let order = processing_order(words.len(), shuffled_count(ctx.config.keywords_num), rng);
    let placer = SpiralPlacer::new(*ctx);
    let region_count = ctx.regions.len();
    let next = |r: usize| {
        if r + 1 < region_count {
            Phase::PlacingRegion(r + 1)
        } else {
            Phase::Done
        }
    };

    let mut snapshot: Option<Snapshot> = None;
    let mut success = true;
    let mut restarts = 0;
    let mut phase = Phase::Sizing;

    loop {
        phase = match phase {
            Phase::Sizing => {
                rebuild_boxes(words, &scale, ctx);
                for word in words.iter_mut() {
                    word.placed = false;
                }
                if region_count == 0 {
                    Phase::Done
                } else {
                    Phase::PlacingRegion(0)
                }
            }
            Phase::PlacingRegion(r) => {
                if sink.wants(LayoutEventKind::RegionStarted) {
                    sink.send(LayoutEvent::RegionStarted {
                        region_id: r,
                        word_count: words.iter().filter(|w| w.region_id == Some(r)).count(),
                    });
                }
                if place_region(ctx, &placer, words, &order, r, rng, sink) {
                    snapshot = Some(Snapshot::capture(words, scale));
                    sink.send(LayoutEvent::RegionFinished {
                        region_id: r,
                        success: true,
                    });
                    next(r)
                } else if scale.max_font_size >= MIN_RETRY_FONT_SIZE {
                    Phase::Restarting(r)
                } else {
                    Phase::FallingBack(r)
                }
            }
            Phase::Restarting(r) => {
                scale = scale.with_max(scale.max_font_size - 1.0);
                restarts += 1;
                debug!(
                    "Region {} incomplete; shrinking max font size to {}.",
                    r, scale.max_font_size
                );
                rebuild_boxes(words, &scale, ctx);
                for word in words.iter_mut().filter(|w| w.region_id == Some(r)) {
                    word.placed = false;
                }
                if sink.wants(LayoutEventKind::FontShrunk) {
                    sink.send(LayoutEvent::FontShrunk {
                        region_id: r,
                        max_font_size: scale.max_font_size,
                    });
                }
                Phase::PlacingRegion(r)
            }
            Phase::FallingBack(r) => {
                success = false;
                sink.send(LayoutEvent::RegionFinished {
                    region_id: r,
                    success: false,
                });
                match snapshot.take() {
                    Some(snap) => {
                        scale = snap.restore(words);
                        warn!(
                            "Region {} could not be completed; restored the last complete layout.",
                            r
                        );
                        sink.send(LayoutEvent::SnapshotRestored { region_id: r });
                        Phase::Done
                    }
                    None => {
                        warn!(
                            "Region {} could not be completed; keeping the partial layout.",
                            r
                        );
                        next(r)
                    }
                }
            }
            Phase::Done => break,
        };
    }

    let placed = words.iter().filter(|w| w.placed).count();
    info!(
        "Placed {} of {} words at max font size {} after {} restarts.",
        placed,
        words.len(),
        scale.max_font_size,
        restarts
    );
    WordleOutcome {
        scale,
        success,
        restarts,
    }
}
