//! High-level runner for the full layout pipeline.
use glam::Vec2;
use rand::Rng;
use tracing::info;

use crate::error::{Error, Result};
use crate::field::{preprocess_distance_field_with_events, Region, RegionMap, RegionShape};
use crate::layout::allocate::{allocate_words, fill_ratios};
use crate::layout::config::LayoutConfig;
use crate::layout::events::{EventSink, LayoutEvent, LayoutEventKind};
use crate::layout::wordle::generate_wordle;
use crate::layout::LayoutContext;
use crate::text::TextMeasure;
use crate::words::{prepare_filling_words, prepare_keywords, FillingWord, Token, Word};

/// A word as handed to a renderer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedWord {
    pub name: String,
    /// Center of the word box.
    pub position: Vec2,
    /// Rotation in radians.
    pub angle: f32,
    pub font_size: f32,
    /// Half-width of the word box.
    pub width: f32,
    /// Half-height of the word box.
    pub height: f32,
    pub descent: f32,
    pub region_id: Option<usize>,
    pub placed: bool,
}

impl From<&Word> for PlacedWord {
    fn from(word: &Word) -> Self {
        Self {
            name: word.name.clone(),
            position: word.position,
            angle: word.angle,
            font_size: word.font_size,
            width: word.width,
            height: word.height,
            descent: word.descent,
            region_id: word.region_id,
            placed: word.placed,
        }
    }
}

/// Result of a layout run.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct LayoutResult {
    /// All keywords, placed or not, in keyword order.
    pub words: Vec<Word>,
    /// Maximum font size of the final layout.
    pub max_font_size: f32,
    /// `true` if every region was completed without falling back.
    pub success: bool,
    /// Light words for padding the space between keywords.
    pub filling_words: Vec<FillingWord>,
}

impl LayoutResult {
    pub fn placed_count(&self) -> usize {
        self.words.iter().filter(|w| w.placed).count()
    }

    pub fn all_placed(&self) -> bool {
        self.words.iter().all(|w| w.placed)
    }

    /// Renderer view of every word.
    pub fn placed_words(&self) -> Vec<PlacedWord> {
        self.words.iter().map(PlacedWord::from).collect()
    }
}

/// Runs the full pipeline: preprocessing, keyword preparation, allocation and placement.
pub struct ShapeWordle<M: TextMeasure> {
    /// Layout configuration.
    pub config: LayoutConfig,
    /// Text measurer used for boxes and fill ratios.
    pub measure: M,
}

impl<M: TextMeasure> ShapeWordle<M> {
    pub fn try_new(config: LayoutConfig, measure: M) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, measure })
    }

    pub fn new(config: LayoutConfig, measure: M) -> Self {
        debug_assert!(
            config.width >= 5 && config.height >= 5,
            "canvas must be at least 5x5 pixels"
        );
        debug_assert!(config.keywords_num > 0, "keywords_num must be > 0");
        debug_assert!(
            config.max_font_size >= config.min_font_size,
            "max_font_size must be >= min_font_size"
        );
        Self { config, measure }
    }

    /// Lays out the first `keywords_num` of `tokens` inside `shapes`.
    pub fn run(
        &self,
        tokens: &[Token],
        shapes: &[RegionShape],
        region_map: &RegionMap,
        rng: &mut impl Rng,
    ) -> Result<LayoutResult> {
        self.run_with_events(tokens, shapes, region_map, rng, &mut ())
    }

    pub fn run_with_events(
        &self,
        tokens: &[Token],
        shapes: &[RegionShape],
        region_map: &RegionMap,
        rng: &mut impl Rng,
        sink: &mut dyn EventSink,
    ) -> Result<LayoutResult> {
        self.check_canvas(region_map)?;
        let regions = preprocess_distance_field_with_events(
            shapes,
            self.config.width,
            self.config.height,
            sink,
        )?;
        self.run_prepared(tokens, regions, region_map, rng, sink)
    }

    /// Like [`ShapeWordle::run_with_events`], for regions that were already preprocessed.
    pub fn run_prepared(
        &self,
        tokens: &[Token],
        mut regions: Vec<Region>,
        region_map: &RegionMap,
        rng: &mut impl Rng,
        sink: &mut dyn EventSink,
    ) -> Result<LayoutResult> {
        self.check_canvas(region_map)?;
        let config = &self.config;
        if sink.wants(LayoutEventKind::RunStarted) {
            sink.send(LayoutEvent::RunStarted {
                config: config.clone(),
                word_count: config.keywords_num,
                region_count: regions.len(),
            });
        }

        let mut words = prepare_keywords(
            tokens,
            config.keywords_num,
            &config.font_family,
            config.orientation,
            rng,
        )?;
        let filling_words = prepare_filling_words(tokens, config.keywords_num, rng);
        let scale = allocate_words(&mut words, &mut regions, config, &self.measure)?;
        if sink.wants(LayoutEventKind::FontSizeChosen) {
            sink.send(LayoutEvent::FontSizeChosen {
                max_font_size: scale.max_font_size,
                fill_ratios: fill_ratios(&words, &regions, &scale, &self.measure),
            });
        }

        let ctx = LayoutContext::new(&regions, region_map, config, &self.measure);
        let outcome = generate_wordle(&ctx, &mut words, scale, rng, sink);

        let result = LayoutResult {
            words,
            max_font_size: outcome.scale.max_font_size,
            success: outcome.success,
            filling_words,
        };
        info!(
            "Layout finished: {}/{} words placed, max font size {}.",
            result.placed_count(),
            result.words.len(),
            result.max_font_size
        );
        if sink.wants(LayoutEventKind::RunFinished) {
            sink.send(LayoutEvent::RunFinished {
                placed: result.placed_count(),
                total: result.words.len(),
                max_font_size: result.max_font_size,
                success: result.success,
            });
        }
        Ok(result)
    }

    fn check_canvas(&self, region_map: &RegionMap) -> Result<()> {
        let expected = (self.config.width, self.config.height);
        if region_map.size() != expected {
            return Err(Error::ShapeMismatch(format!(
                "region map is {:?}, canvas is {:?}",
                region_map.size(),
                expected
            )));
        }
        Ok(())
    }
}
