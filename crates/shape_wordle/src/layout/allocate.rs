//! Word allocation and global font-size search.
//!
//! Allocation runs in three phases:
//! 1. [`allocate_to_regions`] splits the keywords across regions by area (or distance value)
//!    and binds each word to a region, respecting per-region weight caps.
//! 2. [`allocate_to_extreme_points`] does the same within each region, across its extreme
//!    points, weighted by their influence ratios.
//! 3. [`search_font_size`] picks the global maximum font size from the resulting
//!    [`fill_ratios`].
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::field::Region;
use crate::geometry::round_to;
use crate::layout::config::{FillMode, FontScale, LayoutConfig, RegionPolicy};
use crate::text::TextMeasure;
use crate::words::Word;

/// Step budget of the max-fill search.
pub const MAX_FILL_STEPS: usize = 1000;

/// Round-robin attempts per region before a word is forced onto the policy-maximal region.
const REGION_ATTEMPTS_PER_REGION: usize = 3;
/// Round-robin attempts per extreme point before a word is forced onto the primary point.
const POINT_ATTEMPTS_PER_POINT: usize = 2;

/// Index of the first maximum of `values`.
fn argmax(values: impl Iterator<Item = f32>) -> Option<(usize, f32)> {
    values
        .enumerate()
        .fold(None, |best, (i, v)| match best {
            Some((_, max)) if v <= max => best,
            _ => Some((i, v)),
        })
}

fn min_weight(words: &[Word]) -> f32 {
    words.iter().map(|w| w.weight).fold(f32::INFINITY, f32::min)
}

/// Adjusts `counts` so they sum to `target`.
///
/// A shortfall goes to `preferred`. A surplus is taken from `preferred` first, then one at a
/// time from the largest remaining count.
fn rebalance(counts: &mut [usize], preferred: usize, target: usize) {
    let sum: usize = counts.iter().sum();
    if sum <= target {
        counts[preferred] += target - sum;
        return;
    }
    let mut surplus = sum - target;
    let taken = surplus.min(counts[preferred]);
    counts[preferred] -= taken;
    surplus -= taken;
    while surplus > 0 {
        let Some((largest, _)) = argmax(counts.iter().map(|&c| c as f32)) else {
            break;
        };
        counts[largest] -= 1;
        surplus -= 1;
    }
}

/// Assigns word counts and weight caps to regions, then binds every word to a region.
///
/// Sets [`Region::words_num`], [`Region::words_weight`] and [`Word::region_id`].
pub fn allocate_to_regions(
    words: &mut [Word],
    regions: &mut [Region],
    config: &LayoutConfig,
) -> Result<()> {
    if regions.is_empty() {
        return Err(Error::ShapeMismatch("no regions to allocate to".into()));
    }
    let t = &config.thresholds;
    let keywords = words.len();

    for region in regions.iter_mut() {
        region.value = region.top_point().map_or(0.0, |p| p.value);
    }

    let total_area: f32 = regions.iter().map(|r| r.area).sum();
    if total_area.is_nan() || total_area <= 0.0 {
        return Err(Error::ShapeMismatch("regions have no area".into()));
    }
    let words_min_weight = min_weight(words);
    let (area_max_id, area_max) = argmax(regions.iter().map(|r| r.area)).unwrap_or((0, 0.0));
    let (value_max_id, value_max) = argmax(regions.iter().map(|r| r.value)).unwrap_or((0, 0.0));

    for region in regions.iter_mut() {
        let words_num = if region.value <= t.weak_region_value && value_max > t.strong_region_value
        {
            0
        } else {
            (region.area / total_area * keywords as f32).round() as usize
        };
        region.words_weight = if words_num < 3 {
            words_min_weight
        } else {
            match config.region_policy {
                RegionPolicy::Area => region.area / area_max,
                RegionPolicy::DistanceValue if value_max > 0.0 => region.value / value_max,
                RegionPolicy::DistanceValue => 0.0,
            }
        };
        region.words_num = words_num;
    }
    let mut counts: Vec<usize> = regions.iter().map(|r| r.words_num).collect();
    rebalance(&mut counts, area_max_id, keywords);
    for (region, count) in regions.iter_mut().zip(counts) {
        region.words_num = count;
    }

    let preferred = match config.region_policy {
        RegionPolicy::Area => area_max_id,
        RegionPolicy::DistanceValue => value_max_id,
    };
    let mut capacity: Vec<usize> = regions.iter().map(|r| r.words_num).collect();
    let count = regions.len();
    let mut current = preferred;

    for word in words.iter_mut() {
        word.region_id = None;
        let mut attempts = 0;
        while word.region_id.is_none() && attempts < REGION_ATTEMPTS_PER_REGION * count {
            let region = &regions[current];
            let fits_name =
                region.value >= t.short_name_region_value || word.len() <= t.short_name_len;
            if capacity[current] > 0 && word.weight <= region.words_weight && fits_name {
                word.region_id = Some(current);
                capacity[current] -= 1;
            }
            current = (current + 1) % count;
            attempts += 1;
        }
        if word.region_id.is_none() {
            debug!("Word '{}' forced onto region {}.", word.name, preferred);
            word.region_id = Some(preferred);
        }
    }
    Ok(())
}

/// Assigns word counts and weight caps to the extreme points of every region, then binds each
/// word to an extreme point of its region.
///
/// Sets [`ExtremePoint::ep_weight`](crate::field::ExtremePoint),
/// [`ExtremePoint::ep_number`](crate::field::ExtremePoint) and [`Word::ep_id`].
pub fn allocate_to_extreme_points(
    words: &mut [Word],
    regions: &mut [Region],
    config: &LayoutConfig,
) -> Result<()> {
    let words_min_weight = min_weight(words);

    for (region_id, region) in regions.iter_mut().enumerate() {
        if region.extreme_points.is_empty() {
            return Err(Error::EmptyRegion { region_id });
        }
        let top_ratio = match region.extreme_points[0].ratio {
            r if r > 0.0 => r,
            _ => 1.0,
        };

        for ep in region.extreme_points.iter_mut() {
            let weight = (ep.ratio / top_ratio * region.words_weight).max(words_min_weight);
            ep.ep_weight = round_to(weight, 2);
            ep.ep_number = if ep.value < config.thresholds.min_point_value {
                0
            } else {
                (ep.ratio * region.words_num as f32).round() as usize
            };
        }
        let mut counts: Vec<usize> = region.extreme_points.iter().map(|p| p.ep_number).collect();
        rebalance(&mut counts, 0, region.words_num);
        for (ep, count) in region.extreme_points.iter_mut().zip(counts) {
            ep.ep_number = count;
        }

        let points = &region.extreme_points;
        let mut capacity: Vec<usize> = points.iter().map(|p| p.ep_number).collect();
        let mut current = 0;
        for word in words
            .iter_mut()
            .filter(|w| w.region_id == Some(region_id))
        {
            word.ep_id = None;
            let mut attempts = 0;
            while word.ep_id.is_none() && attempts < POINT_ATTEMPTS_PER_POINT * points.len() {
                if capacity[current] > 0 && word.weight <= points[current].ep_weight {
                    word.ep_id = Some(current);
                    capacity[current] -= 1;
                }
                current = (current + 1) % points.len();
                attempts += 1;
            }
            if word.ep_id.is_none() {
                word.ep_id = Some(0);
            }
        }
    }
    Ok(())
}

/// Ratio of estimated glyph footprint to area, per region, at the given font scale.
///
/// A region without area reports zero.
pub fn fill_ratios(
    words: &[Word],
    regions: &[Region],
    scale: &FontScale,
    measure: &dyn TextMeasure,
) -> Vec<f32> {
    regions
        .iter()
        .enumerate()
        .map(|(region_id, region)| {
            if region.area <= 0.0 {
                return 0.0;
            }
            let footprint: f32 = words
                .iter()
                .filter(|w| w.region_id == Some(region_id))
                .map(|w| {
                    let font_size = scale.font_size(w.weight);
                    let width = measure.measure_width(&w.name, font_size, &w.font_family);
                    (font_size + 1.0) * (width + 4.0)
                })
                .sum();
            footprint / region.area
        })
        .collect()
}

/// Picks the global maximum font size for the allocated words.
///
/// In [`FillMode::Bounded`] the result is the largest integer size in the configured range
/// that keeps every region at or below the bounded fill ratio, or the minimum size if none
/// does. In [`FillMode::Max`] the size moves one step at a time from the configured maximum
/// until the fullest region reaches the lower fill bound and the emptiest region drops to
/// the upper one.
pub fn search_font_size(
    words: &[Word],
    regions: &[Region],
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> FontScale {
    let base = FontScale::from_config(config);
    let t = &config.thresholds;
    let ratios_at = |max: f32| fill_ratios(words, regions, &base.with_max(max), measure);

    match config.fill_mode {
        FillMode::Bounded => {
            let fits = |max: f32| ratios_at(max).iter().all(|&r| r <= t.bounded_fill);
            let (mut lo, mut hi) = (config.min_font_size.ceil(), config.max_font_size.floor());
            if hi < lo || !fits(lo) {
                return base.with_max(config.min_font_size);
            }
            if fits(hi) {
                return base.with_max(hi);
            }
            // fits(lo) && !fits(hi)
            while hi - lo > 1.0 {
                let mid = ((lo + hi) / 2.0).floor();
                if fits(mid) {
                    lo = mid;
                } else {
                    hi = mid;
                }
            }
            base.with_max(lo)
        }
        FillMode::Max => {
            let mut max = config.max_font_size;
            for _ in 0..MAX_FILL_STEPS {
                let ratios = ratios_at(max);
                let fullest = ratios.iter().copied().fold(0.0, f32::max);
                let emptiest = ratios.iter().copied().fold(f32::INFINITY, f32::min);
                let grow = fullest < t.max_fill_low;
                let shrink = emptiest > t.max_fill_high && max - 1.0 >= config.min_font_size;
                if !grow && !shrink {
                    return base.with_max(max);
                }
                if grow {
                    max += 1.0;
                } else {
                    max -= 1.0;
                }
            }
            warn!(
                "Max-fill search did not settle after {} steps; using {}.",
                MAX_FILL_STEPS, max
            );
            base.with_max(max)
        }
    }
}

/// Runs all allocation phases and returns the chosen font scale.
pub fn allocate_words(
    words: &mut [Word],
    regions: &mut [Region],
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> Result<FontScale> {
    allocate_to_regions(words, regions, config)?;
    allocate_to_extreme_points(words, regions, config)?;
    let scale = search_font_size(words, regions, config, measure);
    info!(
        "Allocated {} words to {} regions; max font size {}.",
        words.len(),
        regions.len(),
        scale.max_font_size
    );
    Ok(scale)
}
