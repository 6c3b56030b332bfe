//! Processing order and seed positions.
use glam::Vec2;
use rand::Rng;

use crate::field::{ExtremePoint, RegionMap};
use crate::layout::config::{FillMode, LayoutConfig};
use crate::rand01;
use crate::words::Word;

/// Rejection-sampling budget for a seed position.
pub const MAX_SEED_ATTEMPTS: usize = 10_000;

/// Share of the keywords whose order is randomized.
pub const SHUFFLED_SHARE: f32 = 0.25;

/// Word indices in processing order.
///
/// The first `len - remain` indices keep ascending order; each of the last `remain` indices
/// is inserted at a random position among those already in the list.
pub fn processing_order(len: usize, remain: usize, rng: &mut dyn Rng) -> Vec<usize> {
    let remain = remain.min(len);
    let mut order: Vec<usize> = (0..len - remain).collect();
    order.reserve(remain);
    for i in len - remain..len {
        let at = ((rand01(rng) * order.len() as f32) as usize).min(order.len());
        order.insert(at, i);
    }
    order
}

/// Number of indices [`processing_order`] randomizes for `keywords_num` keywords.
pub fn shuffled_count(keywords_num: usize) -> usize {
    (SHUFFLED_SHARE * keywords_num as f32).round() as usize
}

/// Draws a start position for `word` in a square around `anchor` that belongs to `region_id`.
///
/// The square's half-width is the anchor value divided by 5, or by 2 (max-fill mode) or 3
/// for words with the seed-spread weight. Returns `None` when no pixel of the square belongs to
/// the region within [`MAX_SEED_ATTEMPTS`] draws.
pub fn seed_position(
    word: &Word,
    anchor: &ExtremePoint,
    region_id: usize,
    region_map: &RegionMap,
    config: &LayoutConfig,
    rng: &mut dyn Rng,
) -> Option<Vec2> {
    let divisor = if !config.weight_is(word.weight, config.thresholds.seed_spread_weight) {
        5.0
    } else if config.fill_mode == FillMode::Max {
        2.0
    } else {
        3.0
    };
    let d = anchor.value / divisor;
    let min = anchor.position - Vec2::splat(d);
    let span = 2.0 * d + 1.0;

    for _ in 0..MAX_SEED_ATTEMPTS {
        let x = (rand01(rng) * span + min.x).round();
        let y = (rand01(rng) * span + min.y).round();
        if region_map.region_at(x as isize, y as isize) == Some(region_id) {
            return Some(Vec2::new(x, y));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::test_support::square_region_map;

    #[test]
    fn order_is_a_permutation_with_sorted_prefix() {
        let mut rng = StdRng::seed_from_u64(11);
        let order = processing_order(20, 5, &mut rng);
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
        let kept: Vec<usize> = order.iter().copied().filter(|&i| i < 15).collect();
        assert_eq!(kept, (0..15).collect::<Vec<_>>());
    }

    #[test]
    fn order_without_shuffled_tail_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(processing_order(4, 0, &mut rng), vec![0, 1, 2, 3]);
        assert_eq!(processing_order(0, 3, &mut rng), Vec::<usize>::new());
        let all = processing_order(3, 10, &mut rng);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn shuffled_count_rounds_a_quarter() {
        assert_eq!(shuffled_count(60), 15);
        assert_eq!(shuffled_count(3), 1);
        assert_eq!(shuffled_count(2), 1);
        assert_eq!(shuffled_count(1), 0);
    }

    #[test]
    fn seed_lands_in_region_near_anchor() {
        let map = square_region_map(100, 100, &[(0, 0, 50), (50, 0, 50)]);
        let config = LayoutConfig::new(100, 100);
        let anchor = ExtremePoint::new(Vec2::new(48.0, 25.0), 20.0, 0);
        let word = Word::new("x", 0.3, "any");
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let p = seed_position(&word, &anchor, 0, &map, &config, &mut rng).unwrap();
            assert_eq!(map.region_at_point(p), Some(0));
            assert!((p - anchor.position).abs().max_element() <= 5.0);
        }
    }

    #[test]
    fn seed_spread_weight_widens_the_square() {
        let map = square_region_map(200, 200, &[(0, 0, 200)]);
        let config = LayoutConfig::new(200, 200);
        let anchor = ExtremePoint::new(Vec2::new(100.0, 100.0), 60.0, 0);
        let word = Word::new("x", 0.8, "any");
        let mut rng = StdRng::seed_from_u64(8);
        let far = (0..200)
            .filter_map(|_| seed_position(&word, &anchor, 0, &map, &config, &mut rng))
            .any(|p| (p - anchor.position).abs().max_element() > 13.0);
        assert!(far);
    }

    #[test]
    fn unreachable_region_yields_no_seed() {
        let map = square_region_map(50, 50, &[(0, 0, 10)]);
        let config = LayoutConfig::new(50, 50);
        let anchor = ExtremePoint::new(Vec2::new(40.0, 40.0), 5.0, 0);
        let word = Word::new("x", 0.3, "any");
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(seed_position(&word, &anchor, 0, &map, &config, &mut rng), None);
    }
}
