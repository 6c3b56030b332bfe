//! Weighted keywords and their layout state.
//!
//! A [`Token`] is the raw `(name, weight)` pair handed over by the text preprocessor.
//! [`prepare_keywords`] turns the leading tokens into [`Word`]s, which the allocator and the
//! placement engine then mutate in place. [`prepare_filling_words`] builds the fixed-size list of
//! light words a renderer scatters into the space left between keywords.
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::Vec2;
use rand::Rng;

use crate::error::{Error, Result};
use crate::geometry::round_to;
use crate::rand01;

/// Smallest weight a keyword can carry.
pub const MIN_WORD_WEIGHT: f32 = 0.02;

/// Length of the filling-word list.
pub const FILLING_WORDS_LEN: usize = 200;
/// Weight of every filling word.
pub const FILLING_WORD_WEIGHT: f32 = 0.05;
/// With at least this many tokens, filling words skip the keywords.
pub const FILLING_SKIP_KEYWORDS_MIN_TOKENS: usize = 160;

/// A weighted token from the text preprocessor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub name: String,
    pub weight: f32,
}

impl Token {
    pub fn new(name: impl Into<String>, weight: f32) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Policy for the initial rotation of each keyword.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Every word is horizontal.
    #[default]
    Horizontal,
    /// Mostly vertical words; heavy words stay horizontal 40% of the time.
    HorizontalAndVertical,
    /// Uniform angle in `[-pi/2, pi/2]`.
    Random,
    /// Every word rises at 45 degrees.
    Pitch,
    /// Every word falls at 45 degrees.
    Tilt,
    /// Rising or falling at 45 degrees by coin flip.
    PitchAndTilt,
}

impl Orientation {
    /// Draws an angle in radians for a word of the given weight.
    pub fn angle(self, weight: f32, rng: &mut dyn Rng) -> f32 {
        match self {
            Orientation::Horizontal => 0.0,
            Orientation::HorizontalAndVertical => {
                if weight > 0.5 && rand01(rng) < 0.4 {
                    0.0
                } else if rand01(rng) > 0.5 {
                    FRAC_PI_2
                } else {
                    -FRAC_PI_2
                }
            }
            Orientation::Random => -FRAC_PI_2 + rand01(rng) * 2.0 * FRAC_PI_2,
            Orientation::Pitch => FRAC_PI_4,
            Orientation::Tilt => -FRAC_PI_4,
            Orientation::PitchAndTilt => {
                if rand01(rng) > 0.5 {
                    FRAC_PI_4
                } else {
                    -FRAC_PI_4
                }
            }
        }
    }
}

/// A light word used to pad the space around keywords.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillingWord {
    pub name: String,
    pub weight: f32,
}

/// Collision box of a single glyph row or glyph, relative to the word position.
///
/// The box covers `offset .. offset + 2 * half_size` before rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphBox {
    pub offset: Vec2,
    pub half_size: Vec2,
}

impl GlyphBox {
    pub fn new(x: f32, y: f32, half_width: f32, half_height: f32) -> Self {
        Self {
            offset: Vec2::new(x, y),
            half_size: Vec2::new(half_width, half_height),
        }
    }
}

/// A keyword together with its layout state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Word {
    pub name: String,
    /// Importance in `[0.02, 1]`.
    pub weight: f32,
    /// Center of the word in raster space.
    pub position: Vec2,
    /// Rotation about `position`, in radians.
    pub angle: f32,
    /// Half of the padded advance width.
    pub width: f32,
    /// Half of the padded ink height.
    pub height: f32,
    /// Per-glyph collision boxes, when the word is not treated as a single rectangle.
    pub boxes: Option<Vec<GlyphBox>>,
    pub descent: f32,
    /// Padding between glyph boxes.
    pub gap: f32,
    pub font_family: String,
    pub font_size: f32,
    /// Region assigned by the allocator.
    pub region_id: Option<usize>,
    /// Extreme point (within the region) assigned by the allocator.
    pub ep_id: Option<usize>,
    pub placed: bool,
}

impl Word {
    pub fn new(name: impl Into<String>, weight: f32, font_family: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight,
            position: Vec2::ZERO,
            angle: 0.0,
            width: 0.0,
            height: 0.0,
            boxes: None,
            descent: 0.0,
            gap: 0.0,
            font_family: font_family.into(),
            font_size: 0.0,
            region_id: None,
            ep_id: None,
            placed: false,
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Character count of the name.
    pub fn len(&self) -> usize {
        self.name.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// Converts the first `keywords_num` tokens into keywords.
///
/// Names are trimmed, weights below [`MIN_WORD_WEIGHT`] are raised to it and all others are
/// rounded to three decimals. Each word draws its angle from `orientation`.
pub fn prepare_keywords(
    tokens: &[Token],
    keywords_num: usize,
    font_family: &str,
    orientation: Orientation,
    rng: &mut dyn Rng,
) -> Result<Vec<Word>> {
    if tokens.len() < keywords_num {
        return Err(Error::NotEnoughWords {
            required: keywords_num,
            got: tokens.len(),
        });
    }

    let words = tokens[..keywords_num]
        .iter()
        .map(|token| {
            let weight = if token.weight < MIN_WORD_WEIGHT {
                MIN_WORD_WEIGHT
            } else {
                round_to(token.weight, 3)
            };
            let angle = orientation.angle(weight, rng);
            Word::new(token.name.trim(), weight, font_family).with_angle(angle)
        })
        .collect();
    Ok(words)
}

/// Builds exactly [`FILLING_WORDS_LEN`] filling words from `tokens`.
///
/// Tokens after the keywords are used when there are at least
/// [`FILLING_SKIP_KEYWORDS_MIN_TOKENS`] of them, otherwise the list starts at the first token.
/// A short list is padded with random duplicates of its own entries. No tokens yield an empty
/// list.
pub fn prepare_filling_words(
    tokens: &[Token],
    keywords_num: usize,
    rng: &mut dyn Rng,
) -> Vec<FillingWord> {
    let start = if tokens.len() >= FILLING_SKIP_KEYWORDS_MIN_TOKENS {
        keywords_num.min(tokens.len())
    } else {
        0
    };
    let end = tokens.len().min(start + FILLING_WORDS_LEN);
    let mut filling: Vec<FillingWord> = tokens[start..end]
        .iter()
        .map(|token| FillingWord {
            name: token.name.trim().to_owned(),
            weight: FILLING_WORD_WEIGHT,
        })
        .collect();
    if filling.is_empty() {
        return filling;
    }

    filling.reserve(FILLING_WORDS_LEN - filling.len());
    while filling.len() < FILLING_WORDS_LEN {
        let pick = ((rand01(rng) * filling.len() as f32) as usize).min(filling.len() - 1);
        filling.push(filling[pick].clone());
    }
    filling
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    struct FixedRng {
        value: u32,
    }

    impl rand::TryRng for FixedRng {
        type Error = core::convert::Infallible;

        fn try_next_u32(&mut self) -> core::result::Result<u32, Self::Error> {
            Ok(self.value)
        }

        fn try_next_u64(&mut self) -> core::result::Result<u64, Self::Error> {
            Ok(self.value as u64)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), Self::Error> {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
            Ok(())
        }
    }

    fn tokens() -> Vec<Token> {
        vec![
            Token::new("  alpha ", 0.91234),
            Token::new("beta", 0.001),
            Token::new("gamma", 0.5),
            Token::new("delta", 0.3),
        ]
    }

    #[test]
    fn keywords_are_trimmed_clamped_and_rounded() {
        let mut rng = StdRng::seed_from_u64(1);
        let words =
            prepare_keywords(&tokens(), 3, "serif", Orientation::Horizontal, &mut rng).unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(words[0].name, "alpha");
        assert_eq!(words[0].weight, 0.912);
        assert_eq!(words[1].weight, MIN_WORD_WEIGHT);
        assert_eq!(words[2].font_family, "serif");
        assert!(words.iter().all(|w| w.angle == 0.0 && !w.placed));
        assert!(words.iter().all(|w| w.region_id.is_none()));
    }

    #[test]
    fn too_few_tokens_is_an_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = prepare_keywords(&tokens(), 5, "serif", Orientation::Horizontal, &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::NotEnoughWords {
                required: 5,
                got: 4
            }
        ));
    }

    fn numbered_tokens(count: usize) -> Vec<Token> {
        (0..count)
            .map(|i| Token::new(format!(" t{i} "), 1.0 - i as f32 / count as f32))
            .collect()
    }

    #[test]
    fn filling_words_reuse_keywords_below_the_threshold() {
        let mut rng = StdRng::seed_from_u64(4);
        let filling = prepare_filling_words(&numbered_tokens(159), 60, &mut rng);
        assert_eq!(filling.len(), FILLING_WORDS_LEN);
        assert_eq!(filling[0].name, "t0");
        assert_eq!(filling[158].name, "t158");
        assert!(filling.iter().all(|w| w.weight == FILLING_WORD_WEIGHT));
        // Padding only duplicates existing entries.
        let sources: Vec<String> = filling[..159].iter().map(|w| w.name.clone()).collect();
        assert!(filling[159..].iter().all(|w| sources.contains(&w.name)));
    }

    #[test]
    fn filling_words_skip_keywords_from_the_threshold() {
        let mut rng = StdRng::seed_from_u64(4);
        let filling = prepare_filling_words(&numbered_tokens(160), 60, &mut rng);
        assert_eq!(filling.len(), FILLING_WORDS_LEN);
        assert_eq!(filling[0].name, "t60");
        assert_eq!(filling[99].name, "t159");
        assert!(filling[100..]
            .iter()
            .all(|w| w.name[1..].parse::<usize>().unwrap() >= 60));
    }

    #[test]
    fn filling_words_are_capped() {
        let mut rng = FixedRng { value: 0 };
        let filling = prepare_filling_words(&numbered_tokens(500), 60, &mut rng);
        assert_eq!(filling.len(), FILLING_WORDS_LEN);
        assert_eq!(filling[0].name, "t60");
        assert_eq!(filling[199].name, "t259");
    }

    #[test]
    fn filling_padding_draws_through_the_rng() {
        let mut rng = FixedRng { value: u32::MAX };
        let filling = prepare_filling_words(&numbered_tokens(3), 0, &mut rng);
        assert_eq!(filling.len(), FILLING_WORDS_LEN);
        // The highest roll always duplicates the newest entry, which is a copy of "t2".
        assert!(filling[2..].iter().all(|w| w.name == "t2"));

        assert!(prepare_filling_words(&[], 0, &mut rng).is_empty());
    }

    #[test]
    fn fixed_orientations_ignore_the_rng() {
        let mut rng = FixedRng { value: 7 };
        assert_eq!(Orientation::Pitch.angle(0.3, &mut rng), FRAC_PI_4);
        assert_eq!(Orientation::Tilt.angle(0.3, &mut rng), -FRAC_PI_4);
        assert_eq!(Orientation::Horizontal.angle(0.3, &mut rng), 0.0);
    }

    #[test]
    fn horizontal_and_vertical_keeps_heavy_words_level_on_low_rolls() {
        let mut low = FixedRng { value: 0 };
        assert_eq!(
            Orientation::HorizontalAndVertical.angle(0.9, &mut low),
            0.0
        );
        // Light words never stay horizontal.
        assert_eq!(
            Orientation::HorizontalAndVertical.angle(0.2, &mut low),
            -FRAC_PI_2
        );
        let mut high = FixedRng { value: u32::MAX };
        assert_eq!(
            Orientation::HorizontalAndVertical.angle(0.9, &mut high),
            FRAC_PI_2
        );
    }

    #[test]
    fn random_orientation_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let a = Orientation::Random.angle(0.5, &mut rng);
            assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&a));
        }
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let a = Orientation::PitchAndTilt.angle(0.5, &mut rng);
            assert!(a == FRAC_PI_4 || a == -FRAC_PI_4);
        }
    }
}
