use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use image::{Rgb, RgbImage};
use shape_wordle::layout::boxes::word_polygons;
use shape_wordle::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Output settings for [`render_layout_to_png`].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Pixels per canvas unit.
    pub scale: u32,
    pub background: [u8; 3],
    /// Fill colors cycled over region ids.
    pub region_colors: Vec<[u8; 3]>,
    /// Outline color of placed words.
    pub word_color: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 2,
            background: [255, 255, 255],
            region_colors: vec![[222, 235, 247], [229, 245, 224], [254, 230, 206]],
            word_color: [20, 20, 20],
        }
    }
}

impl RenderConfig {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
            ..Default::default()
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_word_color(mut self, word_color: [u8; 3]) -> Self {
        self.word_color = word_color;
        self
    }
}

fn draw_line(img: &mut RgbImage, a: Vec2, b: Vec2, color: Rgb<u8>) {
    let steps = a.distance(b).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let p = a.lerp(b, i as f32 / steps as f32);
        if p.x >= 0.0 && p.y >= 0.0 && (p.x as u32) < img.width() && (p.y as u32) < img.height() {
            img.put_pixel(p.x as u32, p.y as u32, color);
        }
    }
}

/// Draws regions and the collision boxes of every placed word into a PNG at `path`.
pub fn render_layout_to_png(
    result: &LayoutResult,
    region_map: &RegionMap,
    cfg: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (width, height) = region_map.size();
    let scale = cfg.scale.max(1);
    let mut img = RgbImage::from_pixel(
        width as u32 * scale,
        height as u32 * scale,
        Rgb(cfg.background),
    );

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let region = region_map.region_at((x / scale) as isize, (y / scale) as isize);
        if let Some(id) = region {
            if !cfg.region_colors.is_empty() {
                *pixel = Rgb(cfg.region_colors[id % cfg.region_colors.len()]);
            }
        }
    }

    let color = Rgb(cfg.word_color);
    let s = scale as f32;
    for word in result.words.iter().filter(|w| w.placed) {
        for quad in word_polygons(word) {
            for i in 0..4 {
                draw_line(&mut img, quad[i] * s, quad[(i + 1) % 4] * s, color);
            }
        }
    }

    let path = path.as_ref();
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(
        "Wrote {} ({} of {} words placed).",
        path.display(),
        result.placed_count(),
        result.words.len()
    );
    Ok(())
}
