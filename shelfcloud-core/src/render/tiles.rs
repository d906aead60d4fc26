//! Tile renderer: one filled block per term, packed in shelves.
//!
//! ## Layout
//!
//! ```text
//! +--------------------------------------+
//! | [music_history      ] [piano       ] |   shelf 0 (tallest terms)
//! | [violin   ] [opera  ] [jazz ] [folk] |   shelf 1
//! | [blues] [organ] ...                  |   shelf 2
//! +--------------------------------------+
//! ```
//!
//! Terms are placed in rank order. A tile's height follows the word-cloud
//! scaling rule `(rs * count / max + (1 - rs)) * max_height` and its width
//! grows with the term's character count. Placement stops at the first
//! term that no longer fits below the last shelf or whose height drops
//! under `min_font_size`.

use image::{Rgb, RgbImage};
use tracing::debug;

use super::{CloudOptions, CloudRenderer, RenderError, TermFrequencies};

/// Width of one character relative to tile height.
const GLYPH_ASPECT: f32 = 0.6;

const VIRIDIS: [Rgb<u8>; 5] = [
    Rgb([68, 1, 84]),
    Rgb([59, 82, 139]),
    Rgb([33, 145, 140]),
    Rgb([94, 201, 98]),
    Rgb([253, 231, 37]),
];

fn interpolate_color(c1: Rgb<u8>, c2: Rgb<u8>, t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    Rgb([
        ((1.0 - t) * c1.0[0] as f32 + t * c2.0[0] as f32).round() as u8,
        ((1.0 - t) * c1.0[1] as f32 + t * c2.0[1] as f32).round() as u8,
        ((1.0 - t) * c1.0[2] as f32 + t * c2.0[2] as f32).round() as u8,
    ])
}

/// Samples the viridis ramp at `t` in `[0, 1]`.
pub fn viridis(t: f32) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let segments = (VIRIDIS.len() - 1) as f32;
    let scaled = t * segments;
    let idx = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    interpolate_color(VIRIDIS[idx], VIRIDIS[idx + 1], scaled - idx as f32)
}

fn draw_filled_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let x_end = (x + width).min(img.width());
    let y_end = (y + height).min(img.height());

    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

/// One placed term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile<'t> {
    pub term: &'t str,
    pub count: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub color: Rgb<u8>,
}

/// Shelf-packing tile renderer.
#[derive(Debug, Clone, Default)]
pub struct TileCloudRenderer {
    options: CloudOptions,
}

impl TileCloudRenderer {
    pub fn new(options: CloudOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CloudOptions {
        &self.options
    }

    /// Computes tile placement for `text` without drawing.
    pub fn layout<'t>(&self, text: &'t str) -> Result<Vec<Tile<'t>>, RenderError> {
        let opts = &self.options;
        opts.validate()?;

        let freqs = TermFrequencies::from_text(text);
        let ranked = freqs.top(opts.max_words);
        let Some(first) = ranked.first() else {
            return Err(RenderError::NoWords);
        };

        let max_count = first.count as f32;
        let rs = opts.relative_scaling;
        let max_height = opts.max_tile_height() as f32;
        let usable_width = opts.width.saturating_sub(opts.margin.saturating_mul(2));
        let color_steps = (ranked.len().max(2) - 1) as f32;

        let mut tiles = Vec::with_capacity(ranked.len());
        let (mut x, mut y, mut shelf_height) = (opts.margin, opts.margin, 0u32);

        for (rank, tc) in ranked.iter().enumerate() {
            let scale = rs * (tc.count as f32 / max_count) + (1.0 - rs);
            let height = (scale * max_height).round() as u32;
            if height == 0 || height < opts.min_font_size {
                break;
            }

            let chars = tc.term.chars().count().max(1) as f32;
            let width = ((chars * height as f32 * GLYPH_ASPECT).ceil() as u32).min(usable_width);
            if width == 0 {
                break;
            }

            if x.saturating_add(width).saturating_add(opts.margin) > opts.width {
                x = opts.margin;
                y = y.saturating_add(shelf_height).saturating_add(opts.margin);
                shelf_height = 0;
            }
            if y.saturating_add(height).saturating_add(opts.margin) > opts.height {
                break;
            }

            tiles.push(Tile {
                term: tc.term,
                count: tc.count,
                x,
                y,
                width,
                height,
                color: viridis(rank as f32 / color_steps),
            });

            x = x.saturating_add(width).saturating_add(opts.margin);
            shelf_height = shelf_height.max(height);
        }

        if tiles.is_empty() {
            return Err(RenderError::CanvasTooSmall {
                width: opts.width,
                height: opts.height,
            });
        }

        debug!(
            distinct = freqs.distinct(),
            placed = tiles.len(),
            "laid out word cloud tiles"
        );

        Ok(tiles)
    }
}

impl CloudRenderer for TileCloudRenderer {
    fn render(&self, text: &str) -> Result<RgbImage, RenderError> {
        let tiles = self.layout(text)?;
        let opts = &self.options;

        let mut img = RgbImage::from_pixel(opts.width, opts.height, Rgb(opts.background));
        for tile in &tiles {
            draw_filled_rect(&mut img, tile.x, tile.y, tile.width, tile.height, tile.color);
        }

        Ok(img)
    }
}
