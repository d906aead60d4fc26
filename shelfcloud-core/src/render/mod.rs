//! Word-cloud rendering boundary.
//!
//! The layout of a word cloud is owned by a [`CloudRenderer`]: it receives
//! the space-joined cleaned text, counts terms itself and returns a raster.
//! This module also provides the PNG and data-URI encoding applied to that
//! raster before display.
//!
//! [`TileCloudRenderer`] is a minimal renderer that draws one colored tile
//! per term, sized by frequency. Any other renderer can be plugged in
//! through the trait.

mod frequency;
mod tiles;

pub use frequency::{TermCount, TermFrequencies};
pub use tiles::{viridis, Tile, TileCloudRenderer};

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use serde::Deserialize;
use thiserror::Error;

/// Errors emitted while rendering or encoding a word cloud.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("We need at least 1 word to plot a word cloud, got 0.")]
    NoWords,

    #[error("canvas {width}x{height} is too small to place any term")]
    CanvasTooSmall { width: u32, height: u32 },

    #[error("invalid renderer option: {0}")]
    InvalidOptions(&'static str),

    #[error("failed to encode word cloud as PNG: {0}")]
    Encode(#[source] image::ImageError),
}

/// Renderer settings. Defaults mirror the library widget.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CloudOptions {
    pub width: u32,
    pub height: u32,
    /// Background RGB color.
    pub background: [u8; 3],
    /// Upper bound on the number of distinct terms drawn.
    pub max_words: usize,
    /// How much frequency drives size (0.0 = rank only, 1.0 = linear).
    pub relative_scaling: f32,
    /// Terms whose size falls below this are not drawn.
    pub min_font_size: u32,
    /// Size of the most frequent term; a quarter of the height when unset.
    pub max_font_size: Option<u32>,
    /// Gap kept around every tile.
    pub margin: u32,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            background: [255, 255, 255],
            max_words: 100,
            relative_scaling: 0.5,
            min_font_size: 10,
            max_font_size: None,
            margin: 2,
        }
    }
}

impl CloudOptions {
    /// Checks that the options describe a drawable canvas.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidOptions("width and height must be positive"));
        }
        if !(0.0..=1.0).contains(&self.relative_scaling) {
            return Err(RenderError::InvalidOptions(
                "relative_scaling must be within 0.0..=1.0",
            ));
        }
        if self.max_words == 0 {
            return Err(RenderError::InvalidOptions("max_words must be positive"));
        }
        if self.margin.saturating_mul(2) >= self.width.min(self.height) {
            return Err(RenderError::InvalidOptions(
                "margin must leave room inside the canvas",
            ));
        }
        Ok(())
    }

    /// Size given to the most frequent term.
    #[inline]
    pub fn max_tile_height(&self) -> u32 {
        self.max_font_size.unwrap_or(self.height / 4)
    }
}

/// Turns cleaned text into a raster image.
pub trait CloudRenderer {
    /// Renders `text`, the space-joined cleaned values of one selection.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NoWords`] when `text` holds no token and other
    /// variants when the layout cannot be produced.
    fn render(&self, text: &str) -> Result<RgbImage, RenderError>;
}

impl<R: CloudRenderer + ?Sized> CloudRenderer for &R {
    #[inline]
    fn render(&self, text: &str) -> Result<RgbImage, RenderError> {
        (**self).render(text)
    }
}

/// Encodes an RGB raster as PNG.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>, RenderError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .map_err(RenderError::Encode)?;
    Ok(png)
}

/// A rendered cloud, PNG encoded.
#[derive(Debug, Clone)]
pub struct RenderedCloud {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl RenderedCloud {
    /// Encodes `img` as PNG.
    pub fn from_image(img: &RgbImage) -> Result<Self, RenderError> {
        Ok(Self {
            width: img.width(),
            height: img.height(),
            png_data: encode_png(img)?,
        })
    }

    /// Inline `data:` URI suitable for an `<img src>` attribute.
    pub fn data_uri(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            BASE64_STANDARD.encode(&self.png_data)
        )
    }
}
