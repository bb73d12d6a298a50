//! `point-text` is a library for drawing text as a scatter of points.
//!
//! Text is first rasterized into an [OccupancyMask], then sampled on a grid
//! of hyperbolically spaced, lens-shaped rings. Every sample that lands on the
//! text becomes a [Marker], and the resulting [Portrait] can be saved as an
//! SVG of filled circles.
//!
//! Rasterization is pluggable through the [Rasterizer] trait; the built-in
//! backend is a scalable 5x7 bitmap font, via [point_text_bitmap].
//!
//! ```
//! use point_text::{GenerationParams, export, render_seeded};
//!
//! let params = GenerationParams {
//!     text: "Hello".into(),
//!     font: "48px monospace".into(),
//!     ..GenerationParams::default()
//! };
//!
//! let portrait = render_seeded(&params, 42)?;
//! let document = export::to_document(&portrait, Some("white"));
//! # Ok::<(), point_text::Error>(())
//! ```

use rand::SeedableRng;
use rand::{Rng, rngs::StdRng};

pub use point_text_bitmap::BitmapRasterizer;
pub use point_text_core::{
    FontSpec, FontSpecError, GenerationParams, InvalidParameterError, Marker, MarkerList,
    OccupancyMask, RasterizationError, Rasterizer,
};
pub use point_text_sampler::generate;

mod error;
pub mod export;
pub mod settings;

pub use error::Error;

/// Markers generated for one piece of text, with the size of the bitmap they
/// were sampled from.
#[derive(Debug, Clone, PartialEq)]
pub struct Portrait {
    pub width: u32,
    pub height: u32,
    pub markers: MarkerList,
}

impl Portrait {
    pub fn new(mask: &OccupancyMask, markers: MarkerList) -> Self {
        Self {
            width: mask.width(),
            height: mask.height(),
            markers,
        }
    }
}

/// Rasterize `text` in the CSS-style `font` using the given backend.
pub fn rasterize_with<R>(rasterizer: &R, text: &str, font: &str) -> Result<OccupancyMask, Error>
where
    R: Rasterizer + ?Sized,
{
    let font: FontSpec = font.parse().map_err(RasterizationError::from)?;
    Ok(rasterizer.rasterize(text, &font)?)
}

/// Rasterize `text` with the built-in bitmap font.
pub fn rasterize(text: &str, font: &str) -> Result<OccupancyMask, Error> {
    rasterize_with(&BitmapRasterizer::default(), text, font)
}

/// Run the whole pipeline: rasterize `params.text`, then sample it.
///
/// Sampling is never attempted if rasterization fails.
pub fn render_with<R, G>(rasterizer: &R, params: &GenerationParams, rng: &mut G) -> Result<Portrait, Error>
where
    R: Rasterizer + ?Sized,
    G: Rng + ?Sized,
{
    let mask = rasterize_with(rasterizer, &params.text, &params.font)?;
    let markers = generate(&mask, params, rng)?;
    Ok(Portrait::new(&mask, markers))
}

/// Render with the bitmap font and thread-local randomness for jitter.
pub fn render(params: &GenerationParams) -> Result<Portrait, Error> {
    render_with(&BitmapRasterizer::default(), params, &mut rand::thread_rng())
}

/// Render with the bitmap font and reproducible jitter.
pub fn render_seeded(params: &GenerationParams, seed: u64) -> Result<Portrait, Error> {
    render_with(&BitmapRasterizer::default(), params, &mut StdRng::seed_from_u64(seed))
}
