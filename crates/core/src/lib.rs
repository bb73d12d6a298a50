//! `point-text-core` provides core primitives for the `point-text` crate.
//!
//! It defines the [OccupancyMask] produced by a [Rasterizer], the
//! [GenerationParams] consumed by the sampler, and the [Marker]s that come out
//! the other end.

use image::{Rgb, RgbImage};

mod font;

pub use font::{FontSpec, FontSpecError};

/// Colour every rasterizer fills its bitmap with before drawing text.
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Colour every rasterizer draws text in.
pub const FOREGROUND: Rgb<u8> = Rgb([0, 0, 0]);

/// Binary foreground/background lookup over a rasterized bitmap.
///
/// A pixel is foreground when any of its channels differs from the
/// background colour, so anti-aliased edges count as covered.
#[derive(Debug, Clone)]
pub struct OccupancyMask {
    pixels: RgbImage,
    background: Rgb<u8>,
}

impl OccupancyMask {
    /// Wrap a rendered bitmap which was cleared to `background` before drawing.
    pub fn new(pixels: RgbImage, background: Rgb<u8>) -> Self {
        Self { pixels, background }
    }

    /// The degenerate 0x0 mask returned for text with no measurable width.
    pub fn empty() -> Self {
        Self::new(RgbImage::new(0, 0), BACKGROUND)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Is the pixel under `(x, y)` foreground?
    ///
    /// Coordinates outside `[0, width) x [0, height)`, including NaN, are
    /// background.
    pub fn sample(&self, x: f64, y: f64) -> bool {
        let (width, height) = (self.width() as f64, self.height() as f64);
        if !(x >= 0.0 && x < width && y >= 0.0 && y < height) {
            return false;
        }
        *self.pixels.get_pixel(x as u32, y as u32) != self.background
    }

    /// The underlying bitmap, for debugging output.
    pub fn image(&self) -> &RgbImage {
        &self.pixels
    }
}

/// Every knob of a single generation pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationParams {
    /// Text to draw
    pub text: String,
    /// CSS-style font shorthand, e.g. `"bold 48px monospace"`
    pub font: String,
    /// Radius of every emitted marker
    pub point_size: f64,
    /// Angular samples per half-ring
    pub steps: u32,
    /// Ring count before the vertical buffer is applied
    pub rings: u32,
    /// Width of the uniform jitter window applied to each axis
    pub jitter: f64,
    /// Hyperbolic spread of the samples; must be finite and non-zero
    pub spread: f64,
    /// Rotation of the whole ring pattern, in radians
    pub tilt: f64,
    /// Fill colour of the markers
    pub color: String,
}

impl GenerationParams {
    /// Style string attached to every marker.
    pub fn marker_style(&self) -> String {
        format!("fill: {}", self.color)
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            text: "hello".into(),
            font: "48px monospace".into(),
            point_size: 1.0,
            steps: 100,
            rings: 20,
            jitter: 0.0,
            spread: 1.0,
            tilt: 0.0,
            color: "black".into(),
        }
    }
}

/// A single visible point, drawn as a filled circle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub style: String,
}

/// Markers produced by one generation pass, in sampling order.
pub type MarkerList = Vec<Marker>;

/// A rasterizer backend failed to produce a mask.
#[derive(Debug, thiserror::Error)]
pub enum RasterizationError {
    #[error(transparent)]
    Font(#[from] FontSpecError),
    #[error("none of the font families in '{0}' are supported")]
    UnsupportedFamily(String),
    #[error("bitmap of {width}x{height} pixels is too large")]
    TooLarge { width: u64, height: u64 },
    #[error("rasterizer backend failed: {0}")]
    Backend(String),
}

/// A generation parameter the sampler cannot work with.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid parameter `{name}`: {reason}")]
pub struct InvalidParameterError {
    pub name: &'static str,
    pub reason: String,
}

/// Allows rendering text into an [OccupancyMask].
///
/// Implementors must not keep state between calls: every call measures and
/// draws with the font it is given.
pub trait Rasterizer {
    /// Render `text` with `font` onto a fresh bitmap of the backend's fixed
    /// height and as wide as the text measures.
    fn rasterize(&self, text: &str, font: &FontSpec) -> Result<OccupancyMask, RasterizationError>;
}
