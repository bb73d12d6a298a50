//! `point-text-bitmap` is a rasterizer backend for the `point-text` crate that
//! draws text with a built-in 5x7 bitmap font.
//!
//! Glyphs cover printable ASCII and are scaled to the requested pixel size,
//! one em being eight cells (seven glyph rows plus a row of descent).

use std::ops::Range;

use image::RgbImage;
use point_text_core::{
    BACKGROUND, FOREGROUND, FontSpec, OccupancyMask, RasterizationError, Rasterizer,
};
use tracing::debug;

/// A single glyph: seven rows, leftmost cell in bit 4.
#[derive(Debug, Copy, Clone)]
pub struct Glyph {
    pub rows: [u8; GLYPH_HEIGHT as usize],
}

include!(concat!(env!("OUT_DIR"), "/bitmap_font.rs"));

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;

/// Horizontal advance in cells: the glyph plus one column of spacing.
const ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Cells per em.
const EM_CELLS: f64 = 8.0;

/// Cells the top row of an italic glyph is shifted right, per row above the
/// baseline row.
const ITALIC_SHEAR: f64 = 1.0 / 6.0;

/// Bitmap height used when none is given.
pub const DEFAULT_HEIGHT: u32 = 200;

/// Largest bitmap, in pixels, the rasterizer will allocate.
const MAX_PIXELS: u64 = 1 << 28;

/// Family names this backend answers to.
const FAMILIES: &[&str] = &["monospace", "sans-serif", "serif", "system-ui", "5x7"];

/// A [Rasterizer] which draws text using the built-in bitmap font.
#[derive(Debug, Clone, Copy)]
pub struct BitmapRasterizer {
    height: u32,
}

impl Default for BitmapRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_HEIGHT)
    }
}

impl BitmapRasterizer {
    /// A rasterizer whose bitmaps are always `height` pixels tall.
    pub fn new(height: u32) -> Self {
        Self { height }
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn supports_family(family: &str) -> bool {
        FAMILIES.iter().any(|known| known.eq_ignore_ascii_case(family))
    }

    /// Look up the glyph for a character, if the font has one.
    pub fn glyph(character: char) -> Option<Glyph> {
        BITMAP_FONT.get(character as usize).copied().flatten()
    }

    /// Width in pixels `text` occupies at `font`'s size.
    ///
    /// Characters without a glyph take no space.
    pub fn measure(text: &str, font: &FontSpec) -> u32 {
        let glyphs = text.chars().filter_map(Self::glyph).count() as f64;
        (glyphs * ADVANCE as f64 * cell_size(font)).ceil() as u32
    }
}

/// Size of one glyph cell in pixels.
fn cell_size(font: &FontSpec) -> f64 {
    font.size_px / EM_CELLS
}

/// Pixels whose centres fall within `[start, end)`, clipped to `0..limit`.
fn pixel_span(start: f64, end: f64, limit: u32) -> Range<u32> {
    let first = (start - 0.5).ceil().max(0.0);
    let last = (end - 0.5).ceil().clamp(0.0, limit as f64);
    first as u32..last as u32
}

fn fill_cell(image: &mut RgbImage, left: f64, top: f64, size: f64) {
    let columns = pixel_span(left, left + size, image.width());
    for y in pixel_span(top, top + size, image.height()) {
        for x in columns.clone() {
            image.put_pixel(x, y, FOREGROUND);
        }
    }
}

/// Widen a row into six cells (leftmost in bit 5), smearing it one cell to
/// the right when `bold`.
fn widen_row(row: u8, bold: bool) -> u8 {
    if bold { (row << 1) | row } else { row << 1 }
}

impl Rasterizer for BitmapRasterizer {
    fn rasterize(&self, text: &str, font: &FontSpec) -> Result<OccupancyMask, RasterizationError> {
        let family = font
            .pick_family(Self::supports_family)
            .ok_or_else(|| RasterizationError::UnsupportedFamily(font.families.join(", ")))?;

        let width = Self::measure(text, font);
        if width == 0 {
            debug!(?text, "text has no measurable width");
            return Ok(OccupancyMask::empty());
        }

        let pixels = width as u64 * self.height as u64;
        if pixels > MAX_PIXELS {
            return Err(RasterizationError::TooLarge {
                width: width as u64,
                height: self.height as u64,
            });
        }

        let mut image = RgbImage::from_pixel(width, self.height, BACKGROUND);

        let cell = cell_size(font);
        let top = (self.height as f64 - GLYPH_HEIGHT as f64 * cell) / 2.0;
        let mut x_idx = 0;

        for glyph in text.chars().filter_map(Self::glyph) {
            let origin = (x_idx * ADVANCE) as f64 * cell;

            for (y, row) in glyph.rows.iter().enumerate() {
                let bits = widen_row(*row, font.bold);
                let shear = if font.italic {
                    (GLYPH_HEIGHT as usize - 1 - y) as f64 * ITALIC_SHEAR
                } else {
                    0.0
                };

                for x in 0..=GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - x)) != 0 {
                        fill_cell(
                            &mut image,
                            origin + (x as f64 + shear) * cell,
                            top + y as f64 * cell,
                            cell,
                        );
                    }
                }
            }

            x_idx += 1;
        }

        debug!(family, width, height = self.height, "rasterized text");

        Ok(OccupancyMask::new(image, BACKGROUND))
    }
}
