//! Command line front end: draw text as points and save it as SVG.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use point_text::settings::{DEFAULT_SETTINGS_FILE, Settings};
use point_text::{BitmapRasterizer, GenerationParams, Portrait, export, generate, rasterize_with};
use point_text_bitmap::DEFAULT_HEIGHT;

/// Draw text as a portrait of points.
///
/// Every option not given on the command line is taken from the settings
/// file, which is updated with the values used.
#[derive(Parser, Debug)]
#[command(name = "point-text")]
#[command(about = "Draw text as a portrait of points and save it as SVG")]
struct Args {
    /// Text to draw
    #[arg(short, long)]
    text: Option<String>,

    /// CSS-style font, e.g. "bold 48px monospace"
    #[arg(short, long)]
    font: Option<String>,

    /// Radius of each point
    #[arg(long, allow_negative_numbers = true)]
    point_size: Option<f64>,

    /// Samples per half-ring
    #[arg(short, long)]
    density: Option<u32>,

    /// Number of rings
    #[arg(short, long)]
    rings: Option<u32>,

    /// Random offset applied to each point
    #[arg(long, allow_negative_numbers = true)]
    jitter: Option<f64>,

    /// How evenly samples spread along a ring (small values bunch them up)
    #[arg(long, allow_negative_numbers = true)]
    spread: Option<f64>,

    /// Rotation of the ring pattern, in radians
    #[arg(long, allow_negative_numbers = true)]
    tilt: Option<f64>,

    /// Read --tilt as degrees
    #[arg(long)]
    degrees: bool,

    /// Point colour
    #[arg(short, long)]
    color: Option<String>,

    /// Height of the rasterized text bitmap, in pixels
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Seed for reproducible jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the SVG (defaults to <text>.svg)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fill colour of a background rectangle behind the points
    #[arg(long)]
    background: Option<String>,

    /// Also save the rasterized text bitmap as a PNG
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Print the markers as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Settings file
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Don't write the values used back to the settings file
    #[arg(long)]
    no_save: bool,
}

impl Args {
    /// Overlay the options given on the command line onto `settings`.
    fn apply(&self, settings: &mut Settings) {
        if let Some(text) = &self.text {
            settings.text = text.clone();
        }
        if let Some(font) = &self.font {
            settings.font = font.clone();
        }
        if let Some(point_size) = self.point_size {
            settings.point_size = point_size;
        }
        if let Some(density) = self.density {
            settings.density = density;
        }
        if let Some(rings) = self.rings {
            settings.rings = rings;
        }
        if let Some(jitter) = self.jitter {
            settings.jitter = jitter;
        }
        if let Some(spread) = self.spread {
            settings.spread = spread;
        }
        if let Some(tilt) = self.tilt {
            settings.tilt = if self.degrees {
                point_text_sampler::degrees(tilt)
            } else {
                tilt
            };
        }
        if let Some(color) = &self.color {
            settings.color = color.clone();
        }
    }
}

/// Default output file, named after the text like the download link was.
fn default_output(text: &str) -> PathBuf {
    let name: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let name = if name.is_empty() { "points".to_string() } else { name };
    PathBuf::from(format!("{name}.svg"))
}

fn save_mask(path: &Path, mask: &point_text::OccupancyMask) -> Result<()> {
    if mask.is_empty() {
        warn!(path = %path.display(), "text has no width, not writing mask");
        return Ok(());
    }
    mask
        .image()
        .save(path)
        .with_context(|| format!("writing mask to {}", path.display()))
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = Settings::load(&args.settings)?;
    args.apply(&mut settings);
    settings.check()?;

    let params = GenerationParams::from(settings.clone());
    let rasterizer = BitmapRasterizer::new(args.height);

    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };

    let mask = rasterize_with(&rasterizer, &params.text, &params.font)?;
    if let Some(path) = &args.mask {
        save_mask(path, &mask)?;
    }

    let markers = generate(&mask, &params, rng.as_mut())?;
    let portrait = Portrait::new(&mask, markers);

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&params.text));
    let document = export::to_document(&portrait, args.background.as_deref());
    export::save(&output, &document)?;

    info!(
        markers = portrait.markers.len(),
        width = portrait.width,
        height = portrait.height,
        path = %output.display(),
        "wrote portrait"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&portrait.markers)?);
    }

    if !args.no_save {
        settings.save(&args.settings)?;
    }

    Ok(())
}
