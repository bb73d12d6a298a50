use std::cell::Cell;

use point_text::{
    BitmapRasterizer, Error, FontSpec, GenerationParams, OccupancyMask, RasterizationError,
    Rasterizer, export, rasterize, render_seeded, render_with,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn letter_a() -> GenerationParams {
    GenerationParams {
        text: "A".into(),
        font: "48px monospace".into(),
        point_size: 2.0,
        steps: 20,
        rings: 3,
        jitter: 0.0,
        spread: 1.0,
        tilt: 0.0,
        color: "black".into(),
    }
}

/// Counts calls and always fails, like a backend that cannot load its font.
struct BrokenRasterizer {
    calls: Cell<usize>,
}

impl Rasterizer for BrokenRasterizer {
    fn rasterize(&self, _text: &str, _font: &FontSpec) -> Result<OccupancyMask, RasterizationError> {
        self.calls.set(self.calls.get() + 1);
        Err(RasterizationError::Backend("font file is unreadable".into()))
    }
}

#[test]
fn letter_a_gives_points_inside_the_bitmap() {
    let portrait = render_seeded(&letter_a(), 0).unwrap();
    assert_eq!(portrait.width, 36);
    assert_eq!(portrait.height, 200);
    assert!(!portrait.markers.is_empty());

    for marker in &portrait.markers {
        assert!((0.0..=portrait.width as f64).contains(&marker.cx), "{marker:?}");
        assert!((0.0..=portrait.height as f64).contains(&marker.cy), "{marker:?}");
        assert_eq!(marker.r, 2.0);
        assert_eq!(marker.style, "fill: black");
    }
}

#[test]
fn empty_text_gives_no_points() {
    for params in [
        GenerationParams { text: String::new(), ..letter_a() },
        GenerationParams { text: String::new(), rings: 50, tilt: 1.2, jitter: 3.0, ..letter_a() },
        GenerationParams { text: "\u{1F600}".into(), ..letter_a() },
    ] {
        let portrait = render_seeded(&params, 0).unwrap();
        assert!(portrait.markers.is_empty());
        assert_eq!((portrait.width, portrait.height), (0, 0));
    }
}

#[test]
fn zero_spread_is_an_invalid_parameter() {
    let params = GenerationParams { spread: 0.0, ..letter_a() };
    match render_seeded(&params, 0) {
        Err(Error::InvalidParameter(err)) => assert_eq!(err.name, "spread"),
        other => panic!("expected an invalid parameter, got {other:?}"),
    }
}

#[test]
fn zero_rings_stays_within_one_ring() {
    let params = GenerationParams { rings: 0, ..letter_a() };
    let portrait = render_seeded(&params, 0).unwrap();
    assert!(portrait.markers.len() <= params.steps as usize);
    assert!(portrait.markers.iter().all(|m| m.cy == 100.0));
}

#[test]
fn zero_jitter_ignores_the_seed() {
    let first = render_seeded(&letter_a(), 1).unwrap();
    let second = render_seeded(&letter_a(), 99).unwrap();
    assert_eq!(first, second);
}

#[test]
fn seeded_jitter_is_reproducible() {
    let params = GenerationParams { jitter: 3.0, rings: 10, steps: 60, ..letter_a() };
    assert_eq!(render_seeded(&params, 5).unwrap(), render_seeded(&params, 5).unwrap());
}

#[test]
fn unknown_font_is_a_rasterization_error() {
    let params = GenerationParams { font: "48px Papyrus".into(), ..letter_a() };
    assert!(matches!(
        render_seeded(&params, 0),
        Err(Error::Rasterization(RasterizationError::UnsupportedFamily(_)))
    ));

    assert!(matches!(
        rasterize("A", "monospace"),
        Err(Error::Rasterization(RasterizationError::Font(_)))
    ));
}

#[test]
fn backend_failure_stops_the_pipeline() {
    let rasterizer = BrokenRasterizer { calls: Cell::new(0) };
    let params = GenerationParams { spread: 0.0, ..letter_a() };
    let result = render_with(&rasterizer, &params, &mut StdRng::seed_from_u64(0));
    assert!(matches!(
        result,
        Err(Error::Rasterization(RasterizationError::Backend(_)))
    ));
    assert_eq!(rasterizer.calls.get(), 1);
}

#[test]
fn taller_bitmaps_keep_the_text_centred() {
    let rasterizer = BitmapRasterizer::new(400);
    let portrait = render_with(&rasterizer, &letter_a(), &mut StdRng::seed_from_u64(0)).unwrap();
    assert_eq!(portrait.height, 400);
    let (top, bottom) = (200.0 - 21.0, 200.0 + 21.0);
    assert!(portrait.markers.iter().all(|m| m.cy >= top && m.cy < bottom));
}

#[test]
fn svg_round_trip_recovers_markers() {
    let params = GenerationParams { jitter: 1.5, tilt: 0.3, rings: 8, steps: 50, ..letter_a() };
    let portrait = render_seeded(&params, 11).unwrap();
    assert!(!portrait.markers.is_empty());

    let text = export::to_document(&portrait, Some("white")).to_string();
    let parsed = export::parse_markers(&text).unwrap();

    assert_eq!(parsed.len(), portrait.markers.len());
    for (read, written) in parsed.iter().zip(&portrait.markers) {
        assert_eq!(read.cx, written.cx);
        assert_eq!(read.cy, written.cy);
        assert_eq!(read.r, written.r);
        assert_eq!(read.style, written.style);
    }
}
