//! `point-text-sampler` turns an [OccupancyMask] into a scatter of markers.
//!
//! Candidate points are laid out on rings around the centre of the mask.
//! Along each ring, samples are spaced hyperbolically: the step index is
//! warped through `asinh`/`sinh` so `spread` decides how strongly samples
//! bunch up near the middle. Each ring bows outward with `cosh`, giving
//! lens-shaped rings rather than circles. The whole pattern is then tilted
//! about the centre and every candidate that lands on foreground becomes a
//! [Marker].

use std::f64::consts::PI;

use point_text_core::{GenerationParams, InvalidParameterError, Marker, MarkerList, OccupancyMask};
use rand::Rng;
use tracing::{debug, trace};

/// Ring multiplier; extra rings keep a tilted pattern covering the corners.
pub const Y_BUFFER: u32 = 2;

/// Check the parameters the sampling math cannot survive.
pub fn validate(params: &GenerationParams) -> Result<(), InvalidParameterError> {
    if params.spread == 0.0 || !params.spread.is_finite() {
        return Err(InvalidParameterError {
            name: "spread",
            reason: format!("must be finite and non-zero, got {}", params.spread),
        });
    }
    Ok(())
}

/// Shape of the sampling grid over a `width` x `height` mask.
#[derive(Debug, Clone, Copy)]
pub struct RingGrid {
    pub width: f64,
    pub height: f64,
    pub spread: f64,
    pub steps: u32,
    /// Effective ring count, after [Y_BUFFER] is applied
    pub rings: u32,
}

impl RingGrid {
    pub fn new(mask: &OccupancyMask, params: &GenerationParams) -> Self {
        Self {
            width: mask.width() as f64,
            height: mask.height() as f64,
            spread: params.spread,
            steps: params.steps,
            rings: params.rings.saturating_mul(Y_BUFFER),
        }
    }

    pub fn centre(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Untilted position of `step` on `ring`, above (`side < 0`) or below
    /// (`side > 0`) the centre line.
    pub fn point(&self, ring: u32, side: f64, step: u32) -> (f64, f64) {
        let t = self.spread.asinh() * 2.0 * (step as f64 / self.steps as f64 - 0.5);
        let x = self.width * (t.sinh() / self.spread + 0.5);

        // ring 0 sits on the centre line even when there are no other rings
        let depth = if ring == 0 {
            0.0
        } else {
            ring as f64 / self.rings as f64
        };
        let y = self.height * (side * Y_BUFFER as f64 * t.cosh() * depth + 0.5);

        (x, y)
    }

    /// Every `(ring, side)` pass in sampling order. Ring 0 is visited once,
    /// since both of its sides coincide.
    pub fn passes(&self) -> impl Iterator<Item = (u32, f64)> {
        (0..self.rings.max(1)).flat_map(|ring| {
            let sides: &'static [f64] = if ring == 0 { &[1.0] } else { &[-1.0, 1.0] };
            sides.iter().map(move |&side| (ring, side))
        })
    }
}

/// Rotate `point` about `centre` by `angle` radians.
pub fn rotate_about(point: (f64, f64), centre: (f64, f64), angle: f64) -> (f64, f64) {
    if angle == 0.0 {
        return point;
    }

    let (dx, dy) = (point.0 - centre.0, point.1 - centre.1);
    let theta = dy.atan2(dx) + angle;
    let r = dx.hypot(dy);

    (r * theta.cos() + centre.0, r * theta.sin() + centre.1)
}

/// Normalise a tilt given in degrees to radians.
pub fn degrees(tilt: f64) -> f64 {
    tilt * PI / 180.0
}

/// A uniform draw from `[-jitter / 2, jitter / 2]`.
fn jitter_offset<R: Rng + ?Sized>(rng: &mut R, jitter: f64) -> f64 {
    (rng.r#gen::<f64>() - 0.5) * jitter
}

/// Sample `mask` on the ring grid described by `params`.
///
/// Jitter is drawn from `rng`, one draw for `x` then one for `y`, only for
/// candidates that land on foreground. With `jitter == 0` no draws are made
/// and the output is fully deterministic.
pub fn generate<R: Rng + ?Sized>(
    mask: &OccupancyMask,
    params: &GenerationParams,
    rng: &mut R,
) -> Result<MarkerList, InvalidParameterError> {
    if mask.width() == 0 {
        return Ok(MarkerList::new());
    }

    validate(params)?;

    let grid = RingGrid::new(mask, params);
    let centre = grid.centre();
    let style = params.marker_style();
    let mut markers = MarkerList::new();

    for (ring, side) in grid.passes() {
        let before = markers.len();

        for step in 0..grid.steps {
            let (x, y) = rotate_about(grid.point(ring, side, step), centre, params.tilt);

            if !mask.sample(x, y) {
                continue;
            }

            let (cx, cy) = if params.jitter == 0.0 {
                (x, y)
            } else {
                let dx = jitter_offset(rng, params.jitter);
                let dy = jitter_offset(rng, params.jitter);
                (x + dx, y + dy)
            };

            markers.push(Marker {
                cx,
                cy,
                r: params.point_size,
                style: style.clone(),
            });
        }

        trace!(ring, side, emitted = markers.len() - before, "sampled ring");
    }

    debug!(
        width = grid.width,
        height = grid.height,
        rings = grid.rings,
        steps = grid.steps,
        markers = markers.len(),
        "generated markers"
    );

    Ok(markers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use point_text_core::{BACKGROUND, FOREGROUND};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const WIDTH: u32 = 100;
    const HEIGHT: u32 = 50;

    fn full_mask() -> OccupancyMask {
        OccupancyMask::new(RgbImage::from_pixel(WIDTH, HEIGHT, FOREGROUND), BACKGROUND)
    }

    /// Foreground in columns `25..75`, every row.
    fn stripe_mask() -> OccupancyMask {
        let image = RgbImage::from_fn(WIDTH, HEIGHT, |x, _| {
            if (25..75).contains(&x) { FOREGROUND } else { BACKGROUND }
        });
        OccupancyMask::new(image, BACKGROUND)
    }

    fn params() -> GenerationParams {
        GenerationParams {
            point_size: 2.0,
            steps: 20,
            rings: 3,
            jitter: 0.0,
            spread: 1.0,
            tilt: 0.0,
            color: "black".into(),
            ..GenerationParams::default()
        }
    }

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn empty_mask_gives_no_markers() {
        let mask = OccupancyMask::empty();
        for spread in [1.0, 0.0, f64::NAN] {
            let params = GenerationParams { spread, ..params() };
            assert_eq!(generate(&mask, &params, &mut rng(0)), Ok(Vec::new()));
        }
    }

    #[test]
    fn zero_spread_is_rejected() {
        let params = GenerationParams { spread: 0.0, ..params() };
        let err = generate(&full_mask(), &params, &mut rng(0)).unwrap_err();
        assert_eq!(err.name, "spread");
    }

    #[test]
    fn non_finite_spread_is_rejected() {
        for spread in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let params = GenerationParams { spread, ..params() };
            assert!(generate(&full_mask(), &params, &mut rng(0)).is_err());
        }
    }

    #[test]
    fn negative_spread_is_allowed() {
        let positive = generate(&full_mask(), &params(), &mut rng(0)).unwrap();
        let params = GenerationParams { spread: -1.0, ..params() };
        let negative = generate(&full_mask(), &params, &mut rng(0)).unwrap();
        assert_eq!(positive.len(), negative.len());
    }

    #[test]
    fn zero_steps_gives_no_markers() {
        let params = GenerationParams { steps: 0, ..params() };
        assert!(generate(&full_mask(), &params, &mut rng(0)).unwrap().is_empty());
    }

    #[test]
    fn zero_rings_samples_only_the_centre_line() {
        let params = GenerationParams { rings: 0, ..params() };
        let markers = generate(&full_mask(), &params, &mut rng(0)).unwrap();
        assert!(!markers.is_empty());
        assert!(markers.len() <= params.steps as usize);
        assert!(markers.iter().all(|m| m.cy == HEIGHT as f64 / 2.0));
    }

    #[test]
    fn ring_zero_is_visited_once() {
        let grid = RingGrid::new(&full_mask(), &params());
        let passes: Vec<_> = grid.passes().collect();
        assert_eq!(passes.len(), 1 + 5 * 2);
        assert_eq!(passes[0], (0, 1.0));
        assert_eq!(passes[1], (1, -1.0));
        assert_eq!(passes[2], (1, 1.0));
    }

    #[test]
    fn middle_step_lands_on_centre() {
        let grid = RingGrid::new(&full_mask(), &params());
        assert_eq!(grid.point(0, 1.0, 10), (50.0, 25.0));
    }

    #[test]
    fn rings_bow_outward() {
        let grid = RingGrid::new(&full_mask(), &params());
        let (_, middle) = grid.point(1, 1.0, 10);
        let (_, edge) = grid.point(1, 1.0, 2);
        assert!(edge > middle);
        let (_, above) = grid.point(1, -1.0, 2);
        assert!((above - (HEIGHT as f64 - edge)).abs() < 1e-9);
    }

    #[test]
    fn zero_tilt_is_identity() {
        let point = (12.5, -3.25);
        assert_eq!(rotate_about(point, (50.0, 25.0), 0.0), point);
    }

    #[test]
    fn tilt_rotates_about_centre() {
        let (x, y) = rotate_about((60.0, 25.0), (50.0, 25.0), PI / 2.0);
        assert!((x - 50.0).abs() < 1e-9);
        assert!((y - 35.0).abs() < 1e-9);

        let (x, y) = rotate_about((50.0, 25.0), (50.0, 25.0), 1.0);
        assert!((x - 50.0).abs() < 1e-9);
        assert!((y - 25.0).abs() < 1e-9);
    }

    #[test]
    fn tilted_markers_stay_on_foreground() {
        let params = GenerationParams { tilt: 0.7, ..params() };
        let mask = stripe_mask();
        let markers = generate(&mask, &params, &mut rng(0)).unwrap();
        assert!(!markers.is_empty());
        assert!(markers.iter().all(|m| mask.sample(m.cx, m.cy)));
    }

    #[test]
    fn zero_jitter_is_deterministic() {
        let first = generate(&stripe_mask(), &params(), &mut rng(1)).unwrap();
        let second = generate(&stripe_mask(), &params(), &mut rng(2)).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.cx.to_bits(), b.cx.to_bits());
            assert_eq!(a.cy.to_bits(), b.cy.to_bits());
        }
    }

    #[test]
    fn jitter_is_reproducible_and_bounded() {
        let jittered = GenerationParams { jitter: 4.0, ..params() };
        let first = generate(&stripe_mask(), &jittered, &mut rng(7)).unwrap();
        let again = generate(&stripe_mask(), &jittered, &mut rng(7)).unwrap();
        assert_eq!(first, again);

        let plain = generate(&stripe_mask(), &params(), &mut rng(7)).unwrap();
        assert_eq!(first.len(), plain.len());
        for (moved, still) in first.iter().zip(&plain) {
            assert!((moved.cx - still.cx).abs() <= 2.0);
            assert!((moved.cy - still.cy).abs() <= 2.0);
        }
        assert!(first.iter().zip(&plain).any(|(a, b)| a.cx != b.cx));
    }

    #[test]
    fn symmetric_mask_gives_symmetric_markers() {
        let markers = generate(&stripe_mask(), &params(), &mut rng(0)).unwrap();
        assert!(!markers.is_empty());
        for marker in &markers {
            let mirrored = WIDTH as f64 - marker.cx;
            assert!(
                markers
                    .iter()
                    .any(|other| (other.cx - mirrored).abs() < 1e-9
                        && (other.cy - marker.cy).abs() < 1e-9),
                "no mirror for {marker:?}"
            );
        }
    }

    #[test]
    fn markers_carry_size_and_style() {
        let params = GenerationParams {
            point_size: 3.5,
            color: "rebeccapurple".into(),
            ..params()
        };
        let markers = generate(&full_mask(), &params, &mut rng(0)).unwrap();
        assert!(markers.iter().all(|m| m.r == 3.5 && m.style == "fill: rebeccapurple"));
    }

    #[test]
    fn markers_come_ring_major() {
        let markers = generate(&full_mask(), &params(), &mut rng(0)).unwrap();
        let centre_line = markers
            .iter()
            .take_while(|m| m.cy == HEIGHT as f64 / 2.0)
            .count();
        assert!(centre_line > 0);
        assert!(markers[centre_line..].iter().all(|m| m.cy != HEIGHT as f64 / 2.0));
    }

    #[test]
    fn background_only_mask_gives_no_markers() {
        let mask = OccupancyMask::new(RgbImage::from_pixel(WIDTH, HEIGHT, Rgb([255; 3])), BACKGROUND);
        assert!(generate(&mask, &params(), &mut rng(0)).unwrap().is_empty());
    }

    #[test]
    fn degrees_convert_to_radians() {
        assert!((degrees(180.0) - PI).abs() < 1e-12);
    }
}
