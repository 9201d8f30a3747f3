//! Torus frame computation
//!
//! This module implements the per-tick render step: sample the torus
//! surface, rotate it by the current orientation, project each sample onto
//! the canvas, and resolve occlusion through a depth buffer while picking a
//! shading glyph per sample.

use crate::config::RenderConfig;
use std::f64::consts::TAU;

/// Luminance values are scaled by this before rounding to a glyph index
const LUMINANCE_SCALE: f64 = 8.0;

/// Added to the rounded luminance index to brighten the overall shading
const BRIGHTNESS_BIAS: i32 = 2;

/// Rotation angles driving the animation, advanced by the driver each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub theta: f64,
    pub phi: f64,
}

impl Orientation {
    pub fn new(theta: f64, phi: f64) -> Self {
        Self { theta, phi }
    }

    /// Advance both angles by fixed per-tick deltas. Angles are unbounded;
    /// the trig functions wrap them implicitly.
    pub fn advance(&mut self, delta_theta: f64, delta_phi: f64) {
        self.theta += delta_theta;
        self.phi += delta_phi;
    }
}

/// One rendered character grid plus its depth buffer.
///
/// Depth values are inverse camera-space z (larger = closer); zero marks an
/// empty pixel. Both grids are allocated fresh per [`compute_frame`] call.
#[derive(Debug, Clone)]
pub struct Frame {
    size: usize,
    chars: Vec<char>,
    depth: Vec<f64>,
}

impl Frame {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            chars: vec![' '; size * size],
            depth: vec![0.0; size * size],
        }
    }

    /// Canvas edge length in cells
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> char {
        self.chars[row * self.size + col]
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.chars.chunks(self.size)
    }

    /// Write a sample through the depth test: the glyph lands only if its
    /// inverse depth strictly exceeds what the pixel already holds. A max
    /// test makes the result independent of sample order.
    ///
    /// `col` and `row` must be within the canvas.
    pub fn plot(&mut self, col: usize, row: usize, ooz: f64, glyph: char) {
        let idx = row * self.size + col;
        if ooz > self.depth[idx] {
            self.depth[idx] = ooz;
            self.chars[idx] = glyph;
        }
    }
}

/// Number of samples `np.arange(0, 2*pi, step)` style: k*step for k while
/// k*step < 2*pi
fn sample_count(step: f64) -> usize {
    (TAU / step).ceil() as usize
}

/// Truncate a projected coordinate to a pixel index, clamped to the canvas.
/// Saturating casts keep pathological projections (overflow, NaN from a
/// camera inside the torus) inside the grid.
fn clamp_pixel(value: f64, size: usize) -> usize {
    (value as i64).clamp(0, size as i64 - 1) as usize
}

/// Compute one frame of the spinning torus.
///
/// Pure and deterministic: identical orientation and config always produce
/// an identical grid. The torus point for tube angle theta and revolution
/// angle phi is rotated about the x axis by `orientation.theta`, then about
/// the z axis by `orientation.phi`, pushed back by the viewer distance, and
/// perspective-projected through its inverse depth.
pub fn compute_frame(orientation: Orientation, config: &RenderConfig) -> Frame {
    let (sin_a, cos_a) = orientation.theta.sin_cos();
    let (sin_b, cos_b) = orientation.phi.sin_cos();

    let mut frame = Frame::new(config.canvas_size());

    // Tube cross-section table, reused for every revolution angle
    let theta_step = config.theta_step();
    let circle: Vec<(f64, f64, f64, f64)> = (0..sample_count(theta_step))
        .map(|k| {
            let (sin_t, cos_t) = (k as f64 * theta_step).sin_cos();
            let circle_x = config.outer_radius() + config.inner_radius() * cos_t;
            let circle_y = config.inner_radius() * sin_t;
            (sin_t, cos_t, circle_x, circle_y)
        })
        .collect();

    let half = config.canvas_size() as f64 / 2.0;
    let k1 = config.projection_constant();
    let viewer_distance = config.viewer_distance();
    let glyphs = config.glyphs();
    let max_index = glyphs.len() as i32 - 1;
    let shade_unlit = config.shades_unlit();

    let phi_step = config.phi_step();
    for j in 0..sample_count(phi_step) {
        let (sin_p, cos_p) = (j as f64 * phi_step).sin_cos();

        for &(sin_t, cos_t, circle_x, circle_y) in &circle {
            let x = circle_x * (cos_b * cos_p + sin_a * sin_b * sin_p) - circle_y * cos_a * sin_b;
            let y = circle_x * (sin_b * cos_p - sin_a * cos_b * sin_p) + circle_y * cos_a * cos_b;
            let z = viewer_distance + cos_a * circle_x * sin_p + circle_y * sin_a;
            let ooz = 1.0 / z;

            let col = clamp_pixel(half + k1 * ooz * x, config.canvas_size());
            let row = clamp_pixel(half - k1 * ooz * y, config.canvas_size());

            // Surface-normal alignment with the light, recombined from the
            // same rotation terms as the coordinates above
            let lum = cos_p * cos_t * sin_b - cos_a * sin_p * cos_t - sin_a * sin_t
                + cos_b * (cos_a * sin_t - sin_p * cos_t * sin_a);
            let raw = (lum * LUMINANCE_SCALE).round() as i32;
            if raw < 0 && !shade_unlit {
                continue;
            }
            let index = (raw + BRIGHTNESS_BIAS).clamp(0, max_index) as usize;

            frame.plot(col, row, ooz, glyphs[index]);
        }
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;

    fn default_config() -> RenderConfig {
        RenderConfig::new(40).unwrap()
    }

    fn drawn_cells(frame: &Frame) -> usize {
        frame.rows().flatten().filter(|&&c| c != ' ').count()
    }

    #[test]
    fn test_frame_dimensions() {
        let frame = compute_frame(Orientation::new(1.0, 1.0), &default_config());
        assert_eq!(frame.size(), 40);
        assert_eq!(frame.rows().count(), 40);
        assert!(frame.rows().all(|row| row.len() == 40));
    }

    #[test]
    fn test_determinism() {
        let config = default_config();
        let orientation = Orientation::new(2.3, -0.7);
        let a = compute_frame(orientation, &config);
        let b = compute_frame(orientation, &config);
        for row in 0..40 {
            for col in 0..40 {
                assert_eq!(a.get(row, col), b.get(row, col));
            }
        }
    }

    #[test]
    fn test_no_panic_across_orientations() {
        let config = default_config();
        let mut orientation = Orientation::new(-10.0, 7.5);
        for _ in 0..60 {
            orientation.advance(0.33, -0.51);
            let frame = compute_frame(orientation, &config);
            assert_eq!(frame.size(), 40);
        }
    }

    #[test]
    fn test_clamp_with_camera_inside_torus() {
        // Viewer distance below the torus sweep drives z through zero;
        // projected coordinates must still clamp into the grid
        let config = RenderConfig::custom(
            40,
            1.0,
            2.0,
            0.5,
            0.07,
            0.02,
            crate::LUMINANCE_GLYPHS.chars().collect(),
        )
        .unwrap();
        for i in 0..8 {
            let orientation = Orientation::new(i as f64 * 0.9, i as f64 * 1.3);
            let frame = compute_frame(orientation, &config);
            assert_eq!(frame.rows().count(), 40);
        }
    }

    #[test]
    fn test_depth_test_is_order_independent() {
        let mut near_first = Frame::new(4);
        near_first.plot(1, 2, 0.5, '@');
        near_first.plot(1, 2, 0.2, '.');

        let mut far_first = Frame::new(4);
        far_first.plot(1, 2, 0.2, '.');
        far_first.plot(1, 2, 0.5, '@');

        assert_eq!(near_first.get(2, 1), '@');
        assert_eq!(far_first.get(2, 1), '@');
    }

    #[test]
    fn test_equal_depth_never_overwrites() {
        let mut frame = Frame::new(4);
        frame.plot(0, 0, 0.5, '@');
        frame.plot(0, 0, 0.5, '.');
        assert_eq!(frame.get(0, 0), '@');
    }

    #[test]
    fn test_tube_near_edge_hits_canvas_center() {
        // Canvas 40, radii (1, 2), viewer 5, orientation (0, 0): the near
        // edge of the tube faces the viewer around the center row midpoint
        let frame = compute_frame(Orientation::new(0.0, 0.0), &default_config());
        let center = &frame.rows().nth(20).unwrap()[16..=24];
        assert!(center.iter().any(|&c| c != ' '));
    }

    #[test]
    fn test_corners_stay_empty() {
        let frame = compute_frame(Orientation::new(0.0, 0.0), &default_config());
        assert_eq!(frame.get(0, 0), ' ');
        assert_eq!(frame.get(0, 39), ' ');
        assert_eq!(frame.get(39, 0), ' ');
        assert_eq!(frame.get(39, 39), ' ');
    }

    #[test]
    fn test_silhouette_vertical_symmetry() {
        // At orientation (0, 0) the torus is symmetric about the vertical
        // screen axis. Use a phi step that divides pi so the sample set is
        // mirror-symmetric too; allow a little slack for truncation ties.
        let config = RenderConfig::custom(
            40,
            1.0,
            2.0,
            5.0,
            0.07,
            std::f64::consts::PI / 100.0,
            crate::LUMINANCE_GLYPHS.chars().collect(),
        )
        .unwrap();
        let frame = compute_frame(Orientation::new(0.0, 0.0), &config);

        let mut mismatches = 0usize;
        for row in 0..40 {
            for col in 0..40 {
                let left = frame.get(row, col) != ' ';
                let right = frame.get(row, 39 - col) != ' ';
                if left != right {
                    mismatches += 1;
                }
            }
        }
        let drawn = drawn_cells(&frame).max(1);
        assert!(
            mismatches * 20 <= drawn,
            "{mismatches} asymmetric cells out of {drawn} drawn"
        );
    }

    #[test]
    fn test_single_glyph_config() {
        let config = RenderConfig::custom(40, 1.0, 2.0, 5.0, 0.07, 0.02, vec!['#']).unwrap();
        let frame = compute_frame(Orientation::new(1.0, 1.0), &config);
        assert!(drawn_cells(&frame) > 0);
        assert!(frame.rows().flatten().all(|&c| c == ' ' || c == '#'));
    }

    #[test]
    fn test_shading_unlit_draws_no_fewer_cells() {
        let culled = compute_frame(Orientation::new(1.0, 1.0), &default_config());
        let shaded = compute_frame(
            Orientation::new(1.0, 1.0),
            &default_config().shade_unlit(true),
        );
        assert!(drawn_cells(&shaded) >= drawn_cells(&culled));
    }

    #[test]
    fn test_sample_count_matches_arange() {
        assert_eq!(sample_count(0.07), 90);
        assert_eq!(sample_count(0.02), 315);
    }

    #[test]
    fn test_clamp_pixel_saturates() {
        assert_eq!(clamp_pixel(-3.7, 40), 0);
        assert_eq!(clamp_pixel(39.2, 40), 39);
        assert_eq!(clamp_pixel(1e12, 40), 39);
        assert_eq!(clamp_pixel(f64::NAN, 40), 0);
        assert_eq!(clamp_pixel(f64::INFINITY, 40), 39);
    }
}
