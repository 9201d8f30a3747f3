//! Renderer configuration: torus geometry, projection, and glyph gradient

use thiserror::Error;

/// Default tube (cross-section) radius
pub const DEFAULT_INNER_RADIUS: f64 = 1.0;
/// Default torus-center radius
pub const DEFAULT_OUTER_RADIUS: f64 = 2.0;
/// Default camera distance along the view axis
pub const DEFAULT_VIEWER_DISTANCE: f64 = 5.0;
/// Default sampling step along the tube circumference
pub const DEFAULT_THETA_STEP: f64 = 0.07;
/// Default sampling step around the torus axis
pub const DEFAULT_PHI_STEP: f64 = 0.02;

/// Invalid geometric or projection parameters, rejected at construction
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("canvas size must be at least 1")]
    ZeroCanvas,
    #[error("inner radius must be positive, got {0}")]
    NonPositiveInnerRadius(f64),
    #[error("outer radius ({outer}) must exceed inner radius ({inner})")]
    RadiusOrder { inner: f64, outer: f64 },
    #[error("viewer distance must be positive, got {0}")]
    NonPositiveViewerDistance(f64),
    #[error("angular step must be positive and finite, got {0}")]
    InvalidStep(f64),
    #[error("luminance glyph set must not be empty")]
    EmptyGlyphs,
}

/// Immutable render parameters for a square character canvas.
///
/// The projection constant is derived once at construction from the canvas
/// size, viewer distance, and radii; fields are private so it can never go
/// stale.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    canvas_size: usize,
    inner_radius: f64,
    outer_radius: f64,
    viewer_distance: f64,
    theta_step: f64,
    phi_step: f64,
    projection_constant: f64,
    glyphs: Vec<char>,
    shade_unlit: bool,
}

impl RenderConfig {
    /// Config with default geometry and the default glyph gradient
    pub fn new(canvas_size: usize) -> Result<Self, ConfigError> {
        Self::custom(
            canvas_size,
            DEFAULT_INNER_RADIUS,
            DEFAULT_OUTER_RADIUS,
            DEFAULT_VIEWER_DISTANCE,
            DEFAULT_THETA_STEP,
            DEFAULT_PHI_STEP,
            crate::LUMINANCE_GLYPHS.chars().collect(),
        )
    }

    /// Config with every parameter supplied by the caller.
    ///
    /// Glyphs run dimmest to brightest. Note that a viewer distance below
    /// `inner_radius + outer_radius` is accepted but puts the camera inside
    /// the torus sweep; projected samples then rely on the pixel clamp.
    pub fn custom(
        canvas_size: usize,
        inner_radius: f64,
        outer_radius: f64,
        viewer_distance: f64,
        theta_step: f64,
        phi_step: f64,
        glyphs: Vec<char>,
    ) -> Result<Self, ConfigError> {
        if canvas_size == 0 {
            return Err(ConfigError::ZeroCanvas);
        }
        if !(inner_radius > 0.0) {
            return Err(ConfigError::NonPositiveInnerRadius(inner_radius));
        }
        if !(outer_radius > inner_radius) {
            return Err(ConfigError::RadiusOrder {
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        if !(viewer_distance > 0.0) {
            return Err(ConfigError::NonPositiveViewerDistance(viewer_distance));
        }
        for step in [theta_step, phi_step] {
            if !step.is_finite() || step <= 0.0 {
                return Err(ConfigError::InvalidStep(step));
            }
        }
        if glyphs.is_empty() {
            return Err(ConfigError::EmptyGlyphs);
        }

        // Scales projected coordinates so the torus roughly fills the canvas
        let projection_constant =
            canvas_size as f64 * viewer_distance * 3.0 / (8.0 * (inner_radius + outer_radius));

        Ok(Self {
            canvas_size,
            inner_radius,
            outer_radius,
            viewer_distance,
            theta_step,
            phi_step,
            projection_constant,
            glyphs,
            shade_unlit: false,
        })
    }

    /// Draw samples whose luminance faces away from the light instead of
    /// skipping them (they still land on the dimmest glyphs after clamping)
    pub fn shade_unlit(mut self, shade: bool) -> Self {
        self.shade_unlit = shade;
        self
    }

    pub fn canvas_size(&self) -> usize {
        self.canvas_size
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn viewer_distance(&self) -> f64 {
        self.viewer_distance
    }

    pub fn theta_step(&self) -> f64 {
        self.theta_step
    }

    pub fn phi_step(&self) -> f64 {
        self.phi_step
    }

    pub fn projection_constant(&self) -> f64 {
        self.projection_constant
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    pub fn shades_unlit(&self) -> bool {
        self.shade_unlit
    }
}
