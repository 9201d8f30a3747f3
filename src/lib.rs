//! ASCII Donut - a rotating torus rendered as ASCII art in the terminal
//!
//! The torus surface is sampled on a (theta, phi) grid, rotated by the
//! current orientation, perspective-projected onto a square character
//! canvas, and shaded by mapping a per-sample luminance estimate onto a
//! glyph gradient. Occlusion is resolved with a per-pixel depth buffer.

pub mod config;
pub mod renderer;
pub mod terminal;

pub use config::{ConfigError, RenderConfig};
pub use renderer::{compute_frame, Frame, Orientation};
pub use terminal::TerminalDisplay;

/// Default luminance glyphs, dimmest to brightest
pub const LUMINANCE_GLYPHS: &str = ".,-~:;=!*#$@";
