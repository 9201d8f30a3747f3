//! ASCII Donut - a spinning torus for your terminal
//!
//! Controls:
//! - Up/Down arrows: Adjust spin speed
//! - [ / ]: Move the viewer closer or further away
//! - R: Reset orientation and speed
//! - Space: Pause
//! - Q, Escape or Ctrl-C: Quit
//!
//! Usage:
//!   ascii_donut               - Run the animation sized to the terminal
//!   ascii_donut --frames 10   - Print 10 frames to stdout and exit

use anyhow::Context;
use ascii_donut::config::{self, RenderConfig};
use ascii_donut::renderer::{compute_frame, Orientation};
use ascii_donut::terminal::{frame_to_text, parse_key_event, Action, TerminalDisplay};
use clap::Parser;
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
#[command(name = "ascii_donut", about = "Spinning torus rendered as ASCII art")]
struct Args {
    /// Canvas size in cells (default: fit to terminal)
    #[arg(short, long)]
    size: Option<usize>,

    /// Frames per second
    #[arg(long, default_value_t = 20)]
    fps: u64,

    /// Luminance glyphs, dimmest to brightest
    #[arg(long, default_value = ascii_donut::LUMINANCE_GLYPHS)]
    glyphs: String,

    /// Tube (cross-section) radius
    #[arg(long, default_value_t = config::DEFAULT_INNER_RADIUS)]
    inner_radius: f64,

    /// Torus-center radius
    #[arg(long, default_value_t = config::DEFAULT_OUTER_RADIUS)]
    outer_radius: f64,

    /// Camera distance along the view axis
    #[arg(long, default_value_t = config::DEFAULT_VIEWER_DISTANCE)]
    viewer_distance: f64,

    /// Surface sampling step along the tube circumference
    #[arg(long, default_value_t = config::DEFAULT_THETA_STEP)]
    theta_step: f64,

    /// Surface sampling step around the torus axis
    #[arg(long, default_value_t = config::DEFAULT_PHI_STEP)]
    phi_step: f64,

    /// Per-tick rotation delta about the x axis
    #[arg(long, default_value_t = 0.07)]
    spin_theta: f64,

    /// Per-tick rotation delta about the z axis
    #[arg(long, default_value_t = 0.02)]
    spin_phi: f64,

    /// Draw samples facing away from the light with the dimmest glyphs
    #[arg(long)]
    shade_unlit: bool,

    /// Print this many frames to stdout and exit (no alternate screen)
    #[arg(long)]
    frames: Option<u32>,
}

impl Args {
    fn build_config(&self, canvas_size: usize, viewer_distance: f64) -> anyhow::Result<RenderConfig> {
        let config = RenderConfig::custom(
            canvas_size,
            self.inner_radius,
            self.outer_radius,
            viewer_distance,
            self.theta_step,
            self.phi_step,
            self.glyphs.chars().collect(),
        )
        .context("invalid render parameters")?;
        Ok(config.shade_unlit(self.shade_unlit))
    }
}

/// Square canvas that fits the terminal: rows bound the height, columns
/// bound the width at two cells per glyph (space-separated output)
fn canvas_size_for(cols: usize, rows: usize) -> usize {
    rows.min(cols / 2).max(10)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(count) = args.frames {
        return run_batch_mode(&args, count);
    }
    run_interactive(&args)
}

/// Batch mode: print frames to stdout without touching terminal state
fn run_batch_mode(args: &Args, count: u32) -> anyhow::Result<()> {
    let canvas_size = args.size.unwrap_or_else(|| {
        crossterm::terminal::size()
            .map(|(cols, rows)| canvas_size_for(cols as usize, rows as usize))
            .unwrap_or(40)
    });
    let config = args.build_config(canvas_size, args.viewer_distance)?;

    let mut orientation = Orientation::new(1.0, 1.0);
    for _ in 0..count {
        orientation.advance(args.spin_theta, args.spin_phi);
        let frame = compute_frame(orientation, &config);
        print!("{}", frame_to_text(&frame));
    }
    Ok(())
}

fn run_interactive(args: &Args) -> anyhow::Result<()> {
    let mut terminal = TerminalDisplay::new().context("failed to initialize terminal")?;

    let sized_canvas = |terminal: &TerminalDisplay| {
        args.size.unwrap_or_else(|| {
            let (cols, rows) = terminal.get_size();
            canvas_size_for(cols, rows)
        })
    };

    let mut viewer_distance = args.viewer_distance;
    let mut config = args.build_config(sized_canvas(&terminal), viewer_distance)?;

    // Interactive zoom stays outside the torus sweep so z never crosses zero
    let min_viewer_distance = args.inner_radius + args.outer_radius + 0.5;

    let mut orientation = Orientation::new(1.0, 1.0);
    let mut speed = 1.0f64;
    let mut paused = false;

    let frame_time = Duration::from_millis(1000 / args.fps.max(1));
    let mut last_frame = Instant::now();

    loop {
        if terminal.check_resize() && args.size.is_none() {
            config = args.build_config(sized_canvas(&terminal), viewer_distance)?;
        }

        match terminal.poll_input(Duration::from_millis(16)) {
            Ok(Some(key_event)) => match parse_key_event(key_event) {
                Action::Quit => break,
                Action::Pause => paused = !paused,
                Action::Reset => {
                    orientation = Orientation::new(1.0, 1.0);
                    speed = 1.0;
                    viewer_distance = args.viewer_distance;
                    config = args.build_config(sized_canvas(&terminal), viewer_distance)?;
                }
                Action::SpinFaster => speed = (speed * 1.25).min(8.0),
                Action::SpinSlower => speed = (speed / 1.25).max(0.125),
                Action::ZoomIn => {
                    viewer_distance = (viewer_distance - 0.25).max(min_viewer_distance);
                    config = args.build_config(sized_canvas(&terminal), viewer_distance)?;
                }
                Action::ZoomOut => {
                    viewer_distance += 0.25;
                    config = args.build_config(sized_canvas(&terminal), viewer_distance)?;
                }
                Action::None => {}
            },
            Ok(None) => {}
            Err(e) => eprintln!("Input error: {}", e),
        }

        // Skip rendering when paused (allows text selection)
        if paused {
            continue;
        }

        // Throttle rendering
        if last_frame.elapsed() < frame_time {
            continue;
        }
        last_frame = Instant::now();

        orientation.advance(args.spin_theta * speed, args.spin_phi * speed);
        let frame = compute_frame(orientation, &config);

        let status = format!(
            "Spin: x{:.2} | Viewer: {:.2} | [\u{2191}\u{2193}] Speed  [[]] Zoom  [SPACE] Pause  [R]eset  [Q]uit",
            speed, viewer_distance
        );

        if let Err(e) = terminal.render(&frame_to_text(&frame), &status) {
            if e.kind() == std::io::ErrorKind::BrokenPipe {
                break;
            }
            eprintln!("Render error: {}", e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_canvas_size_for_terminal() {
        // 80x24 terminal: height-bound square at two columns per glyph
        assert_eq!(canvas_size_for(80, 24), 24);
        // Narrow terminal: width-bound
        assert_eq!(canvas_size_for(30, 50), 15);
        // Tiny terminal still gets a usable canvas
        assert_eq!(canvas_size_for(4, 2), 10);
    }

    #[test]
    fn test_args_build_config() {
        let args = Args::parse_from(["ascii_donut", "--viewer-distance", "6.0"]);
        let config = args.build_config(40, args.viewer_distance).unwrap();
        assert_eq!(config.canvas_size(), 40);
        assert!((config.viewer_distance() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_args_reject_bad_geometry() {
        let args = Args::parse_from(["ascii_donut", "--outer-radius", "0.5"]);
        assert!(args.build_config(40, args.viewer_distance).is_err());
    }
}
