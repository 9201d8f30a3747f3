//! Terminal display and input handling

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, BufWriter, Stdout, Write, stdout};
use std::time::{Duration, Instant};

use crate::renderer::Frame;

/// Terminal display handler with buffered output
pub struct TerminalDisplay {
    width: u16,
    height: u16,
    last_resize_check: Instant,
    buffer: BufWriter<Stdout>,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        // Enter alternate screen first to get accurate dimensions
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;

        let (width, height) = terminal::size()?;
        let adjusted_height = height.saturating_sub(2); // Leave room for status line

        Ok(Self {
            width,
            height: adjusted_height,
            last_resize_check: Instant::now(),
            buffer: BufWriter::new(stdout),
        })
    }

    pub fn get_size(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }

    /// Check if terminal has been resized
    pub fn check_resize(&mut self) -> bool {
        if self.last_resize_check.elapsed() < Duration::from_millis(100) {
            return false;
        }
        self.last_resize_check = Instant::now();

        if let Ok((new_width, new_height)) = terminal::size() {
            let new_height = new_height.saturating_sub(2);
            if new_width != self.width || new_height != self.height {
                self.width = new_width;
                self.height = new_height;
                return true;
            }
        }
        false
    }

    /// Render frame text to the terminal with line-by-line positioning.
    /// Explicit positioning keeps a too-long line from corrupting the rows
    /// that follow it.
    pub fn render(&mut self, content: &str, status: &str) -> io::Result<()> {
        for (i, line) in content.lines().enumerate() {
            write!(self.buffer, "\x1b[{};1H{}", i + 1, line)?;
        }

        // Clear leftovers from larger frames, then draw the status line
        write!(self.buffer, "\x1b[J")?;
        let status_row = content.lines().count() + 1;
        write!(self.buffer, "\x1b[{};1H\x1b[K{}", status_row, status)?;

        self.buffer.flush()?;
        Ok(())
    }

    /// Check for keyboard input
    pub fn poll_input(&self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                return Ok(Some(key_event));
            }
        }
        Ok(None)
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = self.buffer.flush();
        let _ = execute!(stdout(), cursor::Show, LeaveAlternateScreen);
    }
}

/// Render a frame as text, one terminal line per canvas row. Glyphs are
/// space-separated so a square canvas looks roughly square despite tall
/// terminal cells.
pub fn frame_to_text(frame: &Frame) -> String {
    let mut text = String::with_capacity(frame.size() * (frame.size() * 2 + 1));
    for row in frame.rows() {
        for (i, &glyph) in row.iter().enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push(glyph);
        }
        text.push('\n');
    }
    text
}

/// Key actions for the animation loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Quit,
    Pause,
    Reset,
    SpinFaster,
    SpinSlower,
    ZoomIn,
    ZoomOut,
}

/// Parse keyboard input into actions. Raw mode swallows SIGINT, so Ctrl-C
/// is handled here as a quit key.
pub fn parse_key_event(event: KeyEvent) -> Action {
    if event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    match event.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') => Action::Pause,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Up => Action::SpinFaster,
        KeyCode::Down => Action::SpinSlower,
        KeyCode::Char(']') => Action::ZoomIn,
        KeyCode::Char('[') => Action::ZoomOut,
        _ => Action::None,
    }
}
