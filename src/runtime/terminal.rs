//! Wall-clock scheduler and a single-line terminal host.

use std::io::Write;

use colored::Colorize;
use web_time::Instant;

use super::FrameScheduler;
use crate::error::TextypeError;
use crate::render::{RenderHost, RenderNode};
use crate::util::frame_timing::FrameTiming;

/// Refresh rate used when none is configured.
pub const DEFAULT_FPS: u32 = 60;

/// Scheduler that sleeps the current thread until the next frame is due.
#[derive(Debug)]
pub struct IntervalScheduler {
    timing: FrameTiming,
    pending: bool,
}

impl IntervalScheduler {
    /// Frames at `fps` per second; 0 falls back to [`DEFAULT_FPS`].
    pub fn new(fps: u32) -> Self {
        let fps = if fps == 0 { DEFAULT_FPS } else { fps };
        Self {
            timing: FrameTiming::new(fps),
            pending: false,
        }
    }

    /// Smoothed delivered frame rate.
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

impl FrameScheduler for IntervalScheduler {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn next_frame(&mut self) -> Option<Instant> {
        self.pending = true;
        let wait = self.timing.until_next();
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        let now = Instant::now();
        self.timing.end_frame(now);
        self.pending = false;
        Some(now)
    }

    fn cancel(&mut self) {
        if self.pending {
            log::trace!("dropping pending frame request");
        }
        self.pending = false;
    }
}

/// Draws the animated text on one terminal line, rewriting it in place.
#[derive(Debug)]
pub struct TerminalHost<W: Write> {
    out: W,
    color: bool,
    drawn_width: usize,
}

impl<W: Write> TerminalHost<W> {
    /// Host writing to `out`, with colors enabled.
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: true,
            drawn_width: 0,
        }
    }

    /// Enable or disable truecolor output.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// End the animated line.
    pub fn finish(&mut self) -> Result<(), TextypeError> {
        writeln!(self.out)?;
        self.out.flush()?;
        self.drawn_width = 0;
        Ok(())
    }

    /// The underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn styled_text(&self, node: &RenderNode) -> String {
        let text = node.content.text.as_str();
        let rgb = node.content.color.as_deref().and_then(parse_css_color);
        match rgb {
            Some((r, g, b)) if self.color => text.truecolor(r, g, b).to_string(),
            _ => text.to_owned(),
        }
    }
}

impl<W: Write> RenderHost for TerminalHost<W> {
    fn render(&mut self, node: &RenderNode) -> Result<(), TextypeError> {
        let mut width = node.content.text.chars().count();
        let mut line = self.styled_text(node);
        if let Some(cursor) = &node.cursor {
            let glyph_width = cursor.glyph.chars().count();
            width += glyph_width;
            if cursor.hidden {
                line.push_str(&" ".repeat(glyph_width));
            } else {
                line.push_str(&cursor.glyph);
            }
        }
        // Blank out leftovers from a longer previous line
        let padding = self.drawn_width.saturating_sub(width);
        write!(self.out, "\r{line}{}", " ".repeat(padding))?;
        self.out.flush()?;
        self.drawn_width = width;
        Ok(())
    }
}

/// Parse any CSS color (hex, `rgb()`, `hsl()`, named) to RGB, ignoring
/// alpha.
pub fn parse_css_color(color: &str) -> Option<(u8, u8, u8)> {
    let [r, g, b, _] = csscolorparser::parse(color.trim()).ok()?.to_rgba8();
    Some((r, g, b))
}
