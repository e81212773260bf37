//! Differential renderer for fullscreen mode.
//!
//! Compares each row of the new frame with the previous frame and only
//! rewrites rows that changed. Output is queued and flushed once per frame,
//! wrapped in a synchronized update so the terminal never shows a half frame.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::queue;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{
    BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen,
};

use super::frame::{Attrs, Frame, Line, Style};

/// Row-diffing renderer over any writer (stdout in the host, a `Vec<u8>` in tests).
pub struct DiffRenderer<W: Write> {
    out: W,
    previous: Option<Frame>,
}

impl<W: Write> DiffRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, previous: None }
    }

    /// Render a frame, writing only changed rows. Returns the number of rows written.
    pub fn render(&mut self, frame: &Frame) -> io::Result<usize> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let same_size = self
            .previous
            .as_ref()
            .is_some_and(|p| p.width() == frame.width() && p.height() == frame.height());

        let mut written = 0;
        for (y, line) in frame.lines().iter().enumerate() {
            let y = y as u16;
            let changed = !same_size
                || self.previous.as_ref().and_then(|p| p.line(y)) != Some(line);
            if changed {
                self.write_line(y, line, frame.width())?;
                written += 1;
            }
        }

        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;

        self.previous = Some(frame.clone());
        Ok(written)
    }

    fn write_line(&mut self, y: u16, line: &Line, width: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(0, y), Clear(ClearType::CurrentLine))?;

        let mut remaining = width as usize;
        for span in &line.spans {
            if remaining == 0 {
                break;
            }
            let text: String = span.text.chars().take(remaining).collect();
            remaining -= text.chars().count();
            apply_style(&mut self.out, span.style)?;
            queue!(self.out, Print(text), SetAttribute(Attribute::Reset), ResetColor)?;
        }
        Ok(())
    }

    /// Force the next render to redraw every row.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter the alternate screen, hide the cursor and capture the mouse wheel.
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            EnterAlternateScreen,
            Hide,
            EnableMouseCapture,
            Clear(ClearType::All)
        )?;
        self.out.flush()?;
        self.invalidate();
        Ok(())
    }

    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        queue!(self.out, DisableMouseCapture, Show, LeaveAlternateScreen)?;
        self.out.flush()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

fn apply_style<W: Write>(out: &mut W, style: Style) -> io::Result<()> {
    if let Some(color) = style.fg {
        queue!(out, SetForegroundColor(color))?;
    }
    let pairs = [
        (Attrs::BOLD, Attribute::Bold),
        (Attrs::DIM, Attribute::Dim),
        (Attrs::UNDERLINE, Attribute::Underlined),
        (Attrs::REVERSE, Attribute::Reverse),
    ];
    for (flag, attribute) in pairs {
        if style.attrs.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
