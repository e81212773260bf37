//! Frame - rows of styled text the view is drawn into.
//!
//! The terminal host draws whole rows, so a frame is a fixed number of lines,
//! each a run of styled spans. Anything past the frame width is cut off when
//! rendered.

use crossterm::style::Color;

bitflags::bitflags! {
    /// Text attributes of a span.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attrs: u8 {
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const UNDERLINE = 1 << 2;
        const REVERSE = 1 << 3;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub attrs: Attrs,
}

impl Style {
    pub const PLAIN: Style = Style {
        fg: None,
        attrs: Attrs::empty(),
    };

    pub fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            attrs: Attrs::empty(),
        }
    }

    pub fn with(mut self, attrs: Attrs) -> Self {
        self.attrs |= attrs;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

/// One terminal row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Style::PLAIN)
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        let mut line = Self::new();
        line.push(text, style);
        line
    }

    pub fn push(&mut self, text: impl Into<String>, style: Style) -> &mut Self {
        let text = text.into();
        if !text.is_empty() {
            self.spans.push(Span { text, style });
        }
        self
    }

    /// Width in characters.
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.chars().count()).sum()
    }

    /// Text without styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A full screen of rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: u16,
    lines: Vec<Line>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            lines: vec![Line::new(); height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.lines.len() as u16
    }

    /// Replace row `y`. Rows outside the frame are dropped.
    pub fn set(&mut self, y: i32, line: Line) {
        if let Some(slot) = usize::try_from(y).ok().and_then(|y| self.lines.get_mut(y)) {
            *slot = line;
        }
    }

    pub fn line(&self, y: u16) -> Option<&Line> {
        self.lines.get(y as usize)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Plain text of row `y`, empty if out of range.
    pub fn text(&self, y: u16) -> String {
        self.line(y).map(Line::text).unwrap_or_default()
    }

    /// Index of the first row containing `needle`.
    pub fn find(&self, needle: &str) -> Option<u16> {
        self.lines
            .iter()
            .position(|l| l.text().contains(needle))
            .map(|y| y as u16)
    }
}
