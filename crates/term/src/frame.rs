//! Frame: one rendered screen as lines of styled runs.
//!
//! The board view produces long runs of identical glyphs (a cell is drawn
//! `cell_w` columns wide, empty rows are one run), so a line is stored as a
//! few spans rather than one styled glyph per column.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
}

impl Style {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `count` copies of `ch`, extending the last span when the style
    /// matches.
    pub fn push_repeated(&mut self, ch: char, count: usize, style: Style) {
        if count == 0 {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.extend(std::iter::repeat(ch).take(count)),
            _ => self.spans.push(Span {
                text: std::iter::repeat(ch).take(count).collect(),
                style,
            }),
        }
    }

    pub fn push_str(&mut self, text: &str, style: Style) {
        for ch in text.chars() {
            self.push_repeated(ch, 1, style);
        }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Characters of the line, without styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    lines: Vec<Line>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, y: usize) -> Option<&Line> {
        self.lines.get(y)
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Text of line `y`; empty past the last line.
    pub fn line_text(&self, y: usize) -> String {
        self.line(y).map(Line::text).unwrap_or_default()
    }
}
