//! TerminalRenderer: flushes frames to a real terminal.
//!
//! The first frame is drawn after clearing the screen; later frames rewrite
//! only the lines that differ from the previous one.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::frame::{Frame, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Frame>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(8 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, frame: Frame) -> Result<()> {
        self.buf.clear();
        encode_into(self.last.as_ref(), &frame, &mut self.buf)?;
        self.flush_buf()?;
        self.last = Some(frame);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode the commands that turn the screen showing `prev` into `next`.
/// Without a previous frame the screen is cleared and every line drawn.
pub fn encode_into(prev: Option<&Frame>, next: &Frame, out: &mut Vec<u8>) -> Result<()> {
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    for (y, line) in next.lines().iter().enumerate() {
        if prev.and_then(|p| p.line(y)) == Some(line) {
            continue;
        }
        out.queue(cursor::MoveTo(0, u16::try_from(y)?))?;
        for span in line.spans() {
            apply_style_into(out, span.style)?;
            out.queue(Print(&span.text))?;
        }
        out.queue(ResetColor)?;
        out.queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
    }

    // Lines the new frame no longer covers.
    if let Some(prev) = prev {
        for y in next.height()..prev.height() {
            out.queue(cursor::MoveTo(0, u16::try_from(y)?))?;
            out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
        }
    }

    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    out.queue(SetAttribute(if style.bold {
        Attribute::Bold
    } else {
        Attribute::NormalIntensity
    }))?;
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
