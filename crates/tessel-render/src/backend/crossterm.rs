#![forbid(unsafe_code)]

//! Backend writing ANSI sequences through crossterm.

use std::io::{self, Write};

use ::crossterm::cursor::{Hide, MoveTo, Show};
use ::crossterm::style::{
    Attribute as CAttribute, Color as CColor, Colors, Print, SetAttribute, SetBackgroundColor,
    SetColors, SetForegroundColor, SetUnderlineColor,
};
use ::crossterm::terminal::{self, Clear, ClearType};
use ::crossterm::{execute, queue};
use tessel_core::{Position, Size};
use tessel_style::{Color, Modifier};

use super::Backend;
use crate::diff::{BufferDiff, runs};

/// A [`Backend`] for any `Write` sink, typically `io::stdout()`.
///
/// Raw mode and the alternate screen are left to the caller.
#[derive(Debug, Default)]
pub struct CrosstermBackend<W: Write> {
    writer: W,
}

impl<W: Write> CrosstermBackend<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Write for CrosstermBackend<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write> Backend for CrosstermBackend<W> {
    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = BufferDiff<'a>>,
    {
        let updates: Vec<BufferDiff<'a>> = content.collect();
        let mut fg = Color::Reset;
        let mut bg = Color::Reset;
        let mut underline_color = Color::Reset;
        let mut modifier = Modifier::empty();

        for run in runs(&updates) {
            queue!(self.writer, MoveTo(run.start, run.row))?;
            for update in &updates[run.updates] {
                let cell = update.cell;
                if cell.modifier != modifier {
                    queue_modifier_diff(&mut self.writer, modifier, cell.modifier)?;
                    modifier = cell.modifier;
                }
                if cell.fg != fg || cell.bg != bg {
                    queue!(
                        self.writer,
                        SetColors(Colors::new(to_crossterm(cell.fg), to_crossterm(cell.bg)))
                    )?;
                    fg = cell.fg;
                    bg = cell.bg;
                }
                if cell.underline_color != underline_color {
                    queue!(
                        self.writer,
                        SetUnderlineColor(to_crossterm(cell.underline_color))
                    )?;
                    underline_color = cell.underline_color;
                }
                queue!(self.writer, Print(cell.symbol()))?;
            }
        }

        queue!(
            self.writer,
            SetForegroundColor(CColor::Reset),
            SetBackgroundColor(CColor::Reset),
            SetUnderlineColor(CColor::Reset),
            SetAttribute(CAttribute::Reset)
        )
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        execute!(self.writer, Hide)
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        execute!(self.writer, Show)
    }

    /// Asks the terminal for the cursor position, which requires raw mode.
    fn get_cursor_position(&mut self) -> io::Result<Position> {
        let (x, y) = ::crossterm::cursor::position()?;
        Ok(Position::new(x, y))
    }

    fn set_cursor_position(&mut self, position: Position) -> io::Result<()> {
        execute!(self.writer, MoveTo(position.x, position.y))
    }

    fn clear(&mut self) -> io::Result<()> {
        execute!(self.writer, Clear(ClearType::All))
    }

    fn size(&self) -> io::Result<Size> {
        let (width, height) = terminal::size()?;
        Ok(Size::new(width, height))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

fn to_crossterm(color: Color) -> CColor {
    match color {
        Color::Reset => CColor::Reset,
        Color::Black => CColor::Black,
        Color::Red => CColor::DarkRed,
        Color::Green => CColor::DarkGreen,
        Color::Yellow => CColor::DarkYellow,
        Color::Blue => CColor::DarkBlue,
        Color::Magenta => CColor::DarkMagenta,
        Color::Cyan => CColor::DarkCyan,
        Color::Gray => CColor::Grey,
        Color::DarkGray => CColor::DarkGrey,
        Color::LightRed => CColor::Red,
        Color::LightGreen => CColor::Green,
        Color::LightYellow => CColor::Yellow,
        Color::LightBlue => CColor::Blue,
        Color::LightMagenta => CColor::Magenta,
        Color::LightCyan => CColor::Cyan,
        Color::White => CColor::White,
        Color::Indexed(i) => CColor::AnsiValue(i),
        Color::Rgb(r, g, b) => CColor::Rgb { r, g, b },
    }
}

/// Queue the SGR attributes that turn `from` into `to`.
///
/// Bold and dim share one "normal intensity" reset, and both blink speeds
/// share one "no blink" reset. Dropping either member of a pair re-applies
/// the other if it stays on.
fn queue_modifier_diff<W: Write>(writer: &mut W, from: Modifier, to: Modifier) -> io::Result<()> {
    let removed = from - to;
    if removed.contains(Modifier::REVERSED) {
        queue!(writer, SetAttribute(CAttribute::NoReverse))?;
    }
    if removed.intersects(Modifier::BOLD | Modifier::DIM) {
        queue!(writer, SetAttribute(CAttribute::NormalIntensity))?;
        if to.contains(Modifier::BOLD) {
            queue!(writer, SetAttribute(CAttribute::Bold))?;
        }
        if to.contains(Modifier::DIM) {
            queue!(writer, SetAttribute(CAttribute::Dim))?;
        }
    }
    if removed.contains(Modifier::ITALIC) {
        queue!(writer, SetAttribute(CAttribute::NoItalic))?;
    }
    if removed.contains(Modifier::UNDERLINED) {
        queue!(writer, SetAttribute(CAttribute::NoUnderline))?;
    }
    if removed.contains(Modifier::CROSSED_OUT) {
        queue!(writer, SetAttribute(CAttribute::NotCrossedOut))?;
    }
    if removed.intersects(Modifier::SLOW_BLINK | Modifier::RAPID_BLINK) {
        queue!(writer, SetAttribute(CAttribute::NoBlink))?;
        if to.contains(Modifier::SLOW_BLINK) {
            queue!(writer, SetAttribute(CAttribute::SlowBlink))?;
        }
        if to.contains(Modifier::RAPID_BLINK) {
            queue!(writer, SetAttribute(CAttribute::RapidBlink))?;
        }
    }
    if removed.contains(Modifier::HIDDEN) {
        queue!(writer, SetAttribute(CAttribute::NoHidden))?;
    }

    let added = to - from;
    for (flag, attribute) in [
        (Modifier::REVERSED, CAttribute::Reverse),
        (Modifier::BOLD, CAttribute::Bold),
        (Modifier::ITALIC, CAttribute::Italic),
        (Modifier::UNDERLINED, CAttribute::Underlined),
        (Modifier::DIM, CAttribute::Dim),
        (Modifier::CROSSED_OUT, CAttribute::CrossedOut),
        (Modifier::SLOW_BLINK, CAttribute::SlowBlink),
        (Modifier::RAPID_BLINK, CAttribute::RapidBlink),
        (Modifier::HIDDEN, CAttribute::Hidden),
    ] {
        if added.contains(flag) {
            queue!(writer, SetAttribute(attribute))?;
        }
    }
    Ok(())
}
