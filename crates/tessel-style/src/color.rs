//! Named terminal colors.

use std::fmt;
use std::str::FromStr;

/// A terminal color.
///
/// The sixteen named variants map onto the standard ANSI palette; how they
/// actually look is up to the terminal's theme. `Reset` restores the
/// terminal's default foreground or background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// The terminal's default color.
    #[default]
    Reset,
    /// ANSI black (index 0).
    Black,
    /// ANSI red (index 1).
    Red,
    /// ANSI green (index 2).
    Green,
    /// ANSI yellow (index 3).
    Yellow,
    /// ANSI blue (index 4).
    Blue,
    /// ANSI magenta (index 5).
    Magenta,
    /// ANSI cyan (index 6).
    Cyan,
    /// ANSI white (index 7), usually rendered light gray.
    Gray,
    /// Bright black (index 8).
    DarkGray,
    /// Bright red (index 9).
    LightRed,
    /// Bright green (index 10).
    LightGreen,
    /// Bright yellow (index 11).
    LightYellow,
    /// Bright blue (index 12).
    LightBlue,
    /// Bright magenta (index 13).
    LightMagenta,
    /// Bright cyan (index 14).
    LightCyan,
    /// Bright white (index 15).
    White,
    /// 256-color palette index.
    Indexed(u8),
    /// True-color RGB value.
    Rgb(u8, u8, u8),
}

impl Color {
    const NAMED: [(Color, &'static str); 17] = [
        (Color::Reset, "reset"),
        (Color::Black, "black"),
        (Color::Red, "red"),
        (Color::Green, "green"),
        (Color::Yellow, "yellow"),
        (Color::Blue, "blue"),
        (Color::Magenta, "magenta"),
        (Color::Cyan, "cyan"),
        (Color::Gray, "gray"),
        (Color::DarkGray, "darkgray"),
        (Color::LightRed, "lightred"),
        (Color::LightGreen, "lightgreen"),
        (Color::LightYellow, "lightyellow"),
        (Color::LightBlue, "lightblue"),
        (Color::LightMagenta, "lightmagenta"),
        (Color::LightCyan, "lightcyan"),
        (Color::White, "white"),
    ];

    /// ANSI palette index for the sixteen named colors.
    ///
    /// Returns `None` for `Reset`, `Indexed`, and `Rgb`.
    #[must_use]
    pub const fn ansi_index(self) -> Option<u8> {
        match self {
            Self::Black => Some(0),
            Self::Red => Some(1),
            Self::Green => Some(2),
            Self::Yellow => Some(3),
            Self::Blue => Some(4),
            Self::Magenta => Some(5),
            Self::Cyan => Some(6),
            Self::Gray => Some(7),
            Self::DarkGray => Some(8),
            Self::LightRed => Some(9),
            Self::LightGreen => Some(10),
            Self::LightYellow => Some(11),
            Self::LightBlue => Some(12),
            Self::LightMagenta => Some(13),
            Self::LightCyan => Some(14),
            Self::White => Some(15),
            Self::Reset | Self::Indexed(_) | Self::Rgb(..) => None,
        }
    }

    fn name(self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(color, _)| *color == self)
            .map(|(_, name)| *name)
    }
}

/// Error returned when a string does not name a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError {
    input: String,
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a color name, #rrggbb value, or 0-255 index", self.input)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse a color name (case-insensitive; `-`, `_` and spaces ignored,
    /// `grey` accepted for `gray`), a `#rrggbb` hex triplet, or a decimal
    /// palette index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError {
            input: s.to_owned(),
        };
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect::<String>()
            .replace("grey", "gray");

        if let Some(&(color, _)) = Self::NAMED.iter().find(|(_, name)| *name == normalized) {
            return Ok(color);
        }
        if let Some(hex) = normalized.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(err());
            }
            let channel = |range| u8::from_str_radix(&hex[range], 16).map_err(|_| err());
            return Ok(Self::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
        }
        normalized.parse::<u8>().map(Self::Indexed).map_err(|_| err())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indexed(index) => write!(f, "{index}"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            named => f.write_str(named.name().unwrap_or("reset")),
        }
    }
}
