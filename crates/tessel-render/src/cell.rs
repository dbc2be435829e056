#![forbid(unsafe_code)]

//! A single terminal grid cell.
//!
//! A cell holds one grapheme cluster plus its colors and modifiers. A wide
//! grapheme lives in its leading cell; the cells it covers to the right are
//! left at their default (a single space) and are never emitted by the diff.

use tessel_style::{Color, Modifier, Style};

/// One cell of a [`Buffer`](crate::buffer::Buffer).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    symbol: String,
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Underline color.
    pub underline_color: Color,
    /// Active text modifiers.
    pub modifier: Modifier,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(" ")
    }
}

impl Cell {
    /// A default-styled cell showing `symbol`.
    #[must_use]
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_owned(),
            fg: Color::Reset,
            bg: Color::Reset,
            underline_color: Color::Reset,
            modifier: Modifier::empty(),
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Terminal columns the symbol occupies.
    #[must_use]
    pub fn width(&self) -> usize {
        crate::display_width(&self.symbol)
    }

    pub fn set_symbol(&mut self, symbol: &str) -> &mut Self {
        self.symbol.clear();
        self.symbol.push_str(symbol);
        self
    }

    pub fn set_char(&mut self, ch: char) -> &mut Self {
        self.symbol.clear();
        self.symbol.push(ch);
        self
    }

    pub fn set_fg(&mut self, color: Color) -> &mut Self {
        self.fg = color;
        self
    }

    pub fn set_bg(&mut self, color: Color) -> &mut Self {
        self.bg = color;
        self
    }

    /// Overlay `style`: set colors replace ours, modifiers are added and removed.
    pub fn set_style<S: Into<Style>>(&mut self, style: S) -> &mut Self {
        let style = style.into();
        if let Some(fg) = style.fg {
            self.fg = fg;
        }
        if let Some(bg) = style.bg {
            self.bg = bg;
        }
        if let Some(underline_color) = style.underline_color {
            self.underline_color = underline_color;
        }
        self.modifier = style.apply_modifier(self.modifier);
        self
    }

    /// The cell's full style, with every color set.
    #[must_use]
    pub fn style(&self) -> Style {
        Style {
            fg: Some(self.fg),
            bg: Some(self.bg),
            underline_color: Some(self.underline_color),
            add_modifier: self.modifier,
            sub_modifier: Modifier::empty(),
        }
    }

    /// Back to a default-styled space.
    pub fn reset(&mut self) {
        self.set_symbol(" ");
        self.fg = Color::Reset;
        self.bg = Color::Reset;
        self.underline_color = Color::Reset;
        self.modifier = Modifier::empty();
    }

    #[must_use]
    pub fn with_symbol(mut self, symbol: &str) -> Self {
        self.set_symbol(symbol);
        self
    }

    #[must_use]
    pub fn with_char(mut self, ch: char) -> Self {
        self.set_char(ch);
        self
    }

    #[must_use]
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    #[must_use]
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    #[must_use]
    pub fn with_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.set_style(style);
        self
    }
}

impl From<char> for Cell {
    fn from(ch: char) -> Self {
        Self::default().with_char(ch)
    }
}

impl From<&str> for Cell {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}
