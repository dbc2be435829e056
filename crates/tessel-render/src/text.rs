#![forbid(unsafe_code)]

//! Styled text fragments.

use std::borrow::Cow;

use tessel_style::Style;

/// A run of text sharing one style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Span<'a> {
    pub content: Cow<'a, str>,
    pub style: Style,
}

impl<'a> Span<'a> {
    /// Unstyled span.
    pub fn raw<T: Into<Cow<'a, str>>>(content: T) -> Self {
        Self {
            content: content.into(),
            style: Style::default(),
        }
    }

    pub fn styled<T: Into<Cow<'a, str>>, S: Into<Style>>(content: T, style: S) -> Self {
        Self {
            content: content.into(),
            style: style.into(),
        }
    }

    /// Display width in terminal columns.
    #[must_use]
    pub fn width(&self) -> usize {
        crate::display_width(&self.content)
    }
}

impl<'a> From<&'a str> for Span<'a> {
    fn from(content: &'a str) -> Self {
        Self::raw(content)
    }
}

impl From<String> for Span<'_> {
    fn from(content: String) -> Self {
        Self::raw(content)
    }
}

/// A single line of spans. The line style sits underneath every span style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Line<'a> {
    pub spans: Vec<Span<'a>>,
    pub style: Style,
}

impl<'a> Line<'a> {
    pub fn raw<T: Into<Cow<'a, str>>>(content: T) -> Self {
        Self::from(Span::raw(content))
    }

    pub fn styled<T: Into<Cow<'a, str>>, S: Into<Style>>(content: T, style: S) -> Self {
        Self {
            spans: vec![Span::raw(content)],
            style: style.into(),
        }
    }

    #[must_use]
    pub fn style<S: Into<Style>>(mut self, style: S) -> Self {
        self.style = style.into();
        self
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }
}

impl<'a> From<Span<'a>> for Line<'a> {
    fn from(span: Span<'a>) -> Self {
        Self {
            spans: vec![span],
            style: Style::default(),
        }
    }
}

impl<'a> From<Vec<Span<'a>>> for Line<'a> {
    fn from(spans: Vec<Span<'a>>) -> Self {
        Self {
            spans,
            style: Style::default(),
        }
    }
}

impl<'a> From<&'a str> for Line<'a> {
    fn from(content: &'a str) -> Self {
        Self::raw(content)
    }
}

impl From<String> for Line<'_> {
    fn from(content: String) -> Self {
        Self::raw(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_style::Color;

    #[test]
    fn widths_count_columns() {
        let line = Line::from(vec![Span::raw("ab"), Span::styled("称", Color::Red)]);
        assert_eq!(line.width(), 4);
        assert_eq!(line.spans[1].style.fg, Some(Color::Red));
    }

    #[test]
    fn styled_line_keeps_span_unstyled() {
        let line = Line::styled("x", Color::Blue);
        assert_eq!(line.style.fg, Some(Color::Blue));
        assert_eq!(line.spans[0].style, Style::default());
    }
}
