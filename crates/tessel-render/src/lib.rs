#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, diffs, and the double-buffered terminal.

pub mod backend;
pub mod buffer;
pub mod cell;
pub mod diff;
pub mod terminal;
pub mod text;
pub mod widget;

mod text_width {
    use unicode_segmentation::UnicodeSegmentation;
    use unicode_width::UnicodeWidthStr;

    #[inline]
    fn ascii_display_width(text: &str) -> usize {
        text.bytes().filter(|b| (0x20..=0x7E).contains(b)).count()
    }

    /// Terminal columns occupied by a single grapheme cluster.
    ///
    /// Clusters containing control characters occupy no columns.
    #[inline]
    pub(crate) fn grapheme_width(grapheme: &str) -> usize {
        if grapheme.is_ascii() {
            return ascii_display_width(grapheme);
        }
        if grapheme.chars().any(char::is_control) {
            return 0;
        }
        grapheme.width()
    }

    /// Terminal columns occupied by `text`, summed per grapheme cluster.
    #[inline]
    pub(crate) fn display_width(text: &str) -> usize {
        if text.is_ascii() {
            return ascii_display_width(text);
        }
        text.graphemes(true).map(grapheme_width).sum()
    }
}

pub(crate) use text_width::{display_width, grapheme_width};
