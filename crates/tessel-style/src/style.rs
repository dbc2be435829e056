//! Text modifiers and mergeable styles.

use crate::color::Color;

bitflags::bitflags! {
    /// Text attribute flags applied on top of a cell's colors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifier: u16 {
        /// Bold / increased intensity.
        const BOLD        = 0b0000_0000_0001;
        /// Dim / decreased intensity.
        const DIM         = 0b0000_0000_0010;
        /// Italic text.
        const ITALIC      = 0b0000_0000_0100;
        /// Underlined text.
        const UNDERLINED  = 0b0000_0000_1000;
        /// Blink below 150 times per minute.
        const SLOW_BLINK  = 0b0000_0001_0000;
        /// Blink at 150 times per minute or more.
        const RAPID_BLINK = 0b0000_0010_0000;
        /// Reverse video (swap fg/bg).
        const REVERSED    = 0b0000_0100_0000;
        /// Hidden / invisible text.
        const HIDDEN      = 0b0000_1000_0000;
        /// Strikethrough text.
        const CROSSED_OUT = 0b0001_0000_0000;
    }
}

/// A partial style: unset colors leave the target untouched.
///
/// Styles compose with [`Style::merge`] and are applied to cells by the
/// render crate. `add_modifier` and `sub_modifier` are kept disjoint by the
/// builder methods, but `merge` simply unions them; on application the
/// removal wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color, if set.
    pub fg: Option<Color>,
    /// Background color, if set.
    pub bg: Option<Color>,
    /// Underline color, if set.
    pub underline_color: Option<Color>,
    /// Modifiers to switch on.
    pub add_modifier: Modifier,
    /// Modifiers to switch off.
    pub sub_modifier: Modifier,
}

impl Style {
    /// An empty style that changes nothing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            underline_color: None,
            add_modifier: Modifier::empty(),
            sub_modifier: Modifier::empty(),
        }
    }

    /// A style that resets every color and clears every modifier.
    #[must_use]
    pub const fn reset() -> Self {
        Self {
            fg: Some(Color::Reset),
            bg: Some(Color::Reset),
            underline_color: Some(Color::Reset),
            add_modifier: Modifier::empty(),
            sub_modifier: Modifier::all(),
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Set the underline color.
    #[must_use]
    pub const fn underline_color(mut self, color: Color) -> Self {
        self.underline_color = Some(color);
        self
    }

    /// Switch `modifier` on, cancelling any pending removal of it.
    #[must_use]
    pub fn add_modifier(mut self, modifier: Modifier) -> Self {
        self.sub_modifier.remove(modifier);
        self.add_modifier.insert(modifier);
        self
    }

    /// Switch `modifier` off, cancelling any pending addition of it.
    #[must_use]
    pub fn remove_modifier(mut self, modifier: Modifier) -> Self {
        self.add_modifier.remove(modifier);
        self.sub_modifier.insert(modifier);
        self
    }

    /// Layer `other` on top of `self`.
    ///
    /// Colors set on `other` win; modifier sets are unioned.
    #[must_use]
    pub fn merge(self, other: Style) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            underline_color: other.underline_color.or(self.underline_color),
            add_modifier: self.add_modifier | other.add_modifier,
            sub_modifier: self.sub_modifier | other.sub_modifier,
        }
    }

    /// Resolve the modifiers this style leaves on when applied over `base`.
    #[inline]
    #[must_use]
    pub fn apply_modifier(&self, base: Modifier) -> Modifier {
        (base | self.add_modifier) & !self.sub_modifier
    }
}

impl From<Color> for Style {
    fn from(color: Color) -> Self {
        Self::new().fg(color)
    }
}

impl From<Modifier> for Style {
    fn from(modifier: Modifier) -> Self {
        Self::new().add_modifier(modifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_is_empty() {
        let style = Style::default();
        assert_eq!(style, Style::new());
        assert!(style.fg.is_none() && style.bg.is_none());
        assert!(style.add_modifier.is_empty() && style.sub_modifier.is_empty());
    }

    #[test]
    fn merge_prefers_other_colors() {
        let base = Style::new().fg(Color::Red).bg(Color::Blue);
        let top = Style::new().fg(Color::Green);
        let merged = base.merge(top);
        assert_eq!(merged.fg, Some(Color::Green));
        assert_eq!(merged.bg, Some(Color::Blue));
        assert_eq!(merged.underline_color, None);
    }

    #[test]
    fn merge_unions_modifiers() {
        let base = Style::new().add_modifier(Modifier::BOLD);
        let top = Style::new()
            .add_modifier(Modifier::ITALIC)
            .remove_modifier(Modifier::DIM);
        let merged = base.merge(top);
        assert_eq!(merged.add_modifier, Modifier::BOLD | Modifier::ITALIC);
        assert_eq!(merged.sub_modifier, Modifier::DIM);
    }

    #[test]
    fn builders_keep_add_and_sub_disjoint() {
        let style = Style::new()
            .add_modifier(Modifier::BOLD)
            .remove_modifier(Modifier::BOLD);
        assert!(style.add_modifier.is_empty());
        assert_eq!(style.sub_modifier, Modifier::BOLD);

        let style = style.add_modifier(Modifier::BOLD);
        assert_eq!(style.add_modifier, Modifier::BOLD);
        assert!(style.sub_modifier.is_empty());
    }

    #[test]
    fn reset_clears_everything() {
        let base = Modifier::BOLD | Modifier::UNDERLINED;
        assert_eq!(Style::reset().apply_modifier(base), Modifier::empty());
        assert_eq!(Style::reset().fg, Some(Color::Reset));
    }

    #[test]
    fn removal_wins_on_application() {
        let style = Style {
            add_modifier: Modifier::BOLD,
            sub_modifier: Modifier::BOLD,
            ..Style::default()
        };
        assert_eq!(style.apply_modifier(Modifier::empty()), Modifier::empty());
    }

    fn color_strategy() -> impl Strategy<Value = Option<Color>> {
        prop_oneof![
            Just(None),
            Just(Some(Color::Reset)),
            any::<u8>().prop_map(|i| Some(Color::Indexed(i))),
            any::<(u8, u8, u8)>().prop_map(|(r, g, b)| Some(Color::Rgb(r, g, b))),
        ]
    }

    fn style_strategy() -> impl Strategy<Value = Style> {
        (
            color_strategy(),
            color_strategy(),
            color_strategy(),
            any::<u16>(),
            any::<u16>(),
        )
            .prop_map(|(fg, bg, underline_color, add, sub)| Style {
                fg,
                bg,
                underline_color,
                add_modifier: Modifier::from_bits_truncate(add),
                sub_modifier: Modifier::from_bits_truncate(sub),
            })
    }

    proptest! {
        #[test]
        fn merge_fields_follow_precedence(a in style_strategy(), b in style_strategy()) {
            let merged = a.merge(b);
            prop_assert_eq!(merged.fg, b.fg.or(a.fg));
            prop_assert_eq!(merged.bg, b.bg.or(a.bg));
            prop_assert_eq!(merged.underline_color, b.underline_color.or(a.underline_color));
            prop_assert_eq!(merged.add_modifier, a.add_modifier | b.add_modifier);
            prop_assert_eq!(merged.sub_modifier, a.sub_modifier | b.sub_modifier);
        }

        #[test]
        fn merge_with_empty_is_identity(a in style_strategy()) {
            prop_assert_eq!(a.merge(Style::new()), a);
            prop_assert_eq!(Style::new().merge(a), a);
        }
    }
}
