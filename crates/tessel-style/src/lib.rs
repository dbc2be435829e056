#![forbid(unsafe_code)]

//! Style primitives: named colors, text modifiers, and mergeable styles.

pub mod color;
pub mod style;

pub use color::{Color, ParseColorError};
pub use style::{Modifier, Style};
