//! Text and color inputs accepted by `DynamicSpriteFont::draw_string`.
//!
//! Both sources start out `Unset`; drawing with an unset source is an
//! invalid-argument error rather than a silent no-op.

use crate::renderer::Color;

/// The text to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CharSource<'a> {
    #[default]
    Unset,
    /// An immutable string slice.
    Str(&'a str),
    /// A growable text buffer owned by the caller.
    Builder(&'a String),
}

impl<'a> CharSource<'a> {
    pub fn is_string_source(&self) -> bool {
        matches!(self, Self::Str(_))
    }

    pub fn is_builder_source(&self) -> bool {
        matches!(self, Self::Builder(_))
    }

    /// The text, or `None` when unset.
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            Self::Unset => None,
            Self::Str(s) => Some(s),
            Self::Builder(b) => Some(b.as_str()),
        }
    }
}

impl<'a> From<&'a str> for CharSource<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a String> for CharSource<'a> {
    fn from(b: &'a String) -> Self {
        Self::Builder(b)
    }
}

/// How glyphs are tinted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorSource<'a> {
    #[default]
    Unset,
    /// Every glyph gets the same color.
    Uniform(Color),
    /// One color per character of the text, indexed by character position.
    PerGlyph(&'a [Color]),
}

impl ColorSource<'_> {
    pub fn is_color(&self) -> bool {
        matches!(self, Self::Uniform(_))
    }

    pub fn is_glyph_colors(&self) -> bool {
        matches!(self, Self::PerGlyph(_))
    }
}

impl From<Color> for ColorSource<'_> {
    fn from(c: Color) -> Self {
        Self::Uniform(c)
    }
}

impl<'a> From<&'a [Color]> for ColorSource<'a> {
    fn from(colors: &'a [Color]) -> Self {
        Self::PerGlyph(colors)
    }
}

impl<'a> From<&'a Vec<Color>> for ColorSource<'a> {
    fn from(colors: &'a Vec<Color>) -> Self {
        Self::PerGlyph(colors.as_slice())
    }
}
