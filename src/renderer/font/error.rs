#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Invalid argument `{param}`: {reason}")]
    InvalidArgument { param: &'static str, reason: String },
    #[error("Failed to parse font: {0}")]
    InvalidFont(String),
    #[error(
        "Glyph {ch:?} ({width}x{height}) does not fit in a {atlas_width}x{atlas_height} atlas page"
    )]
    GlyphTooLarge {
        ch: char,
        width: u32,
        height: u32,
        atlas_width: u32,
        atlas_height: u32,
    },
    #[error("Invalid atlas size {width}x{height}")]
    InvalidAtlasSize { width: u32, height: u32 },
    #[error("Failed to read font data: {0}")]
    Io(#[from] std::io::Error),
}

impl FontError {
    pub(crate) fn invalid_argument(param: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by the caller's arguments rather than the font data.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
