use std::fs;
use std::io::Read;
use std::path::Path;

use crate::renderer::font::FontError;

/// DejaVu Sans Mono, bundled so the crate can draw text without any system fonts.
pub const EMBEDDED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSansMono.ttf");

/// Drain a byte stream into memory.
pub fn read_font<R: Read>(mut reader: R) -> Result<Vec<u8>, FontError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Read a font file, or fall back to the embedded font when no path is given.
pub fn load_font_file(path: Option<&Path>) -> Result<Vec<u8>, FontError> {
    match path {
        Some(path) => {
            log::info!("Loading font from {}", path.display());
            Ok(fs::read(path)?)
        }
        None => {
            log::info!("Using embedded font");
            Ok(EMBEDDED_FONT.to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_font_exists() {
        assert!(
            !EMBEDDED_FONT.is_empty(),
            "Embedded font data should not be empty"
        );
        // TrueType sfnt version tag
        assert_eq!(&EMBEDDED_FONT[..4], &[0, 1, 0, 0]);
    }

    #[test]
    fn test_read_font_from_stream() {
        let bytes = read_font(std::io::Cursor::new(EMBEDDED_FONT)).unwrap();
        assert_eq!(bytes.len(), EMBEDDED_FONT.len());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_font_file(Some(Path::new("/nonexistent/dir/font.ttf")));
        assert!(matches!(result, Err(FontError::Io(_))));
    }

    #[test]
    fn test_load_embedded_fallback() {
        let bytes = load_font_file(None).unwrap();
        assert_eq!(bytes, EMBEDDED_FONT);
    }
}
