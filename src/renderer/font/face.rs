use crate::constants::{GLYPH_PADDING, MAX_BLUR};

use super::blur::blur;
use super::FontError;

/// Vertical metrics of a face at one pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineMetrics {
    /// Distance from the baseline to the top of the line (positive).
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line (negative).
    pub descent: f32,
    /// Baseline-to-baseline distance.
    pub line_height: f32,
}

/// Rasterized glyph with positioning data.
#[derive(Debug, Clone)]
pub struct RasterizedGlyph {
    pub width: u32,
    pub height: u32,
    /// Offset from the pen (on the baseline) to the bitmap's left edge.
    pub offset_x: i32,
    /// Offset from the pen to the bitmap's top edge, y pointing down.
    pub offset_y: i32,
    pub advance: f32,
    /// `width * height` coverage values.
    pub coverage: Vec<u8>,
}

impl RasterizedGlyph {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A single font file loaded from memory.
pub struct Face {
    font: fontdue::Font,
}

impl Face {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontError::InvalidFont(e.to_string()))?;

        log::info!(
            "Loaded font {:?} with {} glyphs",
            font.name().unwrap_or("<unnamed>"),
            font.glyph_count()
        );

        Ok(Self { font })
    }

    /// Returns the glyph index for a character, or `None` if the face lacks it.
    pub fn glyph_index(&self, ch: char) -> Option<u16> {
        match self.font.lookup_glyph_index(ch) {
            0 => None,
            index => Some(index),
        }
    }

    pub fn has_char(&self, ch: char) -> bool {
        self.glyph_index(ch).is_some()
    }

    pub fn line_metrics(&self, size: f32) -> LineMetrics {
        match self.font.horizontal_line_metrics(size) {
            Some(m) => LineMetrics {
                ascent: m.ascent,
                descent: m.descent,
                line_height: m.new_line_size,
            },
            None => LineMetrics {
                ascent: size,
                descent: 0.0,
                line_height: size,
            },
        }
    }

    /// Horizontal kerning between two characters, in pixels at `size`.
    pub fn kerning(&self, left: char, right: char, size: f32) -> f32 {
        match (self.glyph_index(left), self.glyph_index(right)) {
            (Some(l), Some(r)) => self
                .font
                .horizontal_kern_indexed(l, r, size)
                .unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Rasterize `ch` at `size` pixels, padded and blurred for atlas storage.
    ///
    /// Characters missing from the face rasterize the face's notdef glyph.
    /// `blur_radius` is clamped to `MAX_BLUR`.
    pub fn rasterize(&self, ch: char, size: f32, blur_radius: u32) -> RasterizedGlyph {
        let blur_radius = blur_radius.min(MAX_BLUR);
        let index = self.font.lookup_glyph_index(ch);
        let (metrics, bitmap) = self.font.rasterize_indexed(index, size);

        if metrics.width == 0 || metrics.height == 0 {
            return RasterizedGlyph {
                width: 0,
                height: 0,
                offset_x: metrics.xmin,
                offset_y: 0,
                advance: metrics.advance_width,
                coverage: Vec::new(),
            };
        }

        let pad = (GLYPH_PADDING + blur_radius) as usize;
        let width = metrics.width + pad * 2;
        let height = metrics.height + pad * 2;

        let mut coverage = vec![0u8; width * height];
        for (row, src) in bitmap.chunks_exact(metrics.width).enumerate() {
            let start = (row + pad) * width + pad;
            coverage[start..start + metrics.width].copy_from_slice(src);
        }
        blur(&mut coverage, width, height, blur_radius);

        RasterizedGlyph {
            width: width as u32,
            height: height as u32,
            offset_x: metrics.xmin - pad as i32,
            offset_y: -(metrics.ymin + metrics.height as i32) - pad as i32,
            advance: metrics.advance_width,
            coverage,
        }
    }
}
