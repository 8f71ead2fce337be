use std::sync::atomic::{AtomicU32, Ordering};

use crate::constants::GLYPH_SPACING;
use crate::renderer::font::FontError;

static NEXT_TEXTURE_ID: AtomicU32 = AtomicU32::new(1);

/// Identifies an atlas page for the lifetime of the process.
///
/// Hosts key their GPU textures on this id; a page created by a reset
/// never reuses the id of a page it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u32);

impl TextureId {
    fn next() -> Self {
        Self(NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One texture page of rasterized glyphs.
///
/// Pixels are single-channel coverage values. Space is handed out with
/// row-based packing and never reclaimed; the owning font system starts a
/// new page once this one is full.
pub struct AtlasPage {
    id: TextureId,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    current_row_y: u32,
    current_row_x: u32,
    current_row_height: u32,
    dirty: bool,
}

impl AtlasPage {
    pub fn new(width: u32, height: u32) -> Result<Self, FontError> {
        if width == 0 || height == 0 {
            return Err(FontError::InvalidAtlasSize { width, height });
        }

        log::debug!("Creating {}x{} atlas page", width, height);

        Ok(Self {
            id: TextureId::next(),
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
            current_row_y: 0,
            current_row_x: 0,
            current_row_height: 0,
            dirty: false,
        })
    }

    pub fn texture_id(&self) -> TextureId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage values, row-major, `width * height` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// True when pixels were written since the last `mark_clean`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Whether a `width` x `height` bitmap could fit in an empty page of this size.
    pub fn can_ever_fit(&self, width: u32, height: u32) -> bool {
        width <= self.width && height <= self.height
    }

    /// Allocate space using row-based packing.
    pub fn allocate(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        if !self.can_ever_fit(width, height) {
            return None;
        }

        // Check if the item fits in the current row
        if self.current_row_x + width <= self.width && self.current_row_y + height <= self.height
        {
            let x = self.current_row_x;
            let y = self.current_row_y;
            self.current_row_x += width + GLYPH_SPACING;
            self.current_row_height = self.current_row_height.max(height + GLYPH_SPACING);
            return Some((x, y));
        }

        // Start new row
        let new_row_y = self.current_row_y + self.current_row_height;
        if new_row_y + height > self.height {
            return None;
        }

        self.current_row_y = new_row_y;
        self.current_row_x = width + GLYPH_SPACING;
        self.current_row_height = height + GLYPH_SPACING;

        Some((0, new_row_y))
    }

    /// Copy a coverage bitmap into the page at an allocated position.
    pub fn write(&mut self, x: u32, y: u32, width: u32, height: u32, coverage: &[u8]) {
        debug_assert!(x + width <= self.width && y + height <= self.height);
        debug_assert_eq!(coverage.len(), (width * height) as usize);

        let stride = self.width as usize;
        for row in 0..height as usize {
            let src = &coverage[row * width as usize..(row + 1) * width as usize];
            let start = (y as usize + row) * stride + x as usize;
            self.pixels[start..start + width as usize].copy_from_slice(src);
        }
        self.dirty = true;
    }

    /// Expand coverage into RGBA: white foreground, coverage in alpha.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() * 4);
        for &alpha in &self.pixels {
            rgba.extend_from_slice(&[255, 255, 255, alpha]);
        }
        rgba
    }
}

impl std::fmt::Debug for AtlasPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtlasPage")
            .field("id", &self.id)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}
