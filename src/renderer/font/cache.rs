use std::collections::HashMap;

use ahash::RandomState;

use super::collection::FaceIndex;

/// Cache key for rasterized glyphs.
///
/// Glyphs are rasterized once per pixel size; draw-time scaling never
/// produces a new entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GlyphCacheKey {
    pub codepoint: char,
    pub size: u32,
}

impl GlyphCacheKey {
    pub fn new(codepoint: char, size: u32) -> Self {
        Self { codepoint, size }
    }
}

/// Cached glyph with atlas coordinates and layout metadata.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CachedGlyph {
    /// Index of the atlas page holding the bitmap.
    pub page: usize,
    /// X position in the atlas page.
    pub atlas_x: u32,
    /// Y position in the atlas page.
    pub atlas_y: u32,
    /// Width of the bitmap in pixels, padding included.
    pub width: u32,
    /// Height of the bitmap in pixels, padding included.
    pub height: u32,
    /// Offset from the pen to the bitmap's left edge.
    pub offset_x: i32,
    /// Offset from the pen to the bitmap's top edge (y down).
    pub offset_y: i32,
    /// Horizontal advance in pixels.
    pub advance: f32,
    /// Face the glyph was rasterized from.
    pub face: FaceIndex,
    /// The character actually rasterized; differs from the key for default-character substitutions.
    pub rendered: char,
}

impl CachedGlyph {
    /// True for glyphs with no visual representation (whitespace).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Glyph cache keyed by (codepoint, size).
///
/// Stores `Some(glyph)` for renderable codepoints, `None` for codepoints no
/// face (and no default character) can render, so misses are resolved once.
pub struct GlyphCache {
    cache: HashMap<GlyphCacheKey, Option<CachedGlyph>, RandomState>,
}

impl GlyphCache {
    pub fn new() -> Self {
        Self {
            cache: HashMap::default(),
        }
    }

    /// Returns `Some(Some(glyph))` if cached successfully, `Some(None)` if cached as missing,
    /// or `None` if not in cache at all.
    pub fn get(&self, key: &GlyphCacheKey) -> Option<Option<&CachedGlyph>> {
        self.cache.get(key).map(|opt| opt.as_ref())
    }

    pub fn insert(&mut self, key: GlyphCacheKey, glyph: Option<CachedGlyph>) {
        self.cache.insert(key, glyph);
    }

    pub fn contains(&self, key: &GlyphCacheKey) -> bool {
        self.cache.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Drops misses and default-character substitutions so they are resolved
    /// again, e.g. after a font was added or the default character changed.
    pub fn forget_unresolved(&mut self) {
        self.cache.retain(|key, glyph| match glyph {
            Some(glyph) => glyph.rendered == key.codepoint,
            None => false,
        });
    }
}

impl Default for GlyphCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(atlas_x: u32) -> CachedGlyph {
        CachedGlyph {
            page: 0,
            atlas_x,
            atlas_y: 0,
            width: 8,
            height: 16,
            offset_x: 1,
            offset_y: -14,
            advance: 9.0,
            face: FaceIndex(0),
            rendered: 'a',
        }
    }

    #[test]
    fn test_glyph_cache_key_equality() {
        assert_eq!(GlyphCacheKey::new('a', 32), GlyphCacheKey::new('a', 32));
        assert_ne!(GlyphCacheKey::new('a', 32), GlyphCacheKey::new('b', 32));
        assert_ne!(GlyphCacheKey::new('a', 32), GlyphCacheKey::new('a', 24));
    }

    #[test]
    fn test_glyph_cache_basic() {
        let mut cache = GlyphCache::new();
        let key = GlyphCacheKey::new('a', 32);

        assert!(cache.get(&key).is_none());
        assert!(!cache.contains(&key));

        cache.insert(key, Some(glyph(10)));

        assert!(cache.contains(&key));
        let cached = cache.get(&key).unwrap().unwrap();
        assert_eq!(cached.atlas_x, 10);
        assert_eq!(cached.width, 8);
    }

    #[test]
    fn test_glyph_cache_missing() {
        let mut cache = GlyphCache::new();
        let key = GlyphCacheKey::new('\u{4E2D}', 32);

        cache.insert(key, None);

        let result = cache.get(&key);
        assert!(result.is_some()); // Entry exists
        assert!(result.unwrap().is_none()); // But marked as missing
    }

    #[test]
    fn test_forget_unresolved_keeps_hits() {
        let mut cache = GlyphCache::new();
        let hit = GlyphCacheKey::new('a', 32);
        let miss = GlyphCacheKey::new('\u{4E2D}', 32);
        let substituted = GlyphCacheKey::new('\u{4E2E}', 32);
        cache.insert(hit, Some(glyph(0)));
        cache.insert(miss, None);
        cache.insert(substituted, Some(glyph(20)));

        cache.forget_unresolved();

        assert!(cache.contains(&hit));
        assert!(!cache.contains(&miss));
        assert!(!cache.contains(&substituted));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_glyph_cache_clear() {
        let mut cache = GlyphCache::default();
        cache.insert(GlyphCacheKey::new('a', 32), Some(glyph(0)));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_empty_glyph() {
        let mut g = glyph(0);
        assert!(!g.is_empty());
        g.width = 0;
        assert!(g.is_empty());
    }
}
