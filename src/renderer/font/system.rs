use crate::constants::{DEFAULT_FONT_SIZE, MAX_BLUR, MIN_FONT_SIZE};
use crate::event::{AtlasFullEvent, AtlasFullHandler, EventHandlers, HandlerId};
use crate::renderer::atlas::AtlasPage;
use crate::renderer::batch::{GlyphBatch, GlyphQuad};
use crate::renderer::color::Color;
use crate::renderer::geometry::{Bounds, Vec2};

use super::cache::{CachedGlyph, GlyphCache, GlyphCacheKey};
use super::collection::{FaceIndex, FontCollection};
use super::face::{Face, LineMetrics, RasterizedGlyph};
use super::FontError;

/// A glyph positioned relative to the layout origin, before scaling.
#[derive(Debug, Clone, Copy)]
struct PlacedGlyph {
    char_index: usize,
    glyph: CachedGlyph,
    x0: f32,
    y0: f32,
}

#[derive(Debug, Default)]
struct Layout {
    glyphs: Vec<PlacedGlyph>,
    /// Furthest pen x reached on any line, relative to the origin.
    pen_extent: f32,
    /// Pen x at the end of the text.
    advance: f32,
}

/// Dynamic font atlas engine.
///
/// Glyphs are rasterized on first use at the current font size and packed
/// into atlas pages. When the current page runs out of room, subscribers of
/// the atlas-full event are notified and a new page of the same size is
/// started.
pub struct FontSystem {
    collection: FontCollection,
    cache: GlyphCache,
    atlases: Vec<AtlasPage>,
    texture_width: u32,
    texture_height: u32,
    blur: u32,
    font_size: u32,
    spacing: f32,
    use_kernings: bool,
    default_character: Option<char>,
    scale: Vec2,
    atlas_full: EventHandlers,
}

impl FontSystem {
    /// `blur` is clamped to `MAX_BLUR`.
    pub fn new(texture_width: u32, texture_height: u32, blur: u32) -> Result<Self, FontError> {
        let page = AtlasPage::new(texture_width, texture_height)?;

        if blur > MAX_BLUR {
            log::warn!("Blur radius {} clamped to {}", blur, MAX_BLUR);
        }
        let blur = blur.min(MAX_BLUR);

        Ok(Self {
            collection: FontCollection::new(),
            cache: GlyphCache::new(),
            atlases: vec![page],
            texture_width,
            texture_height,
            blur,
            font_size: DEFAULT_FONT_SIZE,
            spacing: 0.0,
            use_kernings: true,
            default_character: None,
            scale: Vec2::ONE,
            atlas_full: EventHandlers::new(),
        })
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: u32) {
        self.font_size = size;
    }

    /// Extra horizontal space inserted between neighbouring glyphs, in pixels.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing;
    }

    pub fn use_kernings(&self) -> bool {
        self.use_kernings
    }

    pub fn set_use_kernings(&mut self, use_kernings: bool) {
        self.use_kernings = use_kernings;
    }

    /// Character drawn in place of codepoints no loaded font covers.
    pub fn default_character(&self) -> Option<char> {
        self.default_character
    }

    pub fn set_default_character(&mut self, ch: Option<char>) {
        if self.default_character != ch {
            self.default_character = ch;
            self.cache.forget_unresolved();
        }
    }

    /// Scale applied to glyph quads at draw and measure time.
    pub fn scale(&self) -> Vec2 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    pub fn blur(&self) -> u32 {
        self.blur
    }

    pub fn texture_size(&self) -> (u32, u32) {
        (self.texture_width, self.texture_height)
    }

    pub fn font_count(&self) -> usize {
        self.collection.len()
    }

    /// Number of glyph cache entries, misses included.
    pub fn cached_glyphs(&self) -> usize {
        self.cache.len()
    }

    /// Parse a font file and append it to the fallback chain.
    pub fn add_font_mem(&mut self, bytes: &[u8]) -> Result<(), FontError> {
        let face = Face::from_bytes(bytes)?;
        self.collection.add(face);
        self.cache.forget_unresolved();
        Ok(())
    }

    pub fn atlases(&self) -> impl Iterator<Item = &AtlasPage> + '_ {
        self.atlases.iter()
    }

    pub fn atlas_count(&self) -> usize {
        self.atlases.len()
    }

    pub fn on_current_atlas_full(&mut self, handler: AtlasFullHandler) -> HandlerId {
        self.atlas_full.add(handler)
    }

    pub fn remove_current_atlas_full(&mut self, id: HandlerId) -> bool {
        self.atlas_full.remove(id)
    }

    /// Drop every atlas page and cached glyph and start over with one empty page.
    pub fn reset(&mut self) -> Result<(), FontError> {
        self.reset_with_size(self.texture_width, self.texture_height)
    }

    /// Like `reset`, with a new page size for this and all later pages.
    pub fn reset_with_size(&mut self, width: u32, height: u32) -> Result<(), FontError> {
        let page = AtlasPage::new(width, height)?;

        log::debug!(
            "Resetting font atlas: {} page(s), {} cached glyph(s) dropped",
            self.atlases.len(),
            self.cache.len()
        );

        self.atlases.clear();
        self.atlases.push(page);
        self.cache.clear();
        self.texture_width = width;
        self.texture_height = height;
        Ok(())
    }

    /// Draw `text` with a single color. Returns the pen x position after the
    /// last glyph, in target space.
    pub fn draw_text<B: GlyphBatch + ?Sized>(
        &mut self,
        batch: &mut B,
        x: f32,
        y: f32,
        text: &str,
        color: Color,
        depth: f32,
    ) -> Result<f32, FontError> {
        self.draw_with(batch, x, y, text, depth, |_| color)
    }

    /// Draw `text` tinting the character at index `i` with `glyph_colors[i]`.
    pub fn draw_text_colored<B: GlyphBatch + ?Sized>(
        &mut self,
        batch: &mut B,
        x: f32,
        y: f32,
        text: &str,
        glyph_colors: &[Color],
        depth: f32,
    ) -> Result<f32, FontError> {
        let chars = text.chars().count();
        if glyph_colors.len() < chars {
            return Err(FontError::invalid_argument(
                "glyph_colors",
                format!("{} colors for {} characters", glyph_colors.len(), chars),
            ));
        }
        self.draw_with(batch, x, y, text, depth, |i| glyph_colors[i])
    }

    /// Measure `text` placed at (x, y). Returns the advance and the box
    /// covering the start point, every glyph quad and every pen position.
    pub fn text_bounds(&mut self, x: f32, y: f32, text: &str) -> Result<(f32, Bounds), FontError> {
        let layout = self.layout(text)?;
        let scale = self.scale;

        let mut bounds = Bounds::at(x, y);
        bounds.x2 = bounds.x2.max(x + layout.pen_extent * scale.x);
        for placed in &layout.glyphs {
            if placed.glyph.is_empty() {
                continue;
            }
            bounds.include(&quad_bounds(placed, x, y, scale));
        }

        Ok((layout.advance * scale.x, bounds))
    }

    fn draw_with<B, F>(
        &mut self,
        batch: &mut B,
        x: f32,
        y: f32,
        text: &str,
        depth: f32,
        color_at: F,
    ) -> Result<f32, FontError>
    where
        B: GlyphBatch + ?Sized,
        F: Fn(usize) -> Color,
    {
        let layout = self.layout(text)?;
        let scale = self.scale;

        for placed in &layout.glyphs {
            let glyph = &placed.glyph;
            if glyph.is_empty() {
                continue;
            }

            let page = &self.atlases[glyph.page];
            let page_w = page.width() as f32;
            let page_h = page.height() as f32;
            let uv = [
                glyph.atlas_x as f32 / page_w,
                glyph.atlas_y as f32 / page_h,
                glyph.width as f32 / page_w,
                glyph.height as f32 / page_h,
            ];

            let b = quad_bounds(placed, x, y, scale);
            batch.draw_glyph(GlyphQuad::new(
                b.x,
                b.y,
                b.width(),
                b.height(),
                uv,
                color_at(placed.char_index),
                depth,
                page.texture_id(),
            ));
        }

        Ok(x + layout.advance * scale.x)
    }

    fn layout(&mut self, text: &str) -> Result<Layout, FontError> {
        let size = self.font_size;
        let mut layout = Layout::default();

        let Some(metrics) = self.first_line_metrics(text)? else {
            return Ok(layout);
        };

        let mut pen_x = 0.0f32;
        let mut pen_y = metrics.ascent;
        let mut prev: Option<CachedGlyph> = None;

        for (char_index, ch) in text.chars().enumerate() {
            if ch == '\n' {
                pen_x = 0.0;
                pen_y += metrics.line_height;
                prev = None;
                continue;
            }

            let Some(glyph) = self.glyph(ch, size)? else {
                continue;
            };

            if let Some(prev) = prev {
                let mut adv = 0.0;
                if self.use_kernings && prev.face == glyph.face {
                    if let Some(face) = self.collection.get(glyph.face) {
                        adv = face.kerning(prev.rendered, glyph.rendered, size as f32);
                    }
                }
                pen_x += (adv + self.spacing).round();
            }

            layout.glyphs.push(PlacedGlyph {
                char_index,
                glyph,
                x0: pen_x + glyph.offset_x as f32,
                y0: pen_y + glyph.offset_y as f32,
            });

            pen_x += glyph.advance.round();
            layout.pen_extent = layout.pen_extent.max(pen_x);
            prev = Some(glyph);
        }

        layout.advance = pen_x;
        Ok(layout)
    }

    /// Line metrics of the face that renders the first renderable character.
    fn first_line_metrics(&mut self, text: &str) -> Result<Option<LineMetrics>, FontError> {
        let size = self.font_size;
        for ch in text.chars().filter(|&c| c != '\n') {
            if let Some(glyph) = self.glyph(ch, size)? {
                return Ok(self
                    .collection
                    .get(glyph.face)
                    .map(|face| face.line_metrics(size as f32)));
            }
        }
        Ok(None)
    }

    /// Look up or rasterize the glyph for `ch` at `size`. Sizes below
    /// `MIN_FONT_SIZE` have no glyphs.
    fn glyph(&mut self, ch: char, size: u32) -> Result<Option<CachedGlyph>, FontError> {
        if size < MIN_FONT_SIZE {
            return Ok(None);
        }

        let key = GlyphCacheKey::new(ch, size);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.copied());
        }

        let blur = self.blur;
        let found = self.collection.find(ch).and_then(|index| {
            self.collection
                .get(index)
                .map(|face| (index, face.rasterize(ch, size as f32, blur)))
        });

        let default_character = self.default_character;
        let glyph = match found {
            Some((face_index, rasterized)) => Some(self.store(ch, size, face_index, rasterized)?),
            None => match default_character {
                Some(default) if default != ch => self.glyph(default, size)?,
                _ => None,
            },
        };

        if glyph.is_none() {
            log::debug!("No font renders {:?}", ch);
        }
        self.cache.insert(key, glyph);
        Ok(glyph)
    }

    /// Pack a freshly rasterized bitmap into the atlas.
    fn store(
        &mut self,
        ch: char,
        size: u32,
        face_index: FaceIndex,
        rasterized: RasterizedGlyph,
    ) -> Result<CachedGlyph, FontError> {
        let mut cached = CachedGlyph {
            page: self.atlases.len() - 1,
            atlas_x: 0,
            atlas_y: 0,
            width: rasterized.width,
            height: rasterized.height,
            offset_x: rasterized.offset_x,
            offset_y: rasterized.offset_y,
            advance: rasterized.advance,
            face: face_index,
            rendered: ch,
        };

        if rasterized.is_empty() {
            return Ok(cached);
        }

        let (page, atlas_x, atlas_y) = self.allocate(ch, rasterized.width, rasterized.height)?;
        self.atlases[page].write(
            atlas_x,
            atlas_y,
            rasterized.width,
            rasterized.height,
            &rasterized.coverage,
        );

        log::debug!(
            "Rasterized {:?} at {}px into page {} ({}, {})",
            ch,
            size,
            page,
            atlas_x,
            atlas_y
        );

        cached.page = page;
        cached.atlas_x = atlas_x;
        cached.atlas_y = atlas_y;
        Ok(cached)
    }

    /// Find room for a bitmap, starting a new page when the current one is full.
    fn allocate(&mut self, ch: char, width: u32, height: u32) -> Result<(usize, u32, u32), FontError> {
        let (atlas_width, atlas_height) = (self.texture_width, self.texture_height);
        let too_large = FontError::GlyphTooLarge {
            ch,
            width,
            height,
            atlas_width,
            atlas_height,
        };

        let current = self.atlases.len() - 1;
        if !self.atlases[current].can_ever_fit(width, height) {
            return Err(too_large);
        }
        if let Some((x, y)) = self.atlases[current].allocate(width, height) {
            return Ok((current, x, y));
        }

        log::warn!("Atlas page {} full, starting page {}", current, current + 1);
        self.atlas_full.emit(&AtlasFullEvent {
            page_index: current,
            width: atlas_width,
            height: atlas_height,
        });

        let mut page = AtlasPage::new(atlas_width, atlas_height)?;
        let Some((x, y)) = page.allocate(width, height) else {
            return Err(too_large);
        };
        self.atlases.push(page);
        Ok((current + 1, x, y))
    }
}

/// Target-space box of a placed glyph.
fn quad_bounds(placed: &PlacedGlyph, x: f32, y: f32, scale: Vec2) -> Bounds {
    let x0 = placed.x0 * scale.x;
    let y0 = placed.y0 * scale.y;
    Bounds {
        x: x + x0,
        y: y + y0,
        x2: x + x0 + placed.glyph.width as f32 * scale.x,
        y2: y + y0 + placed.glyph.height as f32 * scale.y,
    }
}

impl std::fmt::Debug for FontSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSystem")
            .field("fonts", &self.collection.len())
            .field("atlases", &self.atlases.len())
            .field("font_size", &self.font_size)
            .field("spacing", &self.spacing)
            .field("use_kernings", &self.use_kernings)
            .field("default_character", &self.default_character)
            .field("scale", &self.scale)
            .field("blur", &self.blur)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::font_loader::EMBEDDED_FONT;
    use crate::renderer::batch::QuadBatch;

    /// Proportional DejaVu Sans, which carries a `kern` table.
    const KERNED_FONT: &[u8] = include_bytes!("../../../tests/fixtures/DejaVuSans.ttf");

    fn system(width: u32, height: u32) -> FontSystem {
        let mut system = FontSystem::new(width, height, 0).unwrap();
        system.add_font_mem(EMBEDDED_FONT).unwrap();
        system
    }

    #[test]
    fn test_defaults() {
        let system = FontSystem::new(256, 128, 2).unwrap();
        assert_eq!(system.texture_size(), (256, 128));
        assert_eq!(system.blur(), 2);
        assert_eq!(system.scale(), Vec2::ONE);
        assert!(system.use_kernings());
        assert_eq!(system.default_character(), None);
        assert_eq!(system.font_count(), 0);
        assert_eq!(system.atlas_count(), 1);
    }

    #[test]
    fn test_zero_texture_size_rejected() {
        assert!(matches!(
            FontSystem::new(0, 0, 0),
            Err(FontError::InvalidAtlasSize { .. })
        ));
    }

    #[test]
    fn test_invalid_font_rejected() {
        let mut system = FontSystem::new(64, 64, 0).unwrap();
        assert!(matches!(
            system.add_font_mem(&[1, 2, 3]),
            Err(FontError::InvalidFont(_))
        ));
        assert_eq!(system.font_count(), 0);
    }

    #[test]
    fn test_draw_without_fonts_is_noop() {
        let mut system = FontSystem::new(64, 64, 0).unwrap();
        let mut batch = QuadBatch::new();
        let end = system
            .draw_text(&mut batch, 5.0, 5.0, "hello", Color::WHITE, 0.0)
            .unwrap();
        assert_eq!(end, 5.0);
        assert!(batch.is_empty());
    }

    #[test]
    fn test_draw_emits_one_quad_per_visible_glyph() {
        let mut system = system(512, 512);
        let mut batch = QuadBatch::new();

        let end = system
            .draw_text(&mut batch, 10.0, 20.0, "A b", Color::WHITE, 0.25)
            .unwrap();

        assert_eq!(batch.len(), 2);
        let (advance, _) = system.text_bounds(0.0, 0.0, "A b").unwrap();
        assert_eq!(end, 10.0 + advance);

        let page = system.atlases().next().unwrap();
        for quad in batch.instances() {
            assert_eq!(quad.texture_id(), page.texture_id());
            assert_eq!(quad.depth, 0.25);
            assert!(quad.uv_offset[0] >= 0.0 && quad.uv_offset[0] + quad.uv_size[0] <= 1.0);
            assert!(quad.uv_offset[1] >= 0.0 && quad.uv_offset[1] + quad.uv_size[1] <= 1.0);
        }
        // Glyphs advance left to right
        assert!(batch.instances()[0].position[0] < batch.instances()[1].position[0]);
    }

    #[test]
    fn test_empty_text() {
        let mut system = system(128, 128);
        let mut batch = QuadBatch::new();

        let end = system
            .draw_text(&mut batch, 3.0, 4.0, "", Color::WHITE, 0.0)
            .unwrap();
        assert_eq!(end, 3.0);
        assert!(batch.is_empty());

        let (advance, bounds) = system.text_bounds(3.0, 4.0, "").unwrap();
        assert_eq!(advance, 0.0);
        assert_eq!(bounds, Bounds::at(3.0, 4.0));
    }

    #[test]
    fn test_whitespace_advances_without_quads() {
        let mut system = system(128, 128);
        let mut batch = QuadBatch::new();

        let end = system
            .draw_text(&mut batch, 0.0, 0.0, "   ", Color::WHITE, 0.0)
            .unwrap();
        assert!(batch.is_empty());
        assert!(end > 0.0);

        let (_, bounds) = system.text_bounds(0.0, 0.0, "   ").unwrap();
        assert_eq!(bounds.x2, end);
    }

    #[test]
    fn test_glyphs_are_cached() {
        let mut system = system(256, 256);
        let mut batch = QuadBatch::new();

        system
            .draw_text(&mut batch, 0.0, 0.0, "abcabc", Color::WHITE, 0.0)
            .unwrap();
        assert_eq!(system.cached_glyphs(), 3);

        system
            .draw_text(&mut batch, 0.0, 0.0, "cab", Color::WHITE, 0.0)
            .unwrap();
        assert_eq!(system.cached_glyphs(), 3);

        system.set_font_size(16);
        system
            .draw_text(&mut batch, 0.0, 0.0, "a", Color::WHITE, 0.0)
            .unwrap();
        assert_eq!(system.cached_glyphs(), 4);
    }

    #[test]
    fn test_newline_starts_new_line() {
        let mut system = system(256, 256);
        let mut batch = QuadBatch::new();

        system
            .draw_text(&mut batch, 0.0, 0.0, "A\nA", Color::WHITE, 0.0)
            .unwrap();

        let quads = batch.instances();
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[0].position[0], quads[1].position[0]);

        let face = Face::from_bytes(EMBEDDED_FONT).unwrap();
        let line_height = face.line_metrics(system.font_size() as f32).line_height;
        assert!((quads[1].position[1] - quads[0].position[1] - line_height).abs() < 0.001);
    }

    #[test]
    fn test_spacing_adds_between_glyphs() {
        let mut system = system(256, 256);
        let (plain, _) = system.text_bounds(0.0, 0.0, "AAA").unwrap();

        system.set_spacing(5.0);
        let (spaced, _) = system.text_bounds(0.0, 0.0, "AAA").unwrap();

        assert_eq!(spaced, plain + 10.0);
    }

    #[test]
    fn test_scale_multiplies_geometry() {
        let mut system = system(256, 256);
        let (advance, bounds) = system.text_bounds(0.0, 0.0, "Hello").unwrap();

        system.set_scale(Vec2::new(2.0, 3.0));
        let (scaled_advance, scaled_bounds) = system.text_bounds(0.0, 0.0, "Hello").unwrap();

        assert_eq!(scaled_advance, advance * 2.0);
        assert!((scaled_bounds.x2 - bounds.x2 * 2.0).abs() < 0.001);
        assert!((scaled_bounds.y2 - bounds.y2 * 3.0).abs() < 0.001);
        // Scaling never rasterizes at a new size
        assert_eq!(system.cached_glyphs(), 4);
    }

    #[test]
    fn test_missing_glyph_skipped_without_default() {
        let mut system = system(256, 256);
        let mut batch = QuadBatch::new();

        system
            .draw_text(&mut batch, 0.0, 0.0, "a\u{4E2D}b", Color::WHITE, 0.0)
            .unwrap();
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_default_character_substitutes() {
        let mut system = system(256, 256);
        let mut batch = QuadBatch::new();

        system
            .draw_text(&mut batch, 0.0, 0.0, "\u{4E2D}", Color::WHITE, 0.0)
            .unwrap();
        assert!(batch.is_empty());

        system.set_default_character(Some('?'));
        system
            .draw_text(&mut batch, 0.0, 0.0, "\u{4E2D}", Color::WHITE, 0.0)
            .unwrap();
        assert_eq!(batch.len(), 1);

        let mut reference = QuadBatch::new();
        system
            .draw_text(&mut reference, 0.0, 0.0, "?", Color::WHITE, 0.0)
            .unwrap();
        assert_eq!(batch.instances()[0], reference.instances()[0]);

        system.set_default_character(None);
        batch.clear();
        system
            .draw_text(&mut batch, 0.0, 0.0, "\u{4E2D}", Color::WHITE, 0.0)
            .unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_per_glyph_colors() {
        let mut system = system(256, 256);
        let mut batch = QuadBatch::new();
        let red = Color::from_rgb(255, 0, 0);
        let green = Color::from_rgb(0, 255, 0);
        let blue = Color::from_rgb(0, 0, 255);

        // The space consumes a color but draws nothing
        system
            .draw_text_colored(&mut batch, 0.0, 0.0, "a b", &[red, green, blue], 0.0)
            .unwrap();

        let quads = batch.instances();
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[0].color, red.to_linear_rgba());
        assert_eq!(quads[1].color, blue.to_linear_rgba());
    }

    #[test]
    fn test_too_few_glyph_colors() {
        let mut system = system(256, 256);
        let mut batch = QuadBatch::new();

        let err = system
            .draw_text_colored(&mut batch, 0.0, 0.0, "abc", &[Color::WHITE], 0.0)
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(batch.is_empty());
    }

    #[test]
    fn test_atlas_grows_and_notifies() {
        let mut system = system(64, 64);
        let fired = Rc::new(RefCell::new(Vec::new()));

        let f = Rc::clone(&fired);
        system.on_current_atlas_full(Box::new(move |e| f.borrow_mut().push(e.page_index)));

        let mut batch = QuadBatch::new();
        system
            .draw_text(&mut batch, 0.0, 0.0, "ABCDEFGHIJKL", Color::WHITE, 0.0)
            .unwrap();

        let pages = system.atlas_count();
        assert!(pages > 1, "expected several pages, got {}", pages);
        assert_eq!(fired.borrow().len(), pages - 1);
        assert_eq!(*fired.borrow(), (0..pages - 1).collect::<Vec<_>>());
        assert!(system.atlases().all(|p| p.width() == 64 && p.height() == 64));

        // Quads reference more than one page
        assert!(batch.by_texture().len() > 1);
    }

    #[test]
    fn test_removed_handler_not_notified() {
        let mut system = system(64, 64);
        let fired = Rc::new(RefCell::new(0));

        let f = Rc::clone(&fired);
        let id = system.on_current_atlas_full(Box::new(move |_| *f.borrow_mut() += 1));
        assert!(system.remove_current_atlas_full(id));

        let mut batch = QuadBatch::new();
        system
            .draw_text(&mut batch, 0.0, 0.0, "ABCDEFGHIJKL", Color::WHITE, 0.0)
            .unwrap();

        assert!(system.atlas_count() > 1);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn test_glyph_too_large() {
        let mut system = system(16, 16);
        let mut batch = QuadBatch::new();

        let err = system
            .draw_text(&mut batch, 0.0, 0.0, "A", Color::WHITE, 0.0)
            .unwrap_err();
        assert!(matches!(err, FontError::GlyphTooLarge { ch: 'A', .. }));
        assert!(batch.is_empty());
    }

    #[test]
    fn test_reset_with_size() {
        let mut system = system(64, 64);
        let mut batch = QuadBatch::new();
        system
            .draw_text(&mut batch, 0.0, 0.0, "ABCDEFGHIJKL", Color::WHITE, 0.0)
            .unwrap();
        assert!(system.atlas_count() > 1);
        let old_id = system.atlases().next().unwrap().texture_id();

        system.reset_with_size(128, 256).unwrap();

        assert_eq!(system.atlas_count(), 1);
        assert_eq!(system.cached_glyphs(), 0);
        assert_eq!(system.texture_size(), (128, 256));
        let page = system.atlases().next().unwrap();
        assert_eq!((page.width(), page.height()), (128, 256));
        assert_ne!(page.texture_id(), old_id);
        assert!(!page.is_dirty());
    }

    #[test]
    fn test_failed_reset_keeps_state() {
        let mut system = system(128, 128);
        let mut batch = QuadBatch::new();
        system
            .draw_text(&mut batch, 0.0, 0.0, "abc", Color::WHITE, 0.0)
            .unwrap();

        assert!(system.reset_with_size(0, 32).is_err());
        assert_eq!(system.texture_size(), (128, 128));
        assert_eq!(system.cached_glyphs(), 3);

        system.reset().unwrap();
        assert_eq!(system.texture_size(), (128, 128));
        assert_eq!(system.cached_glyphs(), 0);
    }

    #[test]
    fn test_kerning_changes_advance() {
        let mut system = FontSystem::new(256, 256, 0).unwrap();
        system.add_font_mem(KERNED_FONT).unwrap();

        let (kerned, _) = system.text_bounds(0.0, 0.0, "AV").unwrap();
        system.set_use_kernings(false);
        let (plain, _) = system.text_bounds(0.0, 0.0, "AV").unwrap();

        let face = Face::from_bytes(KERNED_FONT).unwrap();
        let kern = face.kerning('A', 'V', system.font_size() as f32);
        assert!(kern < -1.0);
        assert_eq!(kerned, plain + kern.round());

        // Kerning moves the second quad as well
        let mut off = QuadBatch::new();
        system.draw_text(&mut off, 0.0, 0.0, "AV", Color::WHITE, 0.0).unwrap();
        system.set_use_kernings(true);
        let mut on = QuadBatch::new();
        system.draw_text(&mut on, 0.0, 0.0, "AV", Color::WHITE, 0.0).unwrap();
        assert_eq!(
            on.instances()[1].position[0],
            off.instances()[1].position[0] + kern.round()
        );
    }

    #[test]
    fn test_no_kerning_across_faces() {
        let mut system = system(256, 256);
        system.add_font_mem(KERNED_FONT).unwrap();

        // U+A740 only exists in the fallback face, which kerns it against 'T'
        let fallback = Face::from_bytes(KERNED_FONT).unwrap();
        let primary = Face::from_bytes(EMBEDDED_FONT).unwrap();
        assert!(!primary.has_char('\u{A740}'));
        assert!(fallback.kerning('\u{A740}', 'T', system.font_size() as f32) < -1.0);

        let mut batch = QuadBatch::new();
        system
            .draw_text(&mut batch, 0.0, 0.0, "\u{A740}T", Color::WHITE, 0.0)
            .unwrap();
        assert_eq!(batch.len(), 2);

        let (with_kerning, _) = system.text_bounds(0.0, 0.0, "\u{A740}T").unwrap();
        system.set_use_kernings(false);
        let (without_kerning, _) = system.text_bounds(0.0, 0.0, "\u{A740}T").unwrap();
        assert_eq!(with_kerning, without_kerning);
    }

    #[test]
    fn test_tiny_font_size_draws_nothing() {
        let mut system = system(128, 128);
        system.set_font_size(1);

        let mut batch = QuadBatch::new();
        let end = system
            .draw_text(&mut batch, 4.0, 5.0, "Hello\nx", Color::WHITE, 0.0)
            .unwrap();
        assert_eq!(end, 4.0);
        assert!(batch.is_empty());
        assert_eq!(system.cached_glyphs(), 0);

        let (advance, bounds) = system.text_bounds(4.0, 5.0, "Hello\nx").unwrap();
        assert_eq!(advance, 0.0);
        assert_eq!(bounds, Bounds::at(4.0, 5.0));

        system.set_font_size(MIN_FONT_SIZE);
        system
            .draw_text(&mut batch, 4.0, 5.0, "Hello", Color::WHITE, 0.0)
            .unwrap();
        assert!(system.cached_glyphs() > 0);
    }

    #[test]
    fn test_large_blur_is_clamped() {
        let mut capped = FontSystem::new(1024, 1024, MAX_BLUR).unwrap();
        capped.add_font_mem(EMBEDDED_FONT).unwrap();
        let mut reference = QuadBatch::new();
        capped
            .draw_text(&mut reference, 0.0, 0.0, "A", Color::WHITE, 0.0)
            .unwrap();
        let expected = reference.instances()[0];

        for blur in [3000, u32::MAX] {
            let mut system = FontSystem::new(1024, 1024, blur).unwrap();
            assert_eq!(system.blur(), MAX_BLUR);
            system.add_font_mem(EMBEDDED_FONT).unwrap();

            let mut batch = QuadBatch::new();
            system
                .draw_text(&mut batch, 0.0, 0.0, "A", Color::WHITE, 0.0)
                .unwrap();
            let quad = batch.instances()[0];
            assert_eq!(quad.size, expected.size);
            assert_eq!(quad.position, expected.position);
        }
    }

    #[test]
    fn test_blur_enlarges_quads() {
        let mut sharp = system(256, 256);
        let mut blurred = FontSystem::new(256, 256, 4).unwrap();
        blurred.add_font_mem(EMBEDDED_FONT).unwrap();

        let mut a = QuadBatch::new();
        let mut b = QuadBatch::new();
        sharp.draw_text(&mut a, 0.0, 0.0, "A", Color::WHITE, 0.0).unwrap();
        blurred.draw_text(&mut b, 0.0, 0.0, "A", Color::WHITE, 0.0).unwrap();

        assert_eq!(b.instances()[0].size[0], a.instances()[0].size[0] + 8.0);
        assert_eq!(b.instances()[0].position[0], a.instances()[0].position[0] - 4.0);
    }
}
