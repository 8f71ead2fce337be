use std::io::Read;

use crate::config::FontSettings;
use crate::constants::{DEFAULT_TEXTURE_HEIGHT, DEFAULT_TEXTURE_WIDTH};
use crate::event::{AtlasFullHandler, HandlerId};
use crate::font_loader::read_font;
use crate::renderer::font::{FontError, FontSystem};
use crate::renderer::{AtlasPage, GlyphBatch, Rect, Vec2};
use crate::source::{CharSource, ColorSource};

/// Sprite font backed by a dynamic glyph atlas.
///
/// Every call is forwarded to the wrapped [`FontSystem`]; this type adds
/// the text/color source dispatch and per-call scaling on top.
#[derive(Debug)]
pub struct DynamicSpriteFont {
    font_system: FontSystem,
}

impl DynamicSpriteFont {
    fn new(
        ttf: &[u8],
        default_size: u32,
        texture_width: u32,
        texture_height: u32,
        blur: u32,
    ) -> Result<Self, FontError> {
        let mut font_system = FontSystem::new(texture_width, texture_height, blur)?;
        font_system.set_font_size(default_size);
        font_system.add_font_mem(ttf)?;

        Ok(Self { font_system })
    }

    pub fn from_ttf(
        ttf: &[u8],
        default_size: u32,
        texture_width: u32,
        texture_height: u32,
        blur: u32,
    ) -> Result<Self, FontError> {
        Self::new(ttf, default_size, texture_width, texture_height, blur)
    }

    /// `from_ttf` with 1024x1024 pages and no blur.
    pub fn from_ttf_default(ttf: &[u8], default_size: u32) -> Result<Self, FontError> {
        Self::new(
            ttf,
            default_size,
            DEFAULT_TEXTURE_WIDTH,
            DEFAULT_TEXTURE_HEIGHT,
            0,
        )
    }

    pub fn from_reader<R: Read>(
        reader: R,
        default_size: u32,
        texture_width: u32,
        texture_height: u32,
        blur: u32,
    ) -> Result<Self, FontError> {
        let ttf = read_font(reader)?;
        Self::new(&ttf, default_size, texture_width, texture_height, blur)
    }

    /// Build a font from configuration; unset options take their defaults.
    pub fn from_settings(ttf: &[u8], settings: &FontSettings) -> Result<Self, FontError> {
        let mut font = Self::new(
            ttf,
            settings.size(),
            settings.texture_width(),
            settings.texture_height(),
            settings.blur(),
        )?;
        font.set_spacing(settings.spacing());
        font.set_use_kernings(settings.use_kernings());
        font.set_default_character(settings.default_character);
        Ok(font)
    }

    /// Atlas pages, in creation order. Hosts upload these as textures.
    pub fn textures(&self) -> impl Iterator<Item = &AtlasPage> + '_ {
        self.font_system.atlases()
    }

    pub fn size(&self) -> u32 {
        self.font_system.font_size()
    }

    pub fn set_size(&mut self, size: u32) {
        self.font_system.set_font_size(size);
    }

    pub fn spacing(&self) -> f32 {
        self.font_system.spacing()
    }

    pub fn set_spacing(&mut self, spacing: f32) {
        self.font_system.set_spacing(spacing);
    }

    pub fn use_kernings(&self) -> bool {
        self.font_system.use_kernings()
    }

    pub fn set_use_kernings(&mut self, use_kernings: bool) {
        self.font_system.set_use_kernings(use_kernings);
    }

    pub fn default_character(&self) -> Option<char> {
        self.font_system.default_character()
    }

    pub fn set_default_character(&mut self, ch: Option<char>) {
        self.font_system.set_default_character(ch);
    }

    pub fn on_current_atlas_full(&mut self, handler: AtlasFullHandler) -> HandlerId {
        self.font_system.on_current_atlas_full(handler)
    }

    pub fn remove_current_atlas_full(&mut self, id: HandlerId) -> bool {
        self.font_system.remove_current_atlas_full(id)
    }

    pub fn font_system(&self) -> &FontSystem {
        &self.font_system
    }

    pub fn draw_string<B: GlyphBatch + ?Sized>(
        &mut self,
        batch: &mut B,
        char_source: CharSource<'_>,
        pos: Vec2,
        color_source: ColorSource<'_>,
    ) -> Result<f32, FontError> {
        self.draw_string_scaled(batch, char_source, pos, color_source, Vec2::ONE, 0.0)
    }

    /// Draw text at `pos`, scaled by `scale`. Returns the pen x position
    /// after the last glyph.
    ///
    /// Fails with `FontError::InvalidArgument` when either source is unset.
    pub fn draw_string_scaled<B: GlyphBatch + ?Sized>(
        &mut self,
        batch: &mut B,
        char_source: CharSource<'_>,
        pos: Vec2,
        color_source: ColorSource<'_>,
        scale: Vec2,
        depth: f32,
    ) -> Result<f32, FontError> {
        self.font_system.set_scale(scale);

        let fs = &mut self.font_system;
        let result = match (char_source, color_source) {
            (CharSource::Str(text), ColorSource::Uniform(color)) => {
                fs.draw_text(batch, pos.x, pos.y, text, color, depth)
            }
            (CharSource::Str(text), ColorSource::PerGlyph(colors)) => {
                fs.draw_text_colored(batch, pos.x, pos.y, text, colors, depth)
            }
            (CharSource::Builder(text), ColorSource::Uniform(color)) => {
                fs.draw_text(batch, pos.x, pos.y, text, color, depth)
            }
            (CharSource::Builder(text), ColorSource::PerGlyph(colors)) => {
                fs.draw_text_colored(batch, pos.x, pos.y, text, colors, depth)
            }
            (CharSource::Unset, _) => Err(FontError::invalid_argument(
                "char_source",
                "char source is in an invalid state",
            )),
            (_, ColorSource::Unset) => Err(FontError::invalid_argument(
                "color_source",
                "color source is in an invalid state",
            )),
        };

        self.font_system.set_scale(Vec2::ONE);

        result
    }

    pub fn add_ttf(&mut self, ttf: &[u8]) -> Result<(), FontError> {
        self.font_system.add_font_mem(ttf)
    }

    pub fn add_ttf_reader<R: Read>(&mut self, reader: R) -> Result<(), FontError> {
        let ttf = read_font(reader)?;
        self.add_ttf(&ttf)
    }

    /// Size of `text` drawn at the origin: the bottom-right corner of its bounds.
    pub fn measure_string(&mut self, text: &str) -> Result<Vec2, FontError> {
        let (_, bounds) = self.font_system.text_bounds(0.0, 0.0, text)?;
        Ok(Vec2::new(bounds.x2, bounds.y2))
    }

    /// Bounds of `text` drawn at `position`, truncated to whole pixels.
    pub fn text_bounds(&mut self, position: Vec2, text: &str) -> Result<Rect, FontError> {
        let (_, bounds) = self.font_system.text_bounds(position.x, position.y, text)?;
        Ok(bounds.to_rect())
    }

    pub fn reset(&mut self) -> Result<(), FontError> {
        self.font_system.reset()
    }

    pub fn reset_with_size(&mut self, width: u32, height: u32) -> Result<(), FontError> {
        self.font_system.reset_with_size(width, height)
    }
}
