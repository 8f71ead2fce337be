pub const DEFAULT_TEXTURE_WIDTH: u32 = 1024;
pub const DEFAULT_TEXTURE_HEIGHT: u32 = 1024;
pub const DEFAULT_FONT_SIZE: u32 = 32;

/// Transparent border rasterized around every glyph bitmap, on top of the blur radius.
pub const GLYPH_PADDING: u32 = 2;

/// Largest blur radius applied to glyph bitmaps; larger requests are clamped.
pub const MAX_BLUR: u32 = 20;

/// Pixel sizes below this rasterize nothing.
pub const MIN_FONT_SIZE: u32 = 2;

/// Gap kept between neighbouring allocations in an atlas page.
pub const GLYPH_SPACING: u32 = 1;

/// Upper bound on quads buffered by a single `QuadBatch`.
pub const MAX_BATCH_SIZE: usize = 65536;
