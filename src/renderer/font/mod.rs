mod blur;
mod cache;
mod collection;
mod error;
mod face;
mod system;

pub use cache::{CachedGlyph, GlyphCache, GlyphCacheKey};
pub use collection::{FaceIndex, FontCollection};
pub use error::FontError;
pub use face::{Face, LineMetrics, RasterizedGlyph};
pub use system::FontSystem;
