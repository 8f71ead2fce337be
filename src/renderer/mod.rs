mod atlas;
mod batch;
mod color;
pub mod font;
mod geometry;

pub use atlas::{AtlasPage, TextureId};
pub use batch::{GlyphBatch, GlyphQuad, QuadBatch};
pub use color::{srgb_to_linear, Color};
pub use geometry::{Bounds, Rect, Vec2};
