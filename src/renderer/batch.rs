use bytemuck::{Pod, Zeroable};

use super::atlas::TextureId;
use super::color::Color;
use crate::constants::MAX_BATCH_SIZE;

/// One textured glyph quad, laid out for direct upload as instance data.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct GlyphQuad {
    /// Top-left corner in target space.
    pub position: [f32; 2],
    pub size: [f32; 2],
    /// Normalized texture coordinates of the glyph in its atlas page.
    pub uv_offset: [f32; 2],
    pub uv_size: [f32; 2],
    /// Linear RGBA.
    pub color: [f32; 4],
    pub depth: f32,
    pub texture: u32,
    _padding: [u32; 2],
}

impl GlyphQuad {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        uv: [f32; 4],
        color: Color,
        depth: f32,
        texture: TextureId,
    ) -> Self {
        Self {
            position: [x, y],
            size: [width, height],
            uv_offset: [uv[0], uv[1]],
            uv_size: [uv[2], uv[3]],
            color: color.to_linear_rgba(),
            depth,
            texture: texture.0,
            _padding: [0; 2],
        }
    }

    pub fn texture_id(&self) -> TextureId {
        TextureId(self.texture)
    }
}

/// Destination for glyph quads produced while drawing text.
///
/// Hosts implement this on top of their own sprite batch; `QuadBatch` is
/// the in-crate implementation that simply buffers instances.
pub trait GlyphBatch {
    fn draw_glyph(&mut self, quad: GlyphQuad);
}

impl<B: GlyphBatch + ?Sized> GlyphBatch for &mut B {
    fn draw_glyph(&mut self, quad: GlyphQuad) {
        (**self).draw_glyph(quad);
    }
}

/// Bounded buffer of glyph quads.
pub struct QuadBatch {
    instances: Vec<GlyphQuad>,
    capacity: usize,
}

impl QuadBatch {
    pub fn new() -> Self {
        Self::with_capacity(MAX_BATCH_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_full(&self) -> bool {
        self.instances.len() >= self.capacity
    }

    pub fn instances(&self) -> &[GlyphQuad] {
        &self.instances
    }

    /// Raw instance bytes, ready for a vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Quads grouped by texture, in first-use order, for one draw call per page.
    pub fn by_texture(&self) -> Vec<(TextureId, Vec<GlyphQuad>)> {
        let mut groups: Vec<(TextureId, Vec<GlyphQuad>)> = Vec::new();
        for quad in &self.instances {
            let id = quad.texture_id();
            match groups.iter_mut().find(|(group_id, _)| *group_id == id) {
                Some((_, quads)) => quads.push(*quad),
                None => groups.push((id, vec![*quad])),
            }
        }
        groups
    }
}

impl Default for QuadBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphBatch for QuadBatch {
    fn draw_glyph(&mut self, quad: GlyphQuad) {
        if self.is_full() {
            log::warn!("Batch full, cannot add glyph quad");
            return;
        }
        self.instances.push(quad);
    }
}
