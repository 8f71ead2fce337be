//! Color types and conversions for glyph quads.
//!
//! Colors are specified in sRGB space. Hosts that render into sRGB
//! framebuffers want linear values, so quads carry linear RGBA.

/// RGBA color represented as a 32-bit value.
/// Format: 0xRRGGBBAA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const BLACK: Color = Color(0x0000_00FF);
    pub const TRANSPARENT: Color = Color(0);

    /// Creates an opaque color from RGB values.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba(r, g, b, 0xFF)
    }

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    /// Creates an opaque color from a 24-bit 0xRRGGBB value.
    pub const fn from_u24(rgb: u32) -> Self {
        let r = ((rgb >> 16) & 0xFF) as u8;
        let g = ((rgb >> 8) & 0xFF) as u8;
        let b = (rgb & 0xFF) as u8;
        Self::from_rgb(r, g, b)
    }

    pub const fn r(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    pub const fn g(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub const fn b(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub const fn a(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Returns the color as normalized float array [r, g, b, a].
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r() as f32 / 255.0,
            self.g() as f32 / 255.0,
            self.b() as f32 / 255.0,
            self.a() as f32 / 255.0,
        ]
    }

    /// Returns the color as linear RGBA. Alpha is passed through unchanged.
    pub fn to_linear_rgba(self) -> [f32; 4] {
        let [r, g, b, a] = self.to_f32_array();
        [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Convert sRGB color component to linear space.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
