//! Linear RGB color

use serde::{Serialize, Deserialize};

/// RGB color with components in `0.0..=1.0`
///
/// Values are passed to shaders untouched; no gamma conversion happens here.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a color from float components
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Pack back into `0xRRGGBB`, rounding each channel
    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Scale all channels, e.g. by a light intensity
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// `[r, g, b, a]` with the given alpha, for uniform buffers
    pub fn to_rgba(self, a: f32) -> [f32; 4] {
        [self.r, self.g, self.b, a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
