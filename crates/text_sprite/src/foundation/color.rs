//! Packed 32-bit colors
//!
//! Colors are stored as `0xAARRGGBB`. Foreground text colors only use the
//! RGB bytes; shadow colors use the alpha byte as an enable flag and as
//! the shadow pass opacity.

use serde::{Deserialize, Serialize};

/// Scale applied to a channel byte when handing it to the batch.
///
/// Slightly below `1/255`, so a full channel maps to 0.9996.
pub const CHANNEL_SCALE: f32 = 0.003_92;

/// Packed `0xAARRGGBB` color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Fully transparent black; disables text shadows
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    /// Opaque white
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    /// Opaque black
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque red
    pub const RED: Self = Self(0xFFFF_0000);

    /// Build a color from individual channels
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Alpha byte
    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// Red byte
    pub const fn red(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green byte
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue byte
    pub const fn blue(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Same color with the alpha byte cleared
    pub const fn rgb(self) -> Self {
        Self(self.0 & 0x00FF_FFFF)
    }

    /// Channel-wise RGB multiply, `(a * b) / 255` with integer division
    ///
    /// The alpha byte of the result is taken from `self`.
    pub const fn multiply(self, other: Self) -> Self {
        const fn mul(a: u8, b: u8) -> u8 {
            ((a as u32 * b as u32) / 255) as u8
        }
        Self::from_argb(
            self.alpha(),
            mul(self.red(), other.red()),
            mul(self.green(), other.green()),
            mul(self.blue(), other.blue()),
        )
    }

    /// RGB channels scaled for the batch, in `[0, 1]`
    pub fn rgb_normalized(self) -> [f32; 3] {
        [
            f32::from(self.red()) * CHANNEL_SCALE,
            f32::from(self.green()) * CHANNEL_SCALE,
            f32::from(self.blue()) * CHANNEL_SCALE,
        ]
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}
