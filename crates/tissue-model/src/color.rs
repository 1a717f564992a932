//! Display color of a tissue.

use serde::{Deserialize, Serialize};

/// RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from 8-bit channels (`0..=255`).
    #[must_use]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Convert to 8-bit channels, clamping out-of-range values.
    #[must_use]
    pub fn to_u8(self) -> [u8; 3] {
        [channel_to_u8(self.r), channel_to_u8(self.g), channel_to_u8(self.b)]
    }

    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    #[must_use]
    pub const fn from_array(channels: [f32; 3]) -> Self {
        Self::new(channels[0], channels[1], channels[2])
    }
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converts_to_u8_with_clamping() {
        assert_eq!(Color::new(1.0, 0.0, 0.5).to_u8(), [255, 0, 128]);
        assert_eq!(Color::new(2.0, -1.0, 0.0).to_u8(), [255, 0, 0]);
    }

    #[test]
    fn test_u8_channels_survive_conversion() {
        let color = Color::from_u8(12, 200, 255);
        assert_eq!(color.to_u8(), [12, 200, 255]);
    }
}
