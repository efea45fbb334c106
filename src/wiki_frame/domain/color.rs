use image::Rgb;
use serde::Deserialize;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `#RRGGBB` or `#RRGGBBAA`, the leading `#` is optional.
    pub fn from_hex(hex_str: &str) -> Result<Self, DomainError> {
        let hex = hex_str.trim().trim_start_matches('#');
        let invalid = || DomainError::InvalidInput(format!("invalid hex color: {:?}", hex_str));
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        match hex.len() {
            6 => Ok(Color::new(channel(0)?, channel(2)?, channel(4)?, 255)), // RRGGBB
            8 => Ok(Color::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)), // RRGGBBAA
            _ => Err(invalid()),
        }
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }

    pub fn opacity(self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Source-over blend of this color onto an opaque pixel.
    pub fn blend_over(self, dst: Rgb<u8>) -> Rgb<u8> {
        let alpha = self.opacity();
        let mix = |src: u8, dst: u8| (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8;
        Rgb([
            mix(self.r, dst[0]),
            mix(self.g, dst[1]),
            mix(self.b, dst[2]),
        ])
    }
}

impl TryFrom<String> for Color {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_valid_formats() {
        assert_eq!(Color::from_hex("#FF0000").unwrap(), Color::new(255, 0, 0, 255));
        assert_eq!(Color::from_hex("00FF00").unwrap(), Color::new(0, 255, 0, 255));
        assert_eq!(Color::from_hex("#0000FF80").unwrap(), Color::new(0, 0, 255, 128));
        assert_eq!(Color::from_hex("#0000000C").unwrap(), Color::new(0, 0, 0, 12));
    }

    #[test]
    fn test_from_hex_invalid_formats() {
        for input in ["invalid", "#123", "", "#GGGGGG", "#ÄÄÄ"] {
            assert!(Color::from_hex(input).is_err(), "{:?} should be rejected", input);
        }
    }

    #[test]
    fn test_blend_over_respects_alpha() {
        let grey = Rgb([200, 100, 50]);
        assert_eq!(Color::new(0, 0, 0, 0).blend_over(grey), grey);
        assert_eq!(Color::BLACK.blend_over(grey), Rgb([0, 0, 0]));
        // 12/255 の黒はほぼ元の色のまま
        assert_eq!(Color::new(0, 0, 0, 12).blend_over(grey), Rgb([191, 95, 48]));
    }

    #[test]
    fn test_deserialize_from_hex_string() {
        let color: Color = serde_json::from_str("\"#FFFFFF\"").unwrap();
        assert_eq!(color, Color::WHITE);
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
