//! Linear RGB colors parsed from `0xRRGGBB` integers or CSS-style hex strings.

use std::str::FromStr;

/// A color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Returned when a hex color string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color {0:?}, expected #rgb or #rrggbb")]
pub struct ColorParseError(pub String);

impl Rgb {
    /// Pure white.
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    /// Pure black.
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    /// Creates a color from components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Packs the color back into `0xRRGGBB`, rounding each channel.
    #[must_use]
    pub fn to_hex(self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Component-wise linear interpolation.
    #[must_use]
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// True when every channel is zero.
    #[must_use]
    pub fn is_black(self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let packed = match digits.len() {
            6 => u32::from_str_radix(digits, 16).map_err(|_| err())?,
            3 => {
                let short = u32::from_str_radix(digits, 16).map_err(|_| err())?;
                let (r, g, b) = ((short >> 8) & 0xf, (short >> 4) & 0xf, short & 0xf);
                (r * 17) << 16 | (g * 17) << 8 | (b * 17)
            }
            _ => return Err(err()),
        };
        Ok(Rgb::from_hex(packed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_channels() {
        let c = Rgb::from_hex(0x00d4ff);
        assert_eq!(c.r, 0.0);
        assert!((c.g - 212.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 1.0);
    }

    #[test]
    fn test_parse_long_and_short_forms() {
        assert_eq!("#00d4ff".parse::<Rgb>().unwrap().to_hex(), 0x00d4ff);
        assert_eq!("#fff".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert_eq!(" #1A1A2E ".parse::<Rgb>().unwrap().to_hex(), 0x1a1a2e);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["00d4ff", "#00d4f", "#zzzzzz", "", "#", "#+0d4ff"] {
            assert!(bad.parse::<Rgb>().is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = Rgb::BLACK.lerp(Rgb::WHITE, 0.5);
        assert_eq!(mid.to_hex(), 0x808080);
    }

    #[test]
    fn test_is_black() {
        assert!(Rgb::from_hex(0).is_black());
        assert!(!Rgb::from_hex(0x010000).is_black());
    }
}
