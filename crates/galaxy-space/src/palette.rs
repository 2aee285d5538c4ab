//! Brand palette and per-category colors.

use galaxy_math::Rgb;

/// Named colors used across the scene.
pub struct Palette;

impl Palette {
    pub const NEON_BLUE: u32 = 0x00d4ff;
    pub const NEON_ORANGE: u32 = 0xff6b35;
    pub const DARK_SPACE: u32 = 0x0a0e27;
    pub const PURPLE: u32 = 0x9d4edd;
    pub const CYAN: u32 = 0x06ffa5;
    pub const PINK: u32 = 0xff006e;
    pub const YELLOW: u32 = 0xffd60a;
    pub const SUN: u32 = 0xffaa00;
}

/// Color for a content category. Unknown categories get neon blue.
#[must_use]
pub fn category_color(category: &str) -> Rgb {
    let hex = match category {
        "frontend" | "web" => Palette::NEON_BLUE,
        "backend" => Palette::NEON_ORANGE,
        "mobile" => Palette::PURPLE,
        "devops" => Palette::CYAN,
        "ai" => Palette::PINK,
        "database" => Palette::YELLOW,
        _ => Palette::NEON_BLUE,
    };
    Rgb::from_hex(hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_categories() {
        assert_eq!(category_color("backend").to_hex(), 0xff6b35);
        assert_eq!(category_color("web"), category_color("frontend"));
        assert_eq!(category_color("database").to_hex(), 0xffd60a);
    }

    #[test]
    fn test_unknown_category_falls_back() {
        assert_eq!(category_color("quantum").to_hex(), Palette::NEON_BLUE);
        assert_eq!(category_color("").to_hex(), Palette::NEON_BLUE);
    }
}
