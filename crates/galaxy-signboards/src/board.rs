//! Derived visual parameters of a board: face material, text layout, border,
//! glow shell and stand.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use galaxy_math::Rgb;

use crate::config::{
    BoardStyle, BorderStyle, GradientDirection, SignboardConfig, StandKind, TextAlign,
    VerticalAlign, parse_color,
};
use crate::error::SignboardError;

/// Text texture resolution.
pub const PIXELS_PER_UNIT: f32 = 256.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardMaterial {
    pub color: Rgb,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub opacity: f32,
    pub transmission: f32,
    /// `false` for the unlit minimal style.
    pub lit: bool,
}

impl BoardMaterial {
    fn for_style(style: BoardStyle, color: Rgb, opacity: f32) -> Self {
        let base = Self {
            color,
            emissive: Rgb::BLACK,
            emissive_intensity: 0.0,
            metalness: 0.5,
            roughness: 0.4,
            opacity,
            transmission: 0.0,
            lit: true,
        };
        match style {
            BoardStyle::Modern => base,
            BoardStyle::Neon => Self {
                emissive: color,
                emissive_intensity: 0.5,
                metalness: 0.8,
                roughness: 0.2,
                ..base
            },
            BoardStyle::Holographic => Self {
                metalness: 0.9,
                roughness: 0.1,
                opacity: opacity * 0.7,
                transmission: 0.5,
                ..base
            },
            BoardStyle::Classic => Self {
                metalness: 0.3,
                roughness: 0.7,
                ..base
            },
            BoardStyle::Minimal => Self {
                opacity: opacity * 0.5,
                metalness: 0.0,
                roughness: 1.0,
                lit: false,
                ..base
            },
        }
    }
}

/// One line of text placed on the canvas, in pixels from the top-left.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub font_px: f32,
    pub line_height_px: f32,
    pub color: Rgb,
    pub align: TextAlign,
    pub lines: Vec<TextLine>,
    /// `(from, to, direction)` painted behind the text.
    pub gradient: Option<(Rgb, Rgb, GradientDirection)>,
    /// Size of the text plane in world units.
    pub plane: Vec2,
    /// Offset of the text plane from the board center.
    pub plane_offset: Vec3,
}

impl TextLayout {
    fn build(config: &SignboardConfig) -> Result<Self, SignboardError> {
        let text = &config.text;
        let size = config.size;
        let px = |units: f32| units * PIXELS_PER_UNIT / 10.0;

        let canvas_width = ((size.width * PIXELS_PER_UNIT).floor() as u32).max(2);
        let canvas_height = ((size.height * PIXELS_PER_UNIT).floor() as u32).max(2);
        let (w, h) = (canvas_width as f32, canvas_height as f32);

        let font_px = px(text.font_size);
        let line_height_px = font_px * text.line_height;
        let padding = px(text.padding);
        let contents: Vec<&str> = text.content.split('\n').collect();
        let total_height = contents.len() as f32 * line_height_px;

        let start_y = match text.vertical_align {
            VerticalAlign::Top => padding,
            VerticalAlign::Bottom => h - total_height - padding,
            VerticalAlign::Middle => (h - total_height) / 2.0,
        };
        let x = match text.align {
            TextAlign::Left => padding,
            TextAlign::Right => w - padding,
            TextAlign::Center => w / 2.0,
        };
        let lines = contents
            .into_iter()
            .enumerate()
            .map(|(i, line)| TextLine {
                text: line.to_string(),
                x,
                y: start_y + i as f32 * line_height_px,
            })
            .collect();

        let gradient = match &config.background.gradient {
            Some(g) => Some((
                parse_color("background.gradient.from", &g.from)?,
                parse_color("background.gradient.to", &g.to)?,
                g.direction,
            )),
            None => None,
        };

        Ok(Self {
            canvas_width,
            canvas_height,
            font_px,
            line_height_px,
            color: parse_color("text.color", &text.color)?,
            align: text.align,
            lines,
            gradient,
            plane: Vec2::new(size.width - 0.1, size.height - 0.1),
            plane_offset: Vec3::new(0.0, 0.0, size.depth / 2.0 + 0.01),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderBox {
    pub size: Vec3,
    pub color: Rgb,
    /// Glow and neon borders are unlit back-faced shells.
    pub unlit: bool,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowShell {
    pub size: Vec3,
    pub color: Rgb,
    pub base_opacity: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandPartKind {
    Pole,
    Base,
}

/// A cylinder of the stand, positioned in board space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandPart {
    pub kind: StandPartKind,
    pub position: Vec3,
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    /// Lean about X and Z in radians.
    pub tilt: Vec2,
}

impl StandPart {
    fn pole(position: Vec3, radius: f32, height: f32) -> Self {
        Self {
            kind: StandPartKind::Pole,
            position,
            radius_top: radius,
            radius_bottom: radius,
            height,
            tilt: Vec2::ZERO,
        }
    }

    fn base(position: Vec3, radius_top: f32, radius_bottom: f32, height: f32) -> Self {
        Self {
            kind: StandPartKind::Base,
            position,
            radius_top,
            radius_bottom,
            height,
            tilt: Vec2::ZERO,
        }
    }
}

fn stand_parts(config: &SignboardConfig) -> Vec<StandPart> {
    let stand = &config.stand;
    if !stand.enabled {
        return Vec::new();
    }
    let (w, h, sh) = (config.size.width, config.size.height, stand.height);
    let pole_y = -h / 2.0 - sh / 2.0;
    match stand.kind {
        StandKind::Single => vec![
            StandPart::pole(Vec3::new(0.0, pole_y, 0.0), 0.2, sh),
            StandPart::base(Vec3::new(0.0, -h / 2.0 - sh - 0.25, 0.0), 1.0, 1.5, 0.5),
        ],
        StandKind::Double => {
            let mut parts = Vec::with_capacity(4);
            for x in [-w / 3.0, w / 3.0] {
                parts.push(StandPart::pole(Vec3::new(x, pole_y, 0.0), 0.15, sh));
            }
            for x in [-w / 3.0, w / 3.0] {
                parts.push(StandPart::base(
                    Vec3::new(x, -h / 2.0 - sh - 0.2, 0.0),
                    0.8,
                    1.0,
                    0.4,
                ));
            }
            parts
        }
        StandKind::Tripod => [0.0_f32, 120.0, 240.0]
            .into_iter()
            .map(|deg| {
                let rad = deg * PI / 180.0;
                let offset = w / 4.0;
                let mut pole = StandPart::pole(
                    Vec3::new(rad.cos() * offset, pole_y, rad.sin() * offset),
                    0.1,
                    sh,
                );
                pole.tilt = Vec2::new(rad.cos() * 0.1, rad.sin() * 0.1);
                pole
            })
            .collect(),
    }
}

/// Everything needed to draw the board itself.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardVisual {
    pub size: Vec3,
    pub material: BoardMaterial,
    pub text: TextLayout,
    pub border: Option<BorderBox>,
    pub glow: Option<GlowShell>,
    pub stand: Vec<StandPart>,
    pub stand_color: Rgb,
}

impl BoardVisual {
    pub fn build(config: &SignboardConfig) -> Result<Self, SignboardError> {
        let size = Vec3::new(config.size.width, config.size.height, config.size.depth);
        let background = parse_color("background.color", &config.background.color)?;
        let material =
            BoardMaterial::for_style(config.style, background, config.background.opacity);

        let border = if config.border.enabled {
            let unlit = matches!(config.border.style, BorderStyle::Glow | BorderStyle::Neon);
            Some(BorderBox {
                size: size + Vec3::splat(config.border.width),
                color: parse_color("border.color", &config.border.color)?,
                unlit,
                opacity: if unlit { 0.8 } else { 1.0 },
            })
        } else {
            None
        };

        let glow = if config.effects.glow {
            let opacity = config.effects.glow_intensity * 0.3;
            Some(GlowShell {
                size: size * 1.1,
                color: parse_color("effects.glowColor", &config.effects.glow_color)?,
                base_opacity: opacity,
                opacity,
            })
        } else {
            None
        };

        Ok(Self {
            size,
            material,
            text: TextLayout::build(config)?,
            border,
            glow,
            stand: stand_parts(config),
            stand_color: parse_color("stand.color", &config.stand.color)?,
        })
    }

    /// Applies the pulse phase `p` in `[0, 1]`.
    pub fn apply_pulse(&mut self, p: f32) {
        if self.material.lit {
            self.material.emissive_intensity = 0.3 + p * 0.3;
        }
        if let Some(glow) = &mut self.glow {
            glow.opacity = glow.base_opacity * (0.5 + p * 0.5);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_text_is_centered() {
        let visual = BoardVisual::build(&SignboardConfig::default()).unwrap();
        let text = &visual.text;
        assert_eq!(text.canvas_width, 2560);
        assert_eq!(text.canvas_height, 1280);
        assert!((text.font_px - 1228.8).abs() < 1e-2);
        assert_eq!(text.lines.len(), 1);
        assert_eq!(text.lines[0].x, 1280.0);
        let expected_y = (1280.0 - text.line_height_px) / 2.0;
        assert!((text.lines[0].y - expected_y).abs() < 1e-3);
    }

    #[test]
    fn test_multiline_left_top_layout() {
        let mut config = SignboardConfig::default();
        config.text.content = "Alpha\nBeta\nGamma".to_string();
        config.text.align = TextAlign::Left;
        config.text.vertical_align = VerticalAlign::Top;
        config.text.font_size = 10.0;
        let text = BoardVisual::build(&config).unwrap().text;
        let padding = 20.0 * PIXELS_PER_UNIT / 10.0;
        assert_eq!(text.lines.len(), 3);
        assert!(text.lines.iter().all(|l| l.x == padding));
        assert_eq!(text.lines[0].y, padding);
        assert!((text.lines[2].y - (padding + 2.0 * text.line_height_px)).abs() < 1e-3);
    }

    #[test]
    fn test_style_materials() {
        let mut config = SignboardConfig::default();
        config.style = BoardStyle::Neon;
        let neon = BoardVisual::build(&config).unwrap().material;
        assert_eq!(neon.emissive, neon.color);
        assert_eq!(neon.emissive_intensity, 0.5);

        config.style = BoardStyle::Minimal;
        let minimal = BoardVisual::build(&config).unwrap().material;
        assert!(!minimal.lit);
        assert!((minimal.opacity - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_border_and_glow_shells() {
        let mut config = SignboardConfig::default();
        config.effects.glow = true;
        config.border.style = BorderStyle::Neon;
        let visual = BoardVisual::build(&config).unwrap();
        let border = visual.border.unwrap();
        assert!((border.size - Vec3::new(10.2, 5.2, 0.7)).length() < 1e-5);
        assert!(border.unlit);
        let glow = visual.glow.unwrap();
        assert!((glow.size - Vec3::new(11.0, 5.5, 0.55)).length() < 1e-5);
        assert!((glow.opacity - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_pulse_modulates_glow() {
        let mut config = SignboardConfig::default();
        config.effects.glow = true;
        let mut visual = BoardVisual::build(&config).unwrap();
        visual.apply_pulse(0.0);
        assert!((visual.glow.unwrap().opacity - 0.075).abs() < 1e-6);
        assert!((visual.material.emissive_intensity - 0.3).abs() < 1e-6);
        visual.apply_pulse(1.0);
        assert!((visual.glow.unwrap().opacity - 0.15).abs() < 1e-6);
        assert!((visual.material.emissive_intensity - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_stand_variants() {
        let mut config = SignboardConfig::default();
        assert!(BoardVisual::build(&config).unwrap().stand.is_empty());

        config.stand.enabled = true;
        let single = BoardVisual::build(&config).unwrap().stand;
        assert_eq!(single.len(), 2);
        assert_eq!(single[0].position.y, -5.0);
        assert_eq!(single[1].position.y, -7.75);

        config.stand.kind = StandKind::Double;
        assert_eq!(BoardVisual::build(&config).unwrap().stand.len(), 4);

        config.stand.kind = StandKind::Tripod;
        let tripod = BoardVisual::build(&config).unwrap().stand;
        assert_eq!(tripod.len(), 3);
        assert!(tripod.iter().all(|p| p.kind == StandPartKind::Pole));
        assert!((tripod[0].position.x - 2.5).abs() < 1e-5);
    }
}
