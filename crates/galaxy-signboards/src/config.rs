//! Typed signboard configuration with documented defaults.
//!
//! Every struct is `#[serde(default)]`, so any subset of fields may be given
//! and the rest fall back to [`Default`]. Scene files use camelCase keys,
//! e.g. `{"size": {"width": 12}, "target": {"offsetUp": 1.0}}`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use galaxy_content::Action;
use galaxy_math::Rgb;

use crate::error::SignboardError;

/// A plain `{x, y, z}` triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Xyz {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Xyz {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeConfig {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextConfig {
    /// Newlines split the text into lines.
    pub content: String,
    pub font_size: f32,
    pub font_family: String,
    pub color: String,
    pub align: TextAlign,
    pub vertical_align: VerticalAlign,
    pub line_height: f32,
    pub padding: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardStyle {
    #[default]
    Modern,
    Neon,
    Holographic,
    Classic,
    Minimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    Vertical,
    #[default]
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientConfig {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub direction: GradientDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub color: String,
    pub opacity: f32,
    pub gradient: Option<GradientConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Glow,
    Neon,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderConfig {
    pub enabled: bool,
    pub width: f32,
    pub color: String,
    pub style: BorderStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectsConfig {
    pub glow: bool,
    pub glow_intensity: f32,
    pub glow_color: String,
    pub pulse: bool,
    pub pulse_speed: f32,
    pub particles: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandKind {
    #[default]
    Single,
    Double,
    Tripod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandConfig {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub kind: StandKind,
    pub height: f32,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FloatingConfig {
    pub enabled: bool,
    pub amplitude: f32,
    pub speed: f32,
    pub rot_amp_x: f32,
    pub rot_amp_y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DronesConfig {
    pub enabled: bool,
    pub color: String,
    pub size: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub front_offset: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CablesConfig {
    pub enabled: bool,
    pub color: String,
    pub thickness: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorConfig {
    pub floating: FloatingConfig,
    pub drones: DronesConfig,
    pub cables: CablesConfig,
}

/// How a hit-target marker is oriented each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetOrient {
    #[default]
    FaceCamera,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BobConfig {
    pub speed: f32,
    pub amplitude: f32,
}

/// Linear opacity ramp between `near` and `far` camera distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosshairConfig {
    pub color: Option<String>,
}

/// Shootable marker in front of the board. Ring sizes are fractions of the
/// board's smaller side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetConfig {
    pub enabled: bool,
    pub size: f32,
    pub thickness: f32,
    pub segments: u32,
    pub radial_segments: u32,
    /// Ring color; falls back to the border color.
    pub color: Option<String>,
    pub inner_color: String,
    pub crosshair: Option<CrosshairConfig>,
    /// Distance in front of the board face.
    pub offset: f32,
    /// Height above the board's top edge.
    pub offset_up: f32,
    pub orient: TargetOrient,
    pub spin_speed: f32,
    pub pulse: bool,
    pub base_scale: f32,
    pub pulse_amplitude: f32,
    pub pulse_speed: f32,
    pub bob: Option<BobConfig>,
    pub fade_near: Option<FadeConfig>,
}

/// One signboard as written in a scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignboardConfig {
    pub position: Xyz,
    /// Euler angles in degrees.
    pub rotation: Xyz,
    pub size: SizeConfig,
    pub text: TextConfig,
    pub style: BoardStyle,
    pub background: BackgroundConfig,
    pub border: BorderConfig,
    pub effects: EffectsConfig,
    pub stand: StandConfig,
    pub decor: DecorConfig,
    pub target: TargetConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<Action>,
}

// ── Defaults ──

impl Default for SizeConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 5.0,
            depth: 0.5,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            content: "Sample Text".to_string(),
            font_size: 48.0,
            font_family: "Arial, sans-serif".to_string(),
            color: "#ffffff".to_string(),
            align: TextAlign::Center,
            vertical_align: VerticalAlign::Middle,
            line_height: 1.2,
            padding: 20.0,
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            color: "#1a1a2e".to_string(),
            opacity: 0.9,
            gradient: None,
        }
    }
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 0.2,
            color: "#00d4ff".to_string(),
            style: BorderStyle::Solid,
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            glow: false,
            glow_intensity: 0.5,
            glow_color: "#00d4ff".to_string(),
            pulse: false,
            pulse_speed: 1.0,
            particles: false,
        }
    }
}

impl Default for StandConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: StandKind::Single,
            height: 5.0,
            color: "#666666".to_string(),
        }
    }
}

impl Default for FloatingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            amplitude: 0.25,
            speed: 0.3,
            rot_amp_x: 0.02,
            rot_amp_y: 0.03,
        }
    }
}

impl Default for DronesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: "#00d4ff".to_string(),
            size: 0.6,
            offset_x: 0.8,
            offset_y: 0.8,
            front_offset: 0.3,
        }
    }
}

impl Default for CablesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: "#888888".to_string(),
            thickness: 0.03,
        }
    }
}

impl Default for BobConfig {
    fn default() -> Self {
        Self {
            speed: 1.4,
            amplitude: 0.15,
        }
    }
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            near: 10.0,
            far: 120.0,
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 0.12,
            thickness: 0.025,
            segments: 16,
            radial_segments: 12,
            color: None,
            inner_color: "#ffffff".to_string(),
            crosshair: None,
            offset: 1.6,
            offset_up: 0.6,
            orient: TargetOrient::FaceCamera,
            spin_speed: 1.0,
            pulse: true,
            base_scale: 1.0,
            pulse_amplitude: 0.08,
            pulse_speed: 2.0,
            bob: None,
            fade_near: None,
        }
    }
}

impl Default for SignboardConfig {
    fn default() -> Self {
        Self {
            position: Xyz::default(),
            rotation: Xyz::default(),
            size: SizeConfig::default(),
            text: TextConfig::default(),
            style: BoardStyle::default(),
            background: BackgroundConfig::default(),
            border: BorderConfig::default(),
            effects: EffectsConfig::default(),
            stand: StandConfig::default(),
            decor: DecorConfig::default(),
            target: TargetConfig::default(),
            action: None,
        }
    }
}

// ── Validation ──

pub(crate) fn parse_color(field: &'static str, value: &str) -> Result<Rgb, SignboardError> {
    value.parse().map_err(|_| SignboardError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

fn positive(field: &'static str, value: f32) -> Result<(), SignboardError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SignboardError::InvalidSize { field, value })
    }
}

impl SignboardConfig {
    /// Parses one scene entry.
    pub fn from_json(source: &str) -> Result<Self, SignboardError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Rejects sizes and colors the board cannot be built from.
    pub fn validate(&self) -> Result<(), SignboardError> {
        positive("size.width", self.size.width)?;
        positive("size.height", self.size.height)?;
        positive("size.depth", self.size.depth)?;
        positive("text.fontSize", self.text.font_size)?;
        if self.stand.enabled {
            positive("stand.height", self.stand.height)?;
        }
        if self.target.enabled {
            positive("target.size", self.target.size)?;
            positive("target.thickness", self.target.thickness)?;
        }
        if let Some(fade) = self.target.fade_near
            && !(fade.far > fade.near)
        {
            return Err(SignboardError::InvalidSize {
                field: "target.fadeNear.far",
                value: fade.far,
            });
        }
        for (field, xyz) in [("position", self.position), ("rotation", self.rotation)] {
            if let Some(value) = [xyz.x, xyz.y, xyz.z].into_iter().find(|v| !v.is_finite()) {
                return Err(SignboardError::InvalidSize { field, value });
            }
        }

        parse_color("text.color", &self.text.color)?;
        parse_color("background.color", &self.background.color)?;
        if let Some(gradient) = &self.background.gradient {
            parse_color("background.gradient.from", &gradient.from)?;
            parse_color("background.gradient.to", &gradient.to)?;
        }
        parse_color("border.color", &self.border.color)?;
        parse_color("effects.glowColor", &self.effects.glow_color)?;
        parse_color("stand.color", &self.stand.color)?;
        parse_color("decor.drones.color", &self.decor.drones.color)?;
        parse_color("decor.cables.color", &self.decor.cables.color)?;
        if let Some(color) = &self.target.color {
            parse_color("target.color", color)?;
        }
        parse_color("target.innerColor", &self.target.inner_color)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_full_default() {
        let config = SignboardConfig::from_json("{}").unwrap();
        assert_eq!(config, SignboardConfig::default());
        config.validate().unwrap();
    }

    #[test]
    fn test_position_override_keeps_other_defaults() {
        let config = SignboardConfig::from_json(r#"{"position":{"x":1,"y":2,"z":3}}"#).unwrap();
        let defaults = SignboardConfig::default();
        assert_eq!(config.position, Xyz::new(1.0, 2.0, 3.0));
        assert_eq!(config.size, defaults.size);
        assert_eq!(config.text, defaults.text);
        assert_eq!(config.style, defaults.style);
        assert_eq!(config.border, defaults.border);
        assert_eq!(config.effects, defaults.effects);
    }

    #[test]
    fn test_nested_partial_merges_over_defaults() {
        let config = SignboardConfig::from_json(
            r#"{
                "size": {"width": 14},
                "text": {"content": "Projects\nShowcase", "fontSize": 60},
                "decor": {"drones": {"enabled": false}},
                "target": {"offsetUp": 1.0, "fadeNear": {"far": 90}},
                "stand": {"enabled": true, "type": "tripod"},
                "action": {"type": "skills", "category": "backend"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.size.width, 14.0);
        assert_eq!(config.size.height, 5.0);
        assert_eq!(config.text.font_size, 60.0);
        assert_eq!(config.text.font_family, "Arial, sans-serif");
        assert!(!config.decor.drones.enabled);
        assert!(config.decor.cables.enabled);
        assert_eq!(config.target.offset_up, 1.0);
        assert_eq!(config.target.offset, 1.6);
        assert_eq!(config.target.fade_near, Some(FadeConfig { near: 10.0, far: 90.0 }));
        assert_eq!(config.stand.kind, StandKind::Tripod);
        assert_eq!(config.action, Some(Action::skills("backend")));
    }

    #[test]
    fn test_style_and_orient_names() {
        let config =
            SignboardConfig::from_json(r#"{"style":"holographic","target":{"orient":"horizontal"}}"#)
                .unwrap();
        assert_eq!(config.style, BoardStyle::Holographic);
        assert_eq!(config.target.orient, TargetOrient::Horizontal);
        assert!(SignboardConfig::from_json(r#"{"style":"baroque"}"#).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_size() {
        let mut config = SignboardConfig::default();
        config.size.height = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SignboardError::InvalidSize { field: "size.height", .. })
        ));
        config.size.height = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_color() {
        let mut config = SignboardConfig::default();
        config.border.color = "cyan-ish".to_string();
        assert!(matches!(
            config.validate(),
            Err(SignboardError::InvalidColor { field: "border.color", .. })
        ));
    }
}
