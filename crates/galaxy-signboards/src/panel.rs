//! Content panel attached above a board after it is shot.

use glam::{Vec2, Vec3};

use galaxy_content::{ACCENT_DEFAULT, PanelPayload};
use galaxy_math::Rgb;

use crate::config::SizeConfig;

const BACKGROUND: u32 = 0x0f1628;
const BACKGROUND_OPACITY: f32 = 0.92;
/// How far the panel floats above the board's top edge.
const LIFT: f32 = 11.0;
/// Border frame margin around the panel plane.
const BORDER_MARGIN: f32 = 0.14;

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub payload: PanelPayload,
    pub size: Vec2,
    /// Center in board space.
    pub local_position: Vec3,
    pub border_size: Vec2,
    pub border_color: Rgb,
    pub background: Rgb,
    pub background_opacity: f32,
}

impl Panel {
    #[must_use]
    pub fn new(board: SizeConfig, payload: PanelPayload) -> Self {
        let size = Vec2::new(
            (board.width * 1.15).max(5.0),
            (board.height * 1.35).max(3.2),
        );
        let border_color = payload
            .accent
            .parse::<Rgb>()
            .or_else(|_| ACCENT_DEFAULT.parse::<Rgb>())
            .unwrap_or(Rgb::WHITE);
        Self {
            size,
            local_position: Vec3::new(0.0, board.height * 0.5 + LIFT, board.depth * 0.5 + 0.02),
            border_size: size + Vec2::splat(BORDER_MARGIN),
            border_color,
            background: Rgb::from_hex(BACKGROUND),
            background_opacity: BACKGROUND_OPACITY,
            payload,
        }
    }
}
