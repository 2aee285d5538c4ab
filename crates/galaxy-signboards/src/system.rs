//! Signboard collection: batch loading, throttled animation, panel toggles,
//! and the target registry seen by the weapon system.

use std::path::Path;

use glam::Vec3;
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, info, warn};

use galaxy_content::{Action, PanelPayload};
use galaxy_events::{EventQueue, GalaxyEvent, TargetId};
use galaxy_weapons::TargetRegistry;

use crate::config::SignboardConfig;
use crate::error::SignboardError;
use crate::signboard::Signboard;

/// Boards animate on every n-th tick; skipped deltas carry over.
const ANIMATION_INTERVAL: u32 = 2;

#[derive(Debug, Default)]
pub struct SignboardSystem {
    boards: Vec<Signboard>,
    next_target: u32,
    /// Simulation time driving every sine wave.
    time: f32,
    frames_since_animation: u32,
    pending_dt: f32,
    reduced_effects: bool,
}

impl SignboardSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Construction ──

    /// Builds and registers one board. Returns its target id, if it has one.
    pub fn add(
        &mut self,
        config: SignboardConfig,
        rng: &mut impl Rng,
    ) -> Result<Option<TargetId>, SignboardError> {
        let id = config.target.enabled.then_some(TargetId(self.next_target));
        let board = Signboard::build(config, id, rng)?;
        if id.is_some() {
            self.next_target += 1;
        }
        self.boards.push(board);
        Ok(id)
    }

    /// Builds every config in order. A config that fails is skipped with a
    /// warning. Returns how many boards were added.
    pub fn load_configs(
        &mut self,
        configs: impl IntoIterator<Item = SignboardConfig>,
        rng: &mut impl Rng,
    ) -> usize {
        let mut loaded = 0;
        for (index, config) in configs.into_iter().enumerate() {
            match self.add(config, rng) {
                Ok(_) => loaded += 1,
                Err(e) => warn!(index, error = %e, "Skipping signboard"),
            }
        }
        info!(loaded, total = self.boards.len(), "Signboards loaded");
        loaded
    }

    /// Loads a JSON array of board configs. Entries that fail to parse or
    /// build are skipped with a warning; only a malformed document is an
    /// error.
    pub fn load_scene_str(&mut self, json: &str, rng: &mut impl Rng) -> Result<usize, SignboardError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Array(entries) = document else {
            return Err(SignboardError::NotAnArray);
        };

        let mut configs = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            match SignboardConfig::deserialize(entry) {
                Ok(config) => configs.push(config),
                Err(e) => warn!(index, error = %e, "Skipping malformed signboard entry"),
            }
        }
        Ok(self.load_configs(configs, rng))
    }

    pub fn load_scene_file(&mut self, path: &Path, rng: &mut impl Rng) -> Result<usize, SignboardError> {
        let json = std::fs::read_to_string(path).map_err(|source| SignboardError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_scene_str(&json, rng)
    }

    /// Drops every board. Target ids are not reused.
    pub fn cleanup(&mut self) {
        debug!(count = self.boards.len(), "Signboards removed");
        self.boards.clear();
    }

    // ── Per frame ──

    /// Advances time by `dt`. Hit flashes decay every tick; board animation
    /// runs every second tick with the accumulated delta. Returns whether
    /// boards were animated.
    pub fn update(&mut self, dt: f32, camera: Vec3) -> bool {
        self.time += dt;
        for target in self.boards.iter_mut().filter_map(Signboard::target_mut) {
            target.tick_flash(dt);
        }

        self.pending_dt += dt;
        self.frames_since_animation += 1;
        if self.frames_since_animation < ANIMATION_INTERVAL {
            return false;
        }
        self.frames_since_animation = 0;
        let step = std::mem::take(&mut self.pending_dt);
        let decorative = !self.reduced_effects;
        for board in &mut self.boards {
            board.animate(step, self.time, camera, decorative);
        }
        true
    }

    /// While set, boards skip their decorative animation.
    pub fn set_reduced_effects(&mut self, reduced: bool) {
        if reduced != self.reduced_effects {
            debug!(reduced, "Signboard effects changed");
        }
        self.reduced_effects = reduced;
    }

    #[must_use]
    pub fn is_reducing_effects(&self) -> bool {
        self.reduced_effects
    }

    /// Meshes across every board.
    #[must_use]
    pub fn mesh_count(&self) -> u32 {
        self.boards.iter().map(Signboard::mesh_count).sum()
    }

    /// Opens a panel on the board owning `target`, or closes it if one is
    /// already open. Sends `PanelToggled` and returns whether it is open.
    pub fn toggle_panel(
        &mut self,
        target: TargetId,
        payload: PanelPayload,
        events: &mut EventQueue,
    ) -> Result<bool, SignboardError> {
        let board = self
            .board_mut(target)
            .ok_or(SignboardError::UnknownTarget(target))?;
        let open = board.toggle_panel(payload);
        info!(%target, open, "Signboard panel toggled");
        events.send(GalaxyEvent::PanelToggled { target, open });
        Ok(open)
    }

    // ── Queries ──

    #[must_use]
    pub fn boards(&self) -> &[Signboard] {
        &self.boards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[must_use]
    pub fn board(&self, target: TargetId) -> Option<&Signboard> {
        self.boards
            .iter()
            .find(|b| b.target().is_some_and(|t| t.id == target))
    }

    fn board_mut(&mut self, target: TargetId) -> Option<&mut Signboard> {
        self.boards
            .iter_mut()
            .find(|b| b.target().is_some_and(|t| t.id == target))
    }

    /// Target ids in registration order.
    #[must_use]
    pub fn target_ids(&self) -> Vec<TargetId> {
        self.boards
            .iter()
            .filter_map(|b| b.target().map(|t| t.id))
            .collect()
    }

    #[must_use]
    pub fn is_panel_open(&self, target: TargetId) -> bool {
        self.board(target).is_some_and(|b| b.panel().is_some())
    }
}

impl TargetRegistry for SignboardSystem {
    fn target_positions(&self) -> Vec<(TargetId, Vec3)> {
        self.boards
            .iter()
            .filter_map(|b| Some((b.target()?.id, b.target_world_position()?)))
            .collect()
    }

    fn action_for(&self, id: TargetId) -> Option<Action> {
        self.board(id)?.target()?.action.clone()
    }

    fn flash(&mut self, id: TargetId, seconds: f32) {
        if let Some(target) = self.board_mut(id).and_then(Signboard::target_mut) {
            target.flash(seconds);
        }
    }
}
