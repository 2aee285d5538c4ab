//! Typed events raised by the simulation core.
//!
//! Every cross-component notification is a [`GalaxyEvent`] variant, collected
//! into an [`EventQueue`] that is double-buffered per frame: events sent
//! during a tick are readable during that tick and the next one.

use std::fmt;

use galaxy_content::{Action, PanelPayload};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Stable handle of a hit target, assigned at world build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u32);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

/// How the camera derives its transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraMode {
    FirstPerson,
    #[default]
    ThirdPerson,
    Free,
}

impl CameraMode {
    /// Next mode in the V-key cycle between the two ship-bound views.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::FirstPerson => CameraMode::ThirdPerson,
            CameraMode::ThirdPerson | CameraMode::Free => CameraMode::FirstPerson,
        }
    }
}

/// The two pooled weapon kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    #[default]
    Laser,
    Projectile,
}

impl WeaponKind {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            WeaponKind::Laser => WeaponKind::Projectile,
            WeaponKind::Projectile => WeaponKind::Laser,
        }
    }
}

/// Everything the core tells the composition layer.
#[derive(Debug, Clone, PartialEq)]
pub enum GalaxyEvent {
    AutopilotStarted { target: Vec3 },
    /// Sent exactly once per journey.
    AutopilotArrived { target: Vec3 },
    AutopilotStopped,
    CameraModeChanged { mode: CameraMode },
    MouseFlightChanged { active: bool },
    WeaponSwitched { kind: WeaponKind },
    WeaponFired { kind: WeaponKind, bolts: usize },
    SignboardHit { target: TargetId, action: Action },
    PanelToggleRequested {
        target: TargetId,
        /// World position of the struck marker.
        position: Vec3,
        payload: Box<PanelPayload>,
    },
    PanelToggled { target: TargetId, open: bool },
    QualityChanged { low_power: bool },
    /// The visitor asked for the classic page mode.
    ModeSwitchRequested,
    Resized { width: u32, height: u32 },
}

/// Double-buffered event storage.
///
/// Call [`swap`](Self::swap) once at the start of every frame.
#[derive(Debug, Default)]
pub struct EventQueue {
    prev: Vec<GalaxyEvent>,
    current: Vec<GalaxyEvent>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&mut self, event: GalaxyEvent) {
        self.current.push(event);
    }

    /// Events from the previous and the current frame, oldest first.
    pub fn read(&self) -> impl Iterator<Item = &GalaxyEvent> {
        self.prev.iter().chain(self.current.iter())
    }

    /// Events sent during the current frame only.
    pub fn read_current(&self) -> impl Iterator<Item = &GalaxyEvent> {
        self.current.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prev.len() + self.current.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops the previous frame; the current frame becomes previous.
    pub fn swap(&mut self) {
        self.prev.clear();
        std::mem::swap(&mut self.prev, &mut self.current);
    }

    pub fn clear(&mut self) {
        self.prev.clear();
        self.current.clear();
    }
}

impl Extend<GalaxyEvent> for EventQueue {
    fn extend<I: IntoIterator<Item = GalaxyEvent>>(&mut self, iter: I) {
        self.current.extend(iter);
    }
}
