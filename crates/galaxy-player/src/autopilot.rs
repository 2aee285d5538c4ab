//! Autopilot state machine: travel toward a target point until within the
//! arrival distance.
//!
//! Every way out of the active state (arrival, manual input, explicit
//! cancel) is idempotent. Arrival is reported exactly once.

use glam::Vec3;
use tracing::{debug, info};

use galaxy_events::{EventQueue, GalaxyEvent};
use galaxy_math::REFERENCE_FPS;

/// Outcome of one autopilot tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AutopilotStep {
    /// Not active; nothing to do.
    Idle,
    /// Move by `delta` this tick while facing `target`.
    Travel { delta: Vec3, target: Vec3 },
    /// Reached `target` this tick.
    Arrived { target: Vec3 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Autopilot {
    active: bool,
    target: Option<Vec3>,
    /// Fraction of the flight speed travelled per 1/60 s.
    speed_factor: f32,
    arrival_distance: f32,
}

impl Autopilot {
    #[must_use]
    pub fn new(speed_factor: f32, arrival_distance: f32) -> Self {
        Self {
            active: false,
            target: None,
            speed_factor,
            arrival_distance,
        }
    }

    /// Stores `target` and engages.
    pub fn set_target(&mut self, target: Vec3, events: &mut EventQueue) {
        self.target = Some(target);
        self.active = true;
        info!(?target, "Autopilot engaged");
        events.send(GalaxyEvent::AutopilotStarted { target });
    }

    /// Flips between engaged and stopped. Re-engaging reuses the stored
    /// target; with none stored the autopilot stays off.
    pub fn toggle(&mut self, events: &mut EventQueue) {
        if self.active {
            self.cancel(events);
        } else if let Some(target) = self.target {
            self.active = true;
            info!(?target, "Autopilot resumed");
            events.send(GalaxyEvent::AutopilotStarted { target });
        }
    }

    /// Disengages. Returns `true` and emits `AutopilotStopped` only when the
    /// autopilot was active.
    pub fn cancel(&mut self, events: &mut EventQueue) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        info!("Autopilot stopped");
        events.send(GalaxyEvent::AutopilotStopped);
        true
    }

    /// Advances the state machine from `position`.
    ///
    /// `flight_speed` is the controller's base speed in units per second; the
    /// travel distance per 1/60 s is `flight_speed * speed_factor`.
    pub fn step(
        &mut self,
        dt: f32,
        position: Vec3,
        flight_speed: f32,
        events: &mut EventQueue,
    ) -> AutopilotStep {
        if !self.active {
            return AutopilotStep::Idle;
        }
        let Some(target) = self.target else {
            debug!("Autopilot active without a target, disengaging");
            self.active = false;
            return AutopilotStep::Idle;
        };

        let to_target = target - position;
        let distance = to_target.length();
        if distance < self.arrival_distance {
            self.active = false;
            info!(?target, "Autopilot arrived");
            events.send(GalaxyEvent::AutopilotArrived { target });
            return AutopilotStep::Arrived { target };
        }

        let travel = flight_speed * self.speed_factor * dt * REFERENCE_FPS;
        let delta = to_target.normalize_or_zero() * travel.min(distance);
        AutopilotStep::Travel { delta, target }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    #[must_use]
    pub fn arrival_distance(&self) -> f32 {
        self.arrival_distance
    }
}
