//! Camera controller: first-person, third-person and free views with shake
//! and world bounds.
//!
//! The camera only ever reads the ship's transform. Whatever the mode, the
//! last step of [`CameraController::update`] clamps the position into
//! [`WorldBounds`].

use glam::{Quat, Vec3};
use rand::Rng;
use tracing::info;

use galaxy_config::CameraConfig;
use galaxy_events::{CameraMode, EventQueue, GalaxyEvent};
use galaxy_math::{Easing, Transform, WorldBounds, frame_decay, frame_factor};

use crate::camera_tween::CameraTween;
use crate::spaceship::Spaceship;

/// Below this intensity the shake snaps to zero.
const SHAKE_EPSILON: f32 = 0.01;

/// Decaying positional jitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraShake {
    pub intensity: f32,
    /// Multiplier applied per 1/60 s.
    pub decay: f32,
    pub max: f32,
    /// Jitter applied this frame.
    pub offset: Vec3,
}

impl CameraShake {
    fn step(&mut self, dt: f32, rng: &mut impl Rng) {
        if self.intensity > SHAKE_EPSILON {
            let i = self.intensity;
            self.offset = Vec3::new(
                (rng.random::<f32>() - 0.5) * i,
                (rng.random::<f32>() - 0.5) * i,
                (rng.random::<f32>() - 0.5) * i,
            );
            self.intensity *= frame_decay(self.decay, dt);
        } else {
            self.offset = Vec3::ZERO;
            self.intensity = 0.0;
        }
    }
}

#[derive(Clone, Debug)]
pub struct CameraController {
    transform: Transform,
    mode: CameraMode,
    /// Requested look-at point for the free view.
    target: Vec3,
    /// Smoothed look-at point actually used.
    current_target: Vec3,
    smoothness: f32,
    third_person_offset: Vec3,
    follow_lerp: f32,
    first_person_offset: Vec3,
    bounds: WorldBounds,
    shake: CameraShake,
    /// Shake offset currently added to the free-mode position.
    free_jitter: Vec3,
    reduced_motion: bool,
    fov_degrees: f32,
    near: f32,
    far: f32,
    aspect: f32,
    position_tween: Option<CameraTween>,
    target_tween: Option<CameraTween>,
}

impl CameraController {
    /// Creates a third-person camera at `(0, 50, 200)` looking at the origin.
    #[must_use]
    pub fn new(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut transform = Transform::from_position(Vec3::new(0.0, 50.0, 200.0));
        transform.look_at(Vec3::ZERO, Vec3::Y);
        Self {
            transform,
            mode: CameraMode::ThirdPerson,
            target: Vec3::ZERO,
            current_target: Vec3::ZERO,
            smoothness: config.smoothness,
            // Ship space: +Y is up and +Z is behind the ship.
            third_person_offset: Vec3::new(
                0.0,
                config.third_person_height,
                config.third_person_distance,
            ),
            follow_lerp: config.follow_lerp,
            first_person_offset: Vec3::from_array(config.first_person_offset),
            bounds: WorldBounds::new(
                Vec3::from_array(config.bounds_min),
                Vec3::from_array(config.bounds_max),
                config.max_distance,
            ),
            shake: CameraShake {
                intensity: 0.0,
                decay: config.shake_decay,
                max: config.max_shake,
                offset: Vec3::ZERO,
            },
            free_jitter: Vec3::ZERO,
            reduced_motion: false,
            fov_degrees: config.fov_degrees,
            near: config.near,
            far: config.far,
            aspect: aspect_ratio(width, height),
            position_tween: None,
            target_tween: None,
        }
    }

    // ── Per-frame update ──

    /// Recomputes the view for this frame.
    ///
    /// With a ship in a ship-bound mode the camera follows it; otherwise it
    /// looks at the smoothed free target.
    pub fn update(&mut self, dt: f32, ship: Option<&Spaceship>, rng: &mut impl Rng) {
        self.transform.position -= std::mem::take(&mut self.free_jitter);
        if let Some(tween) = self.position_tween.as_mut() {
            self.transform.position = tween.advance(dt);
            if tween.is_finished() {
                self.position_tween = None;
            }
        }
        if let Some(tween) = self.target_tween.as_mut() {
            self.target = tween.advance(dt);
            if tween.is_finished() {
                self.target_tween = None;
            }
        }

        self.current_target = self
            .current_target
            .lerp(self.target, frame_factor(self.smoothness, dt));
        self.shake.step(dt, rng);

        match (self.mode, ship) {
            (CameraMode::FirstPerson, Some(ship)) => self.follow_first_person(ship),
            (CameraMode::ThirdPerson, Some(ship)) => self.follow_third_person(ship, dt),
            _ => self.update_free(),
        }

        self.transform.position = self.bounds.clamp(self.transform.position);
    }

    fn follow_first_person(&mut self, ship: &Spaceship) {
        let offset = ship.rotation() * self.first_person_offset;
        self.transform.position = ship.position() + offset + self.shake.offset;
        self.transform.rotation = ship.rotation();
    }

    fn follow_third_person(&mut self, ship: &Spaceship, dt: f32) {
        let ideal = ship.position() + ship.rotation() * self.third_person_offset + self.shake.offset;
        self.transform.position = self
            .transform
            .position
            .lerp(ideal, frame_factor(self.follow_lerp, dt));
        let look = ship.position() + ship.forward() * 5.0 + Vec3::new(0.0, 2.0, 0.0);
        self.transform.look_at(look, Vec3::Y);
    }

    /// The shake offset is applied on top of the resting position and
    /// taken off again at the start of the next update, so it never drifts.
    fn update_free(&mut self) {
        self.free_jitter = self.shake.offset;
        self.transform.position += self.free_jitter;
        let look = self.current_target + self.shake.offset;
        self.transform.look_at(look, Vec3::Y);
    }

    // ── Mode ──

    /// Switches between the first- and third-person views. The ship is hidden
    /// in first person so the view is not inside its hull.
    pub fn toggle_mode(&mut self, ship: Option<&mut Spaceship>, events: &mut EventQueue) -> CameraMode {
        self.set_mode(self.mode.toggled(), ship, events);
        self.mode
    }

    /// Sets the mode explicitly. Emits `CameraModeChanged` only on a change.
    pub fn set_mode(&mut self, mode: CameraMode, ship: Option<&mut Spaceship>, events: &mut EventQueue) {
        if let Some(ship) = ship {
            ship.set_visible(mode != CameraMode::FirstPerson);
        }
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        info!(?mode, "Camera mode changed");
        events.send(GalaxyEvent::CameraModeChanged { mode });
    }

    #[must_use]
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    // ── Targets and movement ──

    pub fn set_target(&mut self, target: Vec3) {
        self.target_tween = None;
        self.target = target;
    }

    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    #[must_use]
    pub fn current_target(&self) -> Vec3 {
        self.current_target
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position_tween = None;
        self.free_jitter = Vec3::ZERO;
        self.transform.position = position;
    }

    pub fn move_by(&mut self, delta: Vec3) {
        self.transform.position += delta;
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation.normalize();
    }

    /// Eases the position to `point` over `duration` seconds (cubic in-out).
    pub fn transition_to(&mut self, point: Vec3, duration: f32) {
        self.position_tween = Some(CameraTween::new(
            self.transform.position,
            point,
            duration,
            Easing::EaseInOutCubic,
        ));
    }

    /// Eases the look-at target to `point` over `duration` seconds
    /// (quadratic in-out).
    pub fn look_at_smooth(&mut self, point: Vec3, duration: f32) {
        self.target_tween = Some(CameraTween::new(
            self.target,
            point,
            duration,
            Easing::EaseInOutQuad,
        ));
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.position_tween.is_some() || self.target_tween.is_some()
    }

    // ── Shake ──

    /// Adds shake intensity, capped at the configured maximum. Negative and
    /// non-finite amounts are ignored, as is everything under reduced motion.
    pub fn add_shake(&mut self, amount: f32) {
        if self.reduced_motion || !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.shake.intensity = (self.shake.intensity + amount).min(self.shake.max);
    }

    #[must_use]
    pub fn shake(&self) -> &CameraShake {
        &self.shake
    }

    /// Turns shake off while effects are being reduced. Switching it on
    /// drops any shake in progress.
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        if reduced && !self.reduced_motion {
            self.shake.intensity = 0.0;
        }
        self.reduced_motion = reduced;
    }

    // ── Projection ──

    /// Updates the aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    #[must_use]
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// Near and far clip distances.
    #[must_use]
    pub fn clip(&self) -> (f32, f32) {
        (self.near, self.far)
    }

    // ── Queries ──

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    /// World-space view direction.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        self.transform.forward()
    }

    #[must_use]
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.transform.position.distance(point)
    }

    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    #[must_use]
    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}
