//! Flight controller: turns keyboard, pointer and touch input into ship or
//! free-camera motion, and drives the autopilot.
//!
//! Orientation has a single source of truth: the tracked target angles.
//! Input only ever edits the target; each tick the rendered orientation is
//! derived from it through [`OrientationResolver`], which interpolates yaw
//! along the shorter arc. The tracked yaw is kept wrapped into `[-π, π]` so
//! the two representations cannot drift apart.
//!
//! Bindings:
//!
//! | Input | Effect |
//! |---|---|
//! | W / ↑, S / ↓ | forward, backward (half speed) |
//! | A / ←, D / → | yaw (normal), strafe (right button held or mouse-flight) |
//! | E, Q | up, down |
//! | Shift | turbo; with A/D in mouse-flight, roll |
//! | Space | toggle autopilot |
//! | V | toggle camera view |
//! | M, Escape | toggle / leave mouse-flight |
//! | Tab | switch weapon |
//! | G | request the classic page |
//! | Left button | fire; enters mouse-flight |

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use glam::{Vec2, Vec3};
use tracing::{debug, info};

use galaxy_config::FlightConfig;
use galaxy_events::{CameraMode, EventQueue, GalaxyEvent};
use galaxy_input::{ElementState, InputEvent, InputState, KeyCode, MouseButton};
use galaxy_math::{
    EulerAngles, OrientationResolver, frame_decay, frame_factor, looking_at, normalize_angle,
};

use crate::autopilot::{Autopilot, AutopilotStep};
use crate::camera::CameraController;
use crate::spaceship::Spaceship;

const FORWARD_KEYS: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
const BACKWARD_KEYS: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
const LEFT_KEYS: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
const UP_KEYS: [KeyCode; 1] = [KeyCode::KeyE];
const DOWN_KEYS: [KeyCode; 1] = [KeyCode::KeyQ];

/// Roll below this magnitude snaps to level.
const ROLL_EPSILON: f32 = 0.0005;

/// Actions the controller cannot perform itself because they belong to
/// another subsystem. The engine applies them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlCommand {
    ToggleCamera,
    SwitchWeapon,
    Fire,
}

#[derive(Clone, Debug)]
pub struct FlightController {
    enabled: bool,
    settings: FlightConfig,
    resolver: OrientationResolver,
    tracked: EulerAngles,
    mouse_flight: bool,
    autopilot: Autopilot,
}

impl FlightController {
    #[must_use]
    pub fn new(settings: &FlightConfig) -> Self {
        Self {
            enabled: true,
            settings: settings.clone(),
            resolver: OrientationResolver::new(settings.orientation_factor),
            tracked: EulerAngles::default(),
            mouse_flight: false,
            autopilot: Autopilot::new(settings.autopilot_speed, settings.autopilot_arrival_distance),
        }
    }

    /// Seeds the tracked angles from the ship's current orientation.
    pub fn attach_ship(&mut self, ship: &Spaceship) {
        let e = ship.euler();
        self.tracked = EulerAngles::new(normalize_angle(e.yaw), e.pitch, e.roll);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            debug!(enabled, "Flight controls toggled");
        }
        self.enabled = enabled;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    // ── Event handling ──

    /// Reacts to a discrete input event that has already been folded into
    /// `input`. Ignored entirely while disabled.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        input: &mut InputState,
        events: &mut EventQueue,
    ) -> Option<ControlCommand> {
        if !self.enabled {
            return None;
        }
        match *event {
            InputEvent::Key {
                key,
                state: ElementState::Pressed,
                repeat: false,
            } => self.on_key_down(key, input, events),
            InputEvent::PointerButton {
                button: MouseButton::Left,
                state: ElementState::Pressed,
            } => {
                if !self.mouse_flight {
                    self.set_mouse_flight(true, input, events);
                }
                Some(ControlCommand::Fire)
            }
            InputEvent::FocusLost => {
                self.set_mouse_flight(false, input, events);
                None
            }
            _ => None,
        }
    }

    fn on_key_down(
        &mut self,
        key: KeyCode,
        input: &mut InputState,
        events: &mut EventQueue,
    ) -> Option<ControlCommand> {
        match key {
            KeyCode::KeyW
            | KeyCode::ArrowUp
            | KeyCode::KeyS
            | KeyCode::ArrowDown
            | KeyCode::KeyA
            | KeyCode::ArrowLeft
            | KeyCode::KeyD
            | KeyCode::ArrowRight
            | KeyCode::KeyQ
            | KeyCode::KeyE => {
                self.autopilot.cancel(events);
                None
            }
            KeyCode::Space => {
                self.autopilot.toggle(events);
                None
            }
            KeyCode::KeyV => Some(ControlCommand::ToggleCamera),
            KeyCode::Tab => Some(ControlCommand::SwitchWeapon),
            KeyCode::KeyM => {
                let active = !self.mouse_flight;
                self.set_mouse_flight(active, input, events);
                None
            }
            KeyCode::Escape => {
                self.set_mouse_flight(false, input, events);
                None
            }
            KeyCode::KeyG => {
                info!("Classic mode requested");
                events.send(GalaxyEvent::ModeSwitchRequested);
                None
            }
            _ => None,
        }
    }

    /// Enters or leaves mouse-flight. Pointer capture follows synchronously.
    pub fn set_mouse_flight(&mut self, active: bool, input: &mut InputState, events: &mut EventQueue) {
        if self.mouse_flight == active {
            return;
        }
        self.mouse_flight = active;
        input.mouse.set_captured(active);
        info!(active, "Mouse-flight changed");
        events.send(GalaxyEvent::MouseFlightChanged { active });
    }

    // ── Per-frame update ──

    /// Advances flight by `dt` seconds.
    ///
    /// Flies the ship when there is one and the camera is ship-bound,
    /// otherwise moves the free camera. An active autopilot replaces manual
    /// movement.
    pub fn update(
        &mut self,
        dt: f32,
        input: &InputState,
        ship: Option<&mut Spaceship>,
        camera: &mut CameraController,
        events: &mut EventQueue,
    ) {
        if !self.enabled {
            return;
        }
        self.apply_look(input);

        let ship = ship.filter(|_| camera.mode() != CameraMode::Free);
        if self.autopilot.is_active() {
            self.run_autopilot(dt, ship, camera, events);
        } else if let Some(ship) = ship {
            self.fly_ship(dt, input, ship);
        } else {
            self.fly_free_camera(dt, input, camera);
        }
    }

    /// Folds this frame's pointer and touch motion into the tracked angles.
    /// Screen-up motion (negative y) pitches the nose up.
    fn apply_look(&mut self, input: &InputState) {
        let s = &self.settings;
        let mouse = input.mouse.delta();
        if self.mouse_flight {
            let d = clamp_delta(mouse, s.mouse_flight_max_delta);
            self.tracked.yaw -= d.x * s.mouse_sensitivity;
            self.tracked.pitch = (self.tracked.pitch - d.y * s.mouse_sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
        } else if input.mouse.is_button_pressed(MouseButton::Right) {
            let d = clamp_delta(mouse, s.drag_max_delta);
            let sens = s.mouse_sensitivity * s.drag_sensitivity_scale;
            self.tracked.yaw -= d.x * sens;
            self.tracked.pitch = (self.tracked.pitch - d.y * sens).clamp(-FRAC_PI_3, FRAC_PI_3);
        }

        let touch = input.touch.delta();
        if touch != Vec2::ZERO {
            let d = clamp_delta(touch, s.mouse_flight_max_delta);
            let sens = s.touch_sensitivity * s.touch_gain;
            self.tracked.yaw -= d.x * sens;
            self.tracked.pitch = (self.tracked.pitch - d.y * sens).clamp(-FRAC_PI_2, FRAC_PI_2);
        }
        self.tracked.yaw = normalize_angle(self.tracked.yaw);
    }

    fn fly_ship(&mut self, dt: f32, input: &InputState, ship: &mut Spaceship) {
        let next = self.resolver.resolve(ship.euler(), self.tracked, dt);
        ship.set_rotation(next.to_quat());

        let kb = &input.keyboard;
        let speed = self.speed(input) * dt;
        let shift = kb.shift();
        let (left, right) = (kb.any_pressed(&LEFT_KEYS), kb.any_pressed(&RIGHT_KEYS));
        let (up, down) = (kb.any_pressed(&UP_KEYS), kb.any_pressed(&DOWN_KEYS));
        let (forward_axis, right_axis, up_axis) = (ship.forward(), ship.right(), ship.up());

        let mut motion = Vec3::ZERO;
        if kb.any_pressed(&FORWARD_KEYS) {
            motion += forward_axis * speed;
        }
        if kb.any_pressed(&BACKWARD_KEYS) {
            motion -= forward_axis * speed * 0.5;
        }

        let rolling = self.mouse_flight && shift && (left || right);
        if self.mouse_flight {
            if !shift {
                motion += right_axis * strafe(left, right) * speed * 0.7;
            }
            // World up, so climbing does not depend on the ship's pitch.
            motion += Vec3::Y * strafe(down, up) * speed * 0.8;
            if rolling {
                self.tracked.roll += strafe(right, left) * dt * self.settings.rotation_speed;
            }
        } else {
            let strafing = input.mouse.is_button_pressed(MouseButton::Right);
            if strafing {
                motion += right_axis * strafe(left, right) * speed * 0.7;
            } else {
                self.tracked.yaw += strafe(right, left) * dt * self.settings.rotation_speed;
                self.tracked.yaw = normalize_angle(self.tracked.yaw);
            }
            motion += up_axis * strafe(down, up) * speed * 0.8;
        }

        if !rolling {
            self.tracked.roll *= frame_decay(self.settings.roll_damping, dt);
            if self.tracked.roll.abs() < ROLL_EPSILON {
                self.tracked.roll = 0.0;
            }
        }
        ship.translate(motion);
    }

    fn fly_free_camera(&mut self, dt: f32, input: &InputState, camera: &mut CameraController) {
        let kb = &input.keyboard;
        let speed = self.speed(input) * dt;
        let forward = camera.direction();
        let right = forward.cross(Vec3::Y).normalize_or_zero();

        let mut motion = Vec3::ZERO;
        motion += forward * strafe(kb.any_pressed(&BACKWARD_KEYS), kb.any_pressed(&FORWARD_KEYS)) * speed;
        motion += right * strafe(kb.any_pressed(&LEFT_KEYS), kb.any_pressed(&RIGHT_KEYS)) * speed;
        motion += Vec3::Y * strafe(kb.any_pressed(&DOWN_KEYS), kb.any_pressed(&UP_KEYS)) * speed;
        camera.move_by(motion);

        if !self.mouse_flight && input.mouse.is_button_pressed(MouseButton::Right) {
            let look = EulerAngles::new(self.tracked.yaw, self.tracked.pitch, 0.0).to_quat() * Vec3::NEG_Z;
            camera.set_target(camera.position() + look * 100.0);
        }
    }

    fn run_autopilot(
        &mut self,
        dt: f32,
        ship: Option<&mut Spaceship>,
        camera: &mut CameraController,
        events: &mut EventQueue,
    ) {
        let position = ship.as_ref().map_or_else(|| camera.position(), |s| s.position());
        let AutopilotStep::Travel { delta, target } =
            self.autopilot.step(dt, position, self.settings.speed, events)
        else {
            return;
        };
        match ship {
            Some(ship) => {
                ship.translate(delta);
                if let Some(look) = looking_at(ship.position(), target, Vec3::Y) {
                    let t = frame_factor(self.settings.autopilot_turn_rate, dt);
                    ship.set_rotation(ship.rotation().slerp(look, t));
                }
                self.attach_ship(ship);
            }
            None => camera.move_by(delta),
        }
        camera.set_target(target);
    }

    // ── Autopilot ──

    pub fn set_autopilot_target(&mut self, target: Vec3, events: &mut EventQueue) {
        self.autopilot.set_target(target, events);
    }

    /// Idempotent; see [`Autopilot::cancel`].
    pub fn cancel_autopilot(&mut self, events: &mut EventQueue) -> bool {
        self.autopilot.cancel(events)
    }

    #[must_use]
    pub fn autopilot(&self) -> &Autopilot {
        &self.autopilot
    }

    #[must_use]
    pub fn is_autopilot_active(&self) -> bool {
        self.autopilot.is_active()
    }

    // ── Queries ──

    /// Base speed in units per second, with turbo while Shift is held.
    #[must_use]
    pub fn speed(&self, input: &InputState) -> f32 {
        if input.keyboard.shift() {
            self.settings.speed * self.settings.turbo_multiplier
        } else {
            self.settings.speed
        }
    }

    #[must_use]
    pub fn is_mouse_flight(&self) -> bool {
        self.mouse_flight
    }

    /// Target orientation the ship is converging toward.
    #[must_use]
    pub fn tracked(&self) -> EulerAngles {
        self.tracked
    }

    /// Overrides the target orientation.
    pub fn set_tracked(&mut self, angles: EulerAngles) {
        self.tracked = EulerAngles::new(normalize_angle(angles.yaw), angles.pitch, angles.roll);
    }
}

/// `+1` when only `positive` is held, `-1` when only `negative` is.
fn strafe(negative: bool, positive: bool) -> f32 {
    f32::from(u8::from(positive)) - f32::from(u8::from(negative))
}

fn clamp_delta(delta: Vec2, max: f32) -> Vec2 {
    delta.clamp(Vec2::splat(-max), Vec2::splat(max))
}
