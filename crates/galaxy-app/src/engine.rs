//! The composition root. Owns every subsystem and runs them in a fixed order
//! each tick, passing references explicitly instead of through globals.
//!
//! Tick order:
//!
//! 1. swap the event buffers
//! 2. adaptive frame skip (skipped deltas carry into the next tick)
//! 3. effect level from the performance monitor
//! 4. flight and autopilot, which move the ship
//! 5. ship animation
//! 6. camera, which reads the ship
//! 7. solar system and starfield
//! 8. weapons advance and collide against the signboard targets
//! 9. hit routing: content lookup, panel toggle, camera shake
//! 10. signboard animation, which reads the camera
//! 11. render budget, clear input transients and record the frame
//!
//! Stages 4 to 10 are fault-contained: a failing stage is logged, its
//! subsystem restored to the last good state, and the frame goes on.
//!
//! The performance monitor and the frame skipper run on real frame time,
//! fed once per rendered frame through [`Engine::record_frame_time`].
//! Simulated time only drives motion and animation.

use glam::Vec3;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

use galaxy_config::Config;
use galaxy_content::{ContentProvider, build_panel_payload};
use galaxy_events::{CameraMode, EventQueue, GalaxyEvent, TargetId};
use galaxy_input::{InputEvent, InputState};
use galaxy_math::Transform;
use galaxy_perf::{AdaptiveRenderer, PerformanceMonitor};
use galaxy_player::{CameraController, ControlCommand, FlightController, Spaceship};
use galaxy_signboards::SignboardSystem;
use galaxy_space::{SolarSystem, Starfield};
use galaxy_weapons::{Hit, WeaponSystem};

use crate::error::{FrameError, Stage};
use crate::world::World;

/// Autopilot destination relative to a clicked signboard.
pub const SIGNBOARD_APPROACH: Vec3 = Vec3::new(0.0, 12.0, 26.0);
/// Autopilot destination relative to a planet.
pub const PLANET_APPROACH: Vec3 = Vec3::new(0.0, 50.0, 50.0);
/// Free-camera flight time to a planet, and the time to swing the view.
const PLANET_TRANSITION: (f32, f32) = (2.0, 1.0);
/// Shake added to the camera for every bolt that strikes a target.
pub const HIT_SHAKE: f32 = 1.5;

// Triangle estimates per mesh for the render budget.
const SPHERE_TRIS: u32 = 960;
const BOX_TRIS: u32 = 12;
const BOLT_TRIS: u32 = 32;

/// What the renderer would draw for one completed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRecord {
    pub frame: u64,
    pub elapsed: f64,
    pub ship: Transform,
    pub camera: Transform,
    pub bolts: usize,
    pub open_panels: usize,
}

pub struct Engine {
    input: InputState,
    flight: FlightController,
    ship: Spaceship,
    camera: CameraController,
    weapons: WeaponSystem,
    signboards: SignboardSystem,
    solar: SolarSystem,
    starfield: Starfield,
    perf: PerformanceMonitor,
    adaptive: AdaptiveRenderer,
    content: Box<dyn ContentProvider>,
    events: EventQueue,
    rng: ChaCha8Rng,

    elapsed: f64,
    /// Real milliseconds across every recorded frame.
    real_ms: f64,
    over_budget: bool,
    skipped_dt: f32,
    frames: u64,
    faults: u64,
    pending_hits: Vec<Hit>,
    last_good_ship: Transform,
    last_good_camera: Transform,
    last_frame: Option<FrameRecord>,
}

impl Engine {
    #[must_use]
    pub fn new(config: &Config, world: World) -> Self {
        let World {
            ship,
            solar,
            starfield,
            signboards,
            content,
            rng,
        } = world;

        let mut flight = FlightController::new(&config.flight);
        flight.attach_ship(&ship);
        let camera = CameraController::new(&config.camera, config.window.width, config.window.height);
        let weapons = WeaponSystem::new(&config.weapons);

        info!(
            signboards = signboards.len(),
            pool_size = config.weapons.pool_size,
            "Engine ready"
        );
        Self {
            input: InputState::new(),
            flight,
            last_good_ship: *ship.transform(),
            last_good_camera: *camera.transform(),
            ship,
            camera,
            weapons,
            signboards,
            solar,
            starfield,
            perf: PerformanceMonitor::new(&config.performance),
            adaptive: AdaptiveRenderer::new(&config.performance),
            content,
            events: EventQueue::new(),
            rng,
            elapsed: 0.0,
            real_ms: 0.0,
            over_budget: false,
            skipped_dt: 0.0,
            frames: 0,
            faults: 0,
            pending_hits: Vec::new(),
            last_frame: None,
        }
    }

    // ── Input ──

    /// Routes one raw input event. Everything but a resize is dropped while
    /// the controls are disabled.
    pub fn handle_input(&mut self, event: &InputEvent) {
        if let InputEvent::Resized { width, height } = *event {
            self.resize(width, height);
            return;
        }
        if !self.flight.is_enabled() {
            trace!(?event, "Input ignored, controls disabled");
            return;
        }
        self.input.apply(event);
        if let Some(command) = self.flight.handle_event(event, &mut self.input, &mut self.events) {
            self.apply_command(command);
        }
    }

    fn apply_command(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::ToggleCamera => {
                self.camera.toggle_mode(Some(&mut self.ship), &mut self.events);
            }
            ControlCommand::SwitchWeapon => {
                self.weapons.switch_weapon(&mut self.events);
            }
            ControlCommand::Fire => {
                self.fire();
            }
        }
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        self.camera.set_mode(mode, Some(&mut self.ship), &mut self.events);
    }

    pub fn set_controls_enabled(&mut self, enabled: bool) {
        self.flight.set_enabled(enabled);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
        self.events.send(GalaxyEvent::Resized { width, height });
    }

    // ── Commands ──

    /// Fires the current weapon. Aims along the camera in mouse-flight so
    /// the crosshair hits what it covers, along the ship's nose otherwise.
    pub fn fire(&mut self) -> usize {
        let now = self.now();
        let aim = if self.flight.is_mouse_flight() {
            self.camera.direction()
        } else {
            self.ship.forward()
        };
        self.weapons.fire(now, self.ship.transform(), aim, &mut self.events)
    }

    /// Turns the ship toward `point` and fires along its nose.
    pub fn fire_at(&mut self, point: Vec3) -> usize {
        if self.ship.look_at(point) {
            self.flight.attach_ship(&self.ship);
            self.last_good_ship = *self.ship.transform();
        }
        let now = self.now();
        let aim = self.ship.forward();
        self.weapons.fire(now, self.ship.transform(), aim, &mut self.events)
    }

    /// Sends the autopilot to a viewing spot in front of a signboard.
    pub fn click_signboard(&mut self, target: TargetId) -> bool {
        let Some(board) = self.signboards.board(target) else {
            warn!(target_id = %target, "Autopilot request for unknown signboard");
            return false;
        };
        let destination = board.base_position() + SIGNBOARD_APPROACH;
        self.flight.set_autopilot_target(destination, &mut self.events);
        true
    }

    /// Heads for a viewing spot above a planet. Names match
    /// case-insensitively. The free camera glides there on its own; in the
    /// ship-bound views the autopilot flies the ship.
    pub fn navigate_to_planet(&mut self, name: &str) -> bool {
        let Some(planet) = self.solar.planet_by_name(name) else {
            warn!(name, "Navigation request for unknown planet");
            return false;
        };
        let planet = planet.position();
        let destination = planet + PLANET_APPROACH;
        if self.camera.mode() == CameraMode::Free {
            let (fly, swing) = PLANET_TRANSITION;
            self.camera.transition_to(destination, fly);
            self.camera.look_at_smooth(planet, swing);
            debug!(name, "Free camera heading for planet");
        } else {
            self.flight.set_autopilot_target(destination, &mut self.events);
        }
        true
    }

    // ── Tick ──

    /// Records one rendered frame that took `frame_ms` real milliseconds.
    ///
    /// Feeds the performance monitor, then the frame skipper and the
    /// starfield with the resulting frame rate. Call once per rendered
    /// frame, however many ticks it ran.
    pub fn record_frame_time(&mut self, frame_ms: f64) {
        if !frame_ms.is_finite() || frame_ms < 0.0 {
            warn!(frame_ms, "Invalid frame time, ignoring");
            return;
        }
        self.real_ms += frame_ms;
        if let Some(low_power) = self.perf.update(self.real_ms) {
            self.events.send(GalaxyEvent::QualityChanged { low_power });
        }
        let fps = self.perf.fps();
        self.adaptive.maybe_adjust(self.real_ms, fps);
        self.starfield.maybe_adjust(self.real_ms, fps);
    }

    /// Runs one frame of `dt` seconds. Returns `false` when the adaptive
    /// renderer skipped it.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.events.swap();
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!(dt, "Invalid frame delta, treating as zero");
            0.0
        };

        if self.adaptive.should_skip_frame() {
            self.skipped_dt += dt;
            trace!(carried = self.skipped_dt, "Frame skipped");
            return false;
        }
        let dt = dt + std::mem::take(&mut self.skipped_dt);
        self.elapsed += f64::from(dt);

        let reduce = self.reduces_effects();
        self.signboards.set_reduced_effects(reduce);
        self.camera.set_reduced_motion(reduce);

        for stage in Stage::ALL {
            if let Err(e) = self.run_stage(stage, dt) {
                self.faults += 1;
                warn!(%stage, error = %e, "Frame stage failed, continuing");
            }
        }

        self.update_budget();
        self.input.clear_transients();
        self.record_frame();
        true
    }

    /// Decorative effects are dropped in low-power mode, under a
    /// reduced-motion preference, and while the last frame ran over budget.
    fn reduces_effects(&self) -> bool {
        self.perf.should_reduce_effects() || self.perf.is_over_budget()
    }

    /// Estimates what the renderer would draw for this tick and hands the
    /// counts to the performance monitor.
    fn update_budget(&mut self) {
        let bodies = 1 + self.solar.planets().len() as u32;
        let bolts = self.weapons.bolts().len() as u32;
        let boards = self.signboards.mesh_count();
        let draw_calls = 1 + bodies + bolts + boards;
        let triangles = bodies * SPHERE_TRIS + bolts * BOLT_TRIS + boards * BOX_TRIS;
        self.perf.update_budget(draw_calls, triangles);

        let over = self.perf.is_over_budget();
        if over != self.over_budget {
            if over {
                warn!(draw_calls, triangles, "Render budget exceeded, reducing effects");
            } else {
                info!(draw_calls, triangles, "Render budget back within limits");
            }
            self.over_budget = over;
        }
    }

    fn run_stage(&mut self, stage: Stage, dt: f32) -> Result<(), FrameError> {
        match stage {
            Stage::Flight => {
                self.flight.update(
                    dt,
                    &self.input,
                    Some(&mut self.ship),
                    &mut self.camera,
                    &mut self.events,
                );
                self.check_ship(stage)
            }
            Stage::Ship => {
                let now = self.now();
                self.ship.update(dt, now);
                self.check_ship(stage)
            }
            Stage::Camera => {
                self.camera.update(dt, Some(&self.ship), &mut self.rng);
                self.check_camera(stage)
            }
            Stage::Bodies => {
                self.solar.update(dt);
                let reduce = self.reduces_effects();
                self.starfield.update(dt, self.perf.fps(), reduce);
                Ok(())
            }
            Stage::Weapons => {
                let now = self.now();
                let hits = self
                    .weapons
                    .update(dt, now, &mut self.signboards, &mut self.events)?;
                self.pending_hits = hits;
                Ok(())
            }
            Stage::Hits => self.route_hits(),
            Stage::Signboards => {
                self.signboards.update(dt, self.camera.position());
                Ok(())
            }
        }
    }

    fn check_ship(&mut self, stage: Stage) -> Result<(), FrameError> {
        if self.ship.transform().is_finite() {
            self.last_good_ship = *self.ship.transform();
            return Ok(());
        }
        self.ship.set_position(self.last_good_ship.position);
        self.ship.set_rotation(self.last_good_ship.rotation);
        self.flight.attach_ship(&self.ship);
        self.flight.cancel_autopilot(&mut self.events);
        Err(FrameError::NonFinite { stage })
    }

    fn check_camera(&mut self, stage: Stage) -> Result<(), FrameError> {
        if self.camera.transform().is_finite() {
            self.last_good_camera = *self.camera.transform();
            return Ok(());
        }
        self.camera.set_position(self.last_good_camera.position);
        self.camera.set_rotation(self.last_good_camera.rotation);
        Err(FrameError::NonFinite { stage })
    }

    /// Turns this tick's hits into camera shake and panel toggles. Every hit
    /// is routed even when an earlier one fails; the first failure is
    /// returned.
    fn route_hits(&mut self) -> Result<(), FrameError> {
        let mut failure = None;
        for hit in std::mem::take(&mut self.pending_hits) {
            self.camera.add_shake(HIT_SHAKE);
            if let Err(e) = self.route_hit(&hit) {
                failure.get_or_insert(e);
            }
        }
        failure.map_or(Ok(()), Err)
    }

    fn route_hit(&mut self, hit: &Hit) -> Result<(), FrameError> {
        let Some(action) = &hit.action else {
            return Ok(());
        };
        let Some(payload) = build_panel_payload(action, self.content.as_ref()) else {
            debug!(target_id = %hit.target, kind = action.kind(), "No content for action, ignoring hit");
            return Ok(());
        };
        let position = self
            .signboards
            .board(hit.target)
            .map_or(hit.position, |board| board.transform().position);
        self.events.send(GalaxyEvent::PanelToggleRequested {
            target: hit.target,
            position,
            payload: Box::new(payload.clone()),
        });
        self.signboards
            .toggle_panel(hit.target, payload, &mut self.events)?;
        Ok(())
    }

    fn record_frame(&mut self) {
        self.frames += 1;
        let open_panels = self
            .signboards
            .boards()
            .iter()
            .filter(|b| b.panel().is_some())
            .count();
        self.last_frame = Some(FrameRecord {
            frame: self.frames,
            elapsed: self.elapsed,
            ship: *self.ship.transform(),
            camera: *self.camera.transform(),
            bolts: self.weapons.bolts().len(),
            open_panels,
        });
    }

    fn now(&self) -> f32 {
        self.elapsed as f32
    }

    // ── Queries ──

    #[must_use]
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    #[must_use]
    pub fn ship(&self) -> &Spaceship {
        &self.ship
    }

    pub fn ship_mut(&mut self) -> &mut Spaceship {
        &mut self.ship
    }

    #[must_use]
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    #[must_use]
    pub fn flight(&self) -> &FlightController {
        &self.flight
    }

    #[must_use]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    #[must_use]
    pub fn weapons(&self) -> &WeaponSystem {
        &self.weapons
    }

    pub fn weapons_mut(&mut self) -> &mut WeaponSystem {
        &mut self.weapons
    }

    #[must_use]
    pub fn signboards(&self) -> &SignboardSystem {
        &self.signboards
    }

    #[must_use]
    pub fn solar(&self) -> &SolarSystem {
        &self.solar
    }

    #[must_use]
    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    #[must_use]
    pub fn perf(&self) -> &PerformanceMonitor {
        &self.perf
    }

    #[must_use]
    pub fn adaptive(&self) -> &AdaptiveRenderer {
        &self.adaptive
    }

    #[must_use]
    pub fn content(&self) -> &dyn ContentProvider {
        self.content.as_ref()
    }

    /// Simulated seconds of every tick that ran.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Real seconds across every recorded frame.
    #[must_use]
    pub fn real_time(&self) -> f64 {
        self.real_ms / 1000.0
    }

    /// Delta carried over from skipped ticks.
    #[must_use]
    pub fn pending_dt(&self) -> f32 {
        self.skipped_dt
    }

    /// Ticks that ran.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Stage failures contained so far.
    #[must_use]
    pub fn faults(&self) -> u64 {
        self.faults
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&FrameRecord> {
        self.last_frame.as_ref()
    }
}
