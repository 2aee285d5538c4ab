//! Weapon system: fires pooled bolts, advances them, and resolves hits.
//!
//! Per tick every bolt moves by `velocity * dt`. A bolt past its lifetime is
//! recycled without being hit-tested. Otherwise the segment it travelled this
//! tick is tested against the registered targets in registration order and
//! the first one within the hit radius takes the hit. There is no
//! nearest-first tie-break.

use glam::Vec3;
use tracing::{debug, info, warn};

use galaxy_config::WeaponsConfig;
use galaxy_content::Action;
use galaxy_events::{EventQueue, GalaxyEvent, TargetId, WeaponKind};
use galaxy_math::Transform;

use crate::bolt::Bolt;
use crate::error::PoolError;
use crate::pool::BoltPool;

/// Laser muzzle in ship space (the ship faces -Z).
const LASER_NOSE: Vec3 = Vec3::new(0.0, 0.0, -3.2);
/// Projectile hardpoints in ship space, mirrored left/right.
const PROJECTILE_HARDPOINTS: [Vec3; 2] = [Vec3::new(-2.0, 0.0, -3.0), Vec3::new(2.0, 0.0, -3.0)];

/// Anything bolts can strike.
///
/// The weapon system only reads positions and actions, and asks the
/// registry to flash a target it struck.
pub trait TargetRegistry {
    /// Live targets in registration order with their world positions.
    fn target_positions(&self) -> Vec<(TargetId, Vec3)>;

    /// Action carried by `id`, if any.
    fn action_for(&self, id: TargetId) -> Option<Action>;

    /// Highlights `id` for `seconds` of simulation time.
    fn flash(&mut self, id: TargetId, seconds: f32);
}

/// Ballistics of one weapon kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponProfile {
    pub speed: f32,
    pub lifetime: f32,
    pub cooldown: f32,
}

impl WeaponProfile {
    #[must_use]
    pub fn laser(config: &WeaponsConfig) -> Self {
        Self {
            speed: config.laser_speed,
            lifetime: config.laser_lifetime,
            cooldown: config.laser_cooldown,
        }
    }

    #[must_use]
    pub fn projectile(config: &WeaponsConfig) -> Self {
        Self {
            speed: config.projectile_speed,
            lifetime: config.projectile_lifetime,
            cooldown: config.projectile_cooldown,
        }
    }
}

/// A resolved bolt strike.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub target: TargetId,
    /// World position of the struck target.
    pub position: Vec3,
    pub kind: WeaponKind,
    pub action: Option<Action>,
}

/// Snapshot for overlays and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeaponStats {
    pub active_lasers: usize,
    pub active_projectiles: usize,
    pub lasers_in_use: usize,
    pub projectiles_in_use: usize,
    pub fallback_allocations: u64,
}

pub struct WeaponSystem {
    current: WeaponKind,
    laser: WeaponProfile,
    projectile: WeaponProfile,
    laser_length: f32,
    hit_radius: f32,
    hit_flash: f32,
    laser_pool: BoltPool,
    projectile_pool: BoltPool,
    bolts: Vec<Bolt>,
    last_laser_shot: f32,
    last_projectile_shot: f32,
}

impl WeaponSystem {
    #[must_use]
    pub fn new(config: &WeaponsConfig) -> Self {
        info!(pool_size = config.pool_size, "Weapon pools allocated");
        Self {
            current: WeaponKind::default(),
            laser: WeaponProfile::laser(config),
            projectile: WeaponProfile::projectile(config),
            laser_length: config.laser_length,
            hit_radius: config.hit_radius,
            hit_flash: config.hit_flash,
            laser_pool: BoltPool::new(WeaponKind::Laser, config.pool_size),
            projectile_pool: BoltPool::new(WeaponKind::Projectile, config.pool_size),
            bolts: Vec::new(),
            last_laser_shot: f32::NEG_INFINITY,
            last_projectile_shot: f32::NEG_INFINITY,
        }
    }

    // ── Firing ──

    /// Fires the active weapon from `ship` along `aim`.
    ///
    /// `aim` is the camera direction while aiming in mouse-flight and the
    /// ship's forward vector otherwise; a zero or non-finite aim falls back
    /// to the ship's forward. Returns the number of bolts spawned, zero while
    /// the cooldown is running.
    pub fn fire(
        &mut self,
        now: f32,
        ship: &Transform,
        aim: Vec3,
        events: &mut EventQueue,
    ) -> usize {
        let kind = self.current;
        let profile = self.profile(kind);
        let last = match kind {
            WeaponKind::Laser => self.last_laser_shot,
            WeaponKind::Projectile => self.last_projectile_shot,
        };
        if now - last < profile.cooldown {
            return 0;
        }

        let direction = aim
            .try_normalize()
            .filter(|d| d.is_finite())
            .unwrap_or_else(|| ship.forward());

        let spawned = match kind {
            WeaponKind::Laser => {
                let muzzle = ship.transform_point(LASER_NOSE);
                let position = muzzle + direction * (self.laser_length * 0.5);
                self.spawn(WeaponKind::Laser, position, direction, now);
                self.last_laser_shot = now;
                1
            }
            WeaponKind::Projectile => {
                for hardpoint in PROJECTILE_HARDPOINTS {
                    let position = ship.transform_point(hardpoint);
                    self.spawn(WeaponKind::Projectile, position, direction, now);
                }
                self.last_projectile_shot = now;
                PROJECTILE_HARDPOINTS.len()
            }
        };

        events.send(GalaxyEvent::WeaponFired {
            kind,
            bolts: spawned,
        });
        spawned
    }

    /// Launches one bolt of `kind` at `position` along `direction`,
    /// bypassing cooldowns.
    pub fn spawn(&mut self, kind: WeaponKind, position: Vec3, direction: Vec3, now: f32) {
        let profile = self.profile(kind);
        let pool = self.pool_mut(kind);
        let slot = pool.acquire();
        if slot.is_none() {
            pool.note_fallback();
            warn!(?kind, "Bolt pool exhausted, allocating outside the pool");
        }
        let velocity = direction.normalize_or_zero() * profile.speed;
        self.bolts.push(Bolt::new(
            kind,
            position,
            velocity,
            now,
            profile.lifetime,
            slot,
        ));
    }

    /// Toggles between laser and projectile. Bolts in flight are unaffected.
    pub fn switch_weapon(&mut self, events: &mut EventQueue) -> WeaponKind {
        self.set_weapon(self.current.other(), events);
        self.current
    }

    pub fn set_weapon(&mut self, kind: WeaponKind, events: &mut EventQueue) {
        if self.current == kind {
            return;
        }
        self.current = kind;
        info!(?kind, "Weapon switched");
        events.send(GalaxyEvent::WeaponSwitched { kind });
    }

    // ── Simulation ──

    /// Advances every bolt and resolves expiry and hits at time `now`.
    ///
    /// A struck target is flashed, and a `SignboardHit` event is sent when it
    /// carries an action. Every hit is returned for routing.
    pub fn update(
        &mut self,
        dt: f32,
        now: f32,
        registry: &mut dyn TargetRegistry,
        events: &mut EventQueue,
    ) -> Result<Vec<Hit>, PoolError> {
        let targets = registry.target_positions();
        let mut hits = Vec::new();
        let mut failure = None;
        let mut survivors = Vec::with_capacity(self.bolts.len());

        for mut bolt in std::mem::take(&mut self.bolts) {
            bolt.advance(dt, now);

            if bolt.is_expired(now) {
                if let Err(e) = self.recycle(&bolt) {
                    failure.get_or_insert(e);
                }
                continue;
            }

            let struck = targets
                .iter()
                .find(|(_, position)| bolt.passes_within(*position, self.hit_radius));
            if let Some(&(target, position)) = struck {
                registry.flash(target, self.hit_flash);
                let action = registry.action_for(target);
                if let Some(action) = &action {
                    events.send(GalaxyEvent::SignboardHit {
                        target,
                        action: action.clone(),
                    });
                }
                debug!(%target, kind = ?bolt.kind, "Bolt hit");
                hits.push(Hit {
                    target,
                    position,
                    kind: bolt.kind,
                    action,
                });
                if let Err(e) = self.recycle(&bolt) {
                    failure.get_or_insert(e);
                }
                continue;
            }

            survivors.push(bolt);
        }

        self.bolts = survivors;
        match failure {
            Some(e) => Err(e),
            None => Ok(hits),
        }
    }

    /// Returns every bolt to its pool. Yields how many were in flight. A
    /// failed release does not stop the rest; the first error is reported.
    pub fn clear(&mut self) -> Result<usize, PoolError> {
        let bolts = std::mem::take(&mut self.bolts);
        let mut failure = None;
        for bolt in &bolts {
            if let Err(e) = self.recycle(bolt) {
                failure.get_or_insert(e);
            }
        }
        match failure {
            Some(e) => Err(e),
            None => Ok(bolts.len()),
        }
    }

    fn recycle(&mut self, bolt: &Bolt) -> Result<(), PoolError> {
        match bolt.slot {
            Some(slot) => self.pool_mut(bolt.kind).release(slot),
            None => Ok(()),
        }
    }

    // ── Queries ──

    #[must_use]
    pub fn current(&self) -> WeaponKind {
        self.current
    }

    #[must_use]
    pub fn profile(&self, kind: WeaponKind) -> WeaponProfile {
        match kind {
            WeaponKind::Laser => self.laser,
            WeaponKind::Projectile => self.projectile,
        }
    }

    #[must_use]
    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    #[must_use]
    pub fn active_count(&self, kind: WeaponKind) -> usize {
        self.bolts.iter().filter(|b| b.kind == kind).count()
    }

    #[must_use]
    pub fn pool(&self, kind: WeaponKind) -> &BoltPool {
        match kind {
            WeaponKind::Laser => &self.laser_pool,
            WeaponKind::Projectile => &self.projectile_pool,
        }
    }

    fn pool_mut(&mut self, kind: WeaponKind) -> &mut BoltPool {
        match kind {
            WeaponKind::Laser => &mut self.laser_pool,
            WeaponKind::Projectile => &mut self.projectile_pool,
        }
    }

    #[must_use]
    pub fn stats(&self) -> WeaponStats {
        WeaponStats {
            active_lasers: self.active_count(WeaponKind::Laser),
            active_projectiles: self.active_count(WeaponKind::Projectile),
            lasers_in_use: self.laser_pool.in_use_count(),
            projectiles_in_use: self.projectile_pool.in_use_count(),
            fallback_allocations: self.laser_pool.fallback_allocations()
                + self.projectile_pool.fallback_allocations(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rustc_hash::FxHashSet;

    const DT: f32 = 1.0 / 60.0;

    #[derive(Default)]
    struct Targets {
        entries: Vec<(TargetId, Vec3, Option<Action>)>,
        flashed: Vec<(TargetId, f32)>,
    }

    impl Targets {
        fn with(mut self, id: u32, position: Vec3, action: Option<Action>) -> Self {
            self.entries.push((TargetId(id), position, action));
            self
        }
    }

    impl TargetRegistry for Targets {
        fn target_positions(&self) -> Vec<(TargetId, Vec3)> {
            self.entries.iter().map(|(id, p, _)| (*id, *p)).collect()
        }

        fn action_for(&self, id: TargetId) -> Option<Action> {
            self.entries
                .iter()
                .find(|(t, _, _)| *t == id)
                .and_then(|(_, _, a)| a.clone())
        }

        fn flash(&mut self, id: TargetId, seconds: f32) {
            self.flashed.push((id, seconds));
        }
    }

    fn system() -> WeaponSystem {
        WeaponSystem::new(&WeaponsConfig::default())
    }

    fn ship() -> Transform {
        Transform::default()
    }

    #[test]
    fn test_fire_within_cooldown_is_ignored() {
        let mut weapons = system();
        let mut events = EventQueue::new();
        assert_eq!(weapons.fire(0.0, &ship(), Vec3::NEG_Z, &mut events), 1);
        assert_eq!(weapons.fire(0.05, &ship(), Vec3::NEG_Z, &mut events), 0);
        assert_eq!(weapons.active_count(WeaponKind::Laser), 1);

        assert_eq!(weapons.fire(0.15, &ship(), Vec3::NEG_Z, &mut events), 1);
        assert_eq!(weapons.active_count(WeaponKind::Laser), 2);
    }

    #[test]
    fn test_cooldowns_are_independent_per_kind() {
        let mut weapons = system();
        let mut events = EventQueue::new();
        weapons.fire(0.0, &ship(), Vec3::NEG_Z, &mut events);
        weapons.switch_weapon(&mut events);
        assert_eq!(weapons.fire(0.01, &ship(), Vec3::NEG_Z, &mut events), 2);
        assert_eq!(weapons.fire(0.2, &ship(), Vec3::NEG_Z, &mut events), 0);
        assert_eq!(weapons.fire(0.4, &ship(), Vec3::NEG_Z, &mut events), 2);
    }

    #[test]
    fn test_laser_spawns_ahead_of_nose() {
        let mut weapons = system();
        let mut events = EventQueue::new();
        weapons.fire(0.0, &ship(), Vec3::NEG_Z, &mut events);
        let bolt = &weapons.bolts()[0];
        assert!((bolt.position - Vec3::new(0.0, 0.0, -13.2)).length() < 1e-4);
        assert!((bolt.velocity - Vec3::new(0.0, 0.0, -200.0)).length() < 1e-3);
        assert!(bolt.is_pooled());
        assert!(events.read_current().any(|e| matches!(
            e,
            GalaxyEvent::WeaponFired {
                kind: WeaponKind::Laser,
                bolts: 1
            }
        )));
    }

    #[test]
    fn test_projectiles_fire_from_both_hardpoints_along_aim() {
        let mut weapons = system();
        let mut events = EventQueue::new();
        weapons.set_weapon(WeaponKind::Projectile, &mut events);
        let aim = Vec3::new(1.0, 0.0, -1.0);
        weapons.fire(0.0, &ship(), aim, &mut events);
        let xs: Vec<f32> = weapons.bolts().iter().map(|b| b.position.x).collect();
        assert_eq!(xs, vec![-2.0, 2.0]);
        for bolt in weapons.bolts() {
            assert!((bolt.velocity.normalize() - aim.normalize()).length() < 1e-5);
        }
    }

    #[test]
    fn test_zero_aim_uses_ship_forward() {
        let mut weapons = system();
        let mut events = EventQueue::new();
        weapons.fire(0.0, &ship(), Vec3::ZERO, &mut events);
        assert!(weapons.bolts()[0].velocity.z < 0.0);
    }

    #[test]
    fn test_coincident_bolt_hits_on_next_update() {
        let mut weapons = system();
        let mut events = EventQueue::new();
        weapons.fire(0.0, &ship(), Vec3::NEG_Z, &mut events);
        let spot = weapons.bolts()[0].position;
        let mut targets = Targets::default().with(7, spot, Some(Action::Profile));

        let hits = weapons.update(DT, DT, &mut targets, &mut events).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, TargetId(7));
        assert!(weapons.bolts().is_empty());
        assert_eq!(weapons.stats().lasers_in_use, 0);
        assert_eq!(targets.flashed, vec![(TargetId(7), 0.12)]);
        assert!(events.read_current().any(|e| matches!(
            e,
            GalaxyEvent::SignboardHit { target: TargetId(7), action: Action::Profile }
        )));
    }

    #[test]
    fn test_first_registered_target_wins() {
        let mut weapons = system();
        let mut events = EventQueue::new();
        weapons.fire(0.0, &ship(), Vec3::NEG_Z, &mut events);
        let spot = weapons.bolts()[0].position;
        // Target 2 sits exactly on the bolt, target 1 is farther but
        // registered first.
        let mut targets = Targets::default()
            .with(1, spot + Vec3::new(2.0, 0.0, 0.0), Some(Action::project("far")))
            .with(2, spot, Some(Action::project("near")));

        let hits = weapons.update(DT, DT, &mut targets, &mut events).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, TargetId(1));
        assert_eq!(hits[0].action, Some(Action::project("far")));
        assert_eq!(targets.flashed.len(), 1);
    }

    #[test]
    fn test_hit_without_action_sends_no_event() {
        let mut weapons = system();
        let mut events = EventQueue::new();
        let mut targets = Targets::default().with(3, Vec3::new(0.0, 0.0, -13.2), None);
        weapons.fire(0.0, &ship(), Vec3::NEG_Z, &mut events);
        let hits = weapons.update(DT, DT, &mut targets, &mut events).unwrap();
        assert_eq!(hits.len(), 1);
        assert!(
            !events
                .read_current()
                .any(|e| matches!(e, GalaxyEvent::SignboardHit { .. }))
        );
    }

    #[test]
    fn test_bolt_recycled_by_end_of_lifetime() {
        let mut weapons = system();
        let mut events = EventQueue::new();
        let mut targets = Targets::default();
        weapons.fire(0.0, &ship(), Vec3::NEG_Z, &mut events);
        for step in 1..=180 {
            let now = step as f32 / 60.0;
            weapons.update(DT, now, &mut targets, &mut events).unwrap();
            if step < 179 {
                assert_eq!(weapons.bolts().len(), 1, "bolt gone early at step {step}");
            }
        }
        assert!(weapons.bolts().is_empty());
        assert_eq!(weapons.pool(WeaponKind::Laser).in_use_count(), 0);
    }

    #[test]
    fn test_exhausted_pool_falls_back() {
        let config = WeaponsConfig {
            pool_size: 2,
            ..WeaponsConfig::default()
        };
        let mut weapons = WeaponSystem::new(&config);
        let mut events = EventQueue::new();
        for shot in 0..3 {
            weapons.fire(shot as f32 * 0.2, &ship(), Vec3::NEG_Z, &mut events);
        }
        let stats = weapons.stats();
        assert_eq!(stats.active_lasers, 3);
        assert_eq!(stats.lasers_in_use, 2);
        assert_eq!(stats.fallback_allocations, 1);
        assert_eq!(weapons.bolts().iter().filter(|b| !b.is_pooled()).count(), 1);

        assert_eq!(weapons.clear().unwrap(), 3);
        assert_eq!(weapons.stats().lasers_in_use, 0);
    }

    #[test]
    fn test_clear_releases_every_slot_after_a_failure() {
        let mut weapons = system();
        let mut events = EventQueue::new();
        weapons.fire(0.0, &ship(), Vec3::NEG_Z, &mut events);
        weapons.fire(0.2, &ship(), Vec3::NEG_Z, &mut events);
        let duplicate = weapons.bolts[0].clone();
        weapons.bolts.insert(1, duplicate);

        let err = weapons.clear().unwrap_err();
        assert!(matches!(err, PoolError::DoubleRelease(_)));
        assert!(weapons.bolts().is_empty());
        assert_eq!(weapons.pool(WeaponKind::Laser).in_use_count(), 0);
    }

    #[test]
    fn test_switch_keeps_bolts_in_flight() {
        let mut weapons = system();
        let mut events = EventQueue::new();
        weapons.fire(0.0, &ship(), Vec3::NEG_Z, &mut events);
        assert_eq!(weapons.switch_weapon(&mut events), WeaponKind::Projectile);
        assert_eq!(weapons.active_count(WeaponKind::Laser), 1);
        assert!(events.read_current().any(|e| matches!(
            e,
            GalaxyEvent::WeaponSwitched {
                kind: WeaponKind::Projectile
            }
        )));
    }

    #[test]
    fn test_pool_invariant_under_random_play() {
        let config = WeaponsConfig {
            pool_size: 5,
            ..WeaponsConfig::default()
        };
        let mut weapons = WeaponSystem::new(&config);
        let mut events = EventQueue::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut targets = Targets::default()
            .with(1, Vec3::new(0.0, 0.0, -60.0), None)
            .with(2, Vec3::new(2.0, 0.0, -120.0), None);

        let mut now = 0.0;
        for _ in 0..2000 {
            now += DT;
            match rng.random_range(0..4) {
                0 => {
                    weapons.fire(now, &ship(), Vec3::NEG_Z, &mut events);
                }
                1 => {
                    weapons.switch_weapon(&mut events);
                }
                _ => {
                    weapons.update(DT, now, &mut targets, &mut events).unwrap();
                }
            }
            events.swap();

            for kind in [WeaponKind::Laser, WeaponKind::Projectile] {
                let pool = weapons.pool(kind);
                assert!(pool.in_use_count() <= pool.capacity());
            }
            let mut seen = FxHashSet::default();
            for slot in weapons.bolts().iter().filter_map(|b| b.slot) {
                assert!(seen.insert(slot), "slot {slot:?} issued twice");
            }
            assert_eq!(
                seen.len(),
                weapons.pool(WeaponKind::Laser).in_use_count()
                    + weapons.pool(WeaponKind::Projectile).in_use_count()
            );
        }
    }
}
