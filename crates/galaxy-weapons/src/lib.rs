//! Pooled lasers and projectiles: firing with per-kind cooldowns, advancing
//! bolts each tick, and proximity hits against registered targets.

mod bolt;
mod error;
mod pool;
mod weapon_system;

pub use bolt::Bolt;
pub use error::PoolError;
pub use pool::{BoltPool, SlotId};
pub use weapon_system::{Hit, TargetRegistry, WeaponProfile, WeaponStats, WeaponSystem};
