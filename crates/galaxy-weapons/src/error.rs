use galaxy_events::WeaponKind;

use crate::pool::SlotId;

/// Misuse of a [`BoltPool`](crate::BoltPool) handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("slot {0:?} released twice")]
    DoubleRelease(SlotId),

    #[error("slot {slot:?} does not belong to the {pool:?} pool")]
    ForeignHandle { slot: SlotId, pool: WeaponKind },
}
