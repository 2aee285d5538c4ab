//! Fixed-capacity bolt pool backed by a free list.
//!
//! Each weapon kind owns one [`BoltPool`]. Acquiring pops a free slot index
//! in O(1); releasing pushes it back. When every slot is in flight,
//! [`acquire`](BoltPool::acquire) returns `None` and the caller spawns an
//! unpooled bolt instead, which is counted in
//! [`fallback_allocations`](BoltPool::fallback_allocations).

use galaxy_events::WeaponKind;

use crate::error::PoolError;

/// Handle to one pooled slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    pub kind: WeaponKind,
    pub index: u32,
}

#[derive(Debug, Clone)]
pub struct BoltPool {
    kind: WeaponKind,
    /// Indices ready to be handed out; the top of the stack is reused first.
    free: Vec<u32>,
    in_use: Vec<bool>,
    fallback_allocations: u64,
}

impl BoltPool {
    /// Pre-allocates `capacity` slots for `kind`.
    #[must_use]
    pub fn new(kind: WeaponKind, capacity: usize) -> Self {
        let capacity = u32::try_from(capacity).unwrap_or(u32::MAX);
        Self {
            kind,
            free: (0..capacity).rev().collect(),
            in_use: vec![false; capacity as usize],
            fallback_allocations: 0,
        }
    }

    /// Takes a free slot, or `None` when the pool is exhausted.
    pub fn acquire(&mut self) -> Option<SlotId> {
        let index = self.free.pop()?;
        self.in_use[index as usize] = true;
        Some(SlotId {
            kind: self.kind,
            index,
        })
    }

    /// Records that a shot went out without a pooled slot.
    pub fn note_fallback(&mut self) {
        self.fallback_allocations += 1;
    }

    /// Returns `slot` to the free list.
    pub fn release(&mut self, slot: SlotId) -> Result<(), PoolError> {
        if slot.kind != self.kind {
            return Err(PoolError::ForeignHandle {
                slot,
                pool: self.kind,
            });
        }
        let Some(flag) = self.in_use.get_mut(slot.index as usize) else {
            return Err(PoolError::ForeignHandle {
                slot,
                pool: self.kind,
            });
        };
        if !*flag {
            return Err(PoolError::DoubleRelease(slot));
        }
        *flag = false;
        self.free.push(slot.index);
        Ok(())
    }

    #[must_use]
    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.in_use.len()
    }

    #[must_use]
    pub fn in_use_count(&self) -> usize {
        self.capacity() - self.free.len()
    }

    #[must_use]
    pub fn available(&self) -> usize {
        self.free.len()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.free.is_empty()
    }

    /// Shots that had to bypass the pool since creation.
    #[must_use]
    pub fn fallback_allocations(&self) -> u64 {
        self.fallback_allocations
    }
}
