//! ProbeTable: a bookkeeping view over caller-owned slots.

use crate::error::InsertError;
use crate::hash::{BuildFnv1a, NativeWord};
use crate::key::Key;
use crate::probe;
use crate::slot::{Slot, SlotState};
use core::hash::BuildHasher;

/// Fixed-capacity hash table borrowing its storage.
///
/// The slice is never resized; its length is the capacity. Keep at least
/// one slot vacant or tombstoned for new keys, otherwise `insert` of an
/// absent key returns [`InsertError::TableFull`].
pub struct ProbeTable<'a, V, S = BuildFnv1a<NativeWord>> {
    hasher: S,
    slots: &'a mut [Slot<V>],
    live: usize,
    used: usize, // occupied + tombstones
}

impl<'a, V> ProbeTable<'a, V> {
    /// Initialise `slots` to vacant and hash with native-width FNV-1a.
    pub fn init(slots: &'a mut [Slot<V>]) -> Self {
        Self::init_with_hasher(slots, Default::default())
    }

    /// Wrap slots that already went through [`probe::init_table`].
    pub fn attach(slots: &'a mut [Slot<V>]) -> Self {
        Self::attach_with_hasher(slots, Default::default())
    }
}

/// Iterator over live entries in slot order.
pub struct Iter<'t, V> {
    it: core::slice::Iter<'t, Slot<V>>,
}

impl<'t, V> Iterator for Iter<'t, V> {
    type Item = (&'t Key, &'t V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it
            .by_ref()
            .find_map(|s| s.value.as_ref().map(|v| (&s.key, v)))
    }
}

impl<'a, V, S> ProbeTable<'a, V, S>
where
    S: BuildHasher,
{
    pub fn init_with_hasher(slots: &'a mut [Slot<V>], hasher: S) -> Self {
        probe::init_table(slots);
        Self {
            hasher,
            slots,
            live: 0,
            used: 0,
        }
    }

    pub fn attach_with_hasher(slots: &'a mut [Slot<V>], hasher: S) -> Self {
        let (mut live, mut used) = (0, 0);
        for s in slots.iter() {
            match s.state() {
                SlotState::Vacant => {}
                SlotState::Tombstone => used += 1,
                SlotState::Occupied => {
                    used += 1;
                    live += 1;
                }
            }
        }
        Self {
            hasher,
            slots,
            live,
            used,
        }
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Live entries.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn tombstones(&self) -> usize {
        self.used - self.live
    }

    /// Slots that have never held a key.
    pub fn vacant(&self) -> usize {
        self.slots.len() - self.used
    }

    pub fn lookup(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        probe::lookup(&*self.slots, key.as_ref(), &self.hasher)
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.lookup(key).is_some()
    }

    /// Insert or overwrite; returns the replaced value.
    pub fn insert(&mut self, key: impl AsRef<[u8]>, value: V) -> Result<Option<V>, InsertError> {
        let placed = probe::place(self.slots, Key::new(key.as_ref()), value, &self.hasher)?;
        match placed.prior {
            SlotState::Vacant => {
                self.used += 1;
                self.live += 1;
            }
            SlotState::Tombstone => self.live += 1,
            SlotState::Occupied => {}
        }
        debug_assert!(placed.index < self.slots.len());
        Ok(placed.previous)
    }

    /// Tombstone the entry and return its value.
    pub fn delete(&mut self, key: impl AsRef<[u8]>) -> Option<V> {
        let value = probe::delete(self.slots, key.as_ref(), &self.hasher)?;
        self.live -= 1;
        Some(value)
    }

    /// Slots inspected by a lookup of `key`.
    pub fn probe_len(&self, key: impl AsRef<[u8]>) -> usize {
        probe::probe_len(&*self.slots, key.as_ref(), &self.hasher)
    }

    /// Reset every slot to vacant, dropping tombstones too.
    pub fn clear(&mut self) {
        probe::init_table(self.slots);
        self.live = 0;
        self.used = 0;
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            it: self.slots.iter(),
        }
    }

    pub fn slots(&self) -> &[Slot<V>] {
        &*self.slots
    }

    /// Give the storage back to the caller.
    pub fn into_inner(self) -> &'a mut [Slot<V>] {
        self.slots
    }
}
