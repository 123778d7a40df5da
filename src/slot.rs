//! Table slots and their three observable states.

use crate::key::Key;

/// What a slot currently represents.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SlotState {
    /// Empty key, no value. Ends every probe scan.
    Vacant,
    /// Key present, value removed. Probe scans pass through it.
    Tombstone,
    /// Key and value present.
    Occupied,
}

/// One fixed-size record of the table.
///
/// Deleting an entry clears only `value`; the key stays so that later
/// entries in the same probe chain remain reachable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot<V> {
    pub(crate) key: Key,
    pub(crate) value: Option<V>,
}

impl<V> Slot<V> {
    /// A never-used slot.
    pub const fn vacant() -> Self {
        Self {
            key: Key::EMPTY,
            value: None,
        }
    }

    #[inline]
    pub fn key(&self) -> &Key {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    #[inline]
    pub fn state(&self) -> SlotState {
        match (self.key.is_empty(), &self.value) {
            (true, _) => SlotState::Vacant,
            (false, None) => SlotState::Tombstone,
            (false, Some(_)) => SlotState::Occupied,
        }
    }

    #[inline]
    pub fn is_vacant(&self) -> bool {
        self.key.is_empty()
    }

    /// Vacant or tombstone: free for a new key.
    #[inline]
    pub fn is_reusable(&self) -> bool {
        self.value.is_none()
    }

    pub(crate) fn reset(&mut self) {
        self.key = Key::EMPTY;
        self.value = None;
    }
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self::vacant()
    }
}

/// A fixed array of never-used slots, for stack or static storage.
pub fn vacant_array<V, const N: usize>() -> [Slot<V>; N] {
    core::array::from_fn(|_| Slot::vacant())
}
