//! Linear probing over a caller-owned slice of slots.
//!
//! These free functions are the raw interface: the slice is the table, its
//! length is the capacity, and the caller picks the hasher. Nothing here
//! allocates. [`ProbeTable`](crate::ProbeTable) wraps the same functions
//! with bookkeeping.
//!
//! Probe scans start at `hash(key) % len` and step by one, wrapping at the
//! end. A vacant slot ends the scan; tombstones do not. A scan never visits
//! more than `len` slots, so a table with no vacant slot left reports
//! absence (lookup, delete) or [`InsertError::TableFull`] (insert) instead
//! of spinning.

use crate::error::InsertError;
use crate::key::Key;
use crate::slot::{Slot, SlotState};
use core::hash::BuildHasher;

/// Outcome of a probe scan.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Probe {
    /// Slot holding the key, live or tombstoned.
    Found(usize),
    /// Key absent; the earliest reusable slot seen on the chain.
    Vacant(usize),
    /// Key absent and no reusable slot within one wrap.
    Full,
}

#[inline]
fn home<S: BuildHasher>(key: &Key, len: usize, build: &S) -> usize {
    (key.hash_with(build) % len as u64) as usize
}

/// Scan the probe chain of `key`.
///
/// Returns the first tombstone passed on the way when the key turns out to
/// be absent, so reinsertion after churn shortens chains rather than
/// extending them.
pub(crate) fn find<V, S: BuildHasher>(table: &[Slot<V>], key: &Key, build: &S) -> Probe {
    let len = table.len();
    if len == 0 {
        return Probe::Full;
    }

    let mut index = home(key, len, build);
    let mut first_free = None;
    for _ in 0..len {
        let slot = &table[index];
        if slot.is_vacant() {
            return Probe::Vacant(first_free.unwrap_or(index));
        }
        if slot.key == *key {
            return Probe::Found(index);
        }
        if first_free.is_none() && slot.value.is_none() {
            first_free = Some(index);
        }
        index += 1;
        if index == len {
            index = 0;
        }
    }

    match first_free {
        Some(i) => Probe::Vacant(i),
        None => Probe::Full,
    }
}

/// Where an insert landed and what it displaced.
pub(crate) struct Placed<V> {
    pub(crate) index: usize,
    pub(crate) prior: SlotState,
    pub(crate) previous: Option<V>,
}

pub(crate) fn place<V, S: BuildHasher>(
    table: &mut [Slot<V>],
    key: Key,
    value: V,
    build: &S,
) -> Result<Placed<V>, InsertError> {
    if key.is_empty() {
        return Err(InsertError::EmptyKey);
    }
    let index = match find(table, &key, build) {
        Probe::Found(i) | Probe::Vacant(i) => i,
        Probe::Full => {
            log::warn!(
                "insert of {key:?} failed: no reusable slot among {} slots",
                table.len()
            );
            return Err(InsertError::TableFull);
        }
    };

    let slot = &mut table[index];
    let prior = slot.state();
    slot.key = key;
    let previous = slot.value.replace(value);
    log::trace!("insert {key:?} at slot {index} (was {prior:?})");

    Ok(Placed {
        index,
        prior,
        previous,
    })
}

/// Mark every slot as never used.
///
/// Must run before any other operation on freshly provided storage.
pub fn init_table<V>(table: &mut [Slot<V>]) {
    for slot in table.iter_mut() {
        slot.reset();
    }
}

/// Value stored for `key`, or `None` when absent or deleted.
pub fn lookup<'t, V, S: BuildHasher>(
    table: &'t [Slot<V>],
    key: &[u8],
    build: &S,
) -> Option<&'t V> {
    match find(table, &Key::new(key), build) {
        Probe::Found(i) => table[i].value.as_ref(),
        Probe::Vacant(_) | Probe::Full => None,
    }
}

/// Store `value` under `key` (truncated to [`MAX_KEY_LENGTH`](crate::MAX_KEY_LENGTH)).
///
/// Overwrites a live entry for the same key and returns its old value,
/// revives a tombstone for the same key, or claims the earliest reusable
/// slot on the chain.
///
/// # Errors
///
/// [`InsertError::EmptyKey`] for a key with no bytes before the bound,
/// [`InsertError::TableFull`] when the key is absent and no slot can take it.
pub fn insert<V, S: BuildHasher>(
    table: &mut [Slot<V>],
    key: &[u8],
    value: V,
    build: &S,
) -> Result<Option<V>, InsertError> {
    place(table, Key::new(key), value, build).map(|p| p.previous)
}

/// Demote the live entry for `key` to a tombstone and return its value.
///
/// The key bytes stay in place. Absent keys and existing tombstones are
/// left untouched and yield `None`.
pub fn delete<V, S: BuildHasher>(table: &mut [Slot<V>], key: &[u8], build: &S) -> Option<V> {
    let key = Key::new(key);
    match find(table, &key, build) {
        Probe::Found(i) => {
            let value = table[i].value.take();
            if value.is_some() {
                log::trace!("delete {key:?} at slot {i}");
            }
            value
        }
        Probe::Vacant(_) | Probe::Full => None,
    }
}

/// Number of slots a lookup of `key` inspects before it terminates.
pub fn probe_len<V, S: BuildHasher>(table: &[Slot<V>], key: &[u8], build: &S) -> usize {
    let len = table.len();
    if len == 0 {
        return 0;
    }
    let key = Key::new(key);
    let start = home(&key, len, build);
    let mut steps = 0;
    while steps < len {
        let slot = &table[(start + steps) % len];
        steps += 1;
        if slot.is_vacant() || slot.key == key {
            break;
        }
    }
    steps
}
