//! probe-table: a fixed-capacity hash table with linear probing and
//! tombstone deletion, living entirely in storage the caller provides.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: map short byte-string keys to values without the table ever
//!   allocating, resizing, or rehashing.
//! - Layers:
//!   - `probe`: free functions over `&mut [Slot<V>]` implementing
//!     init/lookup/insert/delete. The slice length is the capacity.
//!   - `ProbeTable<'a, V, S>`: borrows the slice, keeps live/tombstone
//!     counts, and exposes the same operations as methods.
//!
//! Representation
//! - A `Slot<V>` is an inline [`Key`] (at most [`MAX_KEY_LENGTH`] bytes)
//!   plus `Option<V>`.
//! - Empty key: never used. Key without value: tombstone. Key with value:
//!   live entry.
//! - Keys are cut at the first NUL byte or at `MAX_KEY_LENGTH` bytes.
//!   Inputs sharing that prefix are the same key.
//!
//! Probing
//! - Start at `hash(key) % len`, step by one, wrap at the end.
//! - Vacant slots end a scan; tombstones do not. Deletion never clears the
//!   key, so entries placed behind a deleted one stay reachable.
//! - An absent key is inserted at the first tombstone passed on its chain,
//!   or at the terminating vacant slot when there was none.
//! - Scans visit at most `len` slots. Inserting a new key into a table with
//!   no reusable slot returns `InsertError::TableFull`.
//!
//! Hashing
//! - FNV-1a over the truncated key. The word width (`u32` or `u64`) is a
//!   type parameter; `NativeWord` follows `target_pointer_width`. Any
//!   `BuildHasher` can replace it.
//!
//! Notes and non-goals
//! - Single-threaded. The table holds `&mut` to its slots, so the borrow
//!   checker serialises access; sharing across threads needs an outer lock.
//! - No growth or load-factor management; size the slice with headroom.
//! - Storing "no value" is not expressible: `insert` takes a `V`, so a
//!   tombstone is never confused with a live entry.

pub mod error;
pub mod hash;
pub mod key;
pub mod probe;
mod probe_proptest;
pub mod slot;
pub mod table;

// Public surface
pub use error::InsertError;
pub use hash::{fnv1a, hash, BuildFnv1a, Fnv1a, Fnv32, Fnv64, NativeWord, Word};
pub use key::{Key, MAX_KEY_LENGTH};
pub use probe::{delete, init_table, insert, lookup};
pub use slot::{vacant_array, Slot, SlotState};
pub use table::ProbeTable;
