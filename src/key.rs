//! Fixed-capacity inline keys.

use core::fmt;
use core::hash::{BuildHasher, Hasher};

/// Maximum number of key bytes stored per slot.
pub const MAX_KEY_LENGTH: usize = 15;

/// A short key stored inline in a slot.
///
/// Built from arbitrary bytes by keeping the prefix up to the first NUL byte,
/// capped at [`MAX_KEY_LENGTH`]. Two inputs sharing that prefix produce equal
/// keys. The zero-length key marks a slot that was never used.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    bytes: [u8; MAX_KEY_LENGTH],
    len: u8,
}

impl Key {
    /// The empty key.
    pub const EMPTY: Key = Key {
        bytes: [0; MAX_KEY_LENGTH],
        len: 0,
    };

    /// Truncate `raw` and copy it inline.
    pub fn new(raw: &[u8]) -> Self {
        let len = raw
            .iter()
            .take(MAX_KEY_LENGTH)
            .position(|&b| b == 0)
            .unwrap_or_else(|| raw.len().min(MAX_KEY_LENGTH));
        let mut bytes = [0; MAX_KEY_LENGTH];
        bytes[..len].copy_from_slice(&raw[..len]);
        Self {
            bytes,
            len: len as u8,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Hash the stored bytes with a hasher from `build`.
    ///
    /// Writes the raw bytes only (no length prefix), so FNV-1a hashers
    /// reproduce [`fnv1a`](crate::hash::fnv1a) exactly.
    #[inline]
    pub fn hash_with<S: BuildHasher>(&self, build: &S) -> u64 {
        let mut h = build.build_hasher();
        h.write(self.as_bytes());
        h.finish()
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<&[u8]> for Key {
    fn from(raw: &[u8]) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for Key {
    fn from(raw: &str) -> Self {
        Self::new(raw.as_bytes())
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(self.as_bytes()))
    }
}
