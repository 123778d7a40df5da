//! FNV-1a hashing with an explicit word width.
//!
//! The accumulator width is a type parameter (`u32` or `u64`) rather than
//! whatever the platform's native integer happens to be, so hash values are
//! reproducible across targets. [`NativeWord`] picks the width matching the
//! target's pointer size at build time for callers that want the
//! platform-flavoured behaviour.

use crate::key::MAX_KEY_LENGTH;
use core::hash::{BuildHasher, Hasher};
use core::marker::PhantomData;

/// Unsigned accumulator width usable for FNV-1a.
pub trait Word: Copy + Eq + core::fmt::Debug + sealed::Sealed {
    /// FNV offset basis for this width.
    const OFFSET_BASIS: Self;
    /// FNV prime for this width.
    const PRIME: Self;

    /// XOR a byte into the accumulator, then multiply by the prime (wrapping).
    fn mix(self, byte: u8) -> Self;

    /// Zero-extend to `u64`.
    fn widen(self) -> u64;
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

impl Word for u32 {
    const OFFSET_BASIS: Self = 0x811c_9dc5;
    const PRIME: Self = 16_777_619;

    #[inline]
    fn mix(self, byte: u8) -> Self {
        (self ^ u32::from(byte)).wrapping_mul(Self::PRIME)
    }

    #[inline]
    fn widen(self) -> u64 {
        u64::from(self)
    }
}

impl Word for u64 {
    const OFFSET_BASIS: Self = 0xcbf2_9ce4_8422_2325;
    const PRIME: Self = 1_099_511_628_211;

    #[inline]
    fn mix(self, byte: u8) -> Self {
        (self ^ u64::from(byte)).wrapping_mul(Self::PRIME)
    }

    #[inline]
    fn widen(self) -> u64 {
        self
    }
}

/// Word width matching the target's pointer size.
#[cfg(target_pointer_width = "32")]
pub type NativeWord = u32;
/// Word width matching the target's pointer size.
#[cfg(not(target_pointer_width = "32"))]
pub type NativeWord = u64;

/// FNV-1a over the key prefix: stops at the first NUL byte or after
/// [`MAX_KEY_LENGTH`] bytes, whichever comes first.
#[inline]
pub fn fnv1a<W: Word>(key: &[u8]) -> W {
    key.iter()
        .take(MAX_KEY_LENGTH)
        .take_while(|&&b| b != 0)
        .fold(W::OFFSET_BASIS, |h, &b| h.mix(b))
}

/// [`fnv1a`] with the build-time [`NativeWord`] width.
#[inline]
pub fn hash(key: &[u8]) -> NativeWord {
    fnv1a::<NativeWord>(key)
}

/// Streaming FNV-1a hasher. Unlike [`fnv1a`] it hashes every byte written;
/// bounding happens when the table builds a [`Key`](crate::Key).
#[derive(Clone, Copy, Debug)]
pub struct Fnv1a<W: Word> {
    state: W,
}

impl<W: Word> Default for Fnv1a<W> {
    fn default() -> Self {
        Self {
            state: W::OFFSET_BASIS,
        }
    }
}

impl<W: Word> Hasher for Fnv1a<W> {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state = self.state.mix(b);
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.state.widen()
    }
}

/// `BuildHasher` producing [`Fnv1a`] hashers of width `W`.
pub struct BuildFnv1a<W: Word> {
    _w: PhantomData<W>,
}

impl<W: Word> BuildFnv1a<W> {
    pub const fn new() -> Self {
        Self { _w: PhantomData }
    }
}

impl<W: Word> Default for BuildFnv1a<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Word> Clone for BuildFnv1a<W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W: Word> Copy for BuildFnv1a<W> {}

impl<W: Word> core::fmt::Debug for BuildFnv1a<W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("BuildFnv1a")
    }
}

impl<W: Word> BuildHasher for BuildFnv1a<W> {
    type Hasher = Fnv1a<W>;

    fn build_hasher(&self) -> Self::Hasher {
        Fnv1a::default()
    }
}

/// 32-bit FNV-1a hasher factory.
pub type Fnv32 = BuildFnv1a<u32>;
/// 64-bit FNV-1a hasher factory.
pub type Fnv64 = BuildFnv1a<u64>;
