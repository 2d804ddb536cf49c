//! 8-bit additive checksum.
//!
//! The checksum is `(0xFF + sum of all bytes) mod 256`. It is **not** a CRC:
//! there is no polynomial division, lookup table or bit reflection, only a
//! wrapping byte sum seeded with [`INITIAL_VALUE`]. It catches accidental
//! corruption cheaply and offers no protection against deliberate tampering.

#![no_std]

use core::hash::Hasher;

/// Seed of every checksum. Being non-zero, it tells an empty input apart from
/// bytes that happen to sum to zero.
pub const INITIAL_VALUE: u8 = 0xFF;

/// Block size used when streaming large inputs through a [`Checksum`].
pub static CHUNK_SIZE: usize = 256;

/// Running 8-bit additive checksum.
///
/// A freshly constructed accumulator is already seeded, so reading it before
/// any call to [`Checksum::reset`] yields [`INITIAL_VALUE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checksum {
    value: u8,
}

impl Default for Checksum {
    fn default() -> Self {
        Self::new()
    }
}

impl Checksum {
    pub const fn new() -> Self {
        Self {
            value: INITIAL_VALUE,
        }
    }

    /// Restores the accumulator to [`INITIAL_VALUE`].
    pub fn reset(&mut self) {
        self.value = INITIAL_VALUE;
    }

    /// Adds a single byte with wraparound.
    #[inline]
    pub fn add(&mut self, byte: u8) {
        self.value = self.value.wrapping_add(byte);
    }

    /// Adds the first `len` bytes of `data`.
    ///
    /// `None` adds nothing whatever `len` says. A `len` past the end of the
    /// slice is clamped to the slice.
    pub fn add_bytes(&mut self, data: Option<&[u8]>, len: usize) {
        let Some(data) = data else {
            return;
        };
        for &byte in data.iter().take(len) {
            self.add(byte);
        }
    }

    /// Adds every byte of `data`.
    pub fn update(&mut self, data: &[u8]) {
        self.add_bytes(Some(data), data.len());
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// One-shot checksum of the first `len` bytes of `data`.
    pub fn calculate(data: Option<&[u8]>, len: usize) -> u8 {
        let mut checksum = Checksum::new();
        checksum.reset();
        checksum.add_bytes(data, len);
        checksum.value()
    }

    /// Whether the first `len` bytes of `data` checksum to `expected`.
    pub fn verify(data: Option<&[u8]>, len: usize, expected: u8) -> bool {
        Self::calculate(data, len) == expected
    }
}

impl Extend<u8> for Checksum {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        iter.into_iter().for_each(|byte| self.add(byte));
    }
}

impl<'a> Extend<&'a u8> for Checksum {
    fn extend<I: IntoIterator<Item = &'a u8>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl Hasher for Checksum {
    fn finish(&self) -> u64 {
        self.value.into()
    }

    fn write(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}

pub fn checksum(msg: &[u8]) -> u8 {
    Checksum::calculate(Some(msg), msg.len())
}
