//! Bit sequence helpers for harnesses and demos.

use bitvec::prelude::*;
use rand::Rng;

/// Expand ASCII text into bits, 8 per byte, most significant first.
pub fn bits_from_ascii(text: &str) -> BitVec<u8, Msb0> {
    BitVec::from_slice(text.as_bytes())
}

/// Collapse bits back into ASCII, dropping any trailing partial byte.
pub fn ascii_from_bits(bits: &BitSlice<u8, Msb0>) -> String {
    bits.chunks_exact(8)
        .map(|chunk| {
            let mut byte = 0u8;
            for bit in chunk {
                byte = (byte << 1) | (*bit as u8);
            }
            byte as char
        })
        .collect()
}

/// A uniformly random bit sequence from a caller-owned generator.
pub fn random_bits<R: Rng>(rng: &mut R, len: usize) -> BitVec<u8, Msb0> {
    (0..len).map(|_| rng.random::<bool>()).collect()
}
