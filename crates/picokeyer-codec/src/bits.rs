//! Low-level bit read and write utilities for byte slices.
//!
//! Bits are addressed in MSB-first order: bit 0 is the high bit of the first byte.
//! Callers are responsible for bounds; these helpers index the slice directly.

/// Largest field width the codec accepts.
pub const MAX_FIELD_BITS: u8 = 16;

/// Order in which a field's bits are laid into the bit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitOrder {
    /// Most significant bit of the field first.
    MsbFirst,
    /// Least significant bit of the field first. This is the keyer wire order.
    LsbFirst,
}

impl BitOrder {
    /// Maps a field value to the bits as they appear in the stream, or back.
    /// Reversal is its own inverse, so the same call serves both directions.
    pub fn arrange(self, value: u64, bits: u8) -> u64 {
        match self {
            BitOrder::MsbFirst => value & mask(bits),
            BitOrder::LsbFirst => reverse_bits_n(value, bits as usize),
        }
    }
}

/// Returns a mask covering the low `bits` bits.
pub fn mask(bits: u8) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Reverses the low `n` bits of `x` (LSB becomes MSB of the result).
pub fn reverse_bits_n(mut x: u64, n: usize) -> u64 {
    let mut r = 0u64;
    for _ in 0..n {
        r = (r << 1) | (x & 1);
        x >>= 1;
    }

    r
}

/// Reads a single bit at `bit_pos` (0 = MSB of first byte). Returns 0 or 1.
pub fn read_bit_at(data: &[u8], bit_pos: usize) -> u8 {
    (data[bit_pos / 8] >> (7 - bit_pos % 8)) & 1
}

/// Sets or clears the bit at `bit_pos`.
pub fn write_bit_at(data: &mut [u8], bit_pos: usize, bit: bool) {
    let byte_index = bit_pos / 8;
    let bit_index = 7 - bit_pos % 8;

    if bit {
        data[byte_index] |= 1 << bit_index;
    } else {
        data[byte_index] &= !(1 << bit_index);
    }
}

/// Reads `n` bits starting at `bit_pos` as an unsigned value. MSB-first.
pub fn read_bits_at(data: &[u8], bit_pos: usize, n: u8) -> u64 {
    (0..n as usize).fold(0u64, |value, i| {
        (value << 1) | read_bit_at(data, bit_pos + i) as u64
    })
}

/// Writes the low `n` bits of `value` starting at `bit_pos`, most significant first.
/// Higher bits of `value` are ignored.
pub fn write_bits_at(data: &mut [u8], bit_pos: usize, value: u64, n: u8) {
    for i in 0..n as usize {
        let shift = n as usize - 1 - i;
        write_bit_at(data, bit_pos + i, (value >> shift) & 1 == 1);
    }
}
