//! Fixed-capacity bit buffer.
//!
//! The buffer holds one bit stream addressed MSB-first from bit 0, the same
//! stream [BitBuffer::to_septets] cuts into 7-bit groups. Fields are appended
//! left to right and read back in the same order. Within a field, bits are laid
//! out according to the buffer's [BitOrder]; the keyer wire format puts the
//! least significant bit of each field first.
//!
//! The buffer never grows: a write that would cross the capacity fails and
//! leaves the buffer untouched.

use tracing::debug;

use crate::{
    bits::{self, BitOrder, MAX_FIELD_BITS},
    errors::{CodecError, Result},
};

/// Capacity used by both the config and the version payloads.
pub const DEFAULT_CAPACITY_BITS: u16 = 128;

/// Field bit order spoken by the keyer firmware and its web configurator.
pub const WIRE_BIT_ORDER: BitOrder = BitOrder::LsbFirst;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitBuffer {
    capacity_bits: usize,
    bit_order: BitOrder,
    storage: Vec<u8>,
    used_bits: usize,
    read_pos: usize,
}

impl BitBuffer {
    /// Creates an empty buffer holding at most `capacity_bits` bits, using [WIRE_BIT_ORDER].
    pub fn new(capacity_bits: u16) -> Self {
        Self::with_bit_order(capacity_bits, WIRE_BIT_ORDER)
    }

    pub fn with_bit_order(capacity_bits: u16, bit_order: BitOrder) -> Self {
        let capacity_bits = capacity_bits as usize;

        Self {
            capacity_bits,
            bit_order,
            storage: vec![0u8; capacity_bits.div_ceil(8)],
            used_bits: 0,
            read_pos: 0,
        }
    }

    pub fn capacity_bits(&self) -> usize {
        self.capacity_bits
    }

    pub fn bit_order(&self) -> BitOrder {
        self.bit_order
    }

    /// Bits written so far. After [BitBuffer::load_septets] this is the septet-aligned width.
    pub fn used_bits(&self) -> usize {
        self.used_bits
    }

    /// Bits written but not yet extracted.
    pub fn remaining_bits(&self) -> usize {
        self.used_bits.saturating_sub(self.read_pos)
    }

    /// The bit stream, `ceil(capacity_bits / 8)` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage
    }

    /// Appends the low `bits` bits of `value` in the buffer's bit order.
    ///
    /// Bits of `value` above `bits` are dropped rather than rejected.
    pub fn add_field(&mut self, value: u64, bits: u8) -> Result<()> {
        if bits > MAX_FIELD_BITS {
            debug!(bits, "rejecting field wider than 16 bits");
            return Err(CodecError::InvalidFieldWidth(bits));
        }

        let available = self.capacity_bits - self.used_bits;
        if bits as usize > available {
            debug!(bits, available, "field does not fit in bit buffer");
            return Err(CodecError::CapacityExceeded {
                requested: bits as usize,
                available,
            });
        }

        let stream = self.bit_order.arrange(value, bits);
        bits::write_bits_at(&mut self.storage, self.used_bits, stream, bits);
        self.used_bits += bits as usize;

        Ok(())
    }

    /// Reads the next `bits` bits as an unsigned value.
    ///
    /// Bits past the written ones read as zero padding, so a field cut short
    /// keeps the bits that did arrive and the cursor still moves past it.
    /// Returns 0 without moving the cursor only when the read would cross the
    /// capacity. Use [BitBuffer::try_extract_field] to fail on missing bits.
    pub fn extract_field(&mut self, bits: u8) -> u64 {
        if bits > MAX_FIELD_BITS {
            debug!(bits, "rejecting field wider than 16 bits");
            return 0;
        }

        if self.read_pos + bits as usize > self.capacity_bits {
            debug!(bits, read_pos = self.read_pos, "field extends past buffer capacity");
            return 0;
        }

        self.read_at_cursor(bits)
    }

    /// Reads the next `bits` bits, failing when they were never written.
    pub fn try_extract_field(&mut self, bits: u8) -> Result<u64> {
        if bits > MAX_FIELD_BITS {
            debug!(bits, "rejecting field wider than 16 bits");
            return Err(CodecError::InvalidFieldWidth(bits));
        }

        let available = self.remaining_bits();
        if bits as usize > available {
            debug!(bits, available, "not enough bits left to extract field");
            return Err(CodecError::CapacityExceeded {
                requested: bits as usize,
                available,
            });
        }

        Ok(self.read_at_cursor(bits))
    }

    /// Clears all bits and rewinds both cursors.
    pub fn reset(&mut self) {
        self.storage.fill(0);
        self.used_bits = 0;
        self.read_pos = 0;
    }

    /// Clears the buffer and writes `len_bits` bits produced by `bit_at`, left-aligned.
    pub(crate) fn replace_with(&mut self, len_bits: usize, mut bit_at: impl FnMut(usize) -> bool) {
        self.reset();
        for pos in 0..len_bits {
            bits::write_bit_at(&mut self.storage, pos, bit_at(pos));
        }
        self.used_bits = len_bits;
    }

    // Caller has checked that `read_pos + bits` is within the capacity.
    fn read_at_cursor(&mut self, bits: u8) -> u64 {
        let stream = bits::read_bits_at(&self.storage, self.read_pos, bits);
        self.read_pos += bits as usize;

        self.bit_order.arrange(stream, bits)
    }
}

impl Default for BitBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY_BITS)
    }
}
