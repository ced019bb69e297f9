//! Re-basing between the 8-bit buffer and a 7-bit clean byte stream.
//!
//! The written bits are cut into 7-bit groups, most significant group first.
//! The last group is zero-padded on its low side. Each output byte carries one
//! group in its low 7 bits, so the high bit is never set.

use tracing::{debug, trace};

use crate::{
    bits,
    buffer::BitBuffer,
    errors::{CodecError, Result},
};

/// Bits carried by one septet.
pub const SEPTET_BITS: usize = 7;

/// Number of septets needed to carry `bits` bits.
pub fn septet_len(bits: usize) -> usize {
    bits.div_ceil(SEPTET_BITS)
}

/// Returns true if no byte in `bytes` has its high bit set.
pub fn is_septet_clean(bytes: &[u8]) -> bool {
    first_non_septet(bytes).is_none()
}

/// Position and value of the first byte with its high bit set.
pub fn first_non_septet(bytes: &[u8]) -> Option<(usize, u8)> {
    bytes
        .iter()
        .copied()
        .enumerate()
        .find(|&(_, byte)| byte & 0x80 != 0)
}

impl BitBuffer {
    /// Re-encodes the written bits as septets. Output length is `ceil(used_bits / 7)`.
    pub fn to_septets(&self) -> Vec<u8> {
        let used = self.used_bits();
        let data = self.as_bytes();

        let septets: Vec<u8> = (0..septet_len(used))
            .map(|i| {
                (0..SEPTET_BITS).fold(0u8, |group, j| {
                    let pos = i * SEPTET_BITS + j;
                    let bit = if pos < used {
                        bits::read_bit_at(data, pos)
                    } else {
                        0
                    };
                    (group << 1) | bit
                })
            })
            .collect();

        trace!(used_bits = used, septets = septets.len(), "packed septets");

        septets
    }

    /// Replaces the buffer contents with the bits carried by `septets`.
    ///
    /// Only the low 7 bits of each byte are used. Afterwards `used_bits` is
    /// `septets.len() * 7`, including any padding the encoder added. Fails without
    /// touching the buffer when that would exceed the capacity.
    pub fn load_septets(&mut self, septets: &[u8]) -> Result<()> {
        let len_bits = septets.len() * SEPTET_BITS;

        if len_bits > self.capacity_bits() {
            debug!(
                septets = septets.len(),
                capacity_bits = self.capacity_bits(),
                "septet payload exceeds buffer capacity"
            );
            return Err(CodecError::MalformedPayload {
                septets: septets.len(),
                capacity_bits: self.capacity_bits(),
            });
        }

        self.replace_with(len_bits, |pos| {
            let septet = septets[pos / SEPTET_BITS];
            (septet >> (SEPTET_BITS - 1 - pos % SEPTET_BITS)) & 1 == 1
        });

        trace!(septets = septets.len(), used_bits = len_bits, "unpacked septets");

        Ok(())
    }

    /// Builds a fresh buffer of `capacity_bits` from a septet stream.
    pub fn from_septets(capacity_bits: u16, septets: &[u8]) -> Result<Self> {
        let mut buffer = BitBuffer::new(capacity_bits);
        buffer.load_septets(septets)?;

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_septet_len() {
        assert_eq!(septet_len(0), 0);
        assert_eq!(septet_len(7), 1);
        assert_eq!(septet_len(16), 3);
        assert_eq!(septet_len(87), 13);
    }

    #[test]
    fn test_empty_buffer_has_no_septets() {
        assert!(BitBuffer::new(128).to_septets().is_empty());
    }

    #[test]
    fn test_to_septets_pads_low_side() {
        let mut buffer = BitBuffer::new(128);
        buffer.add_field(2, 16).unwrap();

        // 0100000 | 0000000 | 00 + padding
        assert_eq!(buffer.to_septets(), vec![0x20, 0x00, 0x00]);
    }

    #[test]
    fn test_to_septets_msb_first_buffer() {
        let mut buffer = BitBuffer::with_bit_order(128, crate::bits::BitOrder::MsbFirst);
        buffer.add_field(2, 16).unwrap();

        assert_eq!(buffer.to_septets(), vec![0x00, 0x00, 0x40]);
    }

    #[test]
    fn test_to_septets_splits_bytes() {
        let mut buffer = BitBuffer::new(128);
        buffer.add_field(0xFF, 8).unwrap();

        // 1111111 | 1000000
        assert_eq!(buffer.to_septets(), vec![0x7F, 0x40]);
    }

    #[test]
    fn test_load_septets() {
        let mut buffer = BitBuffer::new(128);
        buffer.load_septets(&[0x7F, 0x40]).unwrap();

        assert_eq!(buffer.used_bits(), 14);
        assert_eq!(buffer.extract_field(8), 0xFF);
        assert_eq!(buffer.extract_field(6), 0);
    }

    #[test]
    fn test_load_septets_ignores_high_bit() {
        let buffer = BitBuffer::from_septets(128, &[0xFF]).unwrap();
        assert_eq!(buffer.as_bytes()[0], 0b1111_1110);
    }

    #[test]
    fn test_load_septets_empty() {
        let mut buffer = BitBuffer::new(128);
        buffer.add_field(3, 2).unwrap();
        buffer.load_septets(&[]).unwrap();

        assert_eq!(buffer.used_bits(), 0);
        assert!(buffer.to_septets().is_empty());
    }

    #[test]
    fn test_load_septets_capacity() {
        // 18 * 7 = 126 fits, 19 * 7 = 133 does not.
        assert!(BitBuffer::from_septets(128, &[0x7F; 18]).is_ok());

        let mut buffer = BitBuffer::new(128);
        buffer.add_field(5, 3).unwrap();
        let before = buffer.clone();

        assert_eq!(
            buffer.load_septets(&[0; 19]).unwrap_err(),
            CodecError::MalformedPayload {
                septets: 19,
                capacity_bits: 128
            }
        );
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_septets_round_trip_fields() {
        let mut buffer = BitBuffer::new(128);
        buffer.add_field(1, 2).unwrap();
        buffer.add_field(0x55, 7).unwrap();
        buffer.add_field(0xBEEF, 16).unwrap();

        let mut decoded = BitBuffer::from_septets(128, &buffer.to_septets()).unwrap();
        assert_eq!(decoded.used_bits(), 28);
        assert_eq!(decoded.extract_field(2), 1);
        assert_eq!(decoded.extract_field(7), 0x55);
        assert_eq!(decoded.extract_field(16), 0xBEEF);
    }

    #[test]
    fn test_septet_clean() {
        assert!(is_septet_clean(&[0x00, 0x7F]));
        assert!(!is_septet_clean(&[0x00, 0x80]));
        assert_eq!(first_non_septet(&[0x01, 0xF7, 0x90]), Some((1, 0xF7)));
    }
}
