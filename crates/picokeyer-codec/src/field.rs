//! A single entry of a [crate::schema::Schema].

use crate::bits;

/// Named unsigned field with a fixed width in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Name used in error reports.
    pub name: &'static str,
    /// Width on the wire. At most 16.
    pub bits: u8,
}

impl Field {
    pub const fn new(name: &'static str, bits: u8) -> Self {
        Field { name, bits }
    }

    /// Mask covering the field width.
    pub fn mask(&self) -> u64 {
        bits::mask(self.bits)
    }

    /// Whether `value` fits without truncation.
    pub fn fits(&self, value: u64) -> bool {
        value & !self.mask() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits() {
        let channel = Field::new("channel", 7);
        assert!(channel.fits(127));
        assert!(!channel.fits(200));
        assert_eq!(200 & channel.mask(), 72);
    }
}
