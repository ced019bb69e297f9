//! Schema: ordered fields that make up a payload.
//!
//! The field order is the wire order: the first field opens the packed
//! stream. How bits are ordered inside a field is up to the [BitBuffer].

use tracing::debug;

use crate::{
    bits::MAX_FIELD_BITS,
    buffer::BitBuffer,
    errors::{CodecError, Result},
    field::Field,
};

pub const KEY_MODE: Field = Field::new("keyMode", 2);
pub const PIN_MODE: Field = Field::new("pinMode", 2);
pub const LED_MODE: Field = Field::new("ledMode", 2);
pub const GPIO_OUTPUT_MODE: Field = Field::new("gpioOutputMode", 2);
pub const OUTPUT: Field = Field::new("output", 7);
pub const NORMAL_LED: Field = Field::new("normalLED", 7);
pub const RGB_LED: Field = Field::new("rgbLED", 7);
pub const DIT_PADDLE: Field = Field::new("ditPaddle", 7);
pub const DAH_PADDLE: Field = Field::new("dahPaddle", 7);
pub const STRAIGHT_KEY: Field = Field::new("straightKey", 7);
/// Words per minute ×100.
pub const WPM: Field = Field::new("wpm", 16);
pub const CHANNEL: Field = Field::new("channel", 7);
pub const NOTE: Field = Field::new("note", 7);
pub const VOLUME: Field = Field::new("volume", 7);

pub const VERSION: Field = Field::new("version", 16);

const CONFIG_FIELDS: [Field; 14] = [
    KEY_MODE,
    PIN_MODE,
    LED_MODE,
    GPIO_OUTPUT_MODE,
    OUTPUT,
    NORMAL_LED,
    RGB_LED,
    DIT_PADDLE,
    DAH_PADDLE,
    STRAIGHT_KEY,
    WPM,
    CHANNEL,
    NOTE,
    VOLUME,
];

const VERSION_FIELDS: [Field; 1] = [VERSION];

/// Layout of the keyer configuration payload (87 bits).
pub const CONFIG_SCHEMA: Schema<'static> = Schema::new(&CONFIG_FIELDS);

/// Layout of the firmware version payload (16 bits).
pub const VERSION_SCHEMA: Schema<'static> = Schema::new(&VERSION_FIELDS);

#[derive(Debug, Clone, Copy)]
pub struct Schema<'a> {
    fields: &'a [Field],
}

impl<'a> Schema<'a> {
    pub const fn new(fields: &'a [Field]) -> Self {
        Schema { fields }
    }

    /// Fields in wire order.
    pub fn fields(&self) -> &'a [Field] {
        self.fields
    }

    /// Sum of all field widths.
    pub fn total_bits(&self) -> usize {
        self.fields.iter().map(|field| field.bits as usize).sum()
    }

    /// Checks that every field is at most 16 bits wide and that the whole
    /// schema fits in `capacity_bits`.
    pub fn validate(&self, capacity_bits: usize) -> Result<()> {
        if let Some(field) = self.fields.iter().find(|field| field.bits > MAX_FIELD_BITS) {
            return Err(CodecError::InvalidFieldWidth(field.bits));
        }

        let total_bits = self.total_bits();
        if total_bits > capacity_bits {
            debug!(total_bits, capacity_bits, "schema does not fit in bit buffer");
            return Err(CodecError::CapacityExceeded {
                requested: total_bits,
                available: capacity_bits,
            });
        }

        Ok(())
    }

    /// Fails with [CodecError::ValueOutOfRange] on the first value wider than its field.
    pub fn check_values(&self, values: &[u64]) -> Result<()> {
        self.check_count(values.len())?;

        for (field, &value) in self.fields.iter().zip(values) {
            if !field.fits(value) {
                debug!(field = field.name, value, bits = field.bits, "value out of range");
                return Err(CodecError::ValueOutOfRange {
                    field: field.name,
                    value,
                    bits: field.bits,
                });
            }
        }

        Ok(())
    }

    /// Packs `values` (one per field, in schema order) into a fresh buffer.
    ///
    /// Each value is masked to its field width. Nothing is written if the
    /// schema itself does not fit.
    pub fn pack(&self, values: &[u64], capacity_bits: u16) -> Result<BitBuffer> {
        self.check_count(values.len())?;
        self.validate(capacity_bits as usize)?;

        let mut buffer = BitBuffer::new(capacity_bits);
        for (field, &value) in self.fields.iter().zip(values) {
            buffer.add_field(value & field.mask(), field.bits)?;
        }

        Ok(buffer)
    }

    /// Extracts one value per field. Fields past the written bits read as 0.
    pub fn unpack(&self, buffer: &mut BitBuffer) -> Vec<u64> {
        self.fields
            .iter()
            .map(|field| buffer.extract_field(field.bits))
            .collect()
    }

    /// Like [Schema::unpack] but fails if the buffer runs out of bits.
    pub fn try_unpack(&self, buffer: &mut BitBuffer) -> Result<Vec<u64>> {
        self.fields
            .iter()
            .map(|field| buffer.try_extract_field(field.bits))
            .collect()
    }

    fn check_count(&self, actual: usize) -> Result<()> {
        if actual != self.fields.len() {
            return Err(CodecError::FieldCountMismatch {
                expected: self.fields.len(),
                actual,
            });
        }

        Ok(())
    }
}
