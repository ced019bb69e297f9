//! Error type shared by the bit buffer, the septet transform and the codec.

/// Failures reported by [crate::buffer::BitBuffer] and [crate::codec::ConfigCodec].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// A write or strict read needs more bits than the buffer has left.
    #[error("bit capacity exceeded ({requested} bits requested, {available} available)")]
    CapacityExceeded { requested: usize, available: usize },

    /// The septet count implies more bits than the buffer can hold.
    #[error("malformed payload ({septets} septets do not fit in {capacity_bits} bits)")]
    MalformedPayload { septets: usize, capacity_bits: usize },

    /// Field widths are limited to 16 bits.
    #[error("invalid field width {0} (max 16 bits)")]
    InvalidFieldWidth(u8),

    /// Strict mode: the value does not fit the declared field width.
    #[error("value {value} does not fit in {bits} bits for field `{field}`")]
    ValueOutOfRange {
        field: &'static str,
        value: u64,
        bits: u8,
    },

    /// Strict mode: an input byte has its high bit set.
    #[error("byte 0x{byte:02X} at index {index} is not a septet")]
    NotSeptet { index: usize, byte: u8 },

    /// The number of values handed to a schema does not match its field count.
    #[error("expected {expected} field values, got {actual}")]
    FieldCountMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
