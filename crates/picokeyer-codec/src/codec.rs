//! Encoding and decoding of the keyer payloads.
//!
//! A fresh [BitBuffer] is built for every call, so a [ConfigCodec] can be
//! shared freely between threads.
//!
//! By default the codec mirrors the firmware: out-of-range values are masked
//! to their field width, high bits of incoming bytes are ignored, and bits
//! missing from a short payload read as 0. [CodecOptions::set_strict] turns
//! each of those into an error.

use tracing::{debug, trace};

use crate::{
    buffer::{BitBuffer, DEFAULT_CAPACITY_BITS},
    config::{ConfigRecord, VersionRecord},
    errors::{CodecError, Result},
    schema::{CONFIG_SCHEMA, Schema, VERSION_SCHEMA},
    septet,
};

/// Options for a [ConfigCodec].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Fail instead of masking, ignoring high bits, or reading missing fields as 0.
    pub strict: bool,
    /// Bit capacity of the scratch buffer.
    pub capacity_bits: u16,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            strict: false,
            capacity_bits: DEFAULT_CAPACITY_BITS,
        }
    }
}

impl CodecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_strict(&mut self, strict: bool) -> &mut Self {
        self.strict = strict;
        self
    }

    pub fn set_capacity_bits(&mut self, capacity_bits: u16) -> &mut Self {
        self.capacity_bits = capacity_bits;
        self
    }
}

/// Stateless codec for the config and version payloads.
///
/// # Example
///
/// ```
/// use picokeyer_codec::{CodecOptions, ConfigCodec, ConfigRecord};
///
/// let mut options = CodecOptions::new();
/// options.set_strict(true);
/// let codec = ConfigCodec::with_options(options);
///
/// let record = ConfigRecord::default();
/// let payload = codec.encode(&record).unwrap();
/// assert_eq!(payload.len(), 13);
/// assert_eq!(codec.decode(&payload).unwrap(), record);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigCodec {
    options: CodecOptions,
}

impl ConfigCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Packs `record` into a septet payload.
    pub fn encode(&self, record: &ConfigRecord) -> Result<Vec<u8>> {
        self.encode_values(&CONFIG_SCHEMA, &record.to_values())
    }

    /// Rebuilds a config record from a septet payload.
    ///
    /// The payload length is not checked against the schema width.
    pub fn decode(&self, septets: &[u8]) -> Result<ConfigRecord> {
        let values = self.decode_values(&CONFIG_SCHEMA, septets)?;
        let values: [u64; 14] = values.try_into().map_err(|values: Vec<u64>| {
            CodecError::FieldCountMismatch {
                expected: 14,
                actual: values.len(),
            }
        })?;

        Ok(ConfigRecord::from_values(&values))
    }

    pub fn encode_version(&self, record: &VersionRecord) -> Result<Vec<u8>> {
        self.encode_values(&VERSION_SCHEMA, &[record.version as u64])
    }

    pub fn decode_version(&self, septets: &[u8]) -> Result<VersionRecord> {
        let values = self.decode_values(&VERSION_SCHEMA, septets)?;

        Ok(VersionRecord {
            version: values.first().copied().unwrap_or(0) as u16,
        })
    }

    fn encode_values(&self, schema: &Schema<'_>, values: &[u64]) -> Result<Vec<u8>> {
        if self.options.strict {
            schema.check_values(values)?;
        }

        let buffer = schema.pack(values, self.options.capacity_bits)?;
        let septets = buffer.to_septets();

        trace!(
            fields = values.len(),
            bits = buffer.used_bits(),
            septets = septets.len(),
            "encoded payload"
        );

        Ok(septets)
    }

    fn decode_values(&self, schema: &Schema<'_>, septets: &[u8]) -> Result<Vec<u64>> {
        if self.options.strict {
            if let Some((index, byte)) = septet::first_non_septet(septets) {
                debug!(index, byte, "payload byte has its high bit set");
                return Err(CodecError::NotSeptet { index, byte });
            }
        }

        let mut buffer = BitBuffer::from_septets(self.options.capacity_bits, septets)?;

        let values = if self.options.strict {
            schema.try_unpack(&mut buffer)?
        } else {
            if buffer.used_bits() < schema.total_bits() {
                debug!(
                    bits = buffer.used_bits(),
                    expected = schema.total_bits(),
                    "payload shorter than schema, missing fields read as 0"
                );
            }
            schema.unpack(&mut buffer)
        };

        trace!(
            septets = septets.len(),
            fields = values.len(),
            "decoded payload"
        );

        Ok(values)
    }
}

/// Encodes a config record with the default options.
pub fn encode(record: &ConfigRecord) -> Result<Vec<u8>> {
    ConfigCodec::default().encode(record)
}

/// Decodes a config payload with the default options.
pub fn decode(septets: &[u8]) -> Result<ConfigRecord> {
    ConfigCodec::default().decode(septets)
}

pub fn encode_version(record: &VersionRecord) -> Result<Vec<u8>> {
    ConfigCodec::default().encode_version(record)
}

pub fn decode_version(septets: &[u8]) -> Result<VersionRecord> {
    ConfigCodec::default().decode_version(septets)
}
