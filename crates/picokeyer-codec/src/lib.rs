//! # picokeyer-codec
//!
//! Bit-packed configuration payloads for the PicoKeyer MIDI SysEx protocol.
//!
//! A record of small integer fields is packed in schema order into a 128-bit
//! buffer, each field least significant bit first as the keyer firmware does,
//! then re-cut into 7-bit groups so that no payload byte has its high bit set. The result is what travels between the SysEx header and
//! footer; framing itself is left to the caller.
//!
//! ## Example
//!
//! ```
//! use picokeyer_codec::{ConfigRecord, VersionRecord, decode, decode_version, encode, encode_version};
//!
//! let record = ConfigRecord {
//!     key_mode: 2,
//!     wpm: 18.5,
//!     ..Default::default()
//! };
//! let payload = encode(&record).unwrap();
//! assert!(payload.iter().all(|&b| b <= 0x7F));
//! assert_eq!(decode(&payload).unwrap(), record);
//!
//! let version = encode_version(&VersionRecord::new(2)).unwrap();
//! assert_eq!(decode_version(&version).unwrap().version, 2);
//! ```

mod bits;
pub mod buffer;
pub mod codec;
pub mod config;
pub mod errors;
pub mod field;
pub mod schema;
pub mod septet;

pub use bits::BitOrder;
pub use buffer::{BitBuffer, DEFAULT_CAPACITY_BITS, WIRE_BIT_ORDER};
pub use codec::{CodecOptions, ConfigCodec, decode, decode_version, encode, encode_version};
pub use config::{ConfigRecord, FIRMWARE_VERSION, KeyMode, LedMode, VersionRecord};
pub use errors::{CodecError, Result};
pub use field::Field;
pub use schema::{CONFIG_SCHEMA, Schema, VERSION_SCHEMA};
