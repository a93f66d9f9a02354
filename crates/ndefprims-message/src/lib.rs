//! NDEF record model with a bit-exact message parser and encoder.
//!
//! This is the core layer of ndefprims. Every record on the wire is laid out as:
//! - A 1-byte header (MB, ME, CF, SR, IL flags + 3-bit TNF)
//! - A 1-byte type length
//! - A 1-byte (SR) or 4-byte big-endian payload length
//! - An optional 1-byte id length (IL)
//! - The type, id and payload bytes, in that order
//!
//! Parsing and encoding are exact inverses, so nested messages (a message
//! carried as the payload of another record) survive any number of
//! parse/encode round trips.

pub mod cursor;
pub mod encoder;
pub mod error;
pub mod parser;
pub mod record;

pub use cursor::ByteCursor;
pub use encoder::{encode_message, encode_message_into};
pub use error::{NdefError, Result};
pub use parser::{
    decode_message, parse_message, parse_message_with_config, ParseConfig, DEFAULT_MAX_PAYLOAD,
    DEFAULT_MAX_RECORDS,
};
pub use record::{Record, Tnf};
