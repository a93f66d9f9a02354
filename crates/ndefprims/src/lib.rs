//! Bit-exact NFC NDEF message codec with Connection Handover support.
//!
//! ndefprims parses raw NDEF byte streams into records, encodes records back
//! into the exact same bytes, and composes Bluetooth Handover Request/Select
//! messages that nest one NDEF message inside another.
//!
//! # Crate Structure
//!
//! - [`message`]: Byte cursor, record model, message parser and encoder
//! - [`rtd`]: Well-known record types and content classification (behind `rtd` feature)
//! - [`handover`]: Connection Handover composition/decoding (behind `handover` feature)

/// Re-export message types.
pub mod message {
    pub use ndefprims_message::*;
}

/// Re-export well-known record types (requires `rtd` feature).
#[cfg(feature = "rtd")]
pub mod rtd {
    pub use ndefprims_rtd::*;
}

/// Re-export handover types (requires `handover` feature).
#[cfg(feature = "handover")]
pub mod handover {
    pub use ndefprims_handover::*;
}
