//! NFC Forum Connection Handover over NDEF.
//!
//! A Handover Request (`Hr`) or Select (`Hs`) is a single well-known record
//! whose payload is itself an encoded NDEF message. Composition encodes the
//! inner message first and carries its bytes as an opaque payload; decoding
//! runs the same parser a second time over that payload.

pub mod carrier;
pub mod error;
pub mod handover;

pub use carrier::{
    AlternativeCarrier, BluetoothOob, CarrierPowerState, MacAddress, BLUETOOTH_OOB_MIME,
    DEFAULT_CARRIER_REFERENCE, RTD_ALTERNATIVE_CARRIER,
};
pub use error::{HandoverError, Result};
pub use handover::{
    decode_handover, encode_handover_request, encode_handover_select, HandoverKind,
    HandoverMessage, HandoverRequest, HandoverSelect, RTD_COLLISION_RESOLUTION,
    RTD_HANDOVER_REQUEST, RTD_HANDOVER_SELECT,
};
