//! NFC Forum well-known record types and record content classification.
//!
//! Turns the opaque [`Record`](ndefprims_message::Record) values produced by
//! the message parser into typed content (text, URI, vCard, ...) and builds
//! text and URI records for encoding.
//!
//! UTF-16 text and absolute-URI decoding follow the NFC Forum RTD documents
//! on a best-effort basis.

pub mod content;
pub mod error;
pub mod text;
pub mod uri;

pub use content::{classify, RecordContent, RTD_SMART_POSTER, VCARD_MIME_TYPES};
pub use error::{Result, RtdError};
pub use text::{utf8, TextEncoding, TextRecord, RTD_TEXT};
pub use uri::{UriRecord, RTD_URI, URI_PREFIXES};
