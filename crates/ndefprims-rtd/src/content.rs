use bytes::Bytes;
use ndefprims_message::{Record, Tnf};

use crate::error::Result;
use crate::text::{TextRecord, RTD_TEXT};
use crate::uri::{UriRecord, RTD_URI};

/// Well-known type of a smart poster record.
pub const RTD_SMART_POSTER: &[u8] = b"Sp";

/// MIME types recognised as vCard, compared case-insensitively.
pub const VCARD_MIME_TYPES: &[&str] = &["text/vcard", "text/x-vcard"];

// Mirrors `ndefprims_handover::{RTD_HANDOVER_REQUEST, RTD_HANDOVER_SELECT}`;
// this crate sits below the handover crate and cannot import them.
const RTD_HANDOVER_REQUEST: &[u8] = b"Hr";
const RTD_HANDOVER_SELECT: &[u8] = b"Hs";

/// What a record carries, keyed by `(tnf, type)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordContent {
    Empty,
    Text(TextRecord),
    Uri(UriRecord),
    /// Smart poster payload, left to the application.
    SmartPoster(Bytes),
    VCard(Bytes),
    /// URI taken verbatim from the type field.
    AbsoluteUri(String),
    /// Handover Request (`Hr`) or Select (`Hs`); the payload is a nested message.
    Handover { record_type: Bytes, payload: Bytes },
    Unknown { tnf: Tnf, record_type: Bytes },
}

impl RecordContent {
    /// Short label for the content kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RecordContent::Empty => "empty",
            RecordContent::Text(_) => "text",
            RecordContent::Uri(_) => "url",
            RecordContent::SmartPoster(_) => "smartposter",
            RecordContent::VCard(_) => "vcard",
            RecordContent::AbsoluteUri(_) => "absolute-uri",
            RecordContent::Handover { .. } => "handover",
            RecordContent::Unknown { .. } => "unknown",
        }
    }
}

/// Classify a record. Records with no known interpretation map to `Unknown`.
pub fn classify(record: &Record) -> Result<RecordContent> {
    let record_type = record.record_type.as_ref();
    let content = match record.tnf {
        Tnf::Empty => RecordContent::Empty,
        Tnf::WellKnown if record_type == RTD_TEXT => {
            RecordContent::Text(TextRecord::from_payload(&record.payload)?)
        }
        Tnf::WellKnown if record_type == RTD_URI => {
            RecordContent::Uri(UriRecord::from_payload(&record.payload)?)
        }
        Tnf::WellKnown if record_type == RTD_SMART_POSTER => {
            RecordContent::SmartPoster(record.payload.clone())
        }
        Tnf::WellKnown
            if record_type == RTD_HANDOVER_REQUEST || record_type == RTD_HANDOVER_SELECT =>
        {
            RecordContent::Handover {
                record_type: record.record_type.clone(),
                payload: record.payload.clone(),
            }
        }
        Tnf::MimeMedia if is_vcard(record_type) => RecordContent::VCard(record.payload.clone()),
        Tnf::AbsoluteUri => {
            RecordContent::AbsoluteUri(String::from_utf8_lossy(record_type).into_owned())
        }
        tnf => RecordContent::Unknown {
            tnf,
            record_type: record.record_type.clone(),
        },
    };
    Ok(content)
}

fn is_vcard(media_type: &[u8]) -> bool {
    VCARD_MIME_TYPES
        .iter()
        .any(|vcard| media_type.eq_ignore_ascii_case(vcard.as_bytes()))
}
