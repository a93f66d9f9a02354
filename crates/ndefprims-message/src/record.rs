use std::fmt;

use bytes::Bytes;

use crate::error::{NdefError, Result};

/// Header flag: message begin.
pub const FLAG_MB: u8 = 0x80;
/// Header flag: message end.
pub const FLAG_ME: u8 = 0x40;
/// Header flag: chunked record.
pub const FLAG_CF: u8 = 0x20;
/// Header flag: short record (1-byte payload length).
pub const FLAG_SR: u8 = 0x10;
/// Header flag: id length field present.
pub const FLAG_IL: u8 = 0x08;
/// Mask selecting the TNF bits of a header byte.
pub const TNF_MASK: u8 = 0x07;

/// Largest payload that still fits a short record.
pub const SHORT_RECORD_MAX: usize = u8::MAX as usize;

/// Type Name Format: how a record's type field is to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tnf {
    Empty = 0x00,
    WellKnown = 0x01,
    MimeMedia = 0x02,
    AbsoluteUri = 0x03,
    External = 0x04,
    Unknown = 0x05,
    /// Only meaningful on the trailing chunks of a chunked record.
    Unchanged = 0x06,
    /// Never valid on the wire.
    Reserved = 0x07,
}

impl Tnf {
    /// Decode the low three bits of a header byte.
    pub fn from_bits(bits: u8) -> Self {
        match bits & TNF_MASK {
            0x00 => Tnf::Empty,
            0x01 => Tnf::WellKnown,
            0x02 => Tnf::MimeMedia,
            0x03 => Tnf::AbsoluteUri,
            0x04 => Tnf::External,
            0x05 => Tnf::Unknown,
            0x06 => Tnf::Unchanged,
            _ => Tnf::Reserved,
        }
    }

    /// The 3-bit wire value.
    pub fn bits(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Tnf::Empty => "empty",
            Tnf::WellKnown => "well-known",
            Tnf::MimeMedia => "mime-media",
            Tnf::AbsoluteUri => "absolute-uri",
            Tnf::External => "external",
            Tnf::Unknown => "unknown",
            Tnf::Unchanged => "unchanged",
            Tnf::Reserved => "reserved",
        }
    }
}

impl fmt::Display for Tnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Tnf {
    type Error = NdefError;

    /// Accepts 0..=6. Reserved (7) and values wider than three bits are rejected.
    fn try_from(value: u8) -> Result<Self> {
        if value > TNF_MASK {
            return Err(NdefError::malformed(format!(
                "TNF value {value} exceeds 3 bits"
            )));
        }
        match Tnf::from_bits(value) {
            Tnf::Reserved => Err(NdefError::malformed("reserved TNF value 7")),
            tnf => Ok(tnf),
        }
    }
}

/// One NDEF record.
///
/// Framing bits (MB/ME/CF/SR/IL) are not stored: they are derived from the
/// record's position in a message and the lengths of its fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    /// How to interpret `record_type`.
    pub tnf: Tnf,
    /// Record type bytes (e.g. `b"U"`, `b"text/vcard"`).
    pub record_type: Bytes,
    /// Record id. Empty means absent.
    pub id: Bytes,
    /// Record payload.
    pub payload: Bytes,
}

impl Record {
    /// Create a record, checking the TNF invariants.
    pub fn new(
        tnf: Tnf,
        record_type: impl Into<Bytes>,
        id: impl Into<Bytes>,
        payload: impl Into<Bytes>,
    ) -> Result<Self> {
        let record = Self {
            tnf,
            record_type: record_type.into(),
            id: id.into(),
            payload: payload.into(),
        };
        record.validate()?;
        Ok(record)
    }

    /// An EMPTY record (no type, id or payload).
    pub fn empty() -> Self {
        Self {
            tnf: Tnf::Empty,
            record_type: Bytes::new(),
            id: Bytes::new(),
            payload: Bytes::new(),
        }
    }

    /// A well-known record without an id.
    pub fn well_known(record_type: &'static [u8], payload: impl Into<Bytes>) -> Self {
        Self {
            tnf: Tnf::WellKnown,
            record_type: Bytes::from_static(record_type),
            id: Bytes::new(),
            payload: payload.into(),
        }
    }

    /// A MIME media record without an id.
    pub fn mime(media_type: impl Into<Bytes>, payload: impl Into<Bytes>) -> Self {
        Self {
            tnf: Tnf::MimeMedia,
            record_type: media_type.into(),
            id: Bytes::new(),
            payload: payload.into(),
        }
    }

    /// Replace the record id.
    pub fn with_id(mut self, id: impl Into<Bytes>) -> Self {
        self.id = id.into();
        self
    }

    /// True when the record carries an id.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Whether this record is a well-known record of the given type.
    pub fn is_well_known(&self, record_type: &[u8]) -> bool {
        self.tnf == Tnf::WellKnown && self.record_type.as_ref() == record_type
    }

    /// Whether the payload fits the 1-byte short-record length.
    pub fn is_short(&self) -> bool {
        self.payload.len() <= SHORT_RECORD_MAX
    }

    /// Number of bytes this record occupies on the wire.
    pub fn wire_size(&self) -> usize {
        let payload_len_size = if self.is_short() { 1 } else { 4 };
        let id_len_size = usize::from(self.has_id());
        2 + payload_len_size
            + id_len_size
            + self.record_type.len()
            + self.id.len()
            + self.payload.len()
    }

    /// Check the TNF invariants: no reserved TNF, no UNCHANGED TNF outside a
    /// chunk sequence, and EMPTY records carry no fields.
    pub fn validate(&self) -> Result<()> {
        match self.tnf {
            Tnf::Reserved => Err(NdefError::malformed("reserved TNF value 7")),
            // Only valid on middle and final chunks, which are never accepted.
            Tnf::Unchanged => Err(NdefError::malformed("UNCHANGED TNF on an unchunked record")),
            Tnf::Empty
                if !self.record_type.is_empty() || !self.id.is_empty() || !self.payload.is_empty() =>
            {
                Err(NdefError::malformed(
                    "EMPTY record must not carry type, id or payload",
                ))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tnf_bits_roundtrip() {
        for bits in 0u8..=7 {
            assert_eq!(Tnf::from_bits(bits).bits(), bits);
        }
        assert_eq!(Tnf::from_bits(0xD1), Tnf::WellKnown);
    }

    #[test]
    fn tnf_try_from_rejects_reserved_and_wide_values() {
        assert_eq!(Tnf::try_from(2).unwrap(), Tnf::MimeMedia);
        assert!(matches!(Tnf::try_from(7), Err(NdefError::MalformedNdef(_))));
        assert!(matches!(Tnf::try_from(9), Err(NdefError::MalformedNdef(_))));
    }

    #[test]
    fn empty_record_must_be_empty() {
        assert!(Record::new(Tnf::Empty, &b""[..], &b""[..], &b""[..]).is_ok());
        let err = Record::new(Tnf::Empty, &b"T"[..], &b""[..], &b""[..]).unwrap_err();
        assert!(matches!(err, NdefError::MalformedNdef(_)));
    }

    #[test]
    fn reserved_tnf_is_rejected() {
        let err = Record::new(Tnf::Reserved, &b"x"[..], &b""[..], &b""[..]).unwrap_err();
        assert!(matches!(err, NdefError::MalformedNdef(_)));
    }

    #[test]
    fn unchanged_tnf_is_rejected() {
        let err = Record::new(Tnf::Unchanged, &b""[..], &b""[..], &b"x"[..]).unwrap_err();
        assert!(matches!(err, NdefError::MalformedNdef(_)));
    }

    #[test]
    fn wire_size_accounts_for_optional_fields() {
        let short = Record::well_known(b"U", &b"\x03mozilla.org"[..]);
        assert_eq!(short.wire_size(), 16);

        let with_id = short.clone().with_id(&b"0"[..]);
        assert_eq!(with_id.wire_size(), 18);

        let long = Record::mime(&b"a/b"[..], vec![0u8; 256]);
        assert!(!long.is_short());
        assert_eq!(long.wire_size(), 2 + 4 + 3 + 256);
    }
}
