use bytes::{BufMut, Bytes, BytesMut};
use ndefprims_message::Record;
use tracing::debug;

use crate::error::{Result, RtdError};

/// Well-known type of a text record.
pub const RTD_TEXT: &[u8] = b"T";

const STATUS_UTF16: u8 = 0x80;
const STATUS_RESERVED: u8 = 0x40;
const LANGUAGE_LEN_MASK: u8 = 0x3F;

const BOM_BE: [u8; 2] = [0xFE, 0xFF];
const BOM_LE: [u8; 2] = [0xFF, 0xFE];

/// Lossless conversion between text and UTF-8 bytes.
///
/// Absent input maps to absent output; neither direction fails.
pub mod utf8 {
    /// Encode text as UTF-8 bytes.
    pub fn encode(text: Option<&str>) -> Option<Vec<u8>> {
        text.map(|text| text.as_bytes().to_vec())
    }

    /// Decode UTF-8 bytes. Invalid sequences become U+FFFD.
    pub fn decode(bytes: Option<&[u8]>) -> Option<String> {
        bytes.map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Character encoding of a text record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    Utf8,
    Utf16,
}

impl TextEncoding {
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf16 => "UTF-16",
        }
    }
}

/// Decoded RTD Text record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextRecord {
    pub text: String,
    /// IANA language code, e.g. `en` or `en-US`.
    pub language: String,
    pub encoding: TextEncoding,
}

impl TextRecord {
    /// A UTF-8 text record.
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            encoding: TextEncoding::Utf8,
        }
    }

    /// Switch the encoding used when building the payload.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Decode a text record payload.
    ///
    /// UTF-16 text honors a leading byte-order mark and defaults to big-endian.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        let (&status, rest) = payload
            .split_first()
            .ok_or_else(|| RtdError::MalformedText("empty payload".to_string()))?;

        if status & STATUS_RESERVED != 0 {
            debug!(status, "text record has reserved status bit set");
        }

        let language_len = usize::from(status & LANGUAGE_LEN_MASK);
        if language_len > rest.len() {
            return Err(RtdError::MalformedText(format!(
                "language length {language_len} exceeds payload ({} bytes)",
                rest.len()
            )));
        }
        let (language, body) = rest.split_at(language_len);
        let language = String::from_utf8_lossy(language).into_owned();

        if status & STATUS_UTF16 == 0 {
            return Ok(Self {
                text: String::from_utf8_lossy(body).into_owned(),
                language,
                encoding: TextEncoding::Utf8,
            });
        }

        Ok(Self {
            text: decode_utf16(body)?,
            language,
            encoding: TextEncoding::Utf16,
        })
    }

    /// Build the RTD Text payload.
    pub fn to_payload(&self) -> Result<Bytes> {
        let language = self.language.as_bytes();
        if language.len() > usize::from(LANGUAGE_LEN_MASK) {
            return Err(RtdError::MalformedText(format!(
                "language code is {} bytes, max {}",
                language.len(),
                LANGUAGE_LEN_MASK
            )));
        }

        let mut status = language.len() as u8;
        if self.encoding == TextEncoding::Utf16 {
            status |= STATUS_UTF16;
        }

        let mut payload = BytesMut::with_capacity(1 + language.len() + self.text.len() * 2);
        payload.put_u8(status);
        payload.put_slice(language);
        match self.encoding {
            TextEncoding::Utf8 => payload.put_slice(self.text.as_bytes()),
            TextEncoding::Utf16 => {
                for unit in self.text.encode_utf16() {
                    payload.put_u16(unit);
                }
            }
        }
        Ok(payload.freeze())
    }

    /// Build a well-known `T` record.
    pub fn to_record(&self) -> Result<Record> {
        Ok(Record::well_known(RTD_TEXT, self.to_payload()?))
    }
}

fn decode_utf16(body: &[u8]) -> Result<String> {
    if body.len() % 2 != 0 {
        return Err(RtdError::MalformedText(format!(
            "UTF-16 text has odd length {}",
            body.len()
        )));
    }

    let (little_endian, body) = match body.get(..2) {
        Some(bom) if bom == BOM_LE.as_slice() => (true, &body[2..]),
        Some(bom) if bom == BOM_BE.as_slice() => (false, &body[2..]),
        _ => (false, body),
    };

    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            if little_endian {
                u16::from_le_bytes([pair[0], pair[1]])
            } else {
                u16::from_be_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    Ok(String::from_utf16_lossy(&units))
}
