use ndefprims_message::Record;

use crate::error::{Result, RtdError};

/// Well-known type of a URI record.
pub const RTD_URI: &[u8] = b"U";

/// URI abbreviation codes from the NFC Forum RTD URI table.
pub const URI_PREFIXES: &[&str] = &[
    "",                           // 0x00 - no prepending
    "http://www.",                // 0x01
    "https://www.",               // 0x02
    "http://",                    // 0x03
    "https://",                   // 0x04
    "tel:",                       // 0x05
    "mailto:",                    // 0x06
    "ftp://anonymous:anonymous@", // 0x07
    "ftp://ftp.",                 // 0x08
    "ftps://",                    // 0x09
    "sftp://",                    // 0x0A
    "smb://",                     // 0x0B
    "nfs://",                     // 0x0C
    "ftp://",                     // 0x0D
    "dav://",                     // 0x0E
    "news:",                      // 0x0F
    "telnet://",                  // 0x10
    "imap:",                      // 0x11
    "rtsp://",                    // 0x12
    "urn:",                       // 0x13
    "pop:",                       // 0x14
    "sip:",                       // 0x15
    "sips:",                      // 0x16
    "tftp:",                      // 0x17
    "btspp://",                   // 0x18
    "btl2cap://",                 // 0x19
    "btgoep://",                  // 0x1A
    "tcpobex://",                 // 0x1B
    "irdaobex://",                // 0x1C
    "file://",                    // 0x1D
    "urn:epc:id:",                // 0x1E
    "urn:epc:tag:",               // 0x1F
    "urn:epc:pat:",               // 0x20
    "urn:epc:raw:",               // 0x21
    "urn:epc:",                   // 0x22
    "urn:nfc:",                   // 0x23
];

/// Decoded RTD URI record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriRecord {
    pub uri: String,
}

impl UriRecord {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    /// Expand the abbreviation byte and append the remainder.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        let (&code, rest) = payload.split_first().ok_or(RtdError::EmptyUri)?;
        let prefix = URI_PREFIXES
            .get(usize::from(code))
            .ok_or(RtdError::UnknownUriPrefix(code))?;

        let mut uri = String::with_capacity(prefix.len() + rest.len());
        uri.push_str(prefix);
        uri.push_str(&String::from_utf8_lossy(rest));
        Ok(Self { uri })
    }

    /// Build the payload, abbreviating with the longest matching prefix.
    pub fn to_payload(&self) -> Vec<u8> {
        let (code, prefix) = URI_PREFIXES
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, prefix)| self.uri.starts_with(*prefix))
            .max_by_key(|(_, prefix)| prefix.len())
            .map(|(code, prefix)| (code as u8, *prefix))
            .unwrap_or((0, ""));

        let rest = &self.uri.as_bytes()[prefix.len()..];
        let mut payload = Vec::with_capacity(1 + rest.len());
        payload.push(code);
        payload.extend_from_slice(rest);
        payload
    }

    /// Build a well-known `U` record.
    pub fn to_record(&self) -> Record {
        Record::well_known(RTD_URI, self.to_payload())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_abbreviation() {
        let record = UriRecord::from_payload(b"\x04wiki.mozilla.org/WebAPI/WebNFC").unwrap();
        assert_eq!(record.uri, "https://wiki.mozilla.org/WebAPI/WebNFC");

        let record = UriRecord::from_payload(b"\x00urn:x").unwrap();
        assert_eq!(record.uri, "urn:x");
    }

    #[test]
    fn abbreviates_with_longest_prefix() {
        let payload = UriRecord::new("http://www.mozilla.org").to_payload();
        assert_eq!(payload, b"\x01mozilla.org");

        let payload = UriRecord::new("http://mozilla.org").to_payload();
        assert_eq!(payload, b"\x03mozilla.org");

        let payload = UriRecord::new("urn:epc:id:sgtin").to_payload();
        assert_eq!(payload, b"\x1esgtin");

        let payload = UriRecord::new("geo:1,2").to_payload();
        assert_eq!(payload, b"\x00geo:1,2");
    }

    #[test]
    fn builds_the_mozilla_uri_record() {
        let record = UriRecord::new("http://mozilla.org").to_record();
        assert!(record.is_well_known(RTD_URI));
        assert_eq!(record.payload.as_ref(), b"\x03mozilla.org");
    }

    #[test]
    fn rejects_empty_and_unknown_codes() {
        assert_eq!(UriRecord::from_payload(b""), Err(RtdError::EmptyUri));
        assert_eq!(
            UriRecord::from_payload(b"\x24x"),
            Err(RtdError::UnknownUriPrefix(0x24))
        );
    }
}
