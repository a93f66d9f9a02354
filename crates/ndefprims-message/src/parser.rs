use bytes::Bytes;
use tracing::{debug, trace};

use crate::cursor::ByteCursor;
use crate::error::{NdefError, Result};
use crate::record::{Record, Tnf, FLAG_CF, FLAG_IL, FLAG_MB, FLAG_ME, FLAG_SR};

/// Default maximum payload length accepted per record: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// Default maximum number of records in one message.
pub const DEFAULT_MAX_RECORDS: usize = 1024;

/// Limits applied while parsing.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Maximum declared payload length per record. Default: 16 MiB.
    pub max_payload_size: usize,
    /// Maximum number of records per message. Default: 1024.
    pub max_records: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

/// Parse one NDEF message with the default limits.
///
/// Stops after the record carrying ME, or when the cursor runs dry. Bytes
/// following the ME record are left in the cursor.
pub fn parse_message(cursor: &mut ByteCursor) -> Result<Vec<Record>> {
    parse_message_with_config(cursor, &ParseConfig::default())
}

/// Parse a complete buffer as one NDEF message.
pub fn decode_message(buf: impl Into<Bytes>) -> Result<Vec<Record>> {
    let mut cursor = ByteCursor::new(buf);
    parse_message(&mut cursor)
}

/// Parse one NDEF message with explicit limits.
pub fn parse_message_with_config(
    cursor: &mut ByteCursor,
    config: &ParseConfig,
) -> Result<Vec<Record>> {
    let start = cursor.remaining();
    let mut records = Vec::new();

    while !cursor.is_empty() {
        if records.len() >= config.max_records {
            return Err(NdefError::malformed(format!(
                "message exceeds {} records",
                config.max_records
            )));
        }

        let (record, header) = parse_record(cursor, config)?;
        if records.is_empty() && header & FLAG_MB == 0 {
            return Err(NdefError::malformed("first record lacks MB flag"));
        }

        trace!(
            index = records.len(),
            tnf = %record.tnf,
            type_len = record.record_type.len(),
            id_len = record.id.len(),
            payload_len = record.payload.len(),
            "parsed NDEF record"
        );
        records.push(record);

        if header & FLAG_ME != 0 {
            break;
        }
    }

    if records.is_empty() {
        return Err(NdefError::malformed("message contains no records"));
    }

    debug!(
        records = records.len(),
        consumed = start - cursor.remaining(),
        "parsed NDEF message"
    );
    Ok(records)
}

/// Parse a single record, returning it with its raw header byte.
fn parse_record(cursor: &mut ByteCursor, config: &ParseConfig) -> Result<(Record, u8)> {
    let header = cursor.read_byte()?;

    if header & FLAG_CF != 0 {
        return Err(NdefError::UnsupportedChunking);
    }

    let tnf = Tnf::from_bits(header);
    if tnf == Tnf::Reserved {
        return Err(NdefError::malformed("reserved TNF value 7"));
    }

    let type_len = usize::from(cursor.read_byte()?);

    let payload_len = if header & FLAG_SR != 0 {
        usize::from(cursor.read_byte()?)
    } else {
        cursor.read_u32_be()? as usize
    };
    let id_len = if header & FLAG_IL != 0 {
        usize::from(cursor.read_byte()?)
    } else {
        0
    };

    let record_type = cursor.read_bytes(type_len)?;
    let id = cursor.read_bytes(id_len)?;
    let payload = cursor.read_bytes(payload_len)?;

    // Checked after the read so a truncated buffer reports OutOfBounds
    // whatever the declared size.
    if payload_len > config.max_payload_size {
        return Err(NdefError::malformed(format!(
            "payload length {payload_len} exceeds limit {}",
            config.max_payload_size
        )));
    }

    let record = Record {
        tnf,
        record_type,
        id,
        payload,
    };
    record.validate()?;

    Ok((record, header))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOZILLA_URI: &[u8] = &[
        0xd1, 0x01, 0x0c, 0x55, 0x03, b'm', b'o', b'z', b'i', b'l', b'l', b'a', b'.', b'o', b'r',
        b'g',
    ];

    #[test]
    fn parses_uri_record() {
        let records = decode_message(MOZILLA_URI).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.tnf, Tnf::WellKnown);
        assert_eq!(record.record_type.as_ref(), b"U");
        assert!(record.id.is_empty());
        assert_eq!(record.payload.as_ref(), b"\x03mozilla.org");
    }

    #[test]
    fn parses_multi_record_message_with_id_and_long_payload() {
        let mut wire = vec![
            0x99, 0x01, 0x01, 0x01, b'T', b'7', 0x02, // MB | SR | IL, WELL_KNOWN
        ];
        let long_payload = vec![0x5Au8; 300];
        wire.extend_from_slice(&[0x42, 0x03, 0x00, 0x00, 0x01, 0x2c]); // ME, MIME, 4-byte length
        wire.extend_from_slice(b"a/b");
        wire.extend_from_slice(&long_payload);

        let records = decode_message(wire).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_ref(), b"7");
        assert_eq!(records[0].payload.as_ref(), &[0x02]);
        assert_eq!(records[1].tnf, Tnf::MimeMedia);
        assert_eq!(records[1].record_type.as_ref(), b"a/b");
        assert_eq!(records[1].payload.as_ref(), long_payload.as_slice());
    }

    #[test]
    fn stops_at_message_end_and_leaves_trailing_bytes() {
        let mut wire = MOZILLA_URI.to_vec();
        wire.extend_from_slice(&[0xFE, 0x00]);

        let mut cursor = ByteCursor::new(wire);
        let records = parse_message(&mut cursor).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(cursor.as_slice(), &[0xFE, 0x00]);
    }

    #[test]
    fn exhausted_cursor_without_message_end_returns_records() {
        // MB set, ME clear
        let wire = vec![0x91, 0x01, 0x00, b'x'];
        let records = decode_message(wire).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn reserved_tnf_is_malformed() {
        let wire = vec![0xd7, 0x01, 0x00, b'x'];
        assert!(matches!(
            decode_message(wire),
            Err(NdefError::MalformedNdef(_))
        ));
    }

    #[test]
    fn unchanged_tnf_is_malformed() {
        let wire = vec![0xd6, 0x00, 0x01, 0xAA];
        assert!(matches!(
            decode_message(wire),
            Err(NdefError::MalformedNdef(_))
        ));
    }

    #[test]
    fn declared_length_past_end_is_out_of_bounds() {
        let mut wire = MOZILLA_URI.to_vec();
        wire.truncate(10);
        assert!(matches!(
            decode_message(wire),
            Err(NdefError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn oversized_length_past_end_is_out_of_bounds() {
        // 4-byte length 0x02000000, above the default limit, one payload byte present.
        let wire = vec![0xc1, 0x01, 0x02, 0x00, 0x00, 0x00, b'U', 0x03];
        assert_eq!(
            decode_message(wire),
            Err(NdefError::OutOfBounds {
                requested: 0x0200_0000,
                remaining: 1,
            })
        );
    }

    #[test]
    fn missing_message_begin_is_malformed() {
        let wire = vec![0x51, 0x01, 0x00, b'x'];
        assert!(matches!(
            decode_message(wire),
            Err(NdefError::MalformedNdef(_))
        ));
    }

    #[test]
    fn empty_input_is_malformed() {
        assert!(matches!(
            decode_message(Vec::<u8>::new()),
            Err(NdefError::MalformedNdef(_))
        ));
    }

    #[test]
    fn chunk_flag_is_unsupported() {
        let wire = vec![0xb1, 0x01, 0x01, b'T', 0x00, 0x56, 0x00, 0x01, 0x00];
        assert_eq!(decode_message(wire), Err(NdefError::UnsupportedChunking));
    }

    #[test]
    fn empty_tnf_with_payload_is_malformed() {
        let wire = vec![0xd0, 0x00, 0x01, 0xAA];
        assert!(matches!(
            decode_message(wire),
            Err(NdefError::MalformedNdef(_))
        ));
    }

    #[test]
    fn enforces_configured_limits() {
        let cfg = ParseConfig {
            max_payload_size: 4,
            ..ParseConfig::default()
        };
        let mut cursor = ByteCursor::from(MOZILLA_URI);
        assert!(matches!(
            parse_message_with_config(&mut cursor, &cfg),
            Err(NdefError::MalformedNdef(_))
        ));

        let cfg = ParseConfig {
            max_records: 1,
            ..ParseConfig::default()
        };
        let wire = vec![0x91, 0x01, 0x00, b'a', 0x51, 0x01, 0x00, b'b'];
        let mut cursor = ByteCursor::new(wire);
        assert!(matches!(
            parse_message_with_config(&mut cursor, &cfg),
            Err(NdefError::MalformedNdef(_))
        ));
    }
}
