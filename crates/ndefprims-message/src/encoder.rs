use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::error::{NdefError, Result};
use crate::record::{Record, FLAG_IL, FLAG_MB, FLAG_ME, FLAG_SR};

/// Encode records as one NDEF message.
///
/// Wire format per record:
/// ```text
/// ┌────────┬──────────┬──────────────┬───────────┬──────┬──────┬─────────┐
/// │ Header │ Type len │ Payload len  │ Id len    │ Type │ Id   │ Payload │
/// │ (1B)   │ (1B)     │ (1B SR / 4B) │ (1B, IL)  │      │      │         │
/// └────────┴──────────┴──────────────┴───────────┴──────┴──────┴─────────┘
/// ```
///
/// MB is set on the first record only and ME on the last only.
pub fn encode_message(records: &[Record]) -> Result<Bytes> {
    let mut dst = BytesMut::with_capacity(records.iter().map(Record::wire_size).sum());
    encode_message_into(records, &mut dst)?;
    Ok(dst.freeze())
}

/// Encode records as one NDEF message, appending to `dst`.
///
/// On error nothing is written to `dst`.
pub fn encode_message_into(records: &[Record], dst: &mut BytesMut) -> Result<()> {
    if records.is_empty() {
        return Err(NdefError::malformed("message must contain at least one record"));
    }
    for record in records {
        check_record(record)?;
    }

    let last = records.len() - 1;
    let start = dst.len();
    dst.reserve(records.iter().map(Record::wire_size).sum());

    for (index, record) in records.iter().enumerate() {
        let mut header = record.tnf.bits();
        if index == 0 {
            header |= FLAG_MB;
        }
        if index == last {
            header |= FLAG_ME;
        }
        if record.is_short() {
            header |= FLAG_SR;
        }
        if record.has_id() {
            header |= FLAG_IL;
        }

        dst.put_u8(header);
        dst.put_u8(record.record_type.len() as u8);
        if record.is_short() {
            dst.put_u8(record.payload.len() as u8);
        } else {
            dst.put_u32(record.payload.len() as u32);
        }
        if record.has_id() {
            dst.put_u8(record.id.len() as u8);
        }
        dst.put_slice(&record.record_type);
        dst.put_slice(&record.id);
        dst.put_slice(&record.payload);
    }

    debug!(
        records = records.len(),
        bytes = dst.len() - start,
        "encoded NDEF message"
    );
    Ok(())
}

fn check_record(record: &Record) -> Result<()> {
    record.validate()?;

    if record.record_type.len() > u8::MAX as usize {
        return Err(NdefError::RecordTooLarge {
            field: "type",
            size: record.record_type.len(),
            max: u8::MAX as usize,
        });
    }
    if record.id.len() > u8::MAX as usize {
        return Err(NdefError::RecordTooLarge {
            field: "id",
            size: record.id.len(),
            max: u8::MAX as usize,
        });
    }
    if record.payload.len() > u32::MAX as usize {
        return Err(NdefError::RecordTooLarge {
            field: "payload",
            size: record.payload.len(),
            max: u32::MAX as usize,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::decode_message;
    use crate::record::Tnf;

    const MOZILLA_URI: &[u8] = &[
        0xd1, 0x01, 0x0c, 0x55, 0x03, b'm', b'o', b'z', b'i', b'l', b'l', b'a', b'.', b'o', b'r',
        b'g',
    ];

    fn uri_record() -> Record {
        Record::well_known(b"U", &b"\x03mozilla.org"[..])
    }

    #[test]
    fn encodes_uri_record_bit_exact() {
        let wire = encode_message(&[uri_record()]).unwrap();
        assert_eq!(wire.as_ref(), MOZILLA_URI);
    }

    #[test]
    fn framing_flags_only_on_first_and_last() {
        let records = vec![
            Record::well_known(b"T", &b"\x02enone"[..]),
            Record::well_known(b"T", &b"\x02entwo"[..]),
            Record::well_known(b"T", &b"\x02enthree"[..]),
        ];
        let wire = encode_message(&records).unwrap();

        let mut offsets = Vec::new();
        let mut pos = 0usize;
        for record in &records {
            offsets.push(pos);
            pos += record.wire_size();
        }
        assert_eq!(pos, wire.len());

        let headers: Vec<u8> = offsets.iter().map(|&o| wire[o]).collect();
        assert_eq!(headers[0] & (FLAG_MB | FLAG_ME), FLAG_MB);
        assert_eq!(headers[1] & (FLAG_MB | FLAG_ME), 0);
        assert_eq!(headers[2] & (FLAG_MB | FLAG_ME), FLAG_ME);
    }

    #[test]
    fn short_record_flag_tracks_payload_length() {
        let at_limit = Record::mime(&b"a/b"[..], vec![1u8; 255]);
        let over_limit = Record::mime(&b"a/b"[..], vec![1u8; 256]);

        let wire = encode_message(&[at_limit]).unwrap();
        assert_ne!(wire[0] & FLAG_SR, 0);
        assert_eq!(wire[2], 255);

        let wire = encode_message(&[over_limit]).unwrap();
        assert_eq!(wire[0] & FLAG_SR, 0);
        assert_eq!(&wire[2..6], &[0x00, 0x00, 0x01, 0x00]);
    }

    #[test]
    fn id_length_emitted_only_with_id() {
        let record = Record::mime(&b"x/y"[..], &b"p"[..]).with_id(&b"0"[..]);
        let wire = encode_message(&[record]).unwrap();
        assert_eq!(
            wire.as_ref(),
            &[0xda, 0x03, 0x01, 0x01, b'x', b'/', b'y', b'0', b'p']
        );
    }

    #[test]
    fn roundtrip_preserves_records_in_order() {
        let records = vec![
            Record::empty(),
            uri_record().with_id(&b"uri"[..]),
            Record::mime(&b"text/vcard"[..], vec![b'v'; 1000]),
            Record::new(Tnf::External, &b"example.com:t"[..], &b""[..], &b"\x00"[..]).unwrap(),
        ];
        let wire = encode_message(&records).unwrap();
        let parsed = decode_message(wire.clone()).unwrap();
        assert_eq!(parsed, records);
        assert_eq!(encode_message(&parsed).unwrap(), wire);
    }

    #[test]
    fn nested_message_survives_reencoding() {
        let inner = encode_message(&[uri_record(), Record::mime(&b"a/b"[..], &b"z"[..])]).unwrap();
        let outer = encode_message(&[Record::well_known(b"Hs", inner.clone())]).unwrap();

        let parsed_outer = decode_message(outer.clone()).unwrap();
        assert_eq!(parsed_outer[0].payload, inner);
        let parsed_inner = decode_message(parsed_outer[0].payload.clone()).unwrap();
        assert_eq!(encode_message(&parsed_inner).unwrap(), inner);
        assert_eq!(encode_message(&parsed_outer).unwrap(), outer);
    }

    #[test]
    fn rejects_empty_message() {
        assert!(matches!(
            encode_message(&[]),
            Err(NdefError::MalformedNdef(_))
        ));
    }

    #[test]
    fn rejects_oversized_type_and_id() {
        let long_type = Record::mime(vec![b'a'; 256], &b""[..]);
        assert!(matches!(
            encode_message(&[long_type]),
            Err(NdefError::RecordTooLarge { field: "type", .. })
        ));

        let long_id = uri_record().with_id(vec![b'i'; 300]);
        assert!(matches!(
            encode_message(&[long_id]),
            Err(NdefError::RecordTooLarge { field: "id", .. })
        ));
    }

    #[test]
    fn rejects_invalid_tnf_without_writing() {
        let mut dst = BytesMut::new();
        let bad = Record {
            tnf: Tnf::Reserved,
            ..uri_record()
        };
        let err = encode_message_into(&[uri_record(), bad], &mut dst).unwrap_err();
        assert!(matches!(err, NdefError::MalformedNdef(_)));
        assert!(dst.is_empty());
    }
}
