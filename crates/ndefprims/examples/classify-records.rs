//! Classify example: builds a message with a text and a URI record, encodes
//! it, and classifies each decoded record.
//!
//! Run with:
//!   cargo run --example classify-records

use ndefprims::message::{decode_message, encode_message, Record};
use ndefprims::rtd::{classify, RecordContent, TextRecord, UriRecord};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let records = vec![
        TextRecord::new("hello", "en").to_record()?,
        UriRecord::new("https://www.nfc-forum.org").to_record(),
        Record::mime(&b"text/vcard"[..], &b"BEGIN:VCARD\r\nEND:VCARD\r\n"[..]),
    ];
    let wire = encode_message(&records)?;

    for (index, record) in decode_message(wire)?.iter().enumerate() {
        match classify(record)? {
            RecordContent::Text(text) => {
                println!("[{index}] text ({}): {}", text.language, text.text);
            }
            RecordContent::Uri(uri) => println!("[{index}] uri: {}", uri.uri),
            other => println!("[{index}] {} ({})", other.kind(), record.tnf),
        }
    }

    Ok(())
}
