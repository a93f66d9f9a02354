use ndefprims_handover::HandoverMessage;
use ndefprims_message::{decode_message, Record};
use ndefprims_rtd::{classify, RecordContent};

use crate::cmd::{read_input, DecodeArgs};
use crate::exit::{ndef_error, CliResult, SUCCESS};
use crate::output::{print_records, OutputFormat, RecordView};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let wire = read_input(args.hex.as_deref(), args.file.as_ref())?;
    let records =
        decode_message(wire.clone()).map_err(|err| ndef_error("decode failed", err))?;

    let mut views = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let view = view_record(index, 0, record);
        let is_handover = view.content == "handover";
        views.push(view);

        if args.nested && is_handover {
            let inner = decode_message(record.payload.clone())
                .map_err(|err| ndef_error("nested decode failed", err))?;
            views.extend(
                inner
                    .iter()
                    .enumerate()
                    .map(|(index, inner)| view_record(index, 1, inner)),
            );
        }
    }

    tracing::info!(records = records.len(), bytes = wire.len(), "decoded message");
    print_records(&views, &wire, format);
    Ok(SUCCESS)
}

fn view_record(index: usize, depth: usize, record: &Record) -> RecordView {
    let (content, summary) = match classify(record) {
        Ok(content) => {
            let summary = summarize(record, &content);
            (content.kind(), summary)
        }
        Err(err) => {
            tracing::warn!(index, depth, error = %err, "record payload could not be interpreted");
            ("invalid", Some(err.to_string()))
        }
    };

    RecordView {
        index,
        depth,
        tnf: record.tnf.name(),
        record_type: String::from_utf8_lossy(&record.record_type).into_owned(),
        id: String::from_utf8_lossy(&record.id).into_owned(),
        payload_size: record.payload.len(),
        payload_hex: hex::encode(&record.payload),
        content,
        summary,
    }
}

fn summarize(record: &Record, content: &RecordContent) -> Option<String> {
    match content {
        RecordContent::Text(text) => Some(format!(
            "{} [{} {}]",
            text.text,
            text.language,
            text.encoding.name()
        )),
        RecordContent::Uri(uri) => Some(uri.uri.clone()),
        RecordContent::AbsoluteUri(uri) => Some(uri.clone()),
        RecordContent::VCard(card) => Some(format!("{} bytes", card.len())),
        RecordContent::Handover { .. } => summarize_handover(record),
        RecordContent::Empty
        | RecordContent::SmartPoster(_)
        | RecordContent::Unknown { .. } => None,
    }
}

fn summarize_handover(record: &Record) -> Option<String> {
    let message = match HandoverMessage::from_record(record) {
        Ok(message) => message,
        Err(err) => {
            tracing::warn!(error = %err, "handover payload could not be interpreted");
            return None;
        }
    };

    let mut parts = vec![format!("{:?}", message.kind).to_lowercase()];
    if let Some(collision) = message.collision_number {
        parts.push(format!("cr=0x{collision:04x}"));
    }
    match message.bluetooth_carrier() {
        Ok(Some((cps, oob))) => parts.push(format!("bt={} cps={cps}", oob.address)),
        Ok(None) => parts.push(format!("carriers={}", message.carriers.len())),
        Err(err) => tracing::warn!(error = %err, "bluetooth carrier could not be decoded"),
    }
    Some(parts.join(" "))
}
