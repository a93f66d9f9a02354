use ndefprims_message::{encode_message, Record};
use ndefprims_rtd::{TextEncoding, TextRecord, UriRecord};

use crate::cmd::EncodeArgs;
use crate::exit::{ndef_error, rtd_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let mut record = build_record(&args)?;
    if let Some(id) = &args.id {
        record = record.with_id(id.clone().into_bytes());
    }

    let wire = encode_message(&[record]).map_err(|err| ndef_error("encode failed", err))?;
    tracing::info!(bytes = wire.len(), "encoded message");
    print_encoded(&wire, format);
    Ok(SUCCESS)
}

fn build_record(args: &EncodeArgs) -> CliResult<Record> {
    if let Some(uri) = &args.uri {
        return Ok(UriRecord::new(uri.clone()).to_record());
    }
    if let Some(text) = &args.text {
        let encoding = if args.utf16 {
            TextEncoding::Utf16
        } else {
            TextEncoding::Utf8
        };
        return TextRecord::new(text.clone(), args.lang.clone())
            .with_encoding(encoding)
            .to_record()
            .map_err(|err| rtd_error("invalid text record", err));
    }
    if let (Some(mime), Some(data)) = (&args.mime, &args.data) {
        return Ok(Record::mime(
            mime.clone().into_bytes(),
            data.clone().into_bytes(),
        ));
    }
    Err(CliError::new(USAGE, "one of --uri, --text or --mime is required"))
}
