use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One decoded record as shown by the CLI.
#[derive(Debug, Serialize)]
pub struct RecordView {
    pub index: usize,
    /// 0 for top-level records, 1 for records nested in a handover payload.
    pub depth: usize,
    pub tnf: &'static str,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub payload_size: usize,
    pub payload_hex: String,
    pub content: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Serialize)]
struct DecodeOutput<'a> {
    schema_id: &'a str,
    message_size: usize,
    records: &'a [RecordView],
}

#[derive(Serialize)]
struct EncodeOutput<'a> {
    schema_id: &'a str,
    size: usize,
    hex: String,
}

pub fn print_records(records: &[RecordView], message: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = DecodeOutput {
                schema_id: "https://schemas.3leaps.dev/ndefprims/cli/v1/ndef-message.schema.json",
                message_size: message.len(),
                records,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "DEPTH", "TNF", "TYPE", "ID", "SIZE", "CONTENT"]);
            for record in records {
                table.add_row(vec![
                    record.index.to_string(),
                    record.depth.to_string(),
                    record.tnf.to_string(),
                    record.record_type.clone(),
                    record.id.clone(),
                    record.payload_size.to_string(),
                    content_cell(record),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for record in records {
                println!(
                    "{}[{}] tnf={} type={:?} id={:?} size={} content={}",
                    "  ".repeat(record.depth),
                    record.index,
                    record.tnf,
                    record.record_type,
                    record.id,
                    record.payload_size,
                    content_cell(record)
                );
            }
        }
        OutputFormat::Raw => print_raw(message),
    }
}

pub fn print_encoded(message: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = EncodeOutput {
                schema_id: "https://schemas.3leaps.dev/ndefprims/cli/v1/ndef-encoded.schema.json",
                size: message.len(),
                hex: hex::encode(message),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => println!("{}", hex::encode(message)),
        OutputFormat::Raw => print_raw(message),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn content_cell(record: &RecordView) -> String {
    match &record.summary {
        Some(summary) => format!("{} ({summary})", record.content),
        None => record.content.to_string(),
    }
}
