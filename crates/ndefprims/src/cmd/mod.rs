use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::{hex_error, io_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod handover;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode an NDEF message and print its records.
    Decode(DecodeArgs),
    /// Encode a single text, URI or MIME record.
    Encode(EncodeArgs),
    /// Build a Bluetooth Connection Handover message.
    #[command(subcommand)]
    Handover(HandoverCommand),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Handover(command) => handover::run(command, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Message bytes as hex (whitespace ignored).
    #[arg(conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read raw message bytes from file.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Also decode messages nested in handover records.
    #[arg(long)]
    pub nested: bool,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// URI record payload.
    #[arg(long, conflicts_with_all = ["text", "mime"])]
    pub uri: Option<String>,
    /// Text record payload.
    #[arg(long, conflicts_with_all = ["uri", "mime"])]
    pub text: Option<String>,
    /// Language code for --text.
    #[arg(long, default_value = "en", requires = "text")]
    pub lang: String,
    /// Encode --text as UTF-16 instead of UTF-8.
    #[arg(long, requires = "text")]
    pub utf16: bool,
    /// MIME type of a media record; payload comes from --data.
    #[arg(long, conflicts_with_all = ["uri", "text"], requires = "data")]
    pub mime: Option<String>,
    /// Media record payload.
    #[arg(long, requires = "mime")]
    pub data: Option<String>,
    /// Record id.
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum HandoverCommand {
    /// Handover Request carrying a collision resolution number.
    Request(HandoverRequestArgs),
    /// Handover Select.
    Select(HandoverSelectArgs),
}

#[derive(Args, Debug)]
pub struct HandoverRequestArgs {
    /// Bluetooth address (e.g. 01:02:03:04:05:06).
    pub mac: String,
    /// Carrier power state (0 inactive, 1 active, 2 activating, 3 unknown).
    #[arg(long, default_value = "1")]
    pub cps: u8,
    /// Collision resolution number. Default: derived from the clock.
    #[arg(long)]
    pub collision: Option<u32>,
}

#[derive(Args, Debug)]
pub struct HandoverSelectArgs {
    /// Bluetooth address (e.g. 01:02:03:04:05:06).
    pub mac: String,
    /// Carrier power state (0 inactive, 1 active, 2 activating, 3 unknown).
    #[arg(long, default_value = "1")]
    pub cps: u8,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Resolve message bytes from a hex argument or a file.
pub(crate) fn read_input(hex_arg: Option<&str>, file: Option<&PathBuf>) -> CliResult<Vec<u8>> {
    if let Some(text) = hex_arg {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let compact = compact.strip_prefix("0x").unwrap_or(&compact);
        return hex::decode(compact).map_err(|err| hex_error("invalid hex input", err));
    }
    if let Some(path) = file {
        return std::fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::new(USAGE, "provide message bytes as hex or with --file"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_input_accepts_spaced_hex() {
        let bytes = read_input(Some("d1 01 0c\n55"), None).unwrap();
        assert_eq!(bytes, vec![0xd1, 0x01, 0x0c, 0x55]);

        let bytes = read_input(Some("0xd101"), None).unwrap();
        assert_eq!(bytes, vec![0xd1, 0x01]);
    }

    #[test]
    fn read_input_rejects_bad_hex_and_missing_input() {
        assert_eq!(read_input(Some("zz"), None).unwrap_err().code, USAGE);
        assert_eq!(read_input(None, None).unwrap_err().code, USAGE);
    }
}
