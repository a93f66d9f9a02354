use std::fmt;
use std::io;

use ndefprims_handover::HandoverError;
use ndefprims_message::NdefError;
use ndefprims_rtd::RtdError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn hex_error(context: &str, err: hex::FromHexError) -> CliError {
    CliError::new(USAGE, format!("{context}: {err}"))
}

pub fn ndef_error(context: &str, err: NdefError) -> CliError {
    CliError::new(DATA_INVALID, format!("{context}: {err}"))
}

pub fn rtd_error(context: &str, err: RtdError) -> CliError {
    match err {
        RtdError::Ndef(err) => ndef_error(context, err),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn handover_error(context: &str, err: HandoverError) -> CliError {
    match err {
        HandoverError::InvalidMacAddress(_) | HandoverError::InvalidCarrierPowerState(_) => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        HandoverError::Ndef(err) => ndef_error(context, err),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handover_input_errors_are_usage_errors() {
        let err = handover_error("x", HandoverError::InvalidCarrierPowerState(9));
        assert_eq!(err.code, USAGE);

        let err = handover_error("x", HandoverError::InvalidMacAddress("zz".to_string()));
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn codec_errors_are_data_errors() {
        let err = ndef_error("decode failed", NdefError::UnsupportedChunking);
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.to_string().starts_with("decode failed: "));

        let err = rtd_error("x", RtdError::Ndef(NdefError::UnsupportedChunking));
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn io_errors_map_by_kind() {
        let err = io_error("read", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(err.code, PERMISSION_DENIED);
        let err = io_error("read", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.code, FAILURE);
    }
}
