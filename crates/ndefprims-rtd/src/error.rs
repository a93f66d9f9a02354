/// Errors that can occur while interpreting well-known record payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RtdError {
    /// A text record payload does not follow the RTD Text layout.
    #[error("malformed text record: {0}")]
    MalformedText(String),

    /// A URI record payload is empty.
    #[error("URI record has no abbreviation byte")]
    EmptyUri,

    /// A URI record uses an abbreviation code outside the RTD URI table.
    #[error("unknown URI abbreviation code 0x{0:02x}")]
    UnknownUriPrefix(u8),

    /// A record could not be framed or parsed.
    #[error("ndef error: {0}")]
    Ndef(#[from] ndefprims_message::NdefError),
}

pub type Result<T> = std::result::Result<T, RtdError>;
