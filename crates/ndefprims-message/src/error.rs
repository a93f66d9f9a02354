/// Errors that can occur while reading, parsing or encoding NDEF messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NdefError {
    /// A read asked for more bytes than the buffer has left.
    #[error("read out of bounds ({requested} bytes requested, {remaining} remaining)")]
    OutOfBounds { requested: usize, remaining: usize },

    /// The byte stream or record set violates the NDEF layout rules.
    #[error("malformed NDEF: {0}")]
    MalformedNdef(String),

    /// A record carries the CF (chunk) flag.
    #[error("chunked NDEF records are not supported")]
    UnsupportedChunking,

    /// A field is too long for its length encoding.
    #[error("{field} too large ({size} bytes, max {max})")]
    RecordTooLarge {
        field: &'static str,
        size: usize,
        max: usize,
    },
}

impl NdefError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedNdef(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, NdefError>;
