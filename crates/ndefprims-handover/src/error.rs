/// Errors that can occur while composing or decomposing handover messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandoverError {
    /// The MAC address is not six colon-separated 2-hex-digit octets.
    #[error("invalid MAC address: {0:?}")]
    InvalidMacAddress(String),

    /// Carrier power state outside 0..=3.
    #[error("invalid carrier power state: {0}")]
    InvalidCarrierPowerState(u8),

    /// A handover or carrier record does not follow the expected layout.
    #[error("malformed handover message: {0}")]
    MalformedHandover(String),

    /// The outer or nested NDEF message could not be framed or parsed.
    #[error("ndef error: {0}")]
    Ndef(#[from] ndefprims_message::NdefError),
}

pub type Result<T> = std::result::Result<T, HandoverError>;
