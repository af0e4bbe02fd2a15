//! Error types for SASL encoding.

use thiserror::Error;

/// Errors that can occur while encoding or decoding SASL payloads.
#[derive(Debug, Error)]
pub enum Error {
    /// Mechanism name is not one this crate implements.
    #[error("Unsupported SASL mechanism: {0}")]
    UnsupportedMechanism(String),

    /// Payload is not valid base64.
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded payload does not follow the mechanism's message format.
    #[error("Malformed {mechanism} message: {message}")]
    Malformed {
        /// Mechanism whose format was violated.
        mechanism: &'static str,
        /// Description of what went wrong.
        message: String,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
