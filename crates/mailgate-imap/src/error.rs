//! Errors raised while connecting, exchanging and authenticating.

use std::time::Duration;

use thiserror::Error;

use crate::negotiation::AuthError;
use crate::response::AssertionError;

/// Everything that can go wrong on an IMAP connection.
#[derive(Debug, Error)]
pub enum Error {
    /// Socket read or write failed, or the peer hung up.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The TLS layer failed.
    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    /// The host name cannot be used for certificate verification.
    #[error("Invalid DNS name: {0}")]
    InvalidDnsName(#[from] rustls::pki_types::InvalidDnsNameError),

    /// A server response could not be parsed.
    #[error("Parse error at byte {position}: {message}")]
    Parse {
        /// Offset into the response line.
        position: usize,
        /// What the parser expected.
        message: String,
    },

    /// Credentials could not be encoded for the chosen mechanism.
    #[error("SASL error: {0}")]
    Sasl(#[from] mailgate_sasl::Error),

    /// Negotiation ended without authenticating.
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// A response had the wrong shape outside a negotiation.
    #[error("Unexpected response: {0}")]
    Assertion(#[from] AssertionError),

    /// Tagged `NO` completion.
    #[error("Server returned NO: {0}")]
    No(String),

    /// Tagged `BAD` completion.
    #[error("Server returned BAD: {0}")]
    Bad(String),

    /// The server is closing the connection.
    #[error("Server sent BYE: {0}")]
    Bye(String),

    /// No answer arrived within the configured bound.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// The request does not fit the connection's current exchange.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Framing limits exceeded or a greeting was malformed.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
