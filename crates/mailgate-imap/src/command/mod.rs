//! IMAP command builder.
//!
//! This module provides the commands a client issues before authentication,
//! their serialization, and the [`Request`] contract through which the
//! transport emits both tagged commands and continuation data.

mod request;
mod tag_generator;

use mailgate_sasl::Mechanism;

pub use request::{ContinuationPayload, ContinuationRequest, Request, RequestKind, TaggedCommand};
pub use tag_generator::TagGenerator;

use crate::types::Tag;

/// IMAP command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// CAPABILITY command.
    Capability,
    /// NOOP command.
    Noop,
    /// LOGOUT command.
    Logout,
    /// AUTHENTICATE command.
    Authenticate {
        /// Authentication mechanism.
        mechanism: Mechanism,
    },
}

impl Command {
    /// Returns the command keyword.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Capability => "CAPABILITY",
            Self::Noop => "NOOP",
            Self::Logout => "LOGOUT",
            Self::Authenticate { .. } => "AUTHENTICATE",
        }
    }

    /// Serializes the command to bytes with the given tag.
    #[must_use]
    pub fn serialize(&self, tag: &Tag) -> Vec<u8> {
        let mut buf = Vec::new();

        buf.extend_from_slice(tag.as_str().as_bytes());
        buf.push(b' ');
        buf.extend_from_slice(self.name().as_bytes());

        // Credentials always follow a continuation prompt, never inline.
        if let Self::Authenticate { mechanism } = self {
            buf.push(b' ');
            buf.extend_from_slice(mechanism.name().as_bytes());
        }

        buf.extend_from_slice(b"\r\n");
        buf
    }
}
