//! Requests the transport can emit.
//!
//! A request is either a tagged command that opens a new exchange, or
//! continuation data sent after the server answered a command with a `+`
//! prompt. Both share the same contract: tags are attached by building a new
//! value with [`Request::with_tag`], and wire bytes are produced only when
//! [`Request::to_bytes`] is called.

use super::Command;
use crate::types::Tag;
use crate::{Error, Result};

/// How the transport must treat a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Opens a new exchange and gets a fresh tag.
    Command,
    /// Continues the exchange waiting on a continuation prompt and carries
    /// that exchange's tag.
    Continuation,
}

/// A request that can be tagged and serialized.
pub trait Request {
    /// Returns how the transport correlates this request.
    fn kind(&self) -> RequestKind;

    /// Returns the assigned tag, or `None` before [`Request::with_tag`].
    fn tag(&self) -> Option<&Tag>;

    /// Returns a copy of this request carrying `tag`.
    ///
    /// The receiver is left untouched, so one request can serve as a
    /// template for many emissions.
    #[must_use]
    fn with_tag(&self, tag: Tag) -> Self
    where
        Self: Sized;

    /// Produces the wire bytes, CRLF included.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be serialized in its current
    /// state, such as a command that was never tagged.
    fn to_bytes(&self) -> Result<Vec<u8>>;
}

/// A command together with the tag it is emitted under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedCommand {
    tag: Option<Tag>,
    command: Command,
}

impl TaggedCommand {
    /// Wraps an untagged command.
    #[must_use]
    pub const fn new(command: Command) -> Self {
        Self { tag: None, command }
    }

    /// Returns the wrapped command.
    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.command
    }
}

impl From<Command> for TaggedCommand {
    fn from(command: Command) -> Self {
        Self::new(command)
    }
}

impl Request for TaggedCommand {
    fn kind(&self) -> RequestKind {
        RequestKind::Command
    }

    fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    fn with_tag(&self, tag: Tag) -> Self {
        Self {
            tag: Some(tag),
            command: self.command.clone(),
        }
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let tag = self.tag.as_ref().ok_or_else(|| {
            Error::InvalidState(format!("{} command has no tag", self.command.name()))
        })?;
        Ok(self.command.serialize(tag))
    }
}

/// Builds the data line of a continuation request.
///
/// Implementors supply only the payload; tagging, copying and line
/// termination are handled by [`ContinuationRequest`].
pub trait ContinuationPayload {
    /// Builds the payload bytes, without the trailing CRLF.
    ///
    /// Called at serialization time, never at construction.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be encoded.
    fn build_payload(&self) -> Result<Vec<u8>>;
}

/// Continuation data sent in answer to a `+` prompt.
#[derive(Clone, PartialEq, Eq)]
pub struct ContinuationRequest<P> {
    tag: Option<Tag>,
    payload: P,
}

impl<P> ContinuationRequest<P> {
    /// Creates an untagged continuation request.
    #[must_use]
    pub const fn new(payload: P) -> Self {
        Self { tag: None, payload }
    }

    /// Returns the payload source.
    #[must_use]
    pub const fn payload(&self) -> &P {
        &self.payload
    }
}

// Payloads usually hold secrets, so only the tag is shown
impl<P> std::fmt::Debug for ContinuationRequest<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContinuationRequest")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

impl<P> Request for ContinuationRequest<P>
where
    P: ContinuationPayload + Clone,
{
    fn kind(&self) -> RequestKind {
        RequestKind::Continuation
    }

    fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    fn with_tag(&self, tag: Tag) -> Self {
        Self {
            tag: Some(tag),
            payload: self.payload.clone(),
        }
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = self.payload.build_payload()?;
        buf.extend_from_slice(b"\r\n");
        Ok(buf)
    }
}
