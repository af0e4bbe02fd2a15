//! Type-state IMAP client connection.
//!
//! Uses the type-state pattern to enforce valid state transitions at compile time.
//! The IMAP connection states covered here are:
//!
//! - `NotAuthenticated`: Initial state after connection
//! - `Authenticated`: After a successful negotiation
//!
//! The client is also the [`Transport`] that negotiations drive: it tags
//! requests, writes them, and collects the responses of each exchange.

#![allow(clippy::missing_errors_doc)]

mod not_authenticated;
mod states;

use std::io;
use std::marker::PhantomData;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};

pub use self::states::{Authenticated, NotAuthenticated};
use super::framed::{ExchangeEnd, ExchangeReader, FramedStream};
use super::transport::Transport;
use crate::command::{Command, Request, RequestKind, TagGenerator, TaggedCommand};
use crate::parser::{Response, UntaggedResponse};
use crate::response::{CapabilityList, ResponseList};
use crate::types::{Capability, Status, Tag};
use crate::{Error, Result};

/// IMAP client connection with type-state.
///
/// The type parameter `State` tracks the connection state at compile time.
pub struct Client<S, State> {
    pub(crate) stream: FramedStream<S>,
    pub(crate) tag_gen: TagGenerator,
    pub(crate) capabilities: Vec<Capability>,
    pub(crate) pending: Option<Tag>,
    pub(crate) io_timeout: Option<Duration>,
    pub(crate) preauthenticated: bool,
    _state: PhantomData<State>,
}

// Manual Debug implementation since FramedStream doesn't implement Debug
impl<S, State> std::fmt::Debug for Client<S, State> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("tag_gen", &self.tag_gen)
            .field("capabilities", &self.capabilities)
            .field("pending", &self.pending)
            .field("io_timeout", &self.io_timeout)
            .field("preauthenticated", &self.preauthenticated)
            .finish_non_exhaustive()
    }
}

/// Shared implementation for all states.
impl<S, State> Client<S, State>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Returns the server capabilities.
    #[must_use]
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// Checks if the server has a specific capability.
    #[must_use]
    pub fn has_capability(&self, cap: &Capability) -> bool {
        self.capabilities.contains(cap)
    }

    /// Returns true if the server supports AUTH=PLAIN (SASL PLAIN mechanism).
    #[must_use]
    pub fn supports_auth_plain(&self) -> bool {
        self.capabilities
            .iter()
            .any(|c| matches!(c, Capability::Auth(m) if m.eq_ignore_ascii_case("PLAIN")))
    }

    /// Returns true if the server greeted with `PREAUTH`.
    #[must_use]
    pub const fn is_preauthenticated(&self) -> bool {
        self.preauthenticated
    }

    /// Returns true if a command is waiting for continuation data.
    #[must_use]
    pub const fn is_awaiting_continuation(&self) -> bool {
        self.pending.is_some()
    }

    /// Sets the bound on waiting for each server response.
    #[must_use]
    pub const fn with_io_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.io_timeout = timeout;
        self
    }

    /// Sends a NOOP command to keep the connection alive.
    pub async fn noop(&mut self) -> Result<()> {
        let responses = self.emit(TaggedCommand::new(Command::Noop)).await?;
        Self::check_tagged_ok(&responses)
    }

    /// Sends a CAPABILITY command and updates the stored capabilities.
    pub async fn capability(&mut self) -> Result<Vec<Capability>> {
        let responses = self.emit(TaggedCommand::new(Command::Capability)).await?;
        Self::check_tagged_ok(&responses)?;
        Ok(self.capabilities.clone())
    }

    /// Logs out and closes the connection.
    pub async fn logout(mut self) -> Result<()> {
        match self.emit(TaggedCommand::new(Command::Logout)).await {
            Ok(responses) => Self::check_tagged_ok(&responses),
            // Servers may hang up right after the untagged BYE
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Moves the connection into another state.
    pub(crate) fn into_state<Next>(self) -> Client<S, Next> {
        Client {
            stream: self.stream,
            tag_gen: self.tag_gen,
            capabilities: self.capabilities,
            pending: self.pending,
            io_timeout: self.io_timeout,
            preauthenticated: self.preauthenticated,
            _state: PhantomData,
        }
    }

    /// Picks the tag a request is emitted under.
    fn tag_for(&mut self, kind: RequestKind) -> Result<Tag> {
        match kind {
            RequestKind::Command => {
                if let Some(pending) = &self.pending {
                    return Err(Error::InvalidState(format!(
                        "command {pending} is still waiting for continuation data"
                    )));
                }
                Ok(self.tag_gen.next())
            }
            RequestKind::Continuation => self.pending.take().ok_or_else(|| {
                Error::InvalidState("no command is waiting for continuation data".to_string())
            }),
        }
    }

    /// Reads the responses of the exchange tagged `tag`.
    async fn read_exchange(&mut self, tag: &Tag) -> Result<(ResponseList, ExchangeEnd)> {
        let reader = ExchangeReader::new(tag);
        let read = reader.read(&mut self.stream);
        match self.io_timeout {
            Some(limit) => tokio::time::timeout(limit, read)
                .await
                .map_err(|_| Error::Timeout(limit))?,
            None => read.await,
        }
    }

    /// Refreshes cached capabilities from any CAPABILITY data in `responses`.
    fn absorb_capabilities(&mut self, responses: &ResponseList) {
        for response in responses {
            if let Ok(list) = CapabilityList::from_response(response) {
                tracing::trace!(count = list.as_slice().len(), "Capabilities updated");
                self.capabilities = list.as_slice().to_vec();
            }
            if let Response::Untagged(UntaggedResponse::Status {
                status: Status::Bye,
                text,
                ..
            }) = response
            {
                tracing::warn!(%text, "Server sent BYE");
            }
        }
    }

    /// Checks that the tagged response closing `responses` is OK.
    pub(crate) fn check_tagged_ok(responses: &ResponseList) -> Result<()> {
        let last = responses.last()?.assert_tagged()?;

        match last.status() {
            Some(Status::Ok | Status::PreAuth) => Ok(()),
            Some(Status::No) => Err(Error::No(last.text().to_string())),
            Some(Status::Bad) => Err(Error::Bad(last.text().to_string())),
            Some(Status::Bye) => Err(Error::Bye(last.text().to_string())),
            None => Err(Error::Protocol("tagged response without status".to_string())),
        }
    }
}

impl<S, State> Transport for Client<S, State>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    async fn emit<R: Request>(&mut self, request: R) -> Result<ResponseList> {
        let kind = request.kind();
        let tag = self.tag_for(kind)?;
        let request = request.with_tag(tag.clone());

        tracing::debug!(%tag, ?kind, "Emitting request");
        self.stream.write_request(&request.to_bytes()?).await?;

        let (responses, end) = self.read_exchange(&tag).await?;
        if end == ExchangeEnd::Continuation {
            tracing::debug!(%tag, "Server awaits continuation data");
            self.pending = Some(tag);
        }

        self.absorb_capabilities(&responses);
        Ok(responses)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio::io::AsyncWriteExt;
    use tokio_test::io::Builder;

    use super::*;
    use crate::command::{ContinuationPayload, ContinuationRequest};

    #[derive(Clone)]
    struct Raw(&'static [u8]);

    impl ContinuationPayload for Raw {
        fn build_payload(&self) -> Result<Vec<u8>> {
            Ok(self.0.to_vec())
        }
    }

    #[tokio::test]
    async fn test_emit_assigns_sequential_tags() {
        let mock = Builder::new()
            .read(b"* OK ready\r\n")
            .write(b"A0000 NOOP\r\n")
            .read(b"A0000 OK NOOP completed\r\n")
            .write(b"A0001 NOOP\r\n")
            .read(b"A0001 OK NOOP completed\r\n")
            .build();

        let mut client = Client::from_stream(mock).await.unwrap();
        client.noop().await.unwrap();
        client.noop().await.unwrap();
    }

    #[tokio::test]
    async fn test_emit_refreshes_capabilities() {
        let mock = Builder::new()
            .read(b"* OK ready\r\n")
            .write(b"A0000 CAPABILITY\r\n")
            .read(b"* CAPABILITY IMAP4rev1 AUTH=PLAIN\r\n")
            .read(b"A0000 OK done\r\n")
            .build();

        let mut client = Client::from_stream(mock).await.unwrap();
        assert!(client.capabilities().is_empty());

        let caps = client.capability().await.unwrap();
        assert_eq!(caps.len(), 2);
        assert!(client.supports_auth_plain());
    }

    #[tokio::test]
    async fn test_continuation_reuses_pending_tag() {
        let mock = Builder::new()
            .read(b"* OK ready\r\n")
            .write(b"A0000 AUTHENTICATE PLAIN\r\n")
            .read(b"+ \r\n")
            .write(b"payload\r\n")
            .read(b"A0000 OK done\r\n")
            .build();

        let mut client = Client::from_stream(mock).await.unwrap();
        let command = TaggedCommand::new(Command::Authenticate {
            mechanism: mailgate_sasl::Mechanism::Plain,
        });

        let responses = client.emit(command).await.unwrap();
        assert!(responses.first().unwrap().assert_continuation().is_ok());
        assert!(client.is_awaiting_continuation());

        let responses = client.emit(ContinuationRequest::new(Raw(b"payload"))).await.unwrap();
        assert_eq!(responses.last().unwrap().tag(), Some(&Tag::new("A0000")));
        assert!(!client.is_awaiting_continuation());
    }

    #[tokio::test]
    async fn test_continuation_without_pending_command() {
        let mock = Builder::new().read(b"* OK ready\r\n").build();
        let mut client = Client::from_stream(mock).await.unwrap();

        let result = client.emit(ContinuationRequest::new(Raw(b"payload"))).await;
        assert!(matches!(result, Err(Error::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_command_while_continuation_pending() {
        let mock = Builder::new()
            .read(b"* OK ready\r\n")
            .write(b"A0000 AUTHENTICATE PLAIN\r\n")
            .read(b"+ \r\n")
            .build();

        let mut client = Client::from_stream(mock).await.unwrap();
        client
            .emit(TaggedCommand::new(Command::Authenticate {
                mechanism: mailgate_sasl::Mechanism::Plain,
            }))
            .await
            .unwrap();

        assert!(matches!(client.noop().await, Err(Error::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_tagged_no_maps_to_error() {
        let mock = Builder::new()
            .read(b"* OK ready\r\n")
            .write(b"A0000 NOOP\r\n")
            .read(b"A0000 NO not now\r\n")
            .build();

        let mut client = Client::from_stream(mock).await.unwrap();
        match client.noop().await {
            Err(Error::No(text)) => assert_eq!(text, "not now"),
            other => panic!("expected NO, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_io_timeout() {
        let (stream, mut server) = tokio::io::duplex(1024);
        server.write_all(b"* OK ready\r\n").await.unwrap();

        let mut client = Client::from_stream(stream)
            .await
            .unwrap()
            .with_io_timeout(Some(Duration::from_millis(50)));

        assert!(matches!(client.noop().await, Err(Error::Timeout(_))));
        drop(server);
    }

    #[tokio::test]
    async fn test_logout_tolerates_hangup() {
        let mock = Builder::new()
            .read(b"* OK ready\r\n")
            .write(b"A0000 LOGOUT\r\n")
            .read(b"* BYE logging out\r\n")
            .build();

        let client = Client::from_stream(mock).await.unwrap();
        client.logout().await.unwrap();
    }
}
