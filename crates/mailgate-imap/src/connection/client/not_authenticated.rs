//! Implementation for the not-authenticated state.

use std::marker::PhantomData;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};

use super::Client;
use super::states::{Authenticated, NotAuthenticated};
use crate::command::TagGenerator;
use crate::connection::config::Config;
use crate::connection::framed::FramedStream;
use crate::connection::stream::{self, ImapStream};
use crate::negotiation::Negotiation;
use crate::parser::{Response, ResponseParser, UntaggedResponse};
use crate::types::{ResponseCode, Status};
use crate::{Error, Result};

impl Client<ImapStream, NotAuthenticated> {
    /// Connects to the server described by `config` and reads its greeting.
    ///
    /// The greeting and every later response are bounded by
    /// `config.io_timeout`.
    pub async fn connect(config: &Config) -> Result<Self> {
        let stream = stream::connect(config).await?;
        Self::greet(stream, config.io_timeout).await
    }
}

impl<S> Client<S, NotAuthenticated>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new client from a connected stream.
    ///
    /// Reads the server greeting and initial capabilities.
    pub async fn from_stream(stream: S) -> Result<Self> {
        Self::greet(stream, None).await
    }

    async fn greet(stream: S, io_timeout: Option<Duration>) -> Result<Self> {
        let mut framed = FramedStream::new(stream);

        let greeting = match io_timeout {
            Some(limit) => tokio::time::timeout(limit, framed.read_response())
                .await
                .map_err(|_| Error::Timeout(limit))??,
            None => framed.read_response().await?,
        };

        let mut preauthenticated = false;
        let capabilities = match ResponseParser::parse(&greeting)? {
            Response::Untagged(UntaggedResponse::Status {
                status: Status::Bye,
                text,
                ..
            }) => return Err(Error::Bye(text)),
            Response::Untagged(UntaggedResponse::Status {
                status: status @ (Status::Ok | Status::PreAuth),
                code,
                ..
            }) => {
                if status == Status::PreAuth {
                    tracing::warn!("Server greeted with PREAUTH");
                    preauthenticated = true;
                }
                match code {
                    Some(ResponseCode::Capability(caps)) => caps,
                    _ => Vec::new(),
                }
            }
            other => {
                return Err(Error::Protocol(format!(
                    "unexpected greeting: {}",
                    other.name()
                )));
            }
        };

        tracing::debug!(capabilities = capabilities.len(), "Received greeting");

        Ok(Self {
            stream: framed,
            tag_gen: TagGenerator::default(),
            capabilities,
            pending: None,
            io_timeout,
            preauthenticated,
            _state: PhantomData,
        })
    }

    /// Runs `negotiation` on this connection.
    ///
    /// Consumes self and returns an authenticated client on success. On
    /// failure the connection is dropped; each attempt starts from a fresh
    /// connection.
    ///
    /// Fails with [`Error::InvalidState`] without sending anything if the
    /// server greeted with `PREAUTH`, since AUTHENTICATE is not valid there.
    pub async fn authenticate<N: Negotiation>(
        mut self,
        negotiation: &N,
    ) -> Result<Client<S, Authenticated>> {
        if self.preauthenticated {
            return Err(Error::InvalidState(
                "server greeted with PREAUTH; the connection is already authenticated".to_string(),
            ));
        }
        negotiation.negotiate(&mut self).await?;
        Ok(self.into_state())
    }
}
