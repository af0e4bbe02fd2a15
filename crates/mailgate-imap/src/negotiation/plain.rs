//! The PLAIN exchange: `AUTHENTICATE PLAIN`, a `+` prompt, then the
//! encoded credentials as continuation data.

use mailgate_sasl::{Mechanism, check_plain_credentials, plain_response};

use super::auth::Credentials;
use super::{AuthError, NegotiationState, Progress};
use crate::Result;
use crate::command::{Command, ContinuationPayload, ContinuationRequest, TaggedCommand};
use crate::connection::Transport;
use crate::parser::Response;
use crate::types::Status;

/// Credentials encoded as a SASL PLAIN response.
///
/// The base64 payload is built only when the request is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainCredentials(Credentials);

impl PlainCredentials {
    /// Wraps credentials for a PLAIN exchange.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Sasl`](crate::Error::Sasl) if the username or
    /// password contains NUL, which PLAIN uses as its field separator.
    pub fn new(credentials: Credentials) -> Result<Self> {
        check_plain_credentials(credentials.username(), credentials.password())?;
        Ok(Self(credentials))
    }
}

impl ContinuationPayload for PlainCredentials {
    fn build_payload(&self) -> Result<Vec<u8>> {
        Ok(plain_response(self.0.username(), self.0.password())?.into_bytes())
    }
}

pub(super) async fn exchange<T: Transport>(
    credentials: &Credentials,
    transport: &mut T,
    progress: &mut Progress,
) -> Result<()> {
    // Nothing is sent for credentials PLAIN cannot carry
    let payload = ContinuationRequest::new(PlainCredentials::new(credentials.clone())?);

    let initiate = TaggedCommand::new(Command::Authenticate {
        mechanism: Mechanism::Plain,
    });
    progress.advance(NegotiationState::AwaitContinuation);
    let responses = transport.emit(initiate).await?;
    responses
        .first()
        .and_then(Response::assert_continuation)
        .map_err(AuthError::ProtocolViolation)?;

    progress.advance(NegotiationState::AwaitCompletion);
    let responses = transport.emit(payload).await?;
    // Only the tagged completion can carry a rejection.
    responses
        .first()
        .and_then(Response::assert_tagged)
        .map_err(AuthError::ProtocolViolation)?
        .assert_completion(Status::Ok)
        .map_err(AuthError::from)?;

    Ok(())
}
