//! The authentication negotiator.

use std::str::FromStr;

use mailgate_sasl::Mechanism;

use super::mechanism::{self, PRIORITY};
use super::{AuthError, Negotiation, NegotiationState, Progress};
use crate::Result;
use crate::command::{Command, TaggedCommand};
use crate::connection::Transport;
use crate::parser::Response;
use crate::response::CapabilityList;

/// How to pick the authentication mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// Ask the server and pick from what it advertises.
    #[default]
    Auto,
    /// SASL PLAIN, without asking the server first.
    Plain,
}

impl AuthMethod {
    /// Returns the mechanism for an explicit method, `None` for `Auto`.
    #[must_use]
    pub const fn mechanism(self) -> Option<Mechanism> {
        match self {
            Self::Auto => None,
            Self::Plain => Some(Mechanism::Plain),
        }
    }
}

impl FromStr for AuthMethod {
    type Err = mailgate_sasl::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        match s.parse::<Mechanism>()? {
            Mechanism::Plain => Ok(Self::Plain),
        }
    }
}

/// A username and password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authenticates with a username and password.
#[derive(Debug, Clone)]
pub struct AuthNegotiation {
    method: AuthMethod,
    credentials: Credentials,
}

impl AuthNegotiation {
    /// Creates a negotiation for `method` with the given credentials.
    #[must_use]
    pub fn new(method: AuthMethod, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            method,
            credentials: Credentials::new(username, password),
        }
    }

    /// Returns the requested method.
    #[must_use]
    pub const fn method(&self) -> AuthMethod {
        self.method
    }

    /// Runs the negotiation and reports the state it ended in.
    pub(crate) async fn drive<T: Transport>(
        &self,
        transport: &mut T,
    ) -> (NegotiationState, Result<()>) {
        let mut progress = Progress::new();
        let result = self.run(transport, &mut progress).await;

        match &result {
            Ok(()) => progress.advance(NegotiationState::Done),
            Err(err) => {
                tracing::debug!(error = %err, "Negotiation failed");
                progress.advance(NegotiationState::Failed);
            }
        }

        (progress.state(), result)
    }

    async fn run<T: Transport>(&self, transport: &mut T, progress: &mut Progress) -> Result<()> {
        let mechanism = match self.method.mechanism() {
            Some(mechanism) => mechanism,
            None => discover(transport, progress).await?,
        };

        progress.advance(NegotiationState::MethodResolved);
        tracing::debug!(%mechanism, username = self.credentials.username(), "Authenticating");

        mechanism::run(mechanism, &self.credentials, transport, progress).await
    }
}

impl Negotiation for AuthNegotiation {
    async fn negotiate<T: Transport>(&self, transport: &mut T) -> Result<()> {
        self.drive(transport).await.1
    }
}

/// Asks the server for its capabilities and resolves a mechanism.
async fn discover<T: Transport>(transport: &mut T, progress: &mut Progress) -> Result<Mechanism> {
    progress.advance(NegotiationState::Capability);
    let responses = transport.emit(TaggedCommand::new(Command::Capability)).await?;

    let capabilities = responses
        .first()
        .and_then(CapabilityList::from_response)
        .map_err(AuthError::ProtocolViolation)?;
    responses
        .last()
        .and_then(Response::assert_tagged)
        .map_err(AuthError::ProtocolViolation)?;

    let mechanism = mechanism::resolve(PRIORITY, &capabilities).ok_or_else(|| {
        AuthError::UnsupportedMechanism {
            attempted: mechanism::tokens(PRIORITY),
            advertised: capabilities.auth_mechanisms().map(str::to_string).collect(),
        }
    })?;
    Ok(mechanism)
}
