//! Authentication negotiation.
//!
//! A negotiation drives a [`Transport`] through the exchanges needed to
//! authenticate a connection:
//!
//! 1. With [`AuthMethod::Auto`], ask for CAPABILITY and resolve a mechanism
//!    from the advertised `AUTH=` tokens.
//! 2. Run the resolved mechanism's exchange, e.g. `AUTHENTICATE PLAIN`
//!    followed by the credentials as continuation data.
//!
//! Every step asserts the shape of the server's answer and fails with an
//! [`AuthError`] otherwise. Nothing is retried and nothing is remembered
//! between calls.
//!
//! ```no_run
//! use mailgate_imap::connection::{Client, Config};
//! use mailgate_imap::negotiation::{AuthMethod, AuthNegotiation};
//!
//! # async fn example() -> mailgate_imap::Result<()> {
//! let client = Client::connect(&Config::new("imap.example.com")).await?;
//! let negotiation = AuthNegotiation::new(AuthMethod::Auto, "alice", "secret");
//! let client = client.authenticate(&negotiation).await?;
//! client.logout().await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod error;
mod mechanism;
mod plain;

#[cfg(test)]
mod testing;

pub use auth::{AuthMethod, AuthNegotiation, Credentials};
pub use error::AuthError;
pub use mechanism::{PRIORITY, resolve};
pub use plain::PlainCredentials;

use crate::Result;
use crate::connection::Transport;

/// A procedure that authenticates a connection.
#[allow(async_fn_in_trait)]
pub trait Negotiation {
    /// Runs the negotiation to completion over `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Auth`] when the server cannot or will not
    /// authenticate, and transport errors as they occur.
    async fn negotiate<T: Transport>(&self, transport: &mut T) -> Result<()>;
}

/// Where a negotiation stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    /// Nothing sent yet.
    Start,
    /// CAPABILITY sent to discover mechanisms.
    Capability,
    /// A concrete mechanism was chosen.
    MethodResolved,
    /// The initiating command was sent; a continuation prompt is expected.
    AwaitContinuation,
    /// Credentials were sent; the tagged completion is expected.
    AwaitCompletion,
    /// The server accepted the credentials.
    Done,
    /// The negotiation ended with an error.
    Failed,
}

/// Tracks and logs the state of one negotiation call.
#[derive(Debug)]
pub(crate) struct Progress {
    state: NegotiationState,
}

impl Progress {
    pub(crate) const fn new() -> Self {
        Self {
            state: NegotiationState::Start,
        }
    }

    pub(crate) const fn state(&self) -> NegotiationState {
        self.state
    }

    pub(crate) fn advance(&mut self, next: NegotiationState) {
        tracing::debug!(from = ?self.state, to = ?next, "Negotiation state");
        self.state = next;
    }
}
