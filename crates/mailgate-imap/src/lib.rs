//! # mailgate-imap
//!
//! IMAP client authentication: picks a SASL mechanism from what the server
//! advertises and drives the continuation-based `AUTHENTICATE` exchange.
//!
//! ## Features
//!
//! - **Mechanism negotiation**: `Auto` discovers `AUTH=` capabilities and
//!   resolves them through a fixed priority table
//! - **Continuation requests**: payloads are built only at serialization
//!   time and re-tagging returns a new value
//! - **Type-state connection management**: a connection becomes
//!   `Authenticated` only through a successful negotiation
//! - **TLS via rustls**: Secure connections without OpenSSL dependency
//! - **Sans-I/O parser**: Protocol parsing separated from network I/O
//!
//! ## Quick Start
//!
//! ```no_run
//! use mailgate_imap::{AuthMethod, AuthNegotiation, Client, Config};
//!
//! #[tokio::main]
//! async fn main() -> mailgate_imap::Result<()> {
//!     let client = Client::connect(&Config::new("imap.example.com")).await?;
//!
//!     let negotiation = AuthNegotiation::new(AuthMethod::Auto, "alice", "secret");
//!     let client = client.authenticate(&negotiation).await?;
//!
//!     client.logout().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Connection States
//!
//! ```text
//! ┌─────────────────────┐
//! │   NotAuthenticated  │ ─── authenticate() ───→ Authenticated
//! └─────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`command`]: Commands and the request contract
//! - [`connection`]: Connection management, transport and type-state client
//! - [`negotiation`]: Mechanism selection and the AUTHENTICATE exchange
//! - [`parser`]: Sans-I/O response parser
//! - [`response`]: Response lists, capability lists and shape assertions
//! - [`types`]: Core IMAP types (status, capabilities, tags, response codes)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod command;
pub mod connection;
mod error;
pub mod negotiation;
pub mod parser;
pub mod response;
pub mod types;

pub use command::{
    Command, ContinuationPayload, ContinuationRequest, Request, RequestKind, TagGenerator,
    TaggedCommand,
};
pub use connection::{
    Authenticated, Client, Config, ConfigBuilder, ImapStream, NotAuthenticated, Security,
    Transport,
};
pub use error::{Error, Result};
pub use negotiation::{AuthError, AuthMethod, AuthNegotiation, Credentials, Negotiation};
pub use parser::{Response, ResponseParser, UntaggedResponse};
pub use response::{AssertionError, CapabilityList, ResponseList};
pub use types::{Capability, ResponseCode, Status, Tag};
