//! # mailgate-sasl
//!
//! SASL payload encoding shared by the mailgate protocol clients.
//!
//! Only the client side of the PLAIN mechanism (RFC 4616) is implemented.
//! The encoded responses are protocol-agnostic and can be sent as the
//! continuation data of IMAP `AUTHENTICATE` or SMTP `AUTH`.
//!
//! ## Example
//!
//! ```
//! use mailgate_sasl::{Mechanism, plain_response};
//!
//! let mechanism: Mechanism = "plain".parse().unwrap();
//! assert_eq!(mechanism.name(), "PLAIN");
//! assert_eq!(plain_response("alice", "secret")?, "AGFsaWNlAHNlY3JldA==");
//! # Ok::<(), mailgate_sasl::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod mechanism;
mod plain;

pub use error::{Error, Result};
pub use mechanism::Mechanism;
pub use plain::{check_plain_credentials, decode_plain_response, plain_response};
