//! IMAP connection management.
//!
//! This module provides connection handling for IMAP servers, including:
//! - Configuration (host, port, security mode, timeouts)
//! - TLS/plaintext stream abstraction
//! - Framed I/O for IMAP protocol
//! - The [`Transport`] seam negotiations are written against
//! - Type-state connection wrapper

mod client;
mod config;
mod framed;
mod stream;
mod transport;

pub use client::{Authenticated, Client, NotAuthenticated};
pub use config::{Config, ConfigBuilder, Security};
pub use framed::{ExchangeEnd, ExchangeReader, FramedStream};
pub use stream::{ImapStream, connect, connect_plain, connect_tls, create_tls_connector};
pub use transport::Transport;
