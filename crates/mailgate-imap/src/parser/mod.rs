//! IMAP protocol parser.
//!
//! This module provides a sans-I/O parser for IMAP server responses.
//!
//! # Architecture
//!
//! - **Lexer**: Tokenizes raw bytes into IMAP tokens (atoms, numbers, brackets)
//! - **Response Parser**: Builds structured response objects from tokens
//!
//! # Example
//!
//! ```
//! use mailgate_imap::parser::{ResponseParser, Response};
//!
//! let response = ResponseParser::parse(b"+ \r\n").unwrap();
//! assert!(matches!(response, Response::Continuation { text: None }));
//! ```

pub mod lexer;
pub mod response;

pub use lexer::{Lexer, Token};
pub use response::{Response, ResponseParser, UntaggedResponse};
