//! Core IMAP types.
//!
//! The subset of RFC 9051 (`IMAP4rev2`) and RFC 3501 (`IMAP4rev1`) types
//! needed before a connection is authenticated.

mod capability;
mod identifiers;
mod response_code;

pub use capability::{Capability, Status};
pub use identifiers::Tag;
pub use response_code::ResponseCode;
