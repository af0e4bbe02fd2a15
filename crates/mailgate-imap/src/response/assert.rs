//! Shape assertions on server responses.
//!
//! Each assertion returns the response itself on success so checks can be
//! chained with `and_then`:
//!
//! ```
//! use mailgate_imap::parser::ResponseParser;
//! use mailgate_imap::types::Status;
//! use mailgate_imap::response::AssertionError;
//!
//! let response = ResponseParser::parse(b"A0001 OK done\r\n").unwrap();
//! let checked: Result<_, AssertionError> = response
//!     .assert_completion(Status::Ok)
//!     .and_then(|r| r.assert_tagged());
//! assert!(checked.is_ok());
//! ```

use thiserror::Error;

use crate::parser::Response;
use crate::types::{ResponseCode, Status};

/// A response did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionError {
    /// The emission produced no responses at all.
    #[error("no response received")]
    Empty,

    /// The response is not the expected command data.
    #[error("expected {expected} response, got {found}")]
    UnexpectedCommand {
        /// Expected response keyword.
        expected: String,
        /// Keyword of the response actually received.
        found: String,
    },

    /// The response is not the tagged completion of its exchange.
    #[error("expected tagged response, got {found}")]
    NotTagged {
        /// Keyword of the response actually received.
        found: String,
    },

    /// The response is not a continuation request.
    #[error("expected continuation request, got {found}")]
    NotContinuation {
        /// Keyword of the response actually received.
        found: String,
    },

    /// The response's completion status differs from the expected one.
    #[error("expected {expected} completion, got {}: {text}", .found.map_or("no status", Status::as_str))]
    UnexpectedCompletion {
        /// Expected status.
        expected: Status,
        /// Status actually received, `None` for responses without one.
        found: Option<Status>,
        /// Response code, if the server sent one.
        code: Option<ResponseCode>,
        /// Human-readable text of the response.
        text: String,
    },
}

impl Response {
    /// Asserts that this is a response of kind `name` (e.g. `CAPABILITY`).
    ///
    /// Keywords are compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::UnexpectedCommand`] on mismatch.
    pub fn assert_command(&self, name: &str) -> Result<&Self, AssertionError> {
        if self.is_untagged_kind(name) {
            Ok(self)
        } else {
            Err(AssertionError::UnexpectedCommand {
                expected: name.to_uppercase(),
                found: self.describe(),
            })
        }
    }

    /// Asserts that this is the tagged completion of its exchange.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::NotTagged`] for untagged and continuation
    /// responses.
    pub fn assert_tagged(&self) -> Result<&Self, AssertionError> {
        match self {
            Self::Tagged { .. } => Ok(self),
            _ => Err(AssertionError::NotTagged {
                found: self.describe(),
            }),
        }
    }

    /// Asserts that this is a continuation request.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::NotContinuation`] otherwise.
    pub fn assert_continuation(&self) -> Result<&Self, AssertionError> {
        match self {
            Self::Continuation { .. } => Ok(self),
            _ => Err(AssertionError::NotContinuation {
                found: self.describe(),
            }),
        }
    }

    /// Asserts that this response's completion status equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::UnexpectedCompletion`] when the status
    /// differs or the response carries no status.
    pub fn assert_completion(&self, expected: Status) -> Result<&Self, AssertionError> {
        let found = self.status();
        if found == Some(expected) {
            Ok(self)
        } else {
            Err(AssertionError::UnexpectedCompletion {
                expected,
                found,
                code: self.code().cloned(),
                text: self.text().to_string(),
            })
        }
    }

    fn is_untagged_kind(&self, name: &str) -> bool {
        matches!(self, Self::Untagged(_)) && self.name().eq_ignore_ascii_case(name)
    }

    fn describe(&self) -> String {
        match self {
            Self::Tagged { tag, status, .. } => format!("tagged {status} ({tag})"),
            Self::Untagged(_) => format!("untagged {}", self.name()),
            Self::Continuation { .. } => "continuation request".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::parser::ResponseParser;

    fn parse(line: &[u8]) -> Response {
        ResponseParser::parse(line).unwrap()
    }

    #[test]
    fn assert_command_matches_untagged_keyword() {
        let response = parse(b"* CAPABILITY IMAP4rev1\r\n");
        assert!(response.assert_command("CAPABILITY").is_ok());
        assert!(response.assert_command("capability").is_ok());
    }

    #[test]
    fn assert_command_rejects_other_kinds() {
        let err = parse(b"* OK hello\r\n")
            .assert_command("CAPABILITY")
            .unwrap_err();
        assert_eq!(
            err,
            AssertionError::UnexpectedCommand {
                expected: "CAPABILITY".to_string(),
                found: "untagged OK".to_string(),
            }
        );
    }

    #[test]
    fn assert_command_never_matches_tagged() {
        let response = parse(b"A0001 OK done\r\n");
        assert!(response.assert_command("OK").is_err());
    }

    #[test]
    fn assert_tagged() {
        assert!(parse(b"A0001 NO nope\r\n").assert_tagged().is_ok());
        assert!(matches!(
            parse(b"+ \r\n").assert_tagged(),
            Err(AssertionError::NotTagged { .. })
        ));
    }

    #[test]
    fn assert_continuation() {
        assert!(parse(b"+ \r\n").assert_continuation().is_ok());

        let err = parse(b"A0001 OK done\r\n")
            .assert_continuation()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected continuation request, got tagged OK (A0001)"
        );
    }

    #[test]
    fn assert_completion_captures_status_and_code() {
        let err = parse(b"A0002 NO [AUTHENTICATIONFAILED] Invalid credentials\r\n")
            .assert_completion(Status::Ok)
            .unwrap_err();

        assert_eq!(
            err,
            AssertionError::UnexpectedCompletion {
                expected: Status::Ok,
                found: Some(Status::No),
                code: Some(ResponseCode::AuthenticationFailed),
                text: "Invalid credentials".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "expected OK completion, got NO: Invalid credentials"
        );
    }

    #[test]
    fn assert_completion_on_continuation_has_no_status() {
        let err = parse(b"+ \r\n").assert_completion(Status::Ok).unwrap_err();
        assert!(matches!(
            err,
            AssertionError::UnexpectedCompletion { found: None, .. }
        ));
    }

    #[test]
    fn assertions_chain() {
        let response = parse(b"A0002 OK Logged in\r\n");
        let checked = response
            .assert_completion(Status::Ok)
            .and_then(Response::assert_tagged);
        assert_eq!(checked.unwrap(), &response);
    }
}
