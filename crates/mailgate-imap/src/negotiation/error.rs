//! Authentication failures.

use thiserror::Error;

use crate::response::AssertionError;
use crate::types::{ResponseCode, Status};

/// Terminal outcome of a failed negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No advertised capability maps to a mechanism this client supports.
    #[error(
        "server does not advertise a supported AUTH method (tried: {}; offered: {advertised:?})",
        .attempted.join(", ")
    )]
    UnsupportedMechanism {
        /// Capability tokens that were looked for.
        attempted: Vec<String>,
        /// SASL mechanisms the server did advertise.
        advertised: Vec<String>,
    },

    /// The server answered with a response of the wrong shape.
    #[error("protocol violation: {0}")]
    ProtocolViolation(AssertionError),

    /// The server refused the credentials.
    #[error(
        "server rejected authentication with {}: {text}",
        .status.map_or("no status", Status::as_str)
    )]
    Rejected {
        /// Completion status of the tagged response.
        status: Option<Status>,
        /// Response code, e.g. `AUTHENTICATIONFAILED`.
        code: Option<ResponseCode>,
        /// Human-readable text from the server.
        text: String,
    },
}

impl AuthError {
    /// Returns true if the server blamed the credentials themselves.
    #[must_use]
    pub const fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            Self::Rejected { code: Some(code), .. } if code.is_credential_failure()
        )
    }
}

/// A completion with a wrong status is a rejection; any other mismatch is a
/// protocol violation.
impl From<AssertionError> for AuthError {
    fn from(err: AssertionError) -> Self {
        match err {
            AssertionError::UnexpectedCompletion {
                found: status @ Some(_),
                code,
                text,
                ..
            } => Self::Rejected { status, code, text },
            other => Self::ProtocolViolation(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_mechanism_names_tokens() {
        let err = AuthError::UnsupportedMechanism {
            attempted: vec!["AUTH=PLAIN".to_string()],
            advertised: vec!["LOGIN".to_string(), "XOAUTH2".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "server does not advertise a supported AUTH method \
             (tried: AUTH=PLAIN; offered: [\"LOGIN\", \"XOAUTH2\"])"
        );
    }

    #[test]
    fn unsupported_mechanism_without_any_offer() {
        let err = AuthError::UnsupportedMechanism {
            attempted: vec!["AUTH=PLAIN".to_string()],
            advertised: Vec::new(),
        };
        assert!(err.to_string().ends_with("(tried: AUTH=PLAIN; offered: [])"));
    }

    #[test]
    fn wrong_status_becomes_rejection() {
        let err = AuthError::from(AssertionError::UnexpectedCompletion {
            expected: Status::Ok,
            found: Some(Status::No),
            code: Some(ResponseCode::AuthenticationFailed),
            text: "bad password".to_string(),
        });

        assert!(err.is_credential_failure());
        assert_eq!(
            err.to_string(),
            "server rejected authentication with NO: bad password"
        );
    }

    #[test]
    fn missing_status_is_protocol_violation() {
        let err = AuthError::from(AssertionError::UnexpectedCompletion {
            expected: Status::Ok,
            found: None,
            code: None,
            text: String::new(),
        });
        assert!(matches!(err, AuthError::ProtocolViolation(_)));
        assert!(!err.is_credential_failure());
    }

    #[test]
    fn shape_mismatch_is_protocol_violation() {
        let err = AuthError::from(AssertionError::NotContinuation {
            found: "tagged OK (A0001)".to_string(),
        });
        assert!(matches!(err, AuthError::ProtocolViolation(_)));
    }
}
