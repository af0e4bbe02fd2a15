//! Response codes.

use super::Capability;

/// Response code carried in brackets by a status response.
///
/// Besides the RFC 9051 codes a client meets before authentication, this
/// covers the RFC 5530 codes servers use to explain a failed AUTHENTICATE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseCode {
    /// ALERT: Human-readable message that MUST be shown to user.
    Alert,
    /// CAPABILITY response.
    Capability(Vec<Capability>),
    /// AUTHENTICATIONFAILED: credentials were rejected.
    AuthenticationFailed,
    /// AUTHORIZATIONFAILED: authenticated, but not authorized as requested.
    AuthorizationFailed,
    /// EXPIRED: credentials are no longer valid.
    Expired,
    /// PRIVACYREQUIRED: the operation needs an encrypted connection.
    PrivacyRequired,
    /// CONTACTADMIN: the user should contact the administrator.
    ContactAdmin,
    /// UNAVAILABLE: temporary failure on the server side.
    Unavailable,
    /// Unknown response code.
    Unknown(String),
}

impl ResponseCode {
    /// Maps a code atom without arguments to a response code.
    #[must_use]
    pub fn from_atom(atom: &str) -> Self {
        match atom.to_uppercase().as_str() {
            "ALERT" => Self::Alert,
            "AUTHENTICATIONFAILED" => Self::AuthenticationFailed,
            "AUTHORIZATIONFAILED" => Self::AuthorizationFailed,
            "EXPIRED" => Self::Expired,
            "PRIVACYREQUIRED" => Self::PrivacyRequired,
            "CONTACTADMIN" => Self::ContactAdmin,
            "UNAVAILABLE" => Self::Unavailable,
            _ => Self::Unknown(atom.to_string()),
        }
    }

    /// Returns true if the code reports a credential problem rather than a
    /// transient or transport one.
    #[must_use]
    pub const fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailed | Self::AuthorizationFailed | Self::Expired
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_atom_known_codes() {
        assert_eq!(
            ResponseCode::from_atom("AUTHENTICATIONFAILED"),
            ResponseCode::AuthenticationFailed
        );
        assert_eq!(ResponseCode::from_atom("alert"), ResponseCode::Alert);
        assert_eq!(
            ResponseCode::from_atom("UNAVAILABLE"),
            ResponseCode::Unavailable
        );
    }

    #[test]
    fn from_atom_unknown_keeps_text() {
        assert_eq!(
            ResponseCode::from_atom("X-CUSTOM"),
            ResponseCode::Unknown("X-CUSTOM".to_string())
        );
    }

    #[test]
    fn credential_failures() {
        assert!(ResponseCode::AuthenticationFailed.is_credential_failure());
        assert!(ResponseCode::Expired.is_credential_failure());
        assert!(!ResponseCode::Unavailable.is_credential_failure());
        assert!(!ResponseCode::Alert.is_credential_failure());
    }
}
