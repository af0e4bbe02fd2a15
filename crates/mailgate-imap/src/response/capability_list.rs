//! Capabilities advertised by a server.

use crate::parser::{Response, UntaggedResponse};
use crate::types::{Capability, ResponseCode};

use super::AssertionError;

/// Capabilities parsed from one CAPABILITY response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityList {
    capabilities: Vec<Capability>,
}

impl CapabilityList {
    /// Creates a list from already parsed capabilities.
    #[must_use]
    pub const fn new(capabilities: Vec<Capability>) -> Self {
        Self { capabilities }
    }

    /// Extracts capabilities from an untagged CAPABILITY response, or from a
    /// status response carrying a `[CAPABILITY ...]` code.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::UnexpectedCommand`] if the response carries
    /// no capability data.
    pub fn from_response(response: &Response) -> Result<Self, AssertionError> {
        match response {
            Response::Untagged(UntaggedResponse::Capability(caps)) => Ok(Self::new(caps.clone())),
            _ => match response.code() {
                Some(ResponseCode::Capability(caps)) => Ok(Self::new(caps.clone())),
                _ => response.assert_command("CAPABILITY").map(|_| Self::default()),
            },
        }
    }

    /// Returns true if `token` (e.g. `AUTH=PLAIN`) is advertised.
    ///
    /// IMAP atoms are case-insensitive, so `auth=plain` matches too.
    #[must_use]
    pub fn is_advertising(&self, token: &str) -> bool {
        self.capabilities
            .iter()
            .any(|cap| cap.to_string().eq_ignore_ascii_case(token))
    }

    /// Returns the advertised SASL mechanism names.
    pub fn auth_mechanisms(&self) -> impl Iterator<Item = &str> {
        self.capabilities.iter().filter_map(Capability::auth_mechanism)
    }

    /// Returns the parsed capabilities.
    #[must_use]
    pub fn as_slice(&self) -> &[Capability] {
        &self.capabilities
    }
}
