//! PLAIN mechanism (RFC 4616).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::{Error, Result};

/// Checks that a username and password fit in a PLAIN message.
///
/// NUL separates the message fields, so neither value may contain one.
///
/// # Errors
///
/// Returns [`Error::Malformed`] naming the offending field.
pub fn check_plain_credentials(username: &str, password: &str) -> Result<()> {
    for (field, value) in [("username", username), ("password", password)] {
        if value.contains('\0') {
            return Err(Error::Malformed {
                mechanism: "PLAIN",
                message: format!("{field} contains a NUL byte"),
            });
        }
    }
    Ok(())
}

/// Generates the PLAIN initial response.
///
/// Format: `\0<username>\0<password>` (base64 encoded)
///
/// The authorization identity is left empty, so the server derives it from
/// the authentication identity.
///
/// # Errors
///
/// Returns [`Error::Malformed`] if either value contains NUL.
///
/// # Example
///
/// ```
/// use mailgate_sasl::plain_response;
///
/// let response = plain_response("user@example.com", "password123").unwrap();
/// assert!(!response.contains("password123"));
/// ```
pub fn plain_response(username: &str, password: &str) -> Result<String> {
    check_plain_credentials(username, password)?;
    let auth_string = format!("\0{username}\0{password}");
    Ok(STANDARD.encode(auth_string.as_bytes()))
}

/// Decodes a PLAIN response into `(authzid, authcid, password)`.
///
/// Mostly useful for test servers and diagnostics.
///
/// # Errors
///
/// Returns an error if the payload is not base64 or does not contain exactly
/// three NUL-separated fields.
pub fn decode_plain_response(response: &str) -> Result<(String, String, String)> {
    let decoded = STANDARD.decode(response.trim())?;
    let text = String::from_utf8(decoded).map_err(|e| Error::Malformed {
        mechanism: "PLAIN",
        message: e.to_string(),
    })?;

    let mut fields = text.split('\0');
    match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(authzid), Some(authcid), Some(password), None) => Ok((
            authzid.to_string(),
            authcid.to_string(),
            password.to_string(),
        )),
        _ => Err(Error::Malformed {
            mechanism: "PLAIN",
            message: "expected three NUL-separated fields".to_string(),
        }),
    }
}
