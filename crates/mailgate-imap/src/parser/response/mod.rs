//! IMAP response parser.
//!
//! Parses server responses according to RFC 9051 grammar. Status responses,
//! CAPABILITY data and continuation requests are parsed structurally; any
//! other untagged data is kept as its keyword plus raw text.

#![allow(clippy::missing_errors_doc)]

mod helpers;

use crate::parser::lexer::{Lexer, Token};
use crate::types::{Capability, ResponseCode, Status, Tag};
use crate::{Error, Result};

use helpers::{parse_capability_data, parse_response_code, read_text_until_crlf};

/// Untagged response data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UntaggedResponse {
    /// Status response (`* OK`, `* NO`, `* BAD`, `* PREAUTH`, `* BYE`).
    Status {
        /// Response status.
        status: Status,
        /// Optional response code.
        code: Option<ResponseCode>,
        /// Human-readable text.
        text: String,
    },
    /// CAPABILITY response.
    Capability(Vec<Capability>),
    /// Any other server data, kept unparsed.
    Data {
        /// Response keyword, e.g. `FLAGS` or `EXISTS`.
        name: String,
        /// Remaining text of the line, including a leading number if any.
        text: String,
    },
}

/// A parsed IMAP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Tagged response (command completion).
    Tagged {
        /// The command tag.
        tag: Tag,
        /// Response status.
        status: Status,
        /// Optional response code.
        code: Option<ResponseCode>,
        /// Human-readable text.
        text: String,
    },
    /// Untagged response (server data).
    Untagged(UntaggedResponse),
    /// Continuation request.
    Continuation {
        /// Optional text/data.
        text: Option<String>,
    },
}

impl Response {
    /// Returns the keyword identifying this response.
    ///
    /// Status responses are named by their status (`OK`, `NO`, ...), data
    /// responses by their keyword and continuation requests by `+`.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tagged { status, .. }
            | Self::Untagged(UntaggedResponse::Status { status, .. }) => status.as_str(),
            Self::Untagged(UntaggedResponse::Capability(_)) => "CAPABILITY",
            Self::Untagged(UntaggedResponse::Data { name, .. }) => name,
            Self::Continuation { .. } => "+",
        }
    }

    /// Returns the status of a status response.
    #[must_use]
    pub const fn status(&self) -> Option<Status> {
        match self {
            Self::Tagged { status, .. }
            | Self::Untagged(UntaggedResponse::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Returns the response code of a status response.
    #[must_use]
    pub const fn code(&self) -> Option<&ResponseCode> {
        match self {
            Self::Tagged { code, .. } | Self::Untagged(UntaggedResponse::Status { code, .. }) => {
                code.as_ref()
            }
            _ => None,
        }
    }

    /// Returns the human-readable text of the response, if any.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Tagged { text, .. }
            | Self::Untagged(
                UntaggedResponse::Status { text, .. } | UntaggedResponse::Data { text, .. },
            ) => text,
            Self::Continuation { text } => text.as_deref().unwrap_or_default(),
            Self::Untagged(UntaggedResponse::Capability(_)) => "",
        }
    }

    /// Returns the tag if this is a tagged response.
    #[must_use]
    pub const fn tag(&self) -> Option<&Tag> {
        match self {
            Self::Tagged { tag, .. } => Some(tag),
            _ => None,
        }
    }
}

/// Response parser.
pub struct ResponseParser;

impl ResponseParser {
    /// Parses a complete response line.
    pub fn parse(input: &[u8]) -> Result<Response> {
        let mut lexer = Lexer::new(input);

        match lexer.next_token()? {
            Token::Asterisk => Self::parse_untagged(&mut lexer),
            Token::Plus => Ok(Self::parse_continuation(&mut lexer)),
            Token::Atom(tag) => Self::parse_tagged(&mut lexer, tag),
            token => Err(Error::Parse {
                position: 0,
                message: format!("Expected *, +, or tag, got {token:?}"),
            }),
        }
    }

    fn parse_tagged(lexer: &mut Lexer<'_>, tag_str: &str) -> Result<Response> {
        lexer.expect_space()?;

        let status = Self::parse_status(lexer)?;
        let (code, text) = Self::parse_resp_text(lexer)?;

        Ok(Response::Tagged {
            tag: Tag::new(tag_str),
            status,
            code,
            text,
        })
    }

    fn parse_untagged(lexer: &mut Lexer<'_>) -> Result<Response> {
        lexer.expect_space()?;

        let untagged = match lexer.next_token()? {
            Token::Atom(s) if s.eq_ignore_ascii_case("CAPABILITY") => {
                UntaggedResponse::Capability(parse_capability_data(lexer)?)
            }
            Token::Atom(s) => match Self::status_from_keyword(s) {
                Some(status) => {
                    let (code, text) = Self::parse_resp_text(lexer)?;
                    UntaggedResponse::Status { status, code, text }
                }
                None => {
                    lexer.skip_spaces();
                    UntaggedResponse::Data {
                        name: s.to_uppercase(),
                        text: read_text_until_crlf(lexer),
                    }
                }
            },
            Token::Number(n) => {
                lexer.expect_space()?;
                let keyword = lexer.read_atom_string()?.to_uppercase();
                lexer.skip_spaces();
                let rest = read_text_until_crlf(lexer);
                UntaggedResponse::Data {
                    name: keyword,
                    text: if rest.is_empty() {
                        n.to_string()
                    } else {
                        format!("{n} {rest}")
                    },
                }
            }
            token => {
                return Err(Error::Parse {
                    position: lexer.position(),
                    message: format!("Unexpected token in untagged response: {token:?}"),
                });
            }
        };

        Ok(Response::Untagged(untagged))
    }

    fn parse_continuation(lexer: &mut Lexer<'_>) -> Response {
        if lexer.peek() == Some(b' ') {
            lexer.advance();
        }

        let text = read_text_until_crlf(lexer);

        Response::Continuation {
            text: if text.is_empty() { None } else { Some(text) },
        }
    }

    fn parse_status(lexer: &mut Lexer<'_>) -> Result<Status> {
        let s = lexer.read_atom_string()?;
        Self::status_from_keyword(s).ok_or_else(|| Error::Parse {
            position: lexer.position(),
            message: format!("Invalid status: {s}"),
        })
    }

    fn status_from_keyword(s: &str) -> Option<Status> {
        match s.to_uppercase().as_str() {
            "OK" => Some(Status::Ok),
            "NO" => Some(Status::No),
            "BAD" => Some(Status::Bad),
            "PREAUTH" => Some(Status::PreAuth),
            "BYE" => Some(Status::Bye),
            _ => None,
        }
    }

    /// Parses response text with optional response code.
    fn parse_resp_text(lexer: &mut Lexer<'_>) -> Result<(Option<ResponseCode>, String)> {
        // Some servers omit the text entirely ("A1 OK\r\n")
        if lexer.peek() == Some(b' ') {
            lexer.advance();
        }

        let code = if lexer.peek() == Some(b'[') {
            Some(parse_response_code(lexer)?)
        } else {
            None
        };

        if lexer.peek() == Some(b' ') {
            lexer.advance();
        }

        let text = read_text_until_crlf(lexer);

        Ok((code, text))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_greeting() {
        let input = b"* OK [CAPABILITY IMAP4rev1 AUTH=PLAIN] Dovecot ready.\r\n";
        let response = ResponseParser::parse(input).unwrap();

        match response {
            Response::Untagged(UntaggedResponse::Status {
                status: Status::Ok,
                code: Some(ResponseCode::Capability(caps)),
                text,
            }) => {
                assert_eq!(caps.len(), 2);
                assert_eq!(text, "Dovecot ready.");
            }
            other => panic!("Expected untagged OK with capabilities, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_capability() {
        let input = b"* CAPABILITY IMAP4rev1 SASL-IR AUTH=PLAIN\r\n";
        let response = ResponseParser::parse(input).unwrap();

        assert_eq!(
            response,
            Response::Untagged(UntaggedResponse::Capability(vec![
                Capability::Imap4Rev1,
                Capability::Unknown("SASL-IR".to_string()),
                Capability::Auth("PLAIN".to_string()),
            ]))
        );
        assert_eq!(response.name(), "CAPABILITY");
    }

    #[test]
    fn test_parse_tagged_ok() {
        let response = ResponseParser::parse(b"A0001 OK Logged in\r\n").unwrap();

        assert_eq!(response.tag(), Some(&Tag::new("A0001")));
        assert_eq!(response.status(), Some(Status::Ok));
        assert_eq!(response.text(), "Logged in");
        assert_eq!(response.name(), "OK");
    }

    #[test]
    fn test_parse_tagged_without_text() {
        let response = ResponseParser::parse(b"A0001 OK\r\n").unwrap();
        assert_eq!(response.status(), Some(Status::Ok));
        assert_eq!(response.text(), "");
    }

    #[test]
    fn test_parse_tagged_no_with_code() {
        let input = b"A0002 NO [AUTHENTICATIONFAILED] Authentication failed.\r\n";
        let response = ResponseParser::parse(input).unwrap();

        assert_eq!(response.status(), Some(Status::No));
        assert_eq!(response.code(), Some(&ResponseCode::AuthenticationFailed));
        assert_eq!(response.text(), "Authentication failed.");
    }

    #[test]
    fn test_parse_continuation_empty() {
        let response = ResponseParser::parse(b"+ \r\n").unwrap();
        assert_eq!(response, Response::Continuation { text: None });

        let response = ResponseParser::parse(b"+\r\n").unwrap();
        assert_eq!(response, Response::Continuation { text: None });
    }

    #[test]
    fn test_parse_continuation_with_text() {
        let response = ResponseParser::parse(b"+ Ready for literal data\r\n").unwrap();
        assert_eq!(
            response,
            Response::Continuation {
                text: Some("Ready for literal data".to_string())
            }
        );
        assert_eq!(response.name(), "+");
    }

    #[test]
    fn test_parse_other_data() {
        let response = ResponseParser::parse(b"* ENABLED CONDSTORE\r\n").unwrap();
        assert_eq!(response.name(), "ENABLED");
        assert_eq!(response.text(), "CONDSTORE");

        let response = ResponseParser::parse(b"* 3 EXISTS\r\n").unwrap();
        assert_eq!(response.name(), "EXISTS");
        assert_eq!(response.text(), "3");
    }

    #[test]
    fn test_parse_bye() {
        let response = ResponseParser::parse(b"* BYE Server shutting down\r\n").unwrap();
        assert_eq!(response.status(), Some(Status::Bye));
        assert_eq!(response.tag(), None);
    }

    #[test]
    fn test_parse_invalid_status() {
        assert!(ResponseParser::parse(b"A0001 MAYBE done\r\n").is_err());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(ResponseParser::parse(b"(oops)\r\n").is_err());
    }
}
