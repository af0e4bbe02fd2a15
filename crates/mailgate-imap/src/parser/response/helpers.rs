//! Parser helper functions.

use crate::parser::lexer::{Lexer, Token};
use crate::types::{Capability, ResponseCode};
use crate::{Error, Result};

/// Parses a response code.
pub fn parse_response_code(lexer: &mut Lexer<'_>) -> Result<ResponseCode> {
    lexer.expect(Token::LBracket)?;

    let atom = lexer.read_atom_string()?;
    let code = if atom.eq_ignore_ascii_case("CAPABILITY") {
        ResponseCode::Capability(parse_capability_data(lexer)?)
    } else {
        ResponseCode::from_atom(atom)
    };

    // Arguments of codes we don't interpret are skipped
    while lexer.peek() != Some(b']') && !lexer.is_eof() {
        lexer.advance();
    }
    lexer.expect(Token::RBracket)?;

    Ok(code)
}

/// Parses capability data.
///
/// Reads space-separated capability atoms up to the end of the line or a
/// closing bracket.
pub fn parse_capability_data(lexer: &mut Lexer<'_>) -> Result<Vec<Capability>> {
    let mut caps = Vec::new();

    while lexer.peek() == Some(b' ') {
        lexer.skip_spaces();
        match lexer.next_token()? {
            Token::Atom(s) => caps.push(Capability::parse(s)),
            Token::Crlf | Token::Eof => break,
            token => {
                return Err(Error::Parse {
                    position: lexer.position(),
                    message: format!("Unexpected token in capability list: {token:?}"),
                });
            }
        }
    }

    Ok(caps)
}

/// Reads text until CRLF.
pub fn read_text_until_crlf(lexer: &mut Lexer<'_>) -> String {
    let remaining = lexer.remaining();

    let end = remaining
        .windows(2)
        .position(|w| w == b"\r\n")
        .unwrap_or(remaining.len());

    lexer.skip(end);

    // Skip CRLF if present
    if lexer.peek() == Some(b'\r') {
        lexer.skip(2);
    }

    String::from_utf8_lossy(&remaining[..end]).to_string()
}
