//! Framed I/O for IMAP protocol.
//!
//! IMAP uses CRLF-terminated lines with support for literals. This module
//! provides buffered line reading, buffered writing, and the reader that
//! collects the responses belonging to one exchange.

#![allow(clippy::missing_errors_doc)]

use std::io;

use bytes::BytesMut;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::parser::{Response, ResponseParser};
use crate::response::ResponseList;
use crate::types::Tag;
use crate::{Error, Result};

/// Default buffer size for reading.
const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Maximum line length to prevent memory exhaustion.
const MAX_LINE_LENGTH: usize = 64 * 1024;

/// Maximum literal size accepted before authentication.
const MAX_LITERAL_SIZE: usize = 1024 * 1024;

/// Framed connection for IMAP protocol.
pub struct FramedStream<S> {
    reader: BufReader<S>,
    write_buffer: BytesMut,
}

impl<S> FramedStream<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a new framed stream.
    pub fn new(stream: S) -> Self {
        Self {
            reader: BufReader::with_capacity(DEFAULT_BUFFER_SIZE, stream),
            write_buffer: BytesMut::with_capacity(DEFAULT_BUFFER_SIZE),
        }
    }

    /// Reads one complete response, including any embedded literals.
    pub async fn read_response(&mut self) -> Result<Vec<u8>> {
        let mut response = Vec::new();

        loop {
            let line = self.read_line().await?;
            response.extend_from_slice(&line);

            let Some(literal_len) = parse_literal_length(&line) else {
                break;
            };
            if literal_len > MAX_LITERAL_SIZE {
                return Err(Error::Protocol(format!(
                    "literal too large: {literal_len} bytes (max {MAX_LITERAL_SIZE})"
                )));
            }

            let mut literal = vec![0u8; literal_len];
            self.reader.read_exact(&mut literal).await?;
            response.extend_from_slice(&literal);
        }

        Ok(response)
    }

    /// Reads a single CRLF-terminated line.
    async fn read_line(&mut self) -> Result<Vec<u8>> {
        let mut line = Vec::new();

        loop {
            let buf = self.reader.fill_buf().await?;
            if buf.is_empty() {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed",
                )));
            }

            // A CR at the end of the previous chunk may pair with LF here
            let seam_lf = line.last() == Some(&b'\r') && buf.first() == Some(&b'\n');
            if seam_lf {
                line.push(b'\n');
                self.reader.consume(1);
                break;
            }

            if let Some(pos) = find_crlf(buf) {
                line.extend_from_slice(&buf[..pos + 2]);
                self.reader.consume(pos + 2);
                break;
            }

            let len = buf.len();
            line.extend_from_slice(buf);
            self.reader.consume(len);

            if line.len() > MAX_LINE_LENGTH {
                return Err(Error::Protocol("line too long".to_string()));
            }
        }

        Ok(line)
    }

    /// Writes a complete request and flushes it.
    pub async fn write_request(&mut self, data: &[u8]) -> Result<()> {
        self.write_buffer.clear();
        self.write_buffer.extend_from_slice(data);

        let stream = self.reader.get_mut();
        stream.write_all(&self.write_buffer).await?;
        stream.flush().await?;

        Ok(())
    }
}

/// Finds the position of CRLF in a buffer.
fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// Parses a literal length from the end of a line.
///
/// Matches patterns like `{123}\r\n` or `{123+}\r\n` (non-synchronizing).
fn parse_literal_length(line: &[u8]) -> Option<usize> {
    let line = line.strip_suffix(b"\r\n")?;
    let inner = line.strip_suffix(b"}")?;
    let open = inner.iter().rposition(|&b| b == b'{')?;
    let digits = &inner[open + 1..];
    let digits = digits.strip_suffix(b"+").unwrap_or(digits);

    std::str::from_utf8(digits).ok()?.parse().ok()
}

/// How an exchange ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeEnd {
    /// The tagged completion arrived.
    Completed,
    /// The server asked for more client data.
    Continuation,
}

/// Reads the responses belonging to the exchange identified by a tag.
///
/// Stops at the first continuation request or at the tagged response
/// carrying the exchange's tag, whichever comes first.
#[derive(Debug)]
pub struct ExchangeReader<'a> {
    tag: &'a Tag,
}

impl<'a> ExchangeReader<'a> {
    /// Creates a reader for the exchange tagged `tag`.
    #[must_use]
    pub const fn new(tag: &'a Tag) -> Self {
        Self { tag }
    }

    /// Reads and parses responses until the exchange ends or pauses.
    pub async fn read<S>(&self, framed: &mut FramedStream<S>) -> Result<(ResponseList, ExchangeEnd)>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let mut responses = ResponseList::default();

        loop {
            let raw = framed.read_response().await?;
            let response = ResponseParser::parse(&raw)?;
            tracing::trace!(tag = %self.tag, response = response.name(), "Received response");

            let end = match &response {
                Response::Continuation { .. } => Some(ExchangeEnd::Continuation),
                Response::Tagged { tag, .. } if tag == self.tag => Some(ExchangeEnd::Completed),
                Response::Tagged { tag, .. } => {
                    tracing::warn!(expected = %self.tag, received = %tag, "Ignoring response for another tag");
                    None
                }
                Response::Untagged(_) => None,
            };

            responses.push(response);

            if let Some(end) = end {
                return Ok((responses, end));
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio_test::io::Builder;

    use super::*;

    #[test]
    fn test_find_crlf() {
        assert_eq!(find_crlf(b"hello\r\n"), Some(5));
        assert_eq!(find_crlf(b"\r\n"), Some(0));
        assert_eq!(find_crlf(b"just\n"), None);
    }

    #[test]
    fn test_parse_literal_length() {
        assert_eq!(parse_literal_length(b"BODY {123}\r\n"), Some(123));
        assert_eq!(parse_literal_length(b"BODY {123+}\r\n"), Some(123));
        assert_eq!(parse_literal_length(b"{0}\r\n"), Some(0));
        assert_eq!(parse_literal_length(b"no literal\r\n"), None);
        assert_eq!(parse_literal_length(b"incomplete {123"), None);
        assert_eq!(parse_literal_length(b"wrong {abc}\r\n"), None);
    }

    #[tokio::test]
    async fn test_read_simple_line() {
        let mock = Builder::new().read(b"* OK ready\r\n").build();
        let mut framed = FramedStream::new(mock);

        assert_eq!(framed.read_response().await.unwrap(), b"* OK ready\r\n");
    }

    #[tokio::test]
    async fn test_read_line_split_across_reads() {
        let mock = Builder::new().read(b"* OK rea").read(b"dy\r").read(b"\n").build();
        let mut framed = FramedStream::new(mock);

        assert_eq!(framed.read_response().await.unwrap(), b"* OK ready\r\n");
    }

    #[tokio::test]
    async fn test_read_with_literal() {
        let mock = Builder::new()
            .read(b"* ID (\"name\" {5}\r\n")
            .read(b"hello)\r\n")
            .build();
        let mut framed = FramedStream::new(mock);

        assert_eq!(
            framed.read_response().await.unwrap(),
            b"* ID (\"name\" {5}\r\nhello)\r\n"
        );
    }

    #[tokio::test]
    async fn test_literal_size_validation() {
        let header = format!("* ID {{{}}}\r\n", MAX_LITERAL_SIZE + 1);
        let mock = Builder::new().read(header.as_bytes()).build();
        let mut framed = FramedStream::new(mock);

        let err = framed.read_response().await.unwrap_err();
        assert!(err.to_string().contains("literal too large"));
    }

    #[tokio::test]
    async fn test_line_length_limit() {
        let long_line = "A".repeat(MAX_LINE_LENGTH + 100);
        let mock = Builder::new().read(long_line.as_bytes()).build();
        let mut framed = FramedStream::new(mock);

        let err = framed.read_response().await.unwrap_err();
        assert!(err.to_string().contains("line too long"));
    }

    #[tokio::test]
    async fn test_closed_connection() {
        let mock = Builder::new().read(b"* OK rea").build();
        let mut framed = FramedStream::new(mock);

        assert!(matches!(framed.read_response().await, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_write_request() {
        let mock = Builder::new().write(b"A0000 CAPABILITY\r\n").build();
        let mut framed = FramedStream::new(mock);

        framed.write_request(b"A0000 CAPABILITY\r\n").await.unwrap();
    }

    #[tokio::test]
    async fn test_exchange_reader_stops_at_tagged() {
        let mock = Builder::new()
            .read(b"* CAPABILITY IMAP4rev1 AUTH=PLAIN\r\n")
            .read(b"A0000 OK done\r\n")
            .build();
        let mut framed = FramedStream::new(mock);
        let tag = Tag::new("A0000");

        let (responses, end) = ExchangeReader::new(&tag).read(&mut framed).await.unwrap();

        assert_eq!(end, ExchangeEnd::Completed);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses.first().unwrap().name(), "CAPABILITY");
    }

    #[tokio::test]
    async fn test_exchange_reader_stops_at_continuation() {
        let mock = Builder::new().read(b"+ \r\n").build();
        let mut framed = FramedStream::new(mock);
        let tag = Tag::new("A0001");

        let (responses, end) = ExchangeReader::new(&tag).read(&mut framed).await.unwrap();

        assert_eq!(end, ExchangeEnd::Continuation);
        assert_eq!(responses.len(), 1);
    }

    #[tokio::test]
    async fn test_exchange_reader_skips_foreign_tags() {
        let mock = Builder::new()
            .read(b"Z9 OK stale\r\n")
            .read(b"A0001 OK done\r\n")
            .build();
        let mut framed = FramedStream::new(mock);
        let tag = Tag::new("A0001");

        let (responses, end) = ExchangeReader::new(&tag).read(&mut framed).await.unwrap();

        assert_eq!(end, ExchangeEnd::Completed);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses.last().unwrap().tag(), Some(&tag));
    }
}
