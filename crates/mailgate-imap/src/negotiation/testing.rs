//! A transport that replays canned responses.

use std::collections::VecDeque;
use std::io;

use crate::command::{Request, RequestKind};
use crate::connection::Transport;
use crate::parser::ResponseParser;
use crate::response::ResponseList;
use crate::types::Tag;
use crate::{Error, Result};

/// Answers each emission with the next scripted response list and records
/// the bytes it was asked to send.
///
/// Commands are tagged `A0`, `A1`, ...; continuation data reuses the tag of
/// the last command.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    script: VecDeque<ResponseList>,
    sent: Vec<String>,
    last_tag: Option<Tag>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues the responses for the next emission.
    #[allow(clippy::unwrap_used)]
    pub(crate) fn respond(mut self, lines: &[&str]) -> Self {
        let responses = lines
            .iter()
            .map(|line| ResponseParser::parse(line.as_bytes()).unwrap())
            .collect::<Vec<_>>();
        self.script.push_back(responses.into());
        self
    }

    pub(crate) fn sent(&self) -> &[String] {
        &self.sent
    }
}

impl Transport for ScriptedTransport {
    async fn emit<R: Request>(&mut self, request: R) -> Result<ResponseList> {
        let tag = match (request.kind(), &self.last_tag) {
            (RequestKind::Continuation, Some(tag)) => tag.clone(),
            _ => Tag::new(format!("A{}", self.sent.len())),
        };
        self.last_tag = Some(tag.clone());

        let bytes = request.with_tag(tag).to_bytes()?;
        self.sent.push(String::from_utf8_lossy(&bytes).into_owned());

        self.script.pop_front().ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "script exhausted",
            ))
        })
    }
}
