//! Response model consumed by negotiations.
//!
//! - [`ResponseList`]: the ordered responses produced by one emission
//! - [`CapabilityList`]: capabilities advertised in a single response
//! - [`AssertionError`]: shape checks on individual responses

mod assert;
mod capability_list;

pub use assert::AssertionError;
pub use capability_list::CapabilityList;

use crate::parser::Response;

/// Responses produced by one request emission, in arrival order.
///
/// For a command that ran to completion the last entry is the tagged
/// response; for a command waiting on more client data it is the
/// continuation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseList {
    responses: Vec<Response>,
}

impl ResponseList {
    /// Creates a response list from parsed responses.
    #[must_use]
    pub const fn new(responses: Vec<Response>) -> Self {
        Self { responses }
    }

    /// Returns the first response.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::Empty`] if the list is empty.
    pub fn first(&self) -> Result<&Response, AssertionError> {
        self.responses.first().ok_or(AssertionError::Empty)
    }

    /// Returns the last response.
    ///
    /// # Errors
    ///
    /// Returns [`AssertionError::Empty`] if the list is empty.
    pub fn last(&self) -> Result<&Response, AssertionError> {
        self.responses.last().ok_or(AssertionError::Empty)
    }

    /// Returns the number of responses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Returns true if no responses were received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Iterates over the responses in arrival order.
    pub fn iter(&self) -> std::slice::Iter<'_, Response> {
        self.responses.iter()
    }

    /// Appends a response.
    pub fn push(&mut self, response: Response) {
        self.responses.push(response);
    }
}

impl From<Vec<Response>> for ResponseList {
    fn from(responses: Vec<Response>) -> Self {
        Self::new(responses)
    }
}

impl<'a> IntoIterator for &'a ResponseList {
    type Item = &'a Response;
    type IntoIter = std::slice::Iter<'a, Response>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ResponseList {
    type Item = Response;
    type IntoIter = std::vec::IntoIter<Response>;

    fn into_iter(self) -> Self::IntoIter {
        self.responses.into_iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::parser::ResponseParser;

    fn list(lines: &[&[u8]]) -> ResponseList {
        lines
            .iter()
            .map(|line| ResponseParser::parse(line).unwrap())
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn first_and_last() {
        let responses = list(&[b"* CAPABILITY IMAP4rev1\r\n", b"A0000 OK done\r\n"]);

        assert_eq!(responses.first().unwrap().name(), "CAPABILITY");
        assert!(responses.last().unwrap().assert_tagged().is_ok());
        assert_eq!(responses.len(), 2);
    }

    #[test]
    fn empty_list_fails_assertions() {
        let responses = ResponseList::default();
        assert!(responses.is_empty());
        assert_eq!(responses.first(), Err(AssertionError::Empty));
        assert_eq!(responses.last(), Err(AssertionError::Empty));
    }

    #[test]
    fn single_response_is_first_and_last() {
        let responses = list(&[b"+ \r\n"]);
        assert_eq!(responses.first(), responses.last());
    }
}
