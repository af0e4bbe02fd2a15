//! Per-connection command tags.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::types::Tag;

/// Hands out `A0000`, `A0001`, ... for the commands of one connection.
///
/// Continuation data never draws a tag here; it reuses the tag of the
/// command it continues. The counter wraps after `u32::MAX`.
#[derive(Debug)]
pub struct TagGenerator {
    counter: AtomicU32,
    prefix: char,
}

impl TagGenerator {
    /// Creates a generator whose tags start with `prefix`.
    #[must_use]
    pub const fn new(prefix: char) -> Self {
        Self {
            counter: AtomicU32::new(0),
            prefix,
        }
    }

    /// Returns a tag no earlier call has returned.
    #[must_use]
    pub fn next(&self) -> Tag {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        Tag::new(format!("{}{:04}", self.prefix, n))
    }
}

impl Default for TagGenerator {
    fn default() -> Self {
        Self::new('A')
    }
}
