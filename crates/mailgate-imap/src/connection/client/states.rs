//! Type-state markers for IMAP client connection states.

/// Marker type for the not-authenticated state.
///
/// In this state, only authentication and connection-level commands are
/// valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotAuthenticated;

/// Marker type for the authenticated state.
///
/// Reached only through a successful negotiation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Authenticated;
