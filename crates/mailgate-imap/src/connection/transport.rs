//! The seam between negotiations and the wire.

use crate::Result;
use crate::command::Request;
use crate::response::ResponseList;

/// Emits requests and returns the responses they produced.
///
/// One request is in flight at a time: every call is awaited to completion
/// before the next one starts.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Tags `request`, writes it, and collects the correlated responses.
    ///
    /// The returned list ends either with the tagged completion of the
    /// exchange or with a continuation prompt, in which case the exchange
    /// stays open for a follow-up [`RequestKind::Continuation`] request.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure, timeout, unparseable responses, or a
    /// continuation request emitted while no command awaits one.
    ///
    /// [`RequestKind::Continuation`]: crate::command::RequestKind::Continuation
    async fn emit<R: Request>(&mut self, request: R) -> Result<ResponseList>;
}
