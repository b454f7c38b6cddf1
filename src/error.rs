use thiserror::Error;

use crate::EdgeId;

#[derive(Error, Debug)]
pub enum Error {
    /// Origin and destination of one request project onto the same street
    /// edge. Raised by the routing request's split bookkeeping and passed
    /// through to the caller untouched.
    #[error("origin and destination are linked to the same street edge {0}")]
    TrivialPath(EdgeId),
}
