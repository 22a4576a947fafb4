//! Wire codec errors.

use crate::header::MessageType;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WireError {
    /// Truncated body, bad magic, unknown type byte, inconsistent
    /// block-type/message-type pairing, or trailing bytes.
    #[error("invalid framing: {0}")]
    InvalidFraming(&'static str),

    /// A well-framed message type this node does not handle
    /// (bulk pull/push, frontier requests). Dispatch drops these.
    #[error("unsupported message type {0:?}")]
    Unsupported(MessageType),
}
