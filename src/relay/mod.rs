use thiserror::Error;

use crate::store::json_store::StoreError;

/// Module containing the receive loop persisting messages
pub mod listener;
/// Module containing the relayed message type
pub mod message;
/// Module containing the datagram send path
pub mod sender;

/// Represents the kind of error that can occur while relaying messages.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The socket could not be bound, read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A message could not be encoded as JSON.
    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// The message store could not be updated.
    #[error("store update failed: {0}")]
    Store(#[from] StoreError),
}
