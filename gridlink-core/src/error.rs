//! Error types for Gridlink operations.

use std::io;
use thiserror::Error;

use crate::protocol::RemoteError;

/// The main error type for Gridlink operations.
#[derive(Debug, Error)]
pub enum GridlinkError {
    /// Connection-related errors (network failures, disconnections).
    #[error("connection error: {0}")]
    Connection(String),

    /// Protocol-related errors (invalid messages, truncated frames,
    /// decode contract violations).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An error reported by a cluster member, reconstructed from the
    /// wire with its full causal chain.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// I/O errors from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized `Result` type for Gridlink operations.
pub type Result<T> = std::result::Result<T, GridlinkError>;
