//! Core protocol types for the Gridlink data grid client.
//!
//! This crate implements the client side of the Gridlink binary wire
//! protocol: the self-describing frame format, multi-frame client
//! messages with fragmentation support, the generic codec combinators
//! used by every per-operation codec, and reconstruction of remote
//! errors into typed local error values.

#![warn(missing_docs)]

pub mod codec;
pub mod error;
pub mod protocol;

pub use error::{GridlinkError, Result};
pub use protocol::{
    ClientMessage, ClientMessageCodec, Frame, FrameCursor, FrameFlags, FragmentAssembler,
    RemoteError, RemoteErrorKind, RequestHeader, ResponseHeader,
};
