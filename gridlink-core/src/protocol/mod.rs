//! Gridlink binary wire protocol implementation.
//!
//! A wire message is a chain of self-describing frames. The first frame
//! of a logical message carries the fixed-offset header (message type,
//! correlation id, and partition id or backup-ack count depending on
//! role); the remaining frames carry the payload, delimited where needed
//! by flag-only structure frames.

mod client_message;
mod codec;
pub mod constants;
pub mod error_codes;
mod error_factory;
mod frame;

pub use client_message::{
    next_correlation_id, ClientMessage, FrameCursor, RequestHeader, ResponseHeader,
};
pub use codec::{ClientMessageCodec, FragmentAssembler};
pub use constants::*;
pub use error_factory::{error_from_message, rebuild_error_chain, RemoteError, RemoteErrorKind};
pub use frame::{Frame, FrameFlags};
