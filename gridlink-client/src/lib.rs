//! Client-side invocation utilities for the Gridlink protocol.
//!
//! Builds on [`gridlink_core`] for framing and codecs; this crate adds
//! the pieces that coordinate many in-flight invocations.

#![warn(missing_docs)]

pub mod pipelining;

pub use gridlink_core::{GridlinkError, Result};
pub use pipelining::Pipelining;
