//! Opaque byte blob codec: one frame per blob.
//!
//! The object-serialization layer hands this layer pre-encoded bytes; a
//! blob is carried in a single frame with no visible structure.

use bytes::BytesMut;

use crate::error::Result;
use crate::protocol::{ClientMessage, Frame, FrameCursor};

/// Encodes an opaque byte blob as a single frame.
pub fn encode(message: &mut ClientMessage, value: &[u8]) {
    message.add_frame(Frame::with_content(BytesMut::from(value)));
}

/// Decodes an opaque byte blob from the next frame.
pub fn decode(cursor: &mut FrameCursor<'_>) -> Result<Vec<u8>> {
    let frame = cursor.next_frame()?;
    Ok(frame.content.to_vec())
}
