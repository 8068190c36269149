//! Homogeneous fixed-width list codec: all items packed into one frame.
//!
//! The item count is implied by the frame's content length divided by
//! the item width; no count prefix is written.

use bytes::BytesMut;

use crate::codec::fix_sized::FixSizedType;
use crate::error::Result;
use crate::protocol::{ClientMessage, Frame, FrameCursor};

/// Encodes a fixed-width item list as a single densely packed frame.
pub fn encode<T: FixSizedType>(message: &mut ClientMessage, items: &[T]) {
    let mut content = BytesMut::zeroed(items.len() * T::SIZE_IN_BYTES);
    for (i, item) in items.iter().enumerate() {
        item.write_to(&mut content, i * T::SIZE_IN_BYTES);
    }
    message.add_frame(Frame::with_content(content));
}

/// Decodes a fixed-width item list from the next frame.
pub fn decode<T: FixSizedType>(cursor: &mut FrameCursor<'_>) -> Result<Vec<T>> {
    let frame = cursor.next_frame()?;
    let count = frame.content.len() / T::SIZE_IN_BYTES;
    let mut items = Vec::with_capacity(count);
    for i in 0..count {
        items.push(T::read_from(&frame.content, i * T::SIZE_IN_BYTES));
    }
    Ok(items)
}
