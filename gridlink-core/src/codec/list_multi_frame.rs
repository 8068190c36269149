//! Variable-length list codec delimited by begin/end structure frames.
//!
//! The element count is implicit in the frame stream: decode loops until
//! it peeks the end frame of the list. Because of that, a decoder that
//! does not understand the element type can still skip the whole list
//! with [`crate::codec::util::fast_forward_to_end_frame`].

use crate::codec::util;
use crate::error::Result;
use crate::protocol::{ClientMessage, Frame, FrameCursor};

/// Encodes a list of items between begin/end structure frames.
pub fn encode<T>(
    message: &mut ClientMessage,
    items: &[T],
    encode_item: impl Fn(&mut ClientMessage, &T),
) {
    message.add_frame(Frame::begin_data_structure());
    for item in items {
        encode_item(message, item);
    }
    message.add_frame(Frame::end_data_structure());
}

/// Encodes a nullable list: a null sentinel when absent, the list
/// encoding otherwise.
pub fn encode_nullable<T>(
    message: &mut ClientMessage,
    items: Option<&[T]>,
    encode_item: impl Fn(&mut ClientMessage, &T),
) {
    match items {
        None => message.add_frame(Frame::null_frame()),
        Some(items) => encode(message, items, encode_item),
    }
}

/// Encodes a list whose elements may individually be absent.
///
/// This is distinct from list nullability: an empty list and a list of
/// nulls are different values, and each element position is its own
/// null-sentinel-or-payload choice.
pub fn encode_contains_nullable<T>(
    message: &mut ClientMessage,
    items: &[Option<T>],
    encode_item: impl Fn(&mut ClientMessage, &T),
) {
    message.add_frame(Frame::begin_data_structure());
    for item in items {
        match item {
            None => message.add_frame(Frame::null_frame()),
            Some(item) => encode_item(message, item),
        }
    }
    message.add_frame(Frame::end_data_structure());
}

/// Decodes a list of items delimited by begin/end structure frames.
pub fn decode<T>(
    cursor: &mut FrameCursor<'_>,
    decode_item: impl Fn(&mut FrameCursor<'_>) -> Result<T>,
) -> Result<Vec<T>> {
    let mut items = Vec::new();
    // begin frame
    cursor.next_frame()?;
    while !util::next_frame_is_data_structure_end_frame(cursor) {
        items.push(decode_item(cursor)?);
    }
    // end frame
    cursor.next_frame()?;
    Ok(items)
}

/// Decodes a nullable list.
pub fn decode_nullable<T>(
    cursor: &mut FrameCursor<'_>,
    decode_item: impl Fn(&mut FrameCursor<'_>) -> Result<T>,
) -> Result<Option<Vec<T>>> {
    if util::next_frame_is_null_frame(cursor)? {
        Ok(None)
    } else {
        decode(cursor, decode_item).map(Some)
    }
}

/// Decodes a list whose elements may individually be null sentinels.
pub fn decode_contains_nullable<T>(
    cursor: &mut FrameCursor<'_>,
    decode_item: impl Fn(&mut FrameCursor<'_>) -> Result<T>,
) -> Result<Vec<Option<T>>> {
    let mut items = Vec::new();
    cursor.next_frame()?;
    while !util::next_frame_is_data_structure_end_frame(cursor) {
        if util::next_frame_is_null_frame(cursor)? {
            items.push(None);
        } else {
            items.push(Some(decode_item(cursor)?));
        }
    }
    cursor.next_frame()?;
    Ok(items)
}
