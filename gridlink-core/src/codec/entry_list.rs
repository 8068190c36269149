//! Entry list codec: ordered key/value pairs as alternating frames
//! between begin/end structure frames.

use crate::codec::util;
use crate::error::Result;
use crate::protocol::{ClientMessage, Frame, FrameCursor};

/// Encodes an ordered list of key/value entries.
pub fn encode<K, V>(
    message: &mut ClientMessage,
    entries: &[(K, V)],
    encode_key: impl Fn(&mut ClientMessage, &K),
    encode_value: impl Fn(&mut ClientMessage, &V),
) {
    message.add_frame(Frame::begin_data_structure());
    for (key, value) in entries {
        encode_key(message, key);
        encode_value(message, value);
    }
    message.add_frame(Frame::end_data_structure());
}

/// Encodes a nullable entry list.
pub fn encode_nullable<K, V>(
    message: &mut ClientMessage,
    entries: Option<&[(K, V)]>,
    encode_key: impl Fn(&mut ClientMessage, &K),
    encode_value: impl Fn(&mut ClientMessage, &V),
) {
    match entries {
        None => message.add_frame(Frame::null_frame()),
        Some(entries) => encode(message, entries, encode_key, encode_value),
    }
}

/// Decodes an ordered list of key/value entries.
pub fn decode<K, V>(
    cursor: &mut FrameCursor<'_>,
    decode_key: impl Fn(&mut FrameCursor<'_>) -> Result<K>,
    decode_value: impl Fn(&mut FrameCursor<'_>) -> Result<V>,
) -> Result<Vec<(K, V)>> {
    let mut entries = Vec::new();
    cursor.next_frame()?;
    while !util::next_frame_is_data_structure_end_frame(cursor) {
        let key = decode_key(cursor)?;
        let value = decode_value(cursor)?;
        entries.push((key, value));
    }
    cursor.next_frame()?;
    Ok(entries)
}

/// Decodes a nullable entry list.
pub fn decode_nullable<K, V>(
    cursor: &mut FrameCursor<'_>,
    decode_key: impl Fn(&mut FrameCursor<'_>) -> Result<K>,
    decode_value: impl Fn(&mut FrameCursor<'_>) -> Result<V>,
) -> Result<Option<Vec<(K, V)>>> {
    if util::next_frame_is_null_frame(cursor)? {
        Ok(None)
    } else {
        decode(cursor, decode_key, decode_value).map(Some)
    }
}
