//! Map codec: key/value pairs as alternating frames between begin/end
//! structure frames, decoded into a `HashMap`.

use std::collections::HashMap;
use std::hash::Hash;

use crate::codec::util;
use crate::error::Result;
use crate::protocol::{ClientMessage, Frame, FrameCursor};

/// Encodes a map as alternating key/value frames.
///
/// Iteration order of the map is not part of the wire contract.
pub fn encode<K, V>(
    message: &mut ClientMessage,
    map: &HashMap<K, V>,
    encode_key: impl Fn(&mut ClientMessage, &K),
    encode_value: impl Fn(&mut ClientMessage, &V),
) {
    message.add_frame(Frame::begin_data_structure());
    for (key, value) in map {
        encode_key(message, key);
        encode_value(message, value);
    }
    message.add_frame(Frame::end_data_structure());
}

/// Decodes a map from alternating key/value frames.
pub fn decode<K: Eq + Hash, V>(
    cursor: &mut FrameCursor<'_>,
    decode_key: impl Fn(&mut FrameCursor<'_>) -> Result<K>,
    decode_value: impl Fn(&mut FrameCursor<'_>) -> Result<V>,
) -> Result<HashMap<K, V>> {
    let mut map = HashMap::new();
    cursor.next_frame()?;
    while !util::next_frame_is_data_structure_end_frame(cursor) {
        let key = decode_key(cursor)?;
        let value = decode_value(cursor)?;
        map.insert(key, value);
    }
    cursor.next_frame()?;
    Ok(map)
}
