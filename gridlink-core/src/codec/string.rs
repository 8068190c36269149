//! UTF-8 string codec: one frame per string.

use bytes::BytesMut;

use crate::error::Result;
use crate::protocol::{ClientMessage, Frame, FrameCursor};

/// Encodes a string as a single frame of UTF-8 bytes.
pub fn encode(message: &mut ClientMessage, value: &str) {
    message.add_frame(Frame::with_content(BytesMut::from(value.as_bytes())));
}

/// Decodes a string from the next frame.
///
/// Invalid UTF-8 is replaced rather than rejected; the payload was
/// produced by a peer whose encoding this layer does not re-validate.
pub fn decode(cursor: &mut FrameCursor<'_>) -> Result<String> {
    let frame = cursor.next_frame()?;
    Ok(String::from_utf8_lossy(&frame.content).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let mut message = ClientMessage::create_for_encode();
        encode(&mut message, "grid-member-7");

        assert_eq!(message.frame_count(), 1);
        let mut cursor = message.cursor();
        assert_eq!(decode(&mut cursor).unwrap(), "grid-member-7");
        assert!(!cursor.has_next());
    }

    #[test]
    fn test_empty_string() {
        let mut message = ClientMessage::create_for_encode();
        encode(&mut message, "");

        let mut cursor = message.cursor();
        assert_eq!(decode(&mut cursor).unwrap(), "");
    }

    #[test]
    fn test_non_ascii_roundtrip() {
        let mut message = ClientMessage::create_for_encode();
        encode(&mut message, "çınar-树");

        let mut cursor = message.cursor();
        assert_eq!(decode(&mut cursor).unwrap(), "çınar-树");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut message = ClientMessage::create_for_encode();
        message.add_frame(Frame::with_content(BytesMut::from(&[0x66, 0xFF][..])));

        let mut cursor = message.cursor();
        let decoded = decode(&mut cursor).unwrap();
        assert!(decoded.starts_with('f'));
        assert!(decoded.contains('\u{FFFD}'));
    }
}
