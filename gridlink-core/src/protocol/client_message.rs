//! ClientMessage type for multi-frame Gridlink protocol messages.

use bytes::BytesMut;
use std::sync::atomic::{AtomicI64, Ordering};

use super::constants::*;
use super::frame::{Frame, FrameFlags};
use crate::codec::fix_sized;
use crate::error::{GridlinkError, Result};

/// Global correlation id counter.
static CORRELATION_ID_COUNTER: AtomicI64 = AtomicI64::new(1);

/// Generates a unique, non-negative correlation id for a request.
pub fn next_correlation_id() -> i64 {
    CORRELATION_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A client message composed of one or more frames.
///
/// The first frame is the "initial frame" containing the message header;
/// additional frames carry the payload. Frames are owned values, so
/// cloning a message can never alias another message's chain.
///
/// The total wire length is cached and kept up to date on every
/// structural mutation (append, merge, fragmentation-frame drop).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMessage {
    frames: Vec<Frame>,
    cached_total_length: usize,
    retryable: bool,
}

impl ClientMessage {
    /// Creates a new empty message for encoding.
    pub fn create_for_encode() -> Self {
        Self {
            frames: Vec::new(),
            cached_total_length: 0,
            retryable: false,
        }
    }

    /// Creates a message from received frames for decoding.
    pub fn create_for_decode(frames: Vec<Frame>) -> Self {
        let cached_total_length = frames.iter().map(Frame::wire_size).sum();
        Self {
            frames,
            cached_total_length,
            retryable: false,
        }
    }

    /// Creates a request message with the given type and partition id.
    ///
    /// The initial frame carries a fresh correlation id and the
    /// unfragmented flags.
    pub fn create_request(message_type: i32, partition_id: i32) -> Self {
        let mut initial_frame = Frame::initial(REQUEST_HEADER_SIZE);
        fix_sized::encode_i32(&mut initial_frame.content, TYPE_FIELD_OFFSET, message_type);
        fix_sized::encode_non_negative_i64(
            &mut initial_frame.content,
            CORRELATION_ID_OFFSET,
            next_correlation_id(),
        );
        fix_sized::encode_i32(&mut initial_frame.content, PARTITION_ID_OFFSET, partition_id);

        let mut message = Self::create_for_encode();
        message.add_frame(initial_frame);
        message
    }

    /// Creates a request message targeting any partition.
    pub fn create_request_any_partition(message_type: i32) -> Self {
        Self::create_request(message_type, PARTITION_ID_ANY)
    }

    /// Creates a response message with the given type and correlation id.
    pub fn create_response(message_type: i32, correlation_id: i64) -> Self {
        let mut initial_frame = Frame::initial(RESPONSE_HEADER_SIZE);
        fix_sized::encode_i32(&mut initial_frame.content, TYPE_FIELD_OFFSET, message_type);
        fix_sized::encode_i64(
            &mut initial_frame.content,
            CORRELATION_ID_OFFSET,
            correlation_id,
        );

        let mut message = Self::create_for_encode();
        message.add_frame(initial_frame);
        message
    }

    /// Creates the leading message of a fragment: a single frame holding
    /// the fragmentation id, flagged with the given fragment boundary
    /// flags. Payload frames of the fragment are appended afterwards.
    pub fn create_fragment(fragmentation_id: i64, flags: FrameFlags) -> Self {
        let mut leading_frame = Frame::initial_with_flags(8, flags);
        fix_sized::encode_i64(
            &mut leading_frame.content,
            FRAGMENTATION_ID_OFFSET,
            fragmentation_id,
        );

        let mut message = Self::create_for_encode();
        message.add_frame(leading_frame);
        message
    }

    /// Appends a frame to the message.
    pub fn add_frame(&mut self, frame: Frame) {
        self.cached_total_length += frame.wire_size();
        self.frames.push(frame);
    }

    /// Returns a reference to the initial (first) frame, if present.
    pub fn start_frame(&self) -> Option<&Frame> {
        self.frames.first()
    }

    /// Returns a reference to all frames.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Returns the number of frames in the message.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if the message has no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns a fresh forward-only cursor over this message's frames.
    ///
    /// Decoding walks the cursor strictly forward; independent passes
    /// use independent cursors.
    pub fn cursor(&self) -> FrameCursor<'_> {
        FrameCursor {
            frames: &self.frames,
            pos: 0,
        }
    }

    /// Returns the message type from the initial frame.
    ///
    /// Returns `None` if there is no initial frame or if the frame
    /// content is too short to contain a message type field.
    pub fn message_type(&self) -> Option<i32> {
        let frame = self.frames.first()?;
        if frame.content.len() < TYPE_FIELD_OFFSET + 4 {
            return None;
        }
        Some(fix_sized::decode_i32(&frame.content, TYPE_FIELD_OFFSET))
    }

    /// Sets the message type in the initial frame.
    pub fn set_message_type(&mut self, message_type: i32) {
        if let Some(frame) = self.frames.first_mut() {
            if frame.content.len() >= TYPE_FIELD_OFFSET + 4 {
                fix_sized::encode_i32(&mut frame.content, TYPE_FIELD_OFFSET, message_type);
            }
        }
    }

    /// Returns the correlation id from the initial frame.
    pub fn correlation_id(&self) -> Option<i64> {
        let frame = self.frames.first()?;
        if frame.content.len() < CORRELATION_ID_OFFSET + 8 {
            return None;
        }
        Some(fix_sized::decode_i64(&frame.content, CORRELATION_ID_OFFSET))
    }

    /// Sets the correlation id in the initial frame.
    pub fn set_correlation_id(&mut self, correlation_id: i64) {
        if let Some(frame) = self.frames.first_mut() {
            if frame.content.len() >= CORRELATION_ID_OFFSET + 8 {
                fix_sized::encode_non_negative_i64(
                    &mut frame.content,
                    CORRELATION_ID_OFFSET,
                    correlation_id,
                );
            }
        }
    }

    /// Sets the partition id in the initial frame (requests only).
    pub fn set_partition_id(&mut self, partition_id: i32) {
        if let Some(frame) = self.frames.first_mut() {
            if frame.content.len() >= PARTITION_ID_OFFSET + 4 {
                fix_sized::encode_i32(&mut frame.content, PARTITION_ID_OFFSET, partition_id);
            }
        }
    }

    /// Returns a typed view of the initial frame as a request header.
    ///
    /// Returns `None` if the initial frame is missing or shorter than a
    /// request header. Whether a message actually is a request is known
    /// to the caller; the view only makes the role explicit.
    pub fn request_header(&self) -> Option<RequestHeader<'_>> {
        let frame = self.frames.first()?;
        if frame.content.len() < REQUEST_HEADER_SIZE {
            return None;
        }
        Some(RequestHeader {
            content: &frame.content,
        })
    }

    /// Returns a typed view of the initial frame as a response header.
    pub fn response_header(&self) -> Option<ResponseHeader<'_>> {
        let frame = self.frames.first()?;
        if frame.content.len() < RESPONSE_HEADER_SIZE {
            return None;
        }
        Some(ResponseHeader {
            content: &frame.content,
        })
    }

    /// Returns true if the initial frame carries the event flag.
    pub fn is_event(&self) -> bool {
        self.frames
            .first()
            .map(|f| f.has_event_flag())
            .unwrap_or(false)
    }

    /// Returns true if this message is marked safe to retry.
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// Marks this message as safe to retry. Supplied by the invocation
    /// layer together with the message type.
    pub fn set_retryable(&mut self, retryable: bool) {
        self.retryable = retryable;
    }

    /// Returns the cached total size of the message on the wire.
    pub fn total_length(&self) -> usize {
        self.cached_total_length
    }

    /// Writes all frames to the destination buffer in canonical wire
    /// form: the last frame always carries the FINAL bit, whatever flags
    /// it stores.
    pub fn write_to(&self, dst: &mut BytesMut) {
        let last = self.frames.len().saturating_sub(1);
        for (i, frame) in self.frames.iter().enumerate() {
            let flags = if i == last {
                frame.flags | FrameFlags::IS_FINAL
            } else {
                frame.flags
            };
            frame.write_to_with_flags(dst, flags);
        }
    }

    /// Serializes the whole message into a new buffer.
    pub fn to_bytes(&self) -> BytesMut {
        let mut buffer = BytesMut::with_capacity(self.total_length());
        self.write_to(&mut buffer);
        buffer
    }

    /// Returns the fragmentation id from the leading frame of a fragment.
    pub fn fragmentation_id(&self) -> Option<i64> {
        let frame = self.frames.first()?;
        if frame.content.len() < FRAGMENTATION_ID_OFFSET + 8 {
            return None;
        }
        Some(fix_sized::decode_i64(
            &frame.content,
            FRAGMENTATION_ID_OFFSET,
        ))
    }

    /// Removes the leading fragmentation-id frame of a fragment.
    pub fn drop_fragmentation_frame(&mut self) {
        if !self.frames.is_empty() {
            let dropped = self.frames.remove(0);
            self.cached_total_length -= dropped.wire_size();
        }
    }

    /// Appends another fragment's frames onto this message.
    ///
    /// The fragment must already have had its fragmentation-id frame
    /// dropped. Fragments must be merged in arrival order; out-of-order
    /// merging produces a corrupt logical message.
    pub fn merge(&mut self, fragment: ClientMessage) {
        self.cached_total_length += fragment.cached_total_length;
        self.frames.extend(fragment.frames);
    }

    /// Clones this message with a rewritten correlation id, leaving the
    /// original untouched.
    ///
    /// Used by retrying callers: the payload frames are reused as-is
    /// without re-encoding, and because frames are owned values the
    /// rewrite cannot be observed through the original message.
    pub fn copy_with_new_correlation_id(&self, correlation_id: i64) -> Self {
        let mut copy = self.clone();
        copy.set_correlation_id(correlation_id);
        copy
    }
}

/// A forward-only decode cursor over a message's frames.
///
/// The cursor is a separate value borrowing the frame sequence, so
/// iteration state can never be confused with message content and two
/// passes over the same message use two independent cursors.
#[derive(Debug)]
pub struct FrameCursor<'a> {
    frames: &'a [Frame],
    pos: usize,
}

impl<'a> FrameCursor<'a> {
    /// Returns the next frame and advances the cursor.
    ///
    /// Running past the end of the message means encoder and decoder
    /// disagree about the structure, which is a fatal protocol error.
    pub fn next_frame(&mut self) -> Result<&'a Frame> {
        match self.frames.get(self.pos) {
            Some(frame) => {
                self.pos += 1;
                Ok(frame)
            }
            None => Err(GridlinkError::Protocol(
                "frame cursor advanced past the end of the message".to_string(),
            )),
        }
    }

    /// Returns the next frame without advancing the cursor.
    pub fn peek_frame(&self) -> Option<&'a Frame> {
        self.frames.get(self.pos)
    }

    /// Returns true if there are frames left to consume.
    pub fn has_next(&self) -> bool {
        self.pos < self.frames.len()
    }

    /// Rewinds the cursor to the first frame for a second pass.
    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

/// Typed read view of an initial frame interpreted as a request header.
///
/// Requests and responses reinterpret the same fixed byte range after
/// the correlation id; these views make the role explicit instead of
/// leaving it to call-site convention.
#[derive(Debug, Clone, Copy)]
pub struct RequestHeader<'a> {
    content: &'a [u8],
}

impl RequestHeader<'_> {
    /// The request's message type.
    pub fn message_type(&self) -> i32 {
        fix_sized::decode_i32(self.content, TYPE_FIELD_OFFSET)
    }

    /// The request's correlation id.
    pub fn correlation_id(&self) -> i64 {
        fix_sized::decode_i64(self.content, CORRELATION_ID_OFFSET)
    }

    /// The partition the request targets, or [`PARTITION_ID_ANY`].
    pub fn partition_id(&self) -> i32 {
        fix_sized::decode_i32(self.content, PARTITION_ID_OFFSET)
    }
}

/// Typed read view of an initial frame interpreted as a response header.
#[derive(Debug, Clone, Copy)]
pub struct ResponseHeader<'a> {
    content: &'a [u8],
}

impl ResponseHeader<'_> {
    /// The response's message type.
    pub fn message_type(&self) -> i32 {
        fix_sized::decode_i32(self.content, TYPE_FIELD_OFFSET)
    }

    /// The correlation id of the request this responds to.
    pub fn correlation_id(&self) -> i64 {
        fix_sized::decode_i64(self.content, CORRELATION_ID_OFFSET)
    }

    /// The number of backup acknowledgements the caller should expect.
    pub fn backup_acks(&self) -> u8 {
        fix_sized::decode_u8(self.content, RESPONSE_BACKUP_ACKS_OFFSET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_message() {
        let msg = ClientMessage::create_request(0x010200, PARTITION_ID_ANY);

        assert_eq!(msg.message_type(), Some(0x010200));
        assert!(msg.correlation_id().unwrap() > 0);
        assert_eq!(msg.frame_count(), 1);
        assert!(msg.start_frame().unwrap().has_unfragmented_flag());
    }

    #[test]
    fn test_correlation_id_increments() {
        let msg1 = ClientMessage::create_request(0x010200, 0);
        let msg2 = ClientMessage::create_request(0x010200, 0);

        assert!(msg2.correlation_id().unwrap() > msg1.correlation_id().unwrap());
    }

    #[test]
    fn test_request_header_view() {
        let msg = ClientMessage::create_request(0x010100, 42);
        let header = msg.request_header().unwrap();

        assert_eq!(header.message_type(), 0x010100);
        assert_eq!(header.partition_id(), 42);
        assert_eq!(header.correlation_id(), msg.correlation_id().unwrap());
    }

    #[test]
    fn test_response_header_reinterprets_request_byte_range() {
        // A request with partition id 1 has 0x01 at the byte a response
        // header reads as the backup-ack count.
        let msg = ClientMessage::create_request(7, 1);
        let response = msg.response_header().unwrap();
        assert_eq!(response.backup_acks(), 1);
    }

    #[test]
    fn test_response_header_view() {
        let msg = ClientMessage::create_response(0x010201, 99);
        let header = msg.response_header().unwrap();

        assert_eq!(header.message_type(), 0x010201);
        assert_eq!(header.correlation_id(), 99);
        assert_eq!(header.backup_acks(), 0);
        // The response initial frame is too short for a request view.
        assert!(msg.request_header().is_none());
    }

    #[test]
    fn test_set_correlation_id() {
        let mut msg = ClientMessage::create_request(1, 0);
        msg.set_correlation_id(42);
        assert_eq!(msg.correlation_id(), Some(42));
    }

    #[test]
    fn test_header_accessors_with_short_content() {
        let short_frame = Frame::with_content(BytesMut::from(&[0x01, 0x02][..]));
        let mut msg = ClientMessage::create_for_decode(vec![short_frame]);

        assert_eq!(msg.message_type(), None);
        assert_eq!(msg.correlation_id(), None);
        assert!(msg.request_header().is_none());
        assert!(msg.response_header().is_none());

        // Setters on short frames are no-ops.
        msg.set_correlation_id(999);
        assert_eq!(msg.correlation_id(), None);
    }

    #[test]
    fn test_header_accessors_on_empty_message() {
        let msg = ClientMessage::create_for_encode();
        assert!(msg.message_type().is_none());
        assert!(msg.correlation_id().is_none());
        assert!(!msg.is_event());
    }

    #[test]
    fn test_total_length_tracks_mutations() {
        let mut msg = ClientMessage::create_request(1, 0);
        let base = msg.total_length();
        assert_eq!(base, FRAME_HEADER_SIZE + REQUEST_HEADER_SIZE);

        msg.add_frame(Frame::with_content(BytesMut::from(&b"data"[..])));
        assert_eq!(msg.total_length(), base + FRAME_HEADER_SIZE + 4);

        let mut continuation = ClientMessage::create_for_encode();
        continuation.add_frame(Frame::with_content(BytesMut::from(&b"xy"[..])));
        let merged_len = msg.total_length() + continuation.total_length();
        msg.merge(continuation);
        assert_eq!(msg.total_length(), merged_len);
        assert_eq!(msg.total_length(), msg.to_bytes().len());
    }

    #[test]
    fn test_write_to_sets_final_flag_on_last_frame_only() {
        let mut msg = ClientMessage::create_request(1, 0);
        msg.add_frame(Frame::with_content(BytesMut::from(&b"payload"[..])));

        let mut buf = msg.to_bytes();

        let first = Frame::read_from(&mut buf).unwrap();
        assert!(!first.is_final_frame());
        let last = Frame::read_from(&mut buf).unwrap();
        assert!(last.is_final_frame());
        assert!(buf.is_empty());

        // Serialization does not mutate the message itself.
        assert!(!msg.frames()[1].is_final_frame());
    }

    #[test]
    fn test_cursor_next_peek_reset() {
        let mut msg = ClientMessage::create_request(1, 0);
        msg.add_frame(Frame::with_content(BytesMut::from(&b"a"[..])));
        msg.add_frame(Frame::with_content(BytesMut::from(&b"b"[..])));

        let mut cursor = msg.cursor();
        assert!(cursor.has_next());
        cursor.next_frame().unwrap();

        let peeked = cursor.peek_frame().unwrap().content.clone();
        let consumed = cursor.next_frame().unwrap().content.clone();
        assert_eq!(peeked, consumed);

        assert_eq!(&cursor.next_frame().unwrap().content[..], b"b");
        assert!(!cursor.has_next());
        assert!(cursor.peek_frame().is_none());
        assert!(cursor.next_frame().is_err());

        cursor.reset();
        assert!(cursor.has_next());
        assert_eq!(cursor.next_frame().unwrap().content.len(), REQUEST_HEADER_SIZE);
    }

    #[test]
    fn test_two_independent_cursors() {
        let mut msg = ClientMessage::create_request(1, 0);
        msg.add_frame(Frame::with_content(BytesMut::from(&b"x"[..])));

        let mut a = msg.cursor();
        let mut b = msg.cursor();
        a.next_frame().unwrap();
        a.next_frame().unwrap();
        // Cursor b is unaffected by a's progress.
        assert_eq!(b.next_frame().unwrap().content.len(), REQUEST_HEADER_SIZE);
    }

    #[test]
    fn test_fragmentation_id_and_drop() {
        let mut fragment = ClientMessage::create_fragment(77, FrameFlags::BEGIN_FRAGMENT);
        fragment.add_frame(Frame::with_content(BytesMut::from(&b"p"[..])));

        assert_eq!(fragment.fragmentation_id(), Some(77));
        assert!(fragment.start_frame().unwrap().has_begin_fragment_flag());

        fragment.drop_fragmentation_frame();
        assert_eq!(fragment.frame_count(), 1);
        assert_eq!(&fragment.start_frame().unwrap().content[..], b"p");
        assert_eq!(fragment.total_length(), FRAME_HEADER_SIZE + 1);
    }

    #[test]
    fn test_merge_appends_in_order() {
        let mut logical = ClientMessage::create_for_encode();
        logical.add_frame(Frame::with_content(BytesMut::from(&b"1"[..])));

        let mut next = ClientMessage::create_for_encode();
        next.add_frame(Frame::with_content(BytesMut::from(&b"2"[..])));
        next.add_frame(Frame::with_content(BytesMut::from(&b"3"[..])));

        logical.merge(next);
        let contents: Vec<_> = logical.frames().iter().map(|f| f.content[0]).collect();
        assert_eq!(contents, vec![b'1', b'2', b'3']);
    }

    #[test]
    fn test_copy_with_new_correlation_id_is_isolated() {
        let mut original = ClientMessage::create_request(5, 0);
        original.add_frame(Frame::with_content(BytesMut::from(&b"payload"[..])));
        original.set_retryable(true);
        let original_id = original.correlation_id().unwrap();

        let copy = original.copy_with_new_correlation_id(original_id + 1000);

        assert_eq!(copy.correlation_id(), Some(original_id + 1000));
        assert_eq!(original.correlation_id(), Some(original_id));
        assert!(copy.is_retryable());
        assert_eq!(copy.frames()[1], original.frames()[1]);
    }

    #[test]
    fn test_is_event() {
        let event_frame = Frame::with_flags(FrameFlags::IS_EVENT | FrameFlags::UNFRAGMENTED);
        let msg = ClientMessage::create_for_decode(vec![event_frame]);
        assert!(msg.is_event());

        let plain = ClientMessage::create_request(1, 0);
        assert!(!plain.is_event());
    }

    #[test]
    fn test_write_to_empty_message() {
        let msg = ClientMessage::create_for_encode();
        assert_eq!(msg.total_length(), 0);
        assert!(msg.to_bytes().is_empty());
    }
}
