//! Frame type for the Gridlink binary wire protocol.

use bitflags::bitflags;
use bytes::{Buf, BufMut, BytesMut};

use super::constants::*;

bitflags! {
    /// Frame flags carried in the 2-byte flags field of every frame.
    ///
    /// Bit positions are fixed by the wire protocol. Multi-bit values
    /// such as [`FrameFlags::UNFRAGMENTED`] require every bit of the
    /// mask to be set, which is exactly the semantics of
    /// [`FrameFlags::contains`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FrameFlags: u16 {
        /// First physical fragment of a logical message.
        const BEGIN_FRAGMENT = 1 << 15;
        /// Last physical fragment of a logical message.
        const END_FRAGMENT = 1 << 14;
        /// Last frame of a physical message on the wire.
        const IS_FINAL = 1 << 13;
        /// Opens a variable-length data structure.
        const BEGIN_DATA_STRUCTURE = 1 << 12;
        /// Closes a variable-length data structure.
        const END_DATA_STRUCTURE = 1 << 11;
        /// The frame stands for a null value.
        const IS_NULL = 1 << 10;
        /// The message is a server-pushed event.
        const IS_EVENT = 1 << 9;
        /// The request expects backup acknowledgements.
        const IS_BACKUP_AWARE = 1 << 8;
        /// The message is a backup event.
        const IS_BACKUP_EVENT = 1 << 7;

        /// A message that fits in a single physical message: both
        /// fragment boundary bits set.
        const UNFRAGMENTED = Self::BEGIN_FRAGMENT.bits() | Self::END_FRAGMENT.bits();
    }
}

/// A single frame in the Gridlink protocol.
///
/// Each frame consists of:
/// - A 4-byte length field (little-endian)
/// - A 2-byte flags field (little-endian)
/// - Variable-length content
///
/// Frames are plain values. The flag-only sentinel frames (null, begin
/// data structure, end data structure) are produced by constructors that
/// return a fresh value on every call, so linking one into a message can
/// never affect another message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The frame content (payload after flags).
    pub content: BytesMut,
    /// Frame flags indicating frame type and properties.
    pub flags: FrameFlags,
}

impl Frame {
    /// Creates a new frame with the given content and flags.
    pub fn new(content: BytesMut, flags: FrameFlags) -> Self {
        Self { content, flags }
    }

    /// Creates a new frame with content and no flags set.
    pub fn with_content(content: BytesMut) -> Self {
        Self::new(content, FrameFlags::empty())
    }

    /// Creates a new empty frame with the given flags.
    pub fn with_flags(flags: FrameFlags) -> Self {
        Self::new(BytesMut::new(), flags)
    }

    /// Creates an initial frame of `size` zeroed bytes flagged as a
    /// complete, unfragmented message.
    ///
    /// Header fields are written into the zeroed content afterwards at
    /// their fixed offsets.
    pub fn initial(size: usize) -> Self {
        Self::initial_with_flags(size, FrameFlags::UNFRAGMENTED)
    }

    /// Creates an initial frame of `size` zeroed bytes with explicit flags.
    pub fn initial_with_flags(size: usize, flags: FrameFlags) -> Self {
        Self::new(BytesMut::zeroed(size), flags)
    }

    /// Creates a fresh null sentinel frame.
    pub fn null_frame() -> Self {
        Self::with_flags(FrameFlags::IS_NULL)
    }

    /// Creates a fresh begin-data-structure sentinel frame.
    pub fn begin_data_structure() -> Self {
        Self::with_flags(FrameFlags::BEGIN_DATA_STRUCTURE)
    }

    /// Creates a fresh end-data-structure sentinel frame.
    pub fn end_data_structure() -> Self {
        Self::with_flags(FrameFlags::END_DATA_STRUCTURE)
    }

    /// Returns true if this frame opens a data structure.
    pub fn is_begin_frame(&self) -> bool {
        self.flags.contains(FrameFlags::BEGIN_DATA_STRUCTURE)
    }

    /// Returns true if this frame closes a data structure.
    pub fn is_end_frame(&self) -> bool {
        self.flags.contains(FrameFlags::END_DATA_STRUCTURE)
    }

    /// Returns true if this frame stands for a null value.
    pub fn is_null_frame(&self) -> bool {
        self.flags.contains(FrameFlags::IS_NULL)
    }

    /// Returns true if this frame has the FINAL flag set.
    pub fn is_final_frame(&self) -> bool {
        self.flags.contains(FrameFlags::IS_FINAL)
    }

    /// Returns true if this frame has the EVENT flag set.
    pub fn has_event_flag(&self) -> bool {
        self.flags.contains(FrameFlags::IS_EVENT)
    }

    /// Returns true if this frame has the BACKUP_EVENT flag set.
    pub fn has_backup_event_flag(&self) -> bool {
        self.flags.contains(FrameFlags::IS_BACKUP_EVENT)
    }

    /// Returns true if this frame opens a fragmented message.
    pub fn has_begin_fragment_flag(&self) -> bool {
        self.flags.contains(FrameFlags::BEGIN_FRAGMENT)
    }

    /// Returns true if this frame closes a fragmented message.
    pub fn has_end_fragment_flag(&self) -> bool {
        self.flags.contains(FrameFlags::END_FRAGMENT)
    }

    /// Returns true if both fragment boundary bits are set, i.e. the
    /// message is complete in a single physical message.
    pub fn has_unfragmented_flag(&self) -> bool {
        self.flags.contains(FrameFlags::UNFRAGMENTED)
    }

    /// Returns the size of this frame on the wire.
    ///
    /// This includes the 4-byte length field, 2-byte flags, and content.
    pub fn wire_size(&self) -> usize {
        FRAME_HEADER_SIZE + self.content.len()
    }

    /// Returns the frame length value (flags + content length).
    ///
    /// This is the value written in the length field.
    pub fn frame_length(&self) -> usize {
        SIZE_OF_FRAME_FLAGS_FIELD + self.content.len()
    }

    /// Writes this frame to the given buffer with its stored flags.
    pub fn write_to(&self, dst: &mut BytesMut) {
        self.write_to_with_flags(dst, self.flags);
    }

    /// Writes this frame to the given buffer with explicit flags.
    ///
    /// Used by message serialization to force the FINAL bit onto the
    /// last frame without mutating the frame itself.
    pub fn write_to_with_flags(&self, dst: &mut BytesMut, flags: FrameFlags) {
        dst.reserve(self.wire_size());
        dst.put_u32_le(self.frame_length() as u32);
        dst.put_u16_le(flags.bits());
        dst.put_slice(&self.content);
    }

    /// Reads a frame from the given buffer.
    ///
    /// Returns `None` if there isn't enough data to read a complete
    /// frame, leaving the buffer untouched. Unknown flag bits from newer
    /// protocol versions are preserved.
    pub fn read_from(src: &mut BytesMut) -> Option<Self> {
        if src.len() < SIZE_OF_FRAME_LENGTH_FIELD {
            return None;
        }

        let frame_length = u32::from_le_bytes([src[0], src[1], src[2], src[3]]) as usize;
        if frame_length < SIZE_OF_FRAME_FLAGS_FIELD {
            return None;
        }
        let total_frame_size = SIZE_OF_FRAME_LENGTH_FIELD + frame_length;

        if src.len() < total_frame_size {
            return None;
        }

        src.advance(SIZE_OF_FRAME_LENGTH_FIELD);
        let flags = FrameFlags::from_bits_retain(src.get_u16_le());
        let content_length = frame_length - SIZE_OF_FRAME_FLAGS_FIELD;
        let content = src.split_to(content_length);

        Some(Self::new(content, flags))
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::with_flags(FrameFlags::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frame() {
        let content = BytesMut::from(&[1, 2, 3][..]);
        let frame = Frame::new(content.clone(), FrameFlags::BEGIN_DATA_STRUCTURE);
        assert_eq!(frame.content, content);
        assert_eq!(frame.flags, FrameFlags::BEGIN_DATA_STRUCTURE);
    }

    #[test]
    fn test_sentinel_frames_are_fresh_values() {
        let a = Frame::null_frame();
        let b = Frame::null_frame();
        assert_eq!(a, b);
        assert!(a.is_null_frame());
        assert!(Frame::begin_data_structure().is_begin_frame());
        assert!(Frame::end_data_structure().is_end_frame());
    }

    #[test]
    fn test_multi_bit_flag_membership_requires_all_bits() {
        let begin_only = Frame::with_flags(FrameFlags::BEGIN_FRAGMENT);
        assert!(begin_only.has_begin_fragment_flag());
        assert!(!begin_only.has_unfragmented_flag());

        let both = Frame::with_flags(FrameFlags::UNFRAGMENTED);
        assert!(both.has_begin_fragment_flag());
        assert!(both.has_end_fragment_flag());
        assert!(both.has_unfragmented_flag());
    }

    #[test]
    fn test_initial_frame_defaults_to_unfragmented() {
        let frame = Frame::initial(REQUEST_HEADER_SIZE);
        assert!(frame.has_unfragmented_flag());
        assert_eq!(frame.content.len(), REQUEST_HEADER_SIZE);
        assert!(frame.content.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_wire_size() {
        let empty = Frame::default();
        assert_eq!(empty.wire_size(), 6);

        let with_content = Frame::with_content(BytesMut::from(&[1, 2, 3, 4, 5][..]));
        assert_eq!(with_content.wire_size(), 11);
    }

    #[test]
    fn test_frame_length() {
        let empty = Frame::default();
        assert_eq!(empty.frame_length(), 2);

        let with_content = Frame::with_content(BytesMut::from(&[1, 2, 3][..]));
        assert_eq!(with_content.frame_length(), 5);
    }

    #[test]
    fn test_write_and_read_frame() {
        let original = Frame::new(
            BytesMut::from(&[0xDE, 0xAD, 0xBE, 0xEF][..]),
            FrameFlags::BEGIN_DATA_STRUCTURE,
        );
        let mut buf = BytesMut::new();
        original.write_to(&mut buf);

        assert_eq!(buf.len(), original.wire_size());

        let decoded = Frame::read_from(&mut buf).unwrap();
        assert_eq!(decoded.flags, original.flags);
        assert_eq!(decoded.content, original.content);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_write_with_forced_final_flag() {
        let frame = Frame::with_content(BytesMut::from(&[7u8][..]));
        let mut buf = BytesMut::new();
        frame.write_to_with_flags(&mut buf, frame.flags | FrameFlags::IS_FINAL);

        let decoded = Frame::read_from(&mut buf).unwrap();
        assert!(decoded.is_final_frame());
        // The frame itself was not mutated.
        assert!(!frame.is_final_frame());
    }

    #[test]
    fn test_read_incomplete_length() {
        let mut buf = BytesMut::from(&[0x01, 0x02][..]);
        assert!(Frame::read_from(&mut buf).is_none());
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn test_read_incomplete_content() {
        let mut buf = BytesMut::from(
            &[
                0x06, 0x00, 0x00, 0x00, // length = 6 (flags + 4 bytes content)
                0x00, 0x80, // flags
                0x01, 0x02, // only 2 bytes of content
            ][..],
        );
        assert!(Frame::read_from(&mut buf).is_none());
    }

    #[test]
    fn test_read_empty_frame() {
        let mut buf = BytesMut::from(
            &[
                0x02, 0x00, 0x00, 0x00, // length = 2 (just flags)
                0x00, 0x08, // END_DATA_STRUCTURE
            ][..],
        );

        let frame = Frame::read_from(&mut buf).unwrap();
        assert!(frame.is_end_frame());
        assert!(frame.content.is_empty());
    }

    #[test]
    fn test_unknown_flag_bits_are_preserved() {
        // Bit 0 is unassigned; a newer server may set it.
        let mut buf = BytesMut::new();
        buf.put_u32_le(2);
        buf.put_u16_le((1 << 10) | 1);

        let frame = Frame::read_from(&mut buf).unwrap();
        assert!(frame.is_null_frame());
        assert_eq!(frame.flags.bits(), (1 << 10) | 1);
    }

    #[test]
    fn test_frame_roundtrip_with_all_flags() {
        let flags = FrameFlags::UNFRAGMENTED | FrameFlags::IS_FINAL | FrameFlags::IS_EVENT;
        let content = BytesMut::from(&[1, 2, 3, 4, 5, 6, 7, 8][..]);
        let original = Frame::new(content.clone(), flags);

        let mut buf = BytesMut::new();
        original.write_to(&mut buf);

        let decoded = Frame::read_from(&mut buf).unwrap();

        assert_eq!(decoded.flags, flags);
        assert_eq!(decoded.content, content);
        assert!(decoded.is_final_frame());
        assert!(decoded.has_event_flag());
        assert!(decoded.has_unfragmented_flag());
    }

    #[test]
    fn test_read_large_frame() {
        let content: Vec<u8> = (0..1000).map(|i| (i % 256) as u8).collect();
        let original = Frame::with_content(BytesMut::from(&content[..]));

        let mut buf = BytesMut::new();
        original.write_to(&mut buf);

        let decoded = Frame::read_from(&mut buf).unwrap();
        assert_eq!(decoded.content.len(), 1000);
        assert_eq!(&decoded.content[..], &content[..]);
    }

    #[test]
    fn test_default_frame_properties() {
        let frame = Frame::default();

        assert!(!frame.is_begin_frame());
        assert!(!frame.is_end_frame());
        assert!(!frame.is_null_frame());
        assert!(!frame.is_final_frame());
        assert!(!frame.has_event_flag());
        assert!(!frame.has_backup_event_flag());
        assert!(frame.content.is_empty());
    }
}
