//! Fixed-width scalar encoding at explicit byte offsets.
//!
//! These helpers read and write little-endian scalars at a
//! caller-supplied offset inside a frame's content, which is how several
//! fixed fields get packed into one initial frame. Offsets out of range
//! indicate an encoder/decoder disagreement and panic rather than
//! returning an error; decoders trust a version-compatible peer.

use uuid::Uuid;

/// Size of a boolean on the wire.
pub const BOOLEAN_SIZE_IN_BYTES: usize = 1;
/// Size of a byte on the wire.
pub const BYTE_SIZE_IN_BYTES: usize = 1;
/// Size of a short on the wire.
pub const SHORT_SIZE_IN_BYTES: usize = 2;
/// Size of an int on the wire.
pub const INT_SIZE_IN_BYTES: usize = 4;
/// Size of a long on the wire.
pub const LONG_SIZE_IN_BYTES: usize = 8;
/// Size of a float on the wire.
pub const FLOAT_SIZE_IN_BYTES: usize = 4;
/// Size of a double on the wire.
pub const DOUBLE_SIZE_IN_BYTES: usize = 8;
/// Size of a UUID on the wire: a null boolean plus two long words.
pub const UUID_SIZE_IN_BYTES: usize = BOOLEAN_SIZE_IN_BYTES + 2 * LONG_SIZE_IN_BYTES;

/// Writes a bool at the given offset.
pub fn encode_bool(buf: &mut [u8], offset: usize, value: bool) {
    buf[offset] = value as u8;
}

/// Reads a bool from the given offset.
pub fn decode_bool(buf: &[u8], offset: usize) -> bool {
    buf[offset] == 1
}

/// Writes a byte at the given offset.
pub fn encode_u8(buf: &mut [u8], offset: usize, value: u8) {
    buf[offset] = value;
}

/// Reads a byte from the given offset.
pub fn decode_u8(buf: &[u8], offset: usize) -> u8 {
    buf[offset]
}

/// Writes a little-endian i16 at the given offset.
pub fn encode_i16(buf: &mut [u8], offset: usize, value: i16) {
    buf[offset..offset + SHORT_SIZE_IN_BYTES].copy_from_slice(&value.to_le_bytes());
}

/// Reads a little-endian i16 from the given offset.
pub fn decode_i16(buf: &[u8], offset: usize) -> i16 {
    let mut bytes = [0u8; SHORT_SIZE_IN_BYTES];
    bytes.copy_from_slice(&buf[offset..offset + SHORT_SIZE_IN_BYTES]);
    i16::from_le_bytes(bytes)
}

/// Writes a little-endian i32 at the given offset.
pub fn encode_i32(buf: &mut [u8], offset: usize, value: i32) {
    buf[offset..offset + INT_SIZE_IN_BYTES].copy_from_slice(&value.to_le_bytes());
}

/// Reads a little-endian i32 from the given offset.
pub fn decode_i32(buf: &[u8], offset: usize) -> i32 {
    let mut bytes = [0u8; INT_SIZE_IN_BYTES];
    bytes.copy_from_slice(&buf[offset..offset + INT_SIZE_IN_BYTES]);
    i32::from_le_bytes(bytes)
}

/// Writes a little-endian i64 at the given offset.
///
/// On the wire this is the canonical two-32-bit-word little-endian form
/// used for correlation and fragmentation ids.
pub fn encode_i64(buf: &mut [u8], offset: usize, value: i64) {
    buf[offset..offset + LONG_SIZE_IN_BYTES].copy_from_slice(&value.to_le_bytes());
}

/// Reads a little-endian i64 from the given offset.
pub fn decode_i64(buf: &[u8], offset: usize) -> i64 {
    let mut bytes = [0u8; LONG_SIZE_IN_BYTES];
    bytes.copy_from_slice(&buf[offset..offset + LONG_SIZE_IN_BYTES]);
    i64::from_le_bytes(bytes)
}

/// Writes a non-negative i64 at the given offset.
///
/// Correlation ids are non-negative by protocol convention, which keeps
/// the value representable in 63 bits for peers without native 64-bit
/// integers. A negative input is a programming error.
pub fn encode_non_negative_i64(buf: &mut [u8], offset: usize, value: i64) {
    debug_assert!(value >= 0, "only non-negative values are allowed, received: {value}");
    encode_i64(buf, offset, value);
}

/// Writes a little-endian f32 at the given offset.
pub fn encode_f32(buf: &mut [u8], offset: usize, value: f32) {
    buf[offset..offset + FLOAT_SIZE_IN_BYTES].copy_from_slice(&value.to_le_bytes());
}

/// Reads a little-endian f32 from the given offset.
pub fn decode_f32(buf: &[u8], offset: usize) -> f32 {
    let mut bytes = [0u8; FLOAT_SIZE_IN_BYTES];
    bytes.copy_from_slice(&buf[offset..offset + FLOAT_SIZE_IN_BYTES]);
    f32::from_le_bytes(bytes)
}

/// Writes a little-endian f64 at the given offset.
pub fn encode_f64(buf: &mut [u8], offset: usize, value: f64) {
    buf[offset..offset + DOUBLE_SIZE_IN_BYTES].copy_from_slice(&value.to_le_bytes());
}

/// Reads a little-endian f64 from the given offset.
pub fn decode_f64(buf: &[u8], offset: usize) -> f64 {
    let mut bytes = [0u8; DOUBLE_SIZE_IN_BYTES];
    bytes.copy_from_slice(&buf[offset..offset + DOUBLE_SIZE_IN_BYTES]);
    f64::from_le_bytes(bytes)
}

/// Writes an optional UUID at the given offset: one null-boolean byte,
/// then the most and least significant long words.
pub fn encode_uuid(buf: &mut [u8], offset: usize, value: Option<Uuid>) {
    match value {
        None => encode_bool(buf, offset, true),
        Some(uuid) => {
            encode_bool(buf, offset, false);
            let (most_significant, least_significant) = uuid.as_u64_pair();
            encode_i64(
                buf,
                offset + BOOLEAN_SIZE_IN_BYTES,
                most_significant as i64,
            );
            encode_i64(
                buf,
                offset + BOOLEAN_SIZE_IN_BYTES + LONG_SIZE_IN_BYTES,
                least_significant as i64,
            );
        }
    }
}

/// Reads an optional UUID from the given offset.
pub fn decode_uuid(buf: &[u8], offset: usize) -> Option<Uuid> {
    if decode_bool(buf, offset) {
        return None;
    }
    let most_significant = decode_i64(buf, offset + BOOLEAN_SIZE_IN_BYTES);
    let least_significant = decode_i64(buf, offset + BOOLEAN_SIZE_IN_BYTES + LONG_SIZE_IN_BYTES);
    Some(Uuid::from_u64_pair(
        most_significant as u64,
        least_significant as u64,
    ))
}

/// A scalar with a fixed wire width, readable and writable at an offset.
///
/// Implemented by the scalar types that may appear in packed frames and
/// in the homogeneous array codecs.
pub trait FixSizedType: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Wire width of the type in bytes.
    const SIZE_IN_BYTES: usize;

    /// Writes the value at the given offset.
    fn write_to(&self, buf: &mut [u8], offset: usize);

    /// Reads a value from the given offset.
    fn read_from(buf: &[u8], offset: usize) -> Self;
}

impl FixSizedType for bool {
    const SIZE_IN_BYTES: usize = BOOLEAN_SIZE_IN_BYTES;

    fn write_to(&self, buf: &mut [u8], offset: usize) {
        encode_bool(buf, offset, *self);
    }

    fn read_from(buf: &[u8], offset: usize) -> Self {
        decode_bool(buf, offset)
    }
}

impl FixSizedType for u8 {
    const SIZE_IN_BYTES: usize = BYTE_SIZE_IN_BYTES;

    fn write_to(&self, buf: &mut [u8], offset: usize) {
        encode_u8(buf, offset, *self);
    }

    fn read_from(buf: &[u8], offset: usize) -> Self {
        decode_u8(buf, offset)
    }
}

impl FixSizedType for i16 {
    const SIZE_IN_BYTES: usize = SHORT_SIZE_IN_BYTES;

    fn write_to(&self, buf: &mut [u8], offset: usize) {
        encode_i16(buf, offset, *self);
    }

    fn read_from(buf: &[u8], offset: usize) -> Self {
        decode_i16(buf, offset)
    }
}

impl FixSizedType for i32 {
    const SIZE_IN_BYTES: usize = INT_SIZE_IN_BYTES;

    fn write_to(&self, buf: &mut [u8], offset: usize) {
        encode_i32(buf, offset, *self);
    }

    fn read_from(buf: &[u8], offset: usize) -> Self {
        decode_i32(buf, offset)
    }
}

impl FixSizedType for i64 {
    const SIZE_IN_BYTES: usize = LONG_SIZE_IN_BYTES;

    fn write_to(&self, buf: &mut [u8], offset: usize) {
        encode_i64(buf, offset, *self);
    }

    fn read_from(buf: &[u8], offset: usize) -> Self {
        decode_i64(buf, offset)
    }
}

impl FixSizedType for f32 {
    const SIZE_IN_BYTES: usize = FLOAT_SIZE_IN_BYTES;

    fn write_to(&self, buf: &mut [u8], offset: usize) {
        encode_f32(buf, offset, *self);
    }

    fn read_from(buf: &[u8], offset: usize) -> Self {
        decode_f32(buf, offset)
    }
}

impl FixSizedType for f64 {
    const SIZE_IN_BYTES: usize = DOUBLE_SIZE_IN_BYTES;

    fn write_to(&self, buf: &mut [u8], offset: usize) {
        encode_f64(buf, offset, *self);
    }

    fn read_from(buf: &[u8], offset: usize) -> Self {
        decode_f64(buf, offset)
    }
}
