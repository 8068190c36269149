//! Shared codec primitives: nullable wrapping, structure-end detection,
//! and forward-compatible skipping of unknown structures.

use crate::error::Result;
use crate::protocol::{ClientMessage, Frame, FrameCursor};

/// Encodes a nullable value: a fresh null sentinel frame when absent,
/// the delegate encoding otherwise.
pub fn encode_nullable<T>(
    message: &mut ClientMessage,
    value: Option<&T>,
    encode: impl FnOnce(&mut ClientMessage, &T),
) {
    match value {
        None => message.add_frame(Frame::null_frame()),
        Some(value) => encode(message, value),
    }
}

/// Decodes a nullable value.
///
/// Peeks the next frame and consumes it only if it is a null sentinel;
/// otherwise the delegate decoder sees the untouched cursor. Peeking
/// first is what keeps real payload frames from being skipped.
pub fn decode_nullable<T>(
    cursor: &mut FrameCursor<'_>,
    decode: impl FnOnce(&mut FrameCursor<'_>) -> Result<T>,
) -> Result<Option<T>> {
    if next_frame_is_null_frame(cursor)? {
        Ok(None)
    } else {
        decode(cursor).map(Some)
    }
}

/// Returns true, consuming the frame, if the next frame is a null
/// sentinel. Leaves the cursor untouched otherwise.
pub fn next_frame_is_null_frame(cursor: &mut FrameCursor<'_>) -> Result<bool> {
    let is_null = cursor
        .peek_frame()
        .map(Frame::is_null_frame)
        .unwrap_or(false);
    if is_null {
        cursor.next_frame()?;
    }
    Ok(is_null)
}

/// Returns true if the next frame closes the enclosing data structure.
/// Never advances the cursor.
pub fn next_frame_is_data_structure_end_frame(cursor: &FrameCursor<'_>) -> bool {
    cursor.peek_frame().map(Frame::is_end_frame).unwrap_or(false)
}

/// Skips the remainder of the data structure whose begin frame has
/// already been consumed.
///
/// The consumed begin counts as depth 1; every nested begin increments,
/// every end decrements, and the cursor stops just past the end frame
/// that brings the depth to zero. This is how older clients step over
/// fields added by newer servers.
pub fn fast_forward_to_end_frame(cursor: &mut FrameCursor<'_>) -> Result<()> {
    let mut expected_end_frames = 1usize;
    while expected_end_frames != 0 {
        let frame = cursor.next_frame()?;
        if frame.is_end_frame() {
            expected_end_frames -= 1;
        } else if frame.is_begin_frame() {
            expected_end_frames += 1;
        }
    }
    Ok(())
}
