//! Null-compressed fixed-width array codec ("contains nullable").
//!
//! Used for columnar result pages where a column of fixed-width values
//! may contain nulls. A single frame holds a one-byte mode discriminant
//! and an item count, then:
//!
//! - mode 1 (all null): nothing further;
//! - mode 2 (all present): the densely packed values;
//! - mode 3 (mixed): items in runs of 8, each run preceded by one
//!   bitmask byte where bit `i` (LSB-first) marks item `i` of the run as
//!   present; present values follow their bitmask byte contiguously and
//!   absent items contribute no bytes.
//!
//! The grouping and discriminant are wire-fixed and must not change.

use bytes::BytesMut;

use crate::codec::fix_sized::{self, FixSizedType};
use crate::error::{GridlinkError, Result};
use crate::protocol::{ClientMessage, Frame, FrameCursor};

const TYPE_NULL_ONLY: u8 = 1;
const TYPE_NOT_NULL_ONLY: u8 = 2;
const TYPE_MIXED: u8 = 3;

const HEADER_SIZE: usize = 1 + fix_sized::INT_SIZE_IN_BYTES;
const ITEMS_PER_BITMASK: usize = 8;

/// Encodes a fixed-width array whose items may be null.
pub fn encode<T: FixSizedType>(message: &mut ClientMessage, items: &[Option<T>]) {
    let total_count = items.len();
    let non_null_count = items.iter().filter(|item| item.is_some()).count();

    let content = if non_null_count == 0 {
        let mut content = BytesMut::zeroed(HEADER_SIZE);
        content[0] = TYPE_NULL_ONLY;
        fix_sized::encode_i32(&mut content, 1, total_count as i32);
        content
    } else if non_null_count == total_count {
        let mut content = BytesMut::zeroed(HEADER_SIZE + total_count * T::SIZE_IN_BYTES);
        content[0] = TYPE_NOT_NULL_ONLY;
        fix_sized::encode_i32(&mut content, 1, total_count as i32);
        let mut pos = HEADER_SIZE;
        for item in items.iter().flatten() {
            item.write_to(&mut content, pos);
            pos += T::SIZE_IN_BYTES;
        }
        content
    } else {
        let bitmask_count = total_count.div_ceil(ITEMS_PER_BITMASK);
        let size = HEADER_SIZE + bitmask_count + non_null_count * T::SIZE_IN_BYTES;
        let mut content = BytesMut::zeroed(size);
        content[0] = TYPE_MIXED;
        fix_sized::encode_i32(&mut content, 1, total_count as i32);

        let mut pos = HEADER_SIZE;
        let mut bitmask_pos = 0;
        for (i, item) in items.iter().enumerate() {
            if i % ITEMS_PER_BITMASK == 0 {
                bitmask_pos = pos;
                pos += 1;
            }
            if let Some(value) = item {
                content[bitmask_pos] |= 1 << (i % ITEMS_PER_BITMASK);
                value.write_to(&mut content, pos);
                pos += T::SIZE_IN_BYTES;
            }
        }
        content
    };

    message.add_frame(Frame::with_content(content));
}

/// Decodes a fixed-width array whose items may be null.
pub fn decode<T: FixSizedType>(cursor: &mut FrameCursor<'_>) -> Result<Vec<Option<T>>> {
    let frame = cursor.next_frame()?;
    let content = &frame.content;
    let mode = content[0];
    let count = fix_sized::decode_i32(content, 1) as usize;

    match mode {
        TYPE_NULL_ONLY => Ok(vec![None; count]),
        TYPE_NOT_NULL_ONLY => {
            let mut items = Vec::with_capacity(count);
            for i in 0..count {
                items.push(Some(T::read_from(
                    content,
                    HEADER_SIZE + i * T::SIZE_IN_BYTES,
                )));
            }
            Ok(items)
        }
        TYPE_MIXED => {
            let mut items = Vec::with_capacity(count);
            let mut pos = HEADER_SIZE;
            let mut bitmask = 0u8;
            for i in 0..count {
                if i % ITEMS_PER_BITMASK == 0 {
                    bitmask = content[pos];
                    pos += 1;
                }
                if bitmask & (1 << (i % ITEMS_PER_BITMASK)) != 0 {
                    items.push(Some(T::read_from(content, pos)));
                    pos += T::SIZE_IN_BYTES;
                } else {
                    items.push(None);
                }
            }
            Ok(items)
        }
        other => Err(GridlinkError::Protocol(format!(
            "unknown null-compression mode {other}"
        ))),
    }
}
