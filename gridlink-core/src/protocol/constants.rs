//! Protocol constants for the Gridlink binary wire protocol.

/// Size of the frame length field in bytes.
pub const SIZE_OF_FRAME_LENGTH_FIELD: usize = 4;

/// Size of the frame flags field in bytes.
pub const SIZE_OF_FRAME_FLAGS_FIELD: usize = 2;

/// Total frame header size (length + flags).
pub const FRAME_HEADER_SIZE: usize = SIZE_OF_FRAME_LENGTH_FIELD + SIZE_OF_FRAME_FLAGS_FIELD;

/// Offset of the message type in the initial frame content.
pub const TYPE_FIELD_OFFSET: usize = 0;

/// Offset of the correlation id in the initial frame content.
pub const CORRELATION_ID_OFFSET: usize = TYPE_FIELD_OFFSET + 4;

/// Offset of the partition id in a request initial frame.
pub const PARTITION_ID_OFFSET: usize = CORRELATION_ID_OFFSET + 8;

/// Size of the request initial frame header.
pub const REQUEST_HEADER_SIZE: usize = PARTITION_ID_OFFSET + 4;

/// Offset of the backup-ack count in a response initial frame.
///
/// Same physical offset as [`PARTITION_ID_OFFSET`]; the byte range is
/// reinterpreted depending on message role.
pub const RESPONSE_BACKUP_ACKS_OFFSET: usize = CORRELATION_ID_OFFSET + 8;

/// Size of the response initial frame header.
pub const RESPONSE_HEADER_SIZE: usize = RESPONSE_BACKUP_ACKS_OFFSET + 1;

/// Offset of the fragmentation id in the leading frame of a fragment.
pub const FRAGMENTATION_ID_OFFSET: usize = 0;

/// Partition id indicating no specific partition (-1).
pub const PARTITION_ID_ANY: i32 = -1;

/// Message type of an error response carrying a chain of error holders.
pub const EXCEPTION_MESSAGE_TYPE: i32 = 0;
