//! Codec for server-side error descriptions.
//!
//! An error response carries a list of [`ErrorHolder`] values ordered
//! outermost error first, each holder describing one link of the remote
//! cause chain. Holders are custom-codec structures: decode skips any
//! trailing fields a newer server may append.

use bytes::BytesMut;

use crate::codec::{fix_sized, list_multi_frame, string, util};
use crate::error::Result;
use crate::protocol::constants::EXCEPTION_MESSAGE_TYPE;
use crate::protocol::{ClientMessage, Frame, FrameCursor};

/// One link of a remote error chain, as sent by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorHolder {
    /// Numeric error code from the shared protocol table.
    pub error_code: i32,
    /// Fully qualified class name of the remote exception.
    pub class_name: String,
    /// Human-readable message, absent for message-less exceptions.
    pub message: Option<String>,
    /// Remote stack trace, outermost call last.
    pub stack_trace: Vec<StackTraceElement>,
}

/// A single remote stack trace entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackTraceElement {
    /// Class containing the execution point.
    pub class_name: String,
    /// Method containing the execution point.
    pub method_name: String,
    /// Source file name, if the remote runtime recorded one.
    pub file_name: Option<String>,
    /// Source line number, or a negative marker for unavailable.
    pub line_number: i32,
}

const LINE_NUMBER_OFFSET: usize = 0;
const STACK_TRACE_INITIAL_FRAME_SIZE: usize = LINE_NUMBER_OFFSET + fix_sized::INT_SIZE_IN_BYTES;

const ERROR_CODE_OFFSET: usize = 0;
const ERROR_HOLDER_INITIAL_FRAME_SIZE: usize = ERROR_CODE_OFFSET + fix_sized::INT_SIZE_IN_BYTES;

/// Encodes one stack trace element.
pub fn encode_stack_trace_element(message: &mut ClientMessage, element: &StackTraceElement) {
    message.add_frame(Frame::begin_data_structure());

    let mut initial = BytesMut::zeroed(STACK_TRACE_INITIAL_FRAME_SIZE);
    fix_sized::encode_i32(&mut initial, LINE_NUMBER_OFFSET, element.line_number);
    message.add_frame(Frame::with_content(initial));

    string::encode(message, &element.class_name);
    string::encode(message, &element.method_name);
    util::encode_nullable(message, element.file_name.as_ref(), |m, v| {
        string::encode(m, v)
    });

    message.add_frame(Frame::end_data_structure());
}

/// Decodes one stack trace element, skipping unknown trailing fields.
pub fn decode_stack_trace_element(cursor: &mut FrameCursor<'_>) -> Result<StackTraceElement> {
    // begin frame
    cursor.next_frame()?;
    let initial = cursor.next_frame()?;
    let line_number = fix_sized::decode_i32(&initial.content, LINE_NUMBER_OFFSET);

    let class_name = string::decode(cursor)?;
    let method_name = string::decode(cursor)?;
    let file_name = util::decode_nullable(cursor, string::decode)?;

    util::fast_forward_to_end_frame(cursor)?;

    Ok(StackTraceElement {
        class_name,
        method_name,
        file_name,
        line_number,
    })
}

/// Encodes one error holder.
pub fn encode(message: &mut ClientMessage, holder: &ErrorHolder) {
    message.add_frame(Frame::begin_data_structure());

    let mut initial = BytesMut::zeroed(ERROR_HOLDER_INITIAL_FRAME_SIZE);
    fix_sized::encode_i32(&mut initial, ERROR_CODE_OFFSET, holder.error_code);
    message.add_frame(Frame::with_content(initial));

    string::encode(message, &holder.class_name);
    util::encode_nullable(message, holder.message.as_ref(), |m, v| {
        string::encode(m, v)
    });
    list_multi_frame::encode(message, &holder.stack_trace, encode_stack_trace_element);

    message.add_frame(Frame::end_data_structure());
}

/// Decodes one error holder, skipping unknown trailing fields.
pub fn decode(cursor: &mut FrameCursor<'_>) -> Result<ErrorHolder> {
    // begin frame
    cursor.next_frame()?;
    let initial = cursor.next_frame()?;
    let error_code = fix_sized::decode_i32(&initial.content, ERROR_CODE_OFFSET);

    let class_name = string::decode(cursor)?;
    let message = util::decode_nullable(cursor, string::decode)?;
    let stack_trace = list_multi_frame::decode(cursor, decode_stack_trace_element)?;

    util::fast_forward_to_end_frame(cursor)?;

    Ok(ErrorHolder {
        error_code,
        class_name,
        message,
        stack_trace,
    })
}

/// Builds an error response message carrying the given holders,
/// outermost error first.
pub fn encode_errors_response(correlation_id: i64, holders: &[ErrorHolder]) -> ClientMessage {
    let mut message = ClientMessage::create_response(EXCEPTION_MESSAGE_TYPE, correlation_id);
    list_multi_frame::encode(&mut message, holders, encode);
    message
}

/// Decodes the holder list of an error response.
pub fn decode_errors_response(message: &ClientMessage) -> Result<Vec<ErrorHolder>> {
    let mut cursor = message.cursor();
    // initial response frame
    cursor.next_frame()?;
    list_multi_frame::decode(&mut cursor, decode)
}
