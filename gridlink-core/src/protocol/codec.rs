//! Stream codec: client messages over a raw byte stream.
//!
//! [`ClientMessageCodec`] splits the inbound byte stream into frames and
//! groups them into physical messages ending at a FINAL frame.
//! [`FragmentAssembler`] sits behind it and reassembles fragmented
//! logical messages by fragmentation id.

use std::collections::HashMap;

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use super::client_message::ClientMessage;
use super::frame::Frame;
use crate::error::{GridlinkError, Result};

/// Tokio codec for client messages.
///
/// Decoding accumulates frames across reads until a frame carrying the
/// FINAL bit closes the physical message, so a message split across any
/// number of TCP segments decodes correctly.
#[derive(Debug, Default)]
pub struct ClientMessageCodec {
    partial_frames: Vec<Frame>,
}

impl ClientMessageCodec {
    /// Creates a new codec with no partial state.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Encoder<ClientMessage> for ClientMessageCodec {
    type Error = GridlinkError;

    fn encode(&mut self, message: ClientMessage, dst: &mut BytesMut) -> Result<()> {
        if message.is_empty() {
            return Err(GridlinkError::Protocol(
                "cannot encode a message with no frames".to_string(),
            ));
        }
        dst.reserve(message.total_length());
        message.write_to(dst);
        Ok(())
    }
}

impl Decoder for ClientMessageCodec {
    type Item = ClientMessage;
    type Error = GridlinkError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<ClientMessage>> {
        while let Some(frame) = Frame::read_from(src) {
            let is_final = frame.is_final_frame();
            self.partial_frames.push(frame);
            if is_final {
                let frames = std::mem::take(&mut self.partial_frames);
                return Ok(Some(ClientMessage::create_for_decode(frames)));
            }
        }
        Ok(None)
    }
}

/// Reassembles fragmented messages into complete logical messages.
///
/// Unfragmented messages pass straight through. Fragments are keyed by
/// their fragmentation id; every fragment's leading id frame is dropped
/// and its payload frames are appended, in arrival order, onto the
/// partial message started by the begin fragment. The end fragment
/// releases the assembled message.
#[derive(Debug, Default)]
pub struct FragmentAssembler {
    partial_messages: HashMap<i64, ClientMessage>,
}

impl FragmentAssembler {
    /// Creates a new assembler with no partial messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts one physical message and returns the complete logical
    /// message once all of its fragments have arrived.
    ///
    /// A continuation whose begin fragment was never seen is dropped
    /// with a warning; losing one fragment of a message makes the rest
    /// of it garbage.
    pub fn accept(&mut self, mut message: ClientMessage) -> Option<ClientMessage> {
        let start_frame = message.start_frame()?;

        if start_frame.has_unfragmented_flag() {
            return Some(message);
        }

        let begins = start_frame.has_begin_fragment_flag();
        let ends = start_frame.has_end_fragment_flag();
        let Some(fragmentation_id) = message.fragmentation_id() else {
            tracing::warn!("dropping fragment with a malformed leading frame");
            return None;
        };

        message.drop_fragmentation_frame();

        if begins {
            tracing::trace!(fragmentation_id, "received begin fragment");
            if self
                .partial_messages
                .insert(fragmentation_id, message)
                .is_some()
            {
                tracing::warn!(
                    fragmentation_id,
                    "begin fragment replaced an unfinished message with the same id"
                );
            }
            return None;
        }

        let Some(mut assembled) = self.partial_messages.remove(&fragmentation_id) else {
            tracing::warn!(
                fragmentation_id,
                "dropping continuation fragment with no begin fragment"
            );
            return None;
        };

        assembled.merge(message);

        if ends {
            tracing::trace!(fragmentation_id, "assembled fragmented message");
            Some(assembled)
        } else {
            self.partial_messages.insert(fragmentation_id, assembled);
            None
        }
    }

    /// Number of messages still waiting for their end fragment.
    pub fn pending(&self) -> usize {
        self.partial_messages.len()
    }
}
