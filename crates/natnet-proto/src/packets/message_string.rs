//! MessageString (0x08) — Server → Client.

use serde::Serialize;

use crate::buffer::PacketBuffer;
use crate::codec::ProtoDecode;
use crate::error::ProtoError;
use crate::version::Version;

/// Free-form text pushed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageString {
    pub message: String,
}

impl ProtoDecode for MessageString {
    const NAME: &'static str = "MessageString";

    fn proto_decode(buf: &mut PacketBuffer, _version: Version) -> Result<Self, ProtoError> {
        let max_length = buf.remaining();
        let message = buf
            .read_string(max_length, false)
            .map_err(|e| e.in_field("message"))?;
        Ok(Self { message })
    }
}
