//! Response (0x03) — Server → Client, reply to a Request command.

use serde::Serialize;

use crate::buffer::PacketBuffer;
use crate::codec::ProtoDecode;
use crate::error::ProtoError;
use crate::version::Version;

/// Command reply. Servers answer with either a 4-byte result code or a
/// NUL-terminated string, told apart only by the body length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Response {
    Empty,
    Code(i32),
    Text(String),
}

impl ProtoDecode for Response {
    const NAME: &'static str = "Response";

    fn proto_decode(buf: &mut PacketBuffer, _version: Version) -> Result<Self, ProtoError> {
        match buf.remaining() {
            0 => Ok(Self::Empty),
            4 => Ok(Self::Code(buf.read_i32()?)),
            n => Ok(Self::Text(
                buf.read_string(n, false).map_err(|e| e.in_field("text"))?,
            )),
        }
    }
}
