//! KeepAlive (0x0A) — Server → Client.

use serde::Serialize;

use crate::buffer::PacketBuffer;
use crate::codec::ProtoDecode;
use crate::error::ProtoError;
use crate::version::Version;

/// Heartbeat with an empty body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeepAlive;

impl ProtoDecode for KeepAlive {
    const NAME: &'static str = "KeepAlive";

    fn proto_decode(_buf: &mut PacketBuffer, _version: Version) -> Result<Self, ProtoError> {
        Ok(Self)
    }
}

/// Sent when the server did not understand a request (0x64).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnrecognizedRequest;

impl ProtoDecode for UnrecognizedRequest {
    const NAME: &'static str = "UnrecognizedRequest";

    fn proto_decode(_buf: &mut PacketBuffer, _version: Version) -> Result<Self, ProtoError> {
        Ok(Self)
    }
}
