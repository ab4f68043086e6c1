//! Routes framed messages to their decoders.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::buffer::PacketBuffer;
use crate::codec::ProtoDecode;
use crate::error::ProtoError;
use crate::packets::{
    id, message_name, DataDescriptions, FrameOfMocapData, KeepAlive, MessageString, Packet,
    Response, ServerInfo, UnrecognizedRequest, HEADER_SIZE,
};
use crate::version::Version;

/// Decoder entry point stored in the registry.
pub type DecodeFn = fn(&mut PacketBuffer, Version) -> Result<Packet, ProtoError>;

#[derive(Clone, Copy)]
pub struct Registration {
    pub name: &'static str,
    pub decode: DecodeFn,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Decoded message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    pub message_id: u16,
    /// Declared body length, excluding the header.
    pub length: usize,
    /// Absolute offset of the header.
    pub offset: usize,
}

/// Result of dispatching one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Delivered {
        message_id: u16,
        packet: Packet,
    },
    /// No decoder is registered for `message_id`; its body was stepped over.
    Skipped {
        message_id: u16,
        offset: usize,
        length: usize,
    },
}

impl DispatchOutcome {
    pub fn message_id(&self) -> u16 {
        match self {
            Self::Delivered { message_id, .. } | Self::Skipped { message_id, .. } => *message_id,
        }
    }

    pub fn packet(&self) -> Option<&Packet> {
        match self {
            Self::Delivered { packet, .. } => Some(packet),
            Self::Skipped { .. } => None,
        }
    }

    pub fn into_packet(self) -> Option<Packet> {
        match self {
            Self::Delivered { packet, .. } => Some(packet),
            Self::Skipped { .. } => None,
        }
    }
}

fn decode_into<T>(buf: &mut PacketBuffer, version: Version) -> Result<Packet, ProtoError>
where
    T: ProtoDecode + Into<Packet>,
{
    T::decode(buf, version).map(Into::into)
}

/// Message-id to decoder table, bound to the negotiated protocol version.
///
/// Immutable once built, so a single dispatcher can be shared between
/// threads that decode independent buffers.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    version: Version,
    registry: HashMap<u16, Registration>,
}

impl Dispatcher {
    /// Dispatcher with every server-to-client message registered.
    pub fn new(version: Version) -> Self {
        let mut dispatcher = Self::empty(version);
        dispatcher.register(id::SERVER_INFO, "ServerInfo", decode_into::<ServerInfo>);
        dispatcher.register(id::RESPONSE, "Response", decode_into::<Response>);
        dispatcher.register(
            id::MODEL_DEF,
            "DataDescriptions",
            decode_into::<DataDescriptions>,
        );
        dispatcher.register(
            id::FRAME_OF_DATA,
            "FrameOfMocapData",
            decode_into::<FrameOfMocapData>,
        );
        dispatcher.register(
            id::MESSAGE_STRING,
            "MessageString",
            decode_into::<MessageString>,
        );
        dispatcher.register(id::KEEP_ALIVE, "KeepAlive", decode_into::<KeepAlive>);
        dispatcher.register(
            id::UNRECOGNIZED_REQUEST,
            "UnrecognizedRequest",
            decode_into::<UnrecognizedRequest>,
        );
        dispatcher
    }

    /// Dispatcher that skips every message.
    pub fn empty(version: Version) -> Self {
        Self {
            version,
            registry: HashMap::new(),
        }
    }

    /// Install a decoder, returning the one it replaced.
    pub fn register(
        &mut self,
        message_id: u16,
        name: &'static str,
        decode: DecodeFn,
    ) -> Option<Registration> {
        self.registry
            .insert(message_id, Registration { name, decode })
    }

    pub fn unregister(&mut self, message_id: u16) -> Option<Registration> {
        self.registry.remove(&message_id)
    }

    pub fn is_registered(&self, message_id: u16) -> bool {
        self.registry.contains_key(&message_id)
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Switch to a newly negotiated version.
    pub fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    /// Read and validate a message header.
    ///
    /// A header cut short fails with a bare `TruncatedBuffer` and leaves the
    /// position unchanged. A body longer than the remaining bytes fails with
    /// `TruncatedBuffer` wrapped in the message context.
    pub fn read_header(buf: &mut PacketBuffer) -> Result<PacketHeader, ProtoError> {
        let offset = buf.position();
        let mut peek = buf.clone();
        let message_id = peek.read_u16()?;
        let length = usize::from(peek.read_u16()?);
        if peek.remaining() < length {
            return Err(ProtoError::Packet {
                message_id,
                offset,
                source: Box::new(ProtoError::TruncatedBuffer {
                    offset: peek.position(),
                    needed: length,
                    remaining: peek.remaining(),
                }),
            });
        }
        buf.skip(HEADER_SIZE)?;
        Ok(PacketHeader {
            message_id,
            length,
            offset,
        })
    }

    /// Decode the body following `header`.
    ///
    /// On return the buffer has moved past the declared body, whatever the
    /// outcome, so the next header can be read.
    pub fn dispatch_body(
        &self,
        header: PacketHeader,
        buf: &mut PacketBuffer,
    ) -> Result<DispatchOutcome, ProtoError> {
        let PacketHeader {
            message_id,
            length,
            offset,
        } = header;
        let wrap = |source: ProtoError| ProtoError::Packet {
            message_id,
            offset,
            source: Box::new(source),
        };

        let Some(registration) = self.registry.get(&message_id) else {
            buf.skip(length).map_err(wrap)?;
            debug!(
                "Skipping unregistered message {message_id} ({}) at offset {offset}, {length} bytes",
                message_name(message_id)
            );
            return Ok(DispatchOutcome::Skipped {
                message_id,
                offset,
                length,
            });
        };

        let mut body = buf.sub_buffer(length).map_err(wrap)?;
        let packet = (registration.decode)(&mut body, self.version)
            .and_then(|packet| body.expect_consumed().map(|()| packet))
            .map_err(|source| {
                if source.is_framing_mismatch() {
                    warn!(
                        "{} at offset {offset}: {source}",
                        registration.name
                    );
                }
                wrap(source)
            })?;

        trace!(
            "Decoded {} ({length} bytes) at offset {offset}",
            registration.name
        );
        Ok(DispatchOutcome::Delivered { message_id, packet })
    }

    /// Read one message from `buf`.
    pub fn dispatch(&self, buf: &mut PacketBuffer) -> Result<DispatchOutcome, ProtoError> {
        let header = Self::read_header(buf)?;
        self.dispatch_body(header, buf)
    }

    /// Decode a buffer holding exactly one message. Trailing bytes are a
    /// framing error.
    pub fn dispatch_bytes(&self, data: impl Into<Bytes>) -> Result<DispatchOutcome, ProtoError> {
        let mut buf = PacketBuffer::new(data);
        let outcome = self.dispatch(&mut buf)?;
        buf.expect_consumed().map_err(|source| ProtoError::Packet {
            message_id: outcome.message_id(),
            offset: 0,
            source: Box::new(source),
        })?;
        Ok(outcome)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Version::LATEST)
    }
}
