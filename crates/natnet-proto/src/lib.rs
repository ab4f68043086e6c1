//! Receive-side decoding of NatNet motion-capture streaming messages.
//!
//! Every message is a little-endian header (`u16` id, `u16` body length)
//! followed by a body whose layout depends on the protocol version both
//! sides negotiated. [`Dispatcher`] routes a body to its decoder and checks
//! that exactly the declared length was consumed; [`PacketStream`] walks a
//! sequence of messages and keeps going past bodies that fail to decode.

pub mod buffer;
pub mod codec;
pub mod dispatch;
pub mod error;
pub mod packets;
pub mod stream;
pub mod types;
pub mod version;

pub use buffer::PacketBuffer;
pub use codec::ProtoDecode;
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use error::ProtoError;
pub use packets::Packet;
pub use stream::PacketStream;
pub use version::Version;
