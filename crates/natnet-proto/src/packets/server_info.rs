//! ServerInfo (0x01) — Server → Client, reply to Connect.

use serde::Serialize;

use crate::buffer::PacketBuffer;
use crate::codec::ProtoDecode;
use crate::error::ProtoError;
use crate::version::Version;

/// Width of the NUL-padded application name.
pub const APPLICATION_NAME_LENGTH: usize = 256;

/// First protocol version that sends the high-resolution clock frequency.
pub const CLOCK_FREQUENCY_SINCE: Version = Version::major(4);

/// Identity and versions of the streaming server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    pub application_name: String,
    pub server_version: Version,
    /// Protocol version the server advertises. Distinct from the negotiated
    /// version used to gate decoding.
    pub nat_net_protocol_version: Version,
    /// Ticks per second of the server's high-resolution clock.
    pub high_res_clock_frequency: Option<u64>,
}

impl ServerInfo {
    /// Version both sides can speak: the older of the server's advertised
    /// protocol and the newest one the client supports.
    pub fn negotiate(&self, client_max: Version) -> Version {
        self.nat_net_protocol_version.min(client_max)
    }
}

impl ProtoDecode for ServerInfo {
    const NAME: &'static str = "ServerInfo";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        let application_name = buf
            .read_string(APPLICATION_NAME_LENGTH, true)
            .map_err(|e| e.in_field("application_name"))?;
        let server_version = Version::read_quad(buf)?;
        let nat_net_protocol_version = Version::read_quad(buf)?;
        // Present only when the server speaks 4.0+ and the session was
        // negotiated at 4.0+.
        let high_res_clock_frequency =
            if nat_net_protocol_version.min(version) >= CLOCK_FREQUENCY_SINCE {
                Some(buf.read_u64()?)
            } else {
                None
            };
        Ok(Self {
            application_name,
            server_version,
            nat_net_protocol_version,
            high_res_clock_frequency,
        })
    }
}
