//! Analog samples from force plates (2.9+) and other devices (2.11+).

use serde::Serialize;

use crate::buffer::PacketBuffer;
use crate::codec::ProtoDecode;
use crate::error::ProtoError;
use crate::version::Version;

/// One force plate or device: per channel, the samples taken since the
/// previous mocap frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalogData {
    pub id: i32,
    pub channels: Vec<Vec<f32>>,
}

impl ProtoDecode for AnalogData {
    const NAME: &'static str = "AnalogData";

    fn proto_decode(buf: &mut PacketBuffer, _version: Version) -> Result<Self, ProtoError> {
        let id = buf.read_i32()?;
        let channel_count = buf.read_count()?;
        let mut channels = Vec::with_capacity(channel_count.min(buf.remaining()));
        for _ in 0..channel_count {
            let frame_count = buf.read_count()?;
            let mut samples = Vec::with_capacity(frame_count.min(buf.remaining() / 4));
            for _ in 0..frame_count {
                samples.push(buf.read_f32()?);
            }
            channels.push(samples);
        }
        Ok(Self { id, channels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packets::fixtures;

    #[test]
    fn decode() {
        let raw = fixtures::analog(4, &[&[1.0, 2.0], &[3.0]]);
        let mut buf = PacketBuffer::new(raw.freeze());
        let data = AnalogData::decode(&mut buf, Version::LATEST).unwrap();
        assert_eq!(data.id, 4);
        assert_eq!(data.channels, vec![vec![1.0, 2.0], vec![3.0]]);
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn hostile_count_fails_cleanly() {
        let mut raw = fixtures::analog(4, &[]);
        raw.truncate(4);
        raw.extend_from_slice(&i32::MAX.to_le_bytes());
        let mut buf = PacketBuffer::new(raw.freeze());
        assert!(AnalogData::decode(&mut buf, Version::LATEST)
            .unwrap_err()
            .is_truncated());
    }
}
