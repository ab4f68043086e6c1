//! Timing trailer of a frame.

use serde::Serialize;

use crate::buffer::PacketBuffer;
use crate::codec::ProtoDecode;
use crate::error::ProtoError;
use crate::version::Version;

pub const DOUBLE_TIMESTAMP_SINCE: Version = Version::major_minor(2, 7);
pub const FRAME_STAMPS_SINCE: Version = Version::major(3);
pub const PRECISION_TIMESTAMP_SINCE: Version = Version::major_minor(4, 1);
pub const FRAME_PARAMS_SINCE: Version = Version::major_minor(2, 6);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSuffix {
    pub timecode: u32,
    pub timecode_sub: u32,
    /// Seconds since the server started streaming. Sent as `f32` before 2.7.
    pub timestamp: f64,
    pub stamps: Option<FrameStamps>,
    pub precision_timestamp: Option<PrecisionTimestamp>,
    pub flags: Option<FrameFlags>,
}

/// High-resolution clock ticks; see `ServerInfo::high_res_clock_frequency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameStamps {
    pub camera_mid_exposure: u64,
    pub data_received: u64,
    pub transmit: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrecisionTimestamp {
    pub seconds: u32,
    pub fraction: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameFlags {
    pub is_recording: bool,
    pub tracked_models_changed: bool,
}

impl ProtoDecode for FrameSuffix {
    const NAME: &'static str = "FrameSuffix";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        let timecode = buf.read_u32()?;
        let timecode_sub = buf.read_u32()?;
        let timestamp = if version >= DOUBLE_TIMESTAMP_SINCE {
            buf.read_f64()?
        } else {
            f64::from(buf.read_f32()?)
        };

        let stamps = if version >= FRAME_STAMPS_SINCE {
            Some(FrameStamps {
                camera_mid_exposure: buf.read_u64()?,
                data_received: buf.read_u64()?,
                transmit: buf.read_u64()?,
            })
        } else {
            None
        };

        let precision_timestamp = if version >= PRECISION_TIMESTAMP_SINCE {
            Some(PrecisionTimestamp {
                seconds: buf.read_u32()?,
                fraction: buf.read_u32()?,
            })
        } else {
            None
        };

        let flags = if version >= FRAME_PARAMS_SINCE {
            let bits = buf.read_i16()?;
            Some(FrameFlags {
                is_recording: bits & 0x01 != 0,
                tracked_models_changed: bits & 0x02 != 0,
            })
        } else {
            None
        };

        Ok(Self {
            timecode,
            timecode_sub,
            timestamp,
            stamps,
            precision_timestamp,
            flags,
        })
    }
}
