//! Labeled markers within a frame (2.3+).

use serde::Serialize;

use crate::buffer::PacketBuffer;
use crate::codec::ProtoDecode;
use crate::error::ProtoError;
use crate::types::Vec3;
use crate::version::Version;

pub const MARKER_PARAMS_SINCE: Version = Version::major_minor(2, 6);
pub const RESIDUAL_SINCE: Version = Version::major(3);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledMarker {
    /// Model id in the high 16 bits, marker id in the low 16 bits.
    pub id: i32,
    pub position: Vec3,
    pub size: f32,
    pub flags: Option<MarkerFlags>,
    /// Ray residual in meters.
    pub residual: Option<f32>,
}

impl LabeledMarker {
    pub fn model_id(&self) -> u16 {
        (self.id as u32 >> 16) as u16
    }

    pub fn marker_id(&self) -> u16 {
        (self.id as u32 & 0xFFFF) as u16
    }
}

/// Bits of the labeled-marker parameter word. The last three are only set
/// by 3.0+ servers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MarkerFlags {
    pub occluded: bool,
    pub point_cloud_solved: bool,
    pub model_solved: bool,
    pub has_model: bool,
    pub unlabeled: bool,
    pub active: bool,
}

impl MarkerFlags {
    pub fn from_bits(bits: i16) -> Self {
        Self {
            occluded: bits & 0x01 != 0,
            point_cloud_solved: bits & 0x02 != 0,
            model_solved: bits & 0x04 != 0,
            has_model: bits & 0x08 != 0,
            unlabeled: bits & 0x10 != 0,
            active: bits & 0x20 != 0,
        }
    }
}

impl ProtoDecode for LabeledMarker {
    const NAME: &'static str = "LabeledMarker";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        let id = buf.read_i32()?;
        let position = buf.read_component(version)?;
        let size = buf.read_f32()?;
        let flags = if version >= MARKER_PARAMS_SINCE {
            Some(MarkerFlags::from_bits(buf.read_i16()?))
        } else {
            None
        };
        let residual = if version >= RESIDUAL_SINCE {
            Some(buf.read_f32()?)
        } else {
            None
        };
        Ok(Self {
            id,
            position,
            size,
            flags,
            residual,
        })
    }
}
