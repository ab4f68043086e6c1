//! DataDescriptions (0x05) — Server → Client, reply to RequestModelDef.

use serde::Serialize;
use tracing::debug;

use crate::buffer::PacketBuffer;
use crate::codec::{read_list, ProtoDecode};
use crate::error::ProtoError;
use crate::packets::descriptions::{
    CameraDescription, DeviceDescription, ForcePlateDescription, MarkerSetDescription,
    RigidBodyDescription, SkeletonDescription,
};
use crate::version::Version;

/// From 4.1 each description is prefixed with its byte size, which lets
/// unknown kinds be skipped.
pub const DESCRIPTION_SIZE_SINCE: Version = Version::major_minor(4, 1);

/// Description kind tags.
pub mod kind {
    pub const MARKER_SET: i32 = 0;
    pub const RIGID_BODY: i32 = 1;
    pub const SKELETON: i32 = 2;
    pub const FORCE_PLATE: i32 = 3;
    pub const DEVICE: i32 = 4;
    pub const CAMERA: i32 = 5;
    /// Asset models (4.1+). Not decoded; kept as `DataDescription::Unknown`.
    pub const ASSET: i32 = 6;
}

/// The server's full model definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataDescriptions {
    pub descriptions: Vec<DataDescription>,
}

impl DataDescriptions {
    pub fn rigid_bodies(&self) -> impl Iterator<Item = &RigidBodyDescription> {
        self.descriptions.iter().filter_map(|d| match d {
            DataDescription::RigidBody(rb) => Some(rb),
            _ => None,
        })
    }

    pub fn skeletons(&self) -> impl Iterator<Item = &SkeletonDescription> {
        self.descriptions.iter().filter_map(|d| match d {
            DataDescription::Skeleton(s) => Some(s),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DataDescription {
    MarkerSet(MarkerSetDescription),
    RigidBody(RigidBodyDescription),
    Skeleton(SkeletonDescription),
    ForcePlate(ForcePlateDescription),
    Device(DeviceDescription),
    Camera(CameraDescription),
    /// A kind this crate does not know, skipped by its declared size.
    Unknown { kind: i32, length: usize },
}

impl ProtoDecode for DataDescriptions {
    const NAME: &'static str = "DataDescriptions";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        Ok(Self {
            descriptions: read_list(buf, version)?,
        })
    }
}

impl ProtoDecode for DataDescription {
    const NAME: &'static str = "DataDescription";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        let kind_offset = buf.position();
        let kind = buf.read_i32()?;

        if version < DESCRIPTION_SIZE_SINCE {
            return read_known(kind, buf, version)?.ok_or_else(|| ProtoError::InvalidData {
                offset: kind_offset,
                reason: format!("unknown data description kind {kind}"),
            });
        }

        let length = buf.read_count()?;
        let mut body = buf.sub_buffer(length)?;
        match read_known(kind, &mut body, version)? {
            Some(description) => {
                body.expect_consumed()?;
                Ok(description)
            }
            None => {
                debug!("Skipping unknown data description kind {kind} ({length} bytes)");
                Ok(Self::Unknown { kind, length })
            }
        }
    }
}

fn read_known(
    kind: i32,
    buf: &mut PacketBuffer,
    version: Version,
) -> Result<Option<DataDescription>, ProtoError> {
    let description = match kind {
        kind::MARKER_SET => DataDescription::MarkerSet(buf.read_component(version)?),
        kind::RIGID_BODY => DataDescription::RigidBody(buf.read_component(version)?),
        kind::SKELETON => DataDescription::Skeleton(buf.read_component(version)?),
        kind::FORCE_PLATE => DataDescription::ForcePlate(buf.read_component(version)?),
        kind::DEVICE => DataDescription::Device(buf.read_component(version)?),
        kind::CAMERA => DataDescription::Camera(buf.read_component(version)?),
        _ => return Ok(None),
    };
    Ok(Some(description))
}
