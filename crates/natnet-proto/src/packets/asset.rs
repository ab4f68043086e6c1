//! Trained-markerset asset data within a frame (4.1+).

use serde::Serialize;

use crate::buffer::PacketBuffer;
use crate::codec::{read_list, ProtoDecode};
use crate::error::ProtoError;
use crate::types::{Quaternion, Vec3};
use crate::version::Version;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetData {
    pub id: i32,
    pub rigid_bodies: Vec<AssetRigidBody>,
    pub markers: Vec<AssetMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetRigidBody {
    pub id: i32,
    pub position: Vec3,
    pub orientation: Quaternion,
    pub mean_error: f32,
    pub params: i16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetMarker {
    pub id: i32,
    pub position: Vec3,
    pub size: f32,
    pub params: i16,
    pub residual: f32,
}

impl ProtoDecode for AssetData {
    const NAME: &'static str = "AssetData";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        let id = buf.read_i32()?;
        let rigid_bodies = read_list(buf, version)?;
        let markers = read_list(buf, version)?;
        Ok(Self {
            id,
            rigid_bodies,
            markers,
        })
    }
}

impl ProtoDecode for AssetRigidBody {
    const NAME: &'static str = "AssetRigidBody";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        Ok(Self {
            id: buf.read_i32()?,
            position: buf.read_component(version)?,
            orientation: buf.read_component(version)?,
            mean_error: buf.read_f32()?,
            params: buf.read_i16()?,
        })
    }
}

impl ProtoDecode for AssetMarker {
    const NAME: &'static str = "AssetMarker";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        Ok(Self {
            id: buf.read_i32()?,
            position: buf.read_component(version)?,
            size: buf.read_f32()?,
            params: buf.read_i16()?,
            residual: buf.read_f32()?,
        })
    }
}
