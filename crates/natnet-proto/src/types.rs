//! Geometric primitives shared by the field-groups.

use serde::Serialize;

use crate::buffer::PacketBuffer;
use crate::codec::ProtoDecode;
use crate::error::ProtoError;
use crate::version::Version;

// ---------------------------------------------------------------------------
// Vec3 (f32 x, y, z)
// ---------------------------------------------------------------------------

/// Position in meters, in the server's coordinate frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl ProtoDecode for Vec3 {
    const NAME: &'static str = "Vec3";

    fn proto_decode(buf: &mut PacketBuffer, _version: Version) -> Result<Self, ProtoError> {
        let [x, y, z] = buf.read_f32_array::<3>()?;
        Ok(Self { x, y, z })
    }
}

// ---------------------------------------------------------------------------
// Quaternion (f32 x, y, z, w)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };
}

impl ProtoDecode for Quaternion {
    const NAME: &'static str = "Quaternion";

    fn proto_decode(buf: &mut PacketBuffer, _version: Version) -> Result<Self, ProtoError> {
        let [x, y, z, w] = buf.read_f32_array::<4>()?;
        Ok(Self { x, y, z, w })
    }
}
