//! Skeleton poses within a frame (2.1+).

use serde::Serialize;

use crate::buffer::PacketBuffer;
use crate::codec::{read_list, ProtoDecode};
use crate::error::ProtoError;
use crate::packets::rigid_body::RigidBodyData;
use crate::version::Version;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkeletonData {
    pub id: i32,
    pub rigid_bodies: Vec<RigidBodyData>,
}

impl ProtoDecode for SkeletonData {
    const NAME: &'static str = "SkeletonData";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        let id = buf.read_i32()?;
        let rigid_bodies = read_list(buf, version)?;
        Ok(Self { id, rigid_bodies })
    }
}
