//! Marker-set positions within a frame.

use serde::Serialize;

use crate::buffer::PacketBuffer;
use crate::codec::{read_list, ProtoDecode};
use crate::error::ProtoError;
use crate::types::Vec3;
use crate::version::Version;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSetData {
    pub name: String,
    pub markers: Vec<Vec3>,
}

impl ProtoDecode for MarkerSetData {
    const NAME: &'static str = "MarkerSetData";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        let name = buf.read_cstring().map_err(|e| e.in_field("name"))?;
        let markers = read_list(buf, version)?;
        Ok(Self { name, markers })
    }
}
