//! Model definitions carried by DataDescriptions.

use serde::Serialize;

use crate::buffer::PacketBuffer;
use crate::codec::{read_list, read_names, ProtoDecode};
use crate::error::ProtoError;
use crate::types::{Quaternion, Vec3};
use crate::version::Version;

pub const RIGID_BODY_NAME_SINCE: Version = Version::major(2);
pub const RIGID_BODY_MARKERS_SINCE: Version = Version::major(3);
pub const RIGID_BODY_MARKER_NAMES_SINCE: Version = Version::major(4);
pub const PLATE_TYPE_SINCE: Version = Version::major(3);

/// Side length of a force plate's calibration matrix.
pub const CALIBRATION_MATRIX_SIZE: usize = 12;

// ---------------------------------------------------------------------------
// Marker set
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerSetDescription {
    pub name: String,
    pub marker_names: Vec<String>,
}

impl ProtoDecode for MarkerSetDescription {
    const NAME: &'static str = "MarkerSetDescription";

    fn proto_decode(buf: &mut PacketBuffer, _version: Version) -> Result<Self, ProtoError> {
        let name = buf.read_cstring().map_err(|e| e.in_field("name"))?;
        let count = buf.read_count()?;
        let marker_names = read_names(buf, count).map_err(|e| e.in_field("marker_names"))?;
        Ok(Self { name, marker_names })
    }
}

// ---------------------------------------------------------------------------
// Rigid body
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RigidBodyDescription {
    pub name: Option<String>,
    pub id: i32,
    /// `-1` for bodies without a parent.
    pub parent_id: i32,
    /// Offset from the parent body.
    pub offset: Vec3,
    pub markers: Option<Vec<RigidBodyMarkerDescription>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RigidBodyMarkerDescription {
    pub position: Vec3,
    pub active_label: i32,
    pub name: Option<String>,
}

impl ProtoDecode for RigidBodyDescription {
    const NAME: &'static str = "RigidBodyDescription";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        let name = if version >= RIGID_BODY_NAME_SINCE {
            Some(buf.read_cstring().map_err(|e| e.in_field("name"))?)
        } else {
            None
        };
        let id = buf.read_i32()?;
        let parent_id = buf.read_i32()?;
        let offset = buf.read_component(version)?;
        let markers = if version >= RIGID_BODY_MARKERS_SINCE {
            Some(read_marker_descriptions(buf, version)?)
        } else {
            None
        };
        Ok(Self {
            name,
            id,
            parent_id,
            offset,
            markers,
        })
    }
}

// Column-wise on the wire: all positions, all labels, then (4.0+) all names.
fn read_marker_descriptions(
    buf: &mut PacketBuffer,
    version: Version,
) -> Result<Vec<RigidBodyMarkerDescription>, ProtoError> {
    let count = buf.read_count()?;
    let positions: Vec<Vec3> = buf.read_components(count, version)?;
    let mut markers = Vec::with_capacity(positions.len());
    for position in positions {
        markers.push(RigidBodyMarkerDescription {
            position,
            active_label: 0,
            name: None,
        });
    }
    for marker in &mut markers {
        marker.active_label = buf.read_i32()?;
    }
    if version >= RIGID_BODY_MARKER_NAMES_SINCE {
        for marker in &mut markers {
            marker.name = Some(buf.read_cstring().map_err(|e| e.in_field("marker_name"))?);
        }
    }
    Ok(markers)
}

// ---------------------------------------------------------------------------
// Skeleton
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkeletonDescription {
    pub name: String,
    pub id: i32,
    pub rigid_bodies: Vec<RigidBodyDescription>,
}

impl ProtoDecode for SkeletonDescription {
    const NAME: &'static str = "SkeletonDescription";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        let name = buf.read_cstring().map_err(|e| e.in_field("name"))?;
        let id = buf.read_i32()?;
        let rigid_bodies = read_list(buf, version)?;
        Ok(Self {
            name,
            id,
            rigid_bodies,
        })
    }
}

// ---------------------------------------------------------------------------
// Force plate
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForcePlateDescription {
    pub id: i32,
    pub serial_number: String,
    pub width: f32,
    pub length: f32,
    pub origin: Vec3,
    pub calibration_matrix: [[f32; CALIBRATION_MATRIX_SIZE]; CALIBRATION_MATRIX_SIZE],
    pub corners: [Vec3; 4],
    pub plate_type: Option<i32>,
    pub channel_data_type: Option<i32>,
    pub channel_names: Vec<String>,
}

impl ProtoDecode for ForcePlateDescription {
    const NAME: &'static str = "ForcePlateDescription";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        let id = buf.read_i32()?;
        let serial_number = buf
            .read_cstring()
            .map_err(|e| e.in_field("serial_number"))?;
        let width = buf.read_f32()?;
        let length = buf.read_f32()?;
        let origin = buf.read_component(version)?;

        let mut calibration_matrix = [[0f32; CALIBRATION_MATRIX_SIZE]; CALIBRATION_MATRIX_SIZE];
        for row in &mut calibration_matrix {
            *row = buf.read_f32_array()?;
        }

        let mut corners = [Vec3::ZERO; 4];
        for corner in &mut corners {
            *corner = buf.read_component(version)?;
        }

        let (plate_type, channel_data_type) = if version >= PLATE_TYPE_SINCE {
            (Some(buf.read_i32()?), Some(buf.read_i32()?))
        } else {
            (None, None)
        };

        let channel_count = buf.read_count()?;
        let channel_names =
            read_names(buf, channel_count).map_err(|e| e.in_field("channel_names"))?;

        Ok(Self {
            id,
            serial_number,
            width,
            length,
            origin,
            calibration_matrix,
            corners,
            plate_type,
            channel_data_type,
            channel_names,
        })
    }
}

// ---------------------------------------------------------------------------
// Device
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceDescription {
    pub id: i32,
    pub name: String,
    pub serial_number: String,
    pub device_type: i32,
    pub channel_data_type: i32,
    pub channel_names: Vec<String>,
}

impl ProtoDecode for DeviceDescription {
    const NAME: &'static str = "DeviceDescription";

    fn proto_decode(buf: &mut PacketBuffer, _version: Version) -> Result<Self, ProtoError> {
        let id = buf.read_i32()?;
        let name = buf.read_cstring().map_err(|e| e.in_field("name"))?;
        let serial_number = buf
            .read_cstring()
            .map_err(|e| e.in_field("serial_number"))?;
        let device_type = buf.read_i32()?;
        let channel_data_type = buf.read_i32()?;
        let channel_count = buf.read_count()?;
        let channel_names =
            read_names(buf, channel_count).map_err(|e| e.in_field("channel_names"))?;
        Ok(Self {
            id,
            name,
            serial_number,
            device_type,
            channel_data_type,
            channel_names,
        })
    }
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraDescription {
    pub name: String,
    pub position: Vec3,
    pub orientation: Quaternion,
}

impl ProtoDecode for CameraDescription {
    const NAME: &'static str = "CameraDescription";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        Ok(Self {
            name: buf.read_cstring().map_err(|e| e.in_field("name"))?,
            position: buf.read_component(version)?,
            orientation: buf.read_component(version)?,
        })
    }
}
