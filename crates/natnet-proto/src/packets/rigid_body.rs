//! Rigid-body poses within a frame.

use serde::Serialize;

use crate::buffer::PacketBuffer;
use crate::codec::ProtoDecode;
use crate::error::ProtoError;
use crate::types::{Quaternion, Vec3};
use crate::version::Version;

/// Per-body marker ids and sizes, sent alongside the legacy marker list.
pub const MARKER_DETAILS_SINCE: Version = Version::major(2);
/// From 3.0 the marker list lives in the model definitions instead.
pub const LEGACY_MARKERS_UNTIL: Version = Version::major(3);
pub const MEAN_ERROR_SINCE: Version = Version::major(2);
pub const TRACKING_PARAMS_SINCE: Version = Version::major_minor(2, 6);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RigidBodyData {
    pub id: i32,
    pub position: Vec3,
    pub orientation: Quaternion,
    /// Only sent by servers older than 3.0.
    pub legacy_markers: Option<Vec<LegacyMarker>>,
    /// Mean marker error in meters.
    pub mean_error: Option<f32>,
    pub tracking_valid: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegacyMarker {
    pub position: Vec3,
    pub id: Option<i32>,
    pub size: Option<f32>,
}

impl ProtoDecode for RigidBodyData {
    const NAME: &'static str = "RigidBodyData";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        let id = buf.read_i32()?;
        let position = buf.read_component(version)?;
        let orientation = buf.read_component(version)?;

        let legacy_markers = if version < LEGACY_MARKERS_UNTIL {
            Some(read_legacy_markers(buf, version)?)
        } else {
            None
        };

        let mean_error = if version >= MEAN_ERROR_SINCE {
            Some(buf.read_f32()?)
        } else {
            None
        };

        let tracking_valid = if version >= TRACKING_PARAMS_SINCE {
            Some(buf.read_i16()? & 0x01 != 0)
        } else {
            None
        };

        Ok(Self {
            id,
            position,
            orientation,
            legacy_markers,
            mean_error,
            tracking_valid,
        })
    }
}

// Positions, then (2.0+) all ids, then all sizes.
fn read_legacy_markers(
    buf: &mut PacketBuffer,
    version: Version,
) -> Result<Vec<LegacyMarker>, ProtoError> {
    let count = buf.read_count()?;
    let positions: Vec<Vec3> = buf.read_components(count, version)?;
    let mut markers: Vec<LegacyMarker> = positions
        .into_iter()
        .map(|position| LegacyMarker {
            position,
            id: None,
            size: None,
        })
        .collect();
    if version >= MARKER_DETAILS_SINCE {
        for marker in &mut markers {
            marker.id = Some(buf.read_i32()?);
        }
        for marker in &mut markers {
            marker.size = Some(buf.read_f32()?);
        }
    }
    Ok(markers)
}
