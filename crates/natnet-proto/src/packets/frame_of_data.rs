//! FrameOfMocapData (0x07) — Server → Client, one per camera frame.

use serde::Serialize;

use crate::buffer::PacketBuffer;
use crate::codec::ProtoDecode;
use crate::error::ProtoError;
use crate::packets::analog::AnalogData;
use crate::packets::asset::AssetData;
use crate::packets::frame_suffix::FrameSuffix;
use crate::packets::labeled_marker::LabeledMarker;
use crate::packets::marker_set::MarkerSetData;
use crate::packets::rigid_body::RigidBodyData;
use crate::packets::skeleton::SkeletonData;
use crate::types::Vec3;
use crate::version::Version;

pub const SKELETONS_SINCE: Version = Version::major_minor(2, 1);
pub const LABELED_MARKERS_SINCE: Version = Version::major_minor(2, 3);
pub const FORCE_PLATES_SINCE: Version = Version::major_minor(2, 9);
pub const DEVICES_SINCE: Version = Version::major_minor(2, 11);
pub const ASSETS_SINCE: Version = Version::major_minor(4, 1);
/// From 4.1 every section carries its byte size after the element count.
pub const SECTION_SIZE_SINCE: Version = Version::major_minor(4, 1);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOfMocapData {
    pub frame_number: i32,
    pub marker_sets: Vec<MarkerSetData>,
    /// Markers not belonging to any marker set.
    pub unlabeled_markers: Vec<Vec3>,
    pub rigid_bodies: Vec<RigidBodyData>,
    pub skeletons: Option<Vec<SkeletonData>>,
    pub assets: Option<Vec<AssetData>>,
    pub labeled_markers: Option<Vec<LabeledMarker>>,
    pub force_plates: Option<Vec<AnalogData>>,
    pub devices: Option<Vec<AnalogData>>,
    pub suffix: FrameSuffix,
    /// Trailing end-of-data tag, counted in the body length. Servers send 0.
    pub end_of_data: i32,
}

impl ProtoDecode for FrameOfMocapData {
    const NAME: &'static str = "FrameOfMocapData";

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        let frame_number = buf.read_i32()?;
        let marker_sets = read_section(buf, version)?;
        let unlabeled_markers = read_section(buf, version)?;
        let rigid_bodies = read_section(buf, version)?;
        let skeletons = read_section_since(buf, version, SKELETONS_SINCE)?;
        let assets = read_section_since(buf, version, ASSETS_SINCE)?;
        let labeled_markers = read_section_since(buf, version, LABELED_MARKERS_SINCE)?;
        let force_plates = read_section_since(buf, version, FORCE_PLATES_SINCE)?;
        let devices = read_section_since(buf, version, DEVICES_SINCE)?;
        let suffix = buf.read_component(version)?;
        let end_of_data = buf.read_i32().map_err(|e| e.in_field("end_of_data"))?;

        Ok(Self {
            frame_number,
            marker_sets,
            unlabeled_markers,
            rigid_bodies,
            skeletons,
            assets,
            labeled_markers,
            force_plates,
            devices,
            suffix,
            end_of_data,
        })
    }
}

/// Element count, the section size from 4.1 on, then the elements. A sized
/// section must be consumed exactly.
fn read_section<T: ProtoDecode>(
    buf: &mut PacketBuffer,
    version: Version,
) -> Result<Vec<T>, ProtoError> {
    let count = buf.read_count()?;
    if version < SECTION_SIZE_SINCE {
        return buf.read_components(count, version);
    }
    let size = buf.read_count()?;
    let mut section = buf.sub_buffer(size)?;
    let items = section.read_components(count, version)?;
    section.expect_consumed()?;
    Ok(items)
}

fn read_section_since<T: ProtoDecode>(
    buf: &mut PacketBuffer,
    version: Version,
    since: Version,
) -> Result<Option<Vec<T>>, ProtoError> {
    if version >= since {
        read_section(buf, version).map(Some)
    } else {
        Ok(None)
    }
}
