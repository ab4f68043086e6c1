//! NatNet message definitions.

pub mod analog;
pub mod asset;
pub mod data_descriptions;
pub mod descriptions;
pub mod frame_of_data;
pub mod frame_suffix;
pub mod keep_alive;
pub mod labeled_marker;
pub mod marker_set;
pub mod message_string;
pub mod response;
pub mod rigid_body;
pub mod server_info;
pub mod skeleton;

#[cfg(test)]
pub(crate) mod fixtures;

pub use analog::AnalogData;
pub use asset::{AssetData, AssetMarker, AssetRigidBody};
pub use data_descriptions::{DataDescription, DataDescriptions};
pub use descriptions::{
    CameraDescription, DeviceDescription, ForcePlateDescription, MarkerSetDescription,
    RigidBodyDescription, RigidBodyMarkerDescription, SkeletonDescription,
};
pub use frame_of_data::FrameOfMocapData;
pub use frame_suffix::{FrameFlags, FrameStamps, FrameSuffix, PrecisionTimestamp};
pub use keep_alive::{KeepAlive, UnrecognizedRequest};
pub use labeled_marker::{LabeledMarker, MarkerFlags};
pub use marker_set::MarkerSetData;
pub use message_string::MessageString;
pub use response::Response;
pub use rigid_body::{LegacyMarker, RigidBodyData};
pub use server_info::ServerInfo;
pub use skeleton::SkeletonData;

use serde::Serialize;

/// NatNet message IDs.
pub mod id {
    pub const CONNECT: u16 = 0;
    pub const SERVER_INFO: u16 = 1;
    pub const REQUEST: u16 = 2;
    pub const RESPONSE: u16 = 3;
    pub const REQUEST_MODEL_DEF: u16 = 4;
    pub const MODEL_DEF: u16 = 5;
    pub const REQUEST_FRAME_OF_DATA: u16 = 6;
    pub const FRAME_OF_DATA: u16 = 7;
    pub const MESSAGE_STRING: u16 = 8;
    pub const DISCONNECT: u16 = 9;
    pub const KEEP_ALIVE: u16 = 10;
    pub const UNRECOGNIZED_REQUEST: u16 = 100;
}

/// Size of the message header: `u16` id followed by `u16` body length.
pub const HEADER_SIZE: usize = 4;

/// A decoded server-to-client message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "body")]
pub enum Packet {
    ServerInfo(ServerInfo),
    Response(Response),
    DataDescriptions(DataDescriptions),
    FrameOfMocapData(Box<FrameOfMocapData>),
    MessageString(MessageString),
    KeepAlive(KeepAlive),
    UnrecognizedRequest(UnrecognizedRequest),
}

impl Packet {
    pub fn message_id(&self) -> u16 {
        match self {
            Self::ServerInfo(_) => id::SERVER_INFO,
            Self::Response(_) => id::RESPONSE,
            Self::DataDescriptions(_) => id::MODEL_DEF,
            Self::FrameOfMocapData(_) => id::FRAME_OF_DATA,
            Self::MessageString(_) => id::MESSAGE_STRING,
            Self::KeepAlive(_) => id::KEEP_ALIVE,
            Self::UnrecognizedRequest(_) => id::UNRECOGNIZED_REQUEST,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ServerInfo(_) => "ServerInfo",
            Self::Response(_) => "Response",
            Self::DataDescriptions(_) => "DataDescriptions",
            Self::FrameOfMocapData(_) => "FrameOfMocapData",
            Self::MessageString(_) => "MessageString",
            Self::KeepAlive(_) => "KeepAlive",
            Self::UnrecognizedRequest(_) => "UnrecognizedRequest",
        }
    }
}

macro_rules! impl_from_packet {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Packet {
                fn from(packet: $variant) -> Self {
                    Self::$variant(packet.into())
                }
            }
        )*
    };
}

impl_from_packet!(
    ServerInfo,
    Response,
    DataDescriptions,
    FrameOfMocapData,
    MessageString,
    KeepAlive,
    UnrecognizedRequest,
);

/// Name of a message ID, for logging. Covers client-to-server messages too.
pub fn message_name(message_id: u16) -> &'static str {
    match message_id {
        id::CONNECT => "Connect",
        id::SERVER_INFO => "ServerInfo",
        id::REQUEST => "Request",
        id::RESPONSE => "Response",
        id::REQUEST_MODEL_DEF => "RequestModelDef",
        id::MODEL_DEF => "DataDescriptions",
        id::REQUEST_FRAME_OF_DATA => "RequestFrameOfData",
        id::FRAME_OF_DATA => "FrameOfMocapData",
        id::MESSAGE_STRING => "MessageString",
        id::DISCONNECT => "Disconnect",
        id::KEEP_ALIVE => "KeepAlive",
        id::UNRECOGNIZED_REQUEST => "UnrecognizedRequest",
        _ => "Unknown",
    }
}
