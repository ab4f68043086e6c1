//! NatNet protocol versions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::buffer::PacketBuffer;
use crate::error::ProtoError;

/// A `major.minor.build.revision` version.
///
/// Missing trailing components are zero, so `Version::major(4)` equals
/// `Version::new(4, 0, 0, 0)`. Ordering compares components left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version([u32; 4]);

impl Version {
    pub const UNKNOWN: Self = Self::new(0, 0, 0, 0);

    /// Newest wire layout this crate understands.
    pub const LATEST: Self = Self::new(4, 1, 0, 0);

    pub const fn new(major: u32, minor: u32, build: u32, revision: u32) -> Self {
        Self([major, minor, build, revision])
    }

    pub const fn major(major: u32) -> Self {
        Self::new(major, 0, 0, 0)
    }

    pub const fn major_minor(major: u32, minor: u32) -> Self {
        Self::new(major, minor, 0, 0)
    }

    /// Read a version quad: four unsigned bytes.
    pub fn read_quad(buf: &mut PacketBuffer) -> Result<Self, ProtoError> {
        Ok(Self::from(buf.read_array::<4>()?))
    }
}

impl From<[u8; 4]> for Version {
    fn from(quad: [u8; 4]) -> Self {
        Self::new(
            u32::from(quad[0]),
            u32::from(quad[1]),
            u32::from(quad[2]),
            u32::from(quad[3]),
        )
    }
}

impl TryFrom<&[u32]> for Version {
    type Error = ProtoError;

    fn try_from(components: &[u32]) -> Result<Self, Self::Error> {
        if components.is_empty() || components.len() > 4 {
            return Err(ProtoError::InvalidVersion(format!(
                "expected 1 to 4 components, got {}",
                components.len()
            )));
        }
        let mut out = [0u32; 4];
        out[..components.len()].copy_from_slice(components);
        Ok(Self(out))
    }
}

impl FromStr for Version {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = s
            .trim()
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ProtoError::InvalidVersion(s.to_string()))?;
        Self::try_from(components.as_slice()).map_err(|_| ProtoError::InvalidVersion(s.to_string()))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [major, minor, build, revision] = self.0;
        write!(f, "{major}.{minor}.{build}.{revision}")
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
