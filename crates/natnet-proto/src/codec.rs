//! The field-group decoding contract.

use crate::buffer::PacketBuffer;
use crate::error::ProtoError;
use crate::version::Version;

/// Decode a field-group from a buffer at a negotiated protocol version.
///
/// Implementations consume exactly the bytes of their field-group, read no
/// field introduced after `version`, and leave such fields as `None`.
pub trait ProtoDecode: Sized {
    /// Field-group name used in error context.
    const NAME: &'static str;

    fn proto_decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError>;

    /// Decode, tagging any failure with [`Self::NAME`] and the offset at
    /// which it happened.
    fn decode(buf: &mut PacketBuffer, version: Version) -> Result<Self, ProtoError> {
        Self::proto_decode(buf, version).map_err(|source| ProtoError::Component {
            component: Self::NAME,
            offset: buf.position(),
            source: Box::new(source),
        })
    }
}

/// Read a count-prefixed list of field-groups.
pub fn read_list<T: ProtoDecode>(
    buf: &mut PacketBuffer,
    version: Version,
) -> Result<Vec<T>, ProtoError> {
    let count = buf.read_count()?;
    buf.read_components(count, version)
}

/// Read a count-prefixed list of NUL-terminated names.
pub fn read_names(buf: &mut PacketBuffer, count: usize) -> Result<Vec<String>, ProtoError> {
    let mut names = Vec::with_capacity(count.min(buf.remaining()));
    for _ in 0..count {
        names.push(buf.read_cstring()?);
    }
    Ok(names)
}
