//! Bounds-checked, position-tracking reader over a received packet.

use bytes::{Buf, Bytes};

use crate::codec::ProtoDecode;
use crate::error::ProtoError;
use crate::version::Version;

/// Longest name NatNet servers send in a NUL-terminated string field.
pub const MAX_NAME_LENGTH: usize = 256;

/// Little-endian reader over a complete packet.
///
/// Offsets in errors are absolute: a buffer created with [`sub_buffer`]
/// reports positions relative to the origin of the outermost buffer, so
/// errors from nested field-groups still point into the original packet.
///
/// A read that fails leaves the position where it was.
///
/// [`sub_buffer`]: PacketBuffer::sub_buffer
#[derive(Debug, Clone)]
pub struct PacketBuffer {
    data: Bytes,
    position: usize,
    base: usize,
}

impl PacketBuffer {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            position: 0,
            base: 0,
        }
    }

    /// Absolute offset of the next byte to be read.
    pub fn position(&self) -> usize {
        self.base + self.position
    }

    /// Number of bytes consumed from this buffer (not counting `base`).
    pub fn consumed(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    fn ensure(&self, needed: usize) -> Result<(), ProtoError> {
        if self.remaining() < needed {
            return Err(ProtoError::TruncatedBuffer {
                offset: self.position(),
                needed,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Bounds-checked view of the next `needed` bytes. The position moves
    /// only on success.
    fn take(&mut self, needed: usize) -> Result<&[u8], ProtoError> {
        self.ensure(needed)?;
        let start = self.position;
        self.position += needed;
        Ok(&self.data[start..start + needed])
    }

    pub fn read_u8(&mut self) -> Result<u8, ProtoError> {
        Ok(self.take(1)?.get_u8())
    }

    pub fn read_u16(&mut self) -> Result<u16, ProtoError> {
        Ok(self.take(2)?.get_u16_le())
    }

    pub fn read_u32(&mut self) -> Result<u32, ProtoError> {
        Ok(self.take(4)?.get_u32_le())
    }

    pub fn read_u64(&mut self) -> Result<u64, ProtoError> {
        Ok(self.take(8)?.get_u64_le())
    }

    pub fn read_i8(&mut self) -> Result<i8, ProtoError> {
        Ok(self.take(1)?.get_i8())
    }

    pub fn read_i16(&mut self) -> Result<i16, ProtoError> {
        Ok(self.take(2)?.get_i16_le())
    }

    pub fn read_i32(&mut self) -> Result<i32, ProtoError> {
        Ok(self.take(4)?.get_i32_le())
    }

    pub fn read_i64(&mut self) -> Result<i64, ProtoError> {
        Ok(self.take(8)?.get_i64_le())
    }

    pub fn read_f32(&mut self) -> Result<f32, ProtoError> {
        Ok(self.take(4)?.get_f32_le())
    }

    pub fn read_f64(&mut self) -> Result<f64, ProtoError> {
        Ok(self.take(8)?.get_f64_le())
    }

    /// Read `N` raw bytes in wire order.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ProtoError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read `N` consecutive little-endian `f32` values.
    pub fn read_f32_array<const N: usize>(&mut self) -> Result<[f32; N], ProtoError> {
        let mut chunk = self.take(N * 4)?;
        let mut out = [0f32; N];
        for value in &mut out {
            *value = chunk.get_f32_le();
        }
        Ok(out)
    }

    /// Read an `i32` element count. Negative counts are rejected.
    pub fn read_count(&mut self) -> Result<usize, ProtoError> {
        let offset = self.position();
        let count = self.read_i32()?;
        usize::try_from(count).map_err(|_| ProtoError::InvalidData {
            offset,
            reason: format!("negative element count {count}"),
        })
    }

    /// Read a text field.
    ///
    /// With `static_length` the field occupies exactly `max_length` bytes and
    /// the text ends at the first NUL (or at the end of the region). Without
    /// it, at most `max_length` bytes are scanned for a NUL terminator and the
    /// position moves just past it.
    pub fn read_string(
        &mut self,
        max_length: usize,
        static_length: bool,
    ) -> Result<String, ProtoError> {
        let offset = self.position();
        let start = self.position;
        if static_length {
            self.ensure(max_length)?;
            let region = &self.data[start..start + max_length];
            let end = region.iter().position(|&b| b == 0).unwrap_or(max_length);
            let text = decode_text(&region[..end], offset)?;
            self.position += max_length;
            return Ok(text);
        }

        let window = max_length.min(self.remaining());
        let region = &self.data[start..start + window];
        match region.iter().position(|&b| b == 0) {
            Some(end) => {
                let text = decode_text(&region[..end], offset)?;
                self.position += end + 1;
                Ok(text)
            }
            None if window < max_length => Err(ProtoError::TruncatedBuffer {
                offset,
                needed: window + 1,
                remaining: window,
            }),
            None => Err(ProtoError::UnterminatedString { offset, max_length }),
        }
    }

    /// NUL-terminated name, bounded by [`MAX_NAME_LENGTH`].
    pub fn read_cstring(&mut self) -> Result<String, ProtoError> {
        self.read_string(MAX_NAME_LENGTH, false)
    }

    /// Advance past `length` bytes without decoding them.
    pub fn skip(&mut self, length: usize) -> Result<(), ProtoError> {
        self.ensure(length)?;
        self.position += length;
        Ok(())
    }

    /// Fail with `FramingMismatch` unless every byte has been read.
    pub fn expect_consumed(&self) -> Result<(), ProtoError> {
        if self.remaining() != 0 {
            return Err(ProtoError::FramingMismatch {
                declared: self.len(),
                consumed: self.consumed(),
            });
        }
        Ok(())
    }

    /// Split off the next `length` bytes as an independent buffer and move
    /// this buffer past them.
    pub fn sub_buffer(&mut self, length: usize) -> Result<PacketBuffer, ProtoError> {
        self.ensure(length)?;
        let base = self.position();
        let data = self.data.slice(self.position..self.position + length);
        self.position += length;
        Ok(PacketBuffer {
            data,
            position: 0,
            base,
        })
    }

    /// Decode a nested field-group at the current position.
    pub fn read_component<T: ProtoDecode>(&mut self, version: Version) -> Result<T, ProtoError> {
        T::decode(self, version)
    }

    /// Decode `count` consecutive field-groups.
    pub fn read_components<T: ProtoDecode>(
        &mut self,
        count: usize,
        version: Version,
    ) -> Result<Vec<T>, ProtoError> {
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(T::decode(self, version)?);
        }
        Ok(items)
    }
}

fn decode_text(bytes: &[u8], offset: usize) -> Result<String, ProtoError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| ProtoError::InvalidEncoding { offset })
}

impl From<Bytes> for PacketBuffer {
    fn from(data: Bytes) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};

    #[test]
    fn scalars_are_little_endian() {
        let mut raw = BytesMut::new();
        raw.put_u8(0xAB);
        raw.put_u16_le(0x1234);
        raw.put_u32_le(0xDEAD_BEEF);
        raw.put_u64_le(1_000_000);
        raw.put_i32_le(-7);
        raw.put_f32_le(1.5);
        raw.put_f64_le(-2.25);
        let mut buf = PacketBuffer::new(raw.freeze());

        assert_eq!(buf.read_u8().unwrap(), 0xAB);
        assert_eq!(buf.read_u16().unwrap(), 0x1234);
        assert_eq!(buf.read_u32().unwrap(), 0xDEAD_BEEF);
        assert_eq!(buf.read_u64().unwrap(), 1_000_000);
        assert_eq!(buf.read_i32().unwrap(), -7);
        assert_eq!(buf.read_f32().unwrap(), 1.5);
        assert_eq!(buf.read_f64().unwrap(), -2.25);
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn truncated_read_fails_without_advancing() {
        let mut buf = PacketBuffer::new([1u8, 2, 3].to_vec());
        let err = buf.read_u32().unwrap_err();
        assert_eq!(
            err,
            ProtoError::TruncatedBuffer {
                offset: 0,
                needed: 4,
                remaining: 3
            }
        );
        assert_eq!(buf.position(), 0);
        assert_eq!(buf.read_u16().unwrap(), 0x0201);
        assert!(buf.read_u64().unwrap_err().is_truncated());
        assert_eq!(buf.position(), 2);
    }

    #[test]
    fn every_short_read_is_an_error() {
        for len in 0..8 {
            let mut buf = PacketBuffer::new(vec![0xFFu8; len]);
            assert_eq!(buf.read_u64().is_err(), len < 8);
            assert_eq!(buf.read_i64().is_err(), len < 8);
            assert_eq!(buf.read_f64().is_err(), len < 8);
            assert_eq!(buf.read_u32().is_err(), len < 4);
            assert_eq!(buf.read_f32_array::<2>().is_err(), len < 8);
            assert_eq!(buf.position(), 0);
        }
        let mut buf = PacketBuffer::new(vec![1u8, 2]);
        assert!(buf.read_u32().unwrap_err().is_truncated());
        assert!(buf.read_i32().unwrap_err().is_truncated());
        assert!(buf.read_f32().unwrap_err().is_truncated());
        assert_eq!(buf.read_i16().unwrap(), 0x0201);
        assert!(buf.read_u8().is_err());
        assert!(buf.read_i8().is_err());
    }

    #[test]
    fn batch_read_keeps_wire_order() {
        let mut buf = PacketBuffer::new([4u8, 1, 0, 0, 9].to_vec());
        assert_eq!(buf.read_array::<4>().unwrap(), [4, 1, 0, 0]);
        assert_eq!(buf.remaining(), 1);
        assert!(buf.read_array::<2>().is_err());
    }

    #[test]
    fn f32_array() {
        let mut raw = BytesMut::new();
        for v in [1.0f32, 2.0, 3.0] {
            raw.put_f32_le(v);
        }
        let mut buf = PacketBuffer::new(raw.freeze());
        assert_eq!(buf.read_f32_array::<3>().unwrap(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn static_string_advances_full_width() {
        let mut raw = vec![0u8; 256];
        raw[..10].copy_from_slice(b"MotionTest");
        let mut buf = PacketBuffer::new(raw);
        assert_eq!(buf.read_string(256, true).unwrap(), "MotionTest");
        assert_eq!(buf.position(), 256);
    }

    #[test]
    fn static_string_without_nul_uses_whole_region() {
        let mut buf = PacketBuffer::new(b"abcdXY".to_vec());
        assert_eq!(buf.read_string(4, true).unwrap(), "abcd");
        assert_eq!(buf.remaining(), 2);
    }

    #[test]
    fn static_string_truncated() {
        let mut buf = PacketBuffer::new(vec![0u8; 100]);
        assert!(buf.read_string(256, true).unwrap_err().is_truncated());
        assert_eq!(buf.position(), 0);
    }

    #[test]
    fn dynamic_string_stops_after_terminator() {
        let mut buf = PacketBuffer::new(b"Hip\0Knee\0".to_vec());
        assert_eq!(buf.read_cstring().unwrap(), "Hip");
        assert_eq!(buf.position(), 4);
        assert_eq!(buf.read_cstring().unwrap(), "Knee");
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn dynamic_string_empty() {
        let mut buf = PacketBuffer::new(b"\0".to_vec());
        assert_eq!(buf.read_cstring().unwrap(), "");
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn dynamic_string_missing_terminator_at_end_is_truncation() {
        let mut buf = PacketBuffer::new(b"abc".to_vec());
        assert!(buf.read_cstring().unwrap_err().is_truncated());
        assert_eq!(buf.position(), 0);
    }

    #[test]
    fn dynamic_string_too_long() {
        let mut buf = PacketBuffer::new(b"abcdef\0".to_vec());
        assert_eq!(
            buf.read_string(4, false).unwrap_err(),
            ProtoError::UnterminatedString {
                offset: 0,
                max_length: 4
            }
        );
    }

    #[test]
    fn invalid_utf8() {
        let mut buf = PacketBuffer::new([0x61u8, 0xFF, 0xFE, 0x00].to_vec());
        assert_eq!(
            buf.read_cstring().unwrap_err(),
            ProtoError::InvalidEncoding { offset: 0 }
        );
        let mut buf = PacketBuffer::new([0xC3u8, 0x28, 0x00, 0x00].to_vec());
        assert!(matches!(
            buf.read_string(4, true),
            Err(ProtoError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn negative_count_rejected() {
        let mut buf = PacketBuffer::new((-1i32).to_le_bytes().to_vec());
        assert!(matches!(
            buf.read_count(),
            Err(ProtoError::InvalidData { offset: 0, .. })
        ));
    }

    #[test]
    fn sub_buffer_is_bounded_and_reports_absolute_offsets() {
        let mut buf = PacketBuffer::new([0u8, 0, 1, 2, 3, 4, 5].to_vec());
        buf.skip(2).unwrap();
        let mut child = buf.sub_buffer(3).unwrap();
        assert_eq!(buf.position(), 5);
        assert_eq!(child.position(), 2);
        assert_eq!(child.read_u16().unwrap(), 0x0201);
        let err = child.read_u16().unwrap_err();
        assert_eq!(
            err,
            ProtoError::TruncatedBuffer {
                offset: 4,
                needed: 2,
                remaining: 1
            }
        );
        assert_eq!(child.consumed(), 2);
        assert_eq!(buf.read_u16().unwrap(), 0x0504);
    }

    #[test]
    fn expect_consumed_reports_shortfall() {
        let mut buf = PacketBuffer::new(vec![0u8; 6]);
        buf.read_u32().unwrap();
        assert_eq!(
            buf.expect_consumed().unwrap_err(),
            ProtoError::FramingMismatch {
                declared: 6,
                consumed: 4
            }
        );
        buf.read_u16().unwrap();
        assert!(buf.expect_consumed().is_ok());
    }

    #[test]
    fn skip_is_bounds_checked() {
        let mut buf = PacketBuffer::new([0u8; 4].to_vec());
        assert!(buf.skip(5).is_err());
        buf.skip(4).unwrap();
        assert_eq!(buf.remaining(), 0);
    }
}
