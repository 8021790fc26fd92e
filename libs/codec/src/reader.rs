//! # Field Reader
//!
//! Bounds-checked extraction of fixed-width fields at explicit offsets.
//!
//! Every read is validated against the buffer length before any byte is
//! touched, so a short buffer is an `OutOfBounds` error rather than a panic.
//! Integers are read in **native byte order**: captures are assumed to come
//! from a producer with the same byte order as the host. No conversion is
//! attempted.

use crate::error::{ProtocolError, ProtocolResult};
use byteorder::{ByteOrder, NativeEndian};

#[inline]
fn field(bytes: &[u8], offset: usize, width: usize) -> ProtocolResult<&[u8]> {
    let end = offset
        .checked_add(width)
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| ProtocolError::out_of_bounds(offset, width, bytes.len()))?;
    Ok(&bytes[offset..end])
}

/// Read a native-endian `u32` at `offset`
#[inline]
pub fn read_u32(bytes: &[u8], offset: usize) -> ProtocolResult<u32> {
    field(bytes, offset, 4).map(NativeEndian::read_u32)
}

/// Read a native-endian `i32` at `offset`
#[inline]
pub fn read_i32(bytes: &[u8], offset: usize) -> ProtocolResult<i32> {
    field(bytes, offset, 4).map(NativeEndian::read_i32)
}

/// Read a native-endian `u64` at `offset`
#[inline]
pub fn read_u64(bytes: &[u8], offset: usize) -> ProtocolResult<u64> {
    field(bytes, offset, 8).map(NativeEndian::read_u64)
}

/// Copy an `N`-byte field at `offset`
#[inline]
pub fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> ProtocolResult<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(field(bytes, offset, N)?);
    Ok(out)
}

/// Borrow `len` bytes at `offset`
#[inline]
pub fn read_slice(bytes: &[u8], offset: usize, len: usize) -> ProtocolResult<&[u8]> {
    field(bytes, offset, len)
}

/// Sequential reader over a packed layout
///
/// Each call reads the next field and advances past it. A failed read leaves
/// the cursor where it was.
#[derive(Debug, Clone)]
pub struct FieldCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> FieldCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    pub fn u32(&mut self) -> ProtocolResult<u32> {
        let value = read_u32(self.bytes, self.offset)?;
        self.offset += 4;
        Ok(value)
    }

    pub fn i32(&mut self) -> ProtocolResult<i32> {
        let value = read_i32(self.bytes, self.offset)?;
        self.offset += 4;
        Ok(value)
    }

    pub fn u64(&mut self) -> ProtocolResult<u64> {
        let value = read_u64(self.bytes, self.offset)?;
        self.offset += 8;
        Ok(value)
    }

    pub fn array<const N: usize>(&mut self) -> ProtocolResult<[u8; N]> {
        let value = read_array::<N>(self.bytes, self.offset)?;
        self.offset += N;
        Ok(value)
    }

    pub fn take(&mut self, len: usize) -> ProtocolResult<&'a [u8]> {
        let value = read_slice(self.bytes, self.offset, len)?;
        self.offset += len;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u32_native_order() {
        let mut bytes = vec![0xFFu8; 2];
        bytes.extend_from_slice(&0x9000_0001u32.to_ne_bytes());
        assert_eq!(read_u32(&bytes, 2).unwrap(), 0x9000_0001);
    }

    #[test]
    fn test_read_u32_exact_end_is_in_bounds() {
        let bytes = 7u32.to_ne_bytes();
        assert_eq!(read_u32(&bytes, 0).unwrap(), 7);
    }

    #[test]
    fn test_read_u32_out_of_bounds() {
        let bytes = [0u8; 6];
        assert_eq!(
            read_u32(&bytes, 3),
            Err(ProtocolError::OutOfBounds {
                offset: 3,
                width: 4,
                len: 6
            })
        );
        assert!(read_u32(&[], 0).is_err());
    }

    #[test]
    fn test_offset_overflow_is_out_of_bounds() {
        let bytes = [0u8; 8];
        assert!(read_u64(&bytes, usize::MAX - 2).is_err());
    }

    #[test]
    fn test_read_signed_and_wide_fields() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(-5i32).to_ne_bytes());
        bytes.extend_from_slice(&0x0102_0304_0506_0708u64.to_ne_bytes());
        assert_eq!(read_i32(&bytes, 0).unwrap(), -5);
        assert_eq!(read_u64(&bytes, 4).unwrap(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn test_read_array_and_slice() {
        let bytes: Vec<u8> = (0..20).collect();
        let arr: [u8; 4] = read_array(&bytes, 16).unwrap();
        assert_eq!(arr, [16, 17, 18, 19]);
        assert_eq!(read_slice(&bytes, 2, 3).unwrap(), &[2, 3, 4]);
        assert!(read_array::<4>(&bytes, 17).is_err());
    }

    #[test]
    fn test_cursor_walks_packed_layout() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&11u64.to_ne_bytes());
        bytes.extend_from_slice(&(-2i32).to_ne_bytes());
        bytes.extend_from_slice(&3u32.to_ne_bytes());
        bytes.extend_from_slice(b"ab");

        let mut cursor = FieldCursor::new(&bytes);
        assert_eq!(cursor.u64().unwrap(), 11);
        assert_eq!(cursor.i32().unwrap(), -2);
        assert_eq!(cursor.u32().unwrap(), 3);
        assert_eq!(cursor.remaining(), 2);
        assert_eq!(cursor.array::<2>().unwrap(), *b"ab");
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_cursor_failed_read_does_not_advance() {
        let bytes = [0u8; 6];
        let mut cursor = FieldCursor::new(&bytes);
        assert!(cursor.u32().is_ok());
        assert!(cursor.u32().is_err());
        assert_eq!(cursor.offset(), 4);
        assert_eq!(cursor.take(2).unwrap(), &[0, 0]);
    }
}
