//! API Message Header
//!
//! The header is identical for all messages and prefixes every payload.

use crate::protocol::constants::{ApiId, TypeTag, HEADER_SIZE, PAYLOAD_WORD_SIZE};
use serde::Serialize;

/// API Message Header (28 bytes on the wire, packed)
///
/// ```text
/// ┌──────────┬───────────────┬────────────┬──────────┬──────────┬──────────┐
/// │ api_id   │ api_size      │ api_handle │ api_seq  │ duration │ result   │
/// │ u32 @0   │ u32 @4 (words)│ u64 @8     │ u32 @16  │ u32 @20  │ u32 @24  │
/// └──────────┴───────────────┴────────────┴──────────┴──────────┴──────────┘
/// ```
///
/// `payload_words` is what the producer *claimed*; the capture may end before
/// that many payload bytes exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiHeader {
    pub type_tag: TypeTag,
    /// Declared payload length in 4-byte words
    pub payload_words: u32,
    /// Correlation handle, opaque to the decoder
    pub handle: u64,
    pub sequence: u32,
    pub duration: u32,
    pub result: u32,
}

impl ApiHeader {
    /// Header size in bytes
    pub const SIZE: usize = HEADER_SIZE;

    /// Declared payload length in bytes
    ///
    /// Computed in 64 bits; a word count near `u32::MAX` does not wrap.
    pub fn declared_payload_bytes(&self) -> u64 {
        u64::from(self.payload_words) * PAYLOAD_WORD_SIZE
    }

    pub fn api_id(&self) -> Option<ApiId> {
        self.type_tag.api_id()
    }

    /// Encode this header in native byte order
    #[cfg(feature = "fixtures")]
    pub fn to_wire_bytes(&self) -> [u8; HEADER_SIZE] {
        use byteorder::{ByteOrder, NativeEndian};

        let mut out = [0u8; HEADER_SIZE];
        NativeEndian::write_u32(&mut out[0..4], self.type_tag.raw());
        NativeEndian::write_u32(&mut out[4..8], self.payload_words);
        NativeEndian::write_u64(&mut out[8..16], self.handle);
        NativeEndian::write_u32(&mut out[16..20], self.sequence);
        NativeEndian::write_u32(&mut out[20..24], self.duration);
        NativeEndian::write_u32(&mut out[24..28], self.result);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(payload_words: u32) -> ApiHeader {
        ApiHeader {
            type_tag: TypeTag::Known(ApiId::LoadLib),
            payload_words,
            handle: 0x1122_3344_5566_7788,
            sequence: 1,
            duration: 0,
            result: 0,
        }
    }

    #[test]
    fn test_declared_payload_bytes() {
        assert_eq!(header(0).declared_payload_bytes(), 0);
        assert_eq!(header(27).declared_payload_bytes(), 108);
    }

    #[test]
    fn test_declared_payload_bytes_does_not_wrap() {
        assert_eq!(
            header(u32::MAX).declared_payload_bytes(),
            u64::from(u32::MAX) * 4
        );
    }

    #[test]
    fn test_api_id_lookup() {
        assert_eq!(header(1).api_id(), Some(ApiId::LoadLib));

        let unknown = ApiHeader {
            type_tag: TypeTag::Unknown(0x42),
            ..header(1)
        };
        assert_eq!(unknown.api_id(), None);
    }

    #[cfg(feature = "fixtures")]
    #[test]
    fn test_wire_bytes_field_offsets() {
        let bytes = header(27).to_wire_bytes();
        assert_eq!(&bytes[0..4], &0x9000_0001u32.to_ne_bytes());
        assert_eq!(&bytes[4..8], &27u32.to_ne_bytes());
        assert_eq!(&bytes[8..16], &0x1122_3344_5566_7788u64.to_ne_bytes());
        assert_eq!(&bytes[16..20], &1u32.to_ne_bytes());
    }
}
