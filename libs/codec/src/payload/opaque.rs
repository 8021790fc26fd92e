//! Fallback for unrecognised type tags: keep a bounded preview, decode nothing

use super::Decoded;
use types::OpaquePayload;

pub fn decode_opaque(type_tag: u32, bytes: &[u8], preview_bytes: usize) -> Decoded<OpaquePayload> {
    Decoded::clean(OpaquePayload {
        type_tag,
        total_len: bytes.len(),
        preview: bytes[..bytes.len().min(preview_bytes)].to_vec(),
    })
}
