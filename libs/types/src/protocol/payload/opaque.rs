use serde::Serialize;

/// Payload of an unrecognised type tag
///
/// No structural fields; a bounded preview is kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpaquePayload {
    /// Raw tag from the header
    pub type_tag: u32,
    /// Payload bytes present in the stream
    pub total_len: usize,
    #[serde(serialize_with = "hex::serde::serialize_upper")]
    pub preview: Vec<u8>,
}

impl OpaquePayload {
    pub fn is_truncated_preview(&self) -> bool {
        self.preview.len() < self.total_len
    }
}
