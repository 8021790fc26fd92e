use crate::common::fixed::{FixedName, Md5Digest};
use crate::protocol::constants::FUNC_MAX_NAME_LEN;
use serde::Serialize;

/// Get-Function payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetFunction {
    pub core_id: i32,
    pub function_id: i32,
    pub md5: Md5Digest,
    pub name: FixedName<FUNC_MAX_NAME_LEN>,
}

impl GetFunction {
    /// Encode in native byte order
    #[cfg(feature = "fixtures")]
    pub fn to_wire_bytes(&self) -> Vec<u8> {
        use crate::protocol::constants::GET_FUNC_PAYLOAD_SIZE;

        let mut out = Vec::with_capacity(GET_FUNC_PAYLOAD_SIZE);
        out.extend_from_slice(&self.core_id.to_ne_bytes());
        out.extend_from_slice(&self.function_id.to_ne_bytes());
        out.extend_from_slice(self.md5.as_bytes());
        out.extend_from_slice(&self.name.to_field());
        out
    }
}
