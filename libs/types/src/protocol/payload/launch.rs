use serde::Serialize;

/// Launch-Function payload
///
/// `declared_param_size` is the producer's claim; `available_param_bytes` is
/// how many parameter bytes were actually present (bounded by the parameter
/// cap) and is the ground truth. Only a bounded preview of the parameter data
/// is carried in the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchFunction {
    pub function_id: i32,
    pub declared_param_size: u32,
    pub available_param_bytes: usize,
    #[serde(serialize_with = "hex::serde::serialize_upper")]
    pub param_preview: Vec<u8>,
}

impl LaunchFunction {
    /// Declared parameter size exceeds what was actually present
    pub fn size_mismatch(&self) -> bool {
        u64::from(self.declared_param_size) > self.available_param_bytes as u64
    }

    /// Encode a payload: fixed prefix followed by `params`
    ///
    /// `declared_param_size` is written as given so tests can build payloads
    /// whose claim disagrees with the bytes that follow.
    #[cfg(feature = "fixtures")]
    pub fn encode_wire(function_id: i32, declared_param_size: u32, params: &[u8]) -> Vec<u8> {
        use crate::protocol::constants::LAUNCH_FUNC_FIXED_SIZE;

        let mut out = Vec::with_capacity(LAUNCH_FUNC_FIXED_SIZE + params.len());
        out.extend_from_slice(&function_id.to_ne_bytes());
        out.extend_from_slice(&declared_param_size.to_ne_bytes());
        out.extend_from_slice(params);
        out
    }
}
