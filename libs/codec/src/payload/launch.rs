//! Launch-Function payload decoder
//!
//! ```text
//! f_id i32 @0 | size u32 @4 | param [u8; ≤4096] @8
//! ```
//!
//! The parameter region is variable: its available length is whatever
//! followed the fixed part in the stream, capped at `max_param_bytes`. The
//! declared `size` is checked against that and a mismatch is reported, but the
//! available count is what the record carries as ground truth.

use super::Decoded;
use crate::config::DecoderConfig;
use crate::error::ProtocolResult;
use crate::reader::FieldCursor;
use crate::warning::DecodeWarning;
use types::{ApiId, LaunchFunction, LAUNCH_FUNC_FIXED_SIZE};

pub fn decode_launch_function(bytes: &[u8], config: &DecoderConfig) -> Decoded<LaunchFunction> {
    let Ok((function_id, declared_param_size)) = decode_fixed(bytes) else {
        return Decoded::truncated(None, DecodeWarning::truncated(ApiId::LaunchFunc, bytes.len()));
    };

    let params = launch_params(bytes, config.max_param_bytes);
    let available = params.len();
    let preview = &params[..available.min(config.param_preview_bytes)];

    let record = LaunchFunction {
        function_id,
        declared_param_size,
        available_param_bytes: available,
        param_preview: preview.to_vec(),
    };

    let mut decoded = Decoded::clean(record);
    if u64::from(declared_param_size) > available as u64 {
        decoded.warnings.push(DecodeWarning::SizeMismatch {
            declared: declared_param_size,
            available,
        });
    }
    decoded
}

/// Parameter bytes of a Launch-Function payload
///
/// Borrowed from the payload, bounded by `max_param_bytes`. Empty when the
/// payload is shorter than its fixed part.
pub fn launch_params(payload: &[u8], max_param_bytes: usize) -> &[u8] {
    let params = payload.get(LAUNCH_FUNC_FIXED_SIZE..).unwrap_or_default();
    &params[..params.len().min(max_param_bytes)]
}

fn decode_fixed(bytes: &[u8]) -> ProtocolResult<(i32, u32)> {
    let mut cursor = FieldCursor::new(bytes);
    Ok((cursor.i32()?, cursor.u32()?))
}
