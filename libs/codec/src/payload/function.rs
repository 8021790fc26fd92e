//! Get-Function payload decoder
//!
//! ```text
//! core_id i32 @0 | f_id i32 @4 | md5 [u8; 16] @8 | func_name [u8; 64] @24   (88 bytes)
//! ```
//!
//! No prefix of this layout is useful on its own, so a short payload yields
//! no record at all.

use super::Decoded;
use crate::error::ProtocolResult;
use crate::reader::FieldCursor;
use crate::warning::DecodeWarning;
use types::{ApiId, FixedName, GetFunction, Md5Digest, FUNC_MAX_NAME_LEN, MD5SUM_LEN};

pub fn decode_get_function(bytes: &[u8]) -> Decoded<GetFunction> {
    match decode_fields(bytes) {
        Ok(record) => Decoded::clean(record),
        Err(_) => Decoded::truncated(None, DecodeWarning::truncated(ApiId::GetFunc, bytes.len())),
    }
}

fn decode_fields(bytes: &[u8]) -> ProtocolResult<GetFunction> {
    let mut cursor = FieldCursor::new(bytes);
    Ok(GetFunction {
        core_id: cursor.i32()?,
        function_id: cursor.i32()?,
        md5: Md5Digest(cursor.array::<MD5SUM_LEN>()?),
        name: FixedName::from_field(&cursor.array::<FUNC_MAX_NAME_LEN>()?),
    })
}
