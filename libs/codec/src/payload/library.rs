//! Load-Library / Unload-Library payload decoder
//!
//! ```text
//! library_path u64 @0 | library_addr u64 @8 | size u32 @16 |
//! library_name [u8; 64] @20 | md5 [u8; 16] @84 | cur_rec i32 @100   (104 bytes)
//! ```
//!
//! Below 104 bytes the payload is truncated. If at least the first 20 bytes
//! (both pointers and the size) are present they are still decoded and
//! returned as a partial record.

use super::Decoded;
use crate::error::ProtocolResult;
use crate::reader::FieldCursor;
use crate::warning::DecodeWarning;
use types::{ApiId, FixedName, LibraryDetail, LibraryRecord, Md5Digest, LIB_MAX_NAME_LEN, MD5SUM_LEN};

/// Decode a library payload for either library call
pub fn decode_library(api: ApiId, bytes: &[u8]) -> Decoded<LibraryRecord> {
    match decode_full(bytes) {
        Ok(record) => Decoded::clean(record),
        Err(_) => Decoded::truncated(
            decode_prefix(&mut FieldCursor::new(bytes)).ok(),
            DecodeWarning::truncated(api, bytes.len()),
        ),
    }
}

fn decode_prefix(cursor: &mut FieldCursor<'_>) -> ProtocolResult<LibraryRecord> {
    Ok(LibraryRecord {
        library_path: cursor.u64()?,
        library_addr: cursor.u64()?,
        size: cursor.u32()?,
        detail: None,
    })
}

fn decode_full(bytes: &[u8]) -> ProtocolResult<LibraryRecord> {
    let mut cursor = FieldCursor::new(bytes);
    let prefix = decode_prefix(&mut cursor)?;
    let name = FixedName::from_field(&cursor.array::<LIB_MAX_NAME_LEN>()?);
    let md5 = Md5Digest(cursor.array::<MD5SUM_LEN>()?);
    let cur_rec = cursor.i32()?;

    Ok(LibraryRecord {
        detail: Some(LibraryDetail { name, md5, cur_rec }),
        ..prefix
    })
}
