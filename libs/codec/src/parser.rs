//! # Message Header Parser
//!
//! Parses the fixed 28-byte envelope that prefixes every API message. Fields
//! are extracted one by one at their packed offsets through the field reader;
//! the host's own struct layout rules never enter into it.
//!
//! A header that cannot be read in full is fatal to the stream: without the
//! boundary there is no way to find the next message.

use crate::error::{ProtocolError, ProtocolResult};
use crate::reader::FieldCursor;
use types::{ApiHeader, TypeTag, HEADER_SIZE};

/// Result type for parsing operations
pub type ParseResult<T> = ProtocolResult<T>;

/// Parse a message header from the start of `data`
///
/// Reads exactly [`HEADER_SIZE`] bytes; anything after them is ignored.
pub fn parse_header(data: &[u8]) -> ParseResult<ApiHeader> {
    if data.len() < HEADER_SIZE {
        return Err(ProtocolError::truncated_header(HEADER_SIZE, data.len()));
    }

    let mut cursor = FieldCursor::new(&data[..HEADER_SIZE]);
    Ok(ApiHeader {
        type_tag: TypeTag::from(cursor.u32()?),
        payload_words: cursor.u32()?,
        handle: cursor.u64()?,
        sequence: cursor.u32()?,
        duration: cursor.u32()?,
        result: cursor.u32()?,
    })
}
