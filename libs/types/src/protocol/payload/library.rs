use crate::common::fixed::{FixedName, Md5Digest};
use crate::protocol::constants::LIB_MAX_NAME_LEN;
use serde::Serialize;

/// Load-Library / Unload-Library payload
///
/// `library_path` and `library_addr` are pointers in the producer's address
/// space and are kept as opaque values.
///
/// `detail` is `None` for a partial record: the payload was long enough for
/// the two pointers and the size but not for the rest of the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryRecord {
    pub library_path: u64,
    pub library_addr: u64,
    pub size: u32,
    pub detail: Option<LibraryDetail>,
}

/// Trailing fields of a library payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryDetail {
    pub name: FixedName<LIB_MAX_NAME_LEN>,
    pub md5: Md5Digest,
    pub cur_rec: i32,
}

impl LibraryRecord {
    pub fn is_partial(&self) -> bool {
        self.detail.is_none()
    }

    pub fn name(&self) -> Option<&FixedName<LIB_MAX_NAME_LEN>> {
        self.detail.as_ref().map(|detail| &detail.name)
    }

    /// Encode in native byte order; a partial record encodes only its prefix
    #[cfg(feature = "fixtures")]
    pub fn to_wire_bytes(&self) -> Vec<u8> {
        use crate::protocol::constants::{LIBRARY_PARTIAL_SIZE, LIBRARY_PAYLOAD_SIZE};
        use byteorder::{ByteOrder, NativeEndian};

        let mut out = vec![0u8; LIBRARY_PARTIAL_SIZE];
        NativeEndian::write_u64(&mut out[0..8], self.library_path);
        NativeEndian::write_u64(&mut out[8..16], self.library_addr);
        NativeEndian::write_u32(&mut out[16..20], self.size);

        if let Some(detail) = &self.detail {
            out.reserve(LIBRARY_PAYLOAD_SIZE - LIBRARY_PARTIAL_SIZE);
            out.extend_from_slice(&detail.name.to_field());
            out.extend_from_slice(detail.md5.as_bytes());
            out.extend_from_slice(&detail.cur_rec.to_ne_bytes());
        }
        out
    }
}
