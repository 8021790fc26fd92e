//! Protocol constants and basic types
//!
//! Layout sizes for the packed wire structures and the closed set of API ids
//! understood by this protocol version.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;
use std::fmt;

/// Size of the packed message header in bytes
pub const HEADER_SIZE: usize = 28;

/// Payload lengths are declared in 4-byte words
pub const PAYLOAD_WORD_SIZE: u64 = 4;

/// Length of an MD5 checksum field
pub const MD5SUM_LEN: usize = 16;

/// Width of the library name field
pub const LIB_MAX_NAME_LEN: usize = 64;

/// Width of the function name field
pub const FUNC_MAX_NAME_LEN: usize = 64;

/// Load/Unload-Library payload: path(8) + addr(8) + size(4) + name(64) + md5(16) + cur_rec(4)
pub const LIBRARY_PAYLOAD_SIZE: usize = 8 + 8 + 4 + LIB_MAX_NAME_LEN + MD5SUM_LEN + 4;

/// Prefix of a library payload that is still decoded when the rest is missing:
/// path(8) + addr(8) + size(4)
pub const LIBRARY_PARTIAL_SIZE: usize = 8 + 8 + 4;

/// Get-Function payload: core_id(4) + f_id(4) + md5(16) + func_name(64)
pub const GET_FUNC_PAYLOAD_SIZE: usize = 4 + 4 + MD5SUM_LEN + FUNC_MAX_NAME_LEN;

/// Fixed part of a Launch-Function payload: f_id(4) + size(4)
pub const LAUNCH_FUNC_FIXED_SIZE: usize = 4 + 4;

/// Capacity of the producer's parameter buffer
pub const MAX_PARAM_BYTES: usize = 4096;

/// API id carried in the header type tag
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TryFromPrimitive, IntoPrimitive)]
pub enum ApiId {
    LoadLib = 0x9000_0001,
    GetFunc = 0x9000_0002,
    LaunchFunc = 0x9000_0003,
    UnloadLib = 0x9000_0004,
}

impl ApiId {
    /// Every API id known to this protocol version
    pub const ALL: [ApiId; 4] = [
        ApiId::LoadLib,
        ApiId::GetFunc,
        ApiId::LaunchFunc,
        ApiId::UnloadLib,
    ];

    /// Protocol name as it appears in producer logs
    pub const fn name(self) -> &'static str {
        match self {
            ApiId::LoadLib => "A53LITE_LOAD_LIB",
            ApiId::GetFunc => "A53LITE_GET_FUNC",
            ApiId::LaunchFunc => "A53LITE_LAUNCH_FUNC",
            ApiId::UnloadLib => "A53LITE_UNLOAD_LIB",
        }
    }

    /// Structural minimum of this API's payload in bytes
    pub const fn min_payload_size(self) -> usize {
        match self {
            ApiId::LoadLib | ApiId::UnloadLib => LIBRARY_PAYLOAD_SIZE,
            ApiId::GetFunc => GET_FUNC_PAYLOAD_SIZE,
            ApiId::LaunchFunc => LAUNCH_FUNC_FIXED_SIZE,
        }
    }
}

impl fmt::Display for ApiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Header type tag classified against the closed API id set
///
/// Unknown tags are expected in real captures and are carried through with
/// their raw value rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    Known(ApiId),
    Unknown(u32),
}

impl TypeTag {
    /// Raw 32-bit tag as it appeared on the wire
    pub fn raw(self) -> u32 {
        match self {
            TypeTag::Known(id) => id.into(),
            TypeTag::Unknown(raw) => raw,
        }
    }

    pub fn api_id(self) -> Option<ApiId> {
        match self {
            TypeTag::Known(id) => Some(id),
            TypeTag::Unknown(_) => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Known(id) => id.name(),
            TypeTag::Unknown(_) => "UNKNOWN",
        }
    }
}

impl From<u32> for TypeTag {
    fn from(raw: u32) -> Self {
        match ApiId::try_from(raw) {
            Ok(id) => TypeTag::Known(id),
            Err(_) => TypeTag::Unknown(raw),
        }
    }
}

impl From<ApiId> for TypeTag {
    fn from(id: ApiId) -> Self {
        TypeTag::Known(id)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X} ({})", self.raw(), self.name())
    }
}
