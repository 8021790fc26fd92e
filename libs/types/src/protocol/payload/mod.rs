//! Payload records, one per message kind
//!
//! Load-Library and Unload-Library share one record shape: the protocol
//! aliases the two calls onto the same structure.

mod function;
mod launch;
mod library;
mod opaque;

pub use function::GetFunction;
pub use launch::LaunchFunction;
pub use library::{LibraryDetail, LibraryRecord};
pub use opaque::OpaquePayload;

use crate::protocol::constants::{ApiId, TypeTag};
use serde::Serialize;

/// Structurally decoded payload, selected by the header type tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum Payload {
    LoadLibrary(LibraryRecord),
    UnloadLibrary(LibraryRecord),
    GetFunction(GetFunction),
    LaunchFunction(LaunchFunction),
    Unknown(OpaquePayload),
}

impl Payload {
    /// Tag this payload was decoded under
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Payload::LoadLibrary(_) => TypeTag::Known(ApiId::LoadLib),
            Payload::UnloadLibrary(_) => TypeTag::Known(ApiId::UnloadLib),
            Payload::GetFunction(_) => TypeTag::Known(ApiId::GetFunc),
            Payload::LaunchFunction(_) => TypeTag::Known(ApiId::LaunchFunc),
            Payload::Unknown(opaque) => TypeTag::Unknown(opaque.type_tag),
        }
    }

    /// Library record for either library call
    pub fn as_library(&self) -> Option<&LibraryRecord> {
        match self {
            Payload::LoadLibrary(record) | Payload::UnloadLibrary(record) => Some(record),
            _ => None,
        }
    }
}
