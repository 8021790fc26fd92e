//! # Payload Decoders
//!
//! One structural decoder per message kind. Each takes exactly the payload
//! bytes that were present in the stream (never more than the header
//! declared, possibly fewer) and returns an optional record plus warnings.
//!
//! Decoders never fail: a payload below its structural minimum yields a
//! `Truncated` warning and a partial or absent record.
//!
//! Dispatch is a closed match over the protocol's API ids with a single
//! fallback for unknown tags.

mod function;
mod launch;
mod library;
mod opaque;

pub use function::decode_get_function;
pub use launch::{decode_launch_function, launch_params};
pub use library::decode_library;
pub use opaque::decode_opaque;

use crate::config::DecoderConfig;
use crate::warning::DecodeWarning;
use types::{ApiId, Payload, TypeTag};

/// Output of a payload decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    /// Record, or `None` when too few bytes were present for any of it
    pub record: Option<T>,
    pub warnings: Vec<DecodeWarning>,
}

impl<T> Decoded<T> {
    pub fn clean(record: T) -> Self {
        Self {
            record: Some(record),
            warnings: Vec::new(),
        }
    }

    pub fn truncated(record: Option<T>, warning: DecodeWarning) -> Self {
        Self {
            record,
            warnings: vec![warning],
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        Decoded {
            record: self.record.map(f),
            warnings: self.warnings,
        }
    }
}

/// Route a payload to the decoder for its type tag
pub fn decode_payload(tag: TypeTag, bytes: &[u8], config: &DecoderConfig) -> Decoded<Payload> {
    match tag {
        TypeTag::Known(ApiId::LoadLib) => {
            decode_library(ApiId::LoadLib, bytes).map(Payload::LoadLibrary)
        }
        TypeTag::Known(ApiId::UnloadLib) => {
            decode_library(ApiId::UnloadLib, bytes).map(Payload::UnloadLibrary)
        }
        TypeTag::Known(ApiId::GetFunc) => decode_get_function(bytes).map(Payload::GetFunction),
        TypeTag::Known(ApiId::LaunchFunc) => {
            decode_launch_function(bytes, config).map(Payload::LaunchFunction)
        }
        TypeTag::Unknown(raw) => {
            decode_opaque(raw, bytes, config.unknown_preview_bytes).map(Payload::Unknown)
        }
    }
}
