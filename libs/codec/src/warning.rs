//! Structural warnings
//!
//! Problems found while walking a stream that do not stop the decoder from
//! producing a report. Warnings are attached to the message they concern, or
//! to the report itself when no message could be formed (a truncated header).

use serde::Serialize;
use thiserror::Error;
use types::ApiId;

/// Structural problem captured during a decode pass
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeWarning {
    /// Payload shorter than the structural minimum of its type
    #[error("{api} payload truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        api: ApiId,
        expected: usize,
        actual: usize,
    },

    /// Header declared more payload bytes than the stream held
    #[error("Short payload: header declares {declared} bytes, only {actual} available")]
    ShortPayload { declared: u64, actual: u64 },

    /// Launch-Function parameter size claim exceeds the parameter bytes present
    #[error("Parameter size mismatch: declared {declared} bytes, only {available} available")]
    SizeMismatch { declared: u32, available: usize },

    /// Stream ended partway through a header
    #[error("Truncated header: need {need} bytes, got {got}")]
    TruncatedHeader { need: usize, got: usize },
}

impl DecodeWarning {
    pub fn truncated(api: ApiId, actual: usize) -> Self {
        Self::Truncated {
            api,
            expected: api.min_payload_size(),
            actual,
        }
    }

    /// Whether this warning also ends the decode pass
    ///
    /// A short payload leaves the cursor at an unknown boundary and a partial
    /// header has no boundary at all; everything else is per-message.
    pub fn halts_stream(&self) -> bool {
        matches!(
            self,
            Self::ShortPayload { .. } | Self::TruncatedHeader { .. }
        )
    }
}
