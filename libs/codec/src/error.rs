//! Decoder error types
//!
//! Hard failures only. Structural problems found inside a stream (short
//! payloads, truncated records, size mismatches) are not errors; they are
//! captured as [`DecodeWarning`](crate::DecodeWarning)s on the report.

use crate::report::DecodeReport;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Field-level and header-level decoding errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A fixed-width read would run past the end of the buffer
    #[error("Field out of bounds: {width}-byte read at offset {offset} exceeds buffer of {len} bytes")]
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },

    /// Fewer bytes than a full message header
    #[error("Truncated header: need {need} bytes, got {got}")]
    TruncatedHeader { need: usize, got: usize },
}

impl ProtocolError {
    pub fn out_of_bounds(offset: usize, width: usize, len: usize) -> Self {
        Self::OutOfBounds { offset, width, len }
    }

    pub fn truncated_header(need: usize, got: usize) -> Self {
        Self::TruncatedHeader { need, got }
    }
}

/// Stream-level failures surfaced to the caller
///
/// The byte source is the only thing that can fail hard; everything decoded
/// before the failure stays available on the decoder's report.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Byte source failed at stream offset {offset}: {source}")]
    Source {
        offset: u64,
        #[source]
        source: io::Error,
    },
}

impl DecodeError {
    pub fn source(offset: u64, source: io::Error) -> Self {
        Self::Source { offset, source }
    }

    /// Stream offset of the message boundary where the failure occurred
    pub fn offset(&self) -> u64 {
        match self {
            Self::Source { offset, .. } => *offset,
        }
    }
}

/// A whole-stream decode that a source failure cut short
///
/// Carries the report for everything decoded before the failure, halted with
/// [`HaltReason::SourceError`](crate::HaltReason::SourceError).
#[derive(Debug, Error)]
#[error("Decode stopped after {} messages: {error}", .report.message_count())]
pub struct IncompleteDecode {
    pub report: Box<DecodeReport>,
    #[source]
    pub error: DecodeError,
}

impl IncompleteDecode {
    pub fn new(report: DecodeReport, error: DecodeError) -> Self {
        Self {
            report: Box::new(report),
            error,
        }
    }

    pub fn into_parts(self) -> (DecodeReport, DecodeError) {
        (*self.report, self.error)
    }
}

/// Decoder configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for field and header decoding
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

/// Result type for stream decoding
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_display() {
        let err = ProtocolError::out_of_bounds(100, 4, 102);
        assert_eq!(
            err.to_string(),
            "Field out of bounds: 4-byte read at offset 100 exceeds buffer of 102 bytes"
        );
    }

    #[test]
    fn test_truncated_header_display() {
        let err = ProtocolError::truncated_header(28, 10);
        assert!(matches!(
            err,
            ProtocolError::TruncatedHeader { need: 28, got: 10 }
        ));
        assert_eq!(err.to_string(), "Truncated header: need 28 bytes, got 10");
    }

    #[test]
    fn test_decode_error_keeps_io_source() {
        let err = DecodeError::source(264, io::Error::new(io::ErrorKind::Other, "disk gone"));
        assert_eq!(err.offset(), 264);
        assert!(err.to_string().contains("offset 264"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_incomplete_decode_keeps_report() {
        let err = IncompleteDecode::new(
            DecodeReport::new(Some(300)),
            DecodeError::source(136, io::Error::new(io::ErrorKind::Other, "eio")),
        );
        assert!(err.to_string().starts_with("Decode stopped after 0 messages"));
        assert!(std::error::Error::source(&err).is_some());

        let (report, error) = err.into_parts();
        assert_eq!(report.source_len, Some(300));
        assert_eq!(error.offset(), 136);
    }

    #[test]
    fn test_config_error_invalid_display() {
        let err = ConfigError::Invalid("max_param_bytes must be non-zero".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid config: max_param_bytes must be non-zero"
        );
    }
}
