//! # Decode Report
//!
//! The result of one pass over a byte source: every message reconstructed in
//! stream order, byte accounting and the reason the pass stopped.

use crate::warning::DecodeWarning;
use serde::Serialize;
use std::fmt;
use types::{ApiHeader, Payload};

/// Why a decode pass stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltReason {
    /// Source ended cleanly on a message boundary
    EndOfStream,
    /// Source ended partway through a header
    TruncatedHeader,
    /// Header declared more payload than the source held
    ShortPayload,
    /// Byte source returned an I/O error
    SourceError,
}

impl HaltReason {
    /// True only for a clean end on a message boundary
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::EndOfStream => "end of stream",
            Self::TruncatedHeader => "truncated header",
            Self::ShortPayload => "short payload",
            Self::SourceError => "source error",
        };
        f.write_str(text)
    }
}

/// One message reconstructed from the stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedMessage {
    /// Position in the pass, starting at 0
    pub index: usize,
    /// Stream offset of the header
    pub offset: u64,
    pub header: ApiHeader,
    /// Payload bytes actually consumed, at most the declared length
    pub payload_len: u64,
    /// Typed record, absent when too few bytes were present
    pub payload: Option<Payload>,
    pub warnings: Vec<DecodeWarning>,
}

impl DecodedMessage {
    pub fn declared_payload_bytes(&self) -> u64 {
        self.header.declared_payload_bytes()
    }

    /// Whether the stream ended before the declared payload did
    pub fn is_short(&self) -> bool {
        self.payload_len < self.declared_payload_bytes()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Stream offset just past this message
    pub fn end_offset(&self) -> u64 {
        self.offset + ApiHeader::SIZE as u64 + self.payload_len
    }
}

/// Aggregate outcome of a decode pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    pub messages: Vec<DecodedMessage>,
    /// Bytes obtained from the source, including any trailing partial header
    pub bytes_available: u64,
    /// Bytes attributed to reconstructed messages
    pub bytes_consumed: u64,
    /// Total source length when the source knew it up front
    pub source_len: Option<u64>,
    /// `None` while the pass is still running
    pub halt_reason: Option<HaltReason>,
    /// Warnings that belong to no message
    pub stream_warnings: Vec<DecodeWarning>,
}

impl DecodeReport {
    pub(crate) fn new(source_len: Option<u64>) -> Self {
        Self {
            source_len,
            ..Self::default()
        }
    }

    pub(crate) fn record_message(&mut self, message: DecodedMessage) {
        self.bytes_consumed = message.end_offset();
        self.messages.push(message);
    }

    pub(crate) fn record_available(&mut self, n: usize) {
        self.bytes_available += n as u64;
    }

    pub(crate) fn record_stream_warning(&mut self, warning: DecodeWarning) {
        self.stream_warnings.push(warning);
    }

    pub(crate) fn halt(&mut self, reason: HaltReason) {
        self.halt_reason = Some(reason);
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Every warning in stream order, message warnings first
    pub fn warnings(&self) -> impl Iterator<Item = &DecodeWarning> {
        self.messages
            .iter()
            .flat_map(|m| m.warnings.iter())
            .chain(self.stream_warnings.iter())
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// No warnings and a clean end of stream
    pub fn is_clean(&self) -> bool {
        self.warning_count() == 0 && self.halt_reason.is_some_and(|r| r.is_clean())
    }

    /// Fraction of available bytes attributed to messages; 1.0 for an empty
    /// source
    pub fn consumed_ratio(&self) -> f64 {
        if self.bytes_available == 0 {
            return 1.0;
        }
        self.bytes_consumed as f64 / self.bytes_available as f64
    }

    /// Bytes the source held beyond the last complete message
    pub fn unconsumed_bytes(&self) -> u64 {
        self.bytes_available.saturating_sub(self.bytes_consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{ApiId, TypeTag};

    fn message(index: usize, offset: u64, words: u32, payload_len: u64) -> DecodedMessage {
        DecodedMessage {
            index,
            offset,
            header: ApiHeader {
                type_tag: TypeTag::Known(ApiId::LaunchFunc),
                payload_words: words,
                handle: 0,
                sequence: index as u32,
                duration: 0,
                result: 0,
            },
            payload_len,
            payload: None,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_empty_report() {
        let report = DecodeReport::new(Some(0));
        assert_eq!(report.message_count(), 0);
        assert_eq!(report.consumed_ratio(), 1.0);
        assert!(!report.is_clean(), "still running");
    }

    #[test]
    fn test_accounting_follows_messages() {
        let mut report = DecodeReport::new(None);
        report.record_available(28 + 8 + 28 + 4);
        report.record_message(message(0, 0, 2, 8));
        report.record_message(message(1, 36, 2, 4));
        report.halt(HaltReason::ShortPayload);

        assert_eq!(report.bytes_consumed, 68);
        assert_eq!(report.unconsumed_bytes(), 0);
        assert!(report.messages[1].is_short());
        assert!(!report.messages[0].is_short());
        assert_eq!(report.messages[1].end_offset(), 68);
    }

    #[test]
    fn test_warnings_in_stream_order() {
        let mut report = DecodeReport::new(None);
        let mut first = message(0, 0, 0, 0);
        first.warnings.push(DecodeWarning::truncated(ApiId::LaunchFunc, 0));
        report.record_message(first);
        report.record_stream_warning(DecodeWarning::TruncatedHeader { need: 28, got: 10 });
        report.halt(HaltReason::TruncatedHeader);

        let kinds: Vec<_> = report.warnings().collect();
        assert_eq!(kinds.len(), 2);
        assert!(matches!(kinds[0], DecodeWarning::Truncated { .. }));
        assert!(matches!(kinds[1], DecodeWarning::TruncatedHeader { .. }));
        assert!(!report.is_clean());
    }

    #[test]
    fn test_ratio_with_trailing_bytes() {
        let mut report = DecodeReport::new(None);
        report.record_available(40);
        report.record_message(message(0, 0, 0, 0));
        assert_eq!(report.unconsumed_bytes(), 12);
        assert!((report.consumed_ratio() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_halt_reason_serializes_snake_case() {
        let json = serde_json::to_string(&HaltReason::TruncatedHeader).unwrap();
        assert_eq!(json, "\"truncated_header\"");
        assert_eq!(HaltReason::ShortPayload.to_string(), "short payload");
    }
}
