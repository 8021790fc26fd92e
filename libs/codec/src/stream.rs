//! # Stream Decoder
//!
//! Walks a [`ByteSource`] one message at a time: read a header, read up to the
//! payload length it declares, dispatch what actually arrived to the payload
//! decoder for its type, advance the cursor by exactly what was consumed.
//!
//! The header's length is a claim. When the source runs out before the claim
//! is met, the message is still reported (flagged `ShortPayload`) and the pass
//! halts, since the position of the next header is then unknown.
//!
//! ```text
//! Scanning ──header + payload──▶ Scanning
//!    │ 0 bytes          → Halted(EndOfStream)
//!    │ 1..27 bytes      → Halted(TruncatedHeader)
//!    │ short payload    → Halted(ShortPayload)   (after recording the message)
//!    │ source I/O error → Halted(SourceError)
//! ```
//!
//! The decoder is a lazy iterator: nothing is read until the next message is
//! requested, and a consumer may stop at any point.

use crate::config::DecoderConfig;
use crate::error::{DecodeError, DecodeResult, IncompleteDecode};
use crate::parser::parse_header;
use crate::payload::decode_payload;
use crate::report::{DecodeReport, DecodedMessage, HaltReason};
use crate::source::{ByteSource, ReadStatus, SliceSource};
use crate::warning::DecodeWarning;
use std::io;
use std::iter::FusedIterator;
use std::thread;
use tracing::{debug, info, warn};
use types::HEADER_SIZE;

/// Payload bytes requested from the source per read
///
/// Keeps memory proportional to the bytes actually present, not to a
/// declared length that may be close to 16 GiB.
const PAYLOAD_CHUNK: usize = 64 * 1024;

/// Decoder lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    Scanning,
    Halted(HaltReason),
}

/// Lazy decoder over a byte source
///
/// Yields each message as it is reconstructed. The only `Err` item is a byte
/// source failure, after which the iterator is exhausted; everything decoded
/// before it stays on [`report`](Self::report).
#[derive(Debug)]
pub struct StreamDecoder<S> {
    source: S,
    config: DecoderConfig,
    state: DecoderState,
    cursor: u64,
    report: DecodeReport,
    payload_buf: Vec<u8>,
}

impl<S: ByteSource> StreamDecoder<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, DecoderConfig::default())
    }

    pub fn with_config(source: S, config: DecoderConfig) -> Self {
        let report = DecodeReport::new(source.size_hint());
        Self {
            source,
            config,
            state: DecoderState::Scanning,
            cursor: 0,
            report,
            payload_buf: Vec::new(),
        }
    }

    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Stream offset of the next header
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Report for everything decoded so far
    pub fn report(&self) -> &DecodeReport {
        &self.report
    }

    /// Stop here and keep the report as it stands
    pub fn into_report(self) -> DecodeReport {
        self.report
    }

    /// Decode the rest of the stream and return the full report
    ///
    /// On a source failure the report decoded up to that point comes back
    /// inside the error.
    pub fn finish(mut self) -> Result<DecodeReport, IncompleteDecode> {
        while let Some(item) = self.next() {
            if let Err(error) = item {
                return Err(IncompleteDecode::new(self.report, error));
            }
        }
        Ok(self.report)
    }

    fn step(&mut self) -> DecodeResult<Option<DecodedMessage>> {
        if let DecoderState::Halted(_) = self.state {
            return Ok(None);
        }

        let offset = self.cursor;
        let mut header_buf = [0u8; HEADER_SIZE];
        let mut got = 0;
        let filled = fill_from(
            &mut self.source,
            self.config.would_block_retries,
            &mut header_buf,
            &mut got,
        );
        self.report.record_available(got);
        filled.map_err(|e| DecodeError::source(offset, e))?;

        if got == 0 {
            self.halt(HaltReason::EndOfStream);
            return Ok(None);
        }

        let header = match parse_header(&header_buf[..got]) {
            Ok(header) => header,
            Err(_) => {
                let warning = DecodeWarning::TruncatedHeader {
                    need: HEADER_SIZE,
                    got,
                };
                warn!("Offset 0x{:08X}: {}", offset, warning);
                self.report.record_stream_warning(warning);
                self.halt(HaltReason::TruncatedHeader);
                return Ok(None);
            }
        };

        let declared = header.declared_payload_bytes();
        self.read_payload(declared)
            .map_err(|e| DecodeError::source(offset, e))?;
        let actual = self.payload_buf.len() as u64;
        let short = actual < declared;

        let mut warnings = Vec::new();
        if short {
            warnings.push(DecodeWarning::ShortPayload { declared, actual });
        }
        let decoded = decode_payload(header.type_tag, &self.payload_buf, &self.config);
        warnings.extend(decoded.warnings);

        let message = DecodedMessage {
            index: self.report.message_count(),
            offset,
            header,
            payload_len: actual,
            payload: decoded.record,
            warnings,
        };
        self.cursor = message.end_offset();

        debug!(
            "Message #{} at 0x{:08X}: {} seq={} payload={}/{} bytes",
            message.index, offset, header.type_tag, header.sequence, actual, declared
        );
        for warning in &message.warnings {
            warn!("Message #{} at 0x{:08X}: {}", message.index, offset, warning);
        }

        self.report.record_message(message.clone());
        if short {
            self.halt(HaltReason::ShortPayload);
        }
        Ok(Some(message))
    }

    /// Read up to `declared` bytes into `payload_buf`, growing it chunk by chunk
    fn read_payload(&mut self, declared: u64) -> io::Result<()> {
        self.payload_buf.clear();
        while (self.payload_buf.len() as u64) < declared {
            let filled = self.payload_buf.len();
            let want = (declared - filled as u64).min(PAYLOAD_CHUNK as u64) as usize;
            self.payload_buf.resize(filled + want, 0);

            let mut got = 0;
            let read = fill_from(
                &mut self.source,
                self.config.would_block_retries,
                &mut self.payload_buf[filled..],
                &mut got,
            );
            self.payload_buf.truncate(filled + got);
            self.report.record_available(got);
            read?;

            if got < want {
                break;
            }
        }
        Ok(())
    }

    fn halt(&mut self, reason: HaltReason) {
        match reason {
            HaltReason::EndOfStream => info!(
                "Decode finished: {} messages, {} bytes",
                self.report.message_count(),
                self.cursor
            ),
            _ => warn!(
                "Decode halted at 0x{:08X} ({}): {} messages",
                self.cursor,
                reason,
                self.report.message_count()
            ),
        }
        self.state = DecoderState::Halted(reason);
        self.report.halt(reason);
    }
}

impl<S: ByteSource> Iterator for StreamDecoder<S> {
    type Item = DecodeResult<DecodedMessage>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(message) => message.map(Ok),
            Err(e) => {
                self.halt(HaltReason::SourceError);
                Some(Err(e))
            }
        }
    }
}

impl<S: ByteSource> FusedIterator for StreamDecoder<S> {}

/// Fill `buf` from the source until it is full or nothing more is available
///
/// A `WouldBlock` read is retried up to `retries` times in a row; after that
/// the bytes obtained so far are all that is available. `filled` counts the
/// bytes written into `buf`, including those read before an error.
fn fill_from<S: ByteSource + ?Sized>(
    source: &mut S,
    retries: u32,
    buf: &mut [u8],
    filled: &mut usize,
) -> io::Result<()> {
    let mut idle = 0;
    while *filled < buf.len() {
        match source.read_up_to(&mut buf[*filled..])? {
            // zero-length fill on a non-empty buffer makes no progress
            ReadStatus::Filled(0) => break,
            ReadStatus::Filled(n) => {
                *filled += n.min(buf.len() - *filled);
                idle = 0;
            }
            ReadStatus::WouldBlock if idle < retries => {
                idle += 1;
                thread::yield_now();
            }
            ReadStatus::WouldBlock | ReadStatus::EndOfData => break,
        }
    }
    Ok(())
}

/// Decode a whole source in one call
pub fn decode_stream<S: ByteSource>(
    source: S,
    config: DecoderConfig,
) -> Result<DecodeReport, IncompleteDecode> {
    StreamDecoder::with_config(source, config).finish()
}

/// Decode an in-memory capture
///
/// A slice never fails to read, so this always produces a report.
pub fn decode_bytes(bytes: &[u8], config: DecoderConfig) -> DecodeReport {
    let mut decoder = StreamDecoder::with_config(SliceSource::new(bytes), config);
    decoder.by_ref().for_each(drop);
    decoder.into_report()
}
