//! Report rendering
//!
//! Text output follows the layout of the producer team's capture checker:
//! one block per message, a running byte count, and a closing summary.

use codec::{DecodeReport, DecodedMessage};
use std::fmt::Write as _;
use std::io::{self, Write};
use types::{GetFunction, LaunchFunction, LibraryRecord, OpaquePayload, Payload};

/// Bytes shown before a hex preview is cut with `...`
const HEX_PREVIEW_BYTES: usize = 16;

const RULE: &str = "========================================";

/// Upper-case hex of the first 16 bytes, `...` if there are more, then the
/// full length
pub fn hex_preview(bytes: &[u8]) -> String {
    let shown = &bytes[..bytes.len().min(HEX_PREVIEW_BYTES)];
    let more = if bytes.len() > HEX_PREVIEW_BYTES {
        "..."
    } else {
        ""
    };
    format!("{}{} ({} bytes)", hex::encode_upper(shown), more, bytes.len())
}

/// Printable ASCII as-is, everything else as `\xNN`
pub fn escape_name(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        if (0x20..0x7F).contains(&b) {
            out.push(b as char);
        } else {
            let _ = write!(out, "\\x{b:02X}");
        }
    }
    out
}

/// Streaming text renderer
///
/// Messages are written as the decoder yields them, so a long capture
/// produces output before the pass completes.
pub struct TextRenderer<W> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn preamble(&mut self, source: &str, source_len: Option<u64>) -> io::Result<()> {
        writeln!(self.out, "Decoding: {source}")?;
        match source_len {
            Some(len) => writeln!(self.out, "Size: {len} bytes")?,
            None => writeln!(self.out, "Size: unknown")?,
        }
        writeln!(self.out, "{RULE}")?;
        writeln!(self.out)
    }

    pub fn message(&mut self, message: &DecodedMessage) -> io::Result<()> {
        let header = &message.header;
        writeln!(
            self.out,
            "=== Message #{} (offset: 0x{:08X}) ===",
            message.index + 1,
            message.offset
        )?;
        writeln!(self.out, "API header:")?;
        writeln!(self.out, "  API_ID: {}", header.type_tag)?;
        writeln!(
            self.out,
            "  API size: {} words = {} bytes",
            header.payload_words,
            header.declared_payload_bytes()
        )?;
        writeln!(self.out, "  API handle: 0x{:016X}", header.handle)?;
        writeln!(self.out, "  API sequence: {}", header.sequence)?;
        writeln!(self.out, "  Duration: {}", header.duration)?;
        writeln!(self.out, "  Result: {}", header.result)?;

        if message.payload_len == 0 {
            writeln!(self.out, ">>> No payload data")?;
        } else {
            match &message.payload {
                Some(Payload::Unknown(opaque)) => self.unknown(opaque)?,
                payload => {
                    writeln!(self.out, ">>> {} payload:", header.type_tag.name())?;
                    match payload {
                        Some(Payload::LoadLibrary(record) | Payload::UnloadLibrary(record)) => {
                            self.library(record)?
                        }
                        Some(Payload::GetFunction(record)) => self.get_function(record)?,
                        Some(Payload::LaunchFunction(record)) => self.launch_function(record)?,
                        _ => writeln!(self.out, "  (no fields decoded)")?,
                    }
                }
            }
        }

        for warning in &message.warnings {
            writeln!(self.out, "  warning: {warning}")?;
        }
        writeln!(self.out, "Processed so far: {} bytes", message.end_offset())?;
        writeln!(self.out)
    }

    pub fn summary(&mut self, report: &DecodeReport) -> io::Result<()> {
        for warning in &report.stream_warnings {
            writeln!(self.out, "warning: {warning}")?;
        }
        writeln!(self.out, "{RULE}")?;
        writeln!(
            self.out,
            "Decode complete: {} messages",
            report.message_count()
        )?;

        let total = report.source_len.unwrap_or(report.bytes_available);
        let percent = if total == 0 {
            100.0
        } else {
            report.bytes_consumed as f64 / total as f64 * 100.0
        };
        writeln!(
            self.out,
            "Bytes processed: {}/{} ({:.1}%)",
            report.bytes_consumed, total, percent
        )?;
        if let Some(reason) = report.halt_reason {
            writeln!(self.out, "Stopped: {reason}")?;
        }
        writeln!(self.out, "Warnings: {}", report.warning_count())
    }

    fn library(&mut self, record: &LibraryRecord) -> io::Result<()> {
        writeln!(self.out, "  Library path pointer: 0x{:016X}", record.library_path)?;
        writeln!(self.out, "  Library address pointer: 0x{:016X}", record.library_addr)?;
        writeln!(self.out, "  Size: {}", record.size)?;
        if let Some(detail) = &record.detail {
            writeln!(
                self.out,
                "  Library name: \"{}\"",
                escape_name(detail.name.as_bytes())
            )?;
            writeln!(self.out, "  MD5: {}", hex_preview(detail.md5.as_bytes()))?;
            writeln!(self.out, "  Current record: {}", detail.cur_rec)?;
        }
        Ok(())
    }

    fn get_function(&mut self, record: &GetFunction) -> io::Result<()> {
        writeln!(self.out, "  Core ID: {}", record.core_id)?;
        writeln!(self.out, "  Function ID: {}", record.function_id)?;
        writeln!(self.out, "  MD5: {}", hex_preview(record.md5.as_bytes()))?;
        writeln!(
            self.out,
            "  Function name: \"{}\"",
            escape_name(record.name.as_bytes())
        )
    }

    fn launch_function(&mut self, record: &LaunchFunction) -> io::Result<()> {
        writeln!(self.out, "  Function ID: {}", record.function_id)?;
        writeln!(self.out, "  Parameter size: {} bytes", record.declared_param_size)?;
        writeln!(
            self.out,
            "  Available parameter data: {} bytes",
            record.available_param_bytes
        )?;
        if record.available_param_bytes > 0 {
            writeln!(
                self.out,
                "  Parameter preview: {}",
                hex_preview(&record.param_preview)
            )?;
        }
        Ok(())
    }

    fn unknown(&mut self, opaque: &OpaquePayload) -> io::Result<()> {
        writeln!(self.out, ">>> Unknown API type")?;
        writeln!(self.out, "  Raw payload: {}", hex_preview(&opaque.preview))
    }
}

/// Whole report as pretty-printed JSON
pub fn render_json<W: Write>(out: W, report: &DecodeReport) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(out, report)
}
