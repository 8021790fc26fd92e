//! # A53LITE API Stream Codec
//!
//! ## Purpose
//!
//! Decoding rules for captured coprocessor command channel traffic. Given a
//! byte source holding a sequence of `header + payload` messages, rebuild the
//! messages with strongly typed payload records, tolerating captures that end
//! early or carry inconsistent length claims.
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [codec] → tools/apidump
//!     ↑           ↓             ↓
//! Record      Field reader,   Rendering,
//! types       decoders,       CLI
//!             stream loop
//! ```
//!
//! ## What This Crate Contains
//! - Field reader (`read_u32` and friends, `FieldCursor`)
//! - Header parser (`parse_header`)
//! - One payload decoder per message kind plus the opaque fallback
//! - `StreamDecoder`: the lazy driving loop over a `ByteSource`
//! - `DecodeReport` with byte accounting, warnings and halt reason
//! - `DecoderConfig` for preview sizes, parameter cap and retry policy
//!
//! ## What This Crate Does NOT Contain
//! - Message construction for live traffic
//! - Semantic checks on decoded values (addresses, ids, result codes)
//!
//! ## Examples
//!
//! ```rust,no_run
//! use codec::{DecoderConfig, ReaderSource, StreamDecoder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = ReaderSource::open("capture.bin")?;
//! let report = StreamDecoder::with_config(source, DecoderConfig::from_env()).finish()?;
//! println!(
//!     "{} messages, {}/{} bytes",
//!     report.message_count(),
//!     report.bytes_consumed,
//!     report.bytes_available
//! );
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod parser;
pub mod payload;
pub mod reader;
pub mod report;
pub mod source;
pub mod stream;
pub mod warning;

pub use config::DecoderConfig;
pub use error::{
    ConfigError, DecodeError, DecodeResult, IncompleteDecode, ProtocolError, ProtocolResult,
};
pub use parser::{parse_header, ParseResult};
pub use payload::{decode_payload, launch_params, Decoded};
pub use reader::{read_array, read_i32, read_slice, read_u32, read_u64, FieldCursor};
pub use report::{DecodeReport, DecodedMessage, HaltReason};
pub use source::{ByteSource, ReadStatus, ReaderSource, SliceSource};
pub use stream::{decode_bytes, decode_stream, DecoderState, StreamDecoder};
pub use warning::DecodeWarning;

pub use types;
