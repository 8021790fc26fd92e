//! # A53LITE API Wire Types
//!
//! Record types for the coprocessor command channel ("API") message stream:
//! the API id enumeration, the fixed message header and one record per
//! payload kind. These are plain data; the decoding rules that produce them
//! from raw bytes live in the `codec` crate.
//!
//! ## Byte Order
//!
//! Captures are read in the byte order of the producing platform. Nothing in
//! this crate converts between orders; the `fixtures` encoders write native
//! order as well, so a synthetic stream round-trips on the host that built it.
//!
//! ## Features
//!
//! - `fixtures`: wire encoders (`to_wire_bytes`) on the header and payload
//!   records, used to build synthetic capture streams for tests and benches.

pub mod common;
pub mod protocol;

pub use common::fixed::{FixedName, Md5Digest};
pub use protocol::constants::*;
pub use protocol::message::header::ApiHeader;
pub use protocol::payload::{
    GetFunction, LaunchFunction, LibraryDetail, LibraryRecord, OpaquePayload, Payload,
};
