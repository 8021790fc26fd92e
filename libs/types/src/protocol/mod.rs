//! Protocol layer types
//!
//! Constants and enumerations, the message header, and the payload records.

pub mod constants;
pub mod message;
pub mod payload;

pub use constants::{ApiId, TypeTag, HEADER_SIZE};
pub use message::header::ApiHeader;
pub use payload::Payload;
