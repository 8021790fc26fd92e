//! Message envelope types

pub mod header;

pub use header::ApiHeader;
