//! Common field types shared by several payload records

pub mod fixed;

pub use fixed::{FixedName, Md5Digest};
