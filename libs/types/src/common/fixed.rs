//! Fixed-width byte fields
//!
//! Name fields on the wire are fixed-width and *usually* NUL-terminated. The
//! producer does not guarantee the terminator, so the content is "bytes up to
//! the first NUL or the field boundary, whichever comes first". Bytes are kept
//! raw; escaping for display is left to the presentation layer.

use crate::protocol::constants::MD5SUM_LEN;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Name decoded from an `N`-byte field
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedName<const N: usize> {
    /// Content length (bytes before the first NUL, or `N`)
    len: usize,

    /// Field bytes; everything past `len` is zero
    data: [u8; N],
}

impl<const N: usize> FixedName<N> {
    /// Width of the wire field
    pub const WIDTH: usize = N;

    /// Scan a name field
    ///
    /// Input longer than `N` is cut at the field width, so callers may pass the
    /// remainder of a payload without slicing first.
    pub fn from_field(field: &[u8]) -> Self {
        let field = &field[..field.len().min(N)];
        let len = field.iter().position(|&b| b == 0).unwrap_or(field.len());

        let mut data = [0u8; N];
        data[..len].copy_from_slice(&field[..len]);
        Self { len, data }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when the field carried no terminator and fills its full width
    pub fn is_unterminated(&self) -> bool {
        self.len == N
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Zero-padded wire field
    #[cfg(feature = "fixtures")]
    pub fn to_field(&self) -> [u8; N] {
        self.data
    }
}

impl<const N: usize> Default for FixedName<N> {
    fn default() -> Self {
        Self {
            len: 0,
            data: [0u8; N],
        }
    }
}

impl<const N: usize> fmt::Debug for FixedName<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedName<{N}>(\"{}\")", self.as_bytes().escape_ascii())
    }
}

impl<const N: usize> Serialize for FixedName<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.as_bytes().escape_ascii())
    }
}

/// 16-byte MD5 checksum carried in library and function payloads
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Md5Digest(pub [u8; MD5SUM_LEN]);

impl Md5Digest {
    pub fn as_bytes(&self) -> &[u8; MD5SUM_LEN] {
        &self.0
    }

    /// Upper-case hex, matching producer-side tooling
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

impl fmt::Display for Md5Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Md5Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Md5Digest({})", self.to_hex())
    }
}

impl Serialize for Md5Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
