//! # Byte Sources
//!
//! The one capability the stream decoder needs from its environment: "read up
//! to N bytes and say how many you got", with end-of-data kept distinct from a
//! read that simply found nothing yet (a socket or shared-memory ring that the
//! producer has not caught up on).

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Outcome of a single source read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// `n` bytes were written to the front of the buffer; `n >= 1` unless the
    /// buffer was empty
    Filled(usize),
    /// Nothing available right now; more may arrive later
    WouldBlock,
    /// The source is exhausted
    EndOfData,
}

/// Pull interface the stream decoder reads from
pub trait ByteSource {
    /// Read up to `buf.len()` bytes into `buf`
    fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<ReadStatus>;

    /// Total length of the source when it is known up front
    fn size_hint(&self) -> Option<u64> {
        None
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<ReadStatus> {
        (**self).read_up_to(buf)
    }

    fn size_hint(&self) -> Option<u64> {
        (**self).size_hint()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for Box<S> {
    fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<ReadStatus> {
        (**self).read_up_to(buf)
    }

    fn size_hint(&self) -> Option<u64> {
        (**self).size_hint()
    }
}

/// In-memory capture
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }
}

impl ByteSource for SliceSource<'_> {
    fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<ReadStatus> {
        if buf.is_empty() {
            return Ok(ReadStatus::Filled(0));
        }
        let n = buf.len().min(self.remaining());
        if n == 0 {
            return Ok(ReadStatus::EndOfData);
        }
        buf[..n].copy_from_slice(&self.bytes[self.position..self.position + n]);
        self.position += n;
        Ok(ReadStatus::Filled(n))
    }

    fn size_hint(&self) -> Option<u64> {
        Some(self.bytes.len() as u64)
    }
}

/// Adapter for any [`Read`]: files, pipes, sockets
///
/// `Ok(0)` is end of data, `WouldBlock` maps to [`ReadStatus::WouldBlock`] and
/// `Interrupted` reads are retried.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
    len: Option<u64>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, len: None }
    }

    /// Attach a known total length, reported through `size_hint`
    pub fn with_len(mut self, len: u64) -> Self {
        self.len = Some(len);
        self
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl ReaderSource<BufReader<File>> {
    /// Open a capture file
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        Ok(Self::new(BufReader::new(file)).with_len(len))
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<ReadStatus> {
        if buf.is_empty() {
            return Ok(ReadStatus::Filled(0));
        }
        loop {
            match self.inner.read(buf) {
                Ok(0) => return Ok(ReadStatus::EndOfData),
                Ok(n) => return Ok(ReadStatus::Filled(n)),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    return Ok(ReadStatus::WouldBlock)
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn size_hint(&self) -> Option<u64> {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    /// Reader that replays a fixed script of results
    struct Scripted(Vec<io::Result<Vec<u8>>>);

    impl Read for Scripted {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() {
                return Ok(0);
            }
            let chunk = self.0.remove(0)?;
            buf[..chunk.len()].copy_from_slice(&chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn test_slice_source_reads_then_ends() {
        let data = [1u8, 2, 3, 4, 5];
        let mut source = SliceSource::new(&data);
        let mut buf = [0u8; 3];

        assert_eq!(source.read_up_to(&mut buf).unwrap(), ReadStatus::Filled(3));
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(source.read_up_to(&mut buf).unwrap(), ReadStatus::Filled(2));
        assert_eq!(&buf[..2], &[4, 5]);
        assert_eq!(source.read_up_to(&mut buf).unwrap(), ReadStatus::EndOfData);
        assert_eq!(source.size_hint(), Some(5));
    }

    #[test]
    fn test_empty_buffer_fills_nothing() {
        let data = [1u8, 2];
        let mut slice = SliceSource::new(&data);
        let mut reader = ReaderSource::new(Cursor::new(vec![1u8, 2]));

        assert_eq!(slice.read_up_to(&mut []).unwrap(), ReadStatus::Filled(0));
        assert_eq!(reader.read_up_to(&mut []).unwrap(), ReadStatus::Filled(0));
        assert_eq!(slice.remaining(), 2);

        let mut rest = [0u8; 4];
        slice.read_up_to(&mut rest).unwrap();
        assert_eq!(slice.read_up_to(&mut []).unwrap(), ReadStatus::Filled(0));
        assert_eq!(slice.read_up_to(&mut rest).unwrap(), ReadStatus::EndOfData);
    }

    #[test]
    fn test_reader_source_maps_statuses() {
        let mut source = ReaderSource::new(Scripted(vec![
            Ok(vec![9, 9]),
            Err(io::Error::from(io::ErrorKind::Interrupted)),
            Ok(vec![8]),
            Err(io::Error::from(io::ErrorKind::WouldBlock)),
            Err(io::Error::new(io::ErrorKind::Other, "medium unreadable")),
        ]));
        let mut buf = [0u8; 4];

        assert_eq!(source.read_up_to(&mut buf).unwrap(), ReadStatus::Filled(2));
        // Interrupted is retried transparently
        assert_eq!(source.read_up_to(&mut buf).unwrap(), ReadStatus::Filled(1));
        assert_eq!(source.read_up_to(&mut buf).unwrap(), ReadStatus::WouldBlock);
        assert!(source.read_up_to(&mut buf).is_err());
        assert_eq!(source.read_up_to(&mut buf).unwrap(), ReadStatus::EndOfData);
    }

    #[test]
    fn test_reader_source_over_cursor() {
        let mut source = ReaderSource::new(Cursor::new(vec![1u8, 2, 3])).with_len(3);
        let mut buf = [0u8; 8];
        assert_eq!(source.read_up_to(&mut buf).unwrap(), ReadStatus::Filled(3));
        assert_eq!(source.read_up_to(&mut buf).unwrap(), ReadStatus::EndOfData);
        assert_eq!(source.size_hint(), Some(3));
    }

    #[test]
    fn test_open_file_reports_length() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 40]).unwrap();
        file.flush().unwrap();

        let source = ReaderSource::open(file.path()).unwrap();
        assert_eq!(source.size_hint(), Some(40));
    }

    fn read_once<S: ByteSource>(mut source: S, buf: &mut [u8]) -> ReadStatus {
        source.read_up_to(buf).unwrap()
    }

    #[test]
    fn test_mut_ref_is_a_source() {
        let data = [7u8; 2];
        let mut inner = SliceSource::new(&data);
        let mut buf = [0u8; 2];
        assert_eq!(read_once(&mut inner, &mut buf), ReadStatus::Filled(2));
        assert_eq!(inner.remaining(), 0);
    }
}
