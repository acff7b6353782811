//! Byte sources that never fill the caller's buffer, for exercising short reads.

use std::io::{self, Read};

/// Returns at most `limit` bytes per read, whatever the buffer size.
pub struct ChunkLimitedReader {
    data: Vec<u8>,
    pos: usize,
    limit: usize,
}

impl ChunkLimitedReader {
    pub fn new(data: Vec<u8>, limit: usize) -> Self {
        Self {
            data,
            pos: 0,
            limit: limit.max(1),
        }
    }
}

impl Read for ChunkLimitedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.limit).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Returns one byte less than requested (zero for a one-byte request would
/// look like end of stream, so it returns one then).
pub struct OneLessReader {
    data: Vec<u8>,
    pos: usize,
}

impl OneLessReader {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }
}

impl Read for OneLessReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let want = buf.len().saturating_sub(1).max(1).min(buf.len());
        let n = want.min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
