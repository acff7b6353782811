//! `AwsChunkedWrapper`: frames a byte source as aws-chunked, with checksum trailers.

use std::io::{self, Read, Seek, SeekFrom};

use super::framing;
use crate::checksum::Checksum;
use crate::config::DEFAULT_CHUNK_SIZE;
use crate::error::ChecksumError;

/// Encoder progress. Each state is left exactly once per pass over the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EncodeState {
    Streaming,
    FinalChunkSent,
    TrailerSent,
    Done,
}

#[derive(Debug)]
struct TrailerChecksum {
    name: String,
    checksum: Checksum,
}

/// Reads a source and yields its aws-chunked encoding.
///
/// Each read of the source becomes one chunk whose length is the number of
/// bytes that read actually returned. Trailer checksums cover the payload
/// bytes only, never the framing. The encoding can be replayed from the start
/// when the source is seekable; no other seek is possible.
#[derive(Debug)]
pub struct AwsChunkedWrapper<R> {
    raw: R,
    chunk_size: usize,
    trailers: Vec<TrailerChecksum>,
    state: EncodeState,
    read_buf: Vec<u8>,
    frame: Vec<u8>,
    pos: usize,
}

impl<R: Read> AwsChunkedWrapper<R> {
    pub fn new(raw: R) -> Self {
        Self {
            raw,
            chunk_size: DEFAULT_CHUNK_SIZE,
            trailers: Vec::new(),
            state: EncodeState::Streaming,
            read_buf: Vec::new(),
            frame: Vec::new(),
            pos: 0,
        }
    }

    /// Payload bytes requested from the source per chunk (at least 1).
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Adds a `<name>:<base64 digest>` trailer computed over the payload.
    pub fn with_trailer_checksum(mut self, name: impl Into<String>, checksum: Checksum) -> Self {
        self.trailers.push(TrailerChecksum {
            name: name.into(),
            checksum,
        });
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn trailer_names(&self) -> impl Iterator<Item = &str> {
        self.trailers.iter().map(|t| t.name.as_str())
    }

    /// Encoded length for a source of `content_len` bytes read in full chunks.
    pub fn encoded_length(&self, content_len: u64) -> u64 {
        let trailers: Vec<_> = self
            .trailers
            .iter()
            .map(|t| (t.name.as_str(), t.checksum.algorithm()))
            .collect();
        framing::encoded_length(content_len, self.chunk_size, &trailers)
    }

    /// Iterates the remaining encoding one frame at a time. The terminal
    /// chunk, trailers and closing CRLF come out as a single last frame.
    pub fn frames(&mut self) -> Frames<'_, R> {
        Frames { wrapper: self }
    }

    pub fn into_inner(self) -> R {
        self.raw
    }

    fn read_source(&mut self) -> io::Result<usize> {
        if self.read_buf.len() != self.chunk_size {
            self.read_buf.resize(self.chunk_size, 0);
        }
        loop {
            match self.raw.read(&mut self.read_buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }

    fn next_frame(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut frame = Vec::new();
        loop {
            match self.state {
                EncodeState::Streaming => {
                    let n = self.read_source()?;
                    if n > 0 {
                        let payload = &self.read_buf[..n];
                        for trailer in &mut self.trailers {
                            trailer.checksum.update(payload);
                        }
                        framing::push_chunk(&mut frame, payload);
                        tracing::trace!(len = n, "aws-chunked chunk");
                        return Ok(Some(frame));
                    }
                    framing::push_final_chunk(&mut frame);
                    self.state = EncodeState::FinalChunkSent;
                }
                EncodeState::FinalChunkSent => {
                    for trailer in &self.trailers {
                        framing::push_trailer(
                            &mut frame,
                            &trailer.name,
                            &trailer.checksum.base64_digest(),
                        );
                    }
                    self.state = EncodeState::TrailerSent;
                }
                EncodeState::TrailerSent => {
                    framing::push_end(&mut frame);
                    self.state = EncodeState::Done;
                    return Ok(Some(frame));
                }
                EncodeState::Done => return Ok(None),
            }
        }
    }
}

impl<R: Read + Seek> AwsChunkedWrapper<R> {
    /// Rewinds the source and restarts the encoding and all trailer checksums.
    pub fn reset(&mut self) -> io::Result<()> {
        self.raw.seek(SeekFrom::Start(0))?;
        for trailer in &mut self.trailers {
            trailer.checksum.reset();
        }
        self.state = EncodeState::Streaming;
        self.frame.clear();
        self.pos = 0;
        tracing::debug!("aws-chunked body reset to start");
        Ok(())
    }
}

impl<R: Read> Read for AwsChunkedWrapper<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pos >= self.frame.len() {
            match self.next_frame()? {
                Some(frame) => {
                    self.frame = frame;
                    self.pos = 0;
                }
                None => return Ok(0),
            }
        }
        let n = buf.len().min(self.frame.len() - self.pos);
        buf[..n].copy_from_slice(&self.frame[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

impl<R: Read + Seek> Seek for AwsChunkedWrapper<R> {
    /// Only `SeekFrom::Start(0)` is accepted.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match pos {
            SeekFrom::Start(0) => {
                self.reset()?;
                Ok(0)
            }
            _ => Err(ChecksumError::InvalidSeek.into()),
        }
    }
}

/// Frame iterator returned by [`AwsChunkedWrapper::frames`].
pub struct Frames<'a, R> {
    wrapper: &'a mut AwsChunkedWrapper<R>,
}

impl<R: Read> Iterator for Frames<'_, R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let w = &mut *self.wrapper;
        // Hand out whatever a previous partial `read` left behind first.
        if w.pos < w.frame.len() {
            let rest = w.frame.split_off(w.pos);
            w.frame.clear();
            w.pos = 0;
            return Some(Ok(rest));
        }
        w.next_frame().transpose()
    }
}
