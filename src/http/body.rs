//! Request and response bodies as seen by the checksum pipeline.

use std::fmt;
use std::io::{self, Cursor, Read};

use crate::aws_chunked::AwsChunkedWrapper;
use crate::streaming::StreamingChecksumBody;

/// Boxed byte source used for streamed bodies.
pub type BoxRead = Box<dyn Read + Send>;

/// Outgoing request body.
#[derive(Default)]
pub enum Body {
    #[default]
    Empty,
    /// Fully in memory; its length is known.
    Bytes(Vec<u8>),
    /// Streamed from a reader of unknown length.
    Stream(BoxRead),
    /// Streamed body re-framed as aws-chunked with checksum trailers.
    AwsChunked(AwsChunkedWrapper<BoxRead>),
}

impl Body {
    pub fn stream(reader: impl Read + Send + 'static) -> Self {
        Body::Stream(Box::new(reader))
    }

    /// True for bodies read from a stream rather than held in memory.
    pub fn is_stream(&self) -> bool {
        matches!(self, Body::Stream(_) | Body::AwsChunked(_))
    }

    /// Payload length when it is known without reading.
    pub fn known_length(&self) -> Option<u64> {
        match self {
            Body::Empty => Some(0),
            Body::Bytes(b) => Some(b.len() as u64),
            Body::Stream(_) | Body::AwsChunked(_) => None,
        }
    }

    /// Reads a streamed body fully into memory and returns the bytes.
    /// A body that is already in memory is returned as is. An aws-chunked
    /// body is rejected: its bytes are framing, not payload.
    pub fn buffer(&mut self) -> io::Result<&[u8]> {
        if let Body::AwsChunked(_) = self {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "aws-chunked body cannot be buffered as payload",
            ));
        }
        if let Body::Stream(r) = self {
            let mut out = Vec::new();
            r.read_to_end(&mut out)?;
            *self = Body::Bytes(out);
        }
        match self {
            Body::Bytes(b) => Ok(b.as_slice()),
            _ => Ok(&[]),
        }
    }

    /// Turns the body into a single reader, consuming it.
    pub fn into_reader(self) -> BoxRead {
        match self {
            Body::Empty => Box::new(io::empty()),
            Body::Bytes(b) => Box::new(Cursor::new(b)),
            Body::Stream(r) => r,
            Body::AwsChunked(w) => Box::new(w),
        }
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body::Bytes(bytes.to_vec())
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Bytes(text.as_bytes().to_vec())
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Empty => f.write_str("Body::Empty"),
            Body::Bytes(b) => write!(f, "Body::Bytes({} bytes)", b.len()),
            Body::Stream(_) => f.write_str("Body::Stream"),
            Body::AwsChunked(w) => write!(f, "Body::AwsChunked(chunk_size={})", w.chunk_size()),
        }
    }
}

/// Incoming response body.
#[derive(Default)]
pub enum ResponseBody {
    #[default]
    Empty,
    Bytes(Vec<u8>),
    Stream(BoxRead),
    /// Streamed body that validates its checksum when fully read.
    Validating(StreamingChecksumBody<BoxRead>),
}

impl ResponseBody {
    pub fn stream(reader: impl Read + Send + 'static) -> Self {
        ResponseBody::Stream(Box::new(reader))
    }

    pub fn is_validating(&self) -> bool {
        matches!(self, ResponseBody::Validating(_))
    }

    /// Buffered bytes, when the body is held in memory.
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            ResponseBody::Empty => Some(&[]),
            ResponseBody::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn into_reader(self) -> BoxRead {
        match self {
            ResponseBody::Empty => Box::new(io::empty()),
            ResponseBody::Bytes(b) => Box::new(Cursor::new(b)),
            ResponseBody::Stream(r) => r,
            ResponseBody::Validating(v) => Box::new(v),
        }
    }

    /// Reads the rest of the body; a validating body reports its mismatch here.
    pub fn read_to_vec(self) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        self.into_reader().read_to_end(&mut out)?;
        Ok(out)
    }
}

impl From<Vec<u8>> for ResponseBody {
    fn from(bytes: Vec<u8>) -> Self {
        ResponseBody::Bytes(bytes)
    }
}

impl From<&str> for ResponseBody {
    fn from(text: &str) -> Self {
        ResponseBody::Bytes(text.as_bytes().to_vec())
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Empty => f.write_str("ResponseBody::Empty"),
            ResponseBody::Bytes(b) => write!(f, "ResponseBody::Bytes({} bytes)", b.len()),
            ResponseBody::Stream(_) => f.write_str("ResponseBody::Stream"),
            ResponseBody::Validating(v) => {
                write!(f, "ResponseBody::Validating({})", v.algorithm())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_drains_stream() {
        let mut body = Body::stream(Cursor::new(b"hello world".to_vec()));
        assert!(body.is_stream());
        assert_eq!(body.known_length(), None);
        assert_eq!(body.buffer().unwrap(), b"hello world");
        assert!(!body.is_stream());
        assert_eq!(body.known_length(), Some(11));
    }

    #[test]
    fn buffer_keeps_bytes() {
        let mut body = Body::from("abc");
        assert_eq!(body.buffer().unwrap(), b"abc");
        let mut empty = Body::Empty;
        assert!(empty.buffer().unwrap().is_empty());
    }

    #[test]
    fn buffer_rejects_aws_chunked() {
        let wrapper = AwsChunkedWrapper::new(Body::from("hello").into_reader());
        let mut body = Body::AwsChunked(wrapper);
        let err = body.buffer().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(matches!(body, Body::AwsChunked(_)));
    }

    #[test]
    fn response_body_reads_back() {
        let body = ResponseBody::stream(Cursor::new(b"xyz".to_vec()));
        assert!(body.bytes().is_none());
        assert_eq!(body.read_to_vec().unwrap(), b"xyz");
        assert_eq!(ResponseBody::from("q").bytes(), Some(&b"q"[..]));
    }
}
