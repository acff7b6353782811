//! aws-chunked request body encoding.
//!
//! Lets a request carry its checksum as a trailer after a body of unknown
//! length, instead of a header that would need the whole body up front.

mod framing;
mod wrapper;


pub use framing::encoded_length;
pub use wrapper::{AwsChunkedWrapper, Frames};

/// `Content-Encoding` token announcing an aws-chunked body.
pub const AWS_CHUNKED_ENCODING: &str = "aws-chunked";
