//! Flexible request/response checksums for HTTP API clients.
//!
//! A call goes through two stages on each side:
//!
//! 1. [`resolve`] decides, before anything is sent, which algorithm protects
//!    the request body and where the checksum travels (a header, or an
//!    aws-chunked trailer), and which algorithms the response may be checked with.
//! 2. [`apply`] writes that decision onto the outgoing request and validates
//!    the response body, eagerly for buffered bodies and at end of stream for
//!    streamed ones.

pub mod apply;
pub mod aws_chunked;
pub mod checksum;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod logging;
pub mod model;
pub mod resolve;
pub mod streaming;

pub use apply::{apply_request_checksum, handle_checksum_body};
pub use aws_chunked::AwsChunkedWrapper;
pub use checksum::{Checksum, ChecksumAlgorithm, ChecksumRegistry};
pub use config::ChecksumConfig;
pub use context::{ChecksumContext, ChecksumLocation, RequestContext, ResponseContext};
pub use error::{ChecksumError, Result};
pub use model::{HttpChecksum, OperationModel};
pub use resolve::{
    resolve_request_checksum, resolve_response_checksum, set_default_checksum_mode, CallerParams,
};
pub use streaming::StreamingChecksumBody;
