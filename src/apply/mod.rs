//! Checksum policy application.
//!
//! The request side turns the resolver's decision into headers or an
//! aws-chunked body; the response side checks the body against whichever
//! checksum header the service returned.

mod request;
mod response;

#[cfg(test)]
mod tests;

pub use request::apply_request_checksum;
pub use response::handle_checksum_body;

pub const TRANSFER_ENCODING: &str = "Transfer-Encoding";
pub const CONTENT_ENCODING: &str = "Content-Encoding";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const AMZ_TRAILER: &str = "X-Amz-Trailer";
pub const AMZ_DECODED_CONTENT_LENGTH: &str = "X-Amz-Decoded-Content-Length";
