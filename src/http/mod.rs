//! Minimal request/response types the checksum stages operate on.

mod body;
mod headers;
mod request;
mod response;

pub use body::{Body, BoxRead, ResponseBody};
pub use headers::Headers;
pub use request::HttpRequest;
pub use response::HttpResponse;
