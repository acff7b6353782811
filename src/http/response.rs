//! Incoming response handed through the checksum pipeline.

use super::body::ResponseBody;
use super::headers::Headers;
use crate::context::ResponseContext;

#[derive(Debug, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: ResponseBody,
    pub context: ResponseContext,
}

impl HttpResponse {
    pub fn new(status: u16, headers: Headers, body: impl Into<ResponseBody>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
            context: ResponseContext::default(),
        }
    }
}
