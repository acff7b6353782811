//! Outgoing request handed through the checksum pipeline.

use url::Url;

use super::body::Body;
use super::headers::Headers;
use crate::context::RequestContext;

#[derive(Debug)]
pub struct HttpRequest {
    pub method: String,
    pub url: Url,
    pub headers: Headers,
    pub body: Body,
    pub context: RequestContext,
}

impl HttpRequest {
    pub fn new(method: impl Into<String>, url: Url) -> Self {
        Self {
            method: method.into(),
            url,
            headers: Headers::new(),
            body: Body::Empty,
            context: RequestContext::default(),
        }
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Endpoint reached over TLS.
    pub fn is_https(&self) -> bool {
        self.url.scheme().eq_ignore_ascii_case("https")
    }
}
