//! Per-operation checksum metadata, as found in service models.
//!
//! ```json
//! {
//!   "name": "PutObject",
//!   "httpChecksum": {
//!     "requestAlgorithmMember": "ChecksumAlgorithm",
//!     "requestChecksumRequired": false,
//!     "responseAlgorithms": ["CRC32", "CRC32C", "SHA1", "SHA256"],
//!     "requestValidationModeMember": "ChecksumMode"
//!   },
//!   "hasStreamingInput": true
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::context::REQUEST_ALGORITHM_HEADER;

/// The `httpChecksum` trait of an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpChecksum {
    /// Caller parameter that selects the request algorithm.
    pub request_algorithm_member: Option<String>,
    /// Serialized header name of that parameter, when the model carries one.
    pub request_algorithm_header: Option<String>,
    /// Force a default checksum when the caller picks no algorithm.
    pub request_checksum_required: bool,
    /// Algorithms the service may attach to the response, in preference order.
    /// Kept as written in the model; unknown names are dropped at resolve time.
    pub response_algorithms: Vec<String>,
    /// Caller parameter that opts into response validation.
    pub request_validation_mode_member: Option<String>,
}

/// Checksum-relevant view of one API operation. Immutable for the call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationModel {
    pub name: String,
    pub http_checksum: Option<HttpChecksum>,
    /// Legacy `httpChecksumRequired` trait.
    pub http_checksum_required: bool,
    pub has_streaming_input: bool,
    pub has_streaming_output: bool,
}

impl OperationModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse one operation from service-model JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_http_checksum(mut self, http_checksum: HttpChecksum) -> Self {
        self.http_checksum = Some(http_checksum);
        self
    }

    pub fn with_streaming_input(mut self) -> Self {
        self.has_streaming_input = true;
        self
    }

    pub fn with_streaming_output(mut self) -> Self {
        self.has_streaming_output = true;
        self
    }

    /// Either the legacy trait or `requestChecksumRequired` demands a checksum.
    pub fn request_checksum_required(&self) -> bool {
        self.http_checksum_required
            || self
                .http_checksum
                .as_ref()
                .is_some_and(|hc| hc.request_checksum_required)
    }

    pub fn request_algorithm_member(&self) -> Option<&str> {
        self.http_checksum
            .as_ref()
            .and_then(|hc| hc.request_algorithm_member.as_deref())
    }

    /// Companion header name: model-provided, or `x-amz-request-algorithm`.
    pub fn request_algorithm_header(&self) -> &str {
        self.http_checksum
            .as_ref()
            .and_then(|hc| hc.request_algorithm_header.as_deref())
            .unwrap_or(REQUEST_ALGORITHM_HEADER)
    }

    pub fn request_validation_mode_member(&self) -> Option<&str> {
        self.http_checksum
            .as_ref()
            .and_then(|hc| hc.request_validation_mode_member.as_deref())
    }

    pub fn response_algorithms(&self) -> &[String] {
        self.http_checksum
            .as_ref()
            .map(|hc| hc.response_algorithms.as_slice())
            .unwrap_or_default()
    }
}
