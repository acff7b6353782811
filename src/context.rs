//! Per-request side channel between the resolver and the applicator.
//!
//! Created fresh for each request and dropped with it; nothing here is shared.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::checksum::ChecksumAlgorithm;
use crate::config::ChecksumConfig;
use crate::error::ChecksumError;

/// Default name of the request-algorithm companion header.
pub const REQUEST_ALGORITHM_HEADER: &str = "x-amz-request-algorithm";

/// Where a request checksum is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChecksumLocation {
    /// Computed up front and sent as a header.
    Header,
    /// Computed while streaming and sent as an aws-chunked trailer.
    Trailer,
}

impl ChecksumLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumLocation::Header => "header",
            ChecksumLocation::Trailer => "trailer",
        }
    }
}

impl fmt::Display for ChecksumLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChecksumLocation {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(ChecksumLocation::Header),
            "trailer" => Ok(ChecksumLocation::Trailer),
            other => Err(ChecksumError::InvalidLocation {
                location: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ChecksumLocation {
    type Error = ChecksumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChecksumLocation> for String {
    fn from(location: ChecksumLocation) -> Self {
        location.as_str().to_string()
    }
}

/// Resolved request checksum: algorithm, placement and target header/trailer name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumAlgorithmSpec {
    pub algorithm: ChecksumAlgorithm,
    pub location: ChecksumLocation,
    pub name: String,
}

impl ChecksumAlgorithmSpec {
    /// Placement decision whose header name follows the algorithm.
    pub fn new(algorithm: ChecksumAlgorithm, location: ChecksumLocation) -> Self {
        Self {
            algorithm,
            location,
            name: algorithm.header_name(),
        }
    }
}

/// Companion header telling the receiver which algorithm was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestAlgorithmHeader {
    pub name: String,
    pub value: String,
}

/// Checksum decisions recorded by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumContext {
    pub request_algorithm: Option<ChecksumAlgorithmSpec>,
    pub request_algorithm_header: Option<RequestAlgorithmHeader>,
    /// Ordered candidates for response validation.
    pub response_algorithms: Option<Vec<ChecksumAlgorithm>>,
}

impl ChecksumContext {
    pub fn is_empty(&self) -> bool {
        self.request_algorithm.is_none()
            && self.request_algorithm_header.is_none()
            && self.response_algorithms.is_none()
    }
}

/// Ambient state of one in-flight request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub client_config: ChecksumConfig,
    pub is_presign_request: bool,
    pub checksum: ChecksumContext,
}

impl RequestContext {
    pub fn new(client_config: ChecksumConfig) -> Self {
        Self {
            client_config,
            ..Self::default()
        }
    }
}

/// Ambient state of one response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseContext {
    /// Algorithm actually used to validate the body, if any.
    pub response_algorithm: Option<ChecksumAlgorithm>,
}
