//! Error type shared by the resolver, the applicator and the stream wrappers.
//!
//! The stream wrappers implement `std::io::Read`, so their failures travel as
//! `io::Error`. The crate error rides inside as the inner error and can be
//! recovered with [`ChecksumError::from_io`].

use std::io;

use crate::checksum::ChecksumAlgorithm;

/// Errors raised while resolving, applying or validating flexible checksums.
#[derive(Debug, thiserror::Error)]
pub enum ChecksumError {
    /// Caller or server named an algorithm outside the supported set.
    #[error("unsupported checksum algorithm: {algorithm}")]
    UnsupportedAlgorithm { algorithm: String },

    /// The algorithm needs the accelerated backend, which is not available.
    #[error(
        "using {} requires an additional dependency; enable the `accelerated` feature of flexsum",
        .algorithm.as_upper_str()
    )]
    MissingDependency { algorithm: ChecksumAlgorithm },

    /// A checksum placement other than `header` or `trailer`.
    #[error("unknown checksum location: {location}")]
    InvalidLocation { location: String },

    /// Computed digest does not match the expected one.
    #[error("expected {algorithm} checksum {expected} did not match calculated checksum {actual}")]
    ValidationFailed {
        algorithm: ChecksumAlgorithm,
        expected: String,
        actual: String,
    },

    /// aws-chunked bodies can only be rewound to their start.
    #[error("aws-chunked body can only seek to the start of the stream")]
    InvalidSeek,

    /// The wrapped byte source failed.
    #[error(transparent)]
    Io(io::Error),
}

pub type Result<T> = std::result::Result<T, ChecksumError>;

impl ChecksumError {
    /// Returns the crate error carried inside an `io::Error` produced by one of
    /// the stream wrappers, if any.
    pub fn from_io(err: &io::Error) -> Option<&ChecksumError> {
        err.get_ref()
            .and_then(|inner| inner.downcast_ref::<ChecksumError>())
    }

    fn io_kind(&self) -> io::ErrorKind {
        match self {
            ChecksumError::ValidationFailed { .. } => io::ErrorKind::InvalidData,
            ChecksumError::InvalidSeek => io::ErrorKind::Unsupported,
            ChecksumError::Io(e) => e.kind(),
            _ => io::ErrorKind::Other,
        }
    }
}

impl From<io::Error> for ChecksumError {
    fn from(err: io::Error) -> Self {
        // Unwrap errors we produced ourselves instead of nesting them.
        if ChecksumError::from_io(&err).is_none() {
            return ChecksumError::Io(err);
        }
        let kind = err.kind();
        match err.into_inner().map(|inner| inner.downcast::<ChecksumError>()) {
            Some(Ok(own)) => *own,
            _ => ChecksumError::Io(kind.into()),
        }
    }
}

impl From<ChecksumError> for io::Error {
    fn from(err: ChecksumError) -> Self {
        match err {
            ChecksumError::Io(e) => e,
            other => io::Error::new(other.io_kind(), other),
        }
    }
}
