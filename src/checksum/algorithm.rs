//! The closed set of flexible checksum algorithms and their wire names.

use std::fmt;
use std::str::FromStr;

use crate::error::ChecksumError;

/// Prefix of every request/response checksum header.
pub const CHECKSUM_HEADER_PREFIX: &str = "x-amz-checksum-";

/// Algorithm used when the caller selects none but a checksum is due.
pub const DEFAULT_CHECKSUM_ALGORITHM: ChecksumAlgorithm = ChecksumAlgorithm::Crc32;

/// Flexible checksum algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChecksumAlgorithm {
    /// CRC-32 (IEEE 802.3), 4 bytes.
    Crc32,
    /// CRC-32C (Castagnoli), 4 bytes. Accelerated backend only.
    Crc32c,
    /// SHA-1, 20 bytes.
    Sha1,
    /// SHA-256, 32 bytes.
    Sha256,
    /// CRC-64/NVME, 8 bytes. Accelerated backend only.
    Crc64Nvme,
}

impl ChecksumAlgorithm {
    pub const ALL: [ChecksumAlgorithm; 5] = [
        ChecksumAlgorithm::Crc32,
        ChecksumAlgorithm::Crc32c,
        ChecksumAlgorithm::Sha1,
        ChecksumAlgorithm::Sha256,
        ChecksumAlgorithm::Crc64Nvme,
    ];

    /// Lowercase token used in header names and service models.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumAlgorithm::Crc32 => "crc32",
            ChecksumAlgorithm::Crc32c => "crc32c",
            ChecksumAlgorithm::Sha1 => "sha1",
            ChecksumAlgorithm::Sha256 => "sha256",
            ChecksumAlgorithm::Crc64Nvme => "crc64nvme",
        }
    }

    /// Uppercase token sent in the request-algorithm companion header.
    pub fn as_upper_str(&self) -> &'static str {
        match self {
            ChecksumAlgorithm::Crc32 => "CRC32",
            ChecksumAlgorithm::Crc32c => "CRC32C",
            ChecksumAlgorithm::Sha1 => "SHA1",
            ChecksumAlgorithm::Sha256 => "SHA256",
            ChecksumAlgorithm::Crc64Nvme => "CRC64NVME",
        }
    }

    /// Header carrying this algorithm's checksum, e.g. `x-amz-checksum-crc32`.
    pub fn header_name(&self) -> String {
        format!("{}{}", CHECKSUM_HEADER_PREFIX, self.as_str())
    }

    /// Width of the raw digest in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            ChecksumAlgorithm::Crc32 | ChecksumAlgorithm::Crc32c => 4,
            ChecksumAlgorithm::Sha1 => 20,
            ChecksumAlgorithm::Sha256 => 32,
            ChecksumAlgorithm::Crc64Nvme => 8,
        }
    }

    /// Length of the padded base64 text of the digest.
    pub fn base64_len(&self) -> usize {
        self.digest_len().div_ceil(3) * 4
    }

    /// True for algorithms that have no portable implementation.
    pub fn requires_accelerated(&self) -> bool {
        matches!(self, ChecksumAlgorithm::Crc32c | ChecksumAlgorithm::Crc64Nvme)
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_upper_str())
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = ChecksumError;

    /// Case-insensitive: service models use `CRC32`, callers often `crc32`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChecksumAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChecksumError::UnsupportedAlgorithm {
                algorithm: s.to_ascii_lowercase(),
            })
    }
}
