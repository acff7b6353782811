//! Incremental checksum state.
//!
//! A [`Checksum`] is a tagged variant over the portable implementations and,
//! when compiled in, the accelerated CRC backend. Callers obtain one from the
//! registry rather than picking a backend themselves.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use sha1::Digest as _;

use super::algorithm::ChecksumAlgorithm;

/// Which implementation family backs a [`Checksum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Portable,
    Accelerated,
}

enum State {
    Crc32(crc32fast::Hasher),
    Sha1(sha1::Sha1),
    Sha256(sha2::Sha256),
    #[cfg(feature = "accelerated")]
    Accelerated(crc_fast::Digest),
}

/// Running checksum over a byte stream.
///
/// The result depends only on the cumulative bytes passed to [`update`](Self::update),
/// never on how they were split across calls.
pub struct Checksum {
    algorithm: ChecksumAlgorithm,
    backend: Backend,
    state: State,
}

impl std::fmt::Debug for Checksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checksum")
            .field("algorithm", &self.algorithm)
            .field("backend", &self.backend)
            .finish()
    }
}

impl Checksum {
    /// Portable implementation, if one exists for `algorithm`.
    pub(crate) fn portable(algorithm: ChecksumAlgorithm) -> Option<Self> {
        let state = match algorithm {
            ChecksumAlgorithm::Crc32 => State::Crc32(crc32fast::Hasher::new()),
            ChecksumAlgorithm::Sha1 => State::Sha1(sha1::Sha1::new()),
            ChecksumAlgorithm::Sha256 => State::Sha256(sha2::Sha256::new()),
            ChecksumAlgorithm::Crc32c | ChecksumAlgorithm::Crc64Nvme => return None,
        };
        Some(Self {
            algorithm,
            backend: Backend::Portable,
            state,
        })
    }

    /// Accelerated implementation, if compiled in and it covers `algorithm`.
    #[cfg(feature = "accelerated")]
    pub(crate) fn accelerated(algorithm: ChecksumAlgorithm) -> Option<Self> {
        use crc_fast::CrcAlgorithm;

        let crc = match algorithm {
            ChecksumAlgorithm::Crc32 => CrcAlgorithm::Crc32IsoHdlc,
            ChecksumAlgorithm::Crc32c => CrcAlgorithm::Crc32Iscsi,
            ChecksumAlgorithm::Crc64Nvme => CrcAlgorithm::Crc64Nvme,
            ChecksumAlgorithm::Sha1 | ChecksumAlgorithm::Sha256 => return None,
        };
        Some(Self {
            algorithm,
            backend: Backend::Accelerated,
            state: State::Accelerated(crc_fast::Digest::new(crc)),
        })
    }

    #[cfg(not(feature = "accelerated"))]
    pub(crate) fn accelerated(_algorithm: ChecksumAlgorithm) -> Option<Self> {
        None
    }

    pub fn algorithm(&self) -> ChecksumAlgorithm {
        self.algorithm
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Folds `data` into the running state.
    pub fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            State::Crc32(h) => h.update(data),
            State::Sha1(h) => h.update(data),
            State::Sha256(h) => h.update(data),
            #[cfg(feature = "accelerated")]
            State::Accelerated(d) => d.update(data),
        }
    }

    /// Raw big-endian digest of everything seen so far. Does not consume the state.
    pub fn digest(&self) -> Vec<u8> {
        match &self.state {
            State::Crc32(h) => h.clone().finalize().to_be_bytes().to_vec(),
            State::Sha1(h) => h.clone().finalize().to_vec(),
            State::Sha256(h) => h.clone().finalize().to_vec(),
            #[cfg(feature = "accelerated")]
            State::Accelerated(d) => {
                let value = d.finalize();
                match self.algorithm {
                    ChecksumAlgorithm::Crc64Nvme => value.to_be_bytes().to_vec(),
                    _ => (value as u32).to_be_bytes().to_vec(),
                }
            }
        }
    }

    /// Base64 text of [`digest`](Self::digest); the value sent in headers and trailers.
    pub fn base64_digest(&self) -> String {
        BASE64_STANDARD.encode(self.digest())
    }

    pub fn hex_digest(&self) -> String {
        hex::encode(self.digest())
    }

    /// Discards all input seen so far, keeping algorithm and backend.
    pub fn reset(&mut self) {
        match &mut self.state {
            State::Crc32(h) => h.reset(),
            State::Sha1(h) => h.reset(),
            State::Sha256(h) => h.reset(),
            #[cfg(feature = "accelerated")]
            State::Accelerated(d) => d.reset(),
        }
    }
}

/// Convenience: one-shot base64 digest over an in-memory buffer.
pub(crate) fn base64_digest_of(mut checksum: Checksum, data: &[u8]) -> String {
    checksum.update(data);
    checksum.base64_digest()
}
