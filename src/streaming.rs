//! Response-side streaming checksum validation.
//!
//! [`StreamingChecksumBody`] passes bytes through untouched while folding them
//! into a running checksum, and compares against the expected digest when the
//! wrapped stream runs dry.

use std::io::{self, Read};

use crate::checksum::{Checksum, ChecksumAlgorithm};
use crate::error::{ChecksumError, Result};

/// True for a `<base64>-<digits>` value: a checksum of part checksums, which
/// cannot be compared against a digest of the whole body.
pub fn is_composite_checksum(value: &str) -> bool {
    match value.rsplit_once('-') {
        Some((digest, parts)) => {
            !digest.is_empty() && !parts.is_empty() && parts.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Base64 digest equality ignoring trailing `=` padding on either side.
pub fn digests_match(expected: &str, actual: &str) -> bool {
    expected.trim_end_matches('=') == actual.trim_end_matches('=')
}

/// Compares `checksum`'s current digest with `expected`.
pub(crate) fn validate_digest(checksum: &Checksum, expected: &str) -> Result<()> {
    let actual = checksum.base64_digest();
    if digests_match(expected, &actual) {
        tracing::debug!(algorithm = %checksum.algorithm(), "response checksum validated");
        Ok(())
    } else {
        tracing::warn!(
            algorithm = %checksum.algorithm(),
            expected,
            actual = %actual,
            "response checksum mismatch"
        );
        Err(ChecksumError::ValidationFailed {
            algorithm: checksum.algorithm(),
            expected: expected.to_string(),
            actual,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Pending,
    Valid,
    Mismatch { actual: String },
}

/// Response body that validates its checksum at end of stream.
///
/// End of stream is a zero-byte read into a non-empty buffer. The read that
/// observes it either returns `Ok(0)` or the validation error; validation runs
/// once, and a mismatch is reported again on every later read.
#[derive(Debug)]
pub struct StreamingChecksumBody<R> {
    raw: R,
    checksum: Checksum,
    expected: String,
    outcome: Outcome,
}

impl<R: Read> StreamingChecksumBody<R> {
    pub fn new(raw: R, checksum: Checksum, expected: impl Into<String>) -> Self {
        Self {
            raw,
            checksum,
            expected: expected.into(),
            outcome: Outcome::Pending,
        }
    }

    pub fn algorithm(&self) -> ChecksumAlgorithm {
        self.checksum.algorithm()
    }

    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// `Some(true)` once validated, `Some(false)` after a mismatch.
    pub fn is_valid(&self) -> Option<bool> {
        match self.outcome {
            Outcome::Pending => None,
            Outcome::Valid => Some(true),
            Outcome::Mismatch { .. } => Some(false),
        }
    }

    /// Iterates the body in pieces of at most `size` bytes. The validation
    /// error, if any, is yielded after the last piece.
    pub fn chunks(&mut self, size: usize) -> Chunks<'_, R> {
        Chunks {
            body: self,
            size: size.max(1),
            done: false,
        }
    }

    /// Reads the remaining body into memory and validates it.
    pub fn read_all(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.read_to_end(&mut out)?;
        Ok(out)
    }

    pub fn into_inner(self) -> R {
        self.raw
    }

    fn mismatch_error(&self, actual: &str) -> ChecksumError {
        ChecksumError::ValidationFailed {
            algorithm: self.checksum.algorithm(),
            expected: self.expected.clone(),
            actual: actual.to_string(),
        }
    }

    fn finish(&mut self) -> Result<()> {
        match &self.outcome {
            Outcome::Valid => return Ok(()),
            Outcome::Mismatch { actual } => return Err(self.mismatch_error(actual)),
            Outcome::Pending => {}
        }
        let result = validate_digest(&self.checksum, &self.expected);
        self.outcome = match &result {
            Ok(()) => Outcome::Valid,
            Err(ChecksumError::ValidationFailed { actual, .. }) => Outcome::Mismatch {
                actual: actual.clone(),
            },
            Err(_) => Outcome::Pending,
        };
        result
    }
}

impl<R: Read> Read for StreamingChecksumBody<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Outcome::Mismatch { actual } = &self.outcome {
            return Err(self.mismatch_error(actual).into());
        }
        if buf.is_empty() {
            return Ok(0);
        }
        let n = self.raw.read(buf)?;
        if n > 0 {
            self.checksum.update(&buf[..n]);
            return Ok(n);
        }
        self.finish()?;
        Ok(0)
    }
}

/// Chunk iterator returned by [`StreamingChecksumBody::chunks`].
pub struct Chunks<'a, R> {
    body: &'a mut StreamingChecksumBody<R>,
    size: usize,
    done: bool,
}

impl<R: Read> Iterator for Chunks<'_, R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut buf = vec![0u8; self.size];
        loop {
            match self.body.read(&mut buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(n) => {
                    buf.truncate(n);
                    return Some(Ok(buf));
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
