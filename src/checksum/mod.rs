//! Checksum algorithms: names, incremental state, and the backend registry.

mod algorithm;
mod hasher;
pub mod registry;

pub use algorithm::{ChecksumAlgorithm, CHECKSUM_HEADER_PREFIX, DEFAULT_CHECKSUM_ALGORITHM};
pub(crate) use hasher::base64_digest_of;
pub use hasher::{Backend, Checksum};
pub use registry::{global, ChecksumRegistry};
