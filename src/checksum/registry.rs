//! Algorithm registry: maps each algorithm to the constructor that backs it.
//!
//! Built once per process ([`global`]) and read-only afterwards. When the
//! accelerated backend is compiled in it takes over CRC32 as well and supplies
//! CRC32C and CRC64NVME; without it those two are absent and asking for them
//! is a `MissingDependency` error, never a silent fallback.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::algorithm::ChecksumAlgorithm;
use super::hasher::Checksum;
use crate::error::{ChecksumError, Result};

type Constructor = fn(ChecksumAlgorithm) -> Option<Checksum>;

/// Algorithm → constructor table.
#[derive(Debug, Clone)]
pub struct ChecksumRegistry {
    constructors: BTreeMap<ChecksumAlgorithm, Constructor>,
    accelerated: bool,
}

impl ChecksumRegistry {
    /// Registry for this build: portable algorithms, overridden and extended
    /// by the accelerated backend when it is compiled in.
    pub fn detect() -> Self {
        let mut registry = Self::portable();
        if cfg!(feature = "accelerated") {
            registry.accelerated = true;
            for algorithm in ChecksumAlgorithm::ALL {
                if Checksum::accelerated(algorithm).is_some() {
                    registry
                        .constructors
                        .insert(algorithm, Checksum::accelerated as Constructor);
                }
            }
        }
        registry
    }

    /// Portable implementations only (CRC32, SHA-1, SHA-256).
    pub fn portable() -> Self {
        let constructors = ChecksumAlgorithm::ALL
            .into_iter()
            .filter(|alg| Checksum::portable(*alg).is_some())
            .map(|alg| (alg, Checksum::portable as Constructor))
            .collect();
        Self {
            constructors,
            accelerated: false,
        }
    }

    /// Keeps only the algorithms in `allowed`; backend availability is unchanged.
    pub fn restricted_to(mut self, allowed: &[ChecksumAlgorithm]) -> Self {
        self.constructors.retain(|alg, _| allowed.contains(alg));
        self
    }

    /// Whether the accelerated backend is available in this registry.
    pub fn has_accelerated(&self) -> bool {
        self.accelerated
    }

    pub fn supports(&self, algorithm: ChecksumAlgorithm) -> bool {
        self.constructors.contains_key(&algorithm)
    }

    /// Supported algorithms, in declaration order.
    pub fn supported(&self) -> Vec<ChecksumAlgorithm> {
        self.constructors.keys().copied().collect()
    }

    /// Reports why `algorithm` cannot be used, or `Ok(())` if it can.
    pub fn check(&self, algorithm: ChecksumAlgorithm) -> Result<()> {
        if self.supports(algorithm) {
            return Ok(());
        }
        if algorithm.requires_accelerated() && !self.accelerated {
            return Err(ChecksumError::MissingDependency { algorithm });
        }
        Err(ChecksumError::UnsupportedAlgorithm {
            algorithm: algorithm.as_str().to_string(),
        })
    }

    /// New running checksum for `algorithm`.
    pub fn create(&self, algorithm: ChecksumAlgorithm) -> Result<Checksum> {
        self.check(algorithm)?;
        self.constructors
            .get(&algorithm)
            .and_then(|construct| construct(algorithm))
            .ok_or(ChecksumError::MissingDependency { algorithm })
    }

    /// New running checksum by algorithm name (case-insensitive).
    pub fn create_by_name(&self, name: &str) -> Result<Checksum> {
        self.create(name.parse()?)
    }
}

impl Default for ChecksumRegistry {
    fn default() -> Self {
        Self::detect()
    }
}

static GLOBAL: OnceLock<ChecksumRegistry> = OnceLock::new();

/// Process-wide registry, populated on first use.
pub fn global() -> &'static ChecksumRegistry {
    GLOBAL.get_or_init(|| {
        let registry = ChecksumRegistry::detect();
        tracing::debug!(
            accelerated = registry.has_accelerated(),
            supported = ?registry.supported(),
            "checksum registry initialized"
        );
        registry
    })
}
