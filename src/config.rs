//! Client checksum configuration (`~/.config/flexsum/config.toml`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default aws-chunked chunk size: 1 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// When to compute request checksums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestChecksumCalculation {
    /// Whenever the operation supports one (default CRC32 if the caller picked none).
    #[default]
    WhenSupported,
    /// Only when the operation requires one or the caller picked an algorithm.
    WhenRequired,
}

/// When to validate response checksums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseChecksumValidation {
    /// Turn on the operation's validation mode unless the caller set it.
    #[default]
    WhenSupported,
    /// Validate only when the caller enabled validation mode.
    WhenRequired,
}

/// Request signing scheme. Only affects whether trailers may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureVersion {
    #[default]
    V4,
    V4a,
    /// Legacy scheme; cannot sign trailers.
    S3,
}

impl SignatureVersion {
    pub fn supports_trailers(&self) -> bool {
        !matches!(self, SignatureVersion::S3)
    }
}

/// Flexible checksum settings carried on every request context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksumConfig {
    pub request_checksum_calculation: RequestChecksumCalculation,
    pub response_checksum_validation: ResponseChecksumValidation,
    pub signature_version: SignatureVersion,
    /// Payload bytes per aws-chunked chunk when wrapping request bodies.
    pub chunk_size: usize,
}

impl Default for ChecksumConfig {
    fn default() -> Self {
        Self {
            request_checksum_calculation: RequestChecksumCalculation::default(),
            response_checksum_validation: ResponseChecksumValidation::default(),
            signature_version: SignatureVersion::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("flexsum")?;
    Ok(xdg_dirs
        .get_config_home()
        .join("flexsum")
        .join("config.toml"))
}

/// Load configuration from `path`.
pub fn load_from(path: &Path) -> Result<ChecksumConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ChecksumConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    if cfg.chunk_size == 0 {
        anyhow::bail!("{}: chunk_size must be at least 1", path.display());
    }
    Ok(cfg)
}

/// Load the XDG configuration file if there is one, defaults otherwise. Never writes.
pub fn load_or_default() -> Result<ChecksumConfig> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(ChecksumConfig::default());
    }
    load_from(&path)
}
