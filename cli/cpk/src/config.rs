//! `cpk.toml` project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Project-level defaults for the `cpk` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpkConfig {
    /// Artifact store configuration.
    #[serde(default)]
    pub store: Option<StoreConfig>,
    /// Verification configuration.
    #[serde(default)]
    pub verify: Option<VerifyConfig>,
}

/// The `[store]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store root directory.
    #[serde(default)]
    pub root: Option<String>,
}

/// The `[verify]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Default signer digest algorithm.
    #[serde(default)]
    pub algorithm: Option<String>,
}

impl CpkConfig {
    /// Search upward from `start_dir` for a `cpk.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("cpk.toml");
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config: CpkConfig = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a configuration from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing cpk.toml")
    }

    /// The configured store root, if any.
    pub fn store_root(&self) -> Option<&str> {
        self.store.as_ref().and_then(|s| s.root.as_deref())
    }

    /// The configured signer digest algorithm, if any.
    pub fn verify_algorithm(&self) -> Option<&str> {
        self.verify.as_ref().and_then(|v| v.algorithm.as_deref())
    }
}
