//! Local filesystem artifact store.
//!
//! Layout:
//! ```text
//! <root>/
//!   <name>/
//!     <version>/
//!       artifact.toml
//!       artifact.cpk
//! ```
//!
//! `artifact.toml` declares the type discriminator and the base64-encoded
//! signer certificates; `artifact.cpk` holds the raw artifact bytes. The
//! store exists for CLI and test use; build tools construct
//! [`ArtifactInfo`] values directly.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactInfo;
use crate::error::StoreError;

const METADATA_FILE: &str = "artifact.toml";
const CONTENTS_FILE: &str = "artifact.cpk";

/// Metadata file describing one stored artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub artifact: ArtifactSection,
}

/// The `[artifact]` table of a metadata file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactSection {
    /// OSGi symbolic name.
    pub name: String,
    /// Version string (normalized on load).
    pub version: String,
    /// Discriminator matching the manifest `type` field.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Base64-encoded signer certificates.
    #[serde(default)]
    pub signers: Vec<String>,
}

/// A local filesystem store of packaged artifacts.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: PathBuf) -> Self {
        LocalStore { root }
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn artifact_dir(&self, name: &str, version: &str) -> PathBuf {
        self.root.join(name).join(version)
    }

    /// Load one artifact by name and version.
    pub fn load(&self, name: &str, version: &str) -> Result<ArtifactInfo, StoreError> {
        let dir = self.artifact_dir(name, version);
        let meta_path = dir.join(METADATA_FILE);
        let contents_path = dir.join(CONTENTS_FILE);

        if !meta_path.is_file() || !contents_path.is_file() {
            return Err(StoreError::NotFound {
                name: name.to_string(),
                version: version.to_string(),
            });
        }

        let metadata: ArtifactMetadata = toml::from_str(&std::fs::read_to_string(&meta_path)?)?;
        let contents = std::fs::read(&contents_path)?;
        build_info(metadata, contents, &meta_path)
    }

    /// Load every artifact in the store, sorted by name then version.
    pub fn load_all(&self) -> Result<Vec<ArtifactInfo>, StoreError> {
        let mut artifacts = Vec::new();
        if !self.root.is_dir() {
            return Ok(artifacts);
        }

        for name_entry in std::fs::read_dir(&self.root)? {
            let name_dir = name_entry?.path();
            if !name_dir.is_dir() {
                continue;
            }
            for version_entry in std::fs::read_dir(&name_dir)? {
                let version_dir = version_entry?.path();
                if !version_dir.is_dir() {
                    continue;
                }
                let meta_path = version_dir.join(METADATA_FILE);
                let contents_path = version_dir.join(CONTENTS_FILE);
                if !meta_path.is_file() || !contents_path.is_file() {
                    continue;
                }

                let metadata: ArtifactMetadata =
                    toml::from_str(&std::fs::read_to_string(&meta_path)?)?;
                let contents = std::fs::read(&contents_path)?;
                artifacts.push(build_info(metadata, contents, &meta_path)?);
            }
        }

        artifacts.sort_by(|a, b| (&a.name, &a.version).cmp(&(&b.name, &b.version)));
        Ok(artifacts)
    }

    /// Store an artifact, overwriting any existing entry at its coordinates.
    pub fn save(&self, info: &ArtifactInfo) -> Result<(), StoreError> {
        let dir = self.artifact_dir(&info.name, &info.version);
        std::fs::create_dir_all(&dir)?;

        let metadata = ArtifactMetadata {
            artifact: ArtifactSection {
                name: info.name.clone(),
                version: info.version.clone(),
                kind: info.kind.clone(),
                signers: info.signers.iter().map(|s| BASE64.encode(s)).collect(),
            },
        };
        let rendered =
            toml::to_string_pretty(&metadata).map_err(|e| StoreError::InvalidMetadata {
                path: dir.join(METADATA_FILE),
                detail: format!("failed to serialize: {e}"),
            })?;

        std::fs::write(dir.join(METADATA_FILE), rendered)?;
        std::fs::write(dir.join(CONTENTS_FILE), &info.contents)?;
        Ok(())
    }
}

fn build_info(
    metadata: ArtifactMetadata,
    contents: Vec<u8>,
    meta_path: &Path,
) -> Result<ArtifactInfo, StoreError> {
    let mut signers = Vec::with_capacity(metadata.artifact.signers.len());
    for encoded in &metadata.artifact.signers {
        let decoded = BASE64
            .decode(encoded.as_bytes())
            .map_err(|e| StoreError::InvalidMetadata {
                path: meta_path.to_path_buf(),
                detail: format!("invalid base64 signer: {e}"),
            })?;
        signers.push(decoded);
    }

    Ok(ArtifactInfo {
        name: metadata.artifact.name,
        version: cpk_core::normalize(&metadata.artifact.version),
        kind: metadata.artifact.kind,
        contents,
        signers,
    })
}
