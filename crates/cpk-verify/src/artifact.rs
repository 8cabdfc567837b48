//! Identity and signing facts of actual (resolved) artifacts.

use std::collections::HashSet;

use cpk_core::{version, DigestAlgorithm};

/// The observed identity and signing facts of one packaged artifact.
///
/// `signers` holds the encoded signing certificates; their digests form
/// the artifact's signer-hash set. `contents` holds the raw artifact
/// bytes for file-digest checks.
#[derive(Debug, Clone)]
pub struct ArtifactInfo {
    /// OSGi symbolic name.
    pub name: String,
    /// OSGi-normalized version.
    pub version: String,
    /// Discriminator matching the manifest `type` field, if any.
    pub kind: Option<String>,
    /// Raw artifact bytes.
    pub contents: Vec<u8>,
    /// Encoded signer certificates.
    pub signers: Vec<Vec<u8>>,
}

impl ArtifactInfo {
    /// Create an artifact with the given coordinates, no contents, and no
    /// signers. The version is normalized to its canonical OSGi form.
    pub fn new(name: impl Into<String>, version: &str) -> Self {
        ArtifactInfo {
            name: name.into(),
            version: version::normalize(version),
            kind: None,
            contents: Vec::new(),
            signers: Vec::new(),
        }
    }

    /// Set the `type` discriminator.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the raw artifact bytes.
    pub fn with_contents(mut self, contents: Vec<u8>) -> Self {
        self.contents = contents;
        self
    }

    /// Add an encoded signer certificate.
    pub fn with_signer(mut self, signer: Vec<u8>) -> Self {
        self.signers.push(signer);
        self
    }

    /// Digest of the artifact bytes under `algorithm`.
    pub fn file_hash(&self, algorithm: DigestAlgorithm) -> Vec<u8> {
        algorithm.digest(&self.contents)
    }

    /// Digests of each signer encoding under `algorithm`.
    pub fn signer_hashes(&self, algorithm: DigestAlgorithm) -> HashSet<Vec<u8>> {
        self.signers.iter().map(|s| algorithm.digest(s)).collect()
    }

    /// Whether this artifact shares at least one signer with `other`.
    pub fn shares_signer_with(&self, other: &ArtifactInfo, algorithm: DigestAlgorithm) -> bool {
        let mine = self.signer_hashes(algorithm);
        other
            .signer_hashes(algorithm)
            .iter()
            .any(|hash| mine.contains(hash))
    }

    /// Whether this artifact answers to the given coordinates. The `type`
    /// discriminator must match exactly, absent included.
    pub(crate) fn matches(&self, name: &str, version: &str, kind: Option<&str>) -> bool {
        self.name == name && self.version == version && self.kind.as_deref() == kind
    }
}
