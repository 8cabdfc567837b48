//! Verification failure and store error types.

use std::path::PathBuf;

use thiserror::Error;

/// A verification failure for a single manifest entry.
///
/// Failures are accumulated per entry and never short-circuit the run;
/// the report carries the complete set in manifest order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyFailure {
    /// No artifact matches the entry's `(name, version, type)` coordinates.
    #[error("unresolved dependency: {coordinates}")]
    UnresolvedDependency { coordinates: String },

    /// The artifact shares no signer identity with the declaring artifact.
    #[error("signer mismatch: {coordinates} is not signed by the declaring artifact's signer")]
    SignerMismatch { coordinates: String },

    /// Neither the file digest nor any signer digest matches the declared one.
    #[error("hash mismatch: {coordinates} does not match the declared {algorithm} digest {expected}")]
    HashMismatch {
        coordinates: String,
        algorithm: String,
        expected: String,
    },

    /// The declared digest algorithm is not recognized.
    #[error("unsupported digest algorithm '{algorithm}' declared for {coordinates}")]
    UnsupportedAlgorithm {
        coordinates: String,
        algorithm: String,
    },
}

/// Errors raised by the local artifact store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Requested artifact not present in the store.
    #[error("artifact not found: {name} {version}")]
    NotFound { name: String, version: String },

    /// Metadata file present but unusable.
    #[error("invalid artifact metadata at {path}: {detail}")]
    InvalidMetadata { path: PathBuf, detail: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
