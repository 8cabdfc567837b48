//! Manifest codec error types.

use thiserror::Error;

/// Errors produced while decoding or encoding a dependency manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The document does not conform to the manifest schema.
    #[error("malformed manifest: {detail}")]
    Malformed { detail: String },

    /// An entry cannot be expressed in the requested wire form.
    #[error("cannot encode entry '{name}': {detail}")]
    Unrepresentable { name: String, detail: String },
}

impl ManifestError {
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        ManifestError::Malformed {
            detail: detail.into(),
        }
    }
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, ManifestError>;
