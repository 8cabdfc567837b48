//! CLI command implementations.

pub mod convert;
pub mod inspect;
pub mod verify;

use std::path::Path;

use anyhow::{bail, Context, Result};

use cpk_core::CpkDependency;

/// The wire forms a manifest file can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestForm {
    Xml,
    Json,
}

impl ManifestForm {
    /// Resolve from an explicit flag or the file extension.
    pub fn resolve(flag: Option<&str>, path: &Path) -> Result<Self> {
        if let Some(name) = flag {
            return match name {
                "xml" => Ok(ManifestForm::Xml),
                "json" => Ok(ManifestForm::Json),
                other => bail!("unknown manifest form: '{other}'. Choose: xml, json"),
            };
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("xml") => Ok(ManifestForm::Xml),
            Some("json") => Ok(ManifestForm::Json),
            _ => bail!(
                "cannot infer manifest form from '{}'; pass --format",
                path.display()
            ),
        }
    }
}

/// Read and decode a manifest file.
pub fn load_manifest(path: &Path, form: ManifestForm) -> Result<Vec<CpkDependency>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let deps = match form {
        ManifestForm::Xml => cpk_manifest::xml::decode(&content),
        ManifestForm::Json => cpk_manifest::json::decode(&content),
    }
    .with_context(|| format!("parsing {}", path.display()))?;
    Ok(deps)
}
