//! `cpk convert` — translate a manifest between its XML and JSON forms.

use std::path::Path;

use anyhow::{Context, Result};

use crate::commands::{load_manifest, ManifestForm};

/// Decode one wire form and encode the other.
pub fn run(input: &str, output: &str) -> Result<()> {
    let input_path = Path::new(input);
    let output_path = Path::new(output);
    let input_form = ManifestForm::resolve(None, input_path)?;
    let output_form = ManifestForm::resolve(None, output_path)?;

    let deps = load_manifest(input_path, input_form)?;
    let encoded = match output_form {
        ManifestForm::Xml => cpk_manifest::xml::encode(&deps)?,
        ManifestForm::Json => cpk_manifest::json::encode(&deps)?,
    };
    std::fs::write(output_path, encoded)
        .with_context(|| format!("writing {}", output_path.display()))?;

    let plural = if deps.len() == 1 { "y" } else { "ies" };
    println!(
        "wrote {} dependenc{plural} to {}",
        deps.len(),
        output_path.display()
    );
    Ok(())
}
