//! `cpk inspect` — decode a manifest and print its entries.

use std::path::Path;

use anyhow::Result;

use crate::commands::{load_manifest, ManifestForm};

/// Decode a manifest file and print its entries.
pub fn run(input: &str, format: Option<&str>, export: Option<&str>) -> Result<()> {
    let path = Path::new(input);
    let form = ManifestForm::resolve(format, path)?;
    let deps = load_manifest(path, form)?;

    match export {
        Some("json") => {
            println!("{}", cpk_manifest::json::encode(&deps)?);
        }
        _ => {
            let plural = if deps.len() == 1 { "y" } else { "ies" };
            println!("{} dependenc{plural} declared", deps.len());
            for dep in &deps {
                println!("  {}", dep.coordinates());
                if let Some(hash) = &dep.signed_by {
                    println!("      signed by {hash}");
                }
                if dep.same_signer {
                    println!("      requires the declaring artifact's signer");
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspect_json_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deps.json");
        std::fs::write(
            &path,
            r#"{"formatVersion": "2.0", "dependencies": [{"name": "a", "version": "1.0.0"}]}"#,
        )
        .unwrap();

        run(path.to_str().unwrap(), None, None).unwrap();
        run(path.to_str().unwrap(), None, Some("json")).unwrap();
    }

    #[test]
    fn inspect_rejects_malformed_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deps.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(run(path.to_str().unwrap(), None, None).is_err());
    }
}
