//! `cpk verify` — check a manifest against a local artifact store.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};

use cpk_core::DigestAlgorithm;
use cpk_verify::{ArtifactInfo, EntryOutcome, LocalStore, VerifyOptions};

use crate::commands::{load_manifest, ManifestForm};
use crate::config::CpkConfig;

/// Run verification against a local artifact store.
pub fn run(
    config: Option<&CpkConfig>,
    manifest: &str,
    store_flag: Option<&str>,
    declaring: Option<&str>,
    algorithm_flag: Option<&str>,
    report_format: Option<&str>,
) -> Result<()> {
    let path = Path::new(manifest);
    let form = ManifestForm::resolve(None, path)?;
    let deps = load_manifest(path, form)?;

    let store_root = store_flag
        .map(PathBuf::from)
        .or_else(|| {
            config
                .and_then(|c| c.store_root())
                .map(PathBuf::from)
        })
        .ok_or_else(|| {
            anyhow!("no artifact store given; pass --store or set [store] root in cpk.toml")
        })?;
    let store = LocalStore::new(store_root);
    let available = store.load_all()?;

    let declaring_artifact = match declaring {
        Some(spec) => {
            let (name, version) = spec
                .split_once('@')
                .ok_or_else(|| anyhow!("--declaring must be name@version"))?;
            Some(store.load(name, version)?)
        }
        None => None,
    };
    if declaring_artifact.is_none() && deps.iter().any(|d| d.same_signer) {
        bail!("manifest uses verifySameSignerAsMe; pass --declaring name@version");
    }
    let declaring_artifact = declaring_artifact.unwrap_or_else(|| ArtifactInfo::new("", ""));

    let algorithm_name = algorithm_flag
        .or_else(|| config.and_then(|c| c.verify_algorithm()))
        .unwrap_or("SHA-256");
    let signer_algorithm = DigestAlgorithm::parse(algorithm_name)
        .ok_or_else(|| anyhow!("unsupported digest algorithm: '{algorithm_name}'"))?;

    let options = VerifyOptions { signer_algorithm };
    let report = cpk_verify::verify(&deps, &declaring_artifact, &available, &options);

    match report_format {
        Some("json") => {
            let json = serde_json::json!({
                "summary": {
                    "total": report.summary.total,
                    "passed": report.summary.passed,
                    "failed": report.summary.failed,
                },
                "entries": report.entries.iter().map(|(dep, outcome)| {
                    serde_json::json!({
                        "coordinates": dep.coordinates(),
                        "outcome": match outcome {
                            EntryOutcome::Passed => "passed".to_string(),
                            EntryOutcome::Failed(failure) => format!("{failure}"),
                        },
                    })
                }).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            print!("{report}");
        }
    }

    if !report.passed() {
        let plural = if report.summary.failed == 1 { "y" } else { "ies" };
        bail!(
            "verification failed: {} dependenc{plural} unsatisfied",
            report.summary.failed
        );
    }
    Ok(())
}
