//! The dependency verification engine.
//!
//! Checks each manifest entry against the actual artifacts and the
//! declaring artifact's own signers. Entries are evaluated independently
//! and every failure is reported in manifest order; one entry's failure
//! never short-circuits the rest.

use cpk_core::{hex_encode, CpkDependency, DigestAlgorithm};

use crate::artifact::ArtifactInfo;
use crate::error::VerifyFailure;
use crate::report::{EntryOutcome, VerifyReport};

/// Verification options, supplied explicitly by the caller.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    /// Algorithm used to compare signer identities for same-signer checks.
    pub signer_algorithm: DigestAlgorithm,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        VerifyOptions {
            signer_algorithm: DigestAlgorithm::Sha256,
        }
    }
}

/// Verify a decoded manifest against the available artifacts.
///
/// `declaring` is the artifact whose manifest is being checked; its
/// signers anchor the same-signer comparison.
pub fn verify(
    manifest: &[CpkDependency],
    declaring: &ArtifactInfo,
    available: &[ArtifactInfo],
    options: &VerifyOptions,
) -> VerifyReport {
    let entries = manifest
        .iter()
        .map(|dep| {
            let outcome = match check_entry(dep, declaring, available, options) {
                Ok(()) => EntryOutcome::Passed,
                Err(failure) => EntryOutcome::Failed(failure),
            };
            (dep.clone(), outcome)
        })
        .collect();
    VerifyReport::new(entries)
}

fn check_entry(
    dep: &CpkDependency,
    declaring: &ArtifactInfo,
    available: &[ArtifactInfo],
    options: &VerifyOptions,
) -> Result<(), VerifyFailure> {
    let found = available
        .iter()
        .find(|artifact| artifact.matches(&dep.name, &dep.version, dep.kind.as_deref()))
        .ok_or_else(|| VerifyFailure::UnresolvedDependency {
            coordinates: dep.coordinates(),
        })?;

    if dep.same_signer {
        if !found.shares_signer_with(declaring, options.signer_algorithm) {
            return Err(VerifyFailure::SignerMismatch {
                coordinates: dep.coordinates(),
            });
        }
        return Ok(());
    }

    if let Some(expected) = &dep.signed_by {
        let algorithm = DigestAlgorithm::parse(&expected.algorithm).ok_or_else(|| {
            VerifyFailure::UnsupportedAlgorithm {
                coordinates: dep.coordinates(),
                algorithm: expected.algorithm.clone(),
            }
        })?;

        let matches_file = found.file_hash(algorithm) == expected.value;
        let matches_signer = found
            .signer_hashes(algorithm)
            .iter()
            .any(|hash| *hash == expected.value);
        if !matches_file && !matches_signer {
            return Err(VerifyFailure::HashMismatch {
                coordinates: dep.coordinates(),
                algorithm: algorithm.name().to_string(),
                expected: hex_encode(&expected.value),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpk_core::HashValue;

    fn signed(name: &str, version: &str, cert: &[u8]) -> ArtifactInfo {
        ArtifactInfo::new(name, version)
            .with_contents(format!("{name}-{version}").into_bytes())
            .with_signer(cert.to_vec())
    }

    #[test]
    fn unconstrained_entry_passes() {
        let declaring = signed("me", "1.0.0", b"my-cert");
        let available = vec![signed("dep", "1.0.0", b"other-cert")];
        let manifest = vec![CpkDependency::new("dep", "1.0.0")];

        let report = verify(&manifest, &declaring, &available, &VerifyOptions::default());
        assert!(report.passed());
        assert_eq!(report.summary.total, 1);
        assert_eq!(report.summary.passed, 1);
    }

    #[test]
    fn missing_artifact_is_unresolved() {
        let declaring = signed("me", "1.0.0", b"my-cert");
        let manifest = vec![CpkDependency::new("dep", "1.0.0")];

        let report = verify(&manifest, &declaring, &[], &VerifyOptions::default());
        assert_eq!(report.summary.failed, 1);
        assert!(matches!(
            report.failures().next().unwrap(),
            VerifyFailure::UnresolvedDependency { .. }
        ));
    }

    #[test]
    fn kind_discriminates_otherwise_identical_coordinates() {
        let declaring = signed("me", "1.0.0", b"my-cert");
        // Same name and version as the manifest entry, but no type.
        let available = vec![signed("net.corda.corda-platform-cordapp", "3.4.2", b"cert")];
        let manifest = vec![
            CpkDependency::new("net.corda.corda-platform-cordapp", "3.4.2").with_kind("corda-api"),
        ];

        let report = verify(&manifest, &declaring, &available, &VerifyOptions::default());
        assert!(matches!(
            report.failures().next().unwrap(),
            VerifyFailure::UnresolvedDependency { .. }
        ));

        // An artifact with the matching type satisfies the entry.
        let available = vec![
            signed("net.corda.corda-platform-cordapp", "3.4.2", b"cert").with_kind("corda-api"),
        ];
        let report = verify(&manifest, &declaring, &available, &VerifyOptions::default());
        assert!(report.passed());
    }

    #[test]
    fn same_signer_requires_overlapping_signer_sets() {
        let declaring = signed("me", "1.0.0", b"shared-cert");
        let manifest = vec![CpkDependency::new("dep", "1.0.0").with_same_signer()];

        // Disjoint signer sets fail.
        let strangers = vec![signed("dep", "1.0.0", b"stranger-cert")];
        let report = verify(&manifest, &declaring, &strangers, &VerifyOptions::default());
        assert!(matches!(
            report.failures().next().unwrap(),
            VerifyFailure::SignerMismatch { .. }
        ));

        // One shared signer among several is enough.
        let overlapping = vec![signed("dep", "1.0.0", b"stranger-cert")
            .with_signer(b"shared-cert".to_vec())];
        let report = verify(&manifest, &declaring, &overlapping, &VerifyOptions::default());
        assert!(report.passed());
    }

    #[test]
    fn declared_digest_matches_file_hash() {
        let declaring = signed("me", "1.0.0", b"my-cert");
        let artifact = signed("dep", "1.0.0", b"cert");
        let digest = artifact.file_hash(DigestAlgorithm::Sha256);
        let manifest = vec![
            CpkDependency::new("dep", "1.0.0").signed_by(HashValue::new("SHA-256", digest)),
        ];

        let report = verify(&manifest, &declaring, &[artifact], &VerifyOptions::default());
        assert!(report.passed());
    }

    #[test]
    fn declared_digest_matches_signer_hash() {
        let declaring = signed("me", "1.0.0", b"my-cert");
        let artifact = signed("dep", "1.0.0", b"cert");
        let digest = DigestAlgorithm::Sha256.digest(b"cert");
        let manifest = vec![
            CpkDependency::new("dep", "1.0.0").signed_by(HashValue::new("SHA-256", digest)),
        ];

        let report = verify(&manifest, &declaring, &[artifact], &VerifyOptions::default());
        assert!(report.passed());
    }

    #[test]
    fn single_byte_difference_is_a_hash_mismatch() {
        let declaring = signed("me", "1.0.0", b"my-cert");
        let artifact = signed("dep", "1.0.0", b"cert");
        let mut digest = artifact.file_hash(DigestAlgorithm::Sha256);
        digest[0] ^= 0x01;
        let manifest = vec![
            CpkDependency::new("dep", "1.0.0").signed_by(HashValue::new("SHA-256", digest)),
        ];

        let report = verify(&manifest, &declaring, &[artifact], &VerifyOptions::default());
        assert!(matches!(
            report.failures().next().unwrap(),
            VerifyFailure::HashMismatch { .. }
        ));
    }

    #[test]
    fn unknown_algorithm_is_reported() {
        let declaring = signed("me", "1.0.0", b"my-cert");
        let artifact = signed("dep", "1.0.0", b"cert");
        let manifest = vec![
            CpkDependency::new("dep", "1.0.0")
                .signed_by(HashValue::new("MD5", vec![0u8; 16])),
        ];

        let report = verify(&manifest, &declaring, &[artifact], &VerifyOptions::default());
        assert!(matches!(
            report.failures().next().unwrap(),
            VerifyFailure::UnsupportedAlgorithm { .. }
        ));
    }

    #[test]
    fn failures_accumulate_without_short_circuit() {
        let declaring = signed("me", "1.0.0", b"my-cert");
        let good = signed("good", "1.0.0", b"cert");
        let bad_digest = signed("bad", "1.0.0", b"cert");
        let manifest = vec![
            CpkDependency::new("missing", "9.9.9"),
            CpkDependency::new("good", "1.0.0"),
            CpkDependency::new("bad", "1.0.0")
                .signed_by(HashValue::new("SHA-256", vec![0u8; 32])),
        ];

        let report = verify(
            &manifest,
            &declaring,
            &[good, bad_digest],
            &VerifyOptions::default(),
        );
        assert_eq!(report.summary.total, 3);
        assert_eq!(report.summary.passed, 1);
        assert_eq!(report.summary.failed, 2);

        // Failures come back in manifest order.
        let failures: Vec<_> = report.failures().collect();
        assert!(matches!(failures[0], VerifyFailure::UnresolvedDependency { .. }));
        assert!(matches!(failures[1], VerifyFailure::HashMismatch { .. }));
    }

    #[test]
    fn one_bad_entry_yields_exactly_one_failure() {
        let declaring = signed("me", "1.0.0", b"my-cert");
        let good = signed("good", "1.0.0", b"cert");
        let manifest = vec![
            CpkDependency::new("good", "1.0.0"),
            CpkDependency::new("missing", "1.0.0"),
        ];

        let report = verify(&manifest, &declaring, &[good], &VerifyOptions::default());
        assert_eq!(report.failures().count(), 1);
    }
}
