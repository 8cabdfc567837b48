//! Manifest entry value types.
//!
//! A dependency manifest is an ordered list of `CpkDependency` entries.
//! Entries are plain immutable values: equality and hashing go by field
//! values, so collections of entries support membership assertions. No
//! validation happens at construction; schema rules are enforced when a
//! document is decoded, signing rules when it is verified.

use std::fmt;

use crate::digest::hex_encode;
use crate::version;

/// A digest paired with the algorithm that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashValue {
    /// Digest algorithm name (e.g. `SHA-256`).
    pub algorithm: String,
    /// Raw digest bytes.
    pub value: Vec<u8>,
}

impl HashValue {
    /// Create a hash value from an algorithm name and raw digest bytes.
    pub fn new(algorithm: impl Into<String>, value: Vec<u8>) -> Self {
        HashValue {
            algorithm: algorithm.into(),
            value,
        }
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm, hex_encode(&self.value))
    }
}

/// One entry in a CPK dependency manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CpkDependency {
    /// OSGi symbolic name of the dependency.
    pub name: String,
    /// OSGi-normalized version string.
    pub version: String,
    /// Discriminator separating otherwise-identical coordinates
    /// (e.g. `corda-api`). `None` is an ordinary CPK dependency.
    pub kind: Option<String>,
    /// Expected signer or file digest.
    pub signed_by: Option<HashValue>,
    /// Require the dependency to be signed by the same identity as the
    /// artifact declaring it.
    pub same_signer: bool,
}

impl CpkDependency {
    /// Create an entry with the given coordinates and no constraints.
    ///
    /// The version is normalized to its canonical OSGi form; manifests
    /// produced from entries built here always carry normalized versions.
    pub fn new(name: impl Into<String>, version: &str) -> Self {
        CpkDependency {
            name: name.into(),
            version: version::normalize(version),
            kind: None,
            signed_by: None,
            same_signer: false,
        }
    }

    /// Set the `type` discriminator.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the expected signer or file digest.
    pub fn signed_by(mut self, hash: HashValue) -> Self {
        self.signed_by = Some(hash);
        self
    }

    /// Require the same signer as the declaring artifact.
    pub fn with_same_signer(mut self) -> Self {
        self.same_signer = true;
        self
    }

    /// Whether this entry declares a digest produced by `algorithm`.
    pub fn is_signed_with(&self, algorithm: &str) -> bool {
        self.signed_by
            .as_ref()
            .map(|h| h.algorithm.eq_ignore_ascii_case(algorithm))
            .unwrap_or(false)
    }

    /// Human-readable `(name, version, type)` coordinates.
    pub fn coordinates(&self) -> String {
        match &self.kind {
            Some(kind) => format!("{} {} ({kind})", self.name, self.version),
            None => format!("{} {}", self.name, self.version),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builder_defaults() {
        let dep = CpkDependency::new("net.corda.foo", "1.2.3");
        assert_eq!(dep.name, "net.corda.foo");
        assert_eq!(dep.version, "1.2.3");
        assert!(dep.kind.is_none());
        assert!(dep.signed_by.is_none());
        assert!(!dep.same_signer);
    }

    #[test]
    fn new_normalizes_version() {
        let dep = CpkDependency::new("net.corda.foo", "1.2.3-SNAPSHOT");
        assert_eq!(dep.version, "1.2.3.SNAPSHOT");
    }

    #[test]
    fn set_membership_by_field_values() {
        let mut set = HashSet::new();
        set.insert(
            CpkDependency::new("net.corda.corda-platform-cordapp", "3.4.2").with_kind("corda-api"),
        );

        // Same coordinates, rebuilt independently.
        assert!(set.contains(
            &CpkDependency::new("net.corda.corda-platform-cordapp", "3.4.2")
                .with_kind("corda-api")
        ));
        // Same name and version but no type is a different entry.
        assert!(!set.contains(&CpkDependency::new(
            "net.corda.corda-platform-cordapp",
            "3.4.2"
        )));
    }

    #[test]
    fn is_signed_with_matches_case_insensitively() {
        let dep = CpkDependency::new("a", "1.0.0")
            .signed_by(HashValue::new("SHA-256", vec![0xab; 32]));
        assert!(dep.is_signed_with("SHA-256"));
        assert!(dep.is_signed_with("sha-256"));
        assert!(!dep.is_signed_with("SHA-512"));
        assert!(!CpkDependency::new("b", "1.0.0").is_signed_with("SHA-256"));
    }

    #[test]
    fn hash_value_display() {
        let hash = HashValue::new("SHA-256", vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(hash.to_string(), "SHA-256:deadbeef");
    }

    #[test]
    fn coordinates_include_kind_when_present() {
        let plain = CpkDependency::new("net.corda.foo", "3.4.2");
        assert_eq!(plain.coordinates(), "net.corda.foo 3.4.2");

        let api = plain.clone().with_kind("corda-api");
        assert_eq!(api.coordinates(), "net.corda.foo 3.4.2 (corda-api)");
    }
}
