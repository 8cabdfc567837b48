//! Digest algorithm selection and computation.
//!
//! Manifest entries name their digest algorithm as a string (`SHA-256`).
//! The verifier resolves that name here; an unknown name is reported as a
//! verification failure rather than a panic or a silent pass.

use std::fmt;

use sha2::{Digest, Sha256, Sha384, Sha512};

/// A supported digest algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    /// Look up an algorithm by name.
    ///
    /// Accepts the dashed JCA spelling (`SHA-256`) and the undashed one
    /// (`SHA256`), case-insensitively. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().replace('-', "").as_str() {
            "SHA256" => Some(DigestAlgorithm::Sha256),
            "SHA384" => Some(DigestAlgorithm::Sha384),
            "SHA512" => Some(DigestAlgorithm::Sha512),
            _ => None,
        }
    }

    /// Canonical algorithm name.
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha384 => "SHA-384",
            DigestAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha384 => 48,
            DigestAlgorithm::Sha512 => 64,
        }
    }

    /// Compute the digest of `data`.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            DigestAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
            DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Encode bytes as a lowercase hex string.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_spelling_variants() {
        assert_eq!(DigestAlgorithm::parse("SHA-256"), Some(DigestAlgorithm::Sha256));
        assert_eq!(DigestAlgorithm::parse("sha-256"), Some(DigestAlgorithm::Sha256));
        assert_eq!(DigestAlgorithm::parse("SHA256"), Some(DigestAlgorithm::Sha256));
        assert_eq!(DigestAlgorithm::parse("SHA-384"), Some(DigestAlgorithm::Sha384));
        assert_eq!(DigestAlgorithm::parse("SHA-512"), Some(DigestAlgorithm::Sha512));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(DigestAlgorithm::parse("MD5"), None);
        assert_eq!(DigestAlgorithm::parse("SHA-1"), None);
        assert_eq!(DigestAlgorithm::parse(""), None);
    }

    #[test]
    fn sha256_known_vector() {
        // SHA-256 of empty input is well-known
        assert_eq!(
            hex_encode(&DigestAlgorithm::Sha256.digest(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn output_lengths() {
        for alg in [
            DigestAlgorithm::Sha256,
            DigestAlgorithm::Sha384,
            DigestAlgorithm::Sha512,
        ] {
            assert_eq!(alg.digest(b"data").len(), alg.output_len());
        }
    }

    #[test]
    fn digest_deterministic_and_distinct() {
        let alg = DigestAlgorithm::Sha256;
        assert_eq!(alg.digest(b"hello"), alg.digest(b"hello"));
        assert_ne!(alg.digest(b"hello"), alg.digest(b"world"));
    }

    #[test]
    fn display_uses_canonical_name() {
        assert_eq!(DigestAlgorithm::Sha256.to_string(), "SHA-256");
        assert_eq!(DigestAlgorithm::parse("sha512").unwrap().to_string(), "SHA-512");
    }

    #[test]
    fn hex_encode_format() {
        assert_eq!(hex_encode(&[]), "");
        assert_eq!(hex_encode(&[0x00, 0xff, 0x0a]), "00ff0a");
    }
}
