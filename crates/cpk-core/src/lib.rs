//! Core data model for CPK dependency manifests.
//!
//! A CPK carries a manifest listing the dependencies it was built against:
//! their coordinates, the digest of the signer (or of the artifact file
//! itself), and whether the dependency must be signed by the same identity
//! as the CPK declaring it. This crate holds the plain value types shared
//! by the codecs and the verification engine, plus digest algorithm
//! selection and OSGi version normalization.

pub mod dependency;
pub mod digest;
pub mod version;

// Re-exports for convenience.
pub use dependency::{CpkDependency, HashValue};
pub use digest::{hex_encode, DigestAlgorithm};
pub use version::{normalize, OsgiVersion};
