//! Wire codecs for CPK dependency manifests.
//!
//! A dependency manifest has two wire forms of the same logical schema: an
//! XML document (root `cpkDependencies`) embedded in packaged artifacts,
//! and a JSON document (`formatVersion` plus a `dependencies` array). Both
//! decode into the same `CpkDependency` model and both encode from it
//! without semantic loss.
//!
//! Decoding is all-or-nothing per document: a schema violation fails with
//! [`ManifestError::Malformed`] instead of yielding partially populated
//! entries. Digest bytes travel as base64 and round-trip byte-exact.

pub mod error;
pub mod json;
pub mod xml;

pub use error::{ManifestError, Result};
pub use json::FORMAT_VERSION;
