//! JSON wire form of the dependency manifest.
//!
//! Schema: a top-level object with `formatVersion` and a `dependencies`
//! array. Wire structs are kept separate from the model so every schema
//! rule stays explicit: `formatVersion` must be present (its value is not
//! otherwise validated), `name` and `version` are required per entry,
//! `type` and `verifyFileHash` are optional, and `verifySameSignerAsMe`
//! defaults to `false`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use cpk_core::{CpkDependency, HashValue};

use crate::error::{ManifestError, Result};

/// Format version written by [`encode`].
pub const FORMAT_VERSION: &str = "2.0";

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    #[serde(rename = "formatVersion")]
    format_version: String,
    dependencies: Vec<Entry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Entry {
    name: String,
    version: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(rename = "verifySameSignerAsMe", default)]
    same_signer: bool,
    #[serde(rename = "verifyFileHash", default, skip_serializing_if = "Option::is_none")]
    verify_file_hash: Option<WireHash>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireHash {
    algorithm: String,
    /// Base64-encoded digest bytes.
    value: String,
}

/// Decode a JSON manifest document into dependency entries.
pub fn decode(input: &str) -> Result<Vec<CpkDependency>> {
    let doc: Document = serde_json::from_str(input)
        .map_err(|e| ManifestError::malformed(format!("invalid JSON: {e}")))?;

    let mut deps = Vec::with_capacity(doc.dependencies.len());
    for entry in doc.dependencies {
        let signed_by = match entry.verify_file_hash {
            Some(hash) => Some(decode_hash(&entry.name, hash)?),
            None => None,
        };
        deps.push(CpkDependency {
            name: entry.name,
            version: entry.version,
            kind: entry.kind,
            signed_by,
            same_signer: entry.same_signer,
        });
    }
    Ok(deps)
}

fn decode_hash(name: &str, hash: WireHash) -> Result<HashValue> {
    let value = BASE64.decode(hash.value.as_bytes()).map_err(|e| {
        ManifestError::malformed(format!("entry '{name}': invalid base64 digest: {e}"))
    })?;
    if hash.algorithm.is_empty() && !value.is_empty() {
        return Err(ManifestError::malformed(format!(
            "entry '{name}': digest declared without an algorithm"
        )));
    }
    Ok(HashValue {
        algorithm: hash.algorithm,
        value,
    })
}

/// Encode dependency entries as a JSON manifest document.
pub fn encode(deps: &[CpkDependency]) -> Result<String> {
    let doc = Document {
        format_version: FORMAT_VERSION.to_string(),
        dependencies: deps
            .iter()
            .map(|dep| Entry {
                name: dep.name.clone(),
                version: dep.version.clone(),
                kind: dep.kind.clone(),
                same_signer: dep.same_signer,
                verify_file_hash: dep.signed_by.as_ref().map(|hash| WireHash {
                    algorithm: hash.algorithm.clone(),
                    value: BASE64.encode(&hash.value),
                }),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&doc)
        .map_err(|e| ManifestError::malformed(format!("failed to serialize: {e}")))
}
