//! XML wire form of the dependency manifest.
//!
//! The schema is fixed: a `<cpkDependencies>` root containing
//! `<cpkDependency>` entries with `<name>`, `<version>`, and a mandatory
//! `<signedBy algorithm="...">` element whose content is the base64
//! digest. The codec is an explicit event walk over `quick-xml` rather
//! than a derive-driven binding, so every schema rule is enforced in one
//! place. Missing `name`/`version` elements decode to empty strings;
//! a missing `signedBy` fails the entry. Unknown child elements are
//! skipped.
//!
//! The `type` discriminator and the same-signer flag exist only in the
//! JSON form; [`encode`] rejects entries carrying them instead of
//! dropping data silently.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use cpk_core::{CpkDependency, HashValue};

use crate::error::{ManifestError, Result};

/// Root element name.
const ROOT: &str = "cpkDependencies";
/// Entry element name.
const ENTRY: &str = "cpkDependency";
/// Signer digest element name.
const SIGNED_BY: &str = "signedBy";

fn xml_err(e: impl std::fmt::Display) -> ManifestError {
    ManifestError::malformed(format!("invalid XML: {e}"))
}

fn next_event<'a>(reader: &mut Reader<&'a [u8]>) -> Result<Event<'a>> {
    reader.read_event().map_err(xml_err)
}

/// Decode an XML manifest document into dependency entries.
pub fn decode(input: &str) -> Result<Vec<CpkDependency>> {
    let mut reader = Reader::from_str(input);
    let mut deps = Vec::new();
    let mut in_root = false;
    let mut seen_root = false;

    loop {
        match next_event(&mut reader)? {
            Event::Decl(_) | Event::Comment(_) | Event::DocType(_) | Event::PI(_) => {}
            Event::Text(t) => {
                let text = t.unescape().map_err(xml_err)?;
                if !text.trim().is_empty() {
                    return Err(ManifestError::malformed("unexpected text outside an element"));
                }
            }
            Event::CData(_) => {
                return Err(ManifestError::malformed("unexpected CDATA outside an element"));
            }
            Event::Start(e) => {
                if !in_root {
                    if seen_root || e.name().as_ref() != ROOT.as_bytes() {
                        return Err(ManifestError::malformed(format!(
                            "expected a single <{ROOT}> root element"
                        )));
                    }
                    in_root = true;
                    seen_root = true;
                } else if e.name().as_ref() == ENTRY.as_bytes() {
                    deps.push(read_entry(&mut reader)?);
                } else {
                    // Unknown subtree inside the root.
                    reader.read_to_end(e.name()).map_err(xml_err)?;
                }
            }
            Event::Empty(e) => {
                if !in_root {
                    if seen_root || e.name().as_ref() != ROOT.as_bytes() {
                        return Err(ManifestError::malformed(format!(
                            "expected a single <{ROOT}> root element"
                        )));
                    }
                    seen_root = true;
                } else if e.name().as_ref() == ENTRY.as_bytes() {
                    return Err(ManifestError::malformed(format!(
                        "<{ENTRY}> is missing <{SIGNED_BY}>"
                    )));
                }
            }
            Event::End(_) => {
                in_root = false;
            }
            Event::Eof => break,
        }
    }

    if !seen_root {
        return Err(ManifestError::malformed(format!(
            "document has no <{ROOT}> root element"
        )));
    }
    Ok(deps)
}

/// Read one `<cpkDependency>` subtree; the opening tag is already consumed.
fn read_entry(reader: &mut Reader<&[u8]>) -> Result<CpkDependency> {
    let mut name = String::new();
    let mut version = String::new();
    let mut signed_by: Option<HashValue> = None;

    loop {
        match next_event(reader)? {
            Event::Start(e) => match e.name().as_ref() {
                b"name" => name = read_text(reader, b"name")?,
                b"version" => version = read_text(reader, b"version")?,
                b"signedBy" => {
                    let algorithm = signed_by_algorithm(&e)?;
                    let text = read_text(reader, SIGNED_BY.as_bytes())?;
                    signed_by = Some(decode_digest(algorithm, text.trim())?);
                }
                _ => {
                    reader.read_to_end(e.name()).map_err(xml_err)?;
                }
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"name" => name.clear(),
                b"version" => version.clear(),
                b"signedBy" => {
                    let algorithm = signed_by_algorithm(&e)?;
                    signed_by = Some(decode_digest(algorithm, "")?);
                }
                _ => {}
            },
            Event::Text(t) => {
                let text = t.unescape().map_err(xml_err)?;
                if !text.trim().is_empty() {
                    return Err(ManifestError::malformed(format!(
                        "unexpected text inside <{ENTRY}>"
                    )));
                }
            }
            Event::Comment(_) => {}
            Event::End(e) if e.name().as_ref() == ENTRY.as_bytes() => break,
            Event::Eof => {
                return Err(ManifestError::malformed("unexpected end of document"));
            }
            _ => {
                return Err(ManifestError::malformed(format!(
                    "unexpected markup inside <{ENTRY}>"
                )));
            }
        }
    }

    let signed_by = signed_by.ok_or_else(|| {
        ManifestError::malformed(format!("<{ENTRY}> for '{name}' is missing <{SIGNED_BY}>"))
    })?;

    Ok(CpkDependency {
        name,
        version,
        kind: None,
        signed_by: Some(signed_by),
        same_signer: false,
    })
}

/// Read character content until the matching end tag.
fn read_text(reader: &mut Reader<&[u8]>, tag: &[u8]) -> Result<String> {
    let mut text = String::new();
    loop {
        match next_event(reader)? {
            Event::Text(t) => text.push_str(&t.unescape().map_err(xml_err)?),
            Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
            Event::Comment(_) => {}
            Event::End(e) if e.name().as_ref() == tag => return Ok(text),
            Event::Eof => {
                return Err(ManifestError::malformed("unexpected end of document"));
            }
            _ => {
                return Err(ManifestError::malformed(format!(
                    "unexpected markup inside <{}>",
                    String::from_utf8_lossy(tag)
                )));
            }
        }
    }
}

/// Extract the mandatory `algorithm` attribute from a `<signedBy>` tag.
fn signed_by_algorithm(start: &BytesStart<'_>) -> Result<String> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ManifestError::malformed(format!("invalid attribute: {e}")))?;
        if attr.key.as_ref() == b"algorithm" {
            return Ok(attr.unescape_value().map_err(xml_err)?.into_owned());
        }
    }
    Err(ManifestError::malformed(format!(
        "<{SIGNED_BY}> is missing the algorithm attribute"
    )))
}

fn decode_digest(algorithm: String, base64_text: &str) -> Result<HashValue> {
    let value = BASE64
        .decode(base64_text.as_bytes())
        .map_err(|e| ManifestError::malformed(format!("invalid base64 digest: {e}")))?;
    if algorithm.is_empty() && !value.is_empty() {
        return Err(ManifestError::malformed(
            "digest declared without an algorithm",
        ));
    }
    Ok(HashValue { algorithm, value })
}

/// Encode dependency entries as an XML manifest document.
pub fn encode(deps: &[CpkDependency]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)));
    emit(&mut writer, Event::Start(BytesStart::new(ROOT)));

    for dep in deps {
        if dep.same_signer {
            return Err(ManifestError::Unrepresentable {
                name: dep.name.clone(),
                detail: "verifySameSignerAsMe is only expressible in the JSON form".to_string(),
            });
        }
        if dep.kind.is_some() {
            return Err(ManifestError::Unrepresentable {
                name: dep.name.clone(),
                detail: "the type discriminator is only expressible in the JSON form".to_string(),
            });
        }
        let hash = dep.signed_by.as_ref().ok_or_else(|| ManifestError::Unrepresentable {
            name: dep.name.clone(),
            detail: format!("the XML form requires a <{SIGNED_BY}> digest"),
        })?;

        emit(&mut writer, Event::Start(BytesStart::new(ENTRY)));
        write_text_element(&mut writer, "name", &dep.name);
        write_text_element(&mut writer, "version", &dep.version);

        let mut signed = BytesStart::new(SIGNED_BY);
        signed.push_attribute(("algorithm", hash.algorithm.as_str()));
        emit(&mut writer, Event::Start(signed));
        emit(&mut writer, Event::Text(BytesText::new(&BASE64.encode(&hash.value))));
        emit(&mut writer, Event::End(BytesEnd::new(SIGNED_BY)));
        emit(&mut writer, Event::End(BytesEnd::new(ENTRY)));
    }

    emit(&mut writer, Event::End(BytesEnd::new(ROOT)));
    Ok(String::from_utf8(writer.into_inner()).expect("writer produces UTF-8"))
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, tag: &str, content: &str) {
    emit(writer, Event::Start(BytesStart::new(tag)));
    emit(writer, Event::Text(BytesText::new(content)));
    emit(writer, Event::End(BytesEnd::new(tag)));
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) {
    writer
        .write_event(event)
        .expect("writing to an in-memory buffer cannot fail");
}
