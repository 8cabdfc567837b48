//! OSGi version normalization.
//!
//! CPK coordinates use OSGi versions: `major.minor.micro[.qualifier]`.
//! Build tools hand us Maven-style strings (`1.2.3-SNAPSHOT`, `2.1`),
//! which normalize into the canonical four-part scheme: up to three
//! leading numeric segments, then a qualifier assembled from whatever
//! remains with illegal characters replaced by `_`.

use std::fmt;

/// Characters permitted in an OSGi version qualifier.
fn is_qualifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// A canonical OSGi version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OsgiVersion {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    pub qualifier: Option<String>,
}

impl OsgiVersion {
    /// Parse an arbitrary version string into canonical form.
    ///
    /// The input is split at the first `-`; leading dot-separated numeric
    /// segments of the head populate major/minor/micro (missing segments
    /// default to 0). Whatever remains, plus everything after the `-`,
    /// becomes the qualifier with characters outside `[A-Za-z0-9_-]`
    /// replaced by `_`. Parsing never fails: unrecognizable input lands
    /// entirely in the qualifier.
    pub fn parse(input: &str) -> Self {
        let (head, tail) = match input.split_once('-') {
            Some((head, tail)) => (head, Some(tail)),
            None => (input, None),
        };

        let mut numeric = [0u32; 3];
        let mut taken = 0;
        let mut segments = head.split('.').peekable();
        while taken < 3 {
            match segments.peek() {
                Some(s) if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) => {
                    match s.parse::<u32>() {
                        Ok(n) => {
                            numeric[taken] = n;
                            taken += 1;
                            segments.next();
                        }
                        Err(_) => break,
                    }
                }
                _ => break,
            }
        }

        let mut raw = segments
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(".");
        if let Some(tail) = tail {
            if !tail.is_empty() {
                if raw.is_empty() {
                    raw = tail.to_string();
                } else {
                    raw = format!("{raw}-{tail}");
                }
            }
        }

        let qualifier = if raw.is_empty() {
            None
        } else {
            Some(
                raw.chars()
                    .map(|c| if is_qualifier_char(c) { c } else { '_' })
                    .collect(),
            )
        };

        OsgiVersion {
            major: numeric[0],
            minor: numeric[1],
            micro: numeric[2],
            qualifier,
        }
    }
}

impl fmt::Display for OsgiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if let Some(ref qualifier) = self.qualifier {
            write!(f, ".{qualifier}")?;
        }
        Ok(())
    }
}

/// Normalize a version string to its canonical OSGi form.
pub fn normalize(input: &str) -> String {
    OsgiVersion::parse(input).to_string()
}
