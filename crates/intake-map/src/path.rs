//! External path expressions.
//!
//! A path like `candidate.email_addresses[0].value` addresses one value in
//! a raw external record. Dotted segments select keyed children, bracketed
//! segments select sequence elements by position. Resolution is a pure fold
//! that returns `None` for any absent segment; it never fails.

use std::fmt;

use serde_json::Value;

use crate::error::MappingError;

/// One step of an external path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Keyed child, e.g. `candidate`.
    Field(String),
    /// Sequence element, e.g. `[0]`.
    Index(usize),
}

/// Parsed external path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalPath {
    raw: String,
    segments: Vec<Segment>,
}

impl ExternalPath {
    /// Parse a dotted/bracketed path expression.
    pub fn parse(path: &str) -> Result<Self, MappingError> {
        let raw = path.trim();
        if raw.is_empty() {
            return Err(invalid(raw, "path is empty"));
        }

        let mut segments = Vec::new();
        for token in raw.split('.') {
            parse_token(raw, token, &mut segments)?;
        }
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Resolve this path against a raw record.
    ///
    /// Returns `None` as soon as any segment is absent; partial records are
    /// expected and normal.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |value, segment| match segment {
                Segment::Field(name) => value.as_object()?.get(name),
                Segment::Index(idx) => value.as_array()?.get(*idx),
            })
    }
}

impl fmt::Display for ExternalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Parse one dot-separated token, which is a field name followed by zero or
/// more `[n]` index suffixes. An index-only token (`[0]`) is allowed so a
/// path can start inside a top-level sequence.
fn parse_token(raw: &str, token: &str, segments: &mut Vec<Segment>) -> Result<(), MappingError> {
    let (name, mut rest) = match token.find('[') {
        Some(pos) => token.split_at(pos),
        None => (token, ""),
    };

    if name.is_empty() && rest.is_empty() {
        return Err(invalid(raw, "empty path segment"));
    }
    if !name.is_empty() {
        segments.push(Segment::Field(name.to_string()));
    }

    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            return Err(invalid(raw, "unexpected text after index"));
        };
        let Some(close) = inner.find(']') else {
            return Err(invalid(raw, "unclosed index bracket"));
        };
        let digits = &inner[..close];
        let index: usize = digits
            .parse()
            .map_err(|_| invalid(raw, "index must be a non-negative integer"))?;
        segments.push(Segment::Index(index));
        rest = &inner[close + 1..];
    }
    Ok(())
}

fn invalid(path: &str, message: &str) -> MappingError {
    MappingError::InvalidExternalPath {
        path: path.to_string(),
        message: message.to_string(),
    }
}
