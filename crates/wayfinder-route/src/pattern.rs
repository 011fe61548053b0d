//! Route patterns
//!
//! A pattern is split on `/` into ordered segments. A segment of the form
//! `:name` (marker plus at least one character) is a named capture; every
//! other segment, including the empty ones produced by leading or trailing
//! slashes, is a literal.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::route::RouteMatch;

/// Prefix marking a capture segment
pub const CAPTURE_MARKER: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Must equal the path segment exactly (no decoding)
    Literal(String),
    /// Binds the path segment at this position to a name
    Capture(String),
}

impl Segment {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(CAPTURE_MARKER) {
            Some(name) if !name.is_empty() => Segment::Capture(name.to_string()),
            _ => Segment::Literal(raw.to_string()),
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(self, Segment::Capture(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Self {
        Self {
            raw: pattern.to_string(),
            segments: pattern.split('/').map(Segment::parse).collect(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of path segments this pattern consumes
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: even `""` has one (empty literal) segment
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Names of every capture segment, in pattern order
    pub fn capture_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Capture(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Match a path against this pattern.
    ///
    /// Every segment is checked even after a failure, so captures are always
    /// collected; they are only handed out when the whole match is active.
    pub fn match_path(&self, path: &str) -> RouteMatch {
        let parts: Vec<&str> = path.split('/').collect();
        let mut data = BTreeMap::new();
        let mut active = true;

        for (idx, segment) in self.segments.iter().enumerate() {
            let part = parts.get(idx).copied();
            let matched = match segment {
                Segment::Capture(name) => match part {
                    Some(value) => {
                        data.insert(name.clone(), decode_segment(value));
                        true
                    }
                    None => false,
                },
                Segment::Literal(literal) => part == Some(literal.as_str()),
            };
            active &= matched;
        }

        let tail = parts
            .get(self.segments.len()..)
            .map(|rest| rest.join("/"))
            .unwrap_or_default();

        RouteMatch::new(active, data, tail)
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<&str> for RoutePattern {
    fn from(pattern: &str) -> Self {
        Self::parse(pattern)
    }
}

/// Percent-decode a captured segment, keeping it verbatim if the decoded
/// bytes are not valid UTF-8.
fn decode_segment(value: &str) -> String {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::debug!(segment = %value, error = %e, "Keeping undecodable segment verbatim");
            value.to_string()
        }
    }
}
