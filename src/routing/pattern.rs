//! Path pattern compilation.
//!
//! # Responsibilities
//! - Parse route patterns such as `/` or `/device/:id` into segments
//! - Reject malformed patterns at table construction time
//! - Build concrete paths from a pattern and a parameter set
//!
//! # Design Decisions
//! - A pattern is a flat list of segments; no regex, no wildcards
//! - `/` compiles to zero segments
//! - A single trailing slash is insignificant in both patterns and paths

use std::fmt;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::routing::params::Params;

/// Characters escaped when a parameter value is written into a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Error returned when a route pattern cannot be compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern '{0}' must start with '/'")]
    MissingLeadingSlash(String),

    #[error("pattern '{0}' contains an empty segment")]
    EmptySegment(String),

    #[error("pattern '{pattern}' has an invalid parameter name ':{name}'")]
    InvalidParamName { pattern: String, name: String },

    #[error("pattern '{pattern}' declares parameter ':{name}' more than once")]
    DuplicateParam { pattern: String, name: String },

    #[error("missing value for path parameter '{0}'")]
    MissingParam(String),
}

/// One compiled segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, compared case-insensitively.
    Static(String),
    /// Named parameter capturing exactly one non-empty segment.
    Param(String),
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern string.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if !pattern.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash(pattern.to_string()));
        }

        let mut segments = Vec::new();
        for raw in split_path(pattern) {
            if raw.is_empty() {
                return Err(PatternError::EmptySegment(pattern.to_string()));
            }

            match raw.strip_prefix(':') {
                Some(name) => {
                    if !is_valid_param_name(name) {
                        return Err(PatternError::InvalidParamName {
                            pattern: pattern.to_string(),
                            name: name.to_string(),
                        });
                    }
                    let taken = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                    if taken {
                        return Err(PatternError::DuplicateParam {
                            pattern: pattern.to_string(),
                            name: name.to_string(),
                        });
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Static(raw.to_string())),
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as it was declared.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of the parameters in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// True when both patterns accept exactly the same set of paths.
    ///
    /// Parameter names are irrelevant: `/device/:id` and `/device/:key` collide.
    pub fn same_shape(&self, other: &PathPattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Static(a), Segment::Static(b)) => a.eq_ignore_ascii_case(b),
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// Build a concrete path, percent-encoding parameter values.
    pub fn build(&self, params: &Params) -> Result<String, PatternError> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Static(text) => path.push_str(text),
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .filter(|v| !v.is_empty())
                        .ok_or_else(|| PatternError::MissingParam(name.clone()))?;
                    path.extend(utf8_percent_encode(value, SEGMENT));
                }
            }
        }
        Ok(path)
    }
}

impl FromStr for PathPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Split a path into its segments, ignoring the leading and one trailing slash.
///
/// Only `/` and the empty path have zero segments; `//` is one empty segment.
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() {
        return Vec::new();
    }
    let path = path.strip_suffix('/').unwrap_or(path);
    path.split('/').collect()
}

fn is_valid_param_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_no_segments() {
        let pattern = PathPattern::parse("/").unwrap();
        assert!(pattern.segments().is_empty());
        assert_eq!(pattern.build(&Params::new()).unwrap(), "/");
    }

    #[test]
    fn test_param_segment() {
        let pattern = PathPattern::parse("/device/:id").unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Static("device".into()),
                Segment::Param("id".into())
            ]
        );
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn test_rejects_malformed_patterns() {
        assert_eq!(
            PathPattern::parse("device"),
            Err(PatternError::MissingLeadingSlash("device".into()))
        );
        assert!(matches!(
            PathPattern::parse("/a//b"),
            Err(PatternError::EmptySegment(_))
        ));
        assert!(matches!(
            PathPattern::parse("/device/:"),
            Err(PatternError::InvalidParamName { .. })
        ));
        assert!(matches!(
            PathPattern::parse("/:id/x/:id"),
            Err(PatternError::DuplicateParam { .. })
        ));
    }

    #[test]
    fn test_same_shape_ignores_param_names_and_case() {
        let a = PathPattern::parse("/device/:id").unwrap();
        let b = PathPattern::parse("/Device/:key/").unwrap();
        let c = PathPattern::parse("/devices/:id").unwrap();
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
    }

    #[test]
    fn test_build_encodes_values() {
        let pattern = PathPattern::parse("/device/:id").unwrap();
        let params: Params = [("id", "a b/c")].into_iter().collect();
        assert_eq!(pattern.build(&params).unwrap(), "/device/a%20b%2Fc");

        assert_eq!(
            pattern.build(&Params::new()),
            Err(PatternError::MissingParam("id".into()))
        );
    }

    #[test]
    fn test_split_path() {
        assert!(split_path("/").is_empty());
        assert!(split_path("").is_empty());
        assert_eq!(split_path("/device/42/"), vec!["device", "42"]);
        assert_eq!(split_path("/device//42"), vec!["device", "", "42"]);
        assert_eq!(split_path("//"), vec![""]);
        assert_eq!(split_path("//nonexistent"), vec!["", "nonexistent"]);
    }
}
