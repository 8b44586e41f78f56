//! Path matching logic.
//!
//! # Responsibilities
//! - Match a requested path against a compiled pattern
//! - Bind parameter segments to their percent-decoded values
//! - Keep a segment raw when its escapes do not decode to UTF-8
//!
//! # Design Decisions
//! - Static segments are case-insensitive (ASCII)
//! - A parameter matches exactly one non-empty segment
//! - Segment counts must be equal; there is no prefix matching
//! - Query and fragment never reach the matcher

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::routing::params::Params;
use crate::routing::pattern::{split_path, PathPattern, Segment};

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns the bound parameters if the path matches this condition.
    fn matches(&self, path: &str) -> Option<Params>;
}

impl Matcher for PathPattern {
    fn matches(&self, path: &str) -> Option<Params> {
        let requested = split_path(path);
        let segments = self.segments();
        if requested.len() != segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, raw) in segments.iter().zip(requested) {
            let decoded = match percent_decode_str(raw).decode_utf8() {
                Ok(decoded) => decoded,
                Err(_) => Cow::Borrowed(raw),
            };
            match segment {
                Segment::Static(text) => {
                    if !text.eq_ignore_ascii_case(&decoded) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if decoded.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), decoded.into_owned());
                }
            }
        }
        Some(params)
    }
}
