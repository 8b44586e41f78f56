//! Navigation targets.
//!
//! A [`Location`] is the routable part of a URL. Absolute URLs
//! (`http://host/device/42#top`) are parsed with `url` and contribute only
//! their path, query and fragment. Anything else is a path reference and is
//! split literally: `//x` stays the path `//x` and is never read as an
//! authority. A reference without a leading slash is rooted, so `device/42`
//! routes on `/device/42`.

use std::fmt;

use serde::Serialize;
use url::Url;

/// A requested URL split into path, query and fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    path: String,
    query: Option<String>,
    fragment: Option<String>,
}

impl Location {
    /// Parse a navigation target.
    ///
    /// Only inputs of the form `scheme://...` can fail.
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        let input = input.trim();
        if !has_scheme(input) {
            return Ok(Self::from_reference(input));
        }

        let url = Url::parse(input)?;
        Ok(Self {
            path: url.path().to_string(),
            query: url.query().map(str::to_string),
            fragment: url.fragment().map(str::to_string),
        })
    }

    /// The location of the application root.
    pub fn root() -> Self {
        Self {
            path: "/".to_string(),
            query: None,
            fragment: None,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    fn from_reference(input: &str) -> Self {
        let (rest, fragment) = match input.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (input, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        Self {
            path,
            query,
            fragment,
        }
    }
}

/// True for `scheme://...` where scheme is `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}
