//! Ordered route table.
//!
//! # Responsibilities
//! - Hold route definitions in declaration order
//! - Reject duplicate paths and duplicate names at construction
//! - Return the first matching route for a path, or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - O(n) scan in declaration order; first match wins
//! - No implicit fallback route

use std::sync::Arc;

use crate::routing::matcher::Matcher;
use crate::routing::params::Params;
use crate::routing::pattern::{PathPattern, PatternError};
use crate::views::View;

/// Error type for route table construction.
#[derive(Debug, thiserror::Error)]
pub enum RouteTableError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("route path '{path}' is declared by both '{first}' and '{second}'")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    #[error("route name '{0}' is declared more than once")]
    DuplicateName(String),

    #[error("route name must not be empty (path '{0}')")]
    EmptyName(String),
}

/// A single entry of the route table.
#[derive(Debug, Clone)]
pub struct RouteDefinition {
    pattern: PathPattern,
    name: String,
    view: Arc<dyn View>,
}

impl RouteDefinition {
    pub fn new(
        path: &str,
        name: impl Into<String>,
        view: Arc<dyn View>,
    ) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: PathPattern::parse(path)?,
            name: name.into(),
            view,
        })
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn path(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view(&self) -> &Arc<dyn View> {
        &self.view
    }
}

/// The outcome of a successful lookup.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// Symbolic name of the matched route.
    pub name: String,
    /// Pattern of the matched route, e.g. `/device/:id`.
    pub pattern: String,
    /// The concrete path that was matched.
    pub path: String,
    /// Parameters bound by the match.
    pub params: Params,
    /// View bound to the route.
    pub view: Arc<dyn View>,
}

/// Immutable, ordered set of routes.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDefinition>,
}

impl RouteTable {
    /// Validate and freeze a list of routes.
    pub fn new(routes: Vec<RouteDefinition>) -> Result<Self, RouteTableError> {
        for (i, route) in routes.iter().enumerate() {
            if route.name.trim().is_empty() {
                return Err(RouteTableError::EmptyName(route.path().to_string()));
            }
            for earlier in &routes[..i] {
                if earlier.name == route.name {
                    return Err(RouteTableError::DuplicateName(route.name.clone()));
                }
                if earlier.pattern.same_shape(&route.pattern) {
                    return Err(RouteTableError::DuplicatePath {
                        path: route.path().to_string(),
                        first: earlier.name.clone(),
                        second: route.name.clone(),
                    });
                }
            }
        }
        Ok(Self { routes })
    }

    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Routes in declaration order.
    pub fn routes(&self) -> &[RouteDefinition] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteDefinition> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Find the first route whose pattern matches `path`.
    pub fn find(&self, path: &str) -> Option<RouteMatch> {
        self.routes.iter().find_map(|route| {
            route.pattern.matches(path).map(|params| RouteMatch {
                name: route.name.clone(),
                pattern: route.path().to_string(),
                path: path.to_string(),
                params,
                view: route.view.clone(),
            })
        })
    }
}

/// Collects route declarations; validation happens in [`RouteTableBuilder::build`].
#[derive(Default)]
pub struct RouteTableBuilder {
    pending: Vec<(String, String, Arc<dyn View>)>,
}

impl RouteTableBuilder {
    /// Append a route. Order of calls is match order.
    pub fn route<V>(mut self, path: &str, name: impl Into<String>, view: V) -> Self
    where
        V: View + 'static,
    {
        let view: Arc<dyn View> = Arc::new(view);
        self.pending.push((path.to_string(), name.into(), view));
        self
    }

    pub fn build(self) -> Result<RouteTable, RouteTableError> {
        let routes = self
            .pending
            .into_iter()
            .map(|(path, name, view)| RouteDefinition::new(&path, name, view))
            .collect::<Result<Vec<_>, _>>()?;
        RouteTable::new(routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::{DeviceInfoView, NotFoundView, QrScannerView};

    #[test]
    fn test_first_match_wins() {
        let table = RouteTable::builder()
            .route("/device/latest", "Latest", NotFoundView)
            .route("/device/:id", "DeviceInfo", DeviceInfoView)
            .build()
            .unwrap();

        assert_eq!(table.find("/device/latest").unwrap().name, "Latest");
        assert_eq!(table.find("/device/9").unwrap().name, "DeviceInfo");

        // Reversed declaration order shadows the static route.
        let reversed = RouteTable::builder()
            .route("/device/:id", "DeviceInfo", DeviceInfoView)
            .route("/device/latest", "Latest", NotFoundView)
            .build()
            .unwrap();
        let found = reversed.find("/device/latest").unwrap();
        assert_eq!(found.name, "DeviceInfo");
        assert_eq!(found.params.get("id"), Some("latest"));
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = RouteTable::builder()
            .route("/", "Home", QrScannerView)
            .route("/", "Other", QrScannerView)
            .build()
            .unwrap_err();
        assert!(matches!(err, RouteTableError::DuplicatePath { .. }));

        let err = RouteTable::builder()
            .route("/device/:id", "DeviceInfo", DeviceInfoView)
            .route("/device/:key", "DeviceByKey", DeviceInfoView)
            .build()
            .unwrap_err();
        assert!(matches!(err, RouteTableError::DuplicatePath { .. }));

        let err = RouteTable::builder()
            .route("/", "Home", QrScannerView)
            .route("/scan", "Home", QrScannerView)
            .build()
            .unwrap_err();
        assert!(matches!(err, RouteTableError::DuplicateName(name) if name == "Home"));
    }

    #[test]
    fn test_rejects_bad_pattern_and_empty_name() {
        let err = RouteTable::builder()
            .route("device", "DeviceInfo", DeviceInfoView)
            .build()
            .unwrap_err();
        assert!(matches!(err, RouteTableError::Pattern(_)));

        let err = RouteTable::builder()
            .route("/", " ", QrScannerView)
            .build()
            .unwrap_err();
        assert!(matches!(err, RouteTableError::EmptyName(_)));
    }

    #[test]
    fn test_lookup_by_name() {
        let table = RouteTable::builder()
            .route("/", "Home", QrScannerView)
            .build()
            .unwrap();
        assert_eq!(table.by_name("Home").unwrap().path(), "/");
        assert!(table.by_name("DeviceInfo").is_none());
        assert!(table.find("/missing").is_none());
    }
}
