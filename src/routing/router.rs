//! Route lookup and navigation state.
//!
//! # Responsibilities
//! - Resolve URLs against the route table
//! - Track the active route through a bounded history
//! - Build paths for navigation by route name
//! - Notify subscribers of every navigation
//!
//! # Design Decisions
//! - Lookups borrow `&self`; navigation needs `&mut self` (one event at a time)
//! - An unmatched URL is not an error: it is recorded with no active route
//! - Listeners are broadcast receivers; a slow listener lags, it never blocks

use std::fmt;
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::observability::metrics;
use crate::routing::history::{History, HistoryEntry};
use crate::routing::location::Location;
use crate::routing::params::Params;
use crate::routing::pattern::PatternError;
use crate::routing::table::{RouteMatch, RouteTable};

/// Error type for navigation operations.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("invalid navigation target '{target}': {source}")]
    InvalidUrl {
        target: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no route named '{0}'")]
    UnknownRoute(String),

    #[error("cannot build path for route '{route}': {source}")]
    Build {
        route: String,
        #[source]
        source: PatternError,
    },
}

/// How the active location changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    Push,
    Replace,
    Back,
    Forward,
}

impl NavigationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationKind::Push => "push",
            NavigationKind::Replace => "replace",
            NavigationKind::Back => "back",
            NavigationKind::Forward => "forward",
        }
    }
}

impl fmt::Display for NavigationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivered to subscribers after each navigation.
#[derive(Debug, Clone)]
pub struct NavigationEvent {
    pub kind: NavigationKind,
    pub from: Option<Location>,
    pub to: Location,
    /// Name of the route now active, `None` if nothing matched.
    pub route: Option<String>,
}

/// Router tuning.
#[derive(Debug, Clone, Copy)]
pub struct RouterOptions {
    /// Maximum history entries kept.
    pub max_history: usize,
    /// Buffered events per subscriber before it starts lagging.
    pub event_capacity: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            max_history: 50,
            event_capacity: 16,
        }
    }
}

/// The application router.
///
/// Constructed once at startup and handed to whoever renders views.
pub struct Router {
    table: Arc<RouteTable>,
    history: History,
    events: broadcast::Sender<NavigationEvent>,
}

impl Router {
    pub fn new(table: RouteTable, options: RouterOptions) -> Self {
        let (events, _) = broadcast::channel(options.event_capacity.max(1));
        Self {
            table: Arc::new(table),
            history: History::new(options.max_history),
            events,
        }
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    /// Look up a URL without touching history.
    ///
    /// Unparseable input resolves to no match.
    pub fn resolve(&self, url: &str) -> Option<RouteMatch> {
        match Location::parse(url) {
            Ok(location) => self.resolve_location(&location),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Unparseable navigation target");
                None
            }
        }
    }

    pub fn resolve_location(&self, location: &Location) -> Option<RouteMatch> {
        self.table.find(location.path())
    }

    /// Build the concrete path of a named route.
    pub fn resolve_named(&self, name: &str, params: &Params) -> Result<String, RouterError> {
        let route = self
            .table
            .by_name(name)
            .ok_or_else(|| RouterError::UnknownRoute(name.to_string()))?;
        route
            .pattern()
            .build(params)
            .map_err(|source| RouterError::Build {
                route: name.to_string(),
                source,
            })
    }

    /// Navigate to `url`, adding a history entry.
    pub fn push(&mut self, url: &str) -> Result<Option<RouteMatch>, RouterError> {
        self.navigate(url, NavigationKind::Push)
    }

    /// Navigate to a named route.
    pub fn push_named(
        &mut self,
        name: &str,
        params: &Params,
    ) -> Result<Option<RouteMatch>, RouterError> {
        let path = self.resolve_named(name, params)?;
        self.push(&path)
    }

    /// Navigate to `url`, overwriting the current history entry.
    pub fn replace(&mut self, url: &str) -> Result<Option<RouteMatch>, RouterError> {
        self.navigate(url, NavigationKind::Replace)
    }

    /// Step back in history. Returns `None` when already at the oldest entry.
    pub fn back(&mut self) -> Option<&HistoryEntry> {
        let from = self.current_location().cloned();
        let entry = self.history.back()?.clone();
        self.emit(NavigationKind::Back, from, &entry);
        self.history.current()
    }

    /// Step forward in history. Returns `None` when already at the newest entry.
    pub fn forward(&mut self) -> Option<&HistoryEntry> {
        let from = self.current_location().cloned();
        let entry = self.history.forward()?.clone();
        self.emit(NavigationKind::Forward, from, &entry);
        self.history.current()
    }

    /// The active route, if the current location matched one.
    pub fn current(&self) -> Option<&RouteMatch> {
        self.history.current().and_then(|e| e.matched.as_ref())
    }

    pub fn current_location(&self) -> Option<&Location> {
        self.history.current().map(|e| &e.location)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Register a navigation listener.
    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.events.subscribe()
    }

    fn navigate(
        &mut self,
        url: &str,
        kind: NavigationKind,
    ) -> Result<Option<RouteMatch>, RouterError> {
        let location = Location::parse(url).map_err(|source| RouterError::InvalidUrl {
            target: url.to_string(),
            source,
        })?;
        let matched = self.resolve_location(&location);
        let from = self.current_location().cloned();

        let entry = HistoryEntry { location, matched };
        match kind {
            NavigationKind::Replace => self.history.replace(entry.clone()),
            _ => self.history.push(entry.clone()),
        }
        self.emit(kind, from, &entry);

        Ok(entry.matched)
    }

    fn emit(&self, kind: NavigationKind, from: Option<Location>, entry: &HistoryEntry) {
        let route = entry.matched.as_ref().map(|m| m.name.clone());

        tracing::debug!(
            kind = %kind,
            to = %entry.location,
            route = route.as_deref().unwrap_or("none"),
            "Navigation"
        );
        metrics::record_navigation(kind.as_str(), route.as_deref());

        // No subscribers is fine
        let _ = self.events.send(NavigationEvent {
            kind,
            from,
            to: entry.location.clone(),
            route,
        });
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.table.len())
            .field("history", &self.history.len())
            .field("current", &self.current_location())
            .finish()
    }
}
