//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation target (URL, path, or route name + params)
//!     → location.rs (split path / query / fragment)
//!     → table.rs (ordered lookup, first match wins)
//!     → matcher.rs (segment comparison, parameter binding)
//!     → Return: RouteMatch or no match
//!
//! Route Compilation (at startup):
//!     (path, name, view)[]
//!     → pattern.rs (compile segments)
//!     → table.rs (reject duplicate paths / names)
//!     → Freeze as immutable RouteTable
//!
//! Navigation (router.rs):
//!     push / replace / back / forward
//!     → history.rs (bounded back/forward stack)
//!     → NavigationEvent to every subscriber
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in the matcher
//! - Deterministic: same input always matches same route
//! - No catch-all route is implied; callers decide how to render no-match

pub mod history;
pub mod location;
pub mod matcher;
pub mod params;
pub mod pattern;
pub mod router;
pub mod table;

pub use history::{History, HistoryEntry};
pub use location::Location;
pub use matcher::Matcher;
pub use params::Params;
pub use pattern::{PathPattern, PatternError, Segment};
pub use router::{NavigationEvent, NavigationKind, Router, RouterError, RouterOptions};
pub use table::{RouteDefinition, RouteMatch, RouteTable, RouteTableBuilder, RouteTableError};
