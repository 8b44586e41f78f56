//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign / propagate request ID)
//!     → routing::Router (resolve location)
//!     → views (render matched view)
//!     → response.rs (wrap in application shell)
//!     → Send to client
//!
//! /_portal/* → api.rs (JSON inspection of the route table)
//! ```

pub mod api;
pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
