//! Device portal: a QR scanner front page and per-device info pages, served
//! through an ordered, history-aware route table.

pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod views;

pub use config::PortalConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::Router;
