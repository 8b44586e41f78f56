//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use tower::ServiceExt;

use device_portal::app;
use device_portal::config::PortalConfig;
use device_portal::http::HttpServer;

/// Build a server over the application route table.
pub fn server(config: PortalConfig) -> HttpServer {
    let router = app::build_router(&config.routing).unwrap();
    HttpServer::new(config, router)
}

/// Issue a GET against the in-process app.
pub async fn get(app: axum::Router, uri: &str) -> (StatusCode, HeaderMap, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}
