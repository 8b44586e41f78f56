//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, concurrency limit, request ID)
//! - Resolve every page request through the application router
//! - Apply routing settings from config reloads
//! - Shut down gracefully

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode, Uri},
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{NotFoundPolicy, PortalConfig, RoutingConfig};
use crate::http::api::{self, API_PREFIX};
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response;
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::metrics;
use crate::routing::{Location, Params, Router as PortalRouter};
use crate::views::{NotFoundView, RenderContext, View};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<PortalRouter>,
    pub routing: Arc<ArcSwap<RoutingConfig>>,
}

/// HTTP server for the device portal.
pub struct HttpServer {
    app: Router,
    config: PortalConfig,
    routing: Arc<ArcSwap<RoutingConfig>>,
}

impl HttpServer {
    /// Create a new HTTP server serving `router`.
    pub fn new(config: PortalConfig, router: PortalRouter) -> Self {
        let routing = Arc::new(ArcSwap::from_pointee(config.routing.clone()));
        let state = AppState {
            router: Arc::new(router),
            routing: routing.clone(),
        };

        let app = Self::build_router(&config, state);
        Self {
            app,
            config,
            routing,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &PortalConfig, state: AppState) -> Router {
        let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request_id(request.headers()),
            )
        });

        Router::new()
            .route(&format!("{API_PREFIX}/routes"), get(api::list_routes))
            .route(&format!("{API_PREFIX}/resolve"), get(api::resolve))
            .route("/", get(page_handler))
            .route("/{*path}", get(page_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(GlobalConcurrencyLimitLayer::new(
                config.listener.max_connections,
            ))
            .layer(propagate_request_id_layer())
            .layer(trace)
            .layer(set_request_id_layer())
    }

    /// The service, for in-process use.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Run the server until the shutdown signal fires.
    ///
    /// Configs received on `config_updates` replace the routing settings;
    /// other sections only take effect on restart.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<PortalConfig>,
        shutdown: watch::Receiver<bool>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let routing = self.routing.clone();
        let mut bind_address = self.config.listener.bind_address.clone();
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                if listener_changed(&mut bind_address, &new_config) {
                    tracing::warn!(
                        bind_address = %new_config.listener.bind_address,
                        "Listener changes require a restart"
                    );
                }
                tracing::info!(
                    not_found = ?new_config.routing.not_found,
                    "Routing settings reloaded"
                );
                routing.store(Arc::new(new_config.routing));
            }
        });

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &PortalConfig {
        &self.config
    }
}

/// Compare the reloaded listener address with the last one seen in the file.
///
/// `last` is updated, so a changed address is reported once per edit.
fn listener_changed(last: &mut String, config: &PortalConfig) -> bool {
    if *last == config.listener.bind_address {
        return false;
    }
    last.clone_from(&config.listener.bind_address);
    true
}

/// Resolve the requested location and render its view.
async fn page_handler(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let start_time = Instant::now();
    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    let location = match Location::parse(target) {
        Ok(location) => location,
        Err(e) => {
            tracing::debug!(location = %target, error = %e, "Unparseable location");
            metrics::record_request(None, 400, start_time);
            return response::html(StatusCode::BAD_REQUEST, response::empty_page());
        }
    };

    let Some(matched) = state.router.resolve_location(&location) else {
        tracing::info!(
            request_id = %request_id(&headers),
            location = %location,
            "No route matched"
        );
        metrics::record_request(None, 404, start_time);

        let document = match state.routing.load().not_found {
            NotFoundPolicy::Empty => response::empty_page(),
            NotFoundPolicy::View => {
                let rendered = NotFoundView.render(&RenderContext {
                    route: None,
                    params: &Params::new(),
                    location: &location,
                });
                response::page(&rendered, NotFoundView.name())
            }
        };
        return response::html(StatusCode::NOT_FOUND, document);
    };

    let rendered = matched.view.render(&RenderContext {
        route: Some(&matched.name),
        params: &matched.params,
        location: &location,
    });

    tracing::debug!(
        route = %matched.name,
        view = matched.view.name(),
        "Rendered view"
    );
    metrics::record_request(Some(&matched.name), 200, start_time);

    response::html(
        StatusCode::OK,
        response::page(&rendered, matched.view.name()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_bind(address: &str) -> PortalConfig {
        let mut config = PortalConfig::default();
        config.listener.bind_address = address.to_string();
        config
    }

    #[test]
    fn test_listener_change_reported_once_per_edit() {
        let mut last = "0.0.0.0:8080".to_string();

        assert!(!listener_changed(&mut last, &with_bind("0.0.0.0:8080")));
        assert!(listener_changed(&mut last, &with_bind("0.0.0.0:9090")));
        assert!(!listener_changed(&mut last, &with_bind("0.0.0.0:9090")));
        assert!(!listener_changed(&mut last, &with_bind("0.0.0.0:9090")));
        assert_eq!(last, "0.0.0.0:9090");
    }

    #[test]
    fn test_server_keeps_file_bind_address() {
        let config = PortalConfig::default();
        let router = crate::app::build_router(&config.routing).unwrap();
        let server = HttpServer::new(config, router);
        assert_eq!(server.config().listener.bind_address, "0.0.0.0:8080");
    }
}
