//! Route inspection endpoints.
//!
//! - `GET /_portal/routes`: the route table in declaration order
//! - `GET /_portal/resolve?path=...`: what a location resolves to

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::routing::{Location, Params};
use crate::views::View;

/// Prefix reserved for portal endpoints; never routed to views.
pub const API_PREFIX: &str = "/_portal";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteInfo {
    pub name: String,
    pub path: String,
    pub view: String,
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct Resolution {
    pub location: String,
    pub matched: bool,
    pub name: Option<String>,
    pub pattern: Option<String>,
    pub view: Option<&'static str>,
    pub params: Params,
}

pub async fn list_routes(State(state): State<AppState>) -> Json<Vec<RouteInfo>> {
    let routes = state
        .router
        .table()
        .routes()
        .iter()
        .map(|route| RouteInfo {
            name: route.name().to_string(),
            path: route.path().to_string(),
            view: route.view().name().to_string(),
        })
        .collect();
    Json(routes)
}

pub async fn resolve(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Response {
    let location = match Location::parse(&query.path) {
        Ok(location) => location,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, format!("Invalid path: {e}")).into_response();
        }
    };

    let resolution = match state.router.resolve_location(&location) {
        Some(matched) => Resolution {
            location: location.to_string(),
            matched: true,
            view: Some(matched.view.name()),
            name: Some(matched.name),
            pattern: Some(matched.pattern),
            params: matched.params,
        },
        None => Resolution {
            location: location.to_string(),
            matched: false,
            name: None,
            pattern: None,
            view: None,
            params: Params::new(),
        },
    };
    Json(resolution).into_response()
}
