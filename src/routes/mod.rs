//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the users and coin APIs and stitches them with Leptos
//! SSR rendering under a single Axum router. The dashboard lives at `/`; its
//! WASM bundle is served from the Leptos site package directory.
//!
//! CORS
//! ====
//! `with_cors` wraps the whole router. `CorsLayer` answers preflights; the
//! allow-origin, allow-methods and allow-headers values are then stamped on
//! every other response too, unless a handler already set them.

pub mod coin;
pub mod users;

use std::path::PathBuf;

use axum::Router;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

const ALLOWED_METHODS: [Method; 6] =
    [Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE, Method::OPTIONS];
const ALLOWED_METHODS_VALUE: &str = "GET, POST, PUT, PATCH, DELETE, OPTIONS";
const ALLOWED_HEADERS_VALUE: &str = "Content-Type, Authorization";

/// Users and coin APIs plus the health check.
pub(crate) fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/go/users", get(users::list_users).post(users::create_user))
        .route("/api/go/users/{id}", get(users::get_user))
        .route("/api/go/coin", get(coin::get_coin))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Permissive CORS on every response, preflight or not.
pub(crate) fn with_cors(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    router
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS_VALUE),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS_VALUE),
        ))
}

/// Full application: API routes + Leptos SSR + site assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section or `LEPTOS_*` overrides).
pub fn app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());
    let pkg_dir = leptos_options.site_pkg_dir.to_string();

    let router = api_routes(state)
        .merge(leptos_router)
        .nest_service(&format!("/{pkg_dir}"), ServeDir::new(site_root_path.join(&pkg_dir)));

    Ok(with_cors(router).layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
