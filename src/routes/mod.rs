//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the REST and streaming endpoints and stitches them with
//! Leptos SSR rendering of the shell under a single Axum router.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

pub mod auth;
pub mod chat;
pub mod users;

use std::path::PathBuf;

use axum::routing::{get, post, put};
use axum::{Json, Router};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub const SERVICE_NAME: &str = "askgrid";

/// API routes consumed by the shell.
pub fn api_routes(state: AppState, cors_allow_any: bool) -> Router {
    let cors = if cors_allow_any {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/users", get(users::list_users).post(users::add_user))
        .route("/api/users/{id}", put(users::update_user).delete(users::delete_user))
        .route("/api/chat/sse", post(chat::chat_sse))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// API routes + Leptos SSR shell + `/pkg` static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `Cargo.toml` `[package.metadata.leptos]` section).
pub fn app(state: AppState, cors_allow_any: bool) -> Result<Router, String> {
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

    Ok(api_routes(state, cors_allow_any)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(TraceLayer::new_for_http()))
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
}

/// `GET /health`: liveness check.
pub async fn health() -> Json<Health> {
    let timestamp = OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
    Json(Health { status: "healthy", service: SERVICE_NAME, timestamp })
}
