//! HTTP layer - the JSON API a web client talks to.
//!
//! This module owns no domain rules: every request is authenticated
//! against the in-process session map and delegated to `core/`. Sessions
//! are bearer tokens (UUID v4) handed out by the login endpoints and held
//! in memory without expiry, matching the application's toy trust model.
//!
//! ## Endpoints
//!
//! - `POST /api/login/visitor` - passcode login
//! - `POST /api/login/admin` - username/password login
//! - `POST /api/logout` - invalidate the bearer token
//! - `GET /api/items` - funding overview of the session's scope
//! - `POST /api/items` - create item (admin)
//! - `PUT /api/items/{id}` - edit item (admin)
//! - `DELETE /api/items/{id}` - delete item and its pledges (admin)
//! - `GET /api/items/{id}/sponsorships` - ledger for one item
//! - `POST /api/sponsorships` - record a pledge
//! - `PUT /api/sponsorships/{id}` - correct a pledge (admin)
//! - `GET /health` - health check

/// Request handlers and wire types
pub mod handlers;

use crate::core::account::Session;
use axum::{
    Router,
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Application state shared across handlers
pub struct AppState {
    /// Database connection for all persistence operations
    pub database: DatabaseConnection,

    /// Live sessions, keyed by bearer token
    pub sessions: RwLock<HashMap<String, Session>>,
}

impl AppState {
    /// Create new application state
    #[must_use]
    pub fn new(database: DatabaseConnection) -> Self {
        Self {
            database,
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_handler))
        // Identity/access gate
        .route("/api/login/visitor", post(handlers::login_visitor_handler))
        .route("/api/login/admin", post(handlers::login_admin_handler))
        .route("/api/logout", post(handlers::logout_handler))
        // Item registry + dashboard
        .route(
            "/api/items",
            get(handlers::dashboard_handler).post(handlers::create_item_handler),
        )
        .route(
            "/api/items/{id}",
            put(handlers::update_item_handler).delete(handlers::delete_item_handler),
        )
        .route(
            "/api/items/{id}/sponsorships",
            get(handlers::list_sponsorships_handler),
        )
        // Sponsorship ledger
        .route(
            "/api/sponsorships",
            post(handlers::create_sponsorship_handler),
        )
        .route(
            "/api/sponsorships/{id}",
            put(handlers::update_sponsorship_handler),
        )
        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
