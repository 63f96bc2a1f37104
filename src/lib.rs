//! HTTP API for a scorekeeping service: players, teams, leagues, seasons,
//! locations, games, rulesets, matches, and the plays recorded in them.

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod adapter;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

/// The full service: every resource controller plus request tracing.
pub fn app(models: &models::Models) -> Router {
    routes::register(models).layer(TraceLayer::new_for_http())
}
