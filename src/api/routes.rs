use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::handlers::{
    auth::{login, logout, me, register},
    matches::{create_match, delete_match, list_matches, update_match},
    stats::{get_chart, get_dashboard, get_statistics, get_tooltip},
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/me", get(me))
        .route("/api/matches", get(list_matches).post(create_match))
        .route("/api/matches/:id", put(update_match).delete(delete_match))
        .route("/api/stats", get(get_statistics))
        .route("/api/chart", get(get_chart))
        .route("/api/chart/tooltip/:index", get(get_tooltip))
        .route("/api/dashboard", get(get_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
