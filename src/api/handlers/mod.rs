use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::api::error::{ApiError, ApiResult};
use crate::auth::AuthService;
use crate::config::settings::AppConfig;
use crate::domain::CurrentUser;
use crate::services::matches::MatchService;

pub mod auth;
pub mod matches;
pub mod stats;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub matches: MatchService,
    pub config: AppConfig,
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Guard for every endpoint that acts on behalf of a user
pub fn require_user(state: &AppState, headers: &HeaderMap) -> ApiResult<CurrentUser> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthorized)?;
    state.auth.current_user(token)?.ok_or(ApiError::Unauthorized)
}
