use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{require_user, AppState};
use crate::api::error::ApiResult;
use crate::domain::{HistoryFilter, Match, MatchEntryForm, MatchId};

pub async fn list_matches(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(filter): Query<HistoryFilter>,
) -> ApiResult<Json<Vec<Match>>> {
    let user = require_user(&state, &headers)?;
    Ok(Json(state.matches.history(&user, &filter)?))
}

pub async fn create_match(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(form): Json<MatchEntryForm>,
) -> ApiResult<impl IntoResponse> {
    let user = require_user(&state, &headers)?;
    let stored = state.matches.record_match(Some(&user), &form)?;
    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn update_match(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<MatchId>,
    Json(form): Json<MatchEntryForm>,
) -> ApiResult<Json<Match>> {
    let user = require_user(&state, &headers)?;
    Ok(Json(state.matches.update_match(&user, id, &form)?))
}

pub async fn delete_match(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<MatchId>,
) -> ApiResult<StatusCode> {
    let user = require_user(&state, &headers)?;
    state.matches.delete_match(&user, id)?;
    Ok(StatusCode::NO_CONTENT)
}
