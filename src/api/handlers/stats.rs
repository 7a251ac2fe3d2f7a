use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Json,
};
use std::sync::Arc;

use super::{require_user, AppState};
use crate::api::error::{ApiError, ApiResult};
use crate::api::models::ChartResponse;
use crate::domain::HistoryFilter;
use crate::performance::{tooltip, MatchStatistics, Tooltip};
use crate::services::dashboard::Dashboard;

pub async fn get_statistics(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<MatchStatistics>> {
    let user = require_user(&state, &headers)?;
    Ok(Json(state.matches.statistics(&user)?))
}

pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<ChartResponse>> {
    let user = require_user(&state, &headers)?;
    let series = state.matches.series(&user)?;
    Ok(Json(ChartResponse::new(series, &state.config.chart)))
}

pub async fn get_tooltip(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(index): Path<usize>,
) -> ApiResult<Json<Tooltip>> {
    let user = require_user(&state, &headers)?;
    let series = state.matches.series(&user)?;
    tooltip(&series, index)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no chart point at index {}", index)))
}

pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(filter): Query<HistoryFilter>,
) -> ApiResult<Json<Dashboard>> {
    let user = require_user(&state, &headers)?;
    Ok(Json(state.matches.dashboard(&user, &filter)?))
}
