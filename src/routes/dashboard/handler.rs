use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};

use super::model::{AnalyticsQuery, period_days};
use crate::AppState;
use crate::database::repositories::dashboard::DashboardRepository;
use crate::error::AppError;

#[axum::debug_handler]
pub async fn stats(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let stats = DashboardRepository::stats(&state.pool).await?;
    Ok(Json(stats))
}

#[axum::debug_handler]
pub async fn analytics(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let days = period_days(query.period.as_deref());
    let analytics = DashboardRepository::analytics(&state.pool, days).await?;
    Ok(Json(analytics))
}
