//! Statistics endpoints for the dashboard

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppResult;

#[derive(Serialize, ToSchema)]
pub struct CountEntry {
    pub total: i64,
}

#[derive(Serialize, ToSchema)]
pub struct LoanCountEntry {
    pub active: i64,
}

#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    pub books: CountEntry,
    pub members: CountEntry,
    pub loans: LoanCountEntry,
}

/// Aggregate counts for the dashboard
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Dashboard counts", body = StatsResponse)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<StatsResponse>> {
    let stats = state.services.stats.dashboard().await?;

    Ok(Json(StatsResponse {
        books: CountEntry {
            total: stats.total_books,
        },
        members: CountEntry {
            total: stats.total_members,
        },
        loans: LoanCountEntry {
            active: stats.active_loans,
        },
    }))
}
