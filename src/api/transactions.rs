//! Loan transaction endpoints: issue, return, due notifications

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::transaction::{IssueRequest, LoanTransaction},
};

/// Due-notification sweep response
#[derive(Serialize, ToSchema)]
pub struct NotifyResponse {
    /// Number of transactions matched by the sweep (not emails delivered)
    pub notified: usize,
}

/// Issue a book to a member
#[utoipa::path(
    post,
    path = "/transactions/issue",
    tag = "transactions",
    request_body = IssueRequest,
    responses(
        (status = 201, description = "Loan created", body = LoanTransaction),
        (status = 400, description = "Book unavailable"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn issue_book(
    State(state): State<crate::AppState>,
    Json(request): Json<IssueRequest>,
) -> AppResult<(StatusCode, Json<LoanTransaction>)> {
    let txn = state.services.loans.issue(request).await?;
    Ok((StatusCode::CREATED, Json(txn)))
}

/// Return an issued book
#[utoipa::path(
    post,
    path = "/transactions/return/{txn_id}",
    tag = "transactions",
    params(
        ("txn_id" = i32, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Book returned", body = LoanTransaction),
        (status = 400, description = "Transaction already returned"),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(txn_id): Path<i32>,
) -> AppResult<Json<LoanTransaction>> {
    let txn = state.services.loans.return_loan(txn_id).await?;
    Ok(Json(txn))
}

/// Send reminder emails for all transactions due today
#[utoipa::path(
    post,
    path = "/notify/due",
    tag = "transactions",
    responses(
        (status = 200, description = "Sweep completed", body = NotifyResponse)
    )
)]
pub async fn notify_due(
    State(state): State<crate::AppState>,
) -> AppResult<Json<NotifyResponse>> {
    let notified = state.services.loans.notify_due().await?;
    Ok(Json(NotifyResponse { notified }))
}
