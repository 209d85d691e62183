//! ISBN metadata lookup endpoint

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::metadata::BookMetadata};

/// Look up book metadata by ISBN through the catalog provider chain
#[utoipa::path(
    get,
    path = "/isbn/{isbn}",
    tag = "metadata",
    params(
        ("isbn" = String, Path, description = "ISBN to look up")
    ),
    responses(
        (status = 200, description = "Normalized book metadata", body = BookMetadata),
        (status = 404, description = "Book not found")
    )
)]
pub async fn lookup_isbn(
    State(state): State<crate::AppState>,
    Path(isbn): Path<String>,
) -> AppResult<Json<BookMetadata>> {
    let metadata = state.services.metadata.lookup(&isbn).await?;
    Ok(Json(metadata))
}
