//! Book review model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book review model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookReview {
    pub id: i32,
    pub book_id: i32,
    pub member_id: i32,
    pub rating: i32,
    pub review_text: Option<String>,
    pub review_date: NaiveDate,
}

/// Create review request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    pub member_id: i32,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i32,
    pub review_text: Option<String>,
    /// Defaults to the current date when omitted
    pub review_date: Option<NaiveDate>,
}
