//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book model from database.
///
/// `available_copies` only ever changes through the issue (-1) and return
/// (+1) workflow and stays within `[0, total_copies]`; the schema carries a
/// matching CHECK constraint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub page_count: Option<i32>,
    pub language: Option<String>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub shelf_location: Option<String>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "isbn must not be empty"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
    pub publisher: Option<String>,
    pub publication_year: Option<i32>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub page_count: Option<i32>,
    pub language: Option<String>,
    #[validate(range(min = 0, message = "total_copies must be non-negative"))]
    pub total_copies: i32,
    /// Defaults to `total_copies` when omitted
    pub available_copies: Option<i32>,
    pub shelf_location: Option<String>,
}

/// Search query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct BookSearchQuery {
    /// Case-insensitive substring matched against title, author, isbn and
    /// category. Empty or missing matches every book.
    #[serde(default)]
    pub query: String,
}
