//! Normalized book metadata
//!
//! Canonical shape produced after reconciling the heterogeneous catalog
//! provider schemas. Fields a provider does not know stay `None`; partial
//! records are never an error.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookMetadata {
    pub isbn: String,
    pub title: Option<String>,
    /// Multiple authors joined with ", "
    pub author: Option<String>,
    pub publisher: Option<String>,
    /// Kept as a string: providers disagree on date granularity
    pub publication_year: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
    pub page_count: Option<i32>,
    pub language: Option<String>,
}
