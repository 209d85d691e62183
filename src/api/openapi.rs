//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, members, metadata, stats, transactions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "1.0.0",
        description = "Library Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::create_book,
        books::search_books,
        books::get_book,
        books::create_review,
        books::list_reviews,
        // Members
        members::create_member,
        members::list_members,
        members::get_member,
        // Transactions
        transactions::issue_book,
        transactions::return_book,
        transactions::notify_due,
        // Metadata
        metadata::lookup_isbn,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::review::BookReview,
            crate::models::review::CreateReview,
            // Members
            crate::models::member::Member,
            crate::models::member::CreateMember,
            crate::models::member::MemberStatus,
            // Transactions
            crate::models::transaction::LoanTransaction,
            crate::models::transaction::IssueRequest,
            crate::models::transaction::TransactionStatus,
            transactions::NotifyResponse,
            // Metadata
            crate::models::metadata::BookMetadata,
            // Stats
            stats::StatsResponse,
            stats::CountEntry,
            stats::LoanCountEntry,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog and reviews"),
        (name = "members", description = "Member management"),
        (name = "transactions", description = "Loan workflow"),
        (name = "metadata", description = "ISBN metadata lookup"),
        (name = "stats", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
