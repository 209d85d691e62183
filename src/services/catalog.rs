//! Catalog service: book CRUD, search and reviews

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook},
        review::{BookReview, CreateReview},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new book. `available_copies` defaults to `total_copies`
    /// and must stay within `[0, total_copies]`.
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        book.validate()?;

        let available = book.available_copies.unwrap_or(book.total_copies);
        if available < 0 || available > book.total_copies {
            return Err(AppError::Validation(
                "available_copies must be between 0 and total_copies".to_string(),
            ));
        }

        self.repository.books.create(&book, available).await
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Search books by case-insensitive substring
    pub async fn search_books(&self, query: &str) -> AppResult<Vec<Book>> {
        self.repository.books.search(query).await
    }

    /// Create a review for a book
    pub async fn create_review(&self, book_id: i32, review: CreateReview) -> AppResult<BookReview> {
        review.validate()?;

        // Both referenced entities must exist
        self.repository.books.get_by_id(book_id).await?;
        self.repository.members.get_by_id(review.member_id).await?;

        let review_date = review.review_date.unwrap_or_else(|| Utc::now().date_naive());
        self.repository
            .reviews
            .create(book_id, &review, review_date)
            .await
    }

    /// List reviews for a book
    pub async fn list_reviews(&self, book_id: i32) -> AppResult<Vec<BookReview>> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository.reviews.list_for_book(book_id).await
    }
}
