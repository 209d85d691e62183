//! Book reviews repository

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::review::{BookReview, CreateReview},
};

#[derive(Clone)]
pub struct ReviewsRepository {
    pool: Pool<Postgres>,
}

impl ReviewsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create a review for a book
    pub async fn create(
        &self,
        book_id: i32,
        review: &CreateReview,
        review_date: NaiveDate,
    ) -> AppResult<BookReview> {
        let created = sqlx::query_as::<_, BookReview>(
            r#"
            INSERT INTO book_reviews (book_id, member_id, rating, review_text, review_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(review.member_id)
        .bind(review.rating)
        .bind(&review.review_text)
        .bind(review_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// List reviews for a book, newest first
    pub async fn list_for_book(&self, book_id: i32) -> AppResult<Vec<BookReview>> {
        let reviews = sqlx::query_as::<_, BookReview>(
            "SELECT * FROM book_reviews WHERE book_id = $1 ORDER BY review_date DESC, id DESC",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }
}
