//! Loan transactions repository
//!
//! Issue and return each run as a single database transaction holding a row
//! lock for the full read-modify-write, so two concurrent issues against a
//! last remaining copy cannot both succeed and a double return cannot
//! double-increment the copy count.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::transaction::{
        overdue_fine, DueReminder, IssueRequest, LoanTransaction, TransactionStatus,
    },
};

#[derive(Clone)]
pub struct TransactionsRepository {
    pool: Pool<Postgres>,
}

impl TransactionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get transaction by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<LoanTransaction> {
        sqlx::query_as::<_, LoanTransaction>("SELECT * FROM transactions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))
    }

    /// Issue a book to a member.
    ///
    /// Locks the book row, rejects when the book is missing or no copy is
    /// available, then decrements the copy count and inserts the
    /// transaction as one atomic unit.
    pub async fn issue(&self, req: &IssueRequest, due_date: NaiveDate) -> AppResult<LoanTransaction> {
        let mut tx = self.pool.begin().await?;

        let member_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE id = $1)")
                .bind(req.member_id)
                .fetch_one(&mut *tx)
                .await?;

        if !member_exists {
            return Err(AppError::NotFound(format!(
                "Member with id {} not found",
                req.member_id
            )));
        }

        let available: Option<i32> =
            sqlx::query_scalar("SELECT available_copies FROM books WHERE id = $1 FOR UPDATE")
                .bind(req.book_id)
                .fetch_optional(&mut *tx)
                .await?;

        // A missing book and an exhausted one are the same business-rule
        // rejection on the wire.
        match available {
            Some(n) if n > 0 => {}
            _ => return Err(AppError::Precondition("Book unavailable".to_string())),
        }

        sqlx::query("UPDATE books SET available_copies = available_copies - 1 WHERE id = $1")
            .bind(req.book_id)
            .execute(&mut *tx)
            .await?;

        let txn = sqlx::query_as::<_, LoanTransaction>(
            r#"
            INSERT INTO transactions (member_id, book_id, issue_date, due_date, fine_amount, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(req.member_id)
        .bind(req.book_id)
        .bind(req.issue_date)
        .bind(due_date)
        .bind(Decimal::ZERO)
        .bind(TransactionStatus::Issued.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(txn)
    }

    /// Return an issued book.
    ///
    /// Locks the loan row, permanently rejects a second return, restores the
    /// copy count (capped at `total_copies`) and applies the overdue fine,
    /// all as one atomic unit.
    pub async fn return_loan(
        &self,
        txn_id: i32,
        today: NaiveDate,
        fine_per_day: i64,
    ) -> AppResult<LoanTransaction> {
        let mut tx = self.pool.begin().await?;

        let loan = sqlx::query_as::<_, LoanTransaction>(
            "SELECT * FROM transactions WHERE id = $1 FOR UPDATE",
        )
        .bind(txn_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Transaction not found".to_string()))?;

        if TransactionStatus::from(loan.status.as_str()) == TransactionStatus::Returned {
            return Err(AppError::Precondition(
                "Transaction already returned".to_string(),
            ));
        }

        let fine = overdue_fine(loan.due_date, today, fine_per_day);

        let updated = sqlx::query_as::<_, LoanTransaction>(
            r#"
            UPDATE transactions
            SET return_date = $1, status = $2, fine_amount = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(today)
        .bind(TransactionStatus::Returned.as_str())
        .bind(fine)
        .bind(txn_id)
        .fetch_one(&mut *tx)
        .await?;

        // The cap only matters after manual data edits; double returns are
        // already rejected above.
        sqlx::query(
            "UPDATE books SET available_copies = LEAST(available_copies + 1, total_copies) WHERE id = $1",
        )
        .bind(loan.book_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Transactions whose due date equals the given date, joined with the
    /// member address and book title for the reminder email. No status
    /// filter: already-returned loans due today still match.
    pub async fn due_on(&self, date: NaiveDate) -> AppResult<Vec<DueReminder>> {
        let rows = sqlx::query_as::<_, DueReminder>(
            r#"
            SELECT t.id AS transaction_id, m.email, m.first_name, b.title AS book_title
            FROM transactions t
            JOIN members m ON t.member_id = m.id
            JOIN books b ON t.book_id = b.id
            WHERE t.due_date = $1
            ORDER BY t.id
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Count active (not yet returned) loans
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE status = $1")
                .bind(TransactionStatus::Issued.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
