//! Loan transaction model and the fine rule

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Transaction lifecycle states stored as text in the `status` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TransactionStatus {
    Issued,
    Returned,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Issued => "Issued",
            TransactionStatus::Returned => "Returned",
        }
    }
}

impl From<&str> for TransactionStatus {
    fn from(s: &str) -> Self {
        match s {
            "Returned" => TransactionStatus::Returned,
            _ => TransactionStatus::Issued,
        }
    }
}

/// Loan transaction model from database.
///
/// Created by the issue operation (status Issued, fine 0) and mutated
/// exactly once by the return operation; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanTransaction {
    pub id: i32,
    pub member_id: i32,
    pub book_id: i32,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    #[schema(value_type = f64)]
    pub fine_amount: Decimal,
    pub status: String,
}

/// Issue loan request
#[derive(Debug, Deserialize, ToSchema)]
pub struct IssueRequest {
    pub member_id: i32,
    pub book_id: i32,
    pub issue_date: NaiveDate,
    /// Defaults to `issue_date` plus the configured loan period
    pub due_date: Option<NaiveDate>,
}

/// Row used by the due-notification sweep: one per matched transaction,
/// joined with the member's address and the book title.
#[derive(Debug, Clone, FromRow)]
pub struct DueReminder {
    pub transaction_id: i32,
    pub email: String,
    pub first_name: String,
    pub book_title: String,
}

/// Flat overdue fine: `days_late * rate`, no cap, no grace period.
/// A return on or before the due date costs nothing.
pub fn overdue_fine(due_date: NaiveDate, today: NaiveDate, fine_per_day: i64) -> Decimal {
    let days_late = (today - due_date).num_days();
    if days_late <= 0 {
        return Decimal::ZERO;
    }
    Decimal::from(days_late * fine_per_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fine_three_days_late() {
        let fine = overdue_fine(date(2024, 1, 1), date(2024, 1, 4), 5);
        assert_eq!(fine, Decimal::from(15));
    }

    #[test]
    fn test_fine_on_due_date() {
        let fine = overdue_fine(date(2024, 1, 1), date(2024, 1, 1), 5);
        assert_eq!(fine, Decimal::ZERO);
    }

    #[test]
    fn test_fine_early_return() {
        let fine = overdue_fine(date(2024, 1, 10), date(2024, 1, 4), 5);
        assert_eq!(fine, Decimal::ZERO);
    }

    #[test]
    fn test_fine_has_no_cap() {
        let fine = overdue_fine(date(2024, 1, 1), date(2025, 1, 1), 5);
        assert_eq!(fine, Decimal::from(366 * 5));
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(TransactionStatus::from("Issued"), TransactionStatus::Issued);
        assert_eq!(TransactionStatus::from("Returned"), TransactionStatus::Returned);
        assert_eq!(TransactionStatus::Returned.as_str(), "Returned");
    }
}
