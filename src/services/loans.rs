//! Loan workflow service: issue, return, due-notification sweep

use chrono::{Duration, NaiveDate, Utc};

use crate::{
    config::LoansConfig,
    error::AppResult,
    models::transaction::{IssueRequest, LoanTransaction},
    repository::Repository,
    services::email::EmailService,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    email: EmailService,
    config: LoansConfig,
}

impl LoansService {
    pub fn new(repository: Repository, email: EmailService, config: LoansConfig) -> Self {
        Self {
            repository,
            email,
            config,
        }
    }

    /// Issue a book to a member. A missing due date defaults to the issue
    /// date plus the configured loan period.
    pub async fn issue(&self, request: IssueRequest) -> AppResult<LoanTransaction> {
        let due_date = request
            .due_date
            .unwrap_or(request.issue_date + Duration::days(self.config.period_days));

        self.repository.transactions.issue(&request, due_date).await
    }

    /// Return an issued book, computing the overdue fine against today
    pub async fn return_loan(&self, txn_id: i32) -> AppResult<LoanTransaction> {
        let today = Utc::now().date_naive();
        self.repository
            .transactions
            .return_loan(txn_id, today, self.config.fine_per_day)
            .await
    }

    /// Send a reminder for every transaction due today.
    ///
    /// Returns the number of MATCHED transactions, not the number of emails
    /// delivered: a notifier failure is logged per recipient and the sweep
    /// keeps going.
    pub async fn notify_due(&self) -> AppResult<usize> {
        let today = Utc::now().date_naive();
        self.notify_due_on(today).await
    }

    pub async fn notify_due_on(&self, today: NaiveDate) -> AppResult<usize> {
        let reminders = self.repository.transactions.due_on(today).await?;

        for reminder in &reminders {
            if let Err(e) = self
                .email
                .send_due_reminder(&reminder.email, &reminder.first_name, &reminder.book_title)
                .await
            {
                tracing::warn!(
                    "Failed to notify {} for transaction {}: {}",
                    reminder.email,
                    reminder.transaction_id,
                    e
                );
            }
        }

        Ok(reminders.len())
    }

    /// Count active loans
    pub async fn count_active(&self) -> AppResult<i64> {
        self.repository.transactions.count_active().await
    }
}
