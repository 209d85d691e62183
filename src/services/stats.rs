//! Statistics service for the dashboard

use crate::{error::AppResult, repository::Repository};

/// Aggregate counts the dashboard renders
#[derive(Debug, Clone, Copy)]
pub struct DashboardStats {
    pub total_books: i64,
    pub total_members: i64,
    pub active_loans: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn dashboard(&self) -> AppResult<DashboardStats> {
        let total_books = self.repository.books.count().await?;
        let total_members = self.repository.members.count().await?;
        let active_loans = self.repository.transactions.count_active().await?;

        Ok(DashboardStats {
            total_books,
            total_members,
            active_loans,
        })
    }
}
