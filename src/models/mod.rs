//! Data models for Libris

pub mod book;
pub mod member;
pub mod metadata;
pub mod review;
pub mod transaction;

// Re-export commonly used types
pub use book::{Book, CreateBook};
pub use member::{CreateMember, Member, MemberStatus};
pub use metadata::BookMetadata;
pub use review::{BookReview, CreateReview};
pub use transaction::{IssueRequest, LoanTransaction, TransactionStatus};
