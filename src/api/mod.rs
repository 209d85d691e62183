//! API handlers for Libris REST endpoints

pub mod books;
pub mod health;
pub mod members;
pub mod metadata;
pub mod openapi;
pub mod stats;
pub mod transactions;
