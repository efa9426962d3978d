use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{NewTaxReturn, NewTaxpayer, StateRefunds, YearFilings};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Storage seam for the taxpayer and returns tables.
///
/// Every method checks a connection out of the backend's pool for the
/// duration of the call and hands it back on return, including on error.
/// Batch inserts run inside a single transaction: either the whole batch is
/// committed or none of it is.
#[async_trait]
pub trait IrsRepository: Send + Sync {
    // Seeding
    async fn insert_taxpayers(&self, taxpayers: &[NewTaxpayer]) -> Result<u64, RepositoryError>;
    async fn list_taxpayer_ids(&self) -> Result<Vec<i64>, RepositoryError>;
    async fn insert_returns(&self, returns: &[NewTaxReturn]) -> Result<u64, RepositoryError>;

    // Aggregations
    async fn total_revenue(&self) -> Result<Option<Decimal>, RepositoryError>;
    async fn refunds_by_state(&self) -> Result<Vec<StateRefunds>, RepositoryError>;
    async fn filings_by_year(&self) -> Result<Vec<YearFilings>, RepositoryError>;
}
