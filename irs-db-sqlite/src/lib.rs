//! SQLite backend for the IRS synthetic data store.
//!
//! Amounts are stored as REAL; [`decimal`] converts them back to
//! [`rust_decimal::Decimal`] rounded to cents.

pub mod decimal;
mod factory;
mod repository;

pub use factory::SqliteRepositoryFactory;
pub use repository::SqliteRepository;
