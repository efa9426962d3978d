//! MySQL backend for the IRS synthetic data store.
//!
//! The tables must already exist; `schema/mysql.sql` documents the layout.
//! Amounts are `DECIMAL(10,2)` and decode straight into
//! [`rust_decimal::Decimal`].

mod config;
mod factory;
mod repository;

pub use config::StoreConfig;
pub use factory::MySqlRepositoryFactory;
pub use repository::MySqlRepository;
