//! Synthetic data generation and seeding for the IRS data store.

pub mod generator;
pub mod seeder;

pub use generator::RecordGenerator;
pub use seeder::{DatabaseSeeder, RETURNS_PER_TAXPAYER, SeedError, SeedReport, TAXPAYERS_PER_SEED};
