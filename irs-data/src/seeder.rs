use irs_core::{IrsRepository, RepositoryError};
use thiserror::Error;
use tracing::{debug, info};

use crate::generator::RecordGenerator;

/// Taxpayers generated by every seeding run.
pub const TAXPAYERS_PER_SEED: usize = 500;

/// Returns generated per taxpayer id on every seeding run.
pub const RETURNS_PER_TAXPAYER: usize = 2;

/// Errors that can occur while seeding, tagged with the pass that failed.
///
/// A failure in a later pass leaves the batches of earlier passes committed.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("inserting taxpayers failed: {0}")]
    Taxpayers(#[source] RepositoryError),

    #[error("reading taxpayer ids failed: {0}")]
    TaxpayerIds(#[source] RepositoryError),

    #[error("inserting returns failed: {0}")]
    Returns(#[source] RepositoryError),
}

impl SeedError {
    /// The store error underneath, whichever pass raised it.
    pub fn repository_error(&self) -> &RepositoryError {
        match self {
            Self::Taxpayers(e) | Self::TaxpayerIds(e) | Self::Returns(e) => e,
        }
    }
}

/// Row counts committed by one seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub taxpayers_inserted: u64,
    pub returns_inserted: u64,
}

/// Populates a store with synthetic taxpayers and returns.
///
/// Works through the [`IrsRepository`] trait so the same seeding logic runs
/// against every backend.
pub struct DatabaseSeeder;

impl DatabaseSeeder {
    /// Run one seeding pass pair against `repo`.
    ///
    /// 1. Insert [`TAXPAYERS_PER_SEED`] generated taxpayers as one batch.
    /// 2. Read back the ids of *every* taxpayer in the store, not just the
    ///    batch from step 1.
    /// 3. Insert [`RETURNS_PER_TAXPAYER`] generated returns for each of those
    ///    ids as a second batch.
    ///
    /// Because step 2 reads the whole table, repeated runs generate returns
    /// for all earlier taxpayers again: the second run against an empty store
    /// adds 2000 returns, the third 3000, and so on.
    pub async fn seed<R: IrsRepository + ?Sized>(
        repo: &R,
        generator: &mut RecordGenerator,
    ) -> Result<SeedReport, SeedError> {
        let taxpayers = generator.taxpayers(TAXPAYERS_PER_SEED);
        let taxpayers_inserted = repo
            .insert_taxpayers(&taxpayers)
            .await
            .map_err(SeedError::Taxpayers)?;
        debug!(taxpayers_inserted, "taxpayer pass complete");

        let taxpayer_ids = repo
            .list_taxpayer_ids()
            .await
            .map_err(SeedError::TaxpayerIds)?;

        let returns: Vec<_> = taxpayer_ids
            .iter()
            .flat_map(|&id| std::iter::repeat_n(id, RETURNS_PER_TAXPAYER))
            .map(|id| generator.tax_return(id))
            .collect();

        let returns_inserted = repo
            .insert_returns(&returns)
            .await
            .map_err(SeedError::Returns)?;

        info!(
            taxpayers_inserted,
            returns_inserted,
            taxpayers_total = taxpayer_ids.len(),
            "database seeded"
        );

        Ok(SeedReport {
            taxpayers_inserted,
            returns_inserted,
        })
    }
}
