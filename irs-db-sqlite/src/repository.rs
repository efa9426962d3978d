use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use irs_core::{
    IrsRepository, NewTaxReturn, NewTaxpayer, RepositoryError, StateRefunds, YearFilings,
};
use rust_decimal::Decimal;
use sqlx::{
    Row,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
};
use tracing::debug;

use crate::decimal::{get_money, get_optional_money, money_to_f64};

const SCHEMA: &str = include_str!("../schema/sqlite.sql");

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Open `database_url`, creating the file if it does not exist.
    ///
    /// Accepts a bare path (`irs_data.db`), a sqlx URL (`sqlite:irs_data.db`)
    /// or `:memory:`. An in-memory database lives only as long as its
    /// connection, so it gets a single connection that is never recycled.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid SQLite connection string: {}", database_url))?
            .create_if_missing(true);

        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `taxpayers` and `returns` tables if they are missing.
    /// Existing rows are left untouched.
    pub async fn apply_schema(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .context("Failed to apply SQLite schema")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl IrsRepository for SqliteRepository {
    async fn insert_taxpayers(
        &self,
        taxpayers: &[NewTaxpayer],
    ) -> Result<u64, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        let mut inserted = 0;
        for taxpayer in taxpayers {
            let result = sqlx::query("INSERT INTO taxpayers (name, age, state) VALUES (?, ?, ?)")
                .bind(&taxpayer.name)
                .bind(taxpayer.age)
                .bind(&taxpayer.state)
                .execute(&mut *tx)
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?;
            inserted += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        debug!(inserted, "taxpayer batch committed");
        Ok(inserted)
    }

    async fn list_taxpayer_ids(&self) -> Result<Vec<i64>, RepositoryError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        let rows = sqlx::query("SELECT id FROM taxpayers ORDER BY id")
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.try_get("id")
                    .map_err(|e| RepositoryError::Database(e.to_string()))
            })
            .collect()
    }

    async fn insert_returns(
        &self,
        returns: &[NewTaxReturn],
    ) -> Result<u64, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        let mut inserted = 0;
        for tax_return in returns {
            let result = sqlx::query(
                "INSERT INTO returns (taxpayer_id, year, tax_paid, refund, filing_type)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(tax_return.taxpayer_id)
            .bind(tax_return.year)
            .bind(money_to_f64(tax_return.tax_paid))
            .bind(money_to_f64(tax_return.refund))
            .bind(tax_return.filing_type.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
            inserted += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        debug!(inserted, "return batch committed");
        Ok(inserted)
    }

    async fn total_revenue(&self) -> Result<Option<Decimal>, RepositoryError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        let row = sqlx::query("SELECT SUM(tax_paid) AS total_revenue FROM returns")
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        get_optional_money(&row, "total_revenue")
    }

    async fn refunds_by_state(&self) -> Result<Vec<StateRefunds>, RepositoryError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        let rows = sqlx::query(
            "SELECT t.state AS state, SUM(r.refund) AS total_refunds
             FROM taxpayers t
             JOIN returns r ON t.id = r.taxpayer_id
             GROUP BY t.state",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let mut groups = Vec::with_capacity(rows.len());
        for row in rows {
            groups.push(StateRefunds {
                state: row
                    .try_get("state")
                    .map_err(|e| RepositoryError::Database(e.to_string()))?,
                total_refunds: get_money(&row, "total_refunds")?,
            });
        }
        Ok(groups)
    }

    async fn filings_by_year(&self) -> Result<Vec<YearFilings>, RepositoryError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;

        let rows = sqlx::query("SELECT year, COUNT(*) AS filings FROM returns GROUP BY year")
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter()
            .map(|row| {
                Ok(YearFilings {
                    year: row
                        .try_get("year")
                        .map_err(|e| RepositoryError::Database(e.to_string()))?,
                    filings: row
                        .try_get("filings")
                        .map_err(|e| RepositoryError::Database(e.to_string()))?,
                })
            })
            .collect()
    }
}
