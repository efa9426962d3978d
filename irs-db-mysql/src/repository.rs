use async_trait::async_trait;
use irs_core::{
    IrsRepository, NewTaxReturn, NewTaxpayer, RepositoryError, StateRefunds, YearFilings,
};
use rust_decimal::Decimal;
use sqlx::{
    Row,
    mysql::{MySqlPool, MySqlRow},
};
use tracing::debug;

const MONEY_SCALE: u32 = 2;

pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    pub async fn new_with_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

/// Integer columns are read through `CAST(... AS SIGNED)` so INT, BIGINT and
/// unsigned ids all arrive as BIGINT.
fn get_i64(row: &MySqlRow, column: &str) -> Result<i64, RepositoryError> {
    row.try_get(column)
        .map_err(|e| RepositoryError::Database(e.to_string()))
}

fn get_i32(row: &MySqlRow, column: &str) -> Result<i32, RepositoryError> {
    let value = get_i64(row, column)?;
    i32::try_from(value).map_err(|_| {
        RepositoryError::Database(format!("Value {} in '{}' does not fit i32", value, column))
    })
}

fn get_optional_money(row: &MySqlRow, column: &str) -> Result<Option<Decimal>, RepositoryError> {
    let value: Option<Decimal> = row
        .try_get(column)
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
    Ok(value.map(|d| d.round_dp(MONEY_SCALE)))
}

#[async_trait]
impl IrsRepository for MySqlRepository {
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

        let rows = sqlx::query("SELECT CAST(id AS SIGNED) AS id FROM taxpayers ORDER BY id")
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(|row| get_i64(row, "id")).collect()
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
            .bind(tax_return.tax_paid)
            .bind(tax_return.refund)
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
                total_refunds: get_optional_money(&row, "total_refunds")?.unwrap_or_default(),
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

        let rows = sqlx::query(
            "SELECT CAST(year AS SIGNED) AS year, COUNT(*) AS filings
             FROM returns
             GROUP BY year",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter()
            .map(|row| {
                Ok(YearFilings {
                    year: get_i32(row, "year")?,
                    filings: get_i64(row, "filings")?,
                })
            })
            .collect()
    }
}
