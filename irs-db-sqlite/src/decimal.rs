use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::{Row, TypeInfo, ValueRef};
use irs_core::RepositoryError;

/// Money columns and aggregates are stored and summed as REAL, so values
/// read back are normalized to cents.
pub const MONEY_SCALE: u32 = 2;

/// Get an amount from a row, handling both INTEGER and REAL SQLite types.
///
/// `SUM()` over REAL accumulates binary floating point error, so the result
/// is rounded to [`MONEY_SCALE`] places. NULL reads as zero.
pub fn get_money(row: &sqlx::sqlite::SqliteRow, column: &str) -> Result<Decimal, RepositoryError> {
    get_optional_money(row, column).map(Option::unwrap_or_default)
}

/// Like [`get_money`] but keeps NULL distinct, which is what `SUM()` over an
/// empty table returns.
pub fn get_optional_money(
    row: &sqlx::sqlite::SqliteRow,
    column: &str,
) -> Result<Option<Decimal>, RepositoryError> {
    let value_ref = row
        .try_get_raw(column)
        .map_err(|e| RepositoryError::Database(format!("Column '{}' not found: {}", column, e)))?;

    if value_ref.is_null() {
        return Ok(None);
    }

    let type_name = value_ref.type_info().name().to_string();
    let amount = match type_name.as_str() {
        "INTEGER" => {
            let val: i64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!(
                    "Failed to get INTEGER from '{}': {}",
                    column, e
                ))
            })?;
            Decimal::from(val)
        }
        "REAL" => {
            let val: f64 = row.try_get(column).map_err(|e| {
                RepositoryError::Database(format!("Failed to get REAL from '{}': {}", column, e))
            })?;
            Decimal::try_from(val).map_err(|e| {
                RepositoryError::Database(format!("Failed to convert {} to Decimal: {}", val, e))
            })?
        }
        _ => {
            return Err(RepositoryError::Database(format!(
                "Unexpected type '{}' for column '{}'",
                type_name, column
            )));
        }
    };

    Ok(Some(amount.round_dp(MONEY_SCALE)))
}

/// Convert an amount to f64 for SQLite storage.
pub fn money_to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}
