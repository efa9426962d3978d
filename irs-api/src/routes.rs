//! HTTP routes. Each handler performs one unit of work against the store
//! and releases its connection before responding.
//!
//! - `GET /seed-database`: insert a batch of synthetic records
//! - `GET /total-revenue`: sum of `tax_paid` over all returns
//! - `GET /refunds-by-state`: refund totals grouped by taxpayer state
//! - `GET /filings-by-year`: return counts grouped by filing year

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use irs_core::{StateRefunds, YearFilings};
use irs_data::DatabaseSeeder;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{error, info};

use crate::app::AppState;
use crate::error::ApiError;

pub const SEED_SUCCESS_MESSAGE: &str = "Database seeded successfully!";

/// Build the axum router (separated for testing).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/seed-database", get(seed_database))
        .route("/total-revenue", get(total_revenue))
        .route("/refunds-by-state", get(refunds_by_state))
        .route("/filings-by-year", get(filings_by_year))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TotalRevenueResponse {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total_revenue: Option<Decimal>,
}

/// Seeding failures are reported in the message, never as an error status.
async fn seed_database(State(state): State<AppState>) -> Json<SeedResponse> {
    let mut generator = state.generator();
    let message = match DatabaseSeeder::seed(&*state.repo, &mut generator).await {
        Ok(report) => {
            info!(
                taxpayers = report.taxpayers_inserted,
                returns = report.returns_inserted,
                "seed request complete"
            );
            SEED_SUCCESS_MESSAGE.to_string()
        }
        Err(e) => {
            error!(error = %e, "seed request failed");
            format!("Error: {}", e.repository_error())
        }
    };
    Json(SeedResponse { message })
}

async fn total_revenue(
    State(state): State<AppState>,
) -> Result<Json<TotalRevenueResponse>, ApiError> {
    let total_revenue = state.repo.total_revenue().await?;
    Ok(Json(TotalRevenueResponse { total_revenue }))
}

async fn refunds_by_state(
    State(state): State<AppState>,
) -> Result<Json<Vec<StateRefunds>>, ApiError> {
    Ok(Json(state.repo.refunds_by_state().await?))
}

async fn filings_by_year(
    State(state): State<AppState>,
) -> Result<Json<Vec<YearFilings>>, ApiError> {
    Ok(Json(state.repo.filings_by_year().await?))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn total_revenue_serializes_as_number_or_null() {
        let some = TotalRevenueResponse {
            total_revenue: Some(dec!(1234.50)),
        };
        let none = TotalRevenueResponse {
            total_revenue: None,
        };

        assert_eq!(
            serde_json::to_value(&some).unwrap(),
            serde_json::json!({ "total_revenue": 1234.5 })
        );
        assert_eq!(
            serde_json::to_value(&none).unwrap(),
            serde_json::json!({ "total_revenue": null })
        );
    }
}
