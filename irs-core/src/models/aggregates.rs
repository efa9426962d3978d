use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Total refunds paid out to taxpayers of one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRefunds {
    pub state: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_refunds: Decimal,
}

/// Number of returns filed for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearFilings {
    pub year: i32,
    pub filings: i64,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn state_refunds_serializes_total_as_number() {
        let row = StateRefunds {
            state: "Ohio".to_string(),
            total_refunds: dec!(1234.50),
        };

        let json = serde_json::to_value(&row).expect("serialize");

        assert_eq!(json, serde_json::json!({ "state": "Ohio", "total_refunds": 1234.5 }));
    }

    #[test]
    fn year_filings_field_names() {
        let row = YearFilings {
            year: 1999,
            filings: 14,
        };

        let json = serde_json::to_value(row).expect("serialize");

        assert_eq!(json, serde_json::json!({ "year": 1999, "filings": 14 }));
    }
}
