use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FilingType;

/// A synthetic return awaiting insertion.
///
/// `taxpayer_id` must already exist in the store; the backends rely on the
/// foreign key to reject anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaxReturn {
    pub taxpayer_id: i64,
    pub year: i32,
    pub tax_paid: Decimal,
    pub refund: Decimal,
    pub filing_type: FilingType,
}
