use serde::{Deserialize, Serialize};

/// A synthetic taxpayer awaiting insertion. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaxpayer {
    pub name: String,
    pub age: i32,
    pub state: String,
}
