mod aggregates;
mod filing_type;
mod tax_return;
mod taxpayer;

pub use aggregates::{StateRefunds, YearFilings};
pub use filing_type::FilingType;
pub use tax_return::NewTaxReturn;
pub use taxpayer::NewTaxpayer;
