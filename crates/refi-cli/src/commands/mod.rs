pub mod loan;
pub mod refinance;
