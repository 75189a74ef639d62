pub mod amortization;
pub mod comparison;
pub mod config;
pub mod error;
pub mod format;
pub mod types;
pub mod validation;

pub use amortization::{
    compute_monthly_payment, project_year_one, simulate_year_one, year_one_schedule,
    LoanParameters, MonthlyAccrual, YearOneResult, YearOneSimulation,
};
pub use comparison::{compare_refinance, evaluate, ComparisonResult, Direction};
pub use config::CalculatorConfig;
pub use error::RefiError;
pub use types::*;
pub use validation::{RawRefinanceInput, RefinanceInput, RefinanceLimits};

/// Standard result type for all refinance operations
pub type RefiResult<T> = Result<T, RefiError>;
