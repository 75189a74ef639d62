use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use refi_core::amortization::{
    compute_monthly_payment, project_year_one, year_one_schedule, LoanParameters,
    MonthlyAccrual, YearOneResult,
};
use refi_core::validation::check_loan_terms;

/// Terms of a single fixed-rate loan
#[derive(Args)]
pub struct PaymentArgs {
    /// Outstanding principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent (e.g. 4.0)
    #[arg(long)]
    pub rate: Decimal,

    /// Tenure in years
    #[arg(long)]
    pub tenure: Decimal,
}

/// Single-loan year-one projection
#[derive(Args)]
pub struct YearOneArgs {
    #[command(flatten)]
    pub loan: PaymentArgs,

    /// Include the month-by-month breakdown of the first year
    #[arg(long)]
    pub schedule: bool,
}

impl PaymentArgs {
    fn loan(&self) -> LoanParameters {
        LoanParameters::new(self.principal, self.rate, self.tenure)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PaymentOutput {
    monthly_payment: Decimal,
    monthly_rate: Decimal,
    months: Decimal,
    total_of_payments: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
struct YearOneOutput {
    loan: LoanParameters,
    year_one: YearOneResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<Vec<MonthlyAccrual>>,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan();
    check_loan_terms(&loan)?;

    let monthly_payment =
        compute_monthly_payment(loan.principal, loan.annual_rate_percent, loan.tenure_years);
    let months = loan.tenure_years * Decimal::from(12);
    let output = PaymentOutput {
        monthly_payment,
        monthly_rate: loan.monthly_rate(),
        months,
        total_of_payments: monthly_payment * months,
    };
    Ok(serde_json::to_value(output)?)
}

pub fn run_year_one(args: YearOneArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan = args.loan.loan();
    check_loan_terms(&loan)?;

    let output = YearOneOutput {
        loan,
        year_one: project_year_one(&loan),
        schedule: args.schedule.then(|| year_one_schedule(&loan)),
    };
    Ok(serde_json::to_value(output)?)
}
