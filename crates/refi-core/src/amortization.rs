//! Level-payment amortisation for a single fixed-rate mortgage.
//!
//! Computes the equated monthly instalment (EMI) for a loan and replays the
//! first twelve months of that fixed-payment schedule to obtain year-one
//! interest and the balance left after year one. All math in
//! `rust_decimal::Decimal`; nothing here rounds, validates or fails.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent, Years};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Number of monthly cycles replayed for the year-one projection.
pub const SIMULATION_MONTHS: u32 = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Terms of one fixed-rate loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Outstanding principal.
    pub principal: Money,
    /// Annual interest rate as a percentage (e.g., 4.0 = 4%).
    pub annual_rate_percent: Percent,
    /// Remaining tenure in years.
    pub tenure_years: Years,
}

impl LoanParameters {
    pub fn new(principal: Money, annual_rate_percent: Percent, tenure_years: Years) -> Self {
        Self {
            principal,
            annual_rate_percent,
            tenure_years,
        }
    }

    /// Periodic rate applied each month (annual percent / 12 / 100).
    pub fn monthly_rate(&self) -> Decimal {
        monthly_rate(self.annual_rate_percent)
    }

    /// Interest accrued in the first month, before any payment.
    pub fn first_month_interest(&self) -> Money {
        self.principal * self.monthly_rate()
    }
}

/// Aggregates of the twelve-month replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearOneSimulation {
    pub interest_paid_year_one: Money,
    pub balance_after_year_one: Money,
}

/// Payment plus year-one aggregates for one loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearOneResult {
    pub monthly_payment: Money,
    pub interest_paid_year_one: Money,
    pub balance_after_year_one: Money,
}

/// One row of the year-one schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAccrual {
    /// 1-based month number.
    pub month: u32,
    pub opening_balance: Money,
    pub interest_portion: Money,
    /// Payment minus interest. Negative when the payment does not cover interest.
    pub principal_portion: Money,
    pub closing_balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Level monthly payment that amortises `principal` over `tenure_years`.
///
/// A zero rate falls back to straight-line repayment. A zero-length tenure
/// has no meaningful payment and yields zero rather than dividing by zero.
pub fn compute_monthly_payment(
    principal: Money,
    annual_rate_percent: Percent,
    tenure_years: Years,
) -> Money {
    let rate = monthly_rate(annual_rate_percent);
    let months = tenure_years * MONTHS_PER_YEAR;

    if rate.is_zero() {
        return principal.checked_div(months).unwrap_or(Decimal::ZERO);
    }

    let growth = match compound_growth(Decimal::ONE + rate, months) {
        Some(g) => g,
        None => return Decimal::ZERO,
    };

    (principal * rate * growth)
        .checked_div(growth - Decimal::ONE)
        .unwrap_or(Decimal::ZERO)
}

/// Replay the first twelve months of a fixed-payment schedule.
///
/// Interest accrues on the balance before that month's payment. The loop
/// always runs all twelve months: a payment below the accrued interest makes
/// the balance grow, and an overpayment can drive it negative.
pub fn simulate_year_one(
    principal: Money,
    annual_rate_percent: Percent,
    _tenure_years: Years,
    monthly_payment: Money,
) -> YearOneSimulation {
    let rate = monthly_rate(annual_rate_percent);
    let mut balance = principal;
    let mut interest_paid = Decimal::ZERO;

    for month in 1..=SIMULATION_MONTHS {
        let row = accrue_month(month, balance, rate, monthly_payment);
        interest_paid += row.interest_portion;
        balance = row.closing_balance;
    }

    YearOneSimulation {
        interest_paid_year_one: interest_paid,
        balance_after_year_one: balance,
    }
}

/// Payment and year-one aggregates for `loan`.
pub fn project_year_one(loan: &LoanParameters) -> YearOneResult {
    let monthly_payment =
        compute_monthly_payment(loan.principal, loan.annual_rate_percent, loan.tenure_years);
    let sim = simulate_year_one(
        loan.principal,
        loan.annual_rate_percent,
        loan.tenure_years,
        monthly_payment,
    );

    YearOneResult {
        monthly_payment,
        interest_paid_year_one: sim.interest_paid_year_one,
        balance_after_year_one: sim.balance_after_year_one,
    }
}

/// Month-by-month rows of the same replay `simulate_year_one` performs.
pub fn year_one_schedule(loan: &LoanParameters) -> Vec<MonthlyAccrual> {
    let rate = loan.monthly_rate();
    let payment =
        compute_monthly_payment(loan.principal, loan.annual_rate_percent, loan.tenure_years);

    let mut rows = Vec::with_capacity(SIMULATION_MONTHS as usize);
    let mut balance = loan.principal;
    for month in 1..=SIMULATION_MONTHS {
        let row = accrue_month(month, balance, rate, payment);
        balance = row.closing_balance;
        rows.push(row);
    }
    rows
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn monthly_rate(annual_rate_percent: Percent) -> Decimal {
    annual_rate_percent / MONTHS_PER_YEAR / dec!(100)
}

fn accrue_month(month: u32, balance: Money, rate: Decimal, payment: Money) -> MonthlyAccrual {
    let interest_portion = balance * rate;
    let principal_portion = payment - interest_portion;

    MonthlyAccrual {
        month,
        opening_balance: balance,
        interest_portion,
        principal_portion,
        closing_balance: balance - principal_portion,
    }
}

/// `base^months`. Whole month counts use exact repeated multiplication;
/// fractional tenures fall back to `powd`.
fn compound_growth(base: Decimal, months: Decimal) -> Option<Decimal> {
    if months.fract().is_zero() && months >= Decimal::ZERO {
        iterative_pow(base, months.to_u32()?)
    } else {
        base.checked_powd(months)
    }
}

/// Compute base^n for a positive integer exponent via iterative multiplication.
fn iterative_pow(base: Decimal, n: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result.checked_mul(base)?;
    }
    Some(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
