//! Current-versus-refinanced comparison over the first year.
//!
//! Both loans run through the same amortisation engine and every delta is
//! reported as `new - current`: a negative figure means the refinanced loan
//! is lower, which display layers treat as favourable.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{project_year_one, LoanParameters, YearOneResult};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::{RefinanceInput, RefinanceLimits};
use crate::RefiResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Signed year-one deltas, each `new - current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub interest_difference: Money,
    pub principal_difference: Money,
    pub monthly_difference: Money,
    pub annual_difference: Money,
}

/// How a difference reads to the borrower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// New loan is lower.
    Favorable,
    /// New loan is higher.
    Unfavorable,
    Neutral,
}

impl Direction {
    pub fn of(difference: Decimal) -> Self {
        if difference < Decimal::ZERO {
            Direction::Favorable
        } else if difference > Decimal::ZERO {
            Direction::Unfavorable
        } else {
            Direction::Neutral
        }
    }
}

/// One `Direction` per delta in `ComparisonResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferenceDirections {
    pub interest: Direction,
    pub principal: Direction,
    pub monthly: Direction,
    pub annual: Direction,
}

impl ComparisonResult {
    pub fn directions(&self) -> DifferenceDirections {
        DifferenceDirections {
            interest: Direction::of(self.interest_difference),
            principal: Direction::of(self.principal_difference),
            monthly: Direction::of(self.monthly_difference),
            annual: Direction::of(self.annual_difference),
        }
    }
}

/// A loan's terms alongside its year-one projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub parameters: LoanParameters,
    pub year_one: YearOneResult,
}

/// Everything a front end needs to render the "Impact After 1 Year" view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinanceComparison {
    pub current: LoanSummary,
    pub new: LoanSummary,
    pub differences: ComparisonResult,
    pub directions: DifferenceDirections,
    pub rate_direction: Direction,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Year-one deltas between two loans. No validation, rounding or formatting.
pub fn evaluate(current: &LoanParameters, new: &LoanParameters) -> ComparisonResult {
    let cur = project_year_one(current);
    let new = project_year_one(new);

    let monthly_difference = new.monthly_payment - cur.monthly_payment;

    ComparisonResult {
        interest_difference: new.interest_paid_year_one - cur.interest_paid_year_one,
        principal_difference: new.balance_after_year_one - cur.balance_after_year_one,
        monthly_difference,
        annual_difference: monthly_difference * MONTHS_PER_YEAR,
    }
}

/// Classify a rate change the same way as the monetary deltas.
pub fn rate_direction(current: Percent, new: Percent) -> Direction {
    Direction::of(new - current)
}

/// Validate the inputs, project both loans and compare them.
pub fn compare_refinance(
    input: &RefinanceInput,
    limits: &RefinanceLimits,
) -> RefiResult<ComputationOutput<RefinanceComparison>> {
    let start = Instant::now();
    input.validate(limits)?;

    let current = project_year_one(&input.current);
    let new = project_year_one(&input.new);
    let differences = evaluate(&input.current, &input.new);

    log::debug!(
        "refinance comparison: current payment {}, new payment {}, monthly difference {}",
        current.monthly_payment,
        new.monthly_payment,
        differences.monthly_difference
    );

    let warnings = collect_warnings(input, &current, &new);
    for w in &warnings {
        log::warn!("{}", w);
    }

    let result = RefinanceComparison {
        current: LoanSummary {
            parameters: input.current,
            year_one: current,
        },
        new: LoanSummary {
            parameters: input.new,
            year_one: new,
        },
        directions: differences.directions(),
        rate_direction: rate_direction(
            input.current.annual_rate_percent,
            input.new.annual_rate_percent,
        ),
        differences,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment amortisation, first 12 months of full-tenure schedule",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn collect_warnings(
    input: &RefinanceInput,
    current: &YearOneResult,
    new: &YearOneResult,
) -> Vec<String> {
    let mut warnings = Vec::new();

    for (label, loan, result) in [
        ("Current", &input.current, current),
        ("New", &input.new, new),
    ] {
        if result.monthly_payment < loan.first_month_interest() {
            warnings.push(format!(
                "{} loan payment {} does not cover first-month interest {}; balance grows",
                label,
                result.monthly_payment.round_dp(2),
                loan.first_month_interest().round_dp(2)
            ));
        }
    }

    if input.new.tenure_years > input.current.tenure_years {
        warnings.push(format!(
            "New tenure ({} years) extends beyond the current remaining tenure ({} years); \
             lower instalments may cost more interest over the life of the loan",
            input.new.tenure_years.normalize(),
            input.current.tenure_years.normalize()
        ));
    }

    if input.new.principal > input.current.principal {
        warnings.push(format!(
            "New loan amount exceeds current loan amount by {}",
            (input.new.principal - input.current.principal).round_dp(2)
        ));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RefiError;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn loan(p: Decimal, r: Decimal, t: Decimal) -> LoanParameters {
        LoanParameters::new(p, r, t)
    }

    #[test]
    fn test_identical_loans_have_zero_differences() {
        let l = loan(dec!(650000), dec!(3.75), dec!(28));
        let result = evaluate(&l, &l);
        assert_eq!(result.interest_difference, Decimal::ZERO);
        assert_eq!(result.principal_difference, Decimal::ZERO);
        assert_eq!(result.monthly_difference, Decimal::ZERO);
        assert_eq!(result.annual_difference, Decimal::ZERO);
        assert_eq!(
            result.directions(),
            DifferenceDirections {
                interest: Direction::Neutral,
                principal: Direction::Neutral,
                monthly: Direction::Neutral,
                annual: Direction::Neutral,
            }
        );
    }

    #[test]
    fn test_lower_rate_is_favourable() {
        let current = loan(dec!(300000), dec!(4.0), dec!(25));
        let new = loan(dec!(300000), dec!(2.5), dec!(25));
        let result = evaluate(&current, &new);

        assert!(result.monthly_difference < Decimal::ZERO);
        assert!(result.interest_difference < Decimal::ZERO);
        assert_eq!(result.annual_difference, result.monthly_difference * dec!(12));
        assert_eq!(result.directions().monthly, Direction::Favorable);
        assert_eq!(result.directions().interest, Direction::Favorable);
    }

    #[test]
    fn test_matches_engine_outputs() {
        let current = loan(dec!(480000), dec!(3.9), dec!(22));
        let new = loan(dec!(470000), dec!(3.1), dec!(30));
        let c = project_year_one(&current);
        let n = project_year_one(&new);
        let result = evaluate(&current, &new);

        assert_eq!(
            result.interest_difference,
            n.interest_paid_year_one - c.interest_paid_year_one
        );
        assert_eq!(
            result.principal_difference,
            n.balance_after_year_one - c.balance_after_year_one
        );
        assert_eq!(result.monthly_difference, n.monthly_payment - c.monthly_payment);
    }

    #[test]
    fn test_longer_tenure_keeps_more_principal() {
        // Stretching the tenure lowers the instalment but repays less principal.
        let current = loan(dec!(300000), dec!(3), dec!(15));
        let new = loan(dec!(300000), dec!(3), dec!(30));
        let result = evaluate(&current, &new);
        assert_eq!(result.directions().monthly, Direction::Favorable);
        assert_eq!(result.directions().principal, Direction::Unfavorable);
    }

    #[test]
    fn test_rate_direction() {
        assert_eq!(rate_direction(dec!(4), dec!(2.5)), Direction::Favorable);
        assert_eq!(rate_direction(dec!(2.5), dec!(4)), Direction::Unfavorable);
        assert_eq!(rate_direction(dec!(3), dec!(3.00)), Direction::Neutral);
    }

    #[test]
    fn test_compare_refinance_envelope() {
        let input = RefinanceInput {
            current: loan(dec!(300000), dec!(4.0), dec!(25)),
            new: loan(dec!(300000), dec!(2.5), dec!(25)),
        };
        let out = compare_refinance(&input, &RefinanceLimits::default()).unwrap();
        assert!(out.warnings.is_empty());
        assert_eq!(out.result.rate_direction, Direction::Favorable);
        assert_eq!(out.result.current.parameters, input.current);
        assert_eq!(
            out.result.differences,
            evaluate(&input.current, &input.new)
        );
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }

    #[test]
    fn test_compare_refinance_warnings() {
        let input = RefinanceInput {
            current: loan(dec!(300000), dec!(4.0), dec!(20)),
            new: loan(dec!(320000), dec!(3.0), dec!(30)),
        };
        let out = compare_refinance(&input, &RefinanceLimits::default()).unwrap();
        assert_eq!(out.warnings.len(), 2);
        assert!(out.warnings[0].contains("extends beyond"));
        assert!(out.warnings[1].contains("exceeds current loan amount by 20000"));
    }

    #[test]
    fn test_compare_refinance_rejects_out_of_range() {
        let input = RefinanceInput {
            current: loan(dec!(300000), dec!(4.0), dec!(25)),
            new: loan(dec!(300000), dec!(12), dec!(3)),
        };
        let err = compare_refinance(&input, &RefinanceLimits::default()).unwrap_err();
        match err {
            RefiError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
