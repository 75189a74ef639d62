//! Input validation for the refinance comparison.
//!
//! The amortisation engine trusts its inputs; every range check lives here.
//! Failures are classified (missing, not a number, below minimum, above
//! maximum) and carry the user-facing message a front end shows next to the
//! offending field.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::amortization::LoanParameters;
use crate::error::RefiError;
use crate::format::{group_thousands, parse_amount};
use crate::RefiResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The six inputs of the comparison form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    CurrentLoanAmount,
    CurrentTenure,
    CurrentInterestRate,
    NewLoanAmount,
    NewTenure,
    NewInterestRate,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::CurrentLoanAmount,
        Field::CurrentTenure,
        Field::CurrentInterestRate,
        Field::NewLoanAmount,
        Field::NewTenure,
        Field::NewInterestRate,
    ];

    fn kind(self) -> FieldKind {
        match self {
            Field::CurrentLoanAmount | Field::NewLoanAmount => FieldKind::Amount,
            Field::CurrentTenure | Field::NewTenure => FieldKind::Tenure,
            Field::CurrentInterestRate | Field::NewInterestRate => FieldKind::Rate,
        }
    }

    fn is_new(self) -> bool {
        matches!(
            self,
            Field::NewLoanAmount | Field::NewTenure | Field::NewInterestRate
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::CurrentLoanAmount => "Current Loan Amount",
            Field::CurrentTenure => "Current Tenure",
            Field::CurrentInterestRate => "Current Interest Rate",
            Field::NewLoanAmount => "New Loan Amount",
            Field::NewTenure => "New Tenure",
            Field::NewInterestRate => "New Interest Rate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Amount,
    Tenure,
    Rate,
}

/// Why a field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    MissingValue,
    NotANumber,
    BelowMinimum { min: Decimal },
    AboveMaximum { max: Decimal },
}

/// A rejected field and the message to show for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub issue: ValidationIssue,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, issue: ValidationIssue) -> Self {
        let message = message_for(field, &issue);
        Self {
            field,
            issue,
            message,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Inclusive range for one field. `max: None` leaves it unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
}

impl Bounds {
    pub const fn at_least(min: Decimal) -> Self {
        Self { min, max: None }
    }

    pub const fn between(min: Decimal, max: Decimal) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }
}

/// Accepted ranges for each input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinanceLimits {
    pub current_principal: Bounds,
    pub current_tenure_years: Bounds,
    pub current_rate_percent: Bounds,
    pub new_principal: Bounds,
    pub new_tenure_years: Bounds,
    pub new_rate_percent: Bounds,
}

impl Default for RefinanceLimits {
    fn default() -> Self {
        Self {
            current_principal: Bounds::at_least(dec!(100000)),
            current_tenure_years: Bounds::between(dec!(1), dec!(35)),
            current_rate_percent: Bounds::between(dec!(0.1), dec!(10)),
            new_principal: Bounds::at_least(dec!(50000)),
            new_tenure_years: Bounds::between(dec!(5), dec!(35)),
            new_rate_percent: Bounds::between(dec!(0.1), dec!(10)),
        }
    }
}

impl RefinanceLimits {
    pub fn bounds(&self, field: Field) -> Bounds {
        match field {
            Field::CurrentLoanAmount => self.current_principal,
            Field::CurrentTenure => self.current_tenure_years,
            Field::CurrentInterestRate => self.current_rate_percent,
            Field::NewLoanAmount => self.new_principal,
            Field::NewTenure => self.new_tenure_years,
            Field::NewInterestRate => self.new_rate_percent,
        }
    }
}

/// Numeric inputs for a comparison: the loan held today and the offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinanceInput {
    pub current: LoanParameters,
    pub new: LoanParameters,
}

impl RefinanceInput {
    fn value(&self, field: Field) -> Decimal {
        match field {
            Field::CurrentLoanAmount => self.current.principal,
            Field::CurrentTenure => self.current.tenure_years,
            Field::CurrentInterestRate => self.current.annual_rate_percent,
            Field::NewLoanAmount => self.new.principal,
            Field::NewTenure => self.new.tenure_years,
            Field::NewInterestRate => self.new.annual_rate_percent,
        }
    }

    /// Check every field against `limits`, reporting all failures at once.
    pub fn validate(&self, limits: &RefinanceLimits) -> RefiResult<()> {
        let errors: Vec<FieldError> = Field::ALL
            .iter()
            .filter_map(|&f| validate_field(f, Some(self.value(f)), limits).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(RefiError::Validation(errors))
        }
    }
}

/// The six inputs as typed into a form. Loan amounts may carry grouping
/// commas ("1,250,000").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRefinanceInput {
    pub current_loan_amount: Option<String>,
    pub current_tenure: Option<String>,
    pub current_interest_rate: Option<String>,
    pub new_loan_amount: Option<String>,
    pub new_tenure: Option<String>,
    pub new_interest_rate: Option<String>,
}

impl RawRefinanceInput {
    fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::CurrentLoanAmount => &self.current_loan_amount,
            Field::CurrentTenure => &self.current_tenure,
            Field::CurrentInterestRate => &self.current_interest_rate,
            Field::NewLoanAmount => &self.new_loan_amount,
            Field::NewTenure => &self.new_tenure,
            Field::NewInterestRate => &self.new_interest_rate,
        };
        value.as_deref()
    }

    /// Parse and validate every field. On failure the error lists each
    /// rejected field in form order.
    pub fn parse(&self, limits: &RefinanceLimits) -> RefiResult<RefinanceInput> {
        let mut values = [Decimal::ZERO; 6];
        let mut errors = Vec::new();

        for (slot, &field) in values.iter_mut().zip(Field::ALL.iter()) {
            match parse_field(field, self.text(field))
                .and_then(|v| validate_field(field, Some(v), limits))
            {
                Ok(v) => *slot = v,
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            return Err(RefiError::Validation(errors));
        }

        let [cp, ct, cr, np, nt, nr] = values;
        Ok(RefinanceInput {
            current: LoanParameters::new(cp, cr, ct),
            new: LoanParameters::new(np, nr, nt),
        })
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validate one numeric value. `None` means the field was left blank.
///
/// Zero counts as "not a valid value" rather than as below the minimum.
pub fn validate_field(
    field: Field,
    value: Option<Decimal>,
    limits: &RefinanceLimits,
) -> Result<Decimal, FieldError> {
    let value = value.ok_or_else(|| FieldError::new(field, ValidationIssue::MissingValue))?;
    if value.is_zero() {
        return Err(FieldError::new(field, ValidationIssue::NotANumber));
    }

    let bounds = limits.bounds(field);
    if value < bounds.min {
        return Err(FieldError::new(
            field,
            ValidationIssue::BelowMinimum { min: bounds.min },
        ));
    }
    if let Some(max) = bounds.max {
        if value > max {
            return Err(FieldError::new(field, ValidationIssue::AboveMaximum { max }));
        }
    }
    Ok(value)
}

/// Sanity check for a single loan outside the comparison form: positive
/// principal and tenure, non-negative rate. No form bounds are applied.
pub fn check_loan_terms(loan: &LoanParameters) -> RefiResult<()> {
    if loan.principal <= Decimal::ZERO {
        return Err(RefiError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if loan.annual_rate_percent < Decimal::ZERO {
        return Err(RefiError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if loan.tenure_years <= Decimal::ZERO {
        return Err(RefiError::InvalidInput {
            field: "tenure_years".into(),
            reason: "Tenure must be greater than zero".into(),
        });
    }
    Ok(())
}

/// Turn raw field text into a number. Loan amounts tolerate grouping commas;
/// tenure and rate must be plain decimals.
pub fn parse_field(field: Field, text: Option<&str>) -> Result<Decimal, FieldError> {
    let text = match text.map(str::trim) {
        None | Some("") => return Err(FieldError::new(field, ValidationIssue::MissingValue)),
        Some(t) => t,
    };

    let parsed = match field.kind() {
        FieldKind::Amount => parse_amount(text),
        FieldKind::Tenure | FieldKind::Rate => Decimal::from_str(text).ok(),
    };
    parsed.ok_or_else(|| FieldError::new(field, ValidationIssue::NotANumber))
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

fn message_for(field: Field, issue: &ValidationIssue) -> String {
    let kind = field.kind();
    match issue {
        ValidationIssue::MissingValue => "This field is required".to_string(),
        ValidationIssue::NotANumber => match kind {
            FieldKind::Amount => "Please enter a valid loan amount".to_string(),
            FieldKind::Tenure => "Please enter a valid tenure".to_string(),
            FieldKind::Rate => "Please enter a valid interest rate".to_string(),
        },
        ValidationIssue::BelowMinimum { min } => {
            let min = min.normalize();
            match (kind, field.is_new()) {
                (FieldKind::Amount, false) => format!(
                    "Current loan amount must be at least S${}",
                    group_thousands(&min.to_string())
                ),
                (FieldKind::Amount, true) => format!(
                    "New loan amount must be at least S${}",
                    group_thousands(&min.to_string())
                ),
                (FieldKind::Tenure, is_new) => format!(
                    "{} must be at least {} {}",
                    if is_new { "New tenure" } else { "Tenure" },
                    min,
                    if min == Decimal::ONE { "year" } else { "years" }
                ),
                (FieldKind::Rate, false) => format!("Interest rate must be at least {}%", min),
                (FieldKind::Rate, true) => {
                    format!("New interest rate must be at least {}%", min)
                }
            }
        }
        ValidationIssue::AboveMaximum { max } => {
            let max = max.normalize();
            match (kind, field.is_new()) {
                (FieldKind::Amount, _) => format!(
                    "{} cannot exceed S${}",
                    field.label(),
                    group_thousands(&max.to_string())
                ),
                (FieldKind::Tenure, false) => format!("Tenure cannot exceed {} years", max),
                (FieldKind::Tenure, true) => format!("New tenure cannot exceed {} years", max),
                (FieldKind::Rate, _) => format!("Interest rate cannot exceed {}%", max),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
