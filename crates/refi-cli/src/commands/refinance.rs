use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use refi_core::comparison::compare_refinance;
use refi_core::validation::FieldError;
use refi_core::{CalculatorConfig, RawRefinanceInput, RefiError, RefinanceInput};

use crate::input;

/// Loan terms for a comparison, as flags or as a file / piped JSON body.
#[derive(Args)]
pub struct CompareArgs {
    /// Path to a JSON/YAML file with `current` and `new` loan terms
    #[arg(long)]
    pub input: Option<String>,

    /// Current outstanding loan amount (grouping commas allowed, e.g. 1,250,000)
    #[arg(long)]
    pub current_loan_amount: Option<String>,

    /// Remaining tenure of the current loan, in years
    #[arg(long)]
    pub current_tenure: Option<String>,

    /// Current annual interest rate in percent (e.g. 3.32)
    #[arg(long)]
    pub current_rate: Option<String>,

    /// Refinanced loan amount (grouping commas allowed)
    #[arg(long)]
    pub new_loan_amount: Option<String>,

    /// Tenure of the refinanced loan, in years
    #[arg(long)]
    pub new_tenure: Option<String>,

    /// Refinanced annual interest rate in percent
    #[arg(long)]
    pub new_rate: Option<String>,
}

impl CompareArgs {
    fn raw(&self) -> Option<RawRefinanceInput> {
        let raw = RawRefinanceInput {
            current_loan_amount: self.current_loan_amount.clone(),
            current_tenure: self.current_tenure.clone(),
            current_interest_rate: self.current_rate.clone(),
            new_loan_amount: self.new_loan_amount.clone(),
            new_tenure: self.new_tenure.clone(),
            new_interest_rate: self.new_rate.clone(),
        };
        (raw != RawRefinanceInput::default()).then_some(raw)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ValidationReport {
    valid: bool,
    errors: Vec<FieldError>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RateHintOutput {
    three_month_sora: Decimal,
    spread: Decimal,
    spread_range: String,
    example_rate: Decimal,
    note: String,
}

/// Flags take precedence; otherwise read `--input` or stdin.
fn resolve_input(
    args: &CompareArgs,
    config: &CalculatorConfig,
) -> Result<RefinanceInput, Box<dyn std::error::Error>> {
    if let Some(raw) = args.raw() {
        return Ok(raw.parse(&config.limits)?);
    }
    match input::read_request::<RefinanceInput>(args.input.as_deref())? {
        Some(parsed) => Ok(parsed),
        None => Err("--input <file.json>, stdin, or the six loan flags required \
                     (--current-loan-amount, --current-tenure, --current-rate, \
                     --new-loan-amount, --new-tenure, --new-rate)"
            .into()),
    }
}

pub fn run_compare(
    args: CompareArgs,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let refi_input = resolve_input(&args, config)?;
    let result = compare_refinance(&refi_input, &config.limits)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_validate(
    args: CompareArgs,
    config: &CalculatorConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let outcome = resolve_input(&args, config).and_then(|refi_input| {
        refi_input.validate(&config.limits)?;
        Ok(())
    });

    let errors = match outcome {
        Ok(()) => Vec::new(),
        Err(e) => match e.downcast::<RefiError>() {
            Ok(refi_err) => match *refi_err {
                RefiError::Validation(errors) => errors,
                other => return Err(other.into()),
            },
            Err(other) => return Err(other),
        },
    };

    let report = ValidationReport {
        valid: errors.is_empty(),
        errors,
    };
    Ok(serde_json::to_value(report)?)
}

pub fn run_rate_hint(config: &CalculatorConfig) -> Result<Value, Box<dyn std::error::Error>> {
    let hint = &config.rate_hint;
    let output = RateHintOutput {
        three_month_sora: hint.three_month_sora,
        spread: hint.spread,
        spread_range: hint.spread_range.clone(),
        example_rate: hint.example_rate(),
        note: hint.note(),
    };
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(values: [&str; 6]) -> CompareArgs {
        let s = |v: &str| Some(v.to_string());
        CompareArgs {
            input: None,
            current_loan_amount: s(values[0]),
            current_tenure: s(values[1]),
            current_rate: s(values[2]),
            new_loan_amount: s(values[3]),
            new_tenure: s(values[4]),
            new_rate: s(values[5]),
        }
    }

    #[test]
    fn test_compare_from_flags() {
        let config = CalculatorConfig::default();
        let args = flags(["300,000", "25", "4.0", "300,000", "25", "2.5"]);
        let value = run_compare(args, &config).unwrap();
        assert_eq!(value["result"]["directions"]["monthly"], "favorable");
    }

    #[test]
    fn test_validate_reports_field_errors() {
        let config = CalculatorConfig::default();
        let args = flags(["90,000", "25", "4.0", "300,000", "2", "2.5"]);
        let value = run_validate(args, &config).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["errors"].as_array().map(|a| a.len()), Some(2));
        assert_eq!(value["errors"][1]["field"], "new_tenure");
        assert_eq!(value["errors"][1]["issue"]["kind"], "below_minimum");
    }

    #[test]
    fn test_partial_flags_flag_missing_fields() {
        let config = CalculatorConfig::default();
        let mut args = flags(["300,000", "25", "4.0", "300,000", "25", "2.5"]);
        args.new_rate = None;
        let err = run_compare(args, &config).unwrap_err();
        assert_eq!(err.to_string(), "This field is required");
    }

    #[test]
    fn test_rate_hint_output() {
        let value = run_rate_hint(&CalculatorConfig::default()).unwrap();
        assert_eq!(value["example_rate"], "3.32");
        assert_eq!(value["spread_range"], "1.00% - 1.50%");
    }
}
