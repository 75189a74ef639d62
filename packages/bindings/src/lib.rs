use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use refi_core::amortization::{self, LoanParameters};
use refi_core::validation::{FieldError, RawRefinanceInput};
use refi_core::{format, CalculatorConfig, RefiError};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Settings JSON from the caller, or defaults when empty.
fn parse_config(config_json: Option<String>) -> NapiResult<CalculatorConfig> {
    match config_json.as_deref().map(str::trim) {
        None | Some("") => Ok(CalculatorConfig::default()),
        Some(json) => serde_json::from_str(json).map_err(to_napi_error),
    }
}

fn parse_decimal(field: &str, text: &str) -> NapiResult<Decimal> {
    text.trim()
        .parse::<Decimal>()
        .map_err(|e| to_napi_error(format!("{field}: {e}")))
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Takes the six form fields as typed (`RawRefinanceInput` JSON).
#[napi]
pub fn compare_refinance(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let config = parse_config(config_json)?;
    let raw: RawRefinanceInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let input = raw.parse(&config.limits).map_err(to_napi_error)?;
    let output =
        refi_core::compare_refinance(&input, &config.limits).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Field-level messages for the form; an empty array means every field passed.
#[napi]
pub fn validate_refinance(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let config = parse_config(config_json)?;
    let raw: RawRefinanceInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let errors: Vec<FieldError> = match raw.parse(&config.limits) {
        Ok(_) => Vec::new(),
        Err(RefiError::Validation(errors)) => errors,
        Err(other) => return Err(to_napi_error(other)),
    };
    serde_json::to_string(&errors).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Single loan
// ---------------------------------------------------------------------------

#[napi]
pub fn monthly_payment(
    principal: String,
    rate_percent: String,
    tenure_years: String,
) -> NapiResult<String> {
    let loan = LoanParameters::new(
        parse_decimal("principal", &principal)?,
        parse_decimal("rate_percent", &rate_percent)?,
        parse_decimal("tenure_years", &tenure_years)?,
    );
    refi_core::validation::check_loan_terms(&loan).map_err(to_napi_error)?;
    let payment = amortization::compute_monthly_payment(
        loan.principal,
        loan.annual_rate_percent,
        loan.tenure_years,
    );
    Ok(payment.to_string())
}

/// Takes `LoanParameters` JSON.
#[napi]
pub fn year_one_projection(input_json: String) -> NapiResult<String> {
    let loan: LoanParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    refi_core::validation::check_loan_terms(&loan).map_err(to_napi_error)?;
    let output = serde_json::json!({
        "year_one": amortization::project_year_one(&loan),
        "schedule": amortization::year_one_schedule(&loan),
    });
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

#[napi]
pub fn format_money(amount: String, prefix: Option<String>) -> NapiResult<String> {
    let amount = parse_decimal("amount", &amount)?;
    Ok(format::format_money(amount, prefix.as_deref().unwrap_or("$")))
}

/// Live input mask for loan amount fields.
#[napi]
pub fn format_amount_input(text: String) -> String {
    format::format_amount_input(&text)
}

#[napi]
pub fn rate_hint(config_json: Option<String>) -> NapiResult<String> {
    let hint = parse_config(config_json)?.rate_hint;
    let output = serde_json::json!({
        "example_rate": hint.example_rate(),
        "note": hint.note(),
    });
    serde_json::to_string(&output).map_err(to_napi_error)
}
