use colored::Colorize;
use rust_decimal::Decimal;
use serde_json::Value;
use tabled::{builder::Builder, Table};

use refi_core::comparison::{Direction, RefinanceComparison};
use refi_core::format::{format_percent, format_years};
use refi_core::{CalculatorConfig, ComputationOutput};

use super::table;

/// Render a comparison the way the calculator page lays it out: both loans
/// side by side, then the signed one-year differences. Other outputs fall
/// back to the table view.
pub fn print_summary(value: &Value, config: &CalculatorConfig) {
    match serde_json::from_value::<ComputationOutput<RefinanceComparison>>(value.clone()) {
        Ok(output) => {
            for line in render(&output.result, config) {
                println!("{}", line);
            }
            for w in &output.warnings {
                println!("{} {}", "warning:".yellow().bold(), w);
            }
        }
        Err(_) => table::print_table(value),
    }
}

fn render(cmp: &RefinanceComparison, config: &CalculatorConfig) -> Vec<String> {
    let money = |amount: Decimal| config.format_money(amount);

    let mut builder = Builder::default();
    builder.push_record(["", "Current Mortgage", "Refinanced Mortgage"]);
    let (cur, new) = (&cmp.current.parameters, &cmp.new.parameters);
    builder.push_record([
        "Loan Amount".to_string(),
        money(cur.principal),
        money(new.principal),
    ]);
    builder.push_record([
        "Tenure".to_string(),
        format_years(cur.tenure_years),
        format_years(new.tenure_years),
    ]);
    builder.push_record([
        "Interest Rate".to_string(),
        format_percent(cur.annual_rate_percent),
        format_percent(new.annual_rate_percent),
    ]);
    builder.push_record([
        "Total Interest Paid (After 1 Year)".to_string(),
        money(cmp.current.year_one.interest_paid_year_one),
        money(cmp.new.year_one.interest_paid_year_one),
    ]);
    builder.push_record([
        "Balance Principal (After 1 Year)".to_string(),
        money(cmp.current.year_one.balance_after_year_one),
        money(cmp.new.year_one.balance_after_year_one),
    ]);
    builder.push_record([
        "Monthly Instalment".to_string(),
        money(cmp.current.year_one.monthly_payment),
        money(cmp.new.year_one.monthly_payment),
    ]);

    let d = &cmp.differences;
    let dirs = &cmp.directions;
    let mut lines = vec![
        "Impact After 1 Year".bold().to_string(),
        Table::from(builder).to_string(),
        String::new(),
        "1 Year Comparison Summary".bold().to_string(),
    ];
    for (label, diff, dir) in [
        ("Interest Payment Difference", d.interest_difference, dirs.interest),
        ("Principal Balance Difference", d.principal_difference, dirs.principal),
        ("Annual Instalment Difference", d.annual_difference, dirs.annual),
        ("Monthly Instalment Difference", d.monthly_difference, dirs.monthly),
    ] {
        lines.push(format!(
            "  {:<30} {}",
            label,
            styled(&money(diff.abs()), dir)
        ));
    }
    lines.push(String::new());
    lines.push(config.disclaimer.dimmed().to_string());
    lines
}

/// Absolute amount tagged with its direction: green and "lower" when the
/// refinanced loan comes out ahead, red and "higher" when it does not.
fn styled(amount: &str, direction: Direction) -> String {
    match direction {
        Direction::Favorable => format!("{} lower", amount).green().to_string(),
        Direction::Unfavorable => format!("{} higher", amount).red().to_string(),
        Direction::Neutral => amount.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refi_core::{compare_refinance, LoanParameters, RefinanceInput, RefinanceLimits};
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_lower_rate() {
        colored::control::set_override(false);
        let input = RefinanceInput {
            current: LoanParameters::new(dec!(300000), dec!(4.0), dec!(25)),
            new: LoanParameters::new(dec!(300000), dec!(2.5), dec!(25)),
        };
        let out = compare_refinance(&input, &RefinanceLimits::default()).unwrap();
        let text = render(&out.result, &CalculatorConfig::default()).join("\n");

        assert!(text.contains("Impact After 1 Year"));
        assert!(text.contains("$300,000"));
        assert!(text.contains("4.00%"));
        assert!(text.contains("2.50%"));
        assert!(text.contains("$1,584"));
        assert!(text.contains("$1,346"));
        assert!(text.contains("$2,852 lower"));
    }

    #[test]
    fn test_styled_neutral_has_no_suffix() {
        colored::control::set_override(false);
        assert_eq!(styled("$0", Direction::Neutral), "$0");
        assert_eq!(styled("$10", Direction::Unfavorable), "$10 higher");
    }
}
