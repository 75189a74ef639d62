use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::format::format_percent;
use crate::types::Percent;
use crate::validation::RefinanceLimits;

pub const DEFAULT_DISCLAIMER: &str = "Figures provided are for illustration purposes and \
                                      do not constitute a formal approval from a bank.";

/// Benchmark rate shown next to the current-rate input as a hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateHint {
    /// Three-month compounded SORA, in percent.
    pub three_month_sora: Percent,
    /// Typical bank spread over SORA, in percent.
    pub spread: Percent,
    /// Label for the range of spreads on offer.
    pub spread_range: String,
}

impl Default for RateHint {
    fn default() -> Self {
        Self {
            three_month_sora: dec!(2.3175),
            spread: dec!(1),
            spread_range: "1.00% - 1.50%".to_string(),
        }
    }
}

impl RateHint {
    /// Benchmark plus spread, rounded to two decimals (used as a placeholder).
    pub fn example_rate(&self) -> Percent {
        (self.three_month_sora + self.spread)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    pub fn note(&self) -> String {
        format!(
            "Current 3M SORA: {}, Spread range: {}",
            format_percent(self.three_month_sora),
            self.spread_range
        )
    }
}

/// Settings a front end can override from a JSON or YAML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub limits: RefinanceLimits,
    pub rate_hint: RateHint,
    /// Prefix used when formatting money, e.g. "$" or "S$".
    pub currency_prefix: String,
    pub disclaimer: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            limits: RefinanceLimits::default(),
            rate_hint: RateHint::default(),
            currency_prefix: "$".to_string(),
            disclaimer: DEFAULT_DISCLAIMER.to_string(),
        }
    }
}

impl CalculatorConfig {
    pub fn format_money(&self, amount: Decimal) -> String {
        crate::format::format_money(amount, &self.currency_prefix)
    }
}
