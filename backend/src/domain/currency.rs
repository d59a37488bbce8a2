//! Currency formatting and amount input handling.
//!
//! Display strings always carry two decimal places and thousands
//! separators. Parsing is lenient: anything that is not a digit or a decimal
//! point is dropped, and input that still cannot be read becomes zero.

use rust_decimal::{Decimal, RoundingStrategy};
use shared::BankConfig;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AmountInputError {
    #[error("Enter an amount")]
    Empty,
    #[error("Invalid number")]
    Invalid,
    #[error("Minimum is {0}")]
    TooSmall(String),
    #[error("Maximum is {0}")]
    TooLarge(String),
}

#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    currency_code: String,
    currency_symbol: String,
    min_amount: Decimal,
    max_amount: Decimal,
}

impl CurrencyFormatter {
    pub fn new() -> Self {
        Self::with_config(&BankConfig::default())
    }

    pub fn with_config(config: &BankConfig) -> Self {
        Self {
            currency_code: config.currency_code.clone(),
            currency_symbol: config.currency_symbol.clone(),
            min_amount: config.min_payment_amount,
            max_amount: config.max_payment_amount,
        }
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    /// Format for display, e.g. `$1,234.50` or `-$120.50`
    pub fn format(&self, amount: Decimal) -> String {
        let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

        let digits = rounded.abs().to_string();
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        format!("{}{}{}.{}", sign, self.currency_symbol, group_thousands(whole), fraction)
    }

    /// Read an amount out of free text. Returns zero for blank, unreadable or
    /// out-of-range input.
    pub fn parse(&self, input: &str) -> Decimal {
        let cleaned: String = input.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
        if cleaned.is_empty() {
            return Decimal::ZERO;
        }

        match Decimal::from_str(&cleaned) {
            Ok(amount) if amount >= Decimal::ZERO && amount <= self.max_amount => amount,
            _ => Decimal::ZERO,
        }
    }

    /// Sanitize an amount field as it is typed
    pub fn format_input(&self, input: &str) -> String {
        let filtered: String = input.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();

        let Some((whole, rest)) = filtered.split_once('.') else {
            return filtered;
        };
        // extra points fold into the fractional part
        let fraction: String = rest.chars().filter(|c| *c != '.').take(2).collect();
        format!("{}.{}", whole, fraction)
    }

    /// Field-level validation with user-facing messages
    pub fn validate_amount_input(&self, input: &str) -> Result<Decimal, AmountInputError> {
        if input.trim().is_empty() {
            return Err(AmountInputError::Empty);
        }

        let cleaned = input
            .trim()
            .replace(&self.currency_symbol, "")
            .replace(',', "")
            .replace(' ', "");
        let amount = Decimal::from_str(&cleaned).map_err(|_| AmountInputError::Invalid)?;

        if amount < self.min_amount {
            Err(AmountInputError::TooSmall(self.format(self.min_amount)))
        } else if amount > self.max_amount {
            Err(AmountInputError::TooLarge(self.format(self.max_amount)))
        } else {
            Ok(amount)
        }
    }
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test() -> CurrencyFormatter {
        CurrencyFormatter::new()
    }

    #[test]
    fn test_format() {
        let formatter = setup_test();

        assert_eq!(formatter.format(Decimal::new(123450, 2)), "$1,234.50");
        assert_eq!(formatter.format(Decimal::new(-12050, 2)), "-$120.50");
        assert_eq!(formatter.format(Decimal::ZERO), "$0.00");
        assert_eq!(formatter.format(Decimal::new(5, 0)), "$5.00");
        assert_eq!(formatter.format(Decimal::new(100_000_00, 2)), "$100,000.00");
        assert_eq!(formatter.format(Decimal::new(1234567891, 3)), "$1,234,567.89");
        assert_eq!(formatter.format(Decimal::new(5, 3)), "$0.01");
        assert_eq!(formatter.format(Decimal::new(-1, 3)), "$0.00");
    }

    #[test]
    fn test_parse() {
        let formatter = setup_test();

        assert_eq!(formatter.parse("$1,234.50"), Decimal::new(123450, 2));
        assert_eq!(formatter.parse("  "), Decimal::ZERO);
        assert_eq!(formatter.parse("abc"), Decimal::ZERO);
        assert_eq!(formatter.parse("1.2.3"), Decimal::ZERO);
        assert_eq!(formatter.parse("100000"), Decimal::new(100000, 0));
        assert_eq!(formatter.parse("100000.01"), Decimal::ZERO);
        // minus sign is stripped, not honoured
        assert_eq!(formatter.parse("-5"), Decimal::new(5, 0));
    }

    #[test]
    fn test_format_input() {
        let formatter = setup_test();

        assert_eq!(formatter.format_input(""), "");
        assert_eq!(formatter.format_input("12a3"), "123");
        assert_eq!(formatter.format_input("12.345"), "12.34");
        assert_eq!(formatter.format_input("1.2.3"), "1.23");
        assert_eq!(formatter.format_input("1..5"), "1.5");
        assert_eq!(formatter.format_input("$5."), "5.");
        assert_eq!(formatter.format_input(".5"), ".5");
    }

    #[test]
    fn test_validate_amount_input() {
        let formatter = setup_test();

        assert_eq!(formatter.validate_amount_input("$1,000.50"), Ok(Decimal::new(100050, 2)));
        assert_eq!(formatter.validate_amount_input(" "), Err(AmountInputError::Empty));
        assert_eq!(formatter.validate_amount_input("abc"), Err(AmountInputError::Invalid));

        let error = formatter.validate_amount_input("0").unwrap_err();
        assert_eq!(error.to_string(), "Minimum is $0.01");

        let error = formatter.validate_amount_input("100000.01").unwrap_err();
        assert_eq!(error.to_string(), "Maximum is $100,000.00");
    }

    #[test]
    fn test_custom_symbol() {
        let config = BankConfig {
            currency_code: "GBP".to_string(),
            currency_symbol: "£".to_string(),
            ..BankConfig::default()
        };
        let formatter = CurrencyFormatter::with_config(&config);

        assert_eq!(formatter.currency_code(), "GBP");
        assert_eq!(formatter.format(Decimal::new(99, 1)), "£9.90");
        assert_eq!(formatter.validate_amount_input("£12"), Ok(Decimal::new(12, 0)));
    }
}
