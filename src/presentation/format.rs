// Number formatting for the rendered tables
use rust_decimal::{Decimal, RoundingStrategy};

/// `1234567` -> `1,234,567`
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Two decimals, half away from zero, with thousands separators:
/// `-1234.5` -> `-1,234.50`
pub fn format_money(amount: Decimal) -> String {
    let mut rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let fixed = rounded.to_string();
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}{}.{fraction}", group_thousands(whole))
}

/// `$` prefixed money, matching how balances and costs are shown elsewhere.
pub fn format_currency(amount: Decimal) -> String {
    format!("${}", format_money(amount))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
