//! Currency display formatting

use super::Currency;

/// Format an amount for display.
///
/// Crypto currencies always render with exactly 6 fractional digits and no
/// thousands grouping; everything else rounds to the nearest whole unit with
/// grouped thousands.
pub fn format_currency(amount: f64, currency: Currency) -> String {
    if currency.is_crypto() {
        format!("{}{:.6}", currency.symbol(), amount)
    } else {
        format!(
            "{}{}",
            currency.symbol(),
            group_thousands(amount.round() as i64)
        )
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
