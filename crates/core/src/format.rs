//! Display formatting for derived DTO fields.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format a monetary amount with two decimals and `,` thousands grouping,
/// e.g. `1234567.5` becomes `"1,234,567.50"`.
pub fn format_currency(amount: Option<Decimal>) -> Option<String> {
    let amount = amount?.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = amount.is_sign_negative() && !amount.is_zero();
    let text = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    Some(format!(
        "{}{grouped}.{frac_part}",
        if negative { "-" } else { "" }
    ))
}
