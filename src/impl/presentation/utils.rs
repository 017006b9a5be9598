use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};
use rust_decimal::{prelude::ToPrimitive as _, Decimal};

/// Standard number decimal places for the given currency
/// (ex. JPY = 0, INR = 2).
fn decimal_places(currency: Currency) -> u32 {
    currency.exponent().unwrap_or(0) as u32
}

/// Thousands-grouped integer digits of a non-negative whole amount. Goes
/// through the decimal string so the full `Decimal` range prints exactly.
fn group_thousands(whole: Decimal) -> String {
    let digits = whole.to_string();
    let digits = digits.split('.').next().unwrap_or("0");
    match digits.parse::<u128>() {
        Ok(n) => n.to_formatted_string(&Locale::en),
        Err(_) => digits.to_string(),
    }
}

/// Format cash amount with leading currency symbol, correct number of decimal
/// places and thousands separators (ex. ₹12,500.00).
///
/// For consistency, uses en locale ('.' as decimal mark, i.e. 1,000.00)
/// regardless of user's locale or currency.
pub(crate) fn format_amount(amount: Decimal, currency: Currency) -> String {
    let decimal_places = decimal_places(currency);
    let rounded = amount.round_dp(decimal_places);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = rounded.abs();
    let integer_part = group_thousands(abs.trunc());
    if decimal_places == 0 {
        return format!("{}{}{}", sign, currency.symbol(), integer_part);
    }
    let fractional_part = (abs.fract() * Decimal::from(10_i64.pow(decimal_places)))
        .trunc()
        .to_i64()
        .unwrap_or(0);
    format!(
        "{}{}{}.{:0width$}",
        sign,
        currency.symbol(),
        integer_part,
        fractional_part,
        width = decimal_places as usize,
    )
}
