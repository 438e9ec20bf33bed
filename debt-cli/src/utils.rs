use std::sync::OnceLock;

use chrono::NaiveDate;
use debt_core::calculations::common::{round_half_up, round_whole};
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when user input cannot be read as an amount.
#[derive(Debug, Error)]
pub enum ParseMoneyError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("internal pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

static MONEY_NOISE: OnceLock<Regex> = OnceLock::new();

/// Currency symbols, percent signs, thousands separators and whitespace.
fn money_noise() -> Result<&'static Regex, regex::Error> {
    if let Some(re) = MONEY_NOISE.get() {
        return Ok(re);
    }
    let re = Regex::new(r"[\s,$%]")?;
    Ok(MONEY_NOISE.get_or_init(|| re))
}

/// Parses an amount typed by a user: `"$1,234.56"`, `" 18.99% "`, `"250"`.
///
/// Unlike form fields, an empty value is an error rather than zero.
pub fn parse_money(s: &str) -> Result<Decimal, ParseMoneyError> {
    let normalized = money_noise()?.replace_all(s, "");
    if normalized.is_empty() {
        return Err(ParseMoneyError::Empty);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseMoneyError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Inserts `,` every three digits of a non-negative integer string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn with_sign(
    negative: bool,
    body: String,
) -> String {
    if negative { format!("-${body}") } else { format!("${body}") }
}

/// Whole-dollar display used on the dashboard, e.g. `$19,500`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_whole(value);
    let digits = rounded.abs().trunc().to_string();
    with_sign(rounded.is_sign_negative() && !rounded.is_zero(), group_thousands(&digits))
}

/// Two-decimal display used in tables, e.g. `$4,933.74`.
pub fn format_money(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    with_sign(
        rounded.is_sign_negative() && !rounded.is_zero(),
        format!("{}.{}", group_thousands(whole), cents),
    )
}

/// `Mar 2027`.
pub fn format_month_year(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// `27 months (2 yrs 3 mos)`; the bracket is omitted under a year.
pub fn format_duration(months: u32) -> String {
    let unit = if months == 1 { "month" } else { "months" };
    if months < 12 {
        return format!("{months} {unit}");
    }
    let (years, rest) = (months / 12, months % 12);
    let yrs = if years == 1 { "yr" } else { "yrs" };
    if rest == 0 {
        format!("{months} {unit} ({years} {yrs})")
    } else {
        let mos = if rest == 1 { "mo" } else { "mos" };
        format!("{months} {unit} ({years} {yrs} {rest} {mos})")
    }
}
