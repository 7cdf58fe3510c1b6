//! Amount parsing.
//!
//! [`parse_amount`] turns a raw token typed by a user into a [`Money`] value
//! under an [`AmountPolicy`]. It never panics and never touches the store: a
//! token that fails here cannot reach an insert.

use std::sync::LazyLock;

use regex::Regex;

use crate::{AmountPolicy, Money, ParseError};

const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("integer pattern is valid"));

// Thousands groups first so `1,234.50` is taken whole; plain digit runs and
// bare fractions after that.
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[+-]?(?:(?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:\.[0-9]*)?|\.[0-9]+)")
        .expect("decimal pattern is valid")
});

/// Parses `token` into an amount.
///
/// - `Integer`: currency symbols and grouping punctuation are dropped, what is
///   left must be `[+-]?digits`. Letters or a decimal point make the token
///   invalid rather than being silently discarded.
/// - `Decimal`: the first numeric substring is taken (`1,234.5`, `-3`, `.75`),
///   with at most two fractional digits.
///
/// # Examples
///
/// ```rust
/// use engine::{AmountPolicy, ParseError, parse_amount};
///
/// assert_eq!(parse_amount("$2,500", AmountPolicy::Integer).unwrap().minor(), 250_000);
/// assert_eq!(parse_amount("12.5", AmountPolicy::Decimal).unwrap().minor(), 1_250);
/// assert_eq!(parse_amount("12.5", AmountPolicy::Integer), Err(ParseError::NotAnInteger));
/// ```
pub fn parse_amount(token: &str, policy: AmountPolicy) -> Result<Money, ParseError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    let stripped = strip_currency(trimmed);

    match policy {
        AmountPolicy::Integer => parse_integer(&stripped),
        AmountPolicy::Decimal => parse_decimal(&stripped),
    }
}

/// Removes a leading currency symbol, also when it follows the sign
/// (`-$5` → `-5`).
fn strip_currency(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if CURRENCY_SYMBOLS.contains(&c) => chars.as_str().trim_start().to_string(),
        Some(sign @ ('+' | '-')) => {
            let rest = chars.as_str();
            match rest.strip_prefix(CURRENCY_SYMBOLS) {
                Some(rest) => format!("{sign}{}", rest.trim_start()),
                None => token.to_string(),
            }
        }
        _ => token.to_string(),
    }
}

fn parse_integer(token: &str) -> Result<Money, ParseError> {
    if token.chars().any(|c| c == '.' || c.is_alphabetic()) {
        return Err(ParseError::NotAnInteger);
    }

    let kept: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+' || *c == '-')
        .collect();
    if !INTEGER.is_match(&kept) {
        return Err(ParseError::NotAnInteger);
    }

    // The pattern guarantees digits only, so a failure here is an overflow.
    let major: i64 = kept.parse().map_err(|_| ParseError::OutOfRange)?;
    Money::from_major(major).map_err(|_| ParseError::OutOfRange)
}

fn parse_decimal(token: &str) -> Result<Money, ParseError> {
    if token.chars().filter(|c| *c == '+' || *c == '-').count() > 1 {
        return Err(ParseError::NotANumber);
    }

    let found = DECIMAL.find(token).ok_or(ParseError::NotANumber)?.as_str();
    let (negative, unsigned) = match found.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, found.strip_prefix('+').unwrap_or(found)),
    };

    let digits = unsigned.replace(',', "");
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (digits.as_str(), ""),
    };

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| ParseError::OutOfRange)?
    };
    let cents: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| ParseError::NotANumber)? * 10,
        2 => fraction.parse::<i64>().map_err(|_| ParseError::NotANumber)?,
        _ => return Err(ParseError::TooManyDecimals),
    };

    let total = whole
        .checked_mul(100)
        .and_then(|v| v.checked_add(cents))
        .ok_or(ParseError::OutOfRange)?;

    Ok(Money::new(if negative { -total } else { total }))
}
