//! Internal helpers for text normalization.
//!
//! These utilities are **not** part of the public API, except for
//! [`title_case`] which the router uses for display labels.

use crate::{EngineError, ResultEngine};

/// Title-cases a category label for display (`eating out` → `Eating Out`).
#[must_use]
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-insensitive matching key for a category.
pub(crate) fn category_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Splits a free-text line into `(category, amount, note)`.
///
/// Whitespace separates at most three fields; the note keeps its inner
/// spacing and is empty when absent.
pub(crate) fn split_entry_text(raw: &str) -> ResultEngine<(&str, &str, &str)> {
    let trimmed = raw.trim();
    let (category, rest) = split_first_word(trimmed);
    let (amount, note) = split_first_word(rest);

    if category.is_empty() || amount.is_empty() {
        return Err(EngineError::MissingArguments(
            "please enter a category and an amount".to_string(),
        ));
    }
    Ok((category, amount, note))
}

/// Splits `amount [note]` arguments, as used by the revenue command.
pub(crate) fn split_amount_args(raw: &str) -> ResultEngine<(&str, &str)> {
    let (amount, note) = split_first_word(raw.trim());
    if amount.is_empty() {
        return Err(EngineError::MissingArguments(
            "please enter an amount".to_string(),
        ));
    }
    Ok((amount, note))
}

fn split_first_word(value: &str) -> (&str, &str) {
    match value.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (value, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_each_word() {
        assert_eq!(title_case("food"), "Food");
        assert_eq!(title_case("EATING  out"), "Eating Out");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn splits_three_fields_at_most() {
        assert_eq!(
            split_entry_text("  Food 2500 Lunch with   Bob ").unwrap(),
            ("Food", "2500", "Lunch with   Bob")
        );
        assert_eq!(split_entry_text("Gas\t20").unwrap(), ("Gas", "20", ""));
    }

    #[test]
    fn missing_amount_is_reported() {
        assert!(matches!(
            split_entry_text("Food"),
            Err(EngineError::MissingArguments(_))
        ));
        assert!(matches!(
            split_entry_text("   "),
            Err(EngineError::MissingArguments(_))
        ));
        assert!(matches!(
            split_amount_args(""),
            Err(EngineError::MissingArguments(_))
        ));
    }
}
