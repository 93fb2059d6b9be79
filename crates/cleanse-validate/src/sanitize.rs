//! Value sanitizers for identifier and number columns.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static PARENTHESISED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(([^)]*)\)").expect("Invalid parenthesis regex"));

/// Remove every alphabetic character, keeping digits and punctuation.
pub fn sanitize_identifier(value: &str) -> String {
    strip_alphabetic(value)
}

pub fn strip_alphabetic(value: &str) -> String {
    value.chars().filter(|ch| !ch.is_alphabetic()).collect()
}

/// Clean a phone or landline value.
///
/// Letters are removed first, then any parenthesised group without digits
/// (such as what remains of `(home)`) is dropped together with the whitespace
/// before it. Groups containing digits, like a `(555)` area code, are kept.
pub fn sanitize_number(value: &str) -> String {
    let stripped = strip_alphabetic(value);
    PARENTHESISED_REGEX
        .replace_all(&stripped, |caps: &Captures<'_>| {
            if caps[1].chars().any(|ch| ch.is_ascii_digit()) {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}
