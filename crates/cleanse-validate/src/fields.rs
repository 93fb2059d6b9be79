//! Per-field validity predicates.
//!
//! All patterns are anchored at the start of the value. The postcode and email
//! patterns are prefix matches (trailing text is allowed); phone and landline
//! must match the whole value.

use std::sync::LazyLock;

use regex::Regex;

use cleanse_model::FieldKind;

/// UK postcode, including the special `GIR 0AA`.
static UK_POSTCODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:([Gg][Ii][Rr] 0[Aa]{2})|((([A-Za-z][0-9]{1,2})|(([A-Za-z][A-Ha-hJ-Yj-y][0-9]{1,2})|(([A-Za-z][0-9][A-Za-z])|([A-Za-z][A-Ha-hJ-Yj-y][0-9][A-Za-z]?))))\s?[0-9][A-Za-z]{2}))",
    )
    .expect("Invalid UK postcode regex")
});

/// `ddd dddddddd...`
static UK_PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{3}\s\d{8,}$").expect("Invalid UK phone regex"));

/// `(ddd) ddd-dddd` with optional punctuation.
static US_PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}$").expect("Invalid US phone regex")
});

/// Irish numbers, accepted in the same `(ddd) ddd-dddd` shape as US numbers.
static IE_PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}$").expect("Invalid Irish phone regex")
});

/// `dd ddddd ddddd`
static UK_LANDLINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\s\d{5}\s\d{5}$").expect("Invalid landline regex"));

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+").expect("Invalid email regex"));

/// Region whose phone format is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneRegion {
    UnitedKingdom,
    UnitedStates,
    Ireland,
}

impl PhoneRegion {
    pub const ALL: [PhoneRegion; 3] = [
        PhoneRegion::UnitedKingdom,
        PhoneRegion::UnitedStates,
        PhoneRegion::Ireland,
    ];
}

pub fn valid_postcode(value: &str) -> bool {
    UK_POSTCODE_REGEX.is_match(value)
}

/// Valid when any supported region accepts the number.
pub fn valid_phone(value: &str) -> bool {
    PhoneRegion::ALL
        .iter()
        .any(|region| valid_phone_for_region(value, *region))
}

pub fn valid_phone_for_region(value: &str, region: PhoneRegion) -> bool {
    match region {
        PhoneRegion::UnitedKingdom => UK_PHONE_REGEX.is_match(value),
        PhoneRegion::UnitedStates => US_PHONE_REGEX.is_match(value),
        PhoneRegion::Ireland => IE_PHONE_REGEX.is_match(value),
    }
}

pub fn valid_landline(value: &str) -> bool {
    UK_LANDLINE_REGEX.is_match(value)
}

/// Permissive single-address check: `nonspace@nonspace.nonspace`.
pub fn valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// [`valid_email`] that also rejects cells holding more than one `@` or more
/// than one whitespace-separated token.
pub fn valid_email_strict(value: &str) -> bool {
    value.matches('@').count() <= 1 && value.split_whitespace().count() <= 1 && valid_email(value)
}

/// Comma-separated tokens of `cell`, trimmed, empty tokens dropped.
pub fn email_tokens(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(',').map(str::trim).filter(|token| !token.is_empty())
}

/// Tokens of a comma-separated email cell that fail [`valid_email`].
pub fn invalid_email_tokens(cell: &str) -> Vec<&str> {
    email_tokens(cell).filter(|token| !valid_email(token)).collect()
}

/// Valid when every comma-separated token is a valid email.
pub fn valid_email_list(cell: &str) -> bool {
    invalid_email_tokens(cell).is_empty() && email_tokens(cell).next().is_some()
}

/// Validity predicate for a field kind, `None` for kinds without one.
pub fn validator_for(kind: FieldKind) -> Option<fn(&str) -> bool> {
    match kind {
        FieldKind::Postcode => Some(valid_postcode),
        FieldKind::Phone => Some(valid_phone),
        FieldKind::Landline => Some(valid_landline),
        FieldKind::Email => Some(valid_email),
        FieldKind::AdditionalEmail => Some(valid_email_list),
        FieldKind::Identifier
        | FieldKind::Address
        | FieldKind::Country
        | FieldKind::Parent => None,
    }
}
