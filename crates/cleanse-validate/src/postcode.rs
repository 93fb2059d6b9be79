//! Country-aware postcode patterns.

use std::sync::LazyLock;

use regex::Regex;

/// Royal Mail format, outward and inward code optionally separated by a space.
static GBR_POSTCODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(GIR\s?0AA|[A-PR-UWYZ]([0-9]{1,2}|([A-HK-Y][0-9]|[A-HK-Y][0-9]([0-9]|[ABEHMNPRV-Y]))|[0-9][A-HJKS-UW])\s?[0-9][ABD-HJLNP-UW-Z]{2})$",
    )
    .expect("Invalid GBR postcode regex")
});

/// Eircode, e.g. `A65 F4E2`.
static IRL_POSTCODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]\d{2}\s[A-Za-z]\d[A-Za-z]\d$").expect("Invalid IRL postcode regex")
});

/// Maps ISO alpha-3 codes to postcode patterns. Lookup order is fixed.
#[derive(Debug, Clone)]
pub struct PostcodeMatcher {
    patterns: Vec<(&'static str, &'static Regex)>,
}

impl Default for PostcodeMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PostcodeMatcher {
    pub fn new() -> Self {
        Self {
            patterns: vec![("GBR", &*GBR_POSTCODE_REGEX), ("IRL", &*IRL_POSTCODE_REGEX)],
        }
    }

    /// First country whose pattern accepts `postcode`.
    pub fn match_postcode_to_iso(&self, postcode: &str) -> Option<&'static str> {
        let postcode = postcode.trim();
        self.patterns
            .iter()
            .find(|(_, regex)| regex.is_match(postcode))
            .map(|(iso, _)| *iso)
    }

    /// False when `iso` has no known pattern.
    pub fn validate_postcode_for_country(&self, postcode: &str, iso: &str) -> bool {
        let postcode = postcode.trim();
        self.patterns
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(iso))
            .is_some_and(|(_, regex)| regex.is_match(postcode))
    }
}
