//! Country name to ISO 3166-1 alpha-3 resolution.

use std::str::FromStr;

use celes::Country;
use deunicode::deunicode;

/// Resolves free-text country names to ISO alpha-3 codes.
pub trait CountryLookup: Send + Sync {
    /// Alpha-3 code for `name`, or `None` when the name is not recognized.
    fn alpha3(&self, name: &str) -> Option<String>;
}

/// Lookup backed by the ISO 3166 dataset shipped with `celes`.
///
/// Accepts long names, common aliases, alpha-2, alpha-3 and numeric codes,
/// case-insensitively.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoCountryLookup;

impl IsoCountryLookup {
    pub fn new() -> Self {
        Self
    }
}

impl CountryLookup for IsoCountryLookup {
    fn alpha3(&self, name: &str) -> Option<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        lookup_candidates(trimmed)
            .iter()
            .find_map(|candidate| {
                Country::from_str(candidate)
                    .or_else(|_| Country::from_alias(candidate))
                    .ok()
            })
            .map(|country| country.alpha3.to_string())
    }
}

/// Spellings tried in order: as given, folded to ASCII, squashed to letters
/// and digits, squashed without a leading "the". A "Name, Qualifier of" form
/// adds "Qualifier of Name" and then "Name".
fn lookup_candidates(name: &str) -> Vec<String> {
    let folded = deunicode(name);
    let squashed = squash(&folded);
    let mut candidates = vec![name.to_string()];
    push_candidate(&mut candidates, folded.clone());
    push_candidate(&mut candidates, squashed.clone());
    if let Some(rest) = squashed.strip_prefix("the") {
        push_candidate(&mut candidates, rest.to_string());
    }
    if let Some((head, qualifier)) = folded.split_once(',') {
        push_candidate(&mut candidates, squash(&format!("{qualifier} {head}")));
        push_candidate(&mut candidates, squash(head));
    }
    candidates
}

fn squash(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

fn push_candidate(candidates: &mut Vec<String>, candidate: String) {
    if !candidate.is_empty()
        && !candidates
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(&candidate))
    {
        candidates.push(candidate);
    }
}
