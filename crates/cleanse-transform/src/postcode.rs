//! Country-aware postcode checking.

use cleanse_model::{FieldKind, Table, error_column_name};
use cleanse_validate::PostcodeMatcher;

/// Rewrite `Postcode Errors` using per-country patterns.
///
/// For each non-empty postcode the country is taken from `country` when that
/// cell holds an alpha-3 code, otherwise from the first pattern that matches.
/// Rows that pass are cleared; failures get a message naming the problem.
/// Empty postcodes are not touched. Returns the number of failing rows.
pub fn check_country_postcodes(
    table: &mut Table,
    postcode: usize,
    country: Option<usize>,
    matcher: &PostcodeMatcher,
) -> usize {
    let errors = table.ensure_column(&error_column_name(FieldKind::Postcode.display_name()));
    let mut failures = 0;
    for row in 0..table.height() {
        let value = table.cell(row, postcode).to_string();
        if value.is_empty() {
            continue;
        }
        let iso = country
            .map(|col| table.cell(row, col))
            .filter(|code| is_alpha3(code))
            .map(str::to_string)
            .or_else(|| matcher.match_postcode_to_iso(&value).map(str::to_string));

        let message = match iso {
            None => Some(format!(
                "Postcode {value} does not match any country ISO code pattern."
            )),
            Some(iso) if !matcher.validate_postcode_for_country(&value, &iso) => Some(format!(
                "Postcode {value} does not match the pattern for country {iso}."
            )),
            Some(_) => None,
        };
        match message {
            Some(message) => {
                table.set_cell(row, errors, message);
                failures += 1;
            }
            None => table.set_cell(row, errors, ""),
        }
    }
    failures
}

fn is_alpha3(value: &str) -> bool {
    value.len() == 3 && value.chars().all(|ch| ch.is_ascii_uppercase())
}
