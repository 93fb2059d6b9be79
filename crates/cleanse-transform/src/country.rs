//! Country column normalization to ISO alpha-3 codes.

use cleanse_model::Table;
use cleanse_validate::CountryLookup;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryOutcome {
    /// Cells replaced by their ISO code.
    pub converted: usize,
    /// Rows whose value could not be resolved, with the value.
    pub unresolved: Vec<(usize, String)>,
}

/// Replace every resolvable non-empty cell of `column` with its alpha-3 code.
/// Unresolvable values are left as they are.
pub fn normalize_countries(
    table: &mut Table,
    column: usize,
    lookup: &dyn CountryLookup,
) -> CountryOutcome {
    let mut outcome = CountryOutcome::default();
    for row in 0..table.height() {
        let value = table.cell(row, column);
        if value.is_empty() {
            continue;
        }
        match lookup.alpha3(value) {
            Some(code) => {
                if code != value {
                    outcome.converted += 1;
                }
                table.set_cell(row, column, code);
            }
            None => outcome.unresolved.push((row, value.to_string())),
        }
    }
    outcome
}
