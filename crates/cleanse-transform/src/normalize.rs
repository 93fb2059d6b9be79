//! Header and cell whitespace normalization.

use cleanse_model::{Table, dedupe_names};

/// Trim a header and capitalize it unless it already starts upper-case.
///
/// Capitalizing upper-cases the first character and lower-cases the rest, so
/// `email address` becomes `Email address` while `Email Address` is kept.
pub fn normalize_header(name: &str) -> String {
    let trimmed = name.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) if !first.is_uppercase() => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        _ => trimmed.to_string(),
    }
}

/// Normalize every header and trim every cell.
///
/// Headers that collide after normalization are suffixed `.1`, `.2`, ...
pub fn normalize_table(mut table: Table) -> Table {
    let names = dedupe_names(table.column_names().map(normalize_header).collect::<Vec<_>>());
    for (idx, name) in names.into_iter().enumerate() {
        if let Some(column) = table.column_mut(idx) {
            column.name = name;
        }
    }
    table.map_cells(|cell| cell.trim().to_string());
    table
}
