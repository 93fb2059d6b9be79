//! Alias-based column resolution.

use cleanse_model::{FieldKind, Table};

/// Index of the first column whose lowercased name equals one of `aliases`.
///
/// Aliases must be lowercase. Later columns matching the same aliases are
/// ignored.
pub fn resolve_column(table: &Table, aliases: &[&str]) -> Option<usize> {
    table.column_names().position(|name| {
        let lower = name.to_lowercase();
        aliases.contains(&lower.as_str())
    })
}

/// Column holding `field`, if the table has one.
pub fn resolve_field(table: &Table, field: FieldKind) -> Option<usize> {
    resolve_column(table, field.aliases())
}
