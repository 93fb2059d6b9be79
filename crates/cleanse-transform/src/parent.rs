//! Removal of parent values that restate the record's own identity.

use cleanse_model::Table;

use crate::resolve::resolve_column;

/// Columns a parent value is compared against, lowercase.
pub const IDENTITY_COLUMNS: [&str; 3] = ["name", "site", "customer"];

/// Trim the parent column, then blank every parent cell equal to the same
/// row's value in one of the [`IDENTITY_COLUMNS`].
///
/// Returns the number of cleared cells per compared column, for the columns
/// present in the table.
pub fn dedupe_parent(table: &mut Table, parent: usize) -> Vec<(String, usize)> {
    table.map_column(parent, |cell| cell.trim().to_string());

    let mut cleared = Vec::new();
    for name in IDENTITY_COLUMNS {
        let Some(other) = resolve_column(table, &[name]) else {
            continue;
        };
        if other == parent {
            continue;
        }
        let mut count = 0;
        for row in 0..table.height() {
            let value = table.cell(row, parent);
            if !value.is_empty() && value == table.cell(row, other) {
                table.set_cell(row, parent, "");
                count += 1;
            }
        }
        let column_name = table.column(other).map(|c| c.name.clone()).unwrap_or_default();
        cleared.push((column_name, count));
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_matching_name_is_cleared() {
        let mut table = Table::from_rows(
            vec!["Name".into(), "Parent".into(), "Site".into()],
            vec![
                vec!["Acme".into(), " Acme ".into(), "North".into()],
                vec!["Beta".into(), "Group".into(), "South".into()],
                vec!["Gamma".into(), "West".into(), "West".into()],
            ],
        )
        .unwrap();
        let cleared = dedupe_parent(&mut table, 1);
        assert_eq!(
            cleared,
            vec![("Name".to_string(), 1), ("Site".to_string(), 1)]
        );
        assert_eq!(table.column(1).unwrap().cells, vec!["", "Group", ""]);
    }
}
