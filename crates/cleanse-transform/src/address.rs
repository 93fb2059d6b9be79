//! Street address merging.

use cleanse_model::Table;

pub const STREET_ADDRESS_1: &str = "street address 1";
pub const STREET_ADDRESS_2: &str = "street address 2";

/// What [`merge_street_addresses`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMerge {
    /// The first column was blank and took the whole second column.
    MovedColumn,
    /// Individual rows were filled from the second column.
    FilledRows { filled: usize, cleared: usize },
}

/// Fold the second street address line into the first.
///
/// When `first` is blank in every row, `second` is moved over wholesale and
/// left blank. Otherwise empty `first` cells are filled from `second`, and any
/// `second` cell now equal to its `first` cell is cleared.
pub fn merge_street_addresses(table: &mut Table, first: usize, second: usize) -> AddressMerge {
    let first_blank = table.column(first).is_some_and(|column| column.is_blank());
    if first_blank {
        for row in 0..table.height() {
            table.swap_cells(row, first, second);
        }
        return AddressMerge::MovedColumn;
    }

    let mut filled = 0;
    let mut cleared = 0;
    for row in 0..table.height() {
        if table.cell(row, first).is_empty() {
            let value = table.cell(row, second).to_string();
            if !value.is_empty() {
                table.set_cell(row, first, value);
                filled += 1;
            }
        }
        let second_value = table.cell(row, second);
        if !second_value.is_empty() && second_value == table.cell(row, first) {
            table.set_cell(row, second, "");
            cleared += 1;
        }
    }
    AddressMerge::FilledRows { filled, cleared }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addresses(rows: &[[&str; 2]]) -> Table {
        Table::from_rows(
            vec!["Street Address 1".into(), "Street Address 2".into()],
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn blank_first_column_takes_second() {
        let mut table = addresses(&[["", "1 High St"], ["", "2 Low Rd"]]);
        assert_eq!(merge_street_addresses(&mut table, 0, 1), AddressMerge::MovedColumn);
        assert_eq!(table.column(0).unwrap().cells, vec!["1 High St", "2 Low Rd"]);
        assert!(table.column(1).unwrap().is_blank());
    }

    #[test]
    fn gaps_are_filled_row_by_row() {
        let mut table = addresses(&[["1 High St", "Flat 2"], ["", "2 Low Rd"], ["3 Mill Ln", "3 Mill Ln"]]);
        let merge = merge_street_addresses(&mut table, 0, 1);
        assert_eq!(merge, AddressMerge::FilledRows { filled: 1, cleared: 2 });
        assert_eq!(table.row(0), vec!["1 High St", "Flat 2"]);
        assert_eq!(table.row(1), vec!["2 Low Rd", ""]);
        assert_eq!(table.row(2), vec!["3 Mill Ln", ""]);
    }
}
