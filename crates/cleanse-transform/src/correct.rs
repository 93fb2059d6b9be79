//! Misplaced-value correction.
//!
//! A value that satisfies a field's predicate but sits in some other column is
//! swapped into the field's column. Pattern match wins over column identity:
//! a phone-shaped note will be relocated just like a misfiled phone number.

use cleanse_model::{Table, is_error_column};

/// One relocation made by [`correct_misplaced`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swap {
    pub row: usize,
    /// Column the valid value came from.
    pub from: usize,
}

/// Swap valid values from other columns into `target`.
///
/// For each row whose target cell fails `valid`, the first other column (left
/// to right) whose cell passes is exchanged with the target cell. At most one
/// swap is made per row. Rows whose target cell already passes are left alone.
/// Derived error columns and the `protected` columns are never used as a
/// source.
pub fn correct_misplaced<F>(
    table: &mut Table,
    target: usize,
    protected: &[usize],
    valid: F,
) -> Vec<Swap>
where
    F: Fn(&str) -> bool,
{
    if target >= table.width() {
        return Vec::new();
    }
    let sources: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(idx, column)| {
            *idx != target && !protected.contains(idx) && !is_error_column(&column.name)
        })
        .map(|(idx, _)| idx)
        .collect();

    let mut swaps = Vec::new();
    for row in 0..table.height() {
        if valid(table.cell(row, target)) {
            continue;
        }
        if let Some(&from) = sources.iter().find(|&&col| valid(table.cell(row, col))) {
            table.swap_cells(row, from, target);
            swaps.push(Swap { row, from });
        }
    }
    swaps
}
