//! In-memory string table.
//!
//! Columns keep their insertion order and every column holds exactly
//! [`Table::height`] cells. Rows are positional: they are never reordered or
//! removed, so a row index stays valid for the lifetime of the table.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// A named column of text cells. The empty string means "no value".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<String>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// True when every cell is empty (also true for a zero-row column).
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(String::is_empty)
    }

    /// Number of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }
}

/// Make column names unique by suffixing repeats with `.1`, `.2`, ...
///
/// The first occurrence keeps its name.
pub fn dedupe_names<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let mut candidate = name.clone();
        let mut n = 1usize;
        while out.contains(&candidate) {
            candidate = format!("{name}.{n}");
            n += 1;
        }
        out.push(candidate);
    }
    out
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

impl Table {
    /// Create a table with no columns and `height` rows.
    pub fn with_height(height: usize) -> Self {
        Self {
            columns: Vec::new(),
            height,
        }
    }

    /// Build a table from whole columns.
    ///
    /// # Errors
    ///
    /// Returns an error when the columns differ in length or two columns share
    /// a name.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let height = columns.first().map_or(0, |column| column.cells.len());
        let mut table = Self::with_height(height);
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Build a table from a header row and data rows.
    ///
    /// Short rows are padded with empty cells; cells beyond the header width
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error when two headers are identical.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let height = rows.len();
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|name| Column::new(name, Vec::with_capacity(height)))
            .collect();
        for row in rows {
            for (idx, column) in columns.iter_mut().enumerate() {
                column.cells.push(row.get(idx).cloned().unwrap_or_default());
            }
        }
        let mut table = Self::with_height(height);
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn column_mut(&mut self, index: usize) -> Option<&mut Column> {
        self.columns.get_mut(index)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }

    /// Index of the column with exactly this name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Append a column.
    ///
    /// # Errors
    ///
    /// Returns an error when the column length differs from the table height
    /// or the name is already taken.
    pub fn push_column(&mut self, column: Column) -> Result<usize> {
        if column.cells.len() != self.height {
            return Err(ModelError::RaggedColumn {
                column: column.name,
                expected: self.height,
                actual: column.cells.len(),
            });
        }
        if self.contains(&column.name) {
            return Err(ModelError::DuplicateColumn(column.name));
        }
        self.columns.push(column);
        Ok(self.columns.len() - 1)
    }

    /// Index of `name`, appending an all-empty column when it does not exist.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(index) = self.position(name) {
            return index;
        }
        self.columns
            .push(Column::new(name, vec![String::new(); self.height]));
        self.columns.len() - 1
    }

    /// Like [`Table::ensure_column`], but blanks an existing column.
    pub fn reset_column(&mut self, name: &str) -> usize {
        let index = self.ensure_column(name);
        for cell in &mut self.columns[index].cells {
            cell.clear();
        }
        index
    }

    /// Cell at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        &self.columns[col].cells[row]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.columns
            .get(col)
            .and_then(|column| column.cells.get(row))
            .map(String::as_str)
    }

    /// Overwrite the cell at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics when either index is out of range.
    pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<String>) {
        self.columns[col].cells[row] = value.into();
    }

    /// Exchange the values of two cells in the same row.
    ///
    /// # Panics
    ///
    /// Panics when any index is out of range.
    pub fn swap_cells(&mut self, row: usize, a: usize, b: usize) {
        if a == b {
            return;
        }
        let taken = std::mem::take(&mut self.columns[a].cells[row]);
        let other = std::mem::replace(&mut self.columns[b].cells[row], taken);
        self.columns[a].cells[row] = other;
    }

    /// Apply `f` to every cell of one column.
    pub fn map_column<F>(&mut self, col: usize, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        if let Some(column) = self.columns.get_mut(col) {
            for cell in &mut column.cells {
                *cell = f(cell);
            }
        }
    }

    /// Apply `f` to every cell of the table.
    pub fn map_cells<F>(&mut self, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        for column in &mut self.columns {
            for cell in &mut column.cells {
                *cell = f(cell);
            }
        }
    }

    /// Values of one row, in column order.
    pub fn row(&self, row: usize) -> Vec<&str> {
        self.columns
            .iter()
            .map(|column| column.cells[row].as_str())
            .collect()
    }

    /// All rows, in column order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        (0..self.height).map(|row| self.row(row))
    }
}
