//! CSV file reading into a [`Table`].
//!
//! Polars does the CSV decode with schema inference disabled, so every column
//! arrives as text. Null cells and the usual null tokens become `""`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{AnyValue, CsvReadOptions, DataFrame, SerReader};

use cleanse_model::{Column, Table, dedupe_names};

use crate::error::{IngestError, Result};

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Cell values treated as "no value" on load.
pub const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "NaT", "None", "n/a", "nan", "null",
];

/// True when `value` is one of [`NULL_MARKERS`].
pub fn is_null_marker(value: &str) -> bool {
    NULL_MARKERS.contains(&value)
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reject UTF-16 input; UTF-8 with or without BOM is accepted.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads a CSV file with a single header row into a Polars DataFrame of
/// string columns.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    check_file_size(path)?;
    validate_encoding(path)?;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Reads a CSV file into a [`Table`].
pub fn read_csv_table(path: &Path) -> Result<Table> {
    let df = read_csv_frame(path)?;
    let table = table_from_frame(&df)?;
    tracing::debug!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "loaded table"
    );
    if table.width() > 500 {
        tracing::warn!(
            path = %path.display(),
            columns = table.width(),
            "Table has more than 500 columns - may impact performance"
        );
    }
    Ok(table)
}

/// Convert a DataFrame into a [`Table`], rendering every value as text.
///
/// Blank header names become `Unnamed: <index>` and repeated names are
/// suffixed, so the resulting column names are unique.
pub fn table_from_frame(df: &DataFrame) -> Result<Table> {
    let raw_names = df
        .get_columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let name = column.name().as_str().trim_start_matches('\u{feff}');
            if name.trim().is_empty() {
                format!("Unnamed: {idx}")
            } else {
                name.to_string()
            }
        });
    let names = dedupe_names(raw_names);

    let height = df.height();
    let mut columns = Vec::with_capacity(names.len());
    for (column, name) in df.get_columns().iter().zip(names) {
        let cells = (0..height)
            .map(|idx| coerce_cell(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        columns.push(Column::new(name, cells));
    }

    let mut table = Table::with_height(height);
    for column in columns {
        table.push_column(column)?;
    }
    Ok(table)
}

fn coerce_cell(value: AnyValue<'_>) -> String {
    let text = any_to_string(value);
    if is_null_marker(&text) {
        String::new()
    } else {
        text
    }
}

/// Converts a Polars AnyValue to a String representation.
/// Returns empty string for Null.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}
