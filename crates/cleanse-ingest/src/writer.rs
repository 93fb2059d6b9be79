//! Quoted CSV re-encoding of a [`Table`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{QuoteStyle, WriterBuilder};

use cleanse_model::Table;

use crate::error::{IngestError, Result};

/// Write `table` with every field quoted, header row first.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut out = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);
    if table.width() > 0 {
        out.write_record(table.column_names())?;
        for row in table.rows() {
            out.write_record(&row)?;
        }
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write `table` to `path`, creating parent directories as needed.
pub fn write_csv_table(table: &Table, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| IngestError::FileWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    let file = File::create(path).map_err(|e| IngestError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    write_csv(table, BufWriter::new(file))?;
    tracing::debug!(path = %path.display(), rows = table.height(), "wrote table");
    Ok(())
}

/// Render `table` as quoted CSV text.
pub fn to_csv_string(table: &Table) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
