//! Contact table ingestion.
//!
//! Loads delimited files into a [`cleanse_model::Table`] of text cells and
//! writes cleansed tables back out with every field quoted.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use cleanse_ingest::{read_csv_table, write_csv_table};
//!
//! let table = read_csv_table(Path::new("uploads/contacts.csv"))?;
//! write_csv_table(&table, Path::new("processed/contacts.csv"))?;
//! ```

mod error;
mod reader;
mod writer;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::{
    MAX_CSV_FILE_SIZE, NULL_MARKERS, any_to_string, check_file_size, check_file_size_with_limit,
    is_null_marker, read_csv_frame, read_csv_table, table_from_frame, validate_encoding,
};

// === CSV Writing ===
pub use writer::{to_csv_string, write_csv, write_csv_table};
