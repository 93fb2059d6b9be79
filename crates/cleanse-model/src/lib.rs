pub mod error;
pub mod field;
pub mod options;
pub mod report;
pub mod table;

pub use error::{ModelError, Result};
pub use field::{
    ADDITIONAL_EMAILS_COLUMN, ERROR_COLUMN_SUFFIX, FieldKind, error_column_name, is_error_column,
};
pub use options::CleanseOptions;
pub use report::{CleanseReport, Diagnostic, DiagnosticKind};
pub use table::{Column, Table, dedupe_names};
