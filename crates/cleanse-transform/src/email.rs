//! Splitting of multi-address email cells.

use cleanse_model::{ADDITIONAL_EMAILS_COLUMN, FieldKind, Table, error_column_name};
use cleanse_validate::{invalid_email_tokens, valid_email};
use tracing::debug;

use crate::resolve::resolve_field;

/// Where the extra addresses of a split went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSplit {
    /// Index of the additional-email column.
    pub destination: usize,
    /// False when the table already had an additional-email column.
    pub created: bool,
    /// Rows whose cell held more than one address.
    pub split_rows: usize,
    /// Rows recorded in `Email Errors`.
    pub invalid_rows: usize,
}

/// Replace spaces with commas unless the value already holds a comma.
pub fn comma_delimit(value: &str) -> String {
    if value.contains(',') {
        value.to_string()
    } else {
        value.replace(' ', ",")
    }
}

/// Split the email column at `email` into a primary and additional addresses.
///
/// `Email Errors` is rebuilt from the comma-delimited values. An existing
/// additional-email column is reused, otherwise `Additional Emails` is created
/// together with its own error column listing the invalid extra addresses.
pub fn split_emails(table: &mut Table, email: usize) -> EmailSplit {
    table.map_column(email, comma_delimit);

    let errors = table.reset_column(&error_column_name(FieldKind::Email.display_name()));
    let mut invalid_rows = 0;
    for row in 0..table.height() {
        let value = table.cell(row, email).trim().to_string();
        if !value.is_empty() && !valid_email(&value) {
            table.set_cell(row, errors, value);
            invalid_rows += 1;
        }
    }

    let existing = resolve_field(table, FieldKind::AdditionalEmail);
    let created = existing.is_none();
    let destination = existing.unwrap_or_else(|| table.ensure_column(ADDITIONAL_EMAILS_COLUMN));

    let mut split_rows = 0;
    for row in 0..table.height() {
        let value = table.cell(row, email);
        if !value.contains(',') {
            continue;
        }
        let mut parts = value.split(',');
        let primary = parts.next().unwrap_or_default().trim().to_string();
        let rest = parts
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if !rest.is_empty() {
            table.set_cell(row, destination, rest);
        }
        table.set_cell(row, email, primary);
        split_rows += 1;
    }

    if created {
        annotate_email_list(table, destination);
    }
    debug!(split_rows, created, "split email column");

    EmailSplit {
        destination,
        created,
        split_rows,
        invalid_rows,
    }
}

/// Rebuild `"<column> Errors"` for a comma-separated email column, listing
/// the invalid addresses of each cell joined with `", "`. Returns the error
/// column index.
pub fn annotate_email_list(table: &mut Table, column: usize) -> usize {
    let name = table
        .column(column)
        .map(|column| error_column_name(&column.name))
        .unwrap_or_default();
    let errors = table.reset_column(&name);
    for row in 0..table.height() {
        let invalid = invalid_email_tokens(table.cell(row, column)).join(", ");
        if !invalid.is_empty() {
            table.set_cell(row, errors, invalid);
        }
    }
    errors
}
