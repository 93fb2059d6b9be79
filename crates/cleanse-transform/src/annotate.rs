//! Per-field error columns.
//!
//! A column is checked as a field when it is the field's resolved column or
//! when the field's check name appears in its lowercased, underscored name
//! (`Work phone` is checked as a phone). Failing values are copied into
//! `"<Field> Errors"`; passing and empty cells leave the error cell as is.

use cleanse_model::{FieldKind, Table, error_column_name, is_error_column};
use cleanse_validate::{valid_email_strict, validator_for};

use crate::email::annotate_email_list;
use crate::resolve::resolve_field;

/// Check names of single-value fields, in the order they are applied.
const FIELD_CHECKS: [(&str, FieldKind); 4] = [
    ("postcode", FieldKind::Postcode),
    ("phone", FieldKind::Phone),
    ("email", FieldKind::Email),
    ("landline", FieldKind::Landline),
];

/// Check names of comma-separated email list columns.
const LIST_CHECKS: [&str; 2] = ["additional_emails", "emails_(additional)"];

fn check_key(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Build every error column, then recompute `Email Errors` with the strict
/// single-address check. Returns the names of the error columns written.
pub fn annotate_errors(table: &mut Table) -> Vec<String> {
    let names: Vec<String> = table.column_names().map(str::to_string).collect();
    let additional = resolve_field(table, FieldKind::AdditionalEmail);
    let resolved: Vec<(FieldKind, Option<usize>)> = FIELD_CHECKS
        .iter()
        .map(|(_, field)| (*field, resolve_field(table, *field)))
        .collect();

    let mut written: Vec<String> = Vec::new();
    let mut record = |name: String| {
        if !written.contains(&name) {
            written.push(name);
        }
    };

    for (idx, name) in names.iter().enumerate() {
        if is_error_column(name) {
            continue;
        }
        let key = check_key(name);
        if additional == Some(idx) || LIST_CHECKS.iter().any(|check| key.contains(check)) {
            annotate_email_list(table, idx);
            record(error_column_name(name));
            continue;
        }
        for ((check, field), (_, resolved_idx)) in FIELD_CHECKS.iter().zip(&resolved) {
            if *resolved_idx == Some(idx) || key.contains(check) {
                annotate_column(table, idx, *field);
                record(error_column_name(field.display_name()));
            }
        }
    }

    if let Some(email) = resolve_field(table, FieldKind::Email) {
        annotate_strict_email(table, email);
        record(error_column_name(FieldKind::Email.display_name()));
    }
    written
}

/// Copy the failing values of `column` into the error column of `field`.
pub fn annotate_column(table: &mut Table, column: usize, field: FieldKind) -> usize {
    let errors = table.ensure_column(&error_column_name(field.display_name()));
    let Some(valid) = validator_for(field) else {
        return errors;
    };
    for row in 0..table.height() {
        let value = table.cell(row, column);
        if !value.is_empty() && !valid(value) {
            let value = value.to_string();
            table.set_cell(row, errors, value);
        }
    }
    errors
}

/// Rebuild `Email Errors` from scratch: a cell with several `@` or several
/// whitespace-separated tokens is an error even if it starts like an address.
pub fn annotate_strict_email(table: &mut Table, email: usize) -> usize {
    let errors = table.reset_column(&error_column_name(FieldKind::Email.display_name()));
    for row in 0..table.height() {
        let value = table.cell(row, email);
        if !value.is_empty() && !valid_email_strict(value) {
            let value = value.to_string();
            table.set_cell(row, errors, value);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::from_rows(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn invalid_values_are_copied() {
        let mut t = table(
            &["Email", "Phone", "Post_code"],
            &[
                &["not-an-email", "12345", "SW1A 1AA"],
                &["a@x.com", "077 00900123", "hello"],
            ],
        );
        let written = annotate_errors(&mut t);
        assert_eq!(written, vec!["Email Errors", "Phone Errors", "Postcode Errors"]);
        let col = |name: &str| t.column(t.position(name).unwrap()).unwrap().cells.clone();
        assert_eq!(col("Email Errors"), vec!["not-an-email", ""]);
        assert_eq!(col("Phone Errors"), vec!["12345", ""]);
        assert_eq!(col("Postcode Errors"), vec!["", "hello"]);
    }

    #[test]
    fn strict_email_check_rejects_multiple_addresses() {
        let mut t = table(&["Email Address"], &[&["a@x.com b@y.com"], &["a@b@c.com"], &["ok@x.com"]]);
        annotate_errors(&mut t);
        let errors = t.column(t.position("Email Errors").unwrap()).unwrap();
        assert_eq!(errors.cells, vec!["a@x.com b@y.com", "a@b@c.com", ""]);
    }

    #[test]
    fn substring_names_are_checked() {
        let mut t = table(&["Work phone", "Landline"], &[&["abc", "01 23456 78901"]]);
        annotate_errors(&mut t);
        assert_eq!(t.column_names().collect::<Vec<_>>(), vec![
            "Work phone",
            "Landline",
            "Phone Errors",
            "Landline Errors"
        ]);
        assert_eq!(t.row(0), vec!["abc", "01 23456 78901", "abc", ""]);
    }

    #[test]
    fn existing_additional_column_lists_invalid_tokens() {
        let mut t = table(&["Emails (Additional)"], &[&["a@x.com, nope, b@y"]]);
        let written = annotate_errors(&mut t);
        assert_eq!(written, vec!["Emails (Additional) Errors"]);
        assert_eq!(t.cell(0, 1), "nope, b@y");
    }

    #[test]
    fn existing_error_cells_survive_passing_rows() {
        let mut t = table(&["Phone", "Phone Errors"], &[&["077 00900123", "kept"]]);
        annotate_errors(&mut t);
        assert_eq!(t.cell(0, 1), "kept");
    }
}
