use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::field::FieldKind;

/// Class of a non-fatal problem observed while cleansing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No column matched the aliases of a field; the step was skipped.
    MissingColumn,
    /// A cell failed its field's predicate and was recorded in an error column.
    ValidationFailure,
    /// A country name could not be resolved to an ISO code.
    LookupFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Name of the pipeline step that raised it.
    pub step: String,
    pub message: String,
    /// Row index, when the diagnostic is about a single cell.
    pub row: Option<usize>,
}

impl Diagnostic {
    /// `field` is a [`FieldKind`] or a literal column name.
    pub fn missing_column(step: &str, field: impl fmt::Display) -> Self {
        Self {
            kind: DiagnosticKind::MissingColumn,
            step: step.to_string(),
            message: format!("{field} column not found"),
            row: None,
        }
    }

    pub fn lookup_failure(step: &str, row: usize, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::LookupFailure,
            step: step.to_string(),
            message: message.into(),
            row: Some(row),
        }
    }

    pub fn validation_failure(step: &str, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::ValidationFailure,
            step: step.to_string(),
            message: message.into(),
            row: None,
        }
    }
}

/// Outcome of one cleanse run over one table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanseReport {
    /// Input file name or other identifier of the table.
    pub source: String,
    pub processed_at: Option<DateTime<Utc>>,
    pub rows: usize,
    pub columns_before: usize,
    pub columns_after: usize,
    /// Steps in the order they ran.
    pub steps: Vec<String>,
    /// Column each field kind resolved to (`None` when absent).
    pub resolved: BTreeMap<FieldKind, Option<String>>,
    /// Misplaced-value swaps per target field.
    pub swaps: BTreeMap<FieldKind, usize>,
    /// Non-empty cells per error column.
    pub error_cells: BTreeMap<String, usize>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CleanseReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn record_resolution(&mut self, field: FieldKind, column: Option<&str>) {
        self.resolved
            .entry(field)
            .or_insert_with(|| column.map(str::to_string));
    }

    pub fn add_swaps(&mut self, field: FieldKind, count: usize) {
        *self.swaps.entry(field).or_default() += count;
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.kind == kind)
            .count()
    }

    pub fn total_error_cells(&self) -> usize {
        self.error_cells.values().sum()
    }

    pub fn has_errors(&self) -> bool {
        self.total_error_cells() > 0
    }
}
