//! Cleanse pipeline with ordered step execution.
//!
//! Each step implements [`CleanseStep`]. It takes the table by value and
//! returns it, so a table is owned by exactly one step at a time.
//!
//! # Standard Pipeline Order
//!
//! 1. **normalize** - trim headers and cells, capitalize headers
//! 2. **identifier** - strip letters from the identifier column
//! 3. **phone** / **landline** / **postcode** - misplaced-value correction
//! 4. **email_correction** - optional correction for the email column
//! 5. **email** - split multi-address cells
//! 6. **address** - merge street address lines
//! 7. **phone_recheck** - second phone correction pass
//! 8. **parent** - clear parent values restating the row's identity
//! 9. **country** - country names to ISO alpha-3
//! 10. **annotate** - per-field error columns
//! 11. **country_postcodes** - optional country-aware postcode check
//! 12. **null_markers** - blank leftover `nan` / `NaT` cells
//!
//! A step whose column is missing records a diagnostic and returns the table
//! unchanged; no step can abort the run.

use chrono::Utc;
use tracing::{debug, info, info_span, warn};

use cleanse_model::{
    CleanseOptions, CleanseReport, Diagnostic, FieldKind, Table, is_error_column,
};
use cleanse_validate::{sanitize_identifier, sanitize_number, validator_for};

use crate::address::{AddressMerge, STREET_ADDRESS_1, STREET_ADDRESS_2, merge_street_addresses};
use crate::annotate::annotate_errors;
use crate::context::CleanseContext;
use crate::correct::correct_misplaced;
use crate::country::normalize_countries;
use crate::email::split_emails;
use crate::normalize::normalize_table;
use crate::parent::dedupe_parent;
use crate::postcode::check_country_postcodes;
use crate::resolve::{resolve_column, resolve_field};

/// Cells blanked by the final step.
pub const FINAL_NULL_MARKERS: [&str; 3] = ["nan", "NaN", "NaT"];

/// A single step in the cleanse pipeline.
pub trait CleanseStep: Send + Sync {
    /// Run this step and hand the table back.
    fn execute(&self, table: Table, ctx: &CleanseContext, state: &mut PipelineState) -> Table;

    /// Human-readable name for this step (for logging and the report).
    fn step_name(&self) -> &str;

    /// Whether this step should be skipped based on context.
    ///
    /// Default implementation always runs the step.
    fn should_skip(&self, _ctx: &CleanseContext) -> bool {
        false
    }
}

/// Mutable state shared across pipeline steps.
#[derive(Debug, Default)]
pub struct PipelineState {
    pub report: CleanseReport,
    /// Step execution log.
    pub executed_steps: Vec<String>,
}

impl PipelineState {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            report: CleanseReport::new(source),
            executed_steps: Vec::new(),
        }
    }

    /// Resolve `field`, recording the outcome and a missing-column diagnostic.
    pub fn resolve(&mut self, table: &Table, field: FieldKind, step: &str) -> Option<usize> {
        let index = resolve_field(table, field);
        self.report
            .record_resolution(field, column_name(table, index));
        if index.is_none() {
            self.missing(step, field);
        }
        index
    }

    fn missing(&mut self, step: &str, column: impl std::fmt::Display) {
        warn!(column = %column, "column not found, skipping");
        self.report.push(Diagnostic::missing_column(step, column));
    }

    /// Complete the report from the final table.
    pub fn finish(mut self, table: &Table) -> CleanseReport {
        let report = &mut self.report;
        report.rows = table.height();
        report.columns_after = table.width();
        report.steps = self.executed_steps;
        report.error_cells = table
            .columns()
            .iter()
            .filter(|column| is_error_column(&column.name))
            .map(|column| (column.name.clone(), column.filled_count()))
            .collect();
        report.processed_at = Some(Utc::now());
        self.report
    }
}

fn column_name(table: &Table, index: Option<usize>) -> Option<&str> {
    index
        .and_then(|idx| table.column(idx))
        .map(|column| column.name.as_str())
}

/// An ordered pipeline of cleanse steps.
pub struct CleansePipeline {
    steps: Vec<Box<dyn CleanseStep>>,
}

impl Default for CleansePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl CleansePipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step to the end of the pipeline.
    pub fn add_step(mut self, step: Box<dyn CleanseStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Insert a step at a specific position.
    pub fn insert_step(mut self, index: usize, step: Box<dyn CleanseStep>) -> Self {
        self.steps.insert(index, step);
        self
    }

    /// Remove every step with this name.
    pub fn remove_step(mut self, step_name: &str) -> Self {
        self.steps.retain(|s| s.step_name() != step_name);
        self
    }

    /// Run all steps over `table` and return it with its report.
    pub fn run(
        &self,
        table: Table,
        ctx: &CleanseContext,
        source: &str,
    ) -> (Table, CleanseReport) {
        let mut state = PipelineState::new(source);
        state.report.columns_before = table.width();
        let table = self.execute_with_state(table, ctx, &mut state);
        let report = state.finish(&table);
        info!(
            source,
            rows = report.rows,
            error_cells = report.total_error_cells(),
            "cleanse finished"
        );
        (table, report)
    }

    /// Execute all steps with provided state.
    pub fn execute_with_state(
        &self,
        mut table: Table,
        ctx: &CleanseContext,
        state: &mut PipelineState,
    ) -> Table {
        for step in &self.steps {
            if step.should_skip(ctx) {
                debug!(step = step.step_name(), "step skipped");
                continue;
            }
            let span = info_span!("step", name = step.step_name());
            let _guard = span.enter();
            table = step.execute(table, ctx, state);
            state.executed_steps.push(step.step_name().to_string());
        }
        table
    }

    /// List step names in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.step_name()).collect()
    }
}

// ============================================================================
// Standard Steps
// ============================================================================

/// Trim and capitalize headers, trim cells.
pub struct NormalizeStep;

impl CleanseStep for NormalizeStep {
    fn execute(&self, table: Table, _ctx: &CleanseContext, _state: &mut PipelineState) -> Table {
        normalize_table(table)
    }

    fn step_name(&self) -> &str {
        "normalize"
    }
}

/// Strip alphabetic characters from the identifier column.
pub struct IdentifierStep;

impl CleanseStep for IdentifierStep {
    fn execute(&self, mut table: Table, _ctx: &CleanseContext, state: &mut PipelineState) -> Table {
        let Some(column) = state.resolve(&table, FieldKind::Identifier, self.step_name()) else {
            return table;
        };
        table.map_column(column, |cell| sanitize_identifier(cell).trim().to_string());
        table
    }

    fn step_name(&self) -> &str {
        "identifier"
    }
}

/// Misplaced-value correction for one field, followed by that field's cleanup.
pub struct CorrectionStep {
    name: &'static str,
    field: FieldKind,
    enabled: fn(&CleanseOptions) -> bool,
}

impl CorrectionStep {
    pub fn phone() -> Self {
        Self {
            name: "phone",
            field: FieldKind::Phone,
            enabled: |_| true,
        }
    }

    /// Phone correction again, after the address merge.
    pub fn phone_recheck() -> Self {
        Self {
            name: "phone_recheck",
            field: FieldKind::Phone,
            enabled: |options| options.second_phone_pass,
        }
    }

    pub fn landline() -> Self {
        Self {
            name: "landline",
            field: FieldKind::Landline,
            enabled: |_| true,
        }
    }

    pub fn postcode() -> Self {
        Self {
            name: "postcode",
            field: FieldKind::Postcode,
            enabled: |_| true,
        }
    }

    pub fn email() -> Self {
        Self {
            name: "email_correction",
            field: FieldKind::Email,
            enabled: |options| options.correct_misplaced_emails,
        }
    }
}

impl CleanseStep for CorrectionStep {
    fn execute(&self, mut table: Table, ctx: &CleanseContext, state: &mut PipelineState) -> Table {
        let Some(target) = state.resolve(&table, self.field, self.name) else {
            return table;
        };
        let Some(valid) = validator_for(self.field) else {
            return table;
        };

        // a swap would hand the identifier column the target's old value
        let protected: Vec<usize> = resolve_field(&table, FieldKind::Identifier)
            .into_iter()
            .collect();
        let swaps = correct_misplaced(&mut table, target, &protected, valid);
        for swap in &swaps {
            debug!(
                row = swap.row,
                from = table.column(swap.from).map(|c| c.name.as_str()).unwrap_or_default(),
                value = ctx.loggable(table.cell(swap.row, target)),
                "moved value"
            );
        }
        state.report.add_swaps(self.field, swaps.len());

        match self.field {
            FieldKind::Phone | FieldKind::Landline => {
                table.map_column(target, |cell| sanitize_number(cell).trim().to_string());
            }
            FieldKind::Postcode if ctx.options.uppercase_postcodes => {
                table.map_column(target, str::to_uppercase);
            }
            _ => {}
        }
        info!(
            field = %self.field,
            column = column_name(&table, Some(target)).unwrap_or_default(),
            swaps = swaps.len(),
            "corrected misplaced values"
        );
        table
    }

    fn step_name(&self) -> &str {
        self.name
    }

    fn should_skip(&self, ctx: &CleanseContext) -> bool {
        !(self.enabled)(&ctx.options)
    }
}

/// Split multi-address email cells into the additional-email column.
pub struct EmailSplitStep;

impl CleanseStep for EmailSplitStep {
    fn execute(&self, mut table: Table, _ctx: &CleanseContext, state: &mut PipelineState) -> Table {
        let Some(email) = state.resolve(&table, FieldKind::Email, self.step_name()) else {
            return table;
        };
        let split = split_emails(&mut table, email);
        state.report.record_resolution(
            FieldKind::AdditionalEmail,
            column_name(&table, Some(split.destination)),
        );
        info!(
            split_rows = split.split_rows,
            invalid_rows = split.invalid_rows,
            created = split.created,
            "split email column"
        );
        table
    }

    fn step_name(&self) -> &str {
        "email"
    }
}

/// Merge `Street Address 2` into `Street Address 1`.
pub struct AddressStep;

impl CleanseStep for AddressStep {
    fn execute(&self, mut table: Table, _ctx: &CleanseContext, state: &mut PipelineState) -> Table {
        let step = self.step_name();
        if state.resolve(&table, FieldKind::Address, step).is_none() {
            return table;
        }
        let first = resolve_column(&table, &[STREET_ADDRESS_1]);
        let second = resolve_column(&table, &[STREET_ADDRESS_2]);
        let (Some(first), Some(second)) = (first, second) else {
            if first.is_none() {
                state.missing(step, "Street Address 1");
            }
            if second.is_none() {
                state.missing(step, "Street Address 2");
            }
            return table;
        };
        match merge_street_addresses(&mut table, first, second) {
            AddressMerge::MovedColumn => info!("moved street address 2 into empty street address 1"),
            AddressMerge::FilledRows { filled, cleared } => {
                info!(filled, cleared, "merged street addresses");
            }
        }
        table
    }

    fn step_name(&self) -> &str {
        "address"
    }
}

/// Blank parent values equal to the row's name, site or customer.
pub struct ParentStep;

impl CleanseStep for ParentStep {
    fn execute(&self, mut table: Table, _ctx: &CleanseContext, state: &mut PipelineState) -> Table {
        let Some(parent) = state.resolve(&table, FieldKind::Parent, self.step_name()) else {
            return table;
        };
        for (column, cleared) in dedupe_parent(&mut table, parent) {
            info!(column = %column, cleared, "removed parent duplicates");
        }
        table
    }

    fn step_name(&self) -> &str {
        "parent"
    }
}

/// Country names to ISO alpha-3 codes.
pub struct CountryStep;

impl CleanseStep for CountryStep {
    fn execute(&self, mut table: Table, ctx: &CleanseContext, state: &mut PipelineState) -> Table {
        let step = self.step_name();
        let Some(country) = state.resolve(&table, FieldKind::Country, step) else {
            return table;
        };
        let outcome = normalize_countries(&mut table, country, ctx.countries.as_ref());
        for (row, value) in outcome.unresolved {
            warn!(row, country = ctx.loggable(&value), "ISO code not found for country");
            state.report.push(Diagnostic::lookup_failure(
                step,
                row,
                format!("ISO code not found for country: {value}"),
            ));
        }
        info!(converted = outcome.converted, "normalized countries");
        table
    }

    fn step_name(&self) -> &str {
        "country"
    }
}

/// Per-field error columns.
pub struct AnnotateStep;

impl CleanseStep for AnnotateStep {
    fn execute(&self, mut table: Table, _ctx: &CleanseContext, state: &mut PipelineState) -> Table {
        for name in annotate_errors(&mut table) {
            let count = table
                .position(&name)
                .and_then(|idx| table.column(idx))
                .map_or(0, |column| column.filled_count());
            if count > 0 {
                info!(column = %name, count, "invalid values recorded");
                state.report.push(Diagnostic::validation_failure(
                    self.step_name(),
                    format!("{count} invalid values in {name}"),
                ));
            }
        }
        table
    }

    fn step_name(&self) -> &str {
        "annotate"
    }
}

/// Postcode check against the pattern of the row's country.
pub struct CountryPostcodeStep;

impl CleanseStep for CountryPostcodeStep {
    fn execute(&self, mut table: Table, ctx: &CleanseContext, state: &mut PipelineState) -> Table {
        let Some(postcode) = state.resolve(&table, FieldKind::Postcode, self.step_name()) else {
            return table;
        };
        let country = resolve_field(&table, FieldKind::Country);
        let failures = check_country_postcodes(&mut table, postcode, country, &ctx.postcodes);
        info!(failures, "checked postcodes against country patterns");
        table
    }

    fn step_name(&self) -> &str {
        "country_postcodes"
    }

    fn should_skip(&self, ctx: &CleanseContext) -> bool {
        !ctx.options.country_postcode_check
    }
}

/// Blank cells still holding a null marker.
pub struct NullMarkerStep;

impl CleanseStep for NullMarkerStep {
    fn execute(&self, mut table: Table, _ctx: &CleanseContext, _state: &mut PipelineState) -> Table {
        table.map_cells(|cell| {
            if FINAL_NULL_MARKERS.contains(&cell) {
                String::new()
            } else {
                cell.to_string()
            }
        });
        table
    }

    fn step_name(&self) -> &str {
        "null_markers"
    }
}

/// Build the default cleanse pipeline.
///
/// Optional steps are always present and skip themselves according to the
/// context options.
pub fn build_default_pipeline() -> CleansePipeline {
    CleansePipeline::new()
        .add_step(Box::new(NormalizeStep))
        .add_step(Box::new(IdentifierStep))
        .add_step(Box::new(CorrectionStep::phone()))
        .add_step(Box::new(CorrectionStep::landline()))
        .add_step(Box::new(CorrectionStep::postcode()))
        .add_step(Box::new(CorrectionStep::email()))
        .add_step(Box::new(EmailSplitStep))
        .add_step(Box::new(AddressStep))
        .add_step(Box::new(CorrectionStep::phone_recheck()))
        .add_step(Box::new(ParentStep))
        .add_step(Box::new(CountryStep))
        .add_step(Box::new(AnnotateStep))
        .add_step(Box::new(CountryPostcodeStep))
        .add_step(Box::new(NullMarkerStep))
}

/// Run the default pipeline over one table.
pub fn cleanse(table: Table, ctx: &CleanseContext, source: &str) -> (Table, CleanseReport) {
    build_default_pipeline().run(table, ctx, source)
}
