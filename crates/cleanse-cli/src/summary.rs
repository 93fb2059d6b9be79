use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use cleanse_model::{CleanseReport, DiagnosticKind, FieldKind, error_column_name};

use crate::types::CleanResult;

pub fn print_summary(result: &CleanResult) {
    if result.dry_run {
        println!("Dry run: no files written");
    }
    let options = &result.options;
    println!(
        "Options: second phone pass {}, email correction {}, uppercase postcodes {}, country postcodes {}",
        on_off(options.second_phone_pass),
        on_off(options.correct_misplaced_emails),
        on_off(options.uppercase_postcodes),
        on_off(options.country_postcode_check),
    );
    for file in &result.files {
        println!();
        println!("Input: {}", file.input.display());
        if let Some(path) = &file.output {
            println!("Output: {}", path.display());
        }
        println!(
            "Rows: {}  Columns: {} -> {}",
            file.report.rows, file.report.columns_before, file.report.columns_after
        );
        print_field_table(&file.report);
        print_diagnostic_table(&file.report);
    }
    if let Some(path) = &result.report {
        println!();
        println!("Report: {}", path.display());
    }
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn print_field_table(report: &CleanseReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Column"),
        header_cell("Swaps"),
        header_cell("Error cells"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let mut total_swaps = 0usize;
    let mut total_errors = 0usize;
    for field in FieldKind::ALL {
        let column = report.resolved.get(&field).cloned().flatten();
        let swaps = report.swaps.get(&field).copied();
        let errors = if field.is_validated() {
            // an existing additional-email column keeps its own name
            let source = match (field, column.as_deref()) {
                (FieldKind::AdditionalEmail, Some(name)) => name,
                _ => field.display_name(),
            };
            report.error_cells.get(&error_column_name(source)).copied()
        } else {
            None
        };
        total_swaps += swaps.unwrap_or(0);
        total_errors += errors.unwrap_or(0);
        table.add_row(vec![
            Cell::new(field.display_name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            match column {
                Some(name) => Cell::new(name),
                None => dim_cell("-"),
            },
            count_cell(swaps, Color::Yellow),
            count_cell(errors, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        count_cell(Some(total_swaps), Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(Some(total_errors), Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn print_diagnostic_table(report: &CleanseReport) {
    if report.diagnostics.is_empty() {
        return;
    }
    let mut diagnostics: Vec<_> = report.diagnostics.iter().collect();
    diagnostics.sort_by_key(|diagnostic| (diagnostic.kind, diagnostic.row));
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Step"),
        header_cell("Row"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for diagnostic in diagnostics {
        table.add_row(vec![
            kind_cell(diagnostic.kind),
            Cell::new(&diagnostic.step),
            match diagnostic.row {
                Some(row) => Cell::new(row),
                None => dim_cell("-"),
            },
            Cell::new(&diagnostic.message),
        ]);
    }
    println!("Diagnostics:");
    println!("{table}");
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn kind_cell(kind: DiagnosticKind) -> Cell {
    match kind {
        DiagnosticKind::MissingColumn => Cell::new("MISSING").fg(Color::Yellow),
        DiagnosticKind::LookupFailure => Cell::new("LOOKUP").fg(Color::Yellow),
        DiagnosticKind::ValidationFailure => Cell::new("INVALID").fg(Color::Red),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Fixed(20)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ]);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
