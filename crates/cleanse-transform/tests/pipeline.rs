//! Tests for the cleanse pipeline.

use std::sync::Arc;

use cleanse_model::{CleanseOptions, DiagnosticKind, FieldKind, Table};
use cleanse_transform::correct::correct_misplaced;
use cleanse_transform::{
    CleanseContext, CleanseStep, PipelineState, build_default_pipeline, cleanse, resolve_field,
};
use cleanse_validate::{CountryLookup, valid_phone};
use proptest::prelude::*;

fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table::from_rows(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    )
    .unwrap()
}

fn render(table: &Table) -> String {
    let mut lines = vec![table.column_names().collect::<Vec<_>>().join("|")];
    lines.extend(table.rows().map(|row| row.join("|")));
    lines.join("\n")
}

fn column<'a>(table: &'a Table, name: &str) -> &'a [String] {
    let idx = table.position(name).unwrap_or_else(|| panic!("no column {name}"));
    &table.column(idx).unwrap().cells
}

fn contacts() -> Table {
    table(
        &[
            "id",
            "name",
            "phone",
            "notes",
            "email",
            "street address 1",
            "street address 2",
            "parent",
            "country",
            "postcode",
        ],
        &[
            &[
                "AB123",
                "Acme",
                "call me",
                "077 00900123",
                "a@x.com b@y.com",
                "",
                "1 High St",
                "Acme",
                "United Kingdom",
                "sw1a 1aa",
            ],
            &[
                " CD-45",
                "Beta",
                "(555) 123-4567",
                "",
                "not-an-email",
                "",
                "2 Low Rd",
                "Group",
                "Atlantis",
                "nope",
            ],
        ],
    )
}

// ============================================================================
// CleansePipeline Tests
// ============================================================================

#[test]
fn default_pipeline_has_standard_steps() {
    let pipeline = build_default_pipeline();
    assert_eq!(
        pipeline.step_names(),
        vec![
            "normalize",
            "identifier",
            "phone",
            "landline",
            "postcode",
            "email_correction",
            "email",
            "address",
            "phone_recheck",
            "parent",
            "country",
            "annotate",
            "country_postcodes",
            "null_markers",
        ]
    );
}

#[test]
fn pipeline_can_add_and_remove_steps() {
    struct CustomStep;
    impl CleanseStep for CustomStep {
        fn execute(&self, table: Table, _ctx: &CleanseContext, _state: &mut PipelineState) -> Table {
            table
        }
        fn step_name(&self) -> &str {
            "custom"
        }
    }

    let pipeline = build_default_pipeline()
        .add_step(Box::new(CustomStep))
        .remove_step("phone_recheck")
        .insert_step(0, Box::new(CustomStep));

    let names = pipeline.step_names();
    assert_eq!(names.len(), 15);
    assert_eq!(names[0], "custom");
    assert_eq!(names[14], "custom");
    assert!(!names.contains(&"phone_recheck"));
}

#[test]
fn optional_steps_follow_options() {
    let (_, report) = cleanse(contacts(), &CleanseContext::default(), "contacts.csv");
    assert!(report.steps.contains(&"phone_recheck".to_string()));
    assert!(!report.steps.contains(&"email_correction".to_string()));
    assert!(!report.steps.contains(&"country_postcodes".to_string()));

    let options = CleanseOptions::new()
        .with_second_phone_pass(false)
        .with_email_correction(true)
        .with_country_postcode_check(true);
    let (_, report) = cleanse(contacts(), &CleanseContext::new(options), "contacts.csv");
    assert!(!report.steps.contains(&"phone_recheck".to_string()));
    assert!(report.steps.contains(&"email_correction".to_string()));
    assert!(report.steps.contains(&"country_postcodes".to_string()));
}

// ============================================================================
// End-to-end behavior
// ============================================================================

#[test]
fn cleanses_contact_table() {
    let (output, _) = cleanse(contacts(), &CleanseContext::default(), "contacts.csv");
    insta::assert_snapshot!(render(&output), @r"
    Id|Name|Phone|Notes|Email|Street address 1|Street address 2|Parent|Country|Postcode|Email Errors|Additional Emails|Additional Emails Errors|Phone Errors|Postcode Errors
    123|Acme|077 00900123|call me|a@x.com|1 High St|||GBR|SW1A 1AA||b@y.com|||
    -45|Beta|(555) 123-4567||not-an-email|2 Low Rd||Group|Atlantis|NOPE|not-an-email||||NOPE
    ");
}

#[test]
fn report_describes_the_run() {
    let (_, report) = cleanse(contacts(), &CleanseContext::default(), "contacts.csv");
    assert_eq!(report.source, "contacts.csv");
    assert_eq!(report.rows, 2);
    assert_eq!(report.columns_before, 10);
    assert_eq!(report.columns_after, 15);
    assert_eq!(report.swaps.get(&FieldKind::Phone), Some(&1));
    assert_eq!(report.swaps.get(&FieldKind::Postcode), Some(&0));
    assert_eq!(report.resolved[&FieldKind::Landline], None);
    assert_eq!(
        report.resolved[&FieldKind::AdditionalEmail].as_deref(),
        Some("Additional Emails")
    );
    assert_eq!(report.error_cells["Email Errors"], 1);
    assert_eq!(report.error_cells["Postcode Errors"], 1);
    assert_eq!(report.count(DiagnosticKind::MissingColumn), 1);
    assert_eq!(report.count(DiagnosticKind::LookupFailure), 1);
    assert_eq!(report.count(DiagnosticKind::ValidationFailure), 2);
    assert!(report.processed_at.is_some());

    let lookup = report
        .diagnostics
        .iter()
        .find(|d| d.kind == DiagnosticKind::LookupFailure)
        .unwrap();
    assert_eq!(lookup.row, Some(1));
    assert_eq!(lookup.step, "country");
    assert!(lookup.message.contains("Atlantis"));
}

#[test]
fn second_run_changes_nothing() {
    let ctx = CleanseContext::default();
    let (once, _) = cleanse(contacts(), &ctx, "contacts.csv");
    let (twice, _) = cleanse(once.clone(), &ctx, "contacts.csv");
    assert_eq!(once, twice);
}

#[test]
fn missing_columns_never_abort() {
    let input = table(&["Name", "Notes"], &[&["Ann", "hello"]]);
    let (output, report) = cleanse(input, &CleanseContext::default(), "names.csv");
    assert_eq!(output.height(), 1);
    assert_eq!(output.column_names().collect::<Vec<_>>(), vec!["Name", "Notes"]);
    assert!(report.count(DiagnosticKind::MissingColumn) >= 8);
    assert!(!report.has_errors());
}

#[test]
fn email_split_and_annotation() {
    let input = table(&["Email"], &[&["a@x.com b@y.com"], &["not-an-email"], &["ok@x.com"]]);
    let (output, _) = cleanse(input, &CleanseContext::default(), "emails.csv");
    assert_eq!(column(&output, "Email"), ["a@x.com", "not-an-email", "ok@x.com"]);
    assert_eq!(column(&output, "Additional Emails"), ["b@y.com", "", ""]);
    assert_eq!(column(&output, "Email Errors"), ["", "not-an-email", ""]);
}

#[test]
fn existing_additional_emails_column_gets_errors() {
    let input = table(
        &["Email", "Emails (Additional)"],
        &[&["a@x.com,b@y.com", "old"], &["c@z.org", "bad, d@w.net"]],
    );
    let (output, _) = cleanse(input, &CleanseContext::default(), "emails.csv");
    assert_eq!(column(&output, "Emails (Additional)"), ["b@y.com", "bad, d@w.net"]);
    assert_eq!(column(&output, "Emails (Additional) Errors"), ["", "bad"]);
    assert!(!output.contains("Additional Emails"));
}

#[test]
fn address_lines_are_merged() {
    let input = table(
        &["Street Address 1", "Street Address 2"],
        &[&["", "1 High St"], &["", "2 Low Rd"]],
    );
    let (output, _) = cleanse(input, &CleanseContext::default(), "addresses.csv");
    assert_eq!(column(&output, "Street Address 1"), ["1 High St", "2 Low Rd"]);
    assert_eq!(column(&output, "Street Address 2"), ["", ""]);
}

#[test]
fn parent_restating_name_is_cleared() {
    let input = table(&["Name", "Parent"], &[&["Acme", "Acme"], &["Beta", "Group"]]);
    let (output, _) = cleanse(input, &CleanseContext::default(), "parents.csv");
    assert_eq!(column(&output, "Parent"), ["", "Group"]);
}

#[test]
fn postcodes_are_corrected_and_uppercased() {
    let input = table(&["Postcode", "Town"], &[&["Leeds", "ls1 4ap"]]);
    let (output, report) = cleanse(input.clone(), &CleanseContext::default(), "pc.csv");
    assert_eq!(output.row(0)[..2], ["LS1 4AP", "Leeds"]);
    assert_eq!(report.swaps[&FieldKind::Postcode], 1);

    let ctx = CleanseContext::new(CleanseOptions::new().with_uppercase_postcodes(false));
    let (output, _) = cleanse(input, &ctx, "pc.csv");
    assert_eq!(output.cell(0, 0), "ls1 4ap");
}

#[test]
fn misfiled_landline_is_moved_and_sanitized() {
    let input = table(
        &["Landline", "Notes"],
        &[&["tel", "01 23456 78901"], &["01 23456 78901 (work)", ""]],
    );
    let (output, report) = cleanse(input, &CleanseContext::default(), "landlines.csv");
    assert_eq!(column(&output, "Landline"), ["01 23456 78901", "01 23456 78901"]);
    assert_eq!(column(&output, "Notes"), ["tel", ""]);
    assert_eq!(column(&output, "Landline Errors"), ["", ""]);
    assert_eq!(report.swaps[&FieldKind::Landline], 1);
}

#[test]
fn phone_annotations_are_stripped() {
    let input = table(&["Phone"], &[&["077 00900123 (home)"], &["(555) 123-4567"]]);
    let (output, _) = cleanse(input, &CleanseContext::default(), "phones.csv");
    assert_eq!(column(&output, "Phone"), ["077 00900123", "(555) 123-4567"]);
    assert_eq!(column(&output, "Phone Errors"), ["", ""]);
}

#[test]
fn country_postcode_check_writes_messages() {
    let input = table(
        &["Postcode", "Country"],
        &[&["A65 F4E2", "Ireland"], &["SW1A 1AA", "Ireland"], &["M1 1AE", ""]],
    );
    let ctx = CleanseContext::new(CleanseOptions::new().with_country_postcode_check(true));
    let (output, _) = cleanse(input, &ctx, "pc.csv");
    assert_eq!(column(&output, "Country"), ["IRL", "IRL", ""]);
    assert_eq!(
        column(&output, "Postcode Errors"),
        [
            "",
            "Postcode SW1A 1AA does not match the pattern for country IRL.",
            ""
        ]
    );
}

#[test]
fn custom_country_lookup_is_used() {
    struct Fixed;
    impl CountryLookup for Fixed {
        fn alpha3(&self, name: &str) -> Option<String> {
            (name == "Narnia").then(|| "NRN".to_string())
        }
    }

    let input = table(&["Country"], &[&["Narnia"], &["United Kingdom"]]);
    let ctx = CleanseContext::default().with_country_lookup(Arc::new(Fixed));
    let (output, report) = cleanse(input, &ctx, "countries.csv");
    assert_eq!(column(&output, "Country"), ["NRN", "United Kingdom"]);
    assert_eq!(report.count(DiagnosticKind::LookupFailure), 1);
}

#[test]
fn final_pass_blanks_null_markers() {
    let input = table(&["Notes", "Other"], &[&["nan", "NaT"], &["NaN", "nancy"]]);
    let (output, _) = cleanse(input, &CleanseContext::default(), "nulls.csv");
    assert_eq!(output.row(0), vec!["", ""]);
    assert_eq!(output.row(1), vec!["", "nancy"]);
}

// ============================================================================
// Properties
// ============================================================================

const HEADERS: [&str; 10] = [
    "ID",
    "Name",
    "Phone",
    "Landline",
    "Postcode",
    "Email",
    "Notes",
    "Parent",
    "Street Address 1",
    "Street Address 2",
];

fn cell() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 @.,()-]{0,16}",
        Just("077 00900123".to_string()),
        Just("01 23456 78901".to_string()),
        Just("(555) 123-4567".to_string()),
        Just("a@x.com b@y.com".to_string()),
        Just("SW1A 1AA".to_string()),
        Just(String::new()),
    ]
}

/// Cells that never hold a comma.
///
/// An email cell that already has a comma skips whitespace delimiting, so
/// `"A A,"` becomes `"A A"` on the first run and only splits on the second.
fn comma_free_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 @.()-]{0,16}",
        Just("077 00900123".to_string()),
        Just("01 23456 78901".to_string()),
        Just("(555) 123-4567".to_string()),
        Just("a@x.com b@y.com".to_string()),
        Just("SW1A 1AA".to_string()),
        Just(String::new()),
    ]
}

fn table_of<S>(cells: fn() -> S) -> impl Strategy<Value = Table>
where
    S: Strategy<Value = String> + 'static,
{
    prop::sample::subsequence(HEADERS.to_vec(), 1..=HEADERS.len()).prop_flat_map(move |headers| {
        let width = headers.len();
        prop::collection::vec(prop::collection::vec(cells(), width), 0..8).prop_map(move |rows| {
            Table::from_rows(headers.iter().map(|h| h.to_string()).collect(), rows).unwrap()
        })
    })
}

fn any_table() -> impl Strategy<Value = Table> {
    table_of(cell)
}

proptest! {
    #[test]
    fn row_count_is_preserved(input in any_table()) {
        let height = input.height();
        let (output, report) = cleanse(input, &CleanseContext::default(), "prop.csv");
        prop_assert_eq!(output.height(), height);
        prop_assert_eq!(report.rows, height);
        for column in output.columns() {
            prop_assert_eq!(column.cells.len(), height);
        }
    }

    #[test]
    fn identifier_has_no_letters(input in any_table()) {
        let (output, _) = cleanse(input, &CleanseContext::default(), "prop.csv");
        if let Some(id) = resolve_field(&output, FieldKind::Identifier) {
            for cell in &output.column(id).unwrap().cells {
                prop_assert!(!cell.chars().any(char::is_alphabetic), "{cell:?}");
            }
        }
    }

    #[test]
    fn second_run_is_a_no_op(input in table_of(comma_free_cell)) {
        let ctx = CleanseContext::default();
        let (once, _) = cleanse(input, &ctx, "prop.csv");
        let (twice, _) = cleanse(once.clone(), &ctx, "prop.csv");
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn at_most_one_swap_per_row(mut input in any_table()) {
        let swaps = correct_misplaced(&mut input, 0, &[], valid_phone);
        for pair in swaps.windows(2) {
            prop_assert!(pair[0].row < pair[1].row);
        }
        for swap in &swaps {
            prop_assert!(valid_phone(input.cell(swap.row, 0)));
        }
    }
}
