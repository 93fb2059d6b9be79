use std::fs;
use std::path::{Path, PathBuf};

use cleanse_cli::pipeline::{
    DEFAULT_OUTPUT_DIR, load_options, output_path, process_file, process_files, write_reports,
};
use cleanse_ingest::read_csv_table;
use cleanse_model::{CleanseOptions, CleanseReport};
use cleanse_transform::CleanseContext;
use tempfile::TempDir;

fn temp_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn output_defaults_to_processed_beside_input() {
    let path = output_path(Path::new("data/contacts.csv"), None).unwrap();
    assert_eq!(
        path,
        Path::new("data").join(DEFAULT_OUTPUT_DIR).join("contacts.csv")
    );

    let path = output_path(Path::new("data/contacts.csv"), Some(Path::new("out"))).unwrap();
    assert_eq!(path, Path::new("out").join("contacts.csv"));
}

#[test]
fn output_requires_file_name() {
    assert!(output_path(Path::new(".."), None).is_err());
}

#[test]
fn partial_config_keeps_defaults() {
    let dir = TempDir::new().unwrap();
    let config = temp_file(dir.path(), "options.json", r#"{"country_postcode_check": true}"#);

    let options = load_options(Some(&config)).unwrap();
    assert!(options.country_postcode_check);
    assert!(options.second_phone_pass);
    assert!(options.uppercase_postcodes);
    assert!(!options.log_data);

    assert_eq!(load_options(None).unwrap(), CleanseOptions::default());
}

#[test]
fn malformed_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = temp_file(dir.path(), "options.json", "{not json");
    let error = load_options(Some(&config)).unwrap_err();
    assert!(format!("{error:#}").contains("parse config"));
}

#[test]
fn writes_cleansed_table() {
    let dir = TempDir::new().unwrap();
    let input = temp_file(dir.path(), "contacts.csv", "id,name\nA12,Ann\n34,Bob\n");
    let ctx = CleanseContext::default();

    let outcome = process_file(&input, None, &ctx, false).unwrap();
    let output = outcome.output.expect("output written");
    assert_eq!(output, dir.path().join(DEFAULT_OUTPUT_DIR).join("contacts.csv"));

    let text = fs::read_to_string(&output).unwrap();
    insta::assert_snapshot!(text, @r#"
    "Id","Name"
    "12","Ann"
    "34","Bob"
    "#);

    let table = read_csv_table(&output).unwrap();
    assert_eq!(table.height(), 2);
    assert_eq!(table.cell(0, 0), "12");
    assert_eq!(table.cell(1, 1), "Bob");
    assert_eq!(outcome.report.source, "contacts.csv");
    assert_eq!(outcome.report.rows, 2);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = temp_file(dir.path(), "contacts.csv", "Name\nAnn\n");
    let ctx = CleanseContext::default();

    let outcome = process_file(&input, None, &ctx, true).unwrap();
    assert!(outcome.output.is_none());
    assert!(!dir.path().join(DEFAULT_OUTPUT_DIR).exists());
}

#[test]
fn failing_input_does_not_stop_others() {
    let dir = TempDir::new().unwrap();
    let good = temp_file(dir.path(), "good.csv", "Name\nAnn\n");
    let missing = dir.path().join("missing.csv");
    let out = dir.path().join("out");
    let ctx = CleanseContext::default();

    let results = process_files(&[missing.clone(), good.clone()], Some(&out), &ctx, false);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, missing);
    assert!(results[0].1.is_err());
    assert_eq!(results[1].0, good);
    assert!(results[1].1.is_ok());
    assert!(out.join("good.csv").exists());
}

#[test]
fn reports_are_json_arrays() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reports").join("run.json");
    let first = CleanseReport::new("a.csv");
    let second = CleanseReport::new("b.csv");

    write_reports(&path, &[&first, &second]).unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let sources: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|report| report["source"].as_str().unwrap())
        .collect();
    assert_eq!(sources, vec!["a.csv", "b.csv"]);
}
