use std::fs;
use std::path::PathBuf;

use cleanse_ingest::{read_csv_table, to_csv_string, write_csv_table};
use tempfile::TempDir;

fn temp_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_every_column_as_text() {
    let dir = TempDir::new().unwrap();
    let path = temp_file(
        &dir,
        "contacts.csv",
        "ID,Name,Phone\n007,Ann,020 12345678\n12,\"Smith, Bob\",\n",
    );
    let table = read_csv_table(&path).expect("read csv");

    let names: Vec<&str> = table.column_names().collect();
    assert_eq!(names, vec!["ID", "Name", "Phone"]);
    assert_eq!(table.height(), 2);
    // no numeric coercion: leading zeros survive
    assert_eq!(table.cell(0, 0), "007");
    assert_eq!(table.cell(1, 1), "Smith, Bob");
    assert_eq!(table.cell(1, 2), "");
}

#[test]
fn null_tokens_load_as_empty() {
    let dir = TempDir::new().unwrap();
    let path = temp_file(&dir, "nulls.csv", "Name,Email\nNaN,a@x.com\nBob,N/A\n");
    let table = read_csv_table(&path).expect("read csv");

    assert_eq!(table.cell(0, 0), "");
    assert_eq!(table.cell(0, 1), "a@x.com");
    assert_eq!(table.cell(1, 1), "");
}

#[test]
fn padded_null_tokens_are_kept() {
    let dir = TempDir::new().unwrap();
    let path = temp_file(&dir, "padded.csv", "Name,Code\nBob,\"  NA \"\nAnn,NA\n");
    let table = read_csv_table(&path).expect("read csv");

    assert_eq!(table.cell(0, 1), "  NA ");
    assert_eq!(table.cell(1, 1), "");
}

#[test]
fn header_only_file_has_no_rows() {
    let dir = TempDir::new().unwrap();
    let path = temp_file(&dir, "header.csv", "Name,Email\n");
    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(table.width(), 2);
    assert!(table.is_empty());
}

#[test]
fn written_output_reads_back() {
    let dir = TempDir::new().unwrap();
    let input = temp_file(&dir, "in.csv", "Name,Postcode\nAnn,SW1A 1AA\nBob,\n");
    let table = read_csv_table(&input).expect("read csv");

    let output = dir.path().join("processed").join("in.csv");
    write_csv_table(&table, &output).expect("write csv");

    let text = fs::read_to_string(&output).expect("read output");
    assert_eq!(text, to_csv_string(&table).unwrap());
    assert!(text.starts_with("\"Name\",\"Postcode\"\n"));
    assert!(text.contains("\"Bob\",\"\""));

    let reread = read_csv_table(&output).expect("reread csv");
    assert_eq!(reread, table);
}
