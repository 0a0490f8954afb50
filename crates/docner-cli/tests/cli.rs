use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `docner` with its per-user config directory pointed into `home`.
fn docner(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docner").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

const NORMALIZED: &str = "Global Tiles\nPO 95481\nCF24 5EF\nProduct: TIS3067\nQuantity: 1\nProduct: TIS4294\nQuantity: 1";

#[test]
fn annotate_writes_entities_next_to_text() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("order_extracted.txt");
    fs::write(&text, NORMALIZED).unwrap();

    docner(dir.path())
        .arg("annotate")
        .arg(&text)
        .assert()
        .success()
        .stdout(predicate::str::contains("CSV created"));

    let csv = fs::read_to_string(dir.path().join("order_extracted_entities.csv")).unwrap();
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(rows[0], "File,Line,BeginOffset,EndOffset,Text,Type");
    assert_eq!(rows[1], "order_extracted.txt,1,0,12,Global Tiles,COMPANY_NAME");
    assert_eq!(rows[2], "order_extracted.txt,2,3,8,95481,CUSTOMER_PO_NUMBER");
    assert_eq!(rows.len(), 9);
}

#[test]
fn annotate_json_to_stdout() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("order_extracted.txt");
    fs::write(&text, NORMALIZED).unwrap();

    docner(dir.path())
        .args(["annotate", "--stdout", "--format", "json"])
        .arg(&text)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Type\": \"POSTCODE\""));

    assert!(!dir.path().join("order_extracted_entities.csv").exists());
}

#[test]
fn annotate_format_requires_stdout() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("order_extracted.txt");
    fs::write(&text, NORMALIZED).unwrap();

    docner(dir.path())
        .args(["annotate", "--format", "json"])
        .arg(&text)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--stdout"));

    assert!(!dir.path().join("order_extracted_entities.csv").exists());
}

#[test]
fn annotate_with_custom_catalog() {
    let dir = TempDir::new().unwrap();
    let text = dir.path().join("memo.txt");
    fs::write(&text, "Invoice for ACME\nQty 3").unwrap();
    let catalog = dir.path().join("catalog.json");
    fs::write(
        &catalog,
        r#"[{"Text": "ACME", "Type": "COMPANY_NAME"}, {"Text": "3", "Type": "QUANTITY", "Context": "ACME"}]"#,
    )
    .unwrap();

    docner(dir.path())
        .args(["annotate", "--stdout"])
        .arg(&text)
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("memo.txt,1,12,16,ACME,COMPANY_NAME"))
        .stdout(predicate::str::contains("memo.txt,2,4,5,3,QUANTITY"));
}

#[test]
fn process_missing_document_reports_error() {
    let dir = TempDir::new().unwrap();

    docner(dir.path())
        .arg("process")
        .arg(dir.path().join("missing.pdf"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn process_unsupported_format_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("notes.docx");
    fs::write(&source, b"PK").unwrap();

    docner(dir.path())
        .arg("process")
        .arg(&source)
        .assert()
        .success()
        .stderr(predicate::str::contains("unsupported document format"));

    assert!(!dir.path().join("notes_extracted.txt").exists());
}

#[test]
fn process_cancelled_prompt() {
    let dir = TempDir::new().unwrap();

    docner(dir.path())
        .arg("process")
        .write_stdin("\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("no document selected"));
}

#[test]
fn config_init_set_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("docner.json");

    docner(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "init", "--output"])
        .arg(&config)
        .assert()
        .success();

    docner(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "output.entities_suffix", "_ner.csv"])
        .assert()
        .success();

    docner(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "output.entities_suffix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_ner.csv"));

    docner(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "catalog.0.Text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Global Tiles"));
}

#[test]
fn config_set_unknown_key_fails() {
    let dir = TempDir::new().unwrap();

    docner(dir.path())
        .args(["config", "set", "output.nope", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}
