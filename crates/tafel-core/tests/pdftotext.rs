//! Runs the pdftotext backend against a one-page fixture report.
//!
//! Skipped when poppler-utils is not installed.

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::{Path, PathBuf};
use tafel_core::config::ExtractionConfig;
use tafel_core::extraction::pdftotext::PdftotextExtractor;
use tafel_core::extraction::TableExtractor;
use tafel_core::model::RunStatus;
use tafel_core::{run, ExtractRequest};

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/report.pdf")
}

fn pdftotext_missing() -> bool {
    if PdftotextExtractor::is_available() {
        return false;
    }
    eprintln!("pdftotext not installed, skipping");
    true
}

#[test]
fn extracts_table_from_page_in_range() {
    if pdftotext_missing() {
        return;
    }
    let config = ExtractionConfig::default().config_for("1");

    let tables = PdftotextExtractor::new()
        .extract_tables(&fixture(), "1", &config)
        .unwrap();

    // The title above the table region is not part of the table.
    assert_eq!(tables.len(), 1);
    assert_eq!(
        tables[0].rows,
        vec![vec!["Umsatz", "1.234,56"], vec!["Kosten", "-12,5"]]
    );
}

#[test]
fn page_past_the_end_is_extraction_error() {
    if pdftotext_missing() {
        return;
    }
    let config = ExtractionConfig::default().config_for("3");

    let err = PdftotextExtractor::new()
        .extract_tables(&fixture(), "3", &config)
        .unwrap_err();

    assert!(err.is_extraction(), "unexpected error: {err}");
}

#[test]
fn run_writes_normalized_numbers() {
    if pdftotext_missing() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let request = ExtractRequest {
        document: fixture(),
        pages: "1".to_string(),
        output: Some(dir.path().join("report").to_string_lossy().into_owned()),
        config: ExtractionConfig::default(),
    };

    let status = run(&request, &PdftotextExtractor::new(), &|_: &Path| true).unwrap();
    let path = dir.path().join("report.xlsx");
    assert_eq!(
        status,
        RunStatus::Saved {
            path: path.clone(),
            sheets: vec!["Page_1_Table_1".into()],
        }
    );

    let mut xlsx: Xlsx<_> = open_workbook(&path).unwrap();
    let range = xlsx.worksheet_range("Page_1_Table_1").unwrap();
    assert_eq!(range.get_value((0, 1)), Some(&Data::Float(1234.56)));
    assert_eq!(range.get_value((1, 1)), Some(&Data::Float(-12.5)));
}
