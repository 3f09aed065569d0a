use crate::error::TafelError;
use crate::model::{CellValue, Workbook};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const XLSX_EXTENSION: &str = ".xlsx";

/// Decides whether an existing output file may be replaced.
pub trait ConfirmOverwrite {
    fn confirm_overwrite(&self, path: &Path) -> bool;
}

impl<F> ConfirmOverwrite for F
where
    F: Fn(&Path) -> bool,
{
    fn confirm_overwrite(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Where the workbook is written.
///
/// A non-blank `explicit` base path is used as given, with `.xlsx` appended.
/// Otherwise the input document's name without extension is used, in the
/// input document's directory.
pub fn resolve_output_path(explicit: Option<&str>, input: &Path) -> PathBuf {
    let base = match explicit {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => {
            let stem = input.file_stem().unwrap_or_default();
            input.with_file_name(stem)
        }
    };

    let mut with_extension = OsString::from(base);
    with_extension.push(XLSX_EXTENSION);
    PathBuf::from(with_extension)
}

/// Write the workbook to `path` as xlsx in a single call.
pub fn save_workbook(workbook: &Workbook, path: &Path) -> Result<(), TafelError> {
    if workbook.is_empty() {
        return Err(TafelError::NoTables);
    }

    let write_error = |reason: String| TafelError::WorkbookWrite {
        path: path.to_path_buf(),
        reason,
    };

    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    for sheet in &workbook.sheets {
        let ws = book
            .new_sheet(&sheet.name)
            .map_err(|e| write_error(format!("sheet '{}': {e}", sheet.name)))?;

        for (r, row) in sheet.rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                let cell = ws.get_cell_mut((c as u32 + 1, r as u32 + 1));
                match value {
                    CellValue::Number(n) => {
                        cell.set_value_number(*n);
                    }
                    CellValue::Text(s) => {
                        cell.set_value_string(s.as_str());
                    }
                }
            }
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, path).map_err(|e| write_error(e.to_string()))?;
    log::info!(
        "wrote {} sheet(s) to {}",
        workbook.sheets.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_gets_extension() {
        let out = resolve_output_path(Some("/tmp/out/result"), Path::new("/data/report.pdf"));
        assert_eq!(out, PathBuf::from("/tmp/out/result.xlsx"));
    }

    #[test]
    fn test_explicit_path_used_verbatim() {
        let out = resolve_output_path(Some(" results/q3"), Path::new("report.pdf"));
        assert_eq!(out, PathBuf::from(" results/q3.xlsx"));
    }

    #[test]
    fn test_default_next_to_input() {
        let out = resolve_output_path(None, Path::new("/data/reports/Q3.2024.pdf"));
        assert_eq!(out, PathBuf::from("/data/reports/Q3.2024.xlsx"));
    }

    #[test]
    fn test_blank_explicit_falls_back_to_input() {
        let out = resolve_output_path(Some("   "), Path::new("/data/report.pdf"));
        assert_eq!(out, PathBuf::from("/data/report.xlsx"));
    }

    #[test]
    fn test_relative_input_without_directory() {
        let out = resolve_output_path(Some(""), Path::new("report.pdf"));
        assert_eq!(out, PathBuf::from("report.xlsx"));
    }

    #[test]
    fn test_closure_confirms() {
        let yes = |_: &Path| true;
        let no = |_: &Path| false;
        assert!(yes.confirm_overwrite(Path::new("a.xlsx")));
        assert!(!no.confirm_overwrite(Path::new("a.xlsx")));
    }

    #[test]
    fn test_empty_workbook_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        let err = save_workbook(&Workbook::default(), &path).unwrap_err();
        assert!(matches!(err, TafelError::NoTables));
        assert!(!path.exists());
    }
}
