pub mod assembly;
pub mod config;
pub mod error;
pub mod extraction;
pub mod model;
pub mod normalize;
pub mod output;
pub mod plan;

use config::ExtractionConfig;
use error::TafelError;
use extraction::TableExtractor;
use model::{RunStatus, Workbook};
use output::ConfirmOverwrite;
use std::path::{Path, PathBuf};

/// Everything one run needs, read once up front.
#[derive(Debug, Clone, Default)]
pub struct ExtractRequest {
    pub document: PathBuf,
    /// Page specification: empty, `"N"`, `"N-M"` or a comma-separated list.
    pub pages: String,
    /// Output base path; `.xlsx` is appended. Blank means next to the input.
    pub output: Option<String>,
    pub config: ExtractionConfig,
}

/// Main API entry point: extract, normalize and save.
///
/// The workbook is assembled completely before anything is written, so a
/// failure on any page leaves the file system untouched. When the output
/// file already exists and `confirm` declines, nothing is written and
/// `RunStatus::Canceled` is returned.
pub fn run(
    request: &ExtractRequest,
    extractor: &dyn TableExtractor,
    confirm: &dyn ConfirmOverwrite,
) -> Result<RunStatus, TafelError> {
    let pages = plan::resolve_with_default(&request.pages, request.config.default_pages)?;
    let workbook = build_workbook(&request.document, &pages, extractor, &request.config)?;

    let path = output::resolve_output_path(request.output.as_deref(), &request.document);
    if path.exists() && !confirm.confirm_overwrite(&path) {
        log::info!("not overwriting {}", path.display());
        return Ok(RunStatus::Canceled { path });
    }

    output::save_workbook(&workbook, &path)?;
    Ok(RunStatus::Saved {
        sheets: workbook.sheet_names().into_iter().map(str::to_string).collect(),
        path,
    })
}

/// Extract every requested page, one after another, and assemble the sheets.
///
/// A page listed twice yields its sheets twice, under de-duplicated names.
/// Fails on the first page that cannot be extracted, and with
/// `TafelError::NoTables` when no page yields a table.
pub fn build_workbook(
    document: &Path,
    pages: &[String],
    extractor: &dyn TableExtractor,
    config: &ExtractionConfig,
) -> Result<Workbook, TafelError> {
    let mut workbook = Workbook::default();

    for page in pages {
        let page_config = config.config_for(page);
        log::debug!(
            "page {page}: region {}, row tolerance {} ({})",
            page_config.region,
            page_config.row_tolerance,
            extractor.backend_name()
        );

        let tables = extractor.extract_tables(document, page, &page_config)?;
        log::debug!("page {page}: {} table(s)", tables.len());

        for (i, raw) in tables.iter().enumerate() {
            let table = normalize::normalize_table(raw);
            let mut sheet = assembly::assemble(page, i + 1, &table);
            let name = assembly::unique_sheet_name(&sheet.name, workbook.sheet_names());
            if name != sheet.name {
                log::debug!("sheet {} already exists, using {name}", sheet.name);
                sheet.name = name;
            }
            workbook.sheets.push(sheet);
        }
    }

    if workbook.is_empty() {
        return Err(TafelError::NoTables);
    }

    Ok(workbook)
}
