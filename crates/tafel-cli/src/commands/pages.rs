use std::path::PathBuf;
use tafel_core::error::TafelError;
use tafel_core::plan;

use crate::output;

pub fn run(spec: &str, config_file: Option<PathBuf>, output_format: &str) -> Result<(), TafelError> {
    let config = super::load_or_default(config_file.as_deref())?;
    let planned = plan::plan_pages(spec, &config)?;

    match output_format {
        "json" => output::json::print(&planned)?,
        _ => output::table::print_plan(&planned),
    }

    Ok(())
}
