use tafel_core::config::ExtractionConfig;
use tafel_core::error::TafelError;

use crate::output;

/// Print the built-in config, ready to be edited and passed back with `--config`.
pub fn print_default() -> Result<(), TafelError> {
    output::json::print(&ExtractionConfig::default())
}
