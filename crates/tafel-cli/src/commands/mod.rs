pub mod config;
pub mod extract;
pub mod pages;

use std::path::Path;
use tafel_core::config::{load_config, ExtractionConfig};
use tafel_core::error::TafelError;

/// Load the config file if one was given, else the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<ExtractionConfig, TafelError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(ExtractionConfig::default()),
    }
}
