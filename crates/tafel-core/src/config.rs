use crate::error::TafelError;
use crate::model::{PageConfig, Region};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Table area of the report template: header plus body of every table page.
pub const DEFAULT_REGION: Region = Region::new(50.0, 550.0, 740.0, 40.0);

pub const DEFAULT_ROW_TOLERANCE: f64 = 2.0;

/// Pages 8 and 9 carry double-row headers that must stay in one row.
pub const DOUBLE_HEADER_ROW_TOLERANCE: f64 = 9.0;

pub const DEFAULT_WORD_GAP: f64 = 6.0;

/// Pages used when the page specification is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl Default for PageRange {
    fn default() -> Self {
        PageRange { start: 3, end: 20 }
    }
}

/// Extraction settings for the report template.
///
/// Every field has a default, so a config file only needs to name what
/// it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub region: Region,
    /// Per-page table areas, keyed by page token. Empty for the current
    /// report layout.
    pub region_overrides: BTreeMap<String, Region>,
    pub row_tolerance: f64,
    pub row_tolerance_overrides: BTreeMap<String, f64>,
    pub word_gap: f64,
    pub default_pages: PageRange,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        let mut row_tolerance_overrides = BTreeMap::new();
        row_tolerance_overrides.insert("8".to_string(), DOUBLE_HEADER_ROW_TOLERANCE);
        row_tolerance_overrides.insert("9".to_string(), DOUBLE_HEADER_ROW_TOLERANCE);

        ExtractionConfig {
            region: DEFAULT_REGION,
            region_overrides: BTreeMap::new(),
            row_tolerance: DEFAULT_ROW_TOLERANCE,
            row_tolerance_overrides,
            word_gap: DEFAULT_WORD_GAP,
            default_pages: PageRange::default(),
        }
    }
}

impl ExtractionConfig {
    /// Settings for one page token. Tokens are compared verbatim.
    pub fn config_for(&self, page: &str) -> PageConfig {
        let region = self
            .region_overrides
            .get(page)
            .copied()
            .unwrap_or(self.region);
        let row_tolerance = self
            .row_tolerance_overrides
            .get(page)
            .copied()
            .unwrap_or(self.row_tolerance);

        PageConfig {
            region,
            row_tolerance,
            word_gap: self.word_gap,
        }
    }
}

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<ExtractionConfig, TafelError> {
    let content = std::fs::read_to_string(path).map_err(|e| TafelError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: ExtractionConfig =
        serde_json::from_str(&content).map_err(|e| TafelError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ExtractionConfig, TafelError> {
    let config: ExtractionConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &ExtractionConfig) -> Result<(), TafelError> {
    validate_region("region", &config.region)?;
    for (page, region) in &config.region_overrides {
        validate_region(&format!("region_overrides[{page}]"), region)?;
    }

    if config.row_tolerance.is_nan() || config.row_tolerance < 0.0 {
        return Err(TafelError::ConfigInvalid(
            "row_tolerance must not be negative".into(),
        ));
    }
    for (page, tol) in &config.row_tolerance_overrides {
        if tol.is_nan() || *tol < 0.0 {
            return Err(TafelError::ConfigInvalid(format!(
                "row_tolerance_overrides[{page}] must not be negative"
            )));
        }
    }

    if config.word_gap.is_nan() || config.word_gap <= 0.0 {
        return Err(TafelError::ConfigInvalid("word_gap must be positive".into()));
    }

    let pages = config.default_pages;
    if pages.start == 0 || pages.start > pages.end {
        return Err(TafelError::ConfigInvalid(format!(
            "default_pages {}-{} is not a valid page range",
            pages.start, pages.end
        )));
    }

    Ok(())
}

fn validate_region(label: &str, region: &Region) -> Result<(), TafelError> {
    if region.right <= region.left || region.top <= region.bottom {
        return Err(TafelError::ConfigInvalid(format!(
            "{label} ({region}) must have right > left and top > bottom"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_region_for_every_page() {
        let config = ExtractionConfig::default();
        for page in ["1", "3", "8", "20", "end"] {
            assert_eq!(config.config_for(page).region, DEFAULT_REGION);
        }
    }

    #[test]
    fn test_double_header_pages_get_wide_tolerance() {
        let config = ExtractionConfig::default();
        assert_eq!(config.config_for("8").row_tolerance, 9.0);
        assert_eq!(config.config_for("9").row_tolerance, 9.0);
        assert_eq!(config.config_for("10").row_tolerance, 2.0);
        assert_eq!(config.config_for("08").row_tolerance, 2.0);
    }

    #[test]
    fn test_region_override() {
        let json = r#"{
            "region_overrides": { "5": { "left": 50, "top": 550, "right": 700, "bottom": 40 } }
        }"#;
        let config = parse_config_str(json).unwrap();
        assert_eq!(config.config_for("5").region.right, 700.0);
        assert_eq!(config.config_for("6").region, DEFAULT_REGION);
        // Untouched fields keep their defaults.
        assert_eq!(config.config_for("8").row_tolerance, 9.0);
    }

    #[test]
    fn test_inverted_region_rejected() {
        let json = r#"{ "region": { "left": 50, "top": 40, "right": 740, "bottom": 550 } }"#;
        assert!(parse_config_str(json).is_err());
    }

    #[test]
    fn test_zero_word_gap_rejected() {
        assert!(parse_config_str(r#"{ "word_gap": 0 }"#).is_err());
    }

    #[test]
    fn test_bad_default_pages_rejected() {
        assert!(parse_config_str(r#"{ "default_pages": { "start": 9, "end": 3 } }"#).is_err());
        assert!(parse_config_str(r#"{ "default_pages": { "start": 0, "end": 3 } }"#).is_err());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/nonexistent/tafel.json")).unwrap_err();
        assert!(matches!(err, TafelError::ConfigLoad { .. }));
    }
}
