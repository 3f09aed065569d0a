use crate::config::{ExtractionConfig, PageRange};
use crate::error::TafelError;
use crate::model::PageConfig;
use serde::Serialize;

/// One page of the plan together with the settings it is extracted with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedPage {
    pub page: String,
    #[serde(flatten)]
    pub config: PageConfig,
}

/// Resolve a page specification using the default page range (3-20).
///
/// - `"N-M"` expands to the inclusive range, rendered as decimal strings.
/// - An empty specification expands to the default range.
/// - Anything else is a comma-separated list of page tokens, kept verbatim.
pub fn resolve(spec: &str) -> Result<Vec<String>, TafelError> {
    resolve_with_default(spec, PageRange::default())
}

pub fn resolve_with_default(spec: &str, default: PageRange) -> Result<Vec<String>, TafelError> {
    if spec.contains('-') {
        let (start, end) = parse_range(spec)?;
        return Ok(expand(start, end));
    }

    if spec.is_empty() {
        return Ok(expand(default.start, default.end));
    }

    Ok(spec.split(',').map(str::to_string).collect())
}

/// Resolve a specification and attach the per-page extraction settings.
pub fn plan_pages(spec: &str, config: &ExtractionConfig) -> Result<Vec<PlannedPage>, TafelError> {
    let pages = resolve_with_default(spec, config.default_pages)?;
    Ok(pages
        .into_iter()
        .map(|page| {
            let page_config = config.config_for(&page);
            PlannedPage {
                page,
                config: page_config,
            }
        })
        .collect())
}

fn parse_range(spec: &str) -> Result<(u32, u32), TafelError> {
    let mut bounds = spec.split('-');
    let (Some(start), Some(end), None) = (bounds.next(), bounds.next(), bounds.next()) else {
        return Err(TafelError::page_format(spec, "expected exactly one '-'"));
    };

    let start = parse_bound(spec, start)?;
    let end = parse_bound(spec, end)?;

    if start > end {
        return Err(TafelError::page_format(
            spec,
            format!("start page {start} is after end page {end}"),
        ));
    }

    Ok((start, end))
}

fn parse_bound(spec: &str, bound: &str) -> Result<u32, TafelError> {
    let bound = bound.trim();
    match bound.parse::<u32>() {
        Ok(0) => Err(TafelError::page_format(spec, "pages are numbered from 1")),
        Ok(n) => Ok(n),
        Err(_) => Err(TafelError::page_format(
            spec,
            format!("'{bound}' is not a page number"),
        )),
    }
}

fn expand(start: u32, end: u32) -> Vec<String> {
    (start..=end).map(|n| n.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_range() {
        assert_eq!(resolve("4-7").unwrap(), strings(&["4", "5", "6", "7"]));
    }

    #[test]
    fn test_range_single_page() {
        assert_eq!(resolve("12-12").unwrap(), strings(&["12"]));
    }

    #[test]
    fn test_range_with_spaces() {
        assert_eq!(resolve(" 3 - 5 ").unwrap(), strings(&["3", "4", "5"]));
    }

    #[test]
    fn test_empty_uses_default_range() {
        let pages = resolve("").unwrap();
        assert_eq!(pages.len(), 18);
        assert_eq!(pages.first().map(String::as_str), Some("3"));
        assert_eq!(pages.last().map(String::as_str), Some("20"));
        let expected: Vec<String> = (3..=20).map(|n| n.to_string()).collect();
        assert_eq!(pages, expected);
    }

    #[test]
    fn test_blank_is_a_list_token() {
        assert_eq!(resolve("  ").unwrap(), strings(&["  "]));
    }

    #[test]
    fn test_list_is_verbatim() {
        assert_eq!(resolve("2,5,7").unwrap(), strings(&["2", "5", "7"]));
        assert_eq!(resolve("9").unwrap(), strings(&["9"]));
        assert_eq!(resolve("7,2,end").unwrap(), strings(&["7", "2", "end"]));
    }

    #[test]
    fn test_non_integer_bounds_rejected() {
        for spec in ["a-5", "3-b", "3.5-6", "-5", "3-", "1-2-3", "2,4-6"] {
            let err = resolve(spec).unwrap_err();
            assert!(
                matches!(err, TafelError::PageFormat { .. }),
                "{spec} should be a format error"
            );
        }
    }

    #[test]
    fn test_reversed_range_rejected() {
        assert!(matches!(
            resolve("9-3"),
            Err(TafelError::PageFormat { .. })
        ));
    }

    #[test]
    fn test_zero_page_rejected() {
        assert!(resolve("0-3").is_err());
    }

    #[test]
    fn test_range_ascending_for_all_small_ranges() {
        for start in 1..15u32 {
            for end in start..20u32 {
                let pages = resolve(&format!("{start}-{end}")).unwrap();
                let expected: Vec<String> = (start..=end).map(|n| n.to_string()).collect();
                assert_eq!(pages, expected);
            }
        }
    }

    #[test]
    fn test_plan_pages_attaches_config() {
        let config = ExtractionConfig::default();
        let plan = plan_pages("7-9", &config).unwrap();
        let tolerances: Vec<f64> = plan.iter().map(|p| p.config.row_tolerance).collect();
        assert_eq!(tolerances, vec![2.0, 9.0, 9.0]);
        assert!(plan.iter().all(|p| p.config.region == config.region));
    }

    #[test]
    fn test_plan_pages_custom_default_range() {
        let config = ExtractionConfig {
            default_pages: PageRange { start: 1, end: 2 },
            ..Default::default()
        };
        let plan = plan_pages("", &config).unwrap();
        let pages: Vec<&str> = plan.iter().map(|p| p.page.as_str()).collect();
        assert_eq!(pages, vec!["1", "2"]);
    }
}
