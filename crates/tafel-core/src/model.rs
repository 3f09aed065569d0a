use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Rectangle constraining where tables are looked for on a page.
///
/// Coordinates are PDF user space in points, origin at the bottom-left
/// corner, so `top > bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Region {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Region {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Whether a point lies inside the region, widened by `slack` on every side.
    pub fn contains(&self, x: f64, y: f64, slack: f64) -> bool {
        x >= self.left - slack
            && x <= self.right + slack
            && y >= self.bottom - slack
            && y <= self.top + slack
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Extraction settings for a single page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub region: Region,
    /// Max vertical distance (points) between words merged into one row.
    pub row_tolerance: f64,
    /// Max horizontal gap (points) between words merged into one cell.
    pub word_gap: f64,
}

/// A table as produced by the extractor: rows of cell strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        RawTable { rows }
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A table after locale conversion and numeric coercion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    pub rows: Vec<Vec<CellValue>>,
}

impl NormalizedTable {
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub width: usize,
    pub rows: Vec<Vec<CellValue>>,
}

/// In-memory workbook. Holds only assembled sheets, in extraction order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RunStatus {
    Saved { path: PathBuf, sheets: Vec<String> },
    Canceled { path: PathBuf },
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Saved { path, .. } => {
                write!(f, "All tables extracted and saved to {}", path.display())
            }
            RunStatus::Canceled { .. } => write!(f, "Submission canceled."),
        }
    }
}
