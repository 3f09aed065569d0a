pub mod pdftotext;
pub mod stream;

use crate::error::TafelError;
use crate::model::{PageConfig, RawTable};
use std::path::Path;

/// A positioned word on a page.
///
/// Coordinates are PDF user space in points (origin bottom-left), so
/// `top > bottom`.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub x0: f64,
    pub x1: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Word {
    pub fn center_x(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }

    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}

/// Trait for table extraction backends.
pub trait TableExtractor: Send + Sync {
    /// Extract the tables inside `config.region` on one page of `document`.
    ///
    /// Returns an empty vector when the page has no table. Fails when the
    /// document cannot be read or `page` is not one of its pages.
    fn extract_tables(
        &self,
        document: &Path,
        page: &str,
        config: &PageConfig,
    ) -> Result<Vec<RawTable>, TafelError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
