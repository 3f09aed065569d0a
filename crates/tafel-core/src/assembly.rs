use crate::model::{CellValue, NormalizedTable, Sheet};

/// Blank rows appended after every table.
pub const SPACER_ROWS: usize = 5;

pub fn sheet_name(page: &str, table_index: usize) -> String {
    format!("Page_{page}_Table_{table_index}")
}

/// Make `name` unique among `existing` the way spreadsheet tools do: a
/// clash (ignoring case) gets the next free numeric suffix, so a second
/// `Page_3_Table_1` becomes `Page_3_Table_11`.
pub fn unique_sheet_name<'a>(name: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let lowered = name.to_lowercase();
    let mut clash = false;
    let mut highest = 0u64;

    for other in existing {
        let other = other.to_lowercase();
        let Some(suffix) = other.strip_prefix(&lowered) else {
            continue;
        };
        if suffix.is_empty() {
            clash = true;
        } else if suffix.bytes().all(|b| b.is_ascii_digit()) {
            highest = highest.max(suffix.parse().unwrap_or(0));
        }
    }

    if clash {
        format!("{name}{}", highest + 1)
    } else {
        name.to_string()
    }
}

/// Build the sheet for the `table_index`-th (1-based) table of `page`.
///
/// Rows are copied in order, followed by [`SPACER_ROWS`] rows of empty
/// cells as wide as the table.
pub fn assemble(page: &str, table_index: usize, table: &NormalizedTable) -> Sheet {
    let width = table.width();
    let mut rows = Vec::with_capacity(table.rows.len() + SPACER_ROWS);
    rows.extend(table.rows.iter().cloned());
    rows.extend((0..SPACER_ROWS).map(|_| vec![CellValue::empty(); width]));

    Sheet {
        name: sheet_name(page, table_index),
        width,
        rows,
    }
}
