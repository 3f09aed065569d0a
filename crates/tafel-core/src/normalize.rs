use crate::model::{CellValue, NormalizedTable, RawTable};

/// Convert a cell from German report notation to international notation.
///
/// Steps, in this order:
/// 1. Remove every `.` (thousands separator)
/// 2. Replace every `,` with `.` (decimal separator)
/// 3. Repair negative numbers: `"- 1 234"` -> `"-1234"`
///
/// Step 1 must run before step 2, otherwise the decimal point would be
/// removed again.
pub fn normalize_cell(raw: &str) -> String {
    let without_groups = raw.replace('.', "");
    let translated = without_groups.replace(',', ".");
    repair_negative(&translated)
}

/// Collapse whitespace after a leading minus sign.
///
/// Report cells sometimes carry a stray separator or space between the sign
/// and the digits. Cells that do not start with `-` are returned unchanged.
pub fn repair_negative(cell: &str) -> String {
    let trimmed = cell.trim();
    if !trimmed.starts_with('-') {
        return cell.to_string();
    }

    let digits: String = trimmed
        .trim_start_matches('-')
        .split_whitespace()
        .collect();
    format!("-{digits}")
}

/// Parse a normalized cell as a finite number.
pub fn parse_number(s: &str) -> Option<f64> {
    let value: f64 = s.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Turn a normalized cell into a number when it parses as one.
pub fn coerce(cell: String) -> CellValue {
    match parse_number(&cell) {
        Some(n) => CellValue::Number(n),
        None => CellValue::Text(cell),
    }
}

pub fn normalize_table(table: &RawTable) -> NormalizedTable {
    let rows = table
        .rows
        .iter()
        .map(|row| row.iter().map(|cell| coerce(normalize_cell(cell))).collect())
        .collect();
    NormalizedTable { rows }
}
