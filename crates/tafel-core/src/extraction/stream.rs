use crate::extraction::Word;
use crate::model::{PageConfig, RawTable, Region};
use std::collections::HashMap;

/// Words whose centre lies this close outside the region still count.
const REGION_SLACK: f64 = 2.0;

/// A run of words in one row, close enough to form a single cell.
#[derive(Debug, Clone)]
struct Chunk {
    text: String,
    x0: f64,
    x1: f64,
}

impl Chunk {
    fn center(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }
}

/// Reconstruct the table inside `config.region` from whitespace alignment.
///
/// Rows come from words sharing a baseline (within `row_tolerance`), columns
/// from horizontal gaps that stay clear across the rows. Returns `None` when
/// the region holds no text.
pub fn detect_table(words: &[Word], config: &PageConfig) -> Option<RawTable> {
    let inside = words_in_region(words, &config.region);
    if inside.is_empty() {
        return None;
    }

    let rows: Vec<Vec<Chunk>> = group_rows(inside, config.row_tolerance)
        .iter()
        .map(|row| chunk_row(row, config.word_gap))
        .collect();

    let columns = column_intervals(&rows);
    let separators: Vec<f64> = columns
        .windows(2)
        .map(|pair| (pair[0].1 + pair[1].0) / 2.0)
        .collect();

    let table_rows = rows
        .iter()
        .map(|row| {
            let mut cells = vec![String::new(); columns.len()];
            for chunk in row {
                let col = separators.iter().filter(|&&s| s < chunk.center()).count();
                let cell = &mut cells[col];
                if !cell.is_empty() {
                    cell.push(' ');
                }
                cell.push_str(&chunk.text);
            }
            cells
        })
        .collect();

    Some(RawTable::new(table_rows))
}

fn words_in_region<'a>(words: &'a [Word], region: &Region) -> Vec<&'a Word> {
    words
        .iter()
        .filter(|w| !w.text.trim().is_empty())
        .filter(|w| region.contains(w.center_x(), w.center_y(), REGION_SLACK))
        .collect()
}

/// Group words top-to-bottom into rows. A word joins the current row when
/// its bottom is within `tolerance` of the bottom of the row's first word.
fn group_rows(mut words: Vec<&Word>, tolerance: f64) -> Vec<Vec<&Word>> {
    words.sort_by(|a, b| b.bottom.total_cmp(&a.bottom).then(a.x0.total_cmp(&b.x0)));

    let mut rows: Vec<Vec<&Word>> = Vec::new();
    let mut row_y: Option<f64> = None;

    for word in words {
        match row_y {
            Some(y) if (y - word.bottom).abs() <= tolerance => {
                if let Some(row) = rows.last_mut() {
                    row.push(word);
                }
            }
            _ => {
                row_y = Some(word.bottom);
                rows.push(vec![word]);
            }
        }
    }

    rows
}

/// Merge the words of one row into chunks separated by gaps wider than `gap`.
fn chunk_row(row: &[&Word], gap: f64) -> Vec<Chunk> {
    let mut sorted: Vec<&Word> = row.to_vec();
    sorted.sort_by(|a, b| a.x0.total_cmp(&b.x0));

    let mut groups: Vec<Vec<&Word>> = Vec::new();
    let mut right_edge = f64::NEG_INFINITY;
    for word in sorted {
        let joins = word.x0 - right_edge <= gap;
        right_edge = right_edge.max(word.x1);
        if let Some(group) = groups.last_mut().filter(|_| joins) {
            group.push(word);
        } else {
            groups.push(vec![word]);
        }
    }

    groups
        .into_iter()
        .map(|mut group| {
            let x0 = group.iter().map(|w| w.x0).fold(f64::INFINITY, f64::min);
            let x1 = group.iter().map(|w| w.x1).fold(f64::NEG_INFINITY, f64::max);
            // Reading order inside a cell: line by line, then left to right.
            group.sort_by(|a, b| b.bottom.total_cmp(&a.bottom).then(a.x0.total_cmp(&b.x0)));
            let text = group
                .iter()
                .map(|w| w.text.trim())
                .collect::<Vec<_>>()
                .join(" ");
            Chunk { text, x0, x1 }
        })
        .collect()
}

/// Infer column spans.
///
/// Rows with the most common chunk count define the base columns; chunks of
/// the remaining rows that overlap none of them open additional columns.
fn column_intervals(rows: &[Vec<Chunk>]) -> Vec<(f64, f64)> {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.len()).or_default() += 1;
    }
    let modal_len = counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then(a.0.cmp(b.0)))
        .map(|(len, _)| *len)
        .unwrap_or(0);

    let mut columns = merge_intervals(
        rows.iter()
            .filter(|row| row.len() == modal_len)
            .flatten()
            .map(|c| (c.x0, c.x1))
            .collect(),
    );

    let extra: Vec<(f64, f64)> = rows
        .iter()
        .filter(|row| row.len() != modal_len)
        .flatten()
        .filter(|c| !columns.iter().any(|&(x0, x1)| c.x0 <= x1 && c.x1 >= x0))
        .map(|c| (c.x0, c.x1))
        .collect();

    if !extra.is_empty() {
        columns.extend(extra);
        columns = merge_intervals(columns);
    }

    columns
}

fn merge_intervals(mut spans: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    spans.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(spans.len());
    for (x0, x1) in spans {
        if let Some(last) = merged.last_mut().filter(|last| x0 <= last.1) {
            last.1 = last.1.max(x1);
        } else {
            merged.push((x0, x1));
        }
    }
    merged
}
