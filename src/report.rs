//! Plain-text summaries printed to stdout.
//!
//! Layouts follow the familiar dataframe console form: a left index
//! column, two-space gaps, right-aligned cells.

use crate::acquisition::SensorTable;
use crate::stats::{summarize, ColumnSummary, CorrelationMatrix};
use std::fmt::Write;

const GAP: &str = "  ";

/// First `n` rows with a row-index column.
pub fn format_head(table: &SensorTable, n: usize) -> String {
    let headers: Vec<String> = table.column_names().iter().map(ToString::to_string).collect();
    if headers.is_empty() {
        return "Empty table".to_string();
    }
    let rows = table.head(n);
    let index: Vec<String> = (0..rows.len()).map(|i| i.to_string()).collect();
    render_grid(&headers, &index, &rows)
}

/// `count, mean, std, min, 25%, 50%, 75%, max` per numeric channel, six
/// decimals.
pub fn format_describe(table: &SensorTable) -> String {
    let columns = table.numeric_columns();
    if columns.is_empty() {
        return "No numeric channels".to_string();
    }

    let headers: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
    let summaries: Vec<[f64; 8]> = columns.iter().map(|c| summarize(c).as_row()).collect();
    let index: Vec<String> = ColumnSummary::LABELS.iter().map(ToString::to_string).collect();
    let rows: Vec<Vec<String>> = (0..ColumnSummary::LABELS.len())
        .map(|stat| summaries.iter().map(|row| format_stat(row[stat])).collect())
        .collect();

    render_grid(&headers, &index, &rows)
}

/// The `k` strongest channel pairs, one per line.
pub fn format_correlations(matrix: &CorrelationMatrix, k: usize) -> String {
    let pairs = matrix.strongest_pairs(k);
    if pairs.is_empty() {
        return "No correlated channel pairs".to_string();
    }

    let name_width = pairs
        .iter()
        .map(|p| p.x.chars().count() + p.y.chars().count() + 3)
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for pair in &pairs {
        if !out.is_empty() {
            out.push('\n');
        }
        let label = format!("{} ~ {}", pair.x, pair.y);
        let _ = write!(
            out,
            "{label:<name_width$}{GAP}r = {:+.3}{GAP}p = {:.2e}{GAP}(n = {})",
            pair.r, pair.p_value, pair.sample_count
        );
    }
    out
}

fn format_stat(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else {
        format!("{x:.6}")
    }
}

/// Header line plus one line per row. Index cells left-aligned, data
/// cells right-aligned to the wider of header and values.
fn render_grid(headers: &[String], index: &[String], rows: &[Vec<String>]) -> String {
    let index_width = index.iter().map(|s| s.chars().count()).max().unwrap_or(0);
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, h)| {
            rows.iter()
                .filter_map(|r| r.get(col))
                .map(|cell| cell.chars().count())
                .fold(h.chars().count(), usize::max)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&" ".repeat(index_width));
    for (h, w) in headers.iter().zip(&widths) {
        let _ = write!(out, "{GAP}{h:>w$}");
    }

    for (label, row) in index.iter().zip(rows) {
        let _ = write!(out, "\n{label:<index_width$}");
        for (cell, w) in row.iter().zip(&widths) {
            let _ = write!(out, "{GAP}{cell:>w$}");
        }
    }
    out
}
