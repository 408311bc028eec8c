//! Sensor Table
//!
//! Parses a cleaned sensor log into named columns. The first line is the
//! header; every following line is one time step. Every row must have
//! exactly as many fields as the header.
//!
//! Columns are classified after parsing: a column whose every non-empty
//! field parses as `f64` is numeric (a sensor channel), anything else is
//! kept as text for display only. A numeric column with no gaps whose
//! fields are all integer literals is displayed without a fractional part.

use csv::ReaderBuilder;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

/// Field values treated as missing in numeric columns.
const MISSING_MARKERS: &[&str] = &["", "nan", "NaN", "NAN", "NA", "N/A", "null", "NULL", "None"];

#[derive(Debug, Error)]
pub enum TableError {
    #[error("No header row: input is empty after cleaning")]
    MissingHeader,

    #[error("Row {row} has {found} fields, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Values of a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Sensor channel; `None` is a missing reading
    Numeric(Vec<Option<f64>>),
    /// Non-numeric column (labels, timestamps)
    Text(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display form of the value at `row`.
    fn display(&self, row: usize, integral: bool) -> String {
        match self {
            Self::Numeric(v) => match v.get(row).copied().flatten() {
                Some(x) if integral => format!("{x:.0}"),
                Some(x) => format_number(x),
                None => "NaN".to_string(),
            },
            Self::Text(v) => v.get(row).cloned().unwrap_or_default(),
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }

    /// Numeric values including gaps, or `None` for text columns.
    pub fn values(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(v) => Some(v),
            ColumnData::Text(_) => None,
        }
    }

    /// Present numeric values, in row order. Empty for text columns.
    pub fn present_values(&self) -> Vec<f64> {
        self.values()
            .map(|v| v.iter().flatten().copied().collect())
            .unwrap_or_default()
    }
}

/// Parsed sensor readings: ordered columns, ordered rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorTable {
    columns: Vec<Column>,
    /// Per column: every field is an integer literal
    integral: Vec<bool>,
    n_rows: usize,
}

impl SensorTable {
    /// Parse a cleaned blob. The first line is the header.
    pub fn parse(cleaned: &str) -> Result<Self, TableError> {
        if cleaned.trim().is_empty() {
            return Err(TableError::MissingHeader);
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(cleaned.as_bytes());

        let header = reader.headers()?.clone();
        if header.is_empty() {
            return Err(TableError::MissingHeader);
        }
        let names = dedupe_names(header.iter().map(str::trim));
        let expected = names.len();

        let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); expected];
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() != expected {
                return Err(TableError::RaggedRow {
                    row: idx + 1,
                    expected,
                    found: record.len(),
                });
            }
            for (col, field) in raw_columns.iter_mut().zip(record.iter()) {
                col.push(field.trim().to_string());
            }
        }

        let n_rows = raw_columns.first().map_or(0, Vec::len);
        let integral: Vec<bool> = raw_columns
            .iter()
            .map(|raw| !raw.is_empty() && raw.iter().all(|f| f.parse::<i64>().is_ok()))
            .collect();
        let columns: Vec<Column> = names
            .into_iter()
            .zip(raw_columns)
            .map(|(name, raw)| Column {
                name,
                data: classify(raw),
            })
            .collect();

        let numeric = columns.iter().filter(|c| c.is_numeric()).count();
        info!(
            rows = n_rows,
            columns = columns.len(),
            numeric_columns = numeric,
            "Parsed sensor table"
        );

        Ok(Self {
            columns,
            integral,
            n_rows,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Sensor channels in header order.
    pub fn numeric_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|c| c.is_numeric()).collect()
    }

    /// First `n` numeric columns.
    pub fn leading_numeric(&self, n: usize) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .take(n)
            .collect()
    }

    /// Whether the named column holds only integer literals with no gaps.
    pub fn is_integral(&self, name: &str) -> bool {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .is_some_and(|i| self.integral[i])
    }

    /// Display strings for the first `n` rows, one `Vec` per row.
    pub fn head(&self, n: usize) -> Vec<Vec<String>> {
        (0..n.min(self.n_rows))
            .map(|row| {
                self.columns
                    .iter()
                    .zip(&self.integral)
                    .map(|(c, &integral)| c.data.display(row, integral))
                    .collect()
            })
            .collect()
    }
}

/// Numeric if every non-missing field parses as `f64`; text otherwise.
fn classify(raw: Vec<String>) -> ColumnData {
    let mut parsed = Vec::with_capacity(raw.len());
    for field in &raw {
        if MISSING_MARKERS.contains(&field.as_str()) {
            parsed.push(None);
            continue;
        }
        match field.parse::<f64>() {
            Ok(v) if v.is_finite() => parsed.push(Some(v)),
            _ => {
                debug!(value = %field, "Non-numeric field, keeping column as text");
                return ColumnData::Text(raw);
            }
        }
    }
    ColumnData::Numeric(parsed)
}

/// Later duplicates of a header name get `.1`, `.2`, ... suffixes. A
/// suffixed name that is itself taken is suffixed again (`a.1.1`).
fn dedupe_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let mut candidate = name.to_string();
        let mut count = counts.get(&candidate).copied().unwrap_or(0);
        while count > 0 {
            counts.insert(candidate.clone(), count + 1);
            candidate = format!("{candidate}.{count}");
            count = counts.get(&candidate).copied().unwrap_or(0);
        }
        counts.insert(candidate.clone(), count + 1);
        out.push(candidate);
    }
    out
}

/// Compact numeric display: integral values as `N.0`, otherwise up to six
/// decimals with trailing zeros removed.
pub(crate) fn format_number(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.fract() == 0.0 && x.abs() < 1e15 {
        return format!("{x:.1}");
    }
    let s = format!("{x:.6}");
    let s = s.trim_end_matches('0');
    s.trim_end_matches('.').to_string()
}
