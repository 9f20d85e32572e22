//! Raw tabular rows to typed metric records.
//!
//! Adapters hand over a [`RawTable`] (header row plus cells); this module
//! finds the ticker column, coerces every metric cell and drops blank rows.

use super::field::FieldId;
use super::record::{MetricValue, Record};

/// Header names (compared case-insensitively) that identify the ticker column.
pub const TICKER_COLUMNS: [&str; 4] = ["symbol", "ticker", "tick", "tic"];

/// Strings treated as an explicit "no value" marker.
const SENTINELS: [&str; 4] = ["na", "n/a", "nan", "null"];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    pub fn to_metric(&self) -> MetricValue {
        match self {
            Cell::Empty => None,
            Cell::Number(v) => Some(*v).filter(|v| !v.is_nan()),
            Cell::Text(s) => parse_metric_text(s),
        }
    }

    /// Cell rendered as a trimmed string, for the ticker column.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Number(v) => Some(v.to_string()),
            Cell::Text(s) => Some(s.trim().to_string()),
        }
    }
}

/// Parse a textual cell. Blank, sentinel and unparseable strings are absent.
pub fn parse_metric_text(raw: &str) -> MetricValue {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let lower = s.to_ascii_lowercase();
    if SENTINELS.contains(&lower.as_str()) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Column {
    Symbol,
    Metric(FieldId),
    Ignored,
}

fn classify_header(header: &str) -> Option<Column> {
    let name = header.trim();
    if name.is_empty() {
        return None;
    }
    let lower = name.to_ascii_lowercase();
    if TICKER_COLUMNS.contains(&lower.as_str()) {
        return Some(Column::Symbol);
    }
    Some(match name.parse::<FieldId>() {
        Ok(field) => Column::Metric(field),
        Err(_) => Column::Ignored,
    })
}

/// Build one record per non-blank row. Missing cells and unknown columns
/// leave the corresponding fields absent; a later ticker column overrides an
/// earlier one.
pub fn build_records(table: &RawTable) -> Vec<Record> {
    let columns: Vec<(usize, Column)> = table
        .headers
        .iter()
        .enumerate()
        .filter_map(|(idx, h)| classify_header(h).map(|c| (idx, c)))
        .collect();

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let blank = columns
            .iter()
            .all(|(idx, _)| row.get(*idx).is_none_or(Cell::is_blank));
        if blank && !columns.is_empty() {
            continue;
        }

        let mut record = Record::new(None);
        for &(idx, column) in &columns {
            let cell = row.get(idx).unwrap_or(&Cell::Empty);
            match column {
                Column::Symbol => record.symbol = cell.to_text(),
                Column::Metric(field) => record.set(field, cell.to_metric()),
                Column::Ignored => {}
            }
        }
        records.push(record);
    }
    records
}
