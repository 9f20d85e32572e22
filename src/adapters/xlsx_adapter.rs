//! Spreadsheet dataset adapter (xlsx, xls, ods) backed by calamine.
//!
//! Only the first worksheet is read. Numeric cells pass through as numbers,
//! string cells keep their text for the domain coercion, and every other cell
//! kind (booleans, dates, errors) is treated as empty.

use std::path::PathBuf;

use calamine::{Data, Reader, open_workbook_auto};

use crate::domain::dataset::{Cell, RawTable};
use crate::domain::error::StockPagesError;
use crate::ports::dataset_port::DatasetPort;

pub struct XlsxAdapter {
    path: PathBuf,
}

impl XlsxAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_error(&self, reason: impl ToString) -> StockPagesError {
        StockPagesError::DatasetRead {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::String(s) => Cell::Text(s.clone()),
        _ => Cell::Empty,
    }
}

fn header_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

impl DatasetPort for XlsxAdapter {
    fn load_table(&self) -> Result<RawTable, StockPagesError> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|e| self.read_error(e))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| self.read_error("workbook has no worksheets"))?
            .map_err(|e| self.read_error(e))?;

        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Ok(RawTable::default());
        };

        Ok(RawTable {
            headers: header_row.iter().map(header_text).collect(),
            rows: rows.map(|row| row.iter().map(to_cell).collect()).collect(),
        })
    }
}
