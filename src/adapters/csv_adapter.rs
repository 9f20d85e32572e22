//! CSV dataset adapter.

use std::path::PathBuf;

use crate::domain::dataset::{Cell, RawTable};
use crate::domain::error::StockPagesError;
use crate::ports::dataset_port::DatasetPort;

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
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

fn to_cell(raw: &str) -> Cell {
    if raw.is_empty() {
        Cell::Empty
    } else {
        Cell::Text(raw.to_string())
    }
}

impl DatasetPort for CsvAdapter {
    /// Every CSV cell is text; coercion happens in the domain loader.
    fn load_table(&self) -> Result<RawTable, StockPagesError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.read_error(e))?;

        let headers = rdr
            .headers()
            .map_err(|e| self.read_error(format!("CSV header error: {e}")))?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
                h.trim().to_string()
            })
            .collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| self.read_error(format!("CSV parse error: {e}")))?;
            rows.push(record.iter().map(to_cell).collect());
        }

        Ok(RawTable { headers, rows })
    }
}
