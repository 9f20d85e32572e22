//! Concrete adapter implementations for ports, plus the page renderer and
//! sitemap writer.

pub mod csv_adapter;
#[cfg(feature = "xlsx")]
pub mod xlsx_adapter;
pub mod file_config_adapter;
pub mod html_page;
pub mod page_store_adapter;
pub mod rankings_adapter;
pub mod sitemap_adapter;

use std::path::Path;

use crate::domain::error::StockPagesError;
use crate::ports::dataset_port::DatasetPort;

/// Pick a dataset adapter from the file extension. Spreadsheet formats need
/// the `xlsx` feature; anything that is not a spreadsheet is read as CSV.
pub fn open_dataset(path: &Path) -> Result<Box<dyn DatasetPort>, StockPagesError> {
    if !path.exists() {
        return Err(StockPagesError::InputMissing {
            what: "dataset",
            path: path.display().to_string(),
        });
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => {
            #[cfg(feature = "xlsx")]
            {
                Ok(Box::new(xlsx_adapter::XlsxAdapter::new(path.to_path_buf())))
            }
            #[cfg(not(feature = "xlsx"))]
            {
                Err(StockPagesError::DatasetRead {
                    path: path.display().to_string(),
                    reason: "spreadsheet support requires the xlsx feature".into(),
                })
            }
        }
        _ => Ok(Box::new(csv_adapter::CsvAdapter::new(path.to_path_buf()))),
    }
}
