//! Output page store port trait.

use std::path::PathBuf;

use crate::domain::error::StockPagesError;

/// Flat store of generated pages, addressed by file name.
pub trait PagePort {
    /// Write (or overwrite) a page and return where it landed.
    fn write_page(&self, file_name: &str, html: &str) -> Result<PathBuf, StockPagesError>;

    /// Names of the `.html` pages currently in the store.
    fn list_pages(&self) -> Result<Vec<String>, StockPagesError>;

    fn remove_page(&self, file_name: &str) -> Result<(), StockPagesError>;
}
