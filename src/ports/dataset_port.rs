//! Dataset source port trait.

use crate::domain::dataset::RawTable;
use crate::domain::error::StockPagesError;

/// A tabular source: a header row followed by data rows.
pub trait DatasetPort {
    fn load_table(&self) -> Result<RawTable, StockPagesError>;
}
