#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::PathBuf;

use stockpages::domain::dataset::{Cell, RawTable};
use stockpages::domain::error::StockPagesError;
use stockpages::ports::dataset_port::DatasetPort;
use stockpages::ports::page_port::PagePort;

pub struct MockDatasetPort {
    pub table: RawTable,
    pub error: Option<String>,
}

impl MockDatasetPort {
    pub fn new(table: RawTable) -> Self {
        Self { table, error: None }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            table: RawTable::default(),
            error: Some(reason.to_string()),
        }
    }
}

impl DatasetPort for MockDatasetPort {
    fn load_table(&self) -> Result<RawTable, StockPagesError> {
        if let Some(reason) = &self.error {
            return Err(StockPagesError::DatasetRead {
                path: "mock".into(),
                reason: reason.clone(),
            });
        }
        Ok(self.table.clone())
    }
}

/// In-memory page store. Names in `locked` refuse deletion.
#[derive(Default)]
pub struct MemoryPageStore {
    pub pages: RefCell<BTreeMap<String, String>>,
    pub locked: BTreeSet<String>,
}

impl MemoryPageStore {
    pub fn with_pages(names: &[&str]) -> Self {
        let store = Self::default();
        for name in names {
            store
                .pages
                .borrow_mut()
                .insert(name.to_string(), "<html>old</html>".to_string());
        }
        store
    }

    pub fn lock(mut self, name: &str) -> Self {
        self.locked.insert(name.to_string());
        self
    }

    pub fn names(&self) -> Vec<String> {
        self.pages.borrow().keys().cloned().collect()
    }

    pub fn page(&self, name: &str) -> Option<String> {
        self.pages.borrow().get(name).cloned()
    }
}

impl PagePort for MemoryPageStore {
    fn write_page(&self, file_name: &str, html: &str) -> Result<PathBuf, StockPagesError> {
        self.pages
            .borrow_mut()
            .insert(file_name.to_string(), html.to_string());
        Ok(PathBuf::from("memory").join(file_name))
    }

    fn list_pages(&self) -> Result<Vec<String>, StockPagesError> {
        Ok(self.names())
    }

    fn remove_page(&self, file_name: &str) -> Result<(), StockPagesError> {
        if self.locked.contains(file_name) {
            return Err(StockPagesError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "locked",
            )));
        }
        self.pages.borrow_mut().remove(file_name);
        Ok(())
    }
}

pub fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

/// Three companies plus one blank row. Peer medians: interest coverage 10,
/// leverage 5, current ratio 1.65.
pub fn sample_table() -> RawTable {
    RawTable {
        headers: vec![
            "Symbol".into(),
            "interest_coverage_ratio".into(),
            "leverage_ratio".into(),
            "current_ratio".into(),
            "company_name".into(),
        ],
        rows: vec![
            vec![
                text("AAPL:US"),
                Cell::Number(12.0),
                Cell::Number(4.0),
                Cell::Number(1.8),
                text("Apple"),
            ],
            vec![
                text("MSFT:US"),
                Cell::Number(10.0),
                Cell::Number(5.0),
                Cell::Number(1.5),
                text("Microsoft"),
            ],
            vec![
                text("GOOG:US"),
                Cell::Number(8.0),
                Cell::Number(6.0),
                text("n/a"),
                text("Alphabet"),
            ],
            vec![Cell::Empty, Cell::Empty, text(" "), Cell::Empty, Cell::Empty],
        ],
    }
}

pub const SAMPLE_CSV: &str = "\
Symbol,interest_coverage_ratio,leverage_ratio,current_ratio,company_name
AAPL:US,12,4,1.8,Apple
MSFT:US,10,5,1.5,Microsoft
GOOG:US,8,6,n/a,Alphabet
";

pub const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<title>Stock Details</title>
<link rel="stylesheet" href="styles.css">
<script src="js/stock_details_page.js"></script>
</head>
<body>
<a href="index.html">Home</a>
<h1 id="stock-symbol-header">SYMBOL</h1>
<section id="debt-service">
  <h2>Debt Service</h2>
  <div id="leverage_ratio">--</div>
  <div id="leverage_ratio_median">--</div>
  <div id="interest_coverage_ratio">--</div>
  <div id="interest_coverage_ratio_median">--</div>
</section>
<div id="card-debt-service" class="score-card">
  <span id="score-val-debt-service">0/0</span>
  <div id="score-bar-debt-service" style="width: 0%"></div>
  <span id="score-label-debt-service"></span>
</div>
<section id="valuation">
  <h2>Valuation</h2>
  <div id="peg">--</div>
</section>
</body>
</html>
"#;
