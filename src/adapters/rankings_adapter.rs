//! Ranking list loader.
//!
//! The rankings file is a JSON array of objects; each object that carries a
//! `symbol` key contributes one symbol, in file order. Entries without the key
//! (or that are not objects) are skipped.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::error::StockPagesError;

/// One ranked company. Other keys (rank, score, ...) are ignored.
#[derive(Debug, Deserialize)]
struct RankedCompany {
    #[serde(default)]
    symbol: Value,
}

fn symbol_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

pub fn parse_ranked_symbols(json: &str, origin: &str) -> Result<Vec<String>, StockPagesError> {
    let invalid = |reason: String| StockPagesError::RankingsInvalid {
        path: origin.to_string(),
        reason,
    };

    let root: Value = serde_json::from_str(json).map_err(|e| invalid(e.to_string()))?;
    let Value::Array(entries) = root else {
        return Err(invalid("expected a list of objects".into()));
    };

    let mut symbols = Vec::new();
    for entry in entries {
        if !entry.is_object() {
            continue;
        }
        let company: RankedCompany =
            serde_json::from_value(entry).map_err(|e| invalid(e.to_string()))?;
        symbols.extend(symbol_text(company.symbol));
    }
    Ok(symbols)
}

pub fn load_ranked_symbols(path: &Path) -> Result<Vec<String>, StockPagesError> {
    if !path.exists() {
        return Err(StockPagesError::InputMissing {
            what: "rankings JSON",
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    parse_ranked_symbols(&content, &path.display().to_string())
}
