//! Batch planning: which symbols to render, where assets live, and the
//! run-level counters reported at the end.

use std::collections::{BTreeSet, HashSet};
use std::path::{Component, Path};

use super::symbol::{normalize, page_file_name};

/// Normalise, drop blanks and duplicates (first occurrence wins), then apply
/// the optional limit.
pub fn resolve_batch_symbols(raw: &[String], limit: Option<usize>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut symbols: Vec<String> = raw
        .iter()
        .map(|s| normalize(s))
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect();

    if let Some(limit) = limit {
        symbols.truncate(limit);
    }
    symbols
}

/// Output file names the current batch will produce.
pub fn expected_file_names(symbols: &[String]) -> BTreeSet<String> {
    symbols.iter().map(|s| page_file_name(s)).collect()
}

/// Relative prefix (`../` per level) that leads from `out_dir` back to the
/// site root. Empty when `out_dir` is the root itself or lies outside it.
pub fn asset_prefix(site_root: &Path, out_dir: &Path) -> String {
    let relative = if out_dir.is_absolute() {
        match out_dir.strip_prefix(site_root) {
            Ok(rel) => rel,
            Err(_) => return String::new(),
        }
    } else {
        out_dir
    };

    let mut depth: usize = 0;
    for component in relative.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return String::new(),
            },
            Component::RootDir | Component::Prefix(_) => return String::new(),
        }
    }
    "../".repeat(depth)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub generated: usize,
    pub missing: usize,
    pub deleted: usize,
    pub delete_failed: usize,
}
