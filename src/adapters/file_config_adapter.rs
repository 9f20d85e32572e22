//! Site settings read from an INI file.
//!
//! Keys are looked up case-insensitively. Blank values count as unset, and a
//! value that does not parse as the requested type falls back to the caller's
//! default, so a half-filled file behaves like a shorter one.
//!
//! Sections: `[paths]` (template, dataset, rankings, out_dir), `[comparison]`
//! (near_zero_margin), `[batch]` (limit, clean), `[sitemap]` (base_url, out,
//! lastmod).

use std::path::Path;
use std::str::FromStr;

use configparser::ini::Ini;

use crate::domain::error::StockPagesError;
use crate::ports::config_port::ConfigPort;

pub struct FileConfigAdapter {
    ini: Ini,
}

impl FileConfigAdapter {
    pub fn from_file(path: &Path) -> Result<Self, StockPagesError> {
        let mut ini = Ini::new();
        ini.load(path).map_err(|reason| StockPagesError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { ini })
    }

    pub fn from_string(content: &str) -> Result<Self, StockPagesError> {
        let mut ini = Ini::new();
        ini.read(content.to_string())
            .map_err(|reason| StockPagesError::ConfigParse {
                file: "<inline>".into(),
                reason,
            })?;
        Ok(Self { ini })
    }

    /// No file given: every lookup falls through to its default.
    pub fn empty() -> Self {
        Self { ini: Ini::new() }
    }

    fn value(&self, section: &str, key: &str) -> Option<String> {
        let raw = self.ini.get(section, key)?;
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn parsed<T: FromStr>(&self, section: &str, key: &str) -> Option<T> {
        self.value(section, key)?.parse().ok()
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.value(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.parsed(section, key).unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.parsed(section, key).unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.value(section, key)
            .as_deref()
            .and_then(parse_switch)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SITE_INI: &str = r#"
[paths]
template = templates/stock-details.html
dataset = data/financials.xlsx
out_dir = stocks

[comparison]
near_zero_margin = 0.05

[sitemap]
base_url = https://example.com
lastmod = no
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SITE_INI).unwrap();
        assert_eq!(
            adapter.get_string("paths", "template"),
            Some("templates/stock-details.html".to_string())
        );
        assert_eq!(adapter.get_string("paths", "out_dir"), Some("stocks".to_string()));
        assert_eq!(adapter.get_double("comparison", "near_zero_margin", 0.0), 0.05);
        assert!(!adapter.get_bool("sitemap", "lastmod", true));
    }

    #[test]
    fn blank_values_read_as_missing() {
        let adapter = FileConfigAdapter::from_string("[paths]\nrankings =   \n").unwrap();
        assert_eq!(adapter.get_string("paths", "rankings"), None);
    }

    #[test]
    fn missing_keys_use_defaults() {
        let adapter = FileConfigAdapter::from_string("[paths]\n").unwrap();
        assert_eq!(adapter.get_string("paths", "dataset"), None);
        assert_eq!(adapter.get_string("nope", "dataset"), None);
        assert_eq!(adapter.get_int("paths", "limit", 7), 7);
        assert_eq!(adapter.get_double("comparison", "near_zero_margin", 0.0), 0.0);
        assert!(adapter.get_bool("sitemap", "lastmod", true));
    }

    #[test]
    fn malformed_numbers_use_defaults() {
        let adapter =
            FileConfigAdapter::from_string("[comparison]\nnear_zero_margin = wide\n").unwrap();
        assert_eq!(adapter.get_double("comparison", "near_zero_margin", 0.0), 0.0);
    }

    #[test]
    fn keys_and_sections_ignore_case() {
        let adapter = FileConfigAdapter::from_string("[Batch]\nLIMIT = 12\n").unwrap();
        assert_eq!(adapter.get_int("batch", "limit", -1), 12);
        assert_eq!(adapter.get_int("batch", "clean", -1), -1);
    }

    #[test]
    fn bool_spellings() {
        let adapter =
            FileConfigAdapter::from_string("[s]\na = Yes\nb = off\nc = 1\nd = maybe\n").unwrap();
        assert!(adapter.get_bool("s", "a", false));
        assert!(!adapter.get_bool("s", "b", true));
        assert!(adapter.get_bool("s", "c", false));
        assert!(adapter.get_bool("s", "d", true));
    }

    #[test]
    fn empty_adapter_has_nothing() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("paths", "template"), None);
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[paths]\nrankings = rank_companies/rank_companies.json\n").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("paths", "rankings"),
            Some("rank_companies/rank_companies.json".to_string())
        );
    }

    #[test]
    fn from_file_missing_is_error() {
        let result = FileConfigAdapter::from_file(Path::new("/nonexistent/site.ini"));
        assert!(matches!(result, Err(StockPagesError::ConfigParse { .. })));
    }
}
