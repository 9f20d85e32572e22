//! Ticker normalisation, record lookup and output file naming.

use super::record::Record;

/// Separator between the base ticker and its market code, as in `AAPL:US`.
pub const MARKET_SEPARATOR: char = ':';

/// File stem used when a symbol sanitises to nothing.
pub const FALLBACK_FILE_STEM: &str = "SYMBOL";

pub fn normalize(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// Portion before the market separator, trimmed. `AAPL:US` -> `AAPL`.
pub fn base_ticker(symbol: &str) -> &str {
    match symbol.split_once(MARKET_SEPARATOR) {
        Some((base, _)) => base.trim(),
        None => symbol,
    }
}

/// First record whose symbol equals `symbol` exactly, or shares its base
/// ticker. Either side may carry the market suffix. Comparison is
/// case-insensitive.
pub fn find_record<'a>(records: &'a [Record], symbol: &str) -> Option<&'a Record> {
    let wanted = normalize(symbol);
    let wanted_base = base_ticker(&wanted);

    records.iter().find(|record| {
        let Some(candidate) = record.symbol.as_deref() else {
            return false;
        };
        let candidate = normalize(candidate);
        candidate == wanted || base_ticker(&candidate) == wanted_base
    })
}

/// Make a symbol safe for file names and URLs: upper-case, `:`, `/`, `\` and
/// whitespace runs become `-`, and anything outside `[A-Z0-9._-]` is dropped.
pub fn sanitize_for_filename(symbol: &str) -> String {
    let upper = normalize(symbol);
    let replaced: String = upper
        .chars()
        .map(|c| match c {
            ':' | '/' | '\\' => '-',
            other => other,
        })
        .collect();
    let joined = replaced.split_whitespace().collect::<Vec<_>>().join("-");
    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'))
        .collect();

    if cleaned.is_empty() {
        FALLBACK_FILE_STEM.to_string()
    } else {
        cleaned
    }
}

pub fn page_file_name(symbol: &str) -> String {
    format!("{}.html", sanitize_for_filename(symbol))
}
