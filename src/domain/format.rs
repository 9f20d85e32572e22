//! Display formatting of metric values.

use super::field::{FieldId, FormatClass};
use super::record::MetricValue;

pub const NOT_AVAILABLE: &str = "N/A";

pub fn format_value(field: FieldId, value: MetricValue) -> String {
    let Some(v) = value.filter(|v| !v.is_nan()) else {
        return NOT_AVAILABLE.to_string();
    };

    match field.format_class() {
        FormatClass::Ratio => format!("{v:.2}"),
        FormatClass::Percent => format!("{:.2}%", v * 100.0),
        FormatClass::Count => format!("{v:.0}"),
        FormatClass::Billions => format!("{:.2}B", v / 1_000_000_000.0),
        FormatClass::Score => format!("{:.2}", v * 100.0),
        FormatClass::Grouped => group_thousands(v),
    }
}

/// Two decimals with comma thousands separators, e.g. `-1,234,567.89`.
pub fn group_thousands(v: f64) -> String {
    let fixed = format!("{v:.2}");
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };
    if !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return fixed;
    }

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_is_na_for_every_class() {
        for field in FieldId::ALL {
            assert_eq!(format_value(field, None), "N/A");
            assert_eq!(format_value(field, Some(f64::NAN)), "N/A");
        }
    }

    #[test]
    fn ratio_two_decimals() {
        assert_eq!(format_value(FieldId::CurrentRatio, Some(1.5)), "1.50");
        assert_eq!(format_value(FieldId::Peg, Some(-0.456)), "-0.46");
    }

    #[test]
    fn percent_scales_by_hundred() {
        assert_eq!(format_value(FieldId::EarningsYield, Some(0.0512)), "5.12%");
        assert_eq!(format_value(FieldId::GoodwillToAssets, Some(-0.1)), "-10.00%");
    }

    #[test]
    fn count_has_no_decimals() {
        assert_eq!(format_value(FieldId::NegativeEpsCount5y, Some(2.0)), "2");
    }

    #[test]
    fn billions_suffix() {
        assert_eq!(
            format_value(FieldId::FinalEarnings10yGrowth10pct, Some(12_346_000_000.0)),
            "12.35B"
        );
    }

    #[test]
    fn score_scales_without_suffix() {
        assert_eq!(format_value(FieldId::RuleOf40, Some(0.42)), "42.00");
    }

    #[test]
    fn grouping() {
        assert_eq!(group_thousands(0.0), "0.00");
        assert_eq!(group_thousands(999.999), "1,000.00");
        assert_eq!(group_thousands(1234567.891), "1,234,567.89");
        assert_eq!(group_thousands(-1234.5), "-1,234.50");
        assert_eq!(group_thousands(100.0), "100.00");
        assert_eq!(group_thousands(f64::INFINITY), "inf");
    }
}
