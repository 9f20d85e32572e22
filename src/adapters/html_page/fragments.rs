//! Markup snippets and attribute edits injected into the page template.

use crate::domain::comparison::Indicator;
use crate::domain::section::{SectionScore, Tier};

const STATUS_CLASSES: [&str; 3] = ["status-good", "status-mixed", "status-poor"];

/// Indicator glyph plus formatted value, replacing a metric placeholder.
pub fn metric_value(indicator: Indicator, formatted: &str) -> String {
    let cls = indicator.css_class();
    let value_class = match indicator {
        Indicator::Better => "metric-value metric-better",
        Indicator::Worse => "metric-value metric-worse",
        Indicator::Equal => "metric-value",
    };
    format!(
        "<div class=\"metric-value-wrapper\">\
         <span class=\"metric-indicator {cls}\" aria-label=\"{cls}\">{glyph}</span>\
         <span class=\"{value_class}\">{value}</span>\
         </div>",
        glyph = indicator.glyph(),
        value = escape_text(formatted),
    )
}

/// Chip appended to a section heading.
pub fn section_chip(score: &SectionScore) -> String {
    format!(
        "<span class=\"section-score {tier}\">{above}/{total} above median</span>",
        tier = score.tier().as_str(),
        above = score.above,
        total = score.total,
    )
}

pub fn score_text(score: &SectionScore) -> String {
    format!("{}/{}", score.above, score.total)
}

/// Keep every declaration except `width`, then append the new width.
pub fn score_bar_style(existing: Option<&str>, percent: f64) -> String {
    let mut parts: Vec<String> = existing
        .unwrap_or_default()
        .split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty() && !p.starts_with("width:"))
        .map(str::to_string)
        .collect();
    parts.push(format!("width: {percent:.0}%"));
    format!("{};", parts.join("; "))
}

/// Replace any previous tier status class with the current one.
pub fn card_class(existing: Option<&str>, tier: Tier) -> String {
    let mut classes: Vec<&str> = existing
        .unwrap_or_default()
        .split_whitespace()
        .filter(|c| !STATUS_CLASSES.contains(c))
        .collect();
    let status = format!("status-{}", tier.as_str());
    classes.push(&status);
    classes.join(" ")
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
