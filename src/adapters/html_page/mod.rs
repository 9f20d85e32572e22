//! Static stock detail page rendering.
//!
//! [`render`] is a pure transform from the page template to a finished page:
//! every computed value is planned up front as a patch keyed by element id,
//! then applied in a single streaming rewrite. Elements the template does not
//! contain are simply never matched, so a sparse template still renders.

pub mod fragments;

use std::collections::HashMap;

use lol_html::html_content::{ContentType, Element};
use lol_html::{HandlerResult, RewriteStrSettings, element, rewrite_str};

use crate::domain::comparison::{ComparisonSettings, indicator};
use crate::domain::error::StockPagesError;
use crate::domain::field::FieldId;
use crate::domain::format::format_value;
use crate::domain::peer_stats::PeerStatistics;
use crate::domain::record::Record;
use crate::domain::section::{Section, SectionScore, Tier};

pub const SYMBOL_HEADER_ID: &str = "stock-symbol-header";
pub const STYLESHEET_HREF: &str = "styles.css";
pub const SCRIPT_ROOT: &str = "js/";
pub const HOME_HREF: &str = "index.html";

/// Everything one page render needs.
pub struct PageContext<'a> {
    pub symbol: &'a str,
    pub record: &'a Record,
    pub peers: &'a PeerStatistics,
    pub settings: &'a ComparisonSettings,
    /// Relative path back to the site root, e.g. `../`.
    pub asset_prefix: &'a str,
}

enum Patch {
    Text(String),
    Replace(String),
    ScoreBar(f64),
    CardStatus(Tier),
}

fn apply_patch(el: &mut Element<'_, '_>, patch: Patch) -> HandlerResult {
    match patch {
        Patch::Text(text) => el.set_inner_content(&text, ContentType::Text),
        Patch::Replace(html) => el.replace(&html, ContentType::Html),
        Patch::ScoreBar(percent) => {
            let style = fragments::score_bar_style(el.get_attribute("style").as_deref(), percent);
            el.set_attribute("style", &style)?;
        }
        Patch::CardStatus(tier) => {
            let class = fragments::card_class(el.get_attribute("class").as_deref(), tier);
            el.set_attribute("class", &class)?;
        }
    }
    Ok(())
}

fn section_scores(ctx: &PageContext<'_>) -> Vec<(Section, SectionScore)> {
    Section::ALL
        .iter()
        .map(|&s| (s, SectionScore::for_section(s, ctx.record, ctx.peers, ctx.settings)))
        .collect()
}

/// Element id -> change, for everything addressed by id.
fn plan_patches(ctx: &PageContext<'_>, scores: &[(Section, SectionScore)]) -> HashMap<String, Patch> {
    let mut patches = HashMap::new();
    patches.insert(SYMBOL_HEADER_ID.to_string(), Patch::Text(ctx.symbol.to_string()));

    for (section, score) in scores {
        let id = section.id();
        let tier = score.tier();
        patches.insert(format!("score-val-{id}"), Patch::Text(fragments::score_text(score)));
        patches.insert(format!("score-bar-{id}"), Patch::ScoreBar(score.percent()));
        patches.insert(format!("score-label-{id}"), Patch::Text(tier.label().to_string()));
        patches.insert(format!("card-{id}"), Patch::CardStatus(tier));
    }

    for field in FieldId::ALL {
        let value = ctx.record.get(field);
        let median = ctx.peers.median(field);
        let ind = indicator(field, value, median, ctx.settings);
        patches.insert(
            field.as_str().to_string(),
            Patch::Replace(fragments::metric_value(ind, &format_value(field, value))),
        );
        patches.insert(
            format!("{}_median", field.as_str()),
            Patch::Text(format_value(field, median)),
        );
    }
    patches
}

/// Render the page for `ctx.symbol`. Only the first element carrying a given
/// id is patched.
pub fn render(template: &str, ctx: &PageContext<'_>) -> Result<String, StockPagesError> {
    let scores = section_scores(ctx);
    let mut patches = plan_patches(ctx, &scores);

    let title = format!("Stock Details - {}", ctx.symbol);
    let symbol = ctx.symbol;
    let prefix = ctx.asset_prefix;
    let mut title_done = false;

    let mut handlers = vec![
        element!("title", |el| {
            if !title_done {
                title_done = true;
                el.set_inner_content(&title, ContentType::Text);
            }
            Ok(())
        }),
        element!("body", |el| {
            el.set_attribute("data-stock-symbol", symbol)?;
            el.set_attribute("data-prerendered", "1")?;
            Ok(())
        }),
        element!("link[href]", |el| {
            let href = el.get_attribute("href").unwrap_or_default();
            if href.trim() == STYLESHEET_HREF {
                el.set_attribute("href", &format!("{prefix}{STYLESHEET_HREF}"))?;
            }
            Ok(())
        }),
        element!("script[src]", |el| {
            let src = el.get_attribute("src").unwrap_or_default();
            let src = src.trim();
            if src.starts_with(SCRIPT_ROOT) {
                el.set_attribute("src", &format!("{prefix}{src}"))?;
            }
            Ok(())
        }),
        element!("a[href]", |el| {
            let href = el.get_attribute("href").unwrap_or_default();
            if href.trim() == HOME_HREF {
                el.set_attribute("href", &format!("{prefix}{HOME_HREF}"))?;
            }
            Ok(())
        }),
        element!("[id]", |el| {
            let Some(id) = el.get_attribute("id") else {
                return Ok(());
            };
            match patches.remove(&id) {
                Some(patch) => apply_patch(el, patch),
                None => Ok(()),
            }
        }),
    ];

    for (section, score) in &scores {
        let mut chip = Some(fragments::section_chip(score));
        handlers.push(element!(format!("#{} h2", section.id()), move |el| {
            if let Some(chip) = chip.take() {
                el.append(&chip, ContentType::Html);
            }
            Ok(())
        }));
    }

    rewrite_str(
        template,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|e| StockPagesError::Render {
        reason: e.to_string(),
    })
}
