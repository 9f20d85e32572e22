//! sitemap.xml generation for the static site.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::error::StockPagesError;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const SKIPPED_DIRS: [&str; 3] = ["node_modules", ".git", "__pycache__"];

/// Require an http(s) scheme and a trailing slash.
pub fn normalize_base_url(base_url: &str) -> Result<String, StockPagesError> {
    let invalid = |reason: &str| StockPagesError::ConfigInvalid {
        section: "sitemap".into(),
        key: "base_url".into(),
        reason: reason.into(),
    };

    let base = base_url.trim();
    if base.is_empty() {
        return Err(invalid("base URL is required (e.g. https://example.com)"));
    }
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(invalid("must start with http:// or https://"));
    }
    Ok(if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    })
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            let name = entry.file_name();
            if SKIPPED_DIRS.iter().any(|d| name == *d) {
                continue;
            }
            walk(&path, out)?;
        } else if file_type.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
        {
            out.push(path);
        }
    }
    Ok(())
}

fn relative_url_path(site_root: &Path, page: &Path) -> String {
    page.strip_prefix(site_root)
        .unwrap_or(page)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// All `.html` pages under `site_root`, shallow pages first, then by path.
pub fn collect_pages(site_root: &Path) -> Result<Vec<PathBuf>, StockPagesError> {
    let mut pages = Vec::new();
    walk(site_root, &mut pages)?;
    pages.sort_by_cached_key(|p| {
        let rel = relative_url_path(site_root, p);
        (rel.matches('/').count(), rel)
    });
    Ok(pages)
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn lastmod(path: &Path) -> std::io::Result<String> {
    let modified = fs::metadata(path)?.modified()?;
    Ok(DateTime::<Utc>::from(modified).date_naive().to_string())
}

pub fn build_sitemap_xml(
    site_root: &Path,
    base_url: &str,
    include_lastmod: bool,
) -> Result<String, StockPagesError> {
    let base = normalize_base_url(base_url)?;
    let pages = collect_pages(site_root)?;

    let mut lines = vec![
        r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string(),
        format!(r#"<urlset xmlns="{SITEMAP_NS}">"#),
    ];
    for page in &pages {
        let loc = format!("{base}{}", relative_url_path(site_root, page));
        lines.push("  <url>".into());
        lines.push(format!("    <loc>{}</loc>", xml_escape(&loc)));
        if include_lastmod {
            lines.push(format!("    <lastmod>{}</lastmod>", lastmod(page)?));
        }
        lines.push("  </url>".into());
    }
    lines.push("</urlset>".into());

    Ok(lines.join("\n") + "\n")
}
