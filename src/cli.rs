//! CLI definition, option resolution and pipeline dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::html_page::{self, PageContext};
use crate::adapters::open_dataset;
use crate::adapters::page_store_adapter::DirectoryPageStore;
use crate::adapters::rankings_adapter::load_ranked_symbols;
use crate::adapters::sitemap_adapter::build_sitemap_xml;
use crate::domain::batch::{RunSummary, asset_prefix, expected_file_names, resolve_batch_symbols};
use crate::domain::comparison::ComparisonSettings;
use crate::domain::dataset::build_records;
use crate::domain::error::StockPagesError;
use crate::domain::peer_stats::PeerStatistics;
use crate::domain::record::Record;
use crate::domain::symbol::{find_record, normalize, page_file_name};
use crate::ports::config_port::ConfigPort;
use crate::ports::dataset_port::DatasetPort;
use crate::ports::page_port::PagePort;

pub const DEFAULT_SYMBOL: &str = "AAPL";
pub const DEFAULT_TEMPLATE: &str = "stock-details.html";
pub const DEFAULT_DATASET: &str = "data/financials_analysis_dashboard_offset_0.xlsx";
pub const DEFAULT_RANKINGS: &str = "rank_companies/rank_companies.json";
pub const DEFAULT_OUT_DIR: &str = "stocks";
pub const DEFAULT_SITEMAP_OUT: &str = "sitemap.xml";

#[derive(Parser, Debug)]
#[command(name = "stockpages", about = "Pre-render crawlable stock detail pages")]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render one page, or one page per ranked symbol
    Render {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory the site is served from; relative paths resolve against it
        #[arg(long, default_value = ".")]
        site_root: PathBuf,
        #[arg(short, long)]
        symbol: Option<String>,
        #[arg(long)]
        all_from_rankings: bool,
        #[arg(long)]
        rankings_json: Option<PathBuf>,
        /// Batch size cap; negative values render nothing
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
        /// Keep stale pages in the output directory
        #[arg(long)]
        no_clean: bool,
        #[arg(short, long)]
        template: Option<PathBuf>,
        #[arg(short, long, alias = "xlsx")]
        dataset: Option<PathBuf>,
        /// Output file for single-symbol mode
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Write sitemap.xml for every page under the site root
    Sitemap {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, default_value = ".")]
        site_root: PathBuf,
        #[arg(long)]
        base_url: Option<String>,
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long)]
        no_lastmod: bool,
    },
}

pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Render {
            config,
            site_root,
            symbol,
            all_from_rankings,
            rankings_json,
            limit,
            no_clean,
            template,
            dataset,
            out,
            out_dir,
        } => load_config(config.as_ref()).and_then(|adapter| {
            let overrides = RenderOverrides {
                symbol,
                all_from_rankings,
                rankings_json,
                limit,
                no_clean,
                template,
                dataset,
                out,
                out_dir,
            };
            let options = build_render_options(&site_root, overrides, &adapter)?;
            run_render(&options)
        }),
        Command::Sitemap {
            config,
            site_root,
            base_url,
            out,
            no_lastmod,
        } => load_config(config.as_ref()).and_then(|adapter| {
            run_sitemap(&site_root, base_url, out, no_lastmod, &adapter)
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, StockPagesError> {
    let Some(path) = path else {
        return Ok(FileConfigAdapter::empty());
    };
    info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

/// Values given on the command line; each one wins over the config file.
#[derive(Debug, Default, Clone)]
pub struct RenderOverrides {
    pub symbol: Option<String>,
    pub all_from_rankings: bool,
    pub rankings_json: Option<PathBuf>,
    pub limit: Option<i64>,
    pub no_clean: bool,
    pub template: Option<PathBuf>,
    pub dataset: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderMode {
    Single { symbol: String, out: Option<PathBuf> },
    Batch { limit: Option<usize>, clean: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub site_root: PathBuf,
    pub template: PathBuf,
    pub dataset: PathBuf,
    pub rankings: PathBuf,
    pub out_dir: PathBuf,
    pub asset_prefix: String,
    pub mode: RenderMode,
    pub settings: ComparisonSettings,
}

fn resolve_path(
    site_root: &Path,
    cli_value: Option<PathBuf>,
    config: &dyn ConfigPort,
    key: &str,
    default: &str,
) -> PathBuf {
    let path = cli_value
        .or_else(|| config.get_string("paths", key).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default));
    site_root.join(path)
}

pub fn build_comparison_settings(
    config: &dyn ConfigPort,
) -> Result<ComparisonSettings, StockPagesError> {
    let margin = config.get_double("comparison", "near_zero_margin", 0.0);
    if !margin.is_finite() || margin < 0.0 {
        return Err(StockPagesError::ConfigInvalid {
            section: "comparison".into(),
            key: "near_zero_margin".into(),
            reason: "must be a non-negative number".into(),
        });
    }
    Ok(ComparisonSettings {
        near_zero_margin: margin,
    })
}

pub fn build_render_options(
    site_root: &Path,
    overrides: RenderOverrides,
    config: &dyn ConfigPort,
) -> Result<RenderOptions, StockPagesError> {
    let settings = build_comparison_settings(config)?;
    let site_root = &std::path::absolute(site_root)?;

    let out_dir_rel = overrides
        .out_dir
        .or_else(|| config.get_string("paths", "out_dir").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
    let prefix = asset_prefix(site_root, &out_dir_rel);

    let mode = if overrides.all_from_rankings {
        // The flag clamps at zero; an unset or negative config value means no cap.
        let limit = match overrides.limit {
            Some(l) => Some(usize::try_from(l.max(0)).unwrap_or(usize::MAX)),
            None => usize::try_from(config.get_int("batch", "limit", -1)).ok(),
        };
        RenderMode::Batch {
            limit,
            clean: !overrides.no_clean && config.get_bool("batch", "clean", true),
        }
    } else {
        let raw = overrides.symbol.unwrap_or_else(|| DEFAULT_SYMBOL.to_string());
        let symbol = normalize(&raw);
        if symbol.is_empty() {
            return Err(StockPagesError::SymbolRequired);
        }
        RenderMode::Single {
            symbol,
            out: overrides.out.map(|p| site_root.join(p)),
        }
    };

    Ok(RenderOptions {
        site_root: site_root.to_path_buf(),
        template: resolve_path(site_root, overrides.template, config, "template", DEFAULT_TEMPLATE),
        dataset: resolve_path(site_root, overrides.dataset, config, "dataset", DEFAULT_DATASET),
        rankings: resolve_path(
            site_root,
            overrides.rankings_json,
            config,
            "rankings",
            DEFAULT_RANKINGS,
        ),
        out_dir: site_root.join(out_dir_rel),
        asset_prefix: prefix,
        mode,
        settings,
    })
}

/// Shared, read-only inputs for every page in a run.
pub struct RenderJob<'a> {
    pub template: &'a str,
    pub records: &'a [Record],
    pub peers: &'a PeerStatistics,
    pub settings: &'a ComparisonSettings,
    pub asset_prefix: &'a str,
}

/// Render the page for `symbol`, or `None` when no record matches.
pub fn render_symbol(job: &RenderJob<'_>, symbol: &str) -> Result<Option<String>, StockPagesError> {
    let Some(record) = find_record(job.records, symbol) else {
        return Ok(None);
    };
    let ctx = PageContext {
        symbol,
        record,
        peers: job.peers,
        settings: job.settings,
        asset_prefix: job.asset_prefix,
    };
    html_page::render(job.template, &ctx).map(Some)
}

/// Delete pages that the current batch will not produce. A failed deletion
/// is logged and counted; it never stops the run.
pub fn clean_stale_pages(
    store: &dyn PagePort,
    symbols: &[String],
    summary: &mut RunSummary,
) -> Result<(), StockPagesError> {
    let expected = expected_file_names(symbols);
    for name in store.list_pages()? {
        if expected.contains(&name) {
            continue;
        }
        match store.remove_page(&name) {
            Ok(()) => {
                debug!("Removed stale page {name}");
                summary.deleted += 1;
            }
            Err(e) => {
                warn!("could not remove stale page {name}: {e}");
                summary.delete_failed += 1;
            }
        }
    }
    if summary.deleted > 0 {
        info!("Cleaned: removed {} stale page(s)", summary.deleted);
    }
    Ok(())
}

/// Render every symbol into `store`. Unmatched symbols are counted as
/// missing and skipped.
pub fn run_batch_pipeline(
    job: &RenderJob<'_>,
    symbols: &[String],
    store: &dyn PagePort,
    clean: bool,
) -> Result<RunSummary, StockPagesError> {
    let mut summary = RunSummary::default();

    if clean {
        clean_stale_pages(store, symbols, &mut summary)?;
    }

    for symbol in symbols {
        match render_symbol(job, symbol)? {
            Some(html) => {
                let path = store.write_page(&page_file_name(symbol), &html)?;
                info!("Wrote: {}", path.display());
                summary.generated += 1;
            }
            None => {
                warn!("{symbol}: not found in dataset");
                summary.missing += 1;
            }
        }
    }
    Ok(summary)
}

/// Load every record from `source` and compute the peer medians once.
pub fn load_records(
    source: &dyn DatasetPort,
) -> Result<(Vec<Record>, PeerStatistics), StockPagesError> {
    let table = source.load_table()?;
    let records = build_records(&table);
    let peers = PeerStatistics::compute(&records);
    info!(
        "Loaded {} records; medians available for {} fields",
        records.len(),
        peers.resolved_count()
    );
    Ok((records, peers))
}

fn require_file(path: &Path, what: &'static str) -> Result<(), StockPagesError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(StockPagesError::InputMissing {
            what,
            path: path.display().to_string(),
        })
    }
}

pub fn run_render(options: &RenderOptions) -> Result<(), StockPagesError> {
    // Stage 1: required inputs
    require_file(&options.template, "template")?;
    require_file(&options.dataset, "dataset")?;

    let template = fs::read_to_string(&options.template)?;

    // Stage 2: load records and compute peer medians once
    info!("Loading dataset from {}", options.dataset.display());
    let (records, peers) = load_records(open_dataset(&options.dataset)?.as_ref())?;

    let job = RenderJob {
        template: &template,
        records: &records,
        peers: &peers,
        settings: &options.settings,
        asset_prefix: &options.asset_prefix,
    };

    // Stage 3: render
    match &options.mode {
        RenderMode::Single { symbol, out } => {
            let (store, file_name) = match out {
                Some(path) => single_target(path, symbol),
                None => (
                    DirectoryPageStore::new(options.out_dir.clone()),
                    page_file_name(symbol),
                ),
            };
            let html = render_symbol(&job, symbol)?.ok_or_else(|| {
                StockPagesError::SymbolNotFound {
                    symbol: symbol.clone(),
                }
            })?;
            let path = store.write_page(&file_name, &html)?;
            info!("Wrote: {}", path.display());
            Ok(())
        }
        RenderMode::Batch { limit, clean } => {
            let ranked = load_ranked_symbols(&options.rankings)?;
            let symbols = resolve_batch_symbols(&ranked, *limit);
            let store = DirectoryPageStore::new(options.out_dir.clone());

            info!(
                "Batch prerender: {} symbols -> {}",
                symbols.len(),
                store.dir().display()
            );
            let summary = run_batch_pipeline(&job, &symbols, &store, *clean)?;
            if summary.delete_failed > 0 {
                warn!("{} stale page(s) could not be removed", summary.delete_failed);
            }
            info!(
                "Done. Generated: {}. Missing in dataset: {}.",
                summary.generated, summary.missing
            );
            Ok(())
        }
    }
}

fn single_target(path: &Path, symbol: &str) -> (DirectoryPageStore, String) {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| page_file_name(symbol));
    (DirectoryPageStore::new(dir), name)
}

pub fn run_sitemap(
    site_root: &Path,
    base_url: Option<String>,
    out: Option<PathBuf>,
    no_lastmod: bool,
    config: &dyn ConfigPort,
) -> Result<(), StockPagesError> {
    let base_url = base_url
        .or_else(|| config.get_string("sitemap", "base_url"))
        .ok_or_else(|| StockPagesError::ConfigMissing {
            section: "sitemap".into(),
            key: "base_url".into(),
        })?;
    let include_lastmod = !no_lastmod && config.get_bool("sitemap", "lastmod", true);
    let out = out
        .or_else(|| config.get_string("sitemap", "out").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SITEMAP_OUT));
    let out_path = site_root.join(out);

    let xml = build_sitemap_xml(site_root, &base_url, include_lastmod)?;
    fs::write(&out_path, xml)?;
    info!("Wrote: {}", out_path.display());
    Ok(())
}
