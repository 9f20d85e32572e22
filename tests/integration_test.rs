//! End-to-end tests of the metric pipeline: dataset port -> records -> peer
//! medians -> page render, using in-memory ports from `common`.

mod common;

use approx::assert_relative_eq;
use common::*;
use std::fs;
use stockpages::adapters::open_dataset;
use stockpages::cli::{self, RenderJob};
use stockpages::domain::comparison::{ComparisonSettings, Indicator, classify};
use stockpages::domain::error::StockPagesError;
use stockpages::domain::field::FieldId;
use stockpages::domain::peer_stats::PeerStatistics;
use stockpages::domain::record::Record;
use stockpages::domain::section::{Section, SectionScore, Tier};
use stockpages::domain::symbol::find_record;

fn loaded() -> (Vec<Record>, PeerStatistics) {
    cli::load_records(&MockDatasetPort::new(sample_table())).unwrap()
}

fn render(symbol: &str, prefix: &str) -> Option<String> {
    let (records, peers) = loaded();
    let settings = ComparisonSettings::default();
    let job = RenderJob {
        template: TEMPLATE,
        records: &records,
        peers: &peers,
        settings: &settings,
        asset_prefix: prefix,
    };
    cli::render_symbol(&job, symbol).unwrap()
}

mod loading {
    use super::*;

    #[test]
    fn blank_rows_are_dropped() {
        let (records, _) = loaded();
        let symbols: Vec<_> = records.iter().map(|r| r.symbol.clone().unwrap()).collect();
        assert_eq!(symbols, vec!["AAPL:US", "MSFT:US", "GOOG:US"]);
    }

    #[test]
    fn medians_are_computed_once_over_present_values() {
        let (_, peers) = loaded();
        assert_relative_eq!(peers.median(FieldId::InterestCoverageRatio).unwrap(), 10.0);
        assert_relative_eq!(peers.median(FieldId::LeverageRatio).unwrap(), 5.0);
        assert_relative_eq!(peers.median(FieldId::CurrentRatio).unwrap(), 1.65);
        assert_eq!(peers.median(FieldId::Peg), None);
        assert_eq!(peers.resolved_count(), 3);
    }

    #[test]
    fn dataset_errors_propagate() {
        let err = cli::load_records(&MockDatasetPort::failing("corrupt")).unwrap_err();
        assert!(matches!(err, StockPagesError::DatasetRead { .. }));
    }

    #[test]
    fn csv_file_loads_like_the_in_memory_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, SAMPLE_CSV).unwrap();

        let source = open_dataset(&path).unwrap();
        let (records, peers) = cli::load_records(source.as_ref()).unwrap();
        let (expected_records, expected_peers) = loaded();
        assert_eq!(records, expected_records);
        assert_eq!(peers, expected_peers);
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn workbook_loads_like_the_in_memory_table() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures/sample.xlsx");

        let source = open_dataset(&path).unwrap();
        let (records, peers) = cli::load_records(source.as_ref()).unwrap();
        let (expected_records, expected_peers) = loaded();
        assert_eq!(records, expected_records);
        assert_eq!(peers, expected_peers);
    }
}

mod scoring {
    use super::*;

    #[test]
    fn higher_and_lower_is_better_both_resolve_to_better() {
        let (records, peers) = loaded();
        let aapl = find_record(&records, "AAPL").unwrap();
        let settings = ComparisonSettings::default();

        // 12 against a median of 10, higher is better
        assert_eq!(
            classify(
                FieldId::InterestCoverageRatio,
                aapl.get(FieldId::InterestCoverageRatio),
                peers.median(FieldId::InterestCoverageRatio),
                &settings,
            ),
            Some(Indicator::Better)
        );
        // 4 against a median of 5, lower is better
        assert_eq!(
            classify(
                FieldId::LeverageRatio,
                aapl.get(FieldId::LeverageRatio),
                peers.median(FieldId::LeverageRatio),
                &settings,
            ),
            Some(Indicator::Better)
        );

        let score = SectionScore::for_section(Section::DebtService, aapl, &peers, &settings);
        assert_eq!(score, SectionScore { above: 2, total: 2 });
        assert_eq!(score.tier(), Tier::Good);
    }

    #[test]
    fn median_company_scores_poor() {
        let (records, peers) = loaded();
        let msft = find_record(&records, "MSFT:US").unwrap();
        let score = SectionScore::for_section(
            Section::DebtService,
            msft,
            &peers,
            &ComparisonSettings::default(),
        );
        assert_eq!(score, SectionScore { above: 0, total: 2 });
        assert_eq!(score.tier(), Tier::Poor);
    }

    #[test]
    fn section_without_data_is_mixed() {
        let (records, peers) = loaded();
        let score = SectionScore::for_section(
            Section::Valuation,
            &records[0],
            &peers,
            &ComparisonSettings::default(),
        );
        assert_eq!(score.total, 0);
        assert_eq!(score.tier(), Tier::Mixed);
    }
}

mod rendering {
    use super::*;

    #[test]
    fn full_page_for_a_strong_company() {
        let html = render("AAPL", "../").unwrap();

        assert!(html.contains("<title>Stock Details - AAPL</title>"));
        assert!(html.contains("<h1 id=\"stock-symbol-header\">AAPL</h1>"));
        assert!(html.contains("data-stock-symbol=\"AAPL\""));
        assert!(html.contains("data-prerendered=\"1\""));

        assert!(html.contains(
            "<span class=\"metric-indicator better\" aria-label=\"better\">▲</span>\
             <span class=\"metric-value metric-better\">4.00</span>"
        ));
        assert!(html.contains(
            "<span class=\"metric-indicator better\" aria-label=\"better\">▲</span>\
             <span class=\"metric-value metric-better\">12.00</span>"
        ));
        assert!(html.contains("<div id=\"leverage_ratio_median\">5.00</div>"));
        assert!(html.contains("<div id=\"interest_coverage_ratio_median\">10.00</div>"));

        assert!(html.contains(
            "<h2>Debt Service<span class=\"section-score good\">2/2 above median</span></h2>"
        ));
        assert!(html.contains("<span id=\"score-val-debt-service\">2/2</span>"));
        assert!(html.contains("style=\"width: 100%;\""));
        assert!(html.contains("<span id=\"score-label-debt-service\">Strong</span>"));
        assert!(html.contains("class=\"score-card status-good\""));
    }

    #[test]
    fn absent_metric_renders_not_available() {
        let html = render("AAPL:US", "").unwrap();
        assert!(html.contains(
            "<h2>Valuation<span class=\"section-score mixed\">0/0 above median</span></h2>"
        ));
        assert!(html.contains("<span class=\"metric-value\">N/A</span>"));
    }

    #[test]
    fn worse_metrics_for_a_weak_company() {
        let html = render("GOOG", "").unwrap();
        assert!(html.contains(
            "<span class=\"metric-indicator worse\" aria-label=\"worse\">▼</span>\
             <span class=\"metric-value metric-worse\">8.00</span>"
        ));
        assert!(html.contains("<span id=\"score-label-debt-service\">Weak</span>"));
        assert!(html.contains("class=\"score-card status-poor\""));
    }

    #[test]
    fn assets_follow_the_prefix() {
        let html = render("AAPL", "../").unwrap();
        assert!(html.contains("href=\"../styles.css\""));
        assert!(html.contains("src=\"../js/stock_details_page.js\""));
        assert!(html.contains("href=\"../index.html\""));
    }

    #[test]
    fn unknown_symbol_has_no_page() {
        assert!(render("TSLA", "").is_none());
    }

    #[test]
    fn rendering_twice_is_identical() {
        assert_eq!(render("AAPL", "../"), render("AAPL", "../"));
    }
}
