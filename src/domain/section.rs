//! Section groupings and aggregate scoring.

use std::fmt;

use super::comparison::{ComparisonSettings, Indicator, classify};
use super::field::FieldId;
use super::peer_stats::PeerStatistics;
use super::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    BalanceSheetStrength,
    DebtService,
    Profitability,
    Valuation,
    Growth,
    GrahamValueInvestor,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::BalanceSheetStrength,
        Section::DebtService,
        Section::Profitability,
        Section::Valuation,
        Section::Growth,
        Section::GrahamValueInvestor,
    ];

    /// Element id of the section container in the page template.
    pub fn id(self) -> &'static str {
        match self {
            Section::BalanceSheetStrength => "balance-sheet-strength",
            Section::DebtService => "debt-service",
            Section::Profitability => "profitability",
            Section::Valuation => "valuation",
            Section::Growth => "growth",
            Section::GrahamValueInvestor => "graham-value-investor-indicator",
        }
    }

    pub fn fields(self) -> &'static [FieldId] {
        use FieldId::*;
        match self {
            Section::BalanceSheetStrength => &[
                TangEquityOverTotLiab,
                CapitalIntensityReverse,
                CagrTangibleBookPerShare,
                CagrCashAndEquiv,
                GoodwillToAssets,
            ],
            Section::DebtService => &[LeverageRatio, InterestCoverageRatio],
            Section::Profitability => &[
                RoeTangibleEquity,
                RoicOverWacc,
                RuleOf40,
                CashConversionRatio,
                Avg5yRoeGrowth,
            ],
            Section::Valuation => &[
                EarningsYield,
                PriceToEarnings,
                FcfYield,
                Peg,
                PriceToTangibleBook,
                RelativePeVsHistory,
            ],
            Section::Growth => &[
                Avg5yEpsGrowth,
                Avg5yRevenueGrowth,
                RevenueGrowthAcceleration,
                CagrSharesDiluted,
                ExpectedGrowthMarketCap10y,
                FinalEarnings10yGrowth10pct,
                FinalEarnings10yGrowth15pct,
                ImpliedPerpetualGrowth,
            ],
            Section::GrahamValueInvestor => &[
                CurrentRatio,
                NegativeEpsCount5y,
                EpsGrowth5yTotal,
                PeTimesPb,
            ],
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Good,
    Mixed,
    Poor,
}

impl Tier {
    /// CSS class fragment: `good`, `mixed` or `poor`.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Good => "good",
            Tier::Mixed => "mixed",
            Tier::Poor => "poor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Good => "Strong",
            Tier::Mixed => "Mixed",
            Tier::Poor => "Weak",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionScore {
    pub above: usize,
    pub total: usize,
}

impl SectionScore {
    /// Score a group of fields. Only resolvable comparisons count toward
    /// `total`; `above` counts the ones that came out better.
    pub fn compute(
        fields: &[FieldId],
        record: &Record,
        peers: &PeerStatistics,
        settings: &ComparisonSettings,
    ) -> Self {
        fields
            .iter()
            .filter_map(|&f| classify(f, record.get(f), peers.median(f), settings))
            .fold(Self::default(), |mut score, ind| {
                score.total += 1;
                if ind == Indicator::Better {
                    score.above += 1;
                }
                score
            })
    }

    pub fn for_section(
        section: Section,
        record: &Record,
        peers: &PeerStatistics,
        settings: &ComparisonSettings,
    ) -> Self {
        Self::compute(section.fields(), record, peers, settings)
    }

    pub fn tier(&self) -> Tier {
        if self.total == 0 {
            return Tier::Mixed;
        }
        let ratio = self.above as f64 / self.total as f64;
        if ratio >= 0.7 {
            Tier::Good
        } else if ratio >= 0.4 {
            Tier::Mixed
        } else {
            Tier::Poor
        }
    }

    /// Share of fields above the peer median, 0-100. Zero when nothing resolved.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.above as f64 / self.total as f64 * 100.0
        }
    }
}
