//! Tracked financial metrics and their fixed evaluation table.
//!
//! Every component consults [`FieldId::spec`] for polarity, threshold rule
//! and display format instead of keeping its own membership lists.

use std::fmt;
use std::str::FromStr;

use super::comparison::Indicator;

pub const FIELD_COUNT: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    TangEquityOverTotLiab,
    CapitalIntensityReverse,
    CagrTangibleBookPerShare,
    CagrCashAndEquiv,
    GoodwillToAssets,
    LeverageRatio,
    InterestCoverageRatio,
    RoeTangibleEquity,
    RoicOverWacc,
    RuleOf40,
    CashConversionRatio,
    EarningsYield,
    PriceToEarnings,
    FcfYield,
    Peg,
    PriceToTangibleBook,
    RelativePeVsHistory,
    Avg5yEpsGrowth,
    Avg5yRevenueGrowth,
    RevenueGrowthAcceleration,
    CagrSharesDiluted,
    ExpectedGrowthMarketCap10y,
    FinalEarnings10yGrowth10pct,
    FinalEarnings10yGrowth15pct,
    Avg5yRoeGrowth,
    ImpliedPerpetualGrowth,
    CurrentRatio,
    NegativeEpsCount5y,
    EpsGrowth5yTotal,
    PeTimesPb,
}

/// Which direction of deviation from the peer median is favourable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
    Neutral,
}

/// Display format applied to a metric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatClass {
    /// Two decimals, e.g. `1.23`.
    Ratio,
    /// Value x100 with two decimals and a `%` suffix.
    Percent,
    /// Whole number.
    Count,
    /// Value / 1e9 with two decimals and a `B` suffix.
    Billions,
    /// Value x100 with two decimals, no suffix.
    Score,
    /// Thousands-grouped with two decimals.
    Grouped,
}

/// Absolute classification that ignores the peer median.
pub type ThresholdRule = fn(f64) -> Indicator;

#[derive(Clone, Copy)]
pub struct FieldSpec {
    pub id: FieldId,
    pub name: &'static str,
    pub polarity: Polarity,
    pub threshold: Option<ThresholdRule>,
    pub format: FormatClass,
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("id", &self.id)
            .field("polarity", &self.polarity)
            .field("threshold", &self.threshold.is_some())
            .field("format", &self.format)
            .finish()
    }
}

fn current_ratio_rule(v: f64) -> Indicator {
    if v >= 1.5 { Indicator::Better } else { Indicator::Worse }
}

fn negative_eps_rule(v: f64) -> Indicator {
    if v == 0.0 { Indicator::Better } else { Indicator::Worse }
}

fn eps_growth_rule(v: f64) -> Indicator {
    if v > 1.0 { Indicator::Better } else { Indicator::Worse }
}

fn pe_times_pb_rule(v: f64) -> Indicator {
    if v < 30.0 { Indicator::Better } else { Indicator::Worse }
}

const fn spec(
    id: FieldId,
    name: &'static str,
    polarity: Polarity,
    format: FormatClass,
) -> FieldSpec {
    FieldSpec {
        id,
        name,
        polarity,
        threshold: None,
        format,
    }
}

const fn with_rule(mut s: FieldSpec, rule: ThresholdRule) -> FieldSpec {
    s.threshold = Some(rule);
    s
}

use FieldId::*;
use FormatClass::*;
use Polarity::*;

/// The contractual field table, in dataset column order.
static FIELD_TABLE: [FieldSpec; FIELD_COUNT] = [
    spec(TangEquityOverTotLiab, "tang_equity_over_tot_liab", HigherIsBetter, Ratio),
    spec(CapitalIntensityReverse, "capital_intensity_reverse", HigherIsBetter, Ratio),
    spec(CagrTangibleBookPerShare, "cagr_tangible_book_per_share", HigherIsBetter, Percent),
    spec(CagrCashAndEquiv, "cagr_cash_and_equiv", HigherIsBetter, Percent),
    spec(GoodwillToAssets, "goodwill_to_assets", LowerIsBetter, Percent),
    spec(LeverageRatio, "leverage_ratio", LowerIsBetter, Ratio),
    spec(InterestCoverageRatio, "interest_coverage_ratio", HigherIsBetter, Ratio),
    spec(RoeTangibleEquity, "roe_tangible_equity", HigherIsBetter, Percent),
    spec(RoicOverWacc, "roic_over_wacc", HigherIsBetter, Ratio),
    spec(RuleOf40, "rule_of_40", HigherIsBetter, Score),
    spec(CashConversionRatio, "cash_conversion_ratio", HigherIsBetter, Percent),
    spec(EarningsYield, "earnings_yield", HigherIsBetter, Percent),
    spec(PriceToEarnings, "price_to_earnings", LowerIsBetter, Ratio),
    spec(FcfYield, "fcf_yield", HigherIsBetter, Percent),
    spec(Peg, "peg", LowerIsBetter, Ratio),
    spec(PriceToTangibleBook, "price_to_tangible_book", LowerIsBetter, Ratio),
    spec(RelativePeVsHistory, "relative_PE_vs_history", LowerIsBetter, Ratio),
    spec(Avg5yEpsGrowth, "avg_5years_eps_growth", HigherIsBetter, Percent),
    spec(Avg5yRevenueGrowth, "avg_5years_revenue_growth", HigherIsBetter, Percent),
    spec(RevenueGrowthAcceleration, "revenue_growth_acceleration", HigherIsBetter, Percent),
    spec(CagrSharesDiluted, "cagr_shares_diluted", LowerIsBetter, Percent),
    spec(ExpectedGrowthMarketCap10y, "expected_growth_market_cap_10Y", HigherIsBetter, Percent),
    spec(FinalEarnings10yGrowth10pct, "final_earnings_for_10y_growth_10perc", LowerIsBetter, Billions),
    spec(FinalEarnings10yGrowth15pct, "final_earnings_for_10y_growth_15perc", LowerIsBetter, Billions),
    spec(Avg5yRoeGrowth, "avg_5years_roe_growth", HigherIsBetter, Percent),
    spec(ImpliedPerpetualGrowth, "implied_perpetual_growth_curr_market_cap", LowerIsBetter, Percent),
    with_rule(spec(CurrentRatio, "current_ratio", HigherIsBetter, Ratio), current_ratio_rule),
    with_rule(spec(NegativeEpsCount5y, "negative_eps_count_5y", LowerIsBetter, Count), negative_eps_rule),
    with_rule(spec(EpsGrowth5yTotal, "eps_growth_5y_total", Neutral, Percent), eps_growth_rule),
    with_rule(spec(PeTimesPb, "pe_times_pb", Neutral, Ratio), pe_times_pb_rule),
];

impl FieldId {
    pub const ALL: [FieldId; FIELD_COUNT] = [
        TangEquityOverTotLiab,
        CapitalIntensityReverse,
        CagrTangibleBookPerShare,
        CagrCashAndEquiv,
        GoodwillToAssets,
        LeverageRatio,
        InterestCoverageRatio,
        RoeTangibleEquity,
        RoicOverWacc,
        RuleOf40,
        CashConversionRatio,
        EarningsYield,
        PriceToEarnings,
        FcfYield,
        Peg,
        PriceToTangibleBook,
        RelativePeVsHistory,
        Avg5yEpsGrowth,
        Avg5yRevenueGrowth,
        RevenueGrowthAcceleration,
        CagrSharesDiluted,
        ExpectedGrowthMarketCap10y,
        FinalEarnings10yGrowth10pct,
        FinalEarnings10yGrowth15pct,
        Avg5yRoeGrowth,
        ImpliedPerpetualGrowth,
        CurrentRatio,
        NegativeEpsCount5y,
        EpsGrowth5yTotal,
        PeTimesPb,
    ];

    pub fn spec(self) -> &'static FieldSpec {
        &FIELD_TABLE[self.index()]
    }

    /// Position of this field in [`FieldId::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name in the dataset and element id in the page template.
    pub fn as_str(self) -> &'static str {
        self.spec().name
    }

    pub fn polarity(self) -> Polarity {
        self.spec().polarity
    }

    pub fn threshold(self) -> Option<ThresholdRule> {
        self.spec().threshold
    }

    pub fn format_class(self) -> FormatClass {
        self.spec().format
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FieldId {
    type Err = UnknownField;

    /// Exact, case-sensitive match against the column name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FIELD_TABLE
            .iter()
            .find(|spec| spec.name == s)
            .map(|spec| spec.id)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
