//! 스크리닝 기준 평가.
//!
//! 여섯 기준은 서로 독립적으로 평가되며, 하나가 실패해도 나머지는 모두 평가합니다.
//! 입력이 없으면 `Insufficient`로 판정되고 통과하지 못한 것으로 취급합니다.

mod dividend;
mod liquidity;
mod payout;
mod profit;
mod volatility;

pub use dividend::{weighted_dividend_yield, DividendWindows};
pub use liquidity::{average_financial_volume, minimum_liquidity};
pub use payout::payout_within_bounds;
pub use profit::{positive_last_quarter_profit, three_year_profit_growth};
pub use volatility::{relative_volatility, relative_volatility_of};

use chrono::{Duration, NaiveDate};
use screener_core::{
    CriteriaConfig, CriteriaFlags, Criterion, DailySeries, FinancialHistory, FundamentalRecord,
    PeriodWeights,
};
use std::fmt;

use crate::volatility::BenchmarkDistribution;

/// 기준 하나의 판정.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// 통과
    Pass,
    /// 입력은 충분하지만 기준 미달
    Fail,
    /// 입력 부족으로 판정 불가 (사유 포함)
    Insufficient(String),
}

impl Verdict {
    /// 조건식 결과로 판정을 생성합니다.
    pub fn from_bool(passed: bool) -> Self {
        if passed {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    pub fn insufficient(reason: impl Into<String>) -> Self {
        Self::Insufficient(reason.into())
    }

    /// 통과 여부. `Insufficient`는 실패입니다.
    pub fn passed(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// 판정 불가 사유.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Insufficient(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Fail => write!(f, "fail"),
            Self::Insufficient(reason) => write!(f, "insufficient: {}", reason),
        }
    }
}

/// 한 종목의 평가 입력.
#[derive(Debug, Clone, Copy)]
pub struct ScreeningInput<'a> {
    pub fundamentals: &'a FundamentalRecord,
    pub history: &'a FinancialHistory,
    pub series: &'a DailySeries,
    pub benchmark: &'a BenchmarkDistribution,
    pub weights: &'a PeriodWeights,
    /// 평가 기준일
    pub as_of: NaiveDate,
}

/// 기준별 판정 결과.
#[derive(Debug, Clone)]
pub struct CriteriaReport {
    verdicts: Vec<(Criterion, Verdict)>,
}

impl CriteriaReport {
    /// 평가 순서대로의 판정.
    pub fn verdicts(&self) -> &[(Criterion, Verdict)] {
        &self.verdicts
    }

    pub fn verdict(&self, criterion: Criterion) -> Option<&Verdict> {
        self.verdicts
            .iter()
            .find(|(c, _)| *c == criterion)
            .map(|(_, v)| v)
    }

    /// 통과 여부 플래그.
    pub fn flags(&self) -> CriteriaFlags {
        let mut flags = CriteriaFlags::default();
        for (criterion, verdict) in &self.verdicts {
            flags.set(*criterion, verdict.passed());
        }
        flags
    }
}

/// 설정된 임계값으로 여섯 기준을 평가하는 엔진.
#[derive(Debug, Clone, Default)]
pub struct CriteriaEngine {
    config: CriteriaConfig,
}

impl CriteriaEngine {
    pub fn new(config: CriteriaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CriteriaConfig {
        &self.config
    }

    /// 기본 구간 가중치.
    pub fn default_weights(&self) -> PeriodWeights {
        self.config.default_weights
    }

    /// 여섯 기준을 모두 평가합니다.
    pub fn evaluate(&self, input: &ScreeningInput<'_>) -> CriteriaReport {
        let config = &self.config;

        let liquidity_start = input.as_of - Duration::days(config.liquidity_lookback_days);
        let volatility_start = input.as_of - Duration::days(config.volatility_lookback_days);

        let verdicts = vec![
            (
                Criterion::MinimumLiquidity,
                minimum_liquidity(input.series.bars_since(liquidity_start), config.min_liquidity),
            ),
            (
                Criterion::PositiveLastQuarterProfit,
                positive_last_quarter_profit(input.history.last_quarter_profit()),
            ),
            (
                Criterion::ThreeYearProfitGrowth,
                three_year_profit_growth(input.history.annual_profits()),
            ),
            (
                Criterion::PayoutWithinBounds,
                payout_within_bounds(
                    input.fundamentals.payout_ratio,
                    config.min_payout,
                    config.max_payout,
                ),
            ),
            (
                Criterion::RelativeVolatility,
                relative_volatility(
                    &input.series.closes_since(volatility_start),
                    input.benchmark,
                    config.volatility_percentile,
                ),
            ),
            (
                Criterion::WeightedDividendYield,
                weighted_dividend_yield(
                    input.series,
                    input.as_of,
                    input.weights,
                    config.min_dividend_yield,
                ),
            ),
        ];

        for (criterion, verdict) in &verdicts {
            tracing::debug!(criterion = %criterion, verdict = %verdict, "기준 평가");
        }

        CriteriaReport { verdicts }
    }
}
