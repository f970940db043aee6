//! 스크리닝 결과 모델.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 스크리닝 기준.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// 최근 90일 평균 거래대금 하한
    MinimumLiquidity,
    /// 직전 분기 순이익 > 0
    PositiveLastQuarterProfit,
    /// 3년 연속 순이익 증가
    ThreeYearProfitGrowth,
    /// 배당성향 범위
    PayoutWithinBounds,
    /// 기준 바스켓 대비 변동성
    RelativeVolatility,
    /// 가중 배당수익률
    WeightedDividendYield,
}

impl Criterion {
    /// 평가 순서대로 나열한 전체 기준.
    pub const ALL: [Criterion; 6] = [
        Criterion::MinimumLiquidity,
        Criterion::PositiveLastQuarterProfit,
        Criterion::ThreeYearProfitGrowth,
        Criterion::PayoutWithinBounds,
        Criterion::RelativeVolatility,
        Criterion::WeightedDividendYield,
    ];

    /// 응답 JSON 필드명.
    pub fn key(&self) -> &'static str {
        match self {
            Self::MinimumLiquidity => "minimum_liquidity",
            Self::PositiveLastQuarterProfit => "positive_last_quarter_profit",
            Self::ThreeYearProfitGrowth => "three_year_profit_growth",
            Self::PayoutWithinBounds => "payout_within_bounds",
            Self::RelativeVolatility => "relative_volatility",
            Self::WeightedDividendYield => "weighted_dividend_yield",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 기준별 통과 여부.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaFlags {
    pub minimum_liquidity: bool,
    pub positive_last_quarter_profit: bool,
    pub three_year_profit_growth: bool,
    pub payout_within_bounds: bool,
    pub relative_volatility: bool,
    pub weighted_dividend_yield: bool,
}

impl CriteriaFlags {
    /// 기준 하나의 결과를 기록합니다.
    pub fn set(&mut self, criterion: Criterion, passed: bool) {
        match criterion {
            Criterion::MinimumLiquidity => self.minimum_liquidity = passed,
            Criterion::PositiveLastQuarterProfit => self.positive_last_quarter_profit = passed,
            Criterion::ThreeYearProfitGrowth => self.three_year_profit_growth = passed,
            Criterion::PayoutWithinBounds => self.payout_within_bounds = passed,
            Criterion::RelativeVolatility => self.relative_volatility = passed,
            Criterion::WeightedDividendYield => self.weighted_dividend_yield = passed,
        }
    }

    /// 기준 하나의 결과를 조회합니다.
    pub fn get(&self, criterion: Criterion) -> bool {
        match criterion {
            Criterion::MinimumLiquidity => self.minimum_liquidity,
            Criterion::PositiveLastQuarterProfit => self.positive_last_quarter_profit,
            Criterion::ThreeYearProfitGrowth => self.three_year_profit_growth,
            Criterion::PayoutWithinBounds => self.payout_within_bounds,
            Criterion::RelativeVolatility => self.relative_volatility,
            Criterion::WeightedDividendYield => self.weighted_dividend_yield,
        }
    }

    /// 모든 기준 통과 여부 (부분 점수 없음).
    pub fn all(&self) -> bool {
        Criterion::ALL.iter().all(|c| self.get(*c))
    }
}

/// 종목 하나의 스크리닝 결과.
///
/// 요청마다 생성되며 저장되지 않습니다. `all_criteria_met`은 항상 여섯 기준의 AND입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningResult {
    ticker: String,
    #[serde(flatten)]
    flags: CriteriaFlags,
    all_criteria_met: bool,
    errors: Vec<String>,
}

impl ScreeningResult {
    /// 기준별 결과와 에러 목록으로 결과를 생성합니다.
    pub fn new(ticker: impl Into<String>, flags: CriteriaFlags, errors: Vec<String>) -> Self {
        Self {
            ticker: ticker.into().to_uppercase(),
            all_criteria_met: flags.all(),
            flags,
            errors,
        }
    }

    /// 평가를 완료하지 못한 경우의 결과 (모든 기준 실패).
    pub fn failed(ticker: impl Into<String>, error: impl Into<String>) -> Self {
        Self::new(ticker, CriteriaFlags::default(), vec![error.into()])
    }

    /// 에러 메시지를 덧붙인 결과를 반환합니다.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.errors.push(error.into());
        self
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn flags(&self) -> &CriteriaFlags {
        &self.flags
    }

    pub fn passed(&self, criterion: Criterion) -> bool {
        self.flags.get(criterion)
    }

    pub fn all_criteria_met(&self) -> bool {
        self.all_criteria_met
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}
