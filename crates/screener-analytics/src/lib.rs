//! 스크리닝 분석.
//!
//! 이 crate는 다음을 제공합니다:
//! - 연율화 변동성 및 기준 분포 (`volatility`)
//! - 프로세스 단위 변동성 기준 서비스 (`benchmark`)
//! - 여섯 가지 스크리닝 기준 (`criteria`)
//! - 종목 평가 오케스트레이터 (`screener`)

pub mod benchmark;
pub mod criteria;
pub mod screener;
pub mod volatility;

#[cfg(test)]
pub(crate) mod testing;

pub use benchmark::VolatilityBenchmark;
pub use criteria::{CriteriaEngine, CriteriaReport, ScreeningInput, Verdict};
pub use screener::{Screener, EPS_PAYOUT_UNAVAILABLE, PROFIT_HISTORY_UNAVAILABLE};
pub use volatility::{
    annualized_volatility, daily_returns, BenchmarkDistribution, BenchmarkSummary,
    TRADING_DAYS_PER_YEAR,
};
