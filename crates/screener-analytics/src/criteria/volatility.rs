//! 상대 변동성 기준.

use rust_decimal::Decimal;

use super::Verdict;
use crate::volatility::{annualized_volatility, BenchmarkDistribution};

/// 종가 시계열의 변동성이 기준 분포의 `percentile` 분위수보다 낮은지 판정합니다.
pub fn relative_volatility(
    closes: &[Decimal],
    benchmark: &BenchmarkDistribution,
    percentile: f64,
) -> Verdict {
    relative_volatility_of(annualized_volatility(closes), benchmark, percentile)
}

/// 계산된 변동성으로 판정합니다. 분포가 비어 있으면 판정 불가.
pub fn relative_volatility_of(
    volatility: Option<f64>,
    benchmark: &BenchmarkDistribution,
    percentile: f64,
) -> Verdict {
    let Some(volatility) = volatility else {
        return Verdict::insufficient("not enough price history to compute volatility");
    };
    let Some(threshold) = benchmark.quantile(percentile) else {
        return Verdict::insufficient("volatility benchmark unavailable");
    };

    tracing::debug!(volatility, threshold, percentile, "변동성 비교");
    Verdict::from_bool(volatility < threshold)
}
