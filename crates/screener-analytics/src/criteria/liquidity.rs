//! 최소 유동성 기준.

use rust_decimal::Decimal;
use screener_core::DailyBar;

use super::Verdict;

/// 평균 거래대금 (종가 × 거래량의 평균).
pub fn average_financial_volume(bars: &[DailyBar]) -> Option<Decimal> {
    if bars.is_empty() {
        return None;
    }

    let total: Decimal = bars.iter().map(DailyBar::financial_volume).sum();
    Some(total / Decimal::from(bars.len()))
}

/// 평균 거래대금이 `min_average` 이상인지 판정합니다.
pub fn minimum_liquidity(bars: &[DailyBar], min_average: Decimal) -> Verdict {
    match average_financial_volume(bars) {
        Some(average) => {
            tracing::debug!(average = %average, min = %min_average, "평균 거래대금");
            Verdict::from_bool(average >= min_average)
        }
        None => Verdict::insufficient("no trading data for the liquidity window"),
    }
}
