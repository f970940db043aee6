//! 가중 배당수익률 기준.
//!
//! 최근 36개월을 12개월(365일) 단위 세 구간으로 나눠 구간별 배당 합계를
//! 현재가로 나눈 뒤 가중 합산합니다.

use chrono::{Duration, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use screener_core::{DailySeries, DividendEvent, PeriodWeights};

use super::Verdict;

const WINDOW_DAYS: i64 = 365;

/// 구간별 배당 합계.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DividendWindows {
    /// `[as_of-12m, as_of]`
    pub last_12m: Decimal,
    /// `[as_of-24m, as_of-12m)`
    pub last_24m: Decimal,
    /// `[as_of-36m, as_of-24m)`
    pub last_36m: Decimal,
}

impl DividendWindows {
    /// 배당 이벤트를 구간별로 합산합니다. `as_of` 이후 이벤트는 제외됩니다.
    pub fn from_events(events: &[DividendEvent], as_of: NaiveDate) -> Self {
        let b12 = as_of - Duration::days(WINDOW_DAYS);
        let b24 = as_of - Duration::days(WINDOW_DAYS * 2);
        let b36 = as_of - Duration::days(WINDOW_DAYS * 3);

        let mut windows = Self::default();
        for event in events.iter().filter(|e| e.date <= as_of) {
            if event.date >= b12 {
                windows.last_12m += event.amount;
            } else if event.date >= b24 {
                windows.last_24m += event.amount;
            } else if event.date >= b36 {
                windows.last_36m += event.amount;
            }
        }

        windows
    }

    /// 현재가 기준 구간별 수익률. 가격이 0 이하면 `None`.
    pub fn yields(&self, price: Decimal) -> Option<[f64; 3]> {
        if price <= Decimal::ZERO {
            return None;
        }

        Some([
            (self.last_12m / price).to_f64()?,
            (self.last_24m / price).to_f64()?,
            (self.last_36m / price).to_f64()?,
        ])
    }

    /// 가중 수익률 (`Σ yield_i × w_i`).
    pub fn weighted_yield(&self, price: Decimal, weights: &PeriodWeights) -> Option<f64> {
        let yields = self.yields(price)?;
        Some(
            yields
                .iter()
                .zip(weights.as_array())
                .map(|(y, w)| y * w)
                .sum(),
        )
    }
}

/// 가중 배당수익률이 `min_yield` 이상인지 판정합니다.
pub fn weighted_dividend_yield(
    series: &DailySeries,
    as_of: NaiveDate,
    weights: &PeriodWeights,
    min_yield: f64,
) -> Verdict {
    let Some(price) = series.last_close() else {
        return Verdict::insufficient("current price unavailable");
    };

    let windows = DividendWindows::from_events(series.dividends(), as_of);
    let Some(weighted) = windows.weighted_yield(price, weights) else {
        return Verdict::insufficient("current price is zero");
    };

    tracing::debug!(
        price = %price,
        d12 = %windows.last_12m,
        d24 = %windows.last_24m,
        d36 = %windows.last_36m,
        weighted,
        "가중 배당수익률"
    );

    Verdict::from_bool(weighted >= min_yield)
}
