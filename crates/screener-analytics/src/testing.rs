//! 테스트용 in-memory Provider와 시계열 생성기.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use screener_core::{DailyBar, DailySeries, Ticker};
use screener_data::{DataError, MarketDataProvider};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// 오늘까지 `days`일 동안 종가가 100과 `100 × (1 + amplitude)` 사이를 오가는 시계열.
pub(crate) fn sample_series(ticker: Ticker, days: i64, amplitude: f64, volume: i64) -> DailySeries {
    let high = Decimal::ONE_HUNDRED
        + Decimal::from_f64_retain(amplitude * 100.0).unwrap_or_default();
    let end = today();

    let bars = (0..days)
        .map(|i| {
            let date = end - Duration::days(days - 1 - i);
            let close = if i % 2 == 0 { Decimal::ONE_HUNDRED } else { high };
            DailyBar::from_close(date, close, Decimal::from(volume))
        })
        .collect();

    DailySeries::new(ticker, bars, Vec::new())
}

/// 등록된 시계열을 그대로 반환하는 Provider. 미등록 종목은 `NoData`.
#[derive(Default)]
pub(crate) struct FakeMarketData {
    series: Mutex<HashMap<Ticker, DailySeries>>,
    calls: AtomicUsize,
}

impl FakeMarketData {
    pub(crate) fn insert(&self, series: DailySeries) {
        self.series
            .lock()
            .unwrap()
            .insert(series.ticker.clone(), series);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for FakeMarketData {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_daily(
        &self,
        ticker: &Ticker,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> screener_data::Result<DailySeries> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // 동시 호출이 서로 끼어들 수 있게 양보
        tokio::task::yield_now().await;

        self.series
            .lock()
            .unwrap()
            .get(ticker)
            .cloned()
            .ok_or_else(|| DataError::NoData(ticker.to_string()))
    }
}
