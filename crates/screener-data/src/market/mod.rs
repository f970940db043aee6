//! 시세 데이터 Provider.
//!
//! - `MarketDataProvider`: 종목별 일봉+배당 시계열 조회
//! - `YahooMarketData`: Yahoo Finance 구현 (`.SA` 심볼)

pub mod yahoo;

pub use yahoo::YahooMarketData;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::join_all;
use rust_decimal::Decimal;
use screener_core::{DailySeries, Ticker};
use std::collections::BTreeMap;

use crate::error::Result;

/// 일봉 시세 Provider.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Provider 이름.
    fn name(&self) -> &str;

    /// `start..=end` 구간의 일봉과 배당 이벤트 조회.
    async fn fetch_daily(&self, ticker: &Ticker, start: NaiveDate, end: NaiveDate)
        -> Result<DailySeries>;

    /// 여러 종목의 종가를 한 번에 조회합니다.
    ///
    /// 조회에 실패했거나 일봉이 없는 종목은 결과에서 빠집니다.
    async fn fetch_closes(
        &self,
        tickers: &[Ticker],
        start: NaiveDate,
        end: NaiveDate,
    ) -> BTreeMap<Ticker, Vec<Decimal>> {
        let results = join_all(
            tickers
                .iter()
                .map(|ticker| async move { (ticker, self.fetch_daily(ticker, start, end).await) }),
        )
        .await;

        let mut closes = BTreeMap::new();
        for (ticker, result) in results {
            match result {
                Ok(series) if !series.is_empty() => {
                    closes.insert(ticker.clone(), series.closes_since(start));
                }
                Ok(_) => {
                    tracing::warn!(provider = self.name(), ticker = %ticker, "일봉 없음");
                }
                Err(e) => {
                    tracing::warn!(
                        provider = self.name(),
                        ticker = %ticker,
                        error = %e,
                        "종가 조회 실패"
                    );
                }
            }
        }

        closes
    }
}
