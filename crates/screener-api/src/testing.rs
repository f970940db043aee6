//! 라우트 테스트용 상태와 in-memory Provider.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use screener_analytics::{CriteriaEngine, Screener, VolatilityBenchmark};
use screener_core::{AppConfig, DailyBar, DailySeries, FundamentalRecord, Ticker};
use screener_data::{
    DataError, DocumentFetcher, FallbackResolver, FinancialHistoryExtractor, FundamentalSource,
    MarketDataProvider,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::state::AppState;

/// 등록된 종목만 오늘까지의 일봉을 반환하는 Provider.
#[derive(Default)]
pub(crate) struct StaticMarketData {
    series: HashMap<Ticker, DailySeries>,
}

impl StaticMarketData {
    /// 종가가 100과 `100 × (1 + amplitude)` 사이를 오가는 `days`일 시계열을 등록합니다.
    pub(crate) fn with_series(mut self, ticker: &str, days: i64, amplitude: f64) -> Self {
        let ticker = Ticker::parse(ticker).unwrap();
        let end = Utc::now().date_naive();
        let high = 100.0 * (1.0 + amplitude);

        let bars = (0..days)
            .map(|i| {
                let close = if i % 2 == 0 { 100.0 } else { high };
                DailyBar::from_close(
                    end - Duration::days(days - 1 - i),
                    Decimal::from_f64_retain(close).unwrap(),
                    Decimal::from(1_000_000),
                )
            })
            .collect();

        self.series
            .insert(ticker.clone(), DailySeries::new(ticker, bars, Vec::new()));
        self
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketData {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_daily(
        &self,
        ticker: &Ticker,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> screener_data::Result<DailySeries> {
        self.series
            .get(ticker)
            .cloned()
            .ok_or_else(|| DataError::NoData(ticker.to_string()))
    }
}

/// 모든 문서 요청에 404를 반환.
pub(crate) struct MissingDocuments;

#[async_trait]
impl DocumentFetcher for MissingDocuments {
    async fn fetch_document(&self, url: &str) -> screener_data::Result<String> {
        Err(DataError::HttpStatus {
            status: 404,
            url: url.to_string(),
        })
    }
}

/// 고정 레코드를 반환하는 소스.
pub(crate) struct FixedSource(pub FundamentalRecord);

#[async_trait]
impl FundamentalSource for FixedSource {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch(&self, _ticker: &Ticker) -> screener_data::Result<FundamentalRecord> {
        Ok(self.0)
    }
}

/// 조회 시 패닉하는 소스.
pub(crate) struct PanickingSource;

#[async_trait]
impl FundamentalSource for PanickingSource {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn fetch(&self, ticker: &Ticker) -> screener_data::Result<FundamentalRecord> {
        panic!("unexpected layout for {ticker}");
    }
}

/// 기준 바스켓 종목.
pub(crate) const BASKET: [&str; 3] = ["ITUB4", "PETR4", "VALE3"];

/// 기준 바스켓 시세가 등록된 Provider.
pub(crate) fn basket_market() -> StaticMarketData {
    BASKET
        .iter()
        .enumerate()
        .fold(StaticMarketData::default(), |market, (i, ticker)| {
            market.with_series(ticker, 400, 0.01 * (i + 1) as f64)
        })
}

/// 주어진 소스와 Provider로 테스트 상태를 생성합니다.
pub(crate) fn create_test_state(
    sources: Vec<Arc<dyn FundamentalSource>>,
    market: StaticMarketData,
) -> Arc<AppState> {
    let market: Arc<dyn MarketDataProvider> = Arc::new(market);
    let basket = BASKET.iter().map(|t| Ticker::parse(t).unwrap()).collect();
    let benchmark = Arc::new(VolatilityBenchmark::new(market.clone(), basket, 365));

    let screener = Screener::new(
        FallbackResolver::new(sources),
        FinancialHistoryExtractor::new(Arc::new(MissingDocuments), "https://statusinvest.test"),
        market,
        benchmark,
        CriteriaEngine::default(),
        1095,
    );

    Arc::new(AppState::new(screener, AppConfig::default()))
}
