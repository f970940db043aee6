//! 프로세스 단위 변동성 기준 서비스.
//!
//! 첫 요청 시 한 번만 분포를 생성하고 이후에는 공유 읽기로 제공합니다.
//! 동시에 들어온 첫 요청들은 하나의 생성 결과를 함께 기다립니다.

use chrono::{Duration, NaiveDate, Utc};
use screener_core::{BenchmarkConfig, Ticker};
use screener_data::MarketDataProvider;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::volatility::BenchmarkDistribution;

/// 변동성 기준 분포 서비스.
pub struct VolatilityBenchmark {
    provider: Arc<dyn MarketDataProvider>,
    tickers: Vec<Ticker>,
    lookback_days: i64,
    distribution: RwLock<Option<Arc<BenchmarkDistribution>>>,
    build_lock: Mutex<()>,
}

impl VolatilityBenchmark {
    pub fn new(provider: Arc<dyn MarketDataProvider>, tickers: Vec<Ticker>, lookback_days: i64) -> Self {
        Self {
            provider,
            tickers,
            lookback_days,
            distribution: RwLock::new(None),
            build_lock: Mutex::new(()),
        }
    }

    /// 설정에서 생성합니다. 잘못된 티커는 경고 후 제외합니다.
    pub fn from_config(provider: Arc<dyn MarketDataProvider>, config: &BenchmarkConfig) -> Self {
        let tickers = config
            .tickers
            .iter()
            .filter_map(|raw| match Ticker::parse(raw) {
                Ok(ticker) => Some(ticker),
                Err(e) => {
                    tracing::warn!(ticker = %raw, error = %e, "기준 종목 무시");
                    None
                }
            })
            .collect();

        Self::new(provider, tickers, config.lookback_days)
    }

    /// 기준 종목 목록.
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// 분포를 반환합니다. 아직 없으면 생성합니다.
    ///
    /// 생성 결과가 비어 있어도 그대로 유지되며 [`refresh`](Self::refresh)로만 다시 생성합니다.
    pub async fn get(&self) -> Arc<BenchmarkDistribution> {
        if let Some(dist) = self.distribution.read().await.as_ref() {
            return dist.clone();
        }

        let _guard = self.build_lock.lock().await;

        // 대기 중 다른 요청이 생성했을 수 있음
        if let Some(dist) = self.distribution.read().await.as_ref() {
            return dist.clone();
        }

        let dist = Arc::new(self.build(Utc::now().date_naive()).await);
        *self.distribution.write().await = Some(dist.clone());
        dist
    }

    /// 분포를 다시 생성해 교체합니다.
    pub async fn refresh(&self) -> Arc<BenchmarkDistribution> {
        let _guard = self.build_lock.lock().await;

        let dist = Arc::new(self.build(Utc::now().date_naive()).await);
        *self.distribution.write().await = Some(dist.clone());
        dist
    }

    /// 생성된 분포 (없으면 `None`, 생성하지 않음).
    pub async fn current(&self) -> Option<Arc<BenchmarkDistribution>> {
        self.distribution.read().await.clone()
    }

    /// `as_of` 기준 최근 구간 종가로 분포를 계산합니다.
    pub async fn build(&self, as_of: NaiveDate) -> BenchmarkDistribution {
        let start = as_of - Duration::days(self.lookback_days);

        tracing::info!(
            tickers = self.tickers.len(),
            start = %start,
            end = %as_of,
            "변동성 기준 분포 생성 시작"
        );

        let closes = self.provider.fetch_closes(&self.tickers, start, as_of).await;
        let dist = BenchmarkDistribution::from_closes(&closes);

        if dist.is_empty() {
            tracing::warn!("변동성 기준 분포가 비어 있음");
        } else {
            tracing::info!(
                count = dist.len(),
                p90 = ?dist.quantile(0.90),
                "변동성 기준 분포 생성 완료"
            );
        }

        dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_series, FakeMarketData};

    fn basket() -> Vec<Ticker> {
        ["ITUB4", "PETR4", "VALE3"]
            .iter()
            .map(|t| Ticker::parse(t).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_get_builds_once() {
        let provider = Arc::new(FakeMarketData::default());
        for (i, ticker) in basket().into_iter().enumerate() {
            provider.insert(sample_series(ticker, 400, 0.01 * (i + 1) as f64, 0));
        }
        let benchmark = Arc::new(VolatilityBenchmark::new(provider.clone(), basket(), 365));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let benchmark = benchmark.clone();
                tokio::spawn(async move { benchmark.get().await })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        // 종목당 한 번씩, 한 번의 생성
        assert_eq!(provider.calls(), 3);
        assert!(results.iter().all(|d| Arc::ptr_eq(d, &results[0])));
        assert_eq!(results[0].len(), 3);
    }

    #[tokio::test]
    async fn test_empty_distribution_is_memoized() {
        let provider = Arc::new(FakeMarketData::default());
        let benchmark = VolatilityBenchmark::new(provider.clone(), basket(), 365);

        assert!(benchmark.current().await.is_none());
        assert!(benchmark.get().await.is_empty());
        assert!(benchmark.get().await.is_empty());
        assert_eq!(provider.calls(), 3);
    }

    #[tokio::test]
    async fn test_refresh_replaces_distribution() {
        let provider = Arc::new(FakeMarketData::default());
        let benchmark = VolatilityBenchmark::new(provider.clone(), basket(), 365);

        let first = benchmark.get().await;
        assert!(first.is_empty());

        provider.insert(sample_series(Ticker::parse("ITUB4").unwrap(), 400, 0.02, 0));
        let refreshed = benchmark.refresh().await;

        assert_eq!(refreshed.len(), 1);
        assert!(Arc::ptr_eq(&benchmark.get().await, &refreshed));
    }

    #[test]
    fn test_from_config_skips_invalid_tickers() {
        let config = BenchmarkConfig {
            tickers: vec!["ITUB4".to_string(), "bad ticker".to_string()],
            lookback_days: 365,
        };
        let benchmark =
            VolatilityBenchmark::from_config(Arc::new(FakeMarketData::default()), &config);

        assert_eq!(benchmark.tickers().len(), 1);
    }
}
