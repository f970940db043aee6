//! 종목 스크리닝 오케스트레이터.
//!
//! 한 종목에 대해 다음을 수행합니다:
//! 1. 티커 검증 및 정규화
//! 2. 펀더멘털, 손익 이력, 36개월 일봉, 변동성 기준 분포를 동시에 수집
//! 3. 여섯 기준 평가 및 결과 집계
//!
//! 데이터 수집 실패는 요청 전체를 실패시키지 않고 `errors` 항목으로 보고됩니다.

use chrono::{Duration, NaiveDate, Utc};
use screener_core::{
    AppConfig, Criterion, DailySeries, FinancialHistory, FundamentalRecord, PeriodWeights,
    ScreenerResult, ScreeningResult, Ticker,
};
use screener_data::{
    DocumentFetcher, FallbackResolver, FinancialHistoryExtractor, HttpDocumentFetcher,
    MarketDataProvider, YahooMarketData,
};
use std::sync::Arc;
use tracing::Instrument;

use crate::benchmark::VolatilityBenchmark;
use crate::criteria::{CriteriaEngine, ScreeningInput};

/// LPA 또는 배당성향을 얻지 못했을 때의 안내 메시지.
pub const EPS_PAYOUT_UNAVAILABLE: &str = "could not obtain EPS/payout";
/// 손익 이력을 얻지 못했을 때의 안내 메시지.
pub const PROFIT_HISTORY_UNAVAILABLE: &str = "could not obtain profit history";

/// 스크리닝 오케스트레이터.
pub struct Screener {
    resolver: FallbackResolver,
    history: FinancialHistoryExtractor,
    market: Arc<dyn MarketDataProvider>,
    benchmark: Arc<VolatilityBenchmark>,
    engine: CriteriaEngine,
    lookback_days: i64,
}

impl Screener {
    pub fn new(
        resolver: FallbackResolver,
        history: FinancialHistoryExtractor,
        market: Arc<dyn MarketDataProvider>,
        benchmark: Arc<VolatilityBenchmark>,
        engine: CriteriaEngine,
        lookback_days: i64,
    ) -> Self {
        Self {
            resolver,
            history,
            market,
            benchmark,
            engine,
            lookback_days,
        }
    }

    /// 설정으로 HTTP 문서 소스와 Yahoo Finance를 사용하는 구성을 생성합니다.
    pub fn from_config(config: &AppConfig) -> ScreenerResult<Self> {
        let fetcher: Arc<dyn DocumentFetcher> =
            Arc::new(HttpDocumentFetcher::from_config(&config.sources)?);
        let market: Arc<dyn MarketDataProvider> =
            Arc::new(YahooMarketData::from_config(&config.market_data)?);

        let resolver = FallbackResolver::with_default_sources(fetcher.clone(), &config.sources);
        let history =
            FinancialHistoryExtractor::new(fetcher, config.sources.statusinvest_url.clone());
        let benchmark = Arc::new(VolatilityBenchmark::from_config(
            market.clone(),
            &config.benchmark,
        ));

        Ok(Self::new(
            resolver,
            history,
            market,
            benchmark,
            CriteriaEngine::new(config.criteria.clone()),
            config.market_data.lookback_days,
        ))
    }

    /// 변동성 기준 서비스.
    pub fn benchmark(&self) -> &Arc<VolatilityBenchmark> {
        &self.benchmark
    }

    /// 기준 엔진.
    pub fn engine(&self) -> &CriteriaEngine {
        &self.engine
    }

    /// 펀더멘털 소스 이름 (우선순위 순).
    pub fn source_names(&self) -> Vec<&str> {
        self.resolver.source_names()
    }

    /// 오늘 기준으로 종목을 평가합니다.
    pub async fn check_stock(
        &self,
        raw_ticker: &str,
        weights: Option<PeriodWeights>,
    ) -> ScreenerResult<ScreeningResult> {
        self.check_stock_at(raw_ticker, weights, Utc::now().date_naive())
            .await
    }

    /// `as_of` 기준으로 종목을 평가합니다.
    ///
    /// 잘못된 티커만 에러로 반환하며, 데이터 부족은 결과의 `errors`로 보고합니다.
    pub async fn check_stock_at(
        &self,
        raw_ticker: &str,
        weights: Option<PeriodWeights>,
        as_of: NaiveDate,
    ) -> ScreenerResult<ScreeningResult> {
        let ticker = Ticker::parse(raw_ticker)?;
        let span = screener_core::screening_span!("check_stock", ticker);

        self.evaluate(ticker, weights, as_of).instrument(span).await
    }

    async fn evaluate(
        &self,
        ticker: Ticker,
        weights: Option<PeriodWeights>,
        as_of: NaiveDate,
    ) -> ScreenerResult<ScreeningResult> {
        let weights = weights.unwrap_or_else(|| self.engine.default_weights());
        if !weights.is_normalized() {
            tracing::warn!(
                sum = weights.sum(),
                "구간 가중치 합계가 1이 아님, 최소 수익률 기준이 비례해 달라짐"
            );
        }

        let start = as_of - Duration::days(self.lookback_days);
        let (fundamentals, history, series, benchmark) = tokio::join!(
            self.resolver.resolve(&ticker),
            self.history.extract(&ticker),
            self.market.fetch_daily(&ticker, start, as_of),
            self.benchmark.get(),
        );

        let history = history.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "손익 이력 조회 실패");
            FinancialHistory::default()
        });
        let series = series.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "시세 조회 실패");
            DailySeries::empty(ticker.clone())
        });

        let report = self.engine.evaluate(&ScreeningInput {
            fundamentals: &fundamentals,
            history: &history,
            series: &series,
            benchmark: &benchmark,
            weights: &weights,
            as_of,
        });

        let mut errors = Vec::new();
        if !fundamentals.is_complete() {
            errors.push(EPS_PAYOUT_UNAVAILABLE.to_string());
        }
        if !history.is_complete() {
            errors.push(PROFIT_HISTORY_UNAVAILABLE.to_string());
        }
        for (criterion, verdict) in report.verdicts() {
            if let Some(reason) = verdict.reason() {
                if covered_by_advisory(*criterion, &fundamentals, &history) {
                    tracing::debug!(criterion = %criterion, reason, "입력 부족");
                } else {
                    errors.push(format!("{}: {}", criterion, reason));
                }
            }
        }

        let result = ScreeningResult::new(ticker.as_str(), report.flags(), errors);

        tracing::info!(
            passed = result.all_criteria_met(),
            errors = result.errors().len(),
            "스크리닝 완료"
        );

        Ok(result)
    }
}

/// 입력 부족이 이미 두 안내 메시지 중 하나로 보고되었는지 확인합니다.
fn covered_by_advisory(
    criterion: Criterion,
    fundamentals: &FundamentalRecord,
    history: &FinancialHistory,
) -> bool {
    match criterion {
        Criterion::PayoutWithinBounds => !fundamentals.is_complete(),
        Criterion::PositiveLastQuarterProfit | Criterion::ThreeYearProfitGrowth => {
            !history.is_complete()
        }
        _ => false,
    }
}
