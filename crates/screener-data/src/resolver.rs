//! 우선순위 기반 펀더멘털 병합.
//!
//! 소스를 고정된 순서로 조회하며, 아직 비어 있는 필드만 현재 소스의 값으로 채웁니다.
//! 모든 필드가 채워지면 남은 소스는 조회하지 않습니다.

use screener_core::{FundamentalRecord, SourcesConfig, Ticker};
use std::sync::Arc;

use crate::provider::{
    DocumentFetcher, FundamentalSource, FundamentusSource, Investidor10Source, StatusInvestSource,
};

/// 레코드들을 순서대로 병합합니다.
///
/// 각 필드는 순서상 처음으로 값을 제공한 레코드에서 가져옵니다.
pub fn merge_records(records: impl IntoIterator<Item = FundamentalRecord>) -> FundamentalRecord {
    let mut merged = FundamentalRecord::EMPTY;

    for record in records {
        if merge_into(&mut merged, &record) {
            break;
        }
    }

    merged
}

/// `record`로 비어 있는 필드를 채우고, 모든 필드가 채워졌는지 반환합니다.
fn merge_into(merged: &mut FundamentalRecord, record: &FundamentalRecord) -> bool {
    merged.fill_missing_from(record);
    merged.is_complete()
}

/// 펀더멘털 소스 폴백 리졸버.
pub struct FallbackResolver {
    sources: Vec<Arc<dyn FundamentalSource>>,
}

impl FallbackResolver {
    /// 주어진 우선순위 순서로 생성합니다.
    pub fn new(sources: Vec<Arc<dyn FundamentalSource>>) -> Self {
        Self { sources }
    }

    /// 기본 소스 구성 (Investidor10 → Status Invest → Fundamentus).
    pub fn with_default_sources(fetcher: Arc<dyn DocumentFetcher>, config: &SourcesConfig) -> Self {
        Self::new(vec![
            Arc::new(Investidor10Source::new(
                fetcher.clone(),
                config.investidor10_url.clone(),
            )),
            Arc::new(StatusInvestSource::new(
                fetcher.clone(),
                config.statusinvest_url.clone(),
            )),
            Arc::new(FundamentusSource::new(fetcher, config.fundamentus_url.clone())),
        ])
    }

    /// 소스 이름 목록 (우선순위 순).
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// 종목의 펀더멘털 레코드를 구성합니다.
    ///
    /// 실패하지 않습니다. 모든 소스가 실패하면 빈 레코드를 반환합니다.
    pub async fn resolve(&self, ticker: &Ticker) -> FundamentalRecord {
        let mut merged = FundamentalRecord::EMPTY;

        for source in &self.sources {
            let record = match source.fetch(ticker).await {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(
                        source = source.name(),
                        ticker = %ticker,
                        error = %e,
                        "펀더멘털 소스 조회 실패"
                    );
                    FundamentalRecord::EMPTY
                }
            };

            let complete = merge_into(&mut merged, &record);
            tracing::debug!(source = source.name(), ticker = %ticker, complete, "소스 병합");
            if complete {
                break;
            }
        }

        if !merged.is_complete() {
            tracing::info!(
                ticker = %ticker,
                eps = ?merged.earnings_per_share,
                payout = ?merged.payout_ratio,
                "일부 펀더멘털 값을 찾지 못함"
            );
        }

        merged
    }
}
