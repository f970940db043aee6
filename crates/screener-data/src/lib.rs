//! 외부 데이터 수집.
//!
//! 이 crate는 다음을 제공합니다:
//! - pt-BR 로케일 숫자 파싱
//! - 펀더멘털 문서 소스 (Investidor10, Status Invest, Fundamentus)
//! - 우선순위 기반 폴백 리졸버
//! - 손익 이력 추출기
//! - Yahoo Finance 시세 Provider

pub mod error;
pub mod history;
pub mod market;
pub mod parse;
pub mod provider;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{DataError, Result};
pub use history::FinancialHistoryExtractor;
pub use market::{MarketDataProvider, YahooMarketData};
pub use parse::{parse_br_decimal, parse_br_percentage};
pub use provider::{
    DocumentFetcher, FundamentalSource, FundamentusSource, HttpDocumentFetcher,
    Investidor10Source, LabeledValueLocator, StatusInvestSource,
};
pub use resolver::{merge_records, FallbackResolver};
