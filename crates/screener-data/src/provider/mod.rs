//! 펀더멘털 데이터 Provider 모듈.
//!
//! 외부 문서(HTML)에서 LPA와 배당성향을 수집하는 소스들을 정의합니다.
//!
//! ## 문서 소스 (우선순위 순)
//! - `Investidor10Source`: `div.indicators-box` 박스의 마지막 토큰
//! - `StatusInvestSource`: 라벨 `h3` 다음의 `strong`
//! - `FundamentusSource`: 라벨 `td` 다음의 `td`
//!
//! ## 공통
//! - `DocumentFetcher`: URL에서 HTML 문서를 가져오는 전송 계층
//! - `LabeledValueLocator`: 문서에서 라벨에 해당하는 값 텍스트를 찾는 소스별 구조 매칭

pub mod document;
pub mod fundamentus;
pub mod investidor10;
pub mod statusinvest;

pub use document::{DocumentFetcher, HttpDocumentFetcher};
pub use fundamentus::FundamentusSource;
pub use investidor10::Investidor10Source;
pub use statusinvest::StatusInvestSource;

use async_trait::async_trait;
use regex::Regex;
use scraper::Html;
use screener_core::{FundamentalRecord, Ticker};

use crate::error::{DataError, Result};
use crate::parse::{parse_br_decimal, parse_br_percentage};

/// 펀더멘털 레코드를 제공하는 문서 소스.
#[async_trait]
pub trait FundamentalSource: Send + Sync {
    /// 소스 이름.
    fn name(&self) -> &str;

    /// 종목의 LPA/배당성향 조회.
    ///
    /// 문서는 받았지만 일부 라벨만 찾은 경우 찾은 필드만 채워서 반환합니다.
    async fn fetch(&self, ticker: &Ticker) -> Result<FundamentalRecord>;
}

/// 문서 구조에서 라벨이 붙은 값을 찾는 기능.
///
/// 소스마다 HTML 구조가 달라 라벨과 값의 위치 관계만 구현체가 정의합니다.
pub trait LabeledValueLocator {
    /// `label`과 일치하는 라벨 다음의 값 텍스트를 반환합니다.
    fn locate_labeled_value(&self, document: &Html, label: &Regex) -> Option<String>;
}

/// 라벨 두 개(LPA, 배당성향)로 레코드를 구성합니다.
///
/// 두 라벨을 모두 찾지 못하면 `DataError::Parse`를 반환합니다.
pub(crate) fn extract_record<L: LabeledValueLocator + ?Sized>(
    locator: &L,
    html: &str,
    eps_label: &Regex,
    payout_label: &Regex,
) -> Result<FundamentalRecord> {
    let document = Html::parse_document(html);

    let eps_text = locator.locate_labeled_value(&document, eps_label);
    let payout_text = locator.locate_labeled_value(&document, payout_label);

    if eps_text.is_none() && payout_text.is_none() {
        return Err(DataError::Parse(format!(
            "labels '{}' and '{}' not found",
            eps_label.as_str(),
            payout_label.as_str()
        )));
    }

    Ok(FundamentalRecord::new(
        eps_text.as_deref().and_then(parse_br_decimal),
        payout_text.as_deref().and_then(parse_br_percentage),
    ))
}

/// 요소의 텍스트를 공백 정리 후 하나의 문자열로 합칩니다.
pub(crate) fn element_text(element: &scraper::ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(|t| t.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}
