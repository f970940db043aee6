//! Fundamentus 문서 소스.
//!
//! 라벨과 값이 인접한 `td` 쌍으로 나열된 표 구조입니다.
//!
//! ```html
//! <tr>
//!   <td class="label"><span class="help">?</span><span class="txt">LPA</span></td>
//!   <td class="data"><span class="txt">3,45</span></td>
//! </tr>
//! ```

use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use screener_core::{FundamentalRecord, Ticker};
use std::sync::{Arc, LazyLock};

use super::{element_text, extract_record, DocumentFetcher, FundamentalSource, LabeledValueLocator};
use crate::error::Result;

static EPS_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^lpa$").unwrap());
static PAYOUT_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^payout$").unwrap());

/// 라벨 셀 앞뒤의 도움말 기호(`?`) 등을 제거합니다.
fn normalize_label(text: &str) -> String {
    text.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Fundamentus 소스.
pub struct FundamentusSource {
    fetcher: Arc<dyn DocumentFetcher>,
    base_url: String,
}

impl FundamentusSource {
    pub const NAME: &'static str = "fundamentus";

    pub fn new(fetcher: Arc<dyn DocumentFetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    /// 종목 페이지 URL (대문자 티커).
    pub fn url_for(&self, ticker: &Ticker) -> String {
        format!(
            "{}/detalhes.php?papel={}",
            self.base_url.trim_end_matches('/'),
            ticker.as_str()
        )
    }

    /// 문서에서 레코드를 추출합니다.
    pub fn parse_document(&self, html: &str) -> Result<FundamentalRecord> {
        extract_record(self, html, &EPS_LABEL, &PAYOUT_LABEL)
    }
}

impl LabeledValueLocator for FundamentusSource {
    /// 정규화한 텍스트가 라벨과 같은 `td` 다음의 `td` 텍스트.
    fn locate_labeled_value(&self, document: &Html, label: &Regex) -> Option<String> {
        let td_selector = Selector::parse("td").ok()?;
        let mut cells = document.select(&td_selector);

        while let Some(td) = cells.next() {
            if label.is_match(&normalize_label(&element_text(&td))) {
                return cells.next().map(|value| element_text(&value));
            }
        }

        None
    }
}

#[async_trait]
impl FundamentalSource for FundamentusSource {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch(&self, ticker: &Ticker) -> Result<FundamentalRecord> {
        let html = self.fetcher.fetch_document(&self.url_for(ticker)).await?;
        let record = self.parse_document(&html)?;

        tracing::debug!(
            source = Self::NAME,
            ticker = %ticker,
            eps = ?record.earnings_per_share,
            payout = ?record.payout_ratio,
            "펀더멘털 추출 완료"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use crate::testing::StaticDocuments;
    use rust_decimal_macros::dec;

    const FIXTURE: &str = r#"
        <table class="w728">
          <tr>
            <td class="label w2"><span class="help tips">?</span><span class="txt">P/L</span></td>
            <td class="data w2"><span class="txt">8,10</span></td>
            <td class="label w2"><span class="help tips">?</span><span class="txt">LPA</span></td>
            <td class="data w2"><span class="txt">1.234,50</span></td>
          </tr>
        </table>
    "#;

    fn source(docs: StaticDocuments) -> FundamentusSource {
        FundamentusSource::new(Arc::new(docs), "https://fundamentus.test")
    }

    #[test]
    fn test_url_uses_uppercase_ticker() {
        let ticker = Ticker::parse("petr4").unwrap();
        assert_eq!(
            source(StaticDocuments::default()).url_for(&ticker),
            "https://fundamentus.test/detalhes.php?papel=PETR4"
        );
    }

    #[test]
    fn test_parse_fixture() {
        let record = source(StaticDocuments::default())
            .parse_document(FIXTURE)
            .unwrap();

        assert_eq!(record.earnings_per_share, Some(dec!(1234.50)));
        assert_eq!(record.payout_ratio, None);
    }

    #[test]
    fn test_label_must_match_whole_cell() {
        let html = r#"<table><tr><td>LPA ajustado</td><td>9,99</td></tr></table>"#;
        let err = source(StaticDocuments::default())
            .parse_document(html)
            .unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_missing_document() {
        let err = source(StaticDocuments::default())
            .fetch(&Ticker::parse("PETR4").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::HttpStatus { status: 404, .. }));
    }
}
