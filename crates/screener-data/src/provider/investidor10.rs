//! Investidor10 문서 소스.
//!
//! `https://investidor10.com.br/acoes/{ticker}/` 페이지의 지표 박스에서 값을 읽습니다.
//!
//! ```html
//! <div class="indicators-box">
//!   <span>LPA</span> <span>R$ 3,45</span>
//! </div>
//! ```

use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use screener_core::{FundamentalRecord, Ticker};
use std::sync::{Arc, LazyLock};

use super::{element_text, extract_record, DocumentFetcher, FundamentalSource, LabeledValueLocator};
use crate::error::Result;

static EPS_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\blpa\b").unwrap());
static PAYOUT_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bpayout\b").unwrap());

/// Investidor10 소스.
pub struct Investidor10Source {
    fetcher: Arc<dyn DocumentFetcher>,
    base_url: String,
}

impl Investidor10Source {
    pub const NAME: &'static str = "investidor10";

    pub fn new(fetcher: Arc<dyn DocumentFetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    /// 종목 페이지 URL (소문자 티커).
    pub fn url_for(&self, ticker: &Ticker) -> String {
        format!(
            "{}/acoes/{}/",
            self.base_url.trim_end_matches('/'),
            ticker.lowercase()
        )
    }

    /// 문서에서 레코드를 추출합니다.
    pub fn parse_document(&self, html: &str) -> Result<FundamentalRecord> {
        extract_record(self, html, &EPS_LABEL, &PAYOUT_LABEL)
    }
}

impl LabeledValueLocator for Investidor10Source {
    /// 라벨을 포함한 첫 박스 텍스트의 마지막 토큰.
    fn locate_labeled_value(&self, document: &Html, label: &Regex) -> Option<String> {
        let box_selector = Selector::parse("div.indicators-box").ok()?;

        document
            .select(&box_selector)
            .map(|el| element_text(&el))
            .find(|text| label.is_match(text))
            .and_then(|text| trailing_value(&text))
    }
}

/// 박스 텍스트 끝의 값.
///
/// 마지막 토큰이 `%`나 단위처럼 숫자 없는 접미사이면 앞 토큰과 합칩니다 (`"52,30 %"`).
fn trailing_value(text: &str) -> Option<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let (last, rest) = tokens.split_last()?;
    let has_digit = |token: &str| token.chars().any(|c| c.is_ascii_digit());

    match rest.last() {
        Some(prev) if !has_digit(last) && has_digit(prev) => Some(format!("{} {}", prev, last)),
        _ => Some(last.to_string()),
    }
}

#[async_trait]
impl FundamentalSource for Investidor10Source {
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
        <html><body>
          <div class="indicators-box"><span>P/L</span><span>7,80</span></div>
          <div class="indicators-box"><span>LPA</span>
            <span>R$ 3,45</span></div>
          <div class="indicators-box"><span>Payout</span><span>52,30%</span></div>
        </body></html>
    "#;

    fn source(docs: StaticDocuments) -> Investidor10Source {
        Investidor10Source::new(Arc::new(docs), "https://investidor10.test/")
    }

    #[test]
    fn test_url_uses_lowercase_ticker() {
        let source = source(StaticDocuments::default());
        let ticker = Ticker::parse("ITUB4").unwrap();
        assert_eq!(
            source.url_for(&ticker),
            "https://investidor10.test/acoes/itub4/"
        );
    }

    #[test]
    fn test_parse_fixture() {
        let record = source(StaticDocuments::default())
            .parse_document(FIXTURE)
            .unwrap();

        assert_eq!(record.earnings_per_share, Some(dec!(3.45)));
        assert_eq!(record.payout_ratio, Some(dec!(0.523)));
    }

    #[test]
    fn test_parse_without_boxes_is_error() {
        let err = source(StaticDocuments::default())
            .parse_document("<html><body><p>manutenção</p></body></html>")
            .unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[test]
    fn test_unparsable_value_is_null() {
        let html = r#"<div class="indicators-box">LPA -</div>
                      <div class="indicators-box">Payout 40%</div>"#;
        let record = source(StaticDocuments::default())
            .parse_document(html)
            .unwrap();

        assert_eq!(record.earnings_per_share, None);
        assert_eq!(record.payout_ratio, Some(dec!(0.40)));
    }

    #[test]
    fn test_detached_suffix_is_kept_with_number() {
        let html = r#"<div class="indicators-box"><span>LPA</span><span>3,45</span></div>
                      <div class="indicators-box"><span>Payout</span><span>52,30 %</span></div>"#;
        let record = source(StaticDocuments::default())
            .parse_document(html)
            .unwrap();

        assert_eq!(record.earnings_per_share, Some(dec!(3.45)));
        assert_eq!(record.payout_ratio, Some(dec!(0.523)));

        assert_eq!(trailing_value("Lucro 12,5 mi").as_deref(), Some("12,5 mi"));
        assert_eq!(trailing_value("LPA -").as_deref(), Some("-"));
        assert_eq!(trailing_value("   "), None);
    }

    #[tokio::test]
    async fn test_fetch_through_fetcher() {
        let docs = StaticDocuments::default().with("https://investidor10.test/acoes/itub4/", FIXTURE);
        let record = source(docs)
            .fetch(&Ticker::parse("itub4").unwrap())
            .await
            .unwrap();

        assert!(record.is_complete());
    }
}
