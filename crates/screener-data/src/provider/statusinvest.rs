//! Status Invest 문서 소스.
//!
//! 지표 제목은 `h3`, 값은 문서 순서상 다음 `strong`에 있습니다.
//!
//! ```html
//! <div class="info">
//!   <h3 class="title">LPA</h3>
//!   <strong class="value">3,45</strong>
//! </div>
//! ```

use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use screener_core::{FundamentalRecord, Ticker};
use std::sync::{Arc, LazyLock};

use super::{element_text, extract_record, DocumentFetcher, FundamentalSource, LabeledValueLocator};
use crate::error::Result;

static EPS_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(lpa|eps)\b").unwrap());
static PAYOUT_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bpayout\b").unwrap());

/// Status Invest 소스.
pub struct StatusInvestSource {
    fetcher: Arc<dyn DocumentFetcher>,
    base_url: String,
}

impl StatusInvestSource {
    pub const NAME: &'static str = "statusinvest";

    pub fn new(fetcher: Arc<dyn DocumentFetcher>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    /// 종목 페이지 URL (소문자 티커).
    pub fn url_for(&self, ticker: &Ticker) -> String {
        format!(
            "{}/acoes/{}",
            self.base_url.trim_end_matches('/'),
            ticker.lowercase()
        )
    }

    /// 문서에서 레코드를 추출합니다.
    pub fn parse_document(&self, html: &str) -> Result<FundamentalRecord> {
        extract_record(self, html, &EPS_LABEL, &PAYOUT_LABEL)
    }
}

impl LabeledValueLocator for StatusInvestSource {
    /// 라벨과 일치하는 첫 `h3` 다음의 `strong` 텍스트.
    fn locate_labeled_value(&self, document: &Html, label: &Regex) -> Option<String> {
        let selector = Selector::parse("h3, strong").ok()?;
        let mut found_label = false;

        for element in document.select(&selector) {
            let is_heading = element.value().name() == "h3";
            if !found_label {
                found_label = is_heading && label.is_match(&element_text(&element));
            } else if !is_heading {
                return Some(element_text(&element));
            }
        }

        None
    }
}

#[async_trait]
impl FundamentalSource for StatusInvestSource {
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
