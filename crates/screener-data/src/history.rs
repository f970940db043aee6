//! 손익 이력 추출.
//!
//! Status Invest 종목 페이지의 두 표에서 순이익을 읽습니다:
//! - "Resultados Históricos" 제목 다음 표: 연간 순이익 (최신 연도가 먼저)
//! - "Resultados Trimestrais" 제목 다음 표: 첫 칸이 직전 분기 순이익
//!
//! 구조가 맞지 않으면 해당 값만 비워 두고 계속 진행합니다.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use screener_core::{FinancialHistory, Ticker};
use std::sync::{Arc, LazyLock};

use crate::error::Result;
use crate::parse::parse_br_decimal;
use crate::provider::DocumentFetcher;

static ANNUAL_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)resultados\s+hist[óo]ricos").unwrap());
static QUARTERLY_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)resultados\s+trimestrais").unwrap());
static NET_PROFIT_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(lucro|resultado)\s+l[íi]quido").unwrap());

/// 손익 이력 추출기.
pub struct FinancialHistoryExtractor {
    fetcher: Arc<dyn DocumentFetcher>,
    base_url: String,
}

impl FinancialHistoryExtractor {
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

    /// 종목의 손익 이력을 조회합니다.
    ///
    /// 전송 실패만 에러로 반환하고, 표 구조 불일치는 빈 값으로 처리합니다.
    pub async fn extract(&self, ticker: &Ticker) -> Result<FinancialHistory> {
        let html = self.fetcher.fetch_document(&self.url_for(ticker)).await?;
        let history = Self::parse_document(&html);

        if !history.is_complete() {
            tracing::info!(
                ticker = %ticker,
                annual = history.annual_profits().len(),
                last_quarter = ?history.last_quarter_profit(),
                "손익 이력 일부 누락"
            );
        }

        Ok(history)
    }

    /// 문서에서 손익 이력을 추출합니다.
    pub fn parse_document(html: &str) -> FinancialHistory {
        let document = Html::parse_document(html);

        let annual_cells = net_profit_cells(&document, &ANNUAL_HEADING).unwrap_or_else(|| {
            tracing::debug!("연간 순이익 행을 찾지 못함");
            Vec::new()
        });
        let last_quarter = match net_profit_cells(&document, &QUARTERLY_HEADING) {
            Some(cells) => cells.first().and_then(|text| parse_br_decimal(text)),
            None => {
                tracing::debug!("분기 순이익 행을 찾지 못함");
                None
            }
        };

        // 파싱 불가 칸은 건너뛰고 최신 3개까지
        FinancialHistory::from_newest_first(
            annual_cells.iter().filter_map(|text| parse_br_decimal(text)),
            last_quarter,
        )
    }
}

/// 제목 다음 첫 표에서 순이익 행의 `td` 텍스트들을 반환합니다.
fn net_profit_cells(document: &Html, heading: &Regex) -> Option<Vec<String>> {
    let table = table_after_heading(document, heading)?;

    let row_selector = Selector::parse("tr").ok()?;
    let th_selector = Selector::parse("th").ok()?;
    let td_selector = Selector::parse("td").ok()?;

    table.select(&row_selector).find_map(|row| {
        let header = row.select(&th_selector).next()?;
        if !NET_PROFIT_ROW.is_match(&header.text().collect::<String>()) {
            return None;
        }

        Some(
            row.select(&td_selector)
                .map(|td| td.text().collect::<String>().trim().to_string())
                .collect(),
        )
    })
}

/// 문서 순서상 `heading`과 일치하는 제목 다음에 오는 첫 `table`.
fn table_after_heading<'a>(document: &'a Html, heading: &Regex) -> Option<ElementRef<'a>> {
    let selector = Selector::parse("h2, h3, h4, table").ok()?;
    let mut found_heading = false;

    for element in document.select(&selector) {
        let is_table = element.value().name() == "table";
        if found_heading && is_table {
            return Some(element);
        }
        if !is_table && heading.is_match(&element.text().collect::<String>()) {
            found_heading = true;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataError;
    use crate::testing::StaticDocuments;
    use rust_decimal_macros::dec;

    const FIXTURE: &str = r#"
        <html><body>
          <h2 class="title">Resultados Históricos</h2>
          <div class="table-wrapper">
            <table>
              <thead><tr><th>#</th><th>2023</th><th>2022</th><th>2021</th><th>2020</th></tr></thead>
              <tbody>
                <tr><th>Receita Líquida</th><td>900,0</td><td>800,0</td><td>700,0</td><td>600,0</td></tr>
                <tr><th>Lucro Líquido - (R$)</th><td>30,5 mi</td><td>-</td><td>20,1 mi</td><td>10,0 mi</td><td>5,0 mi</td></tr>
              </tbody>
            </table>
          </div>
          <h3>Resultados Trimestrais</h3>
          <table>
            <tr><th>Resultado Líquido</th><td>1.234,56</td><td>999,00</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_parse_fixture() {
        let history = FinancialHistoryExtractor::parse_document(FIXTURE);

        assert_eq!(
            history.annual_profits(),
            &[dec!(10000000), dec!(20100000), dec!(30500000)]
        );
        assert_eq!(history.last_quarter_profit(), Some(dec!(1234.56)));
        assert!(history.is_complete());
    }

    #[test]
    fn test_missing_sections() {
        let history =
            FinancialHistoryExtractor::parse_document("<html><body><h2>Outro</h2></body></html>");

        assert!(history.annual_profits().is_empty());
        assert_eq!(history.last_quarter_profit(), None);
    }

    #[test]
    fn test_heading_without_table() {
        let history = FinancialHistoryExtractor::parse_document(
            "<h2>Resultados Históricos</h2><p>indisponível</p>",
        );
        assert!(history.annual_profits().is_empty());
    }

    #[test]
    fn test_unparsable_quarter_is_null() {
        let html = r#"<h3>Resultados Trimestrais</h3>
                      <table><tr><th>Lucro líquido</th><td>-</td><td>10,0</td></tr></table>"#;
        let history = FinancialHistoryExtractor::parse_document(html);
        assert_eq!(history.last_quarter_profit(), None);
    }

    #[tokio::test]
    async fn test_extract_via_fetcher() {
        let docs = StaticDocuments::default().with("https://statusinvest.test/acoes/wege3", FIXTURE);
        let extractor = FinancialHistoryExtractor::new(Arc::new(docs), "https://statusinvest.test/");

        let history = extractor
            .extract(&Ticker::parse("WEGE3").unwrap())
            .await
            .unwrap();
        assert_eq!(history.annual_profits().len(), 3);

        let err = extractor
            .extract(&Ticker::parse("PETR4").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::HttpStatus { .. }));
    }
}
