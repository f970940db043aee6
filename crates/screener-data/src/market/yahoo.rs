//! Yahoo Finance 시세 Provider.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Duration as ChronoDuration, NaiveDate};
use rust_decimal::Decimal;
use screener_core::{DailyBar, DailySeries, DividendEvent, MarketDataConfig, Ticker};
use std::time::Duration;
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

use super::MarketDataProvider;
use crate::error::{DataError, Result};

/// Yahoo Finance 일봉 Provider.
///
/// 모든 요청은 설정된 타임아웃 안에 끝나야 합니다.
pub struct YahooMarketData {
    connector: yahoo::YahooConnector,
    timeout: Duration,
}

impl YahooMarketData {
    pub fn new(timeout: Duration) -> Result<Self> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| DataError::Fetch(format!("Yahoo Finance 연결 실패: {}", e)))?;

        Ok(Self { connector, timeout })
    }

    pub fn from_config(config: &MarketDataConfig) -> Result<Self> {
        Self::new(Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketData {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_daily(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DailySeries> {
        let symbol = ticker.yahoo_symbol();
        // Yahoo의 종료 시각은 배타적
        let start_at = naive_date_to_offset_datetime(start)?;
        let end_at = naive_date_to_offset_datetime(end + ChronoDuration::days(1))?;

        tracing::debug!(symbol = %symbol, start = %start, end = %end, "Yahoo Finance API 날짜 범위 호출");

        let response = tokio::time::timeout(
            self.timeout,
            self.connector
                .get_quote_history_interval(&symbol, start_at, end_at, "1d"),
        )
        .await
        .map_err(|_| DataError::Timeout(format!("{} ({}s)", symbol, self.timeout.as_secs())))?
        .map_err(|e| DataError::Fetch(format!("Yahoo Finance API 오류 ({}): {}", symbol, e)))?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::Parse(format!("Quote 파싱 오류: {}", e)))?;

        let bars: Vec<DailyBar> = quotes
            .iter()
            .filter_map(|q| {
                let date = timestamp_to_date(q.timestamp as i64)?;
                Some(DailyBar {
                    date,
                    open: Decimal::from_f64_retain(q.open).unwrap_or_default(),
                    high: Decimal::from_f64_retain(q.high).unwrap_or_default(),
                    low: Decimal::from_f64_retain(q.low).unwrap_or_default(),
                    close: Decimal::from_f64_retain(q.close)?,
                    volume: Decimal::from(q.volume),
                })
            })
            .collect();

        let dividends: Vec<DividendEvent> = match response.dividends() {
            Ok(events) => events
                .iter()
                .filter_map(|d| {
                    Some(DividendEvent {
                        date: timestamp_to_date(d.date as i64)?,
                        amount: Decimal::from_f64_retain(d.amount)?,
                    })
                })
                .collect(),
            Err(e) => {
                tracing::debug!(symbol = %symbol, error = %e, "배당 이벤트 없음");
                Vec::new()
            }
        };

        tracing::debug!(
            symbol = %symbol,
            bars = bars.len(),
            dividends = dividends.len(),
            "일봉 조회 완료"
        );

        Ok(DailySeries::new(ticker.clone(), bars, dividends))
    }
}

/// NaiveDate를 UTC 자정 OffsetDateTime으로 변환.
fn naive_date_to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime> {
    let month = time::Month::try_from(date.month() as u8)
        .map_err(|e| DataError::Parse(format!("잘못된 월 ({}): {}", date, e)))?;

    time::Date::from_calendar_date(date.year(), month, date.day() as u8)
        .map(|d| d.midnight().assume_utc())
        .map_err(|e| DataError::Parse(format!("잘못된 날짜 ({}): {}", date, e)))
}

/// Unix 타임스탬프(초)를 UTC 날짜로 변환.
fn timestamp_to_date(timestamp: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naive_date_conversion() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let converted = naive_date_to_offset_datetime(date).unwrap();

        assert_eq!(converted.year(), 2024);
        assert_eq!(converted.month(), time::Month::March);
        assert_eq!(converted.day(), 15);
        assert_eq!(converted.hour(), 0);
    }

    #[test]
    fn test_timestamp_to_date() {
        // 2024-01-02 13:00:00 UTC (B3 개장)
        assert_eq!(
            timestamp_to_date(1_704_200_400),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
    }

    #[tokio::test]
    #[ignore] // 네트워크 필요
    async fn test_fetch_daily_live() {
        let provider = YahooMarketData::new(Duration::from_secs(30)).unwrap();
        let end = chrono::Utc::now().date_naive();
        let start = end - ChronoDuration::days(30);

        let series = provider
            .fetch_daily(&Ticker::parse("ITUB4").unwrap(), start, end)
            .await
            .unwrap();
        assert!(!series.is_empty());
    }
}
