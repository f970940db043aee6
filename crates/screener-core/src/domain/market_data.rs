//! 시장 데이터 구조체.
//!
//! 시세 제공자가 반환하는 일봉(OHLCV)과 배당 이벤트를 정의합니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Ticker;

/// 일봉 데이터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    /// 거래일
    pub date: NaiveDate,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
    /// 거래량 (주식 수)
    pub volume: Decimal,
}

impl DailyBar {
    /// 종가만으로 일봉을 생성합니다 (시가/고가/저가 = 종가).
    pub fn from_close(date: NaiveDate, close: Decimal, volume: Decimal) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume,
        }
    }

    /// 거래대금 (종가 × 거래량).
    pub fn financial_volume(&self) -> Decimal {
        self.close * self.volume
    }
}

/// 배당 이벤트.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividendEvent {
    /// 지급 기준일 (배당락일)
    pub date: NaiveDate,
    /// 주당 배당금
    pub amount: Decimal,
}

/// 종목별 일봉 + 배당 시계열.
///
/// 일봉과 배당은 항상 날짜 오름차순으로 정렬되어 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    /// 종목 코드
    pub ticker: Ticker,
    bars: Vec<DailyBar>,
    dividends: Vec<DividendEvent>,
}

impl DailySeries {
    /// 새 시계열을 생성합니다 (날짜순 정렬).
    pub fn new(ticker: Ticker, mut bars: Vec<DailyBar>, mut dividends: Vec<DividendEvent>) -> Self {
        bars.sort_by_key(|b| b.date);
        dividends.sort_by_key(|d| d.date);

        Self {
            ticker,
            bars,
            dividends,
        }
    }

    /// 빈 시계열을 생성합니다.
    pub fn empty(ticker: Ticker) -> Self {
        Self::new(ticker, Vec::new(), Vec::new())
    }

    /// 전체 일봉.
    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    /// 전체 배당 이벤트.
    pub fn dividends(&self) -> &[DividendEvent] {
        &self.dividends
    }

    /// 일봉이 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// `start` 이후(포함)의 일봉.
    pub fn bars_since(&self, start: NaiveDate) -> &[DailyBar] {
        let idx = self.bars.partition_point(|b| b.date < start);
        &self.bars[idx..]
    }

    /// `start` 이후(포함)의 종가 목록.
    pub fn closes_since(&self, start: NaiveDate) -> Vec<Decimal> {
        self.bars_since(start).iter().map(|b| b.close).collect()
    }

    /// `start` 이후(포함)의 배당 이벤트.
    pub fn dividends_since(&self, start: NaiveDate) -> &[DividendEvent] {
        let idx = self.dividends.partition_point(|d| d.date < start);
        &self.dividends[idx..]
    }

    /// 마지막 종가.
    pub fn last_close(&self) -> Option<Decimal> {
        self.bars.last().map(|b| b.close)
    }
}
