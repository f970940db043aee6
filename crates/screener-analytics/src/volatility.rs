//! 연율화 변동성과 기준 분포.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use screener_core::Ticker;
use serde::Serialize;
use std::collections::BTreeMap;

/// 연간 거래일 수.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// 변동성 계산에 필요한 최소 수익률 개수 (표본 표준편차).
pub const MIN_RETURNS: usize = 2;

/// 일간 수익률 (`close[i] / close[i-1] - 1`).
///
/// 직전 종가가 0 이하인 구간은 건너뜁니다.
pub fn daily_returns(closes: &[Decimal]) -> Vec<f64> {
    closes
        .windows(2)
        .filter_map(|w| {
            let prev = w[0].to_f64()?;
            let curr = w[1].to_f64()?;
            (prev > 0.0).then(|| curr / prev - 1.0)
        })
        .collect()
}

/// 표본 표준편차 (n-1).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Some(variance.sqrt())
}

/// 종가 시계열의 연율화 변동성 (`std(returns) * sqrt(252)`).
///
/// 수익률이 [`MIN_RETURNS`]개 미만이면 `None`.
pub fn annualized_volatility(closes: &[Decimal]) -> Option<f64> {
    let returns = daily_returns(closes);
    if returns.len() < MIN_RETURNS {
        return None;
    }

    sample_std(&returns)
        .map(|std| std * TRADING_DAYS_PER_YEAR.sqrt())
        .filter(|v| v.is_finite())
}

/// 기준 바스켓의 종목별 연율화 변동성 분포.
///
/// 생성 후에는 변경되지 않습니다.
#[derive(Debug, Clone)]
pub struct BenchmarkDistribution {
    volatilities: BTreeMap<Ticker, f64>,
    sorted: Vec<f64>,
    built_at: DateTime<Utc>,
}

impl BenchmarkDistribution {
    /// 종목별 변동성으로 분포를 생성합니다.
    pub fn from_volatilities(volatilities: impl IntoIterator<Item = (Ticker, f64)>) -> Self {
        let volatilities: BTreeMap<Ticker, f64> = volatilities
            .into_iter()
            .filter(|(_, v)| v.is_finite())
            .collect();

        let mut sorted: Vec<f64> = volatilities.values().copied().collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Self {
            volatilities,
            sorted,
            built_at: Utc::now(),
        }
    }

    /// 종목별 종가로 분포를 생성합니다.
    ///
    /// 변동성을 계산할 수 없는 종목은 제외됩니다.
    pub fn from_closes(closes: &BTreeMap<Ticker, Vec<Decimal>>) -> Self {
        Self::from_volatilities(closes.iter().filter_map(|(ticker, series)| {
            match annualized_volatility(series) {
                Some(vol) => Some((ticker.clone(), vol)),
                None => {
                    tracing::debug!(ticker = %ticker, points = series.len(), "변동성 계산 불가, 제외");
                    None
                }
            }
        }))
    }

    /// 빈 분포.
    pub fn empty() -> Self {
        Self::from_volatilities(std::iter::empty())
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// 종목별 변동성.
    pub fn volatilities(&self) -> &BTreeMap<Ticker, f64> {
        &self.volatilities
    }

    /// 선형 보간 분위수 (`h = (n-1)p`).
    ///
    /// 빈 분포이거나 `p`가 [0, 1] 밖이면 `None`.
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if self.sorted.is_empty() || !(0.0..=1.0).contains(&p) {
            return None;
        }

        let h = (self.sorted.len() - 1) as f64 * p;
        let lower = h.floor() as usize;
        let upper = h.ceil() as usize;
        let fraction = h - lower as f64;

        Some(self.sorted[lower] + (self.sorted[upper] - self.sorted[lower]) * fraction)
    }

    /// 요약 정보.
    pub fn summary(&self, percentile: f64) -> BenchmarkSummary {
        BenchmarkSummary {
            count: self.len(),
            percentile,
            threshold: self.quantile(percentile),
            built_at: self.built_at,
            volatilities: self
                .volatilities
                .iter()
                .map(|(t, v)| (t.to_string(), *v))
                .collect(),
        }
    }
}

/// 기준 분포 요약.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkSummary {
    /// 분포에 포함된 종목 수
    pub count: usize,
    /// 기준 분위수
    pub percentile: f64,
    /// 분위수 값 (변동성 상한)
    pub threshold: Option<f64>,
    /// 생성 시각
    pub built_at: DateTime<Utc>,
    /// 종목별 변동성
    pub volatilities: BTreeMap<String, f64>,
}
