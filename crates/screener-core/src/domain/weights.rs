//! 배당수익률 기간 가중치.

use serde::{Deserialize, Serialize};

/// 12/24/36개월 구간별 배당수익률 가중치.
///
/// 합계가 1.0이 되도록 강제하지 않습니다. 합계가 1.0이 아니면 가중 수익률이
/// 그만큼 확대/축소되므로 실질적인 최소 수익률 기준도 함께 달라집니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodWeights {
    /// 최근 0~12개월 구간
    #[serde(rename = "12m")]
    pub last_12m: f64,
    /// 12~24개월 구간
    #[serde(rename = "24m")]
    pub last_24m: f64,
    /// 24~36개월 구간
    #[serde(rename = "36m")]
    pub last_36m: f64,
}

impl Default for PeriodWeights {
    fn default() -> Self {
        Self {
            last_12m: 0.5,
            last_24m: 0.3,
            last_36m: 0.2,
        }
    }
}

impl PeriodWeights {
    /// 새 가중치를 생성합니다.
    pub fn new(last_12m: f64, last_24m: f64, last_36m: f64) -> Self {
        Self {
            last_12m,
            last_24m,
            last_36m,
        }
    }

    /// 최근 구간부터의 가중치 배열.
    pub fn as_array(&self) -> [f64; 3] {
        [self.last_12m, self.last_24m, self.last_36m]
    }

    /// 가중치 합계.
    pub fn sum(&self) -> f64 {
        self.last_12m + self.last_24m + self.last_36m
    }

    /// 합계가 1.0인지 확인합니다 (부동소수 오차 허용).
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-9
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = PeriodWeights::default();
        assert_eq!(weights.as_array(), [0.5, 0.3, 0.2]);
        assert!(weights.is_normalized());
    }

    #[test]
    fn test_unnormalized_weights_are_kept() {
        let weights = PeriodWeights::new(1.0, 1.0, 1.0);
        assert!(!weights.is_normalized());
        assert_eq!(weights.sum(), 3.0);
    }

    #[test]
    fn test_serde_period_keys() {
        let weights: PeriodWeights =
            serde_json::from_str(r#"{"12m": 0.6, "24m": 0.3, "36m": 0.1}"#).unwrap();
        assert_eq!(weights.last_12m, 0.6);
        assert_eq!(weights.last_36m, 0.1);
    }
}
