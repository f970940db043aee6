//! 펀더멘털 데이터 모델.
//!
//! 외부 문서 소스에서 수집한 값들을 담는 요청 단위 값 객체입니다.
//! - `FundamentalRecord`: LPA(주당순이익)와 배당성향
//! - `FinancialHistory`: 연간 순이익 이력과 직전 분기 순이익

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 연간 순이익 이력의 최대 길이.
pub const MAX_ANNUAL_PROFITS: usize = 3;

/// 펀더멘털 레코드.
///
/// 각 필드는 독립적으로 비어 있을 수 있습니다. 여러 소스를 병합할 때
/// 한 번 채워진 필드는 다시 덮어쓰지 않습니다 (우선순위가 높은 소스가 이김).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundamentalRecord {
    /// LPA (주당순이익)
    pub earnings_per_share: Option<Decimal>,
    /// 배당성향 (소수 비율, 예: 0.45 = 45%)
    pub payout_ratio: Option<Decimal>,
}

impl FundamentalRecord {
    /// 모든 필드가 비어 있는 레코드.
    pub const EMPTY: Self = Self {
        earnings_per_share: None,
        payout_ratio: None,
    };

    /// 새 레코드를 생성합니다.
    pub fn new(earnings_per_share: Option<Decimal>, payout_ratio: Option<Decimal>) -> Self {
        Self {
            earnings_per_share,
            payout_ratio,
        }
    }

    /// 모든 필드가 채워졌는지 확인합니다.
    pub fn is_complete(&self) -> bool {
        self.earnings_per_share.is_some() && self.payout_ratio.is_some()
    }

    /// 모든 필드가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.earnings_per_share.is_none() && self.payout_ratio.is_none()
    }

    /// 비어 있는 필드만 `other`의 값으로 채웁니다.
    ///
    /// 이미 값이 있는 필드는 유지됩니다. 채워진 필드 수를 반환합니다.
    pub fn fill_missing_from(&mut self, other: &FundamentalRecord) -> usize {
        let mut filled = 0;

        if self.earnings_per_share.is_none() && other.earnings_per_share.is_some() {
            self.earnings_per_share = other.earnings_per_share;
            filled += 1;
        }
        if self.payout_ratio.is_none() && other.payout_ratio.is_some() {
            self.payout_ratio = other.payout_ratio;
            filled += 1;
        }

        filled
    }
}

/// 손익 이력.
///
/// `annual_profits`는 항상 시간순(오래된 것 → 최신)이며 최대 3개입니다.
/// 원본 테이블은 보통 최신 연도가 먼저 나오므로 추출기가 순서를 뒤집어 저장합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialHistory {
    annual_profits: Vec<Decimal>,
    last_quarter_profit: Option<Decimal>,
}

impl FinancialHistory {
    /// 최신 연도가 먼저 오는 값들로 이력을 생성합니다.
    ///
    /// 앞에서부터 최대 3개를 취한 뒤 시간순으로 뒤집습니다.
    pub fn from_newest_first(
        newest_first: impl IntoIterator<Item = Decimal>,
        last_quarter_profit: Option<Decimal>,
    ) -> Self {
        let mut annual_profits: Vec<Decimal> =
            newest_first.into_iter().take(MAX_ANNUAL_PROFITS).collect();
        annual_profits.reverse();

        Self {
            annual_profits,
            last_quarter_profit,
        }
    }

    /// 시간순 연간 순이익 (오래된 것 → 최신).
    pub fn annual_profits(&self) -> &[Decimal] {
        &self.annual_profits
    }

    /// 직전 분기 순이익.
    pub fn last_quarter_profit(&self) -> Option<Decimal> {
        self.last_quarter_profit
    }

    /// 분기 순이익과 연간 이력이 모두 있는지 확인합니다.
    pub fn is_complete(&self) -> bool {
        self.last_quarter_profit.is_some() && !self.annual_profits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fill_missing_keeps_first_writer() {
        let mut merged = FundamentalRecord::new(Some(dec!(2.5)), None);
        let filled = merged.fill_missing_from(&FundamentalRecord::new(Some(dec!(9.9)), Some(dec!(0.45))));

        assert_eq!(filled, 1);
        assert_eq!(merged.earnings_per_share, Some(dec!(2.5)));
        assert_eq!(merged.payout_ratio, Some(dec!(0.45)));
        assert!(merged.is_complete());
    }

    #[test]
    fn test_empty_record() {
        assert!(FundamentalRecord::EMPTY.is_empty());
        assert!(!FundamentalRecord::EMPTY.is_complete());
        assert_eq!(FundamentalRecord::default(), FundamentalRecord::EMPTY);
    }

    #[test]
    fn test_history_from_newest_first_is_chronological() {
        let history = FinancialHistory::from_newest_first(
            vec![dec!(30), dec!(20), dec!(10), dec!(5)],
            Some(dec!(8)),
        );

        assert_eq!(history.annual_profits(), &[dec!(10), dec!(20), dec!(30)]);
        assert_eq!(history.last_quarter_profit(), Some(dec!(8)));
        assert!(history.is_complete());
    }

    #[test]
    fn test_history_without_quarter_is_incomplete() {
        let history = FinancialHistory::from_newest_first(vec![dec!(3), dec!(2), dec!(1)], None);
        assert_eq!(history.annual_profits(), &[dec!(1), dec!(2), dec!(3)]);
        assert!(!history.is_complete());
    }

    #[test]
    fn test_history_default_is_empty() {
        let history = FinancialHistory::default();
        assert!(history.annual_profits().is_empty());
        assert_eq!(history.last_quarter_profit(), None);
    }
}
