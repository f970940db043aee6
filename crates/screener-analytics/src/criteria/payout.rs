//! 배당성향 범위 기준.

use rust_decimal::Decimal;

use super::Verdict;

/// 배당성향이 `[min, max]` 범위(양 끝 포함)인지 판정합니다.
pub fn payout_within_bounds(payout_ratio: Option<Decimal>, min: Decimal, max: Decimal) -> Verdict {
    match payout_ratio {
        Some(payout) => Verdict::from_bool(payout >= min && payout <= max),
        None => Verdict::insufficient("payout ratio unavailable"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn check(payout: Option<Decimal>) -> bool {
        payout_within_bounds(payout, dec!(0.30), dec!(5.00)).passed()
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(check(Some(dec!(0.30))));
        assert!(!check(Some(dec!(0.2999))));
        assert!(check(Some(dec!(5.00))));
        assert!(!check(Some(dec!(5.0001))));
        assert!(check(Some(dec!(1.2))));
    }

    #[test]
    fn test_missing_payout_fails() {
        assert!(!check(None));
    }
}
