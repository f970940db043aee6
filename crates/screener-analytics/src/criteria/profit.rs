//! 순이익 기준 (직전 분기 흑자, 3년 연속 증가).

use rust_decimal::Decimal;
use screener_core::MAX_ANNUAL_PROFITS;

use super::Verdict;

/// 직전 분기 순이익이 양수인지 판정합니다.
pub fn positive_last_quarter_profit(last_quarter_profit: Option<Decimal>) -> Verdict {
    match last_quarter_profit {
        Some(profit) => Verdict::from_bool(profit > Decimal::ZERO),
        None => Verdict::insufficient("last quarter profit unavailable"),
    }
}

/// 시간순 연간 순이익이 3개 이상이고 엄격하게 증가하는지 판정합니다.
pub fn three_year_profit_growth(annual_profits: &[Decimal]) -> Verdict {
    if annual_profits.len() < MAX_ANNUAL_PROFITS {
        return Verdict::insufficient(format!(
            "need {} annual profits, got {}",
            MAX_ANNUAL_PROFITS,
            annual_profits.len()
        ));
    }

    Verdict::from_bool(annual_profits.windows(2).all(|w| w[1] > w[0]))
}
