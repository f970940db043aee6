//! 브라질 로케일 숫자 파싱.
//!
//! 모든 문서 소스는 pt-BR 표기를 사용합니다:
//! - `.`은 천 단위 구분자, `,`은 소수점 (`"1.234,56"` → `1234.56`)
//! - 통화 접두사 `R$`와 단위 접미사 (`mil`/`K`, `mi`/`M`, `bi`/`B`)
//! - 값 없음 표기: `-`, `--`, `N/A`, 빈 문자열

use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<sign>[-−+])?\s*(?P<digits>\d[\d.]*(?:,\d+)?)\s*(?P<unit>mil|mi|bi|k|m|b)?$")
        .unwrap()
});

/// 값 없음을 뜻하는 표기인지 확인합니다.
fn is_placeholder(text: &str) -> bool {
    matches!(text, "" | "-" | "--" | "−")
        || text.eq_ignore_ascii_case("n/a")
        || text.eq_ignore_ascii_case("n/d")
}

fn unit_multiplier(unit: &str) -> Decimal {
    match unit.to_lowercase().as_str() {
        "mil" | "k" => Decimal::from(1_000),
        "mi" | "m" => Decimal::from(1_000_000),
        "bi" | "b" => Decimal::from(1_000_000_000),
        _ => Decimal::ONE,
    }
}

/// pt-BR 숫자 문자열을 Decimal로 파싱합니다.
///
/// `%` 기호는 제거만 하고 값은 그대로 둡니다. 퍼센트를 비율로 바꾸려면
/// [`parse_br_percentage`]를 사용하세요.
///
/// # 예시
/// - `"1.234,56"` → `1234.56`
/// - `"R$ 3,45"` → `3.45`
/// - `"-12,5 mi"` → `-12500000`
/// - `"-"` → `None`
pub fn parse_br_decimal(text: &str) -> Option<Decimal> {
    let mut cleaned = text.trim().replace('\u{a0}', " ");
    if let Some(rest) = cleaned.strip_prefix("R$") {
        cleaned = rest.trim().to_string();
    }
    let cleaned = cleaned.trim_end_matches('%').trim();

    if is_placeholder(cleaned) {
        return None;
    }

    let caps = NUMBER_PATTERN.captures(cleaned)?;
    let digits = caps.name("digits")?.as_str().replace('.', "").replace(',', ".");
    let mut value = Decimal::from_str(&digits).ok()?;

    if let Some(unit) = caps.name("unit") {
        value *= unit_multiplier(unit.as_str());
    }
    if matches!(caps.name("sign").map(|m| m.as_str()), Some("-") | Some("−")) {
        value = -value;
    }

    Some(value.normalize())
}

/// pt-BR 퍼센트 문자열을 소수 비율로 파싱합니다 (`"45,5%"` → `0.455`).
///
/// 배당성향 표기는 항상 퍼센트이므로 `%` 기호가 없어도 100으로 나눕니다.
pub fn parse_br_percentage(text: &str) -> Option<Decimal> {
    parse_br_decimal(text).map(|v| (v / Decimal::ONE_HUNDRED).normalize())
}
