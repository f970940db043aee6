//! B3 종목 코드(티커) 정의.
//!
//! 모든 외부 소스는 서로 다른 표기를 사용합니다:
//! - Yahoo Finance: `ITUB4.SA`
//! - Investidor10 / Status Invest URL: `itub4`
//! - Fundamentus URL: `ITUB4`
//!
//! `Ticker`는 대문자로 정규화된 코드 하나를 보관하고 각 표기를 파생합니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScreenerError;

/// B3 종목의 Yahoo Finance 접미사.
pub const B3_SUFFIX: &str = ".SA";

/// 티커 최대 길이 (예: "BPAC11", "TAEE11")
const MAX_TICKER_LEN: usize = 12;

/// 대문자로 정규화된 B3 티커.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// 문자열에서 티커를 생성합니다.
    ///
    /// 앞뒤 공백을 제거하고 대문자로 변환합니다. 영숫자가 아닌 문자가 있거나
    /// 비어 있으면 `InvalidInput` 에러를 반환합니다.
    pub fn parse(raw: &str) -> Result<Self, ScreenerError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ScreenerError::InvalidInput("ticker is empty".to_string()));
        }
        if trimmed.len() > MAX_TICKER_LEN {
            return Err(ScreenerError::InvalidInput(format!(
                "ticker '{}' is longer than {} characters",
                trimmed, MAX_TICKER_LEN
            )));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ScreenerError::InvalidInput(format!(
                "ticker '{}' must be alphanumeric",
                trimmed
            )));
        }

        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// 대문자 코드 반환 (예: "ITUB4").
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL 경로용 소문자 코드 반환 (예: "itub4").
    pub fn lowercase(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// 주어진 접미사를 붙인 시세 제공자 심볼 반환.
    pub fn with_suffix(&self, suffix: &str) -> String {
        format!("{}{}", self.0, suffix)
    }

    /// Yahoo Finance 심볼 반환 (예: "ITUB4.SA").
    pub fn yahoo_symbol(&self) -> String {
        self.with_suffix(B3_SUFFIX)
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = ScreenerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
