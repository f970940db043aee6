//! 설정 관리.
//!
//! 기본값, 선택적 TOML 파일, `SCREENER__` 접두사의 환경 변수를 차례로 적용합니다.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::PeriodWeights;
use crate::error::ScreenerResult;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 펀더멘털 문서 소스 설정
    pub sources: SourcesConfig,
    /// 시세 데이터 설정
    pub market_data: MarketDataConfig,
    /// 변동성 기준 바스켓 설정
    pub benchmark: BenchmarkConfig,
    /// 스크리닝 기준 설정
    pub criteria: CriteriaConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_secs: 120,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 펀더멘털 문서 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// 문서 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 요청 시 사용할 User-Agent
    pub user_agent: String,
    /// Investidor10 기본 URL
    pub investidor10_url: String,
    /// Status Invest 기본 URL
    pub statusinvest_url: String,
    /// Fundamentus 기본 URL
    pub fundamentus_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            investidor10_url: "https://investidor10.com.br".to_string(),
            statusinvest_url: "https://statusinvest.com.br".to_string(),
            fundamentus_url: "https://www.fundamentus.com.br".to_string(),
        }
    }
}

/// 시세 데이터 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketDataConfig {
    /// 시세 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// 조회 기간 (일, 배당 36개월 구간을 덮어야 함)
    pub lookback_days: i64,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            lookback_days: 1095,
        }
    }
}

/// 변동성 기준 바스켓 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// 기준 종목 목록
    pub tickers: Vec<String>,
    /// 변동성 계산 기간 (일)
    pub lookback_days: i64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            tickers: [
                "ITUB4", "BBDC4", "PETR4", "VALE3", "ABEV3", "WEGE3", "PRIO3", "MGLU3", "RENT3",
                "BPAC11",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
            lookback_days: 365,
        }
    }
}

/// 스크리닝 기준 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CriteriaConfig {
    /// 최소 평균 거래대금 (BRL)
    pub min_liquidity: Decimal,
    /// 거래대금 평균 기간 (일)
    pub liquidity_lookback_days: i64,
    /// 배당성향 하한
    pub min_payout: Decimal,
    /// 배당성향 상한
    pub max_payout: Decimal,
    /// 변동성 상한 분위수
    pub volatility_percentile: f64,
    /// 변동성 계산 기간 (일)
    pub volatility_lookback_days: i64,
    /// 최소 가중 배당수익률
    pub min_dividend_yield: f64,
    /// 기본 구간 가중치
    pub default_weights: PeriodWeights,
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self {
            min_liquidity: dec!(3000000),
            liquidity_lookback_days: 90,
            min_payout: dec!(0.30),
            max_payout: dec!(5.00),
            volatility_percentile: 0.90,
            volatility_lookback_days: 365,
            min_dividend_yield: 0.04,
            default_weights: PeriodWeights::default(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> ScreenerResult<Self> {
        let builder = config::Config::builder()
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("SCREENER")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("benchmark.tickers")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> ScreenerResult<Self> {
        Self::load("config/default.toml")
    }
}
