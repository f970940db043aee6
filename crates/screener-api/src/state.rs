//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 여러 요청 간에 공유됩니다.

use screener_analytics::Screener;
use screener_core::{AppConfig, ScreenerResult};
use std::sync::Arc;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 종목 평가 오케스트레이터
    pub screener: Arc<Screener>,

    /// 로드된 설정
    pub config: Arc<AppConfig>,

    /// 서버 시작 시간
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(screener: Screener, config: AppConfig) -> Self {
        Self {
            screener: Arc::new(screener),
            config: Arc::new(config),
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 설정으로 HTTP 소스와 Yahoo Finance를 사용하는 상태를 생성합니다.
    pub fn from_config(config: AppConfig) -> ScreenerResult<Self> {
        let screener = Screener::from_config(&config)?;
        Ok(Self::new(screener, config))
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}
