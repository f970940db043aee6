//! 스크리닝 시스템의 에러 타입.
//!
//! 이 모듈은 스크리너 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 스크리너 에러.
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력 (예: 티커 형식 오류)
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 데이터 에러
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 스크리닝 작업을 위한 Result 타입.
pub type ScreenerResult<T> = Result<T, ScreenerError>;

impl ScreenerError {
    /// 호출자 입력 문제로 발생한 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ScreenerError::InvalidInput(_))
    }
}

impl From<config::ConfigError> for ScreenerError {
    fn from(err: config::ConfigError) -> Self {
        ScreenerError::Config(err.to_string())
    }
}
