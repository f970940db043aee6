//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 외부 데이터 수집 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 요청 전송/수신 실패
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// 성공이 아닌 HTTP 상태 코드
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// 타임아웃
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// 문서 구조 불일치 또는 값 파싱 실패
    #[error("Parse error: {0}")]
    Parse(String),

    /// 응답은 받았지만 데이터가 없음
    #[error("No data: {0}")]
    NoData(String),
}

/// 데이터 작업을 위한 Result 타입.
pub type Result<T> = std::result::Result<T, DataError>;

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataError::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            DataError::HttpStatus {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            DataError::Fetch(err.to_string())
        }
    }
}

impl From<DataError> for screener_core::ScreenerError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::Fetch(_) | DataError::HttpStatus { .. } | DataError::Timeout(_) => {
                screener_core::ScreenerError::Network(err.to_string())
            }
            DataError::Parse(_) | DataError::NoData(_) => {
                screener_core::ScreenerError::Data(err.to_string())
            }
        }
    }
}
