//! 통합 API 에러 응답 타입.
//!
//! 스크리닝 결과 형식을 쓰지 않는 엔드포인트(잘못된 쿼리, 없는 경로)의 에러 형식입니다.

use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "INVALID_QUERY",
///   "message": "Failed to deserialize query string: 12m: invalid float literal",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "INVALID_QUERY", "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// HTTP 메서드 (GET, POST 등)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// 요청 경로
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Some(chrono::Utc::now().timestamp()),
            method: None,
            path: None,
        }
    }

    /// 요청 정보(메서드, 경로)를 추가합니다.
    #[must_use]
    pub fn with_request_info(mut self, method: &Method, uri: &Uri) -> Self {
        self.method = Some(method.to_string());
        self.path = Some(uri.path().to_string());
        self
    }

    /// 에러 코드 반환.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// 에러 메시지 반환.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 상태 코드와 함께 응답으로 변환합니다.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_response_new() {
        let error = ApiErrorResponse::new("TEST_ERROR", "Test message");
        assert_eq!(error.code(), "TEST_ERROR");
        assert_eq!(error.message(), "Test message");
        assert!(error.timestamp.is_some());
        assert!(error.method.is_none());
    }

    #[test]
    fn test_request_info_and_serialization() {
        let error = ApiErrorResponse::new("INVALID_QUERY", "bad weight")
            .with_request_info(&Method::GET, &"/check_stock/itub4?12m=x".parse::<Uri>().unwrap());

        assert_eq!(error.path.as_deref(), Some("/check_stock/itub4"));
        assert_eq!(error.to_string(), "[INVALID_QUERY] bad weight");

        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["method"], "GET");
        assert_eq!(json["path"], "/check_stock/itub4");
    }

    #[test]
    fn test_optional_fields_are_skipped() {
        let mut error = ApiErrorResponse::new("NOT_FOUND", "no route");
        error.timestamp = None;

        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, r#"{"code":"NOT_FOUND","message":"no route"}"#);
    }
}
