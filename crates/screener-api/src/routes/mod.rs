//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/` - 안내 문구
//! - `/health` - 헬스 체크
//! - `/check_stock/{ticker}` - 종목 평가
//! - `/benchmark` - 변동성 기준 분포 조회/재생성

pub mod benchmark;
pub mod check_stock;
pub mod health;

use axum::{
    http::{Method, StatusCode, Uri},
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;

use crate::error::ApiErrorResponse;
use crate::state::AppState;

pub use benchmark::benchmark_router;
pub use check_stock::{check_stock, WeightsQuery};
pub use health::{health_router, welcome, ComponentHealth, ComponentStatus, HealthResponse};

/// 등록되지 않은 경로에 대한 응답.
async fn not_found(method: Method, uri: Uri) -> Response {
    ApiErrorResponse::new("NOT_FOUND", format!("no route for {}", uri.path()))
        .with_request_info(&method, &uri)
        .into_response_with(StatusCode::NOT_FOUND)
}

/// 전체 API 라우터 생성 (미들웨어 제외).
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(welcome))
        .nest("/health", health_router())
        .route("/check_stock/{ticker}", get(check_stock))
        .nest("/benchmark", benchmark_router())
        .fallback(not_found)
        .with_state(state)
}
