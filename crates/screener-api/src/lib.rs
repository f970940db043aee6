//! 스크리너 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - 종목 평가 엔드포인트 (`/check_stock/{ticker}`)
//! - 헬스 체크 및 변동성 기준 조회/재생성 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`error`]: 통합 API 에러 응답

pub mod error;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ApiErrorResponse;
pub use routes::create_router;
pub use state::AppState;
