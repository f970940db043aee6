//! 헬스 체크 endpoint.
//!
//! 서버 상태와 변동성 기준 분포의 생성 여부를 알려줍니다.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// 헬스 체크 응답 구조체.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 전체 서비스 상태 ("healthy" | "degraded")
    pub status: String,

    /// API 버전
    pub version: String,

    /// 서버 업타임(초)
    pub uptime_secs: i64,

    /// 현재 시간 (ISO 8601)
    pub timestamp: String,

    /// 개별 컴포넌트 상태
    pub components: ComponentHealth,
}

/// 개별 컴포넌트 상태.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// 변동성 기준 분포 상태
    pub benchmark: ComponentStatus,

    /// 펀더멘털 소스 구성
    pub sources: ComponentStatus,
}

/// 컴포넌트 상태.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentStatus {
    /// 상태 ("up" | "down" | "pending" | "not_configured")
    pub status: String,

    /// 추가 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentStatus {
    /// 비정상 상태.
    pub fn down(message: impl Into<String>) -> Self {
        Self {
            status: "down".to_string(),
            message: Some(message.into()),
        }
    }

    /// 아직 초기화되지 않은 상태.
    pub fn pending(message: impl Into<String>) -> Self {
        Self {
            status: "pending".to_string(),
            message: Some(message.into()),
        }
    }

    /// 미설정 상태.
    pub fn not_configured() -> Self {
        Self {
            status: "not_configured".to_string(),
            message: None,
        }
    }

    /// 정보 포함 정상 상태.
    pub fn up_with_info(message: impl Into<String>) -> Self {
        Self {
            status: "up".to_string(),
            message: Some(message.into()),
        }
    }
}

/// 안내 문구.
///
/// GET /
pub async fn welcome() -> &'static str {
    "Welcome to the B3 stock screener API! Use /check_stock/{ticker} to check a stock."
}

/// 헬스 체크.
///
/// 기준 분포 생성을 유발하지 않습니다. 분포가 비어 있으면 "degraded"로 보고합니다.
/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut overall_status = "healthy";

    let benchmark_status = match state.screener.benchmark().current().await {
        None => ComponentStatus::pending("built on first request"),
        Some(dist) if dist.is_empty() => {
            overall_status = "degraded";
            ComponentStatus::down("no volatility could be computed for the basket")
        }
        Some(dist) => ComponentStatus::up_with_info(format!(
            "{} of {} tickers, built at {}",
            dist.len(),
            state.screener.benchmark().tickers().len(),
            dist.built_at().to_rfc3339()
        )),
    };

    let sources = state.screener.source_names();
    let sources_status = if sources.is_empty() {
        overall_status = "degraded";
        ComponentStatus::not_configured()
    } else {
        ComponentStatus::up_with_info(sources.join(" > "))
    };

    let response = HealthResponse {
        status: overall_status.to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        components: ComponentHealth {
            benchmark: benchmark_status,
            sources: sources_status,
        },
    };

    (StatusCode::OK, Json(response))
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(health_check))
}
