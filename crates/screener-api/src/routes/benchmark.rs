//! 변동성 기준 분포 endpoint.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use screener_analytics::BenchmarkSummary;
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;

/// 현재 분포 요약. 아직 없으면 생성합니다.
///
/// GET /benchmark
pub async fn get_benchmark(State(state): State<Arc<AppState>>) -> Json<BenchmarkSummary> {
    let dist = state.screener.benchmark().get().await;
    Json(dist.summary(state.screener.engine().config().volatility_percentile))
}

/// 분포를 다시 생성합니다.
///
/// POST /benchmark/refresh
pub async fn refresh_benchmark(State(state): State<Arc<AppState>>) -> Json<BenchmarkSummary> {
    info!("변동성 기준 분포 재생성 요청");

    let dist = state.screener.benchmark().refresh().await;
    Json(dist.summary(state.screener.engine().config().volatility_percentile))
}

/// 기준 분포 라우터 생성.
pub fn benchmark_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_benchmark))
        .route("/refresh", post(refresh_benchmark))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_router;
    use crate::testing::{basket_market, create_test_state};
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_get_builds_and_summarizes() {
        let state = create_test_state(Vec::new(), basket_market());
        let app = create_router(state.clone());

        let (status, json) = call(app, Method::GET, "/benchmark").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 3);
        assert_eq!(json["percentile"], 0.9);
        assert!(json["threshold"].is_f64());
        assert!(json["volatilities"]["PETR4"].is_f64());
        assert!(state.screener.benchmark().current().await.is_some());
    }

    #[tokio::test]
    async fn test_refresh_replaces_distribution() {
        let state = create_test_state(Vec::new(), basket_market());
        let first = state.screener.benchmark().get().await;

        let (status, json) =
            call(create_router(state.clone()), Method::POST, "/benchmark/refresh").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 3);

        let current = state.screener.benchmark().current().await.unwrap();
        assert!(!Arc::ptr_eq(&first, &current));
    }

    #[tokio::test]
    async fn test_refresh_requires_post() {
        let state = create_test_state(Vec::new(), basket_market());

        let (status, _) = call(create_router(state), Method::GET, "/benchmark/refresh").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
