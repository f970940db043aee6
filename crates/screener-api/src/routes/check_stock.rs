//! 종목 평가 endpoint.
//!
//! `GET /check_stock/{ticker}?12m=&24m=&36m=`
//!
//! 데이터 부족은 200 응답의 `errors`로 보고합니다. 평가 도중의 예기치 않은 실패(패닉 포함)는
//! 같은 JSON 형식에 에러를 덧붙여 500으로 응답합니다.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use screener_core::{PeriodWeights, ScreenerError, ScreeningResult};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::ApiErrorResponse;
use crate::state::AppState;

/// 배당수익률 기간 가중치 쿼리.
#[derive(Debug, Default, Deserialize)]
pub struct WeightsQuery {
    #[serde(rename = "12m")]
    pub last_12m: Option<f64>,
    #[serde(rename = "24m")]
    pub last_24m: Option<f64>,
    #[serde(rename = "36m")]
    pub last_36m: Option<f64>,
}

impl WeightsQuery {
    /// 가중치가 하나라도 주어지면 나머지는 0으로 채웁니다. 모두 없으면 `None` (기본 가중치).
    pub fn into_weights(self) -> Option<PeriodWeights> {
        if self.last_12m.is_none() && self.last_24m.is_none() && self.last_36m.is_none() {
            return None;
        }

        Some(PeriodWeights::new(
            self.last_12m.unwrap_or(0.0),
            self.last_24m.unwrap_or(0.0),
            self.last_36m.unwrap_or(0.0),
        ))
    }
}

/// 종목 평가.
///
/// GET /check_stock/{ticker}
pub async fn check_stock(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
    method: Method,
    uri: Uri,
    query: Result<Query<WeightsQuery>, QueryRejection>,
) -> Response {
    let weights = match query {
        Ok(Query(query)) => query.into_weights(),
        Err(rejection) => {
            warn!(ticker = %ticker, error = %rejection, "잘못된 가중치 쿼리");
            return ApiErrorResponse::new("INVALID_QUERY", rejection.body_text())
                .with_request_info(&method, &uri)
                .into_response_with(StatusCode::BAD_REQUEST);
        }
    };

    info!(ticker = %ticker, weights = ?weights, "종목 평가 요청");

    // 평가 태스크의 패닉도 응답으로 변환되도록 별도 태스크에서 실행
    let screener = state.screener.clone();
    let raw_ticker = ticker.clone();
    let task = tokio::spawn(async move { screener.check_stock(&raw_ticker, weights).await });

    let outcome = task.await.unwrap_or_else(|join_error| {
        error!(ticker = %ticker, error = %join_error, "종목 평가 태스크 비정상 종료");
        Err(ScreenerError::Internal(join_error.to_string()))
    });

    match outcome {
        Ok(result) => {
            info!(
                ticker = result.ticker(),
                all_criteria_met = result.all_criteria_met(),
                errors = result.errors().len(),
                "종목 평가 완료"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) if e.is_client_error() => {
            warn!(ticker = %ticker, error = %e, "잘못된 티커");
            (
                StatusCode::BAD_REQUEST,
                Json(ScreeningResult::failed(ticker, e.to_string())),
            )
                .into_response()
        }
        Err(e) => {
            error!(ticker = %ticker, error = %e, "종목 평가 실패");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ScreeningResult::failed(
                    ticker,
                    format!("unexpected server error: {e}"),
                )),
            )
                .into_response()
        }
    }
}
