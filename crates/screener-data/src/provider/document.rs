//! HTML 문서 전송 계층.

use async_trait::async_trait;
use reqwest::Client;
use screener_core::SourcesConfig;
use std::time::Duration;

use crate::error::{DataError, Result};

/// URL에서 HTML 문서를 가져오는 전송 계층.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// 문서 본문 조회.
    async fn fetch_document(&self, url: &str) -> Result<String>;
}

/// reqwest 기반 문서 fetcher.
///
/// 모든 요청에 브라우저 User-Agent와 고정 타임아웃을 적용합니다.
#[derive(Debug, Clone)]
pub struct HttpDocumentFetcher {
    client: Client,
}

impl HttpDocumentFetcher {
    /// 타임아웃과 User-Agent로 생성합니다.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| DataError::Fetch(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { client })
    }

    /// 소스 설정에서 생성합니다.
    pub fn from_config(config: &SourcesConfig) -> Result<Self> {
        Self::new(Duration::from_secs(config.timeout_secs), &config.user_agent)
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    async fn fetch_document(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "문서 요청");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
