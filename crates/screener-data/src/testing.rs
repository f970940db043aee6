//! 테스트용 in-memory 문서 fetcher.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::{DataError, Result};
use crate::provider::DocumentFetcher;

/// URL별 고정 문서를 반환하는 fetcher. 등록되지 않은 URL은 404.
#[derive(Debug, Default, Clone)]
pub(crate) struct StaticDocuments {
    documents: HashMap<String, String>,
}

impl StaticDocuments {
    pub(crate) fn with(mut self, url: &str, body: &str) -> Self {
        self.documents.insert(url.to_string(), body.to_string());
        self
    }
}

#[async_trait]
impl DocumentFetcher for StaticDocuments {
    async fn fetch_document(&self, url: &str) -> Result<String> {
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| DataError::HttpStatus {
                status: 404,
                url: url.to_string(),
            })
    }
}
