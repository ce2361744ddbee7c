//! HTTP client for the CMS query API

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::GroqQuery;
use crate::cache::QueryCache;
use crate::config::CmsConfig;
use crate::error::{BlogError, Result};

/// Anything that can answer GROQ queries.
///
/// `max_staleness` bounds how old a cached answer may be; sources without a
/// cache ignore it.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, query: &GroqQuery, max_staleness: Duration) -> Result<Arc<Value>>;
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

/// Query client for the hosted CMS
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    cache: Option<QueryCache>,
}

impl CmsClient {
    /// Build a client for a validated backend configuration
    pub fn new(cms: &CmsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cms.timeout_secs.max(1)))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let endpoint = format!(
            "{}/v{}/data/query/{}",
            cms.api_base(),
            cms.api_version.trim_start_matches('v'),
            cms.dataset.trim()
        );
        tracing::debug!(endpoint = %endpoint, "CMS client created");

        Ok(Self {
            http,
            endpoint,
            token: cms.token.clone(),
            cache: None,
        })
    }

    /// Serve repeated queries from `cache` within the caller's staleness window
    pub fn with_cache(mut self, cache: QueryCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute(&self, query: &GroqQuery) -> Result<Value> {
        let started = std::time::Instant::now();
        let mut request = self.http.get(&self.endpoint).query(&query.to_query_pairs());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(200).collect();
            tracing::warn!(status = status.as_u16(), body = %body, "CMS query rejected");
            return Err(BlogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: QueryResponse = serde_json::from_slice(&bytes)?;
        tracing::debug!(
            single = query.is_single(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "CMS query completed"
        );
        Ok(parsed.result)
    }
}

#[async_trait]
impl ContentSource for CmsClient {
    async fn fetch(&self, query: &GroqQuery, max_staleness: Duration) -> Result<Arc<Value>> {
        match &self.cache {
            Some(cache) => {
                cache
                    .get_or_fetch(&query.cache_key(), max_staleness, || self.execute(query))
                    .await
            }
            None => Ok(Arc::new(self.execute(query).await?)),
        }
    }
}
