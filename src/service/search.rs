//! Google Custom Search API client service
//!
//! Provides ranked web results used as evidence for claims.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::service::capability::{CapabilityError, SearchHit, WebSearch};

const SEARCH_PATH: &str = "customsearch/v1";

/// The API rejects `num` outside this range
const MAX_RESULTS_PER_QUERY: usize = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    title: Option<String>,
    snippet: Option<String>,
    link: Option<String>,
}

/// Client for the Google Custom Search JSON API
pub struct GoogleSearchClient {
    client: Client,
    base_url: String,
    api_key: String,
    engine_id: String,
}

impl GoogleSearchClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::builder()
                .user_agent("credicheck/1.0")
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.into(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        }
    }

    fn request_url(&self, query: &str, num: usize) -> Result<Url, CapabilityError> {
        let endpoint = format!("{}/{}", self.base_url.trim_end_matches('/'), SEARCH_PATH);
        let num = num.to_string();
        Url::parse_with_params(
            &endpoint,
            &[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ],
        )
        .map_err(|e| CapabilityError::Request(format!("invalid search endpoint {}: {}", endpoint, e)))
    }
}

#[async_trait]
impl WebSearch for GoogleSearchClient {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, CapabilityError> {
        let num = max_results.clamp(1, MAX_RESULTS_PER_QUERY);
        let url = self.request_url(query, num)?;

        tracing::debug!(query_length = query.len(), num = num, "Querying Google Custom Search");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CapabilityError::Request(format!(
                "Unexpected status {}: {}",
                status, body
            )));
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| {
            CapabilityError::Malformed(format!("Failed to deserialize search response: {}", e))
        })?;

        let hits = hits_from_response(parsed, max_results);

        tracing::debug!(hit_count = hits.len(), "Search completed");

        Ok(hits)
    }
}

/// Map raw items into hits, keeping ranking order and skipping incomplete items
fn hits_from_response(response: SearchResponse, max_results: usize) -> Vec<SearchHit> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            Some(SearchHit {
                title: item.title?,
                snippet: item.snippet?,
                link: item.link?,
            })
        })
        .take(max_results)
        .collect()
}
