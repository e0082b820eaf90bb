//! Source retrieval service
//!
//! Looks up web evidence for a claim, keeping the search engine's ranking.

use std::sync::Arc;
use std::time::Duration;

use crate::model::config::MAX_SOURCES_PER_CLAIM;
use crate::model::Source;
use crate::service::capability::{CapabilityError, SearchHit, WebSearch, with_timeout};

/// Service for retrieving sources for a single claim
#[derive(Clone)]
pub struct SourceRetriever {
    search: Option<Arc<dyn WebSearch>>,
    limit: usize,
    timeout: Duration,
}

impl SourceRetriever {
    /// `None` disables search; `limit` is clamped to `1..=MAX_SOURCES_PER_CLAIM`
    pub fn new(search: Option<Arc<dyn WebSearch>>, limit: usize, timeout: Duration) -> Self {
        Self {
            search,
            limit: limit.clamp(1, MAX_SOURCES_PER_CLAIM),
            timeout,
        }
    }

    /// Search with the claim text verbatim
    pub async fn retrieve(&self, claim: &str) -> Result<Vec<Source>, CapabilityError> {
        let search = self
            .search
            .as_ref()
            .ok_or(CapabilityError::NotConfigured("web search"))?;

        let hits = with_timeout(self.timeout, search.search(claim, self.limit)).await?;

        let sources: Vec<Source> = hits.into_iter().take(self.limit).map(Source::from).collect();

        tracing::debug!(source_count = sources.len(), "Sources retrieved");

        Ok(sources)
    }
}

impl From<SearchHit> for Source {
    fn from(hit: SearchHit) -> Self {
        Source {
            title: hit.title,
            summary: hit.snippet,
            link: hit.link,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::ScriptedSearch;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_retrieve_maps_hits_in_order() {
        let search = Arc::new(ScriptedSearch::with_hits(2));
        let retriever = SourceRetriever::new(Some(search), 3, TIMEOUT);

        let sources = retriever.retrieve("Claim").await.unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].title, "Claim #0");
        assert_eq!(sources[0].summary, "snippet 0");
        assert_eq!(sources[1].link, "https://example.org/1");
    }

    #[tokio::test]
    async fn test_retrieve_caps_at_three() {
        let search = Arc::new(ScriptedSearch::with_hits(8));
        let retriever = SourceRetriever::new(Some(search), 10, TIMEOUT);

        let sources = retriever.retrieve("Claim").await.unwrap();
        assert_eq!(sources.len(), MAX_SOURCES_PER_CLAIM);
    }

    #[tokio::test]
    async fn test_claim_is_passed_verbatim() {
        let search = Arc::new(ScriptedSearch::from_fn(|query, max| {
            assert_eq!(query, "  Exact claim text.  ");
            assert_eq!(max, 2);
            Ok(vec![])
        }));
        let retriever = SourceRetriever::new(Some(search.clone()), 2, TIMEOUT);

        let sources = retriever.retrieve("  Exact claim text.  ").await.unwrap();
        assert!(sources.is_empty());
        assert_eq!(search.calls(), 1);
    }

    #[tokio::test]
    async fn test_retrieve_without_search_is_not_configured() {
        let retriever = SourceRetriever::new(None, 3, TIMEOUT);
        let err = retriever.retrieve("Claim").await.unwrap_err();
        assert!(matches!(err, CapabilityError::NotConfigured(_)));
    }

    #[tokio::test]
    async fn test_search_failure_is_propagated() {
        let retriever = SourceRetriever::new(Some(Arc::new(ScriptedSearch::failing())), 3, TIMEOUT);
        let err = retriever.retrieve("Claim").await.unwrap_err();
        assert!(matches!(err, CapabilityError::Request(_)));
    }
}
