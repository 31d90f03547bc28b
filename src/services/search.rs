use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::clients::SearchSource;
use crate::config::SearchConfig;
use crate::db::Store;
use crate::models::{SearchResult, SourceSelection};
use crate::services::fallback::fallback_results;
use crate::services::scoring::relevance_score;

/// Queries shorter than this (after trimming) are rejected before any I/O.
const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Query must be at least 2 characters long")]
    InvalidQuery,
}

/// What one search call produced and where it came from.
#[derive(Debug)]
pub struct SearchOutcome {
    pub results: Vec<SearchResult>,
    pub cached: bool,
}

/// Orchestrates the search pipeline: cache lookup, provider fan-out,
/// fallback, scoring, sort, and best-effort cache write-back.
///
/// Providers are held behind [`SearchSource`], so the service neither knows
/// nor cares which of them hit the network; tests inject doubles the same
/// way production injects real clients.
pub struct SearchService {
    store: Store,
    sources: Vec<Arc<dyn SearchSource>>,
    cache_ttl: chrono::Duration,
    request_timeout: Duration,
}

impl SearchService {
    #[must_use]
    pub fn new(store: Store, sources: Vec<Arc<dyn SearchSource>>, config: &SearchConfig) -> Self {
        Self {
            store,
            sources,
            cache_ttl: chrono::Duration::hours(i64::from(config.cache_ttl_hours)),
            request_timeout: Duration::from_secs(u64::from(config.request_timeout_seconds)),
        }
    }

    pub async fn search(
        &self,
        query: &str,
        selection: &SourceSelection,
    ) -> Result<SearchOutcome, SearchError> {
        if query.trim().chars().count() < MIN_QUERY_CHARS {
            return Err(SearchError::InvalidQuery);
        }

        // The cache key is the full normalized query text, not tokens;
        // near-duplicate queries must normalize identically or they miss
        // independently.
        let normalized = query.trim().to_lowercase();

        match self.store.get_cached_results(&normalized).await {
            Ok(rows) if !rows.is_empty() => {
                // A hit short-circuits all network access, even when the
                // requested sources differ from the cached coverage. No
                // supplemental fetch is triggered for missing sources.
                let results: Vec<SearchResult> = rows
                    .into_iter()
                    .filter(|r| selection.matches_name(&r.source_name))
                    .collect();
                info!(
                    "Serving {} cached results for '{}'",
                    results.len(),
                    normalized
                );
                return Ok(SearchOutcome {
                    results,
                    cached: true,
                });
            }
            Ok(_) => debug!("No cached results for '{}'", normalized),
            Err(e) => warn!("Cache lookup failed, performing fresh search: {}", e),
        }

        let mut results = self.fan_out(query, selection).await;

        if results.is_empty() {
            info!("All providers came back empty for '{}', using fallback", query);
            results = fallback_results(query);
        }

        for result in &mut results {
            result.relevance_score = relevance_score(&result.title, query);
        }
        // Stable sort: ties keep the concatenation order.
        results.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));

        if let Err(e) = self
            .store
            .cache_results(&normalized, &results, self.cache_ttl)
            .await
        {
            warn!("Failed to cache search results for '{}': {}", normalized, e);
        }

        Ok(SearchOutcome {
            results,
            cached: false,
        })
    }

    /// Invokes every enabled provider concurrently and concatenates their
    /// batches in registration order. Failures and timeouts are isolated:
    /// a misbehaving provider contributes an empty batch, nothing more.
    async fn fan_out(&self, query: &str, selection: &SourceSelection) -> Vec<SearchResult> {
        let fetches = self
            .sources
            .iter()
            .filter(|s| selection.includes(s.id()))
            .map(|s| self.fetch_one(s.as_ref(), query));

        futures::future::join_all(fetches)
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    async fn fetch_one(&self, source: &dyn SearchSource, query: &str) -> Vec<SearchResult> {
        let name = source.id().display_name();
        match tokio::time::timeout(self.request_timeout, source.fetch(query)).await {
            Ok(Ok(batch)) => {
                info!("{} returned {} results for '{}'", name, batch.len(), query);
                batch
            }
            Ok(Err(e)) => {
                warn!("{} search failed: {}", name, e);
                Vec::new()
            }
            Err(_) => {
                warn!(
                    "{} search timed out after {:?}",
                    name, self.request_timeout
                );
                Vec::new()
            }
        }
    }
}
