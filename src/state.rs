use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::clients::{IFixitClient, RedditClient, SearchSource, YoutubeClient};
use crate::config::Config;
use crate::db::Store;
use crate::services::SearchService;

/// Headers attached to every outbound provider request. All providers speak
/// JSON, so the client identifies itself and asks for it up front.
fn provider_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Build a shared HTTP client with reasonable defaults for provider calls.
/// Reused across all HTTP-based sources to enable connection pooling and
/// avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(crate::clients::USER_AGENT)
        .default_headers(provider_headers())
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    pub store: Store,

    pub search_service: Arc<SearchService>,
}

impl SharedState {
    /// Wires the production provider set: two real HTTP clients and the
    /// synthetic video source, all behind [`SearchSource`].
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client =
            build_shared_http_client(u64::from(config.search.request_timeout_seconds))?;

        let sources: Vec<Arc<dyn SearchSource>> = vec![
            Arc::new(IFixitClient::with_shared_client(http_client.clone())),
            Arc::new(RedditClient::with_shared_client(http_client)),
            Arc::new(YoutubeClient::new()),
        ];

        Self::with_sources(config, sources).await
    }

    /// Same wiring with an injected provider set, for tests and for
    /// swapping in alternative integrations.
    pub async fn with_sources(
        config: Config,
        sources: Vec<Arc<dyn SearchSource>>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let search_service = Arc::new(SearchService::new(store.clone(), sources, &config.search));

        Ok(Self {
            config,
            store,
            search_service,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_requests_ask_for_json() {
        let headers = provider_headers();
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn shared_client_builds_with_defaults() {
        assert!(build_shared_http_client(10).is_ok());
    }
}
