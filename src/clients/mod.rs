use async_trait::async_trait;

use crate::models::{SearchResult, SourceId};

pub mod ifixit;
pub mod reddit;
pub mod youtube;

pub use ifixit::IFixitClient;
pub use reddit::RedditClient;
pub use youtube::YoutubeClient;

/// User agent sent on every outbound provider request.
pub const USER_AGENT: &str = "Fixarr/1.0 (Educational Purpose)";

/// Capability interface over one external content provider.
///
/// The aggregator is oblivious to which implementations hit the network and
/// which are deterministic generators; a real video-search integration can
/// replace [`YoutubeClient`] without touching the aggregator.
#[async_trait]
pub trait SearchSource: Send + Sync {
    fn id(&self) -> SourceId;

    /// Fetches raw results for a query. Order within one provider is
    /// whatever the provider returned; callers must not rely on it.
    async fn fetch(&self, query: &str) -> anyhow::Result<Vec<SearchResult>>;
}
