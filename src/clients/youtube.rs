use anyhow::Result;
use async_trait::async_trait;

use super::SearchSource;
use crate::models::{SearchResult, SourceId};

pub const YOUTUBE_BASE: &str = "https://www.youtube.com";

/// Stand-in for a video platform search.
///
/// YouTube has no unauthenticated search API, so this client synthesizes a
/// small deterministic set of items pointing at a constructed search-results
/// URL instead of performing any lookup. Swapping in a real Data API
/// integration only requires replacing this implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct YoutubeClient;

impl YoutubeClient {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn search(query: &str) -> Vec<SearchResult> {
        let search_url = format!(
            "{YOUTUBE_BASE}/results?search_query={}",
            urlencoding::encode(&format!("{query} repair guide tutorial"))
        );
        let source_name = SourceId::Youtube.display_name().to_string();

        vec![
            SearchResult {
                title: format!("How to Fix {query} - Complete Repair Guide"),
                source_url: search_url.clone(),
                image_url: Some(
                    "https://images.pexels.com/photos/1181298/pexels-photo-1181298.jpeg?auto=compress&cs=tinysrgb&w=400"
                        .to_string(),
                ),
                source_name: source_name.clone(),
                description: Some(format!("Step-by-step video tutorial for {query} repair")),
                relevance_score: 0,
            },
            SearchResult {
                title: format!("{query} Repair Tutorial - DIY Fix"),
                source_url: search_url,
                image_url: Some(
                    "https://images.pexels.com/photos/159298/gears-cogs-machine-machinery-159298.jpeg?auto=compress&cs=tinysrgb&w=400"
                        .to_string(),
                ),
                source_name,
                description: Some(format!("Professional repair guide for {query}")),
                relevance_score: 0,
            },
        ]
    }
}

#[async_trait]
impl SearchSource for YoutubeClient {
    fn id(&self) -> SourceId {
        SourceId::Youtube
    }

    async fn fetch(&self, query: &str) -> Result<Vec<SearchResult>> {
        Ok(Self::search(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesizes_deterministic_results() {
        let first = YoutubeClient::search("iphone screen");
        let second = YoutubeClient::search("iphone screen");
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn points_at_constructed_search_url() {
        let results = YoutubeClient::search("washing machine");
        for result in &results {
            assert_eq!(result.source_name, "YouTube");
            assert!(result.source_url.starts_with(
                "https://www.youtube.com/results?search_query=washing%20machine%20repair"
            ));
            assert!(result.title.contains("washing machine"));
        }
    }
}
