use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::SearchSource;
use crate::models::{SearchResult, SourceId};

const IFIXIT_API: &str = "https://www.ifixit.com/api/2.0";
pub const IFIXIT_SITE: &str = "https://www.ifixit.com";

/// Per-call emission cap, applied regardless of provider volume.
const RESULT_CAP: usize = 8;

/// Client for the iFixit guide repository.
///
/// The search API has drifted between payload shapes over time, so mapping
/// is shape-tolerant: a `results` array, a `guides` array, or a bare
/// top-level array are all accepted, first non-empty wins.
#[derive(Clone)]
pub struct IFixitClient {
    client: Client,
}

impl IFixitClient {
    #[must_use]
    pub const fn with_shared_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let encoded = urlencoding::encode(query);

        // Primary search endpoint first; the guide-listing endpoint is a
        // fallback against API shape drift, not a retry on transient failure.
        let endpoints = [
            format!("{IFIXIT_API}/search/{encoded}?limit=10"),
            format!("{IFIXIT_API}/guides?filter=search&query={encoded}&limit=10"),
        ];

        for endpoint in &endpoints {
            let response = match self.client.get(endpoint).send().await {
                Ok(r) if r.status().is_success() => r,
                Ok(r) => {
                    debug!("iFixit endpoint {} returned {}", endpoint, r.status());
                    continue;
                }
                Err(e) => {
                    debug!("iFixit endpoint {} failed: {}", endpoint, e);
                    continue;
                }
            };

            let payload: Value = match response.json().await {
                Ok(v) => v,
                Err(e) => {
                    debug!("iFixit payload from {} was not JSON: {}", endpoint, e);
                    continue;
                }
            };

            let results = map_search_payload(&payload);
            if !results.is_empty() {
                return Ok(results);
            }
        }

        Ok(Vec::new())
    }
}

/// Extracts the item array from whichever payload shape the API returned.
fn extract_items(payload: &Value) -> &[Value] {
    payload
        .get("results")
        .and_then(Value::as_array)
        .or_else(|| payload.get("guides").and_then(Value::as_array))
        .or_else(|| payload.as_array())
        .map_or(&[], Vec::as_slice)
}

/// Maps a raw search payload into normalized results, capped at
/// [`RESULT_CAP`] items.
#[must_use]
pub fn map_search_payload(payload: &Value) -> Vec<SearchResult> {
    extract_items(payload)
        .iter()
        .take(RESULT_CAP)
        .filter_map(map_item)
        .collect()
}

fn map_item(item: &Value) -> Option<SearchResult> {
    let is_guide = item.get("dataType").and_then(Value::as_str) == Some("guide");
    let title = item
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty());
    let guide_id = item.get("guideid").and_then(Value::as_i64);

    // Items without any recognizable content marker are dropped.
    if !is_guide && title.is_none() && guide_id.is_none() {
        return None;
    }

    let title = title
        .or_else(|| item.get("display_title").and_then(Value::as_str))
        .unwrap_or("Untitled Guide")
        .to_string();

    let url = item
        .get("url")
        .and_then(Value::as_str)
        .filter(|u| !u.is_empty())
        .map(ToString::to_string)
        .or_else(|| guide_id.map(|id| format!("/Guide/{id}")))?;
    let source_url = if url.starts_with("http") {
        url
    } else {
        format!("{IFIXIT_SITE}{url}")
    };

    let image_url = item
        .get("image")
        .and_then(|img| img.get("medium").or_else(|| img.get("standard")))
        .and_then(Value::as_str)
        .or_else(|| item.get("thumbnail").and_then(Value::as_str))
        .map(ToString::to_string);

    let description = item
        .get("summary")
        .and_then(Value::as_str)
        .or_else(|| item.get("introduction").and_then(Value::as_str))
        .filter(|s| !s.is_empty())
        .map_or_else(
            || format!("{title} repair guide from iFixit"),
            ToString::to_string,
        );

    Some(SearchResult {
        title,
        source_url,
        image_url,
        source_name: SourceId::IFixit.display_name().to_string(),
        description: Some(description),
        relevance_score: 0,
    })
}

#[async_trait]
impl SearchSource for IFixitClient {
    fn id(&self) -> SourceId {
        SourceId::IFixit
    }

    async fn fetch(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.search(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_results_array_shape() {
        let payload = json!({
            "results": [
                {
                    "dataType": "guide",
                    "title": "iPhone 14 Screen Replacement",
                    "url": "https://www.ifixit.com/Guide/iPhone+14/1234",
                    "image": { "medium": "https://cdn.ifixit.com/img/medium.jpg" },
                    "summary": "Replace a cracked screen."
                }
            ]
        });

        let results = map_search_payload(&payload);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "iPhone 14 Screen Replacement");
        assert_eq!(results[0].source_name, "iFixit");
        assert_eq!(
            results[0].image_url.as_deref(),
            Some("https://cdn.ifixit.com/img/medium.jpg")
        );
        assert_eq!(
            results[0].description.as_deref(),
            Some("Replace a cracked screen.")
        );
    }

    #[test]
    fn maps_guides_array_and_builds_relative_urls() {
        let payload = json!({
            "guides": [
                { "guideid": 77, "title": "Toaster Heating Element Fix", "url": "/Guide/Toaster/77" }
            ]
        });

        let results = map_search_payload(&payload);
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].source_url,
            "https://www.ifixit.com/Guide/Toaster/77"
        );
    }

    #[test]
    fn maps_bare_array_shape() {
        let payload = json!([
            { "guideid": 9, "dataType": "guide" }
        ]);

        let results = map_search_payload(&payload);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Untitled Guide");
        assert_eq!(results[0].source_url, "https://www.ifixit.com/Guide/9");
        assert_eq!(
            results[0].description.as_deref(),
            Some("Untitled Guide repair guide from iFixit")
        );
    }

    #[test]
    fn drops_items_without_content_marker() {
        let payload = json!({
            "results": [
                { "dataType": "wiki", "summary": "not a guide" },
                { "title": "Valid Guide", "url": "/Guide/Valid/1" }
            ]
        });

        let results = map_search_payload(&payload);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Valid Guide");
    }

    #[test]
    fn caps_emitted_items() {
        let items: Vec<Value> = (0..20)
            .map(|i| json!({ "guideid": i, "title": format!("Guide {i}"), "url": format!("/Guide/{i}") }))
            .collect();
        let payload = json!({ "results": items });

        assert_eq!(map_search_payload(&payload).len(), 8);
    }

    #[test]
    fn empty_payload_yields_nothing() {
        assert!(map_search_payload(&json!({ "results": [] })).is_empty());
        assert!(map_search_payload(&json!({ "totals": 0 })).is_empty());
    }
}
