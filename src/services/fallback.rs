use crate::clients::ifixit::IFIXIT_SITE;
use crate::clients::youtube::YOUTUBE_BASE;
use crate::models::{SearchResult, SourceId};

const REDDIT_BASE: &str = "https://www.reddit.com";

/// Deterministic placeholder results, used only when every provider came
/// back empty. One entry per provider, each pointing at that provider's own
/// generic search URL rather than a specific content item. Fallback results
/// go through scoring and caching exactly like real ones.
#[must_use]
pub fn fallback_results(query: &str) -> Vec<SearchResult> {
    let encoded = urlencoding::encode(query).into_owned();

    vec![
        SearchResult {
            title: format!("{query} Repair Guide - iFixit Community"),
            source_url: format!("{IFIXIT_SITE}/Search?query={encoded}"),
            image_url: Some(
                "https://images.pexels.com/photos/159298/gears-cogs-machine-machinery-159298.jpeg?auto=compress&cs=tinysrgb&w=400"
                    .to_string(),
            ),
            source_name: SourceId::IFixit.display_name().to_string(),
            description: Some(format!("Search results for {query} on iFixit")),
            relevance_score: 0,
        },
        SearchResult {
            title: format!("{query} Repair Discussion - Reddit"),
            source_url: format!("{REDDIT_BASE}/r/ifixit/search/?q={encoded}&restrict_sr=1"),
            image_url: Some(
                "https://images.pexels.com/photos/1181298/pexels-photo-1181298.jpeg?auto=compress&cs=tinysrgb&w=400"
                    .to_string(),
            ),
            source_name: SourceId::Reddit.display_name().to_string(),
            description: Some(format!("Community discussions about {query} repair")),
            relevance_score: 0,
        },
        SearchResult {
            title: format!("{query} Repair Videos - YouTube"),
            source_url: format!(
                "{YOUTUBE_BASE}/results?search_query={}",
                urlencoding::encode(&format!("{query} repair"))
            ),
            image_url: Some(
                "https://images.pexels.com/photos/257736/pexels-photo-257736.jpeg?auto=compress&cs=tinysrgb&w=400"
                    .to_string(),
            ),
            source_name: SourceId::Youtube.display_name().to_string(),
            description: Some(format!("Video tutorials for {query} repair")),
            relevance_score: 0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_entry_per_provider() {
        let results = fallback_results("blender");
        assert_eq!(results.len(), 3);

        let names: Vec<&str> = results.iter().map(|r| r.source_name.as_str()).collect();
        assert_eq!(names, ["iFixit", "Reddit", "YouTube"]);
    }

    #[test]
    fn entries_point_at_provider_search_pages() {
        let results = fallback_results("broken hinge");
        assert_eq!(
            results[0].source_url,
            "https://www.ifixit.com/Search?query=broken%20hinge"
        );
        assert_eq!(
            results[1].source_url,
            "https://www.reddit.com/r/ifixit/search/?q=broken%20hinge&restrict_sr=1"
        );
        assert_eq!(
            results[2].source_url,
            "https://www.youtube.com/results?search_query=broken%20hinge%20repair"
        );
    }

    #[test]
    fn deterministic_for_a_given_query() {
        assert_eq!(fallback_results("fan"), fallback_results("fan"));
    }
}
