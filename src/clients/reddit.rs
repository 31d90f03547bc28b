use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::SearchSource;
use crate::models::{SearchResult, SourceId};

const REDDIT_BASE: &str = "https://www.reddit.com";

/// Search is restricted to this community; results come back in the
/// provider's own relevance order.
const SUBREDDIT: &str = "ifixit";

const RESULT_CAP: usize = 8;

/// Body excerpt length used for the description.
const EXCERPT_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: Post,
}

#[derive(Debug, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub permalink: String,
    #[serde(default)]
    pub selftext: String,
    pub thumbnail: Option<String>,
    pub removed_by_category: Option<String>,
}

/// Client for the r/ifixit discussion forum, via Reddit's public JSON API.
#[derive(Clone)]
pub struct RedditClient {
    client: Client,
}

impl RedditClient {
    #[must_use]
    pub const fn with_shared_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = format!(
            "{REDDIT_BASE}/r/{SUBREDDIT}/search.json?q={}&restrict_sr=1&limit={RESULT_CAP}&sort=relevance",
            urlencoding::encode(query)
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("Reddit API error: {}", response.status());
        }

        let listing: Listing = response.json().await?;
        Ok(listing
            .data
            .children
            .iter()
            .filter_map(|c| map_post(&c.data))
            .collect())
    }
}

/// Maps one forum post, skipping removed, deleted, or untitled posts.
#[must_use]
pub fn map_post(post: &Post) -> Option<SearchResult> {
    if post.removed_by_category.is_some() || post.title.is_empty() || post.title == "[deleted]" {
        return None;
    }

    let image_url = post
        .thumbnail
        .as_deref()
        .filter(|t| t.starts_with("http"))
        .map(ToString::to_string);

    let description = if post.selftext.is_empty() {
        format!("Discussion on r/{SUBREDDIT} about {}", post.title)
    } else {
        let excerpt: String = post.selftext.chars().take(EXCERPT_CHARS).collect();
        format!("{excerpt}...")
    };

    Some(SearchResult {
        title: post.title.clone(),
        source_url: format!("{REDDIT_BASE}{}", post.permalink),
        image_url,
        source_name: SourceId::Reddit.display_name().to_string(),
        description: Some(description),
        relevance_score: 0,
    })
}

#[async_trait]
impl SearchSource for RedditClient {
    fn id(&self) -> SourceId {
        SourceId::Reddit
    }

    async fn fetch(&self, query: &str) -> Result<Vec<SearchResult>> {
        self.search(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, selftext: &str) -> Post {
        Post {
            title: title.to_string(),
            permalink: "/r/ifixit/comments/abc/post/".to_string(),
            selftext: selftext.to_string(),
            thumbnail: None,
            removed_by_category: None,
        }
    }

    #[test]
    fn maps_post_with_body_excerpt() {
        let body = "a".repeat(500);
        let result = map_post(&post("Cracked hinge", &body)).unwrap();

        assert_eq!(result.source_name, "Reddit");
        assert_eq!(
            result.source_url,
            "https://www.reddit.com/r/ifixit/comments/abc/post/"
        );
        let description = result.description.unwrap();
        assert_eq!(description.chars().count(), 203); // 200 chars + "..."
        assert!(description.ends_with("..."));
    }

    #[test]
    fn synthesizes_description_for_empty_body() {
        let result = map_post(&post("Stuck battery", "")).unwrap();
        assert_eq!(
            result.description.as_deref(),
            Some("Discussion on r/ifixit about Stuck battery")
        );
    }

    #[test]
    fn skips_removed_and_deleted_posts() {
        let mut removed = post("Removed post", "body");
        removed.removed_by_category = Some("moderator".to_string());
        assert!(map_post(&removed).is_none());
        assert!(map_post(&post("[deleted]", "body")).is_none());
        assert!(map_post(&post("", "body")).is_none());
    }

    #[test]
    fn keeps_only_http_thumbnails() {
        let mut p = post("Thumb", "");
        p.thumbnail = Some("self".to_string());
        assert!(map_post(&p).unwrap().image_url.is_none());

        p.thumbnail = Some("https://thumbs.example/x.jpg".to_string());
        assert_eq!(
            map_post(&p).unwrap().image_url.as_deref(),
            Some("https://thumbs.example/x.jpg")
        );
    }

    #[test]
    fn listing_parses_reddit_shape() {
        let raw = r#"{
            "kind": "Listing",
            "data": {
                "children": [
                    { "kind": "t3", "data": { "title": "Fix it", "permalink": "/r/ifixit/1/", "selftext": "" } }
                ]
            }
        }"#;
        let listing: Listing = serde_json::from_str(raw).unwrap();
        assert_eq!(listing.data.children.len(), 1);
        assert_eq!(listing.data.children[0].data.title, "Fix it");
    }
}
