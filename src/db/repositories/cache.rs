use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{prelude::SearchCache, search_cache};
use crate::models::SearchResult;

/// Repository over the `web_search_results` cache table.
///
/// Expiry is a query-time predicate: stale rows simply stop matching the
/// `cached_until` filter and are never swept. Racing misses for the same
/// query may insert duplicate rows; reads return whatever non-expired set
/// matches, so duplicates only cost storage.
pub struct SearchCacheRepository {
    conn: DatabaseConnection,
}

impl SearchCacheRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All non-expired rows for the exact normalized query, best score
    /// first.
    pub async fn get_fresh(&self, query: &str) -> Result<Vec<SearchResult>> {
        let now = chrono::Utc::now().to_rfc3339();

        let rows = SearchCache::find()
            .filter(search_cache::Column::Query.eq(query))
            .filter(search_cache::Column::CachedUntil.gt(now))
            .order_by_desc(search_cache::Column::RelevanceScore)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| SearchResult {
                title: row.title,
                source_url: row.source_url,
                image_url: row.image_url,
                source_name: row.source_name,
                description: row.description,
                relevance_score: row.relevance_score,
            })
            .collect())
    }

    /// Bulk insert of a freshly scored result set for a normalized query.
    pub async fn insert_many(
        &self,
        query: &str,
        results: &[SearchResult],
        ttl: chrono::Duration,
    ) -> Result<()> {
        if results.is_empty() {
            return Ok(());
        }

        let now = chrono::Utc::now();
        let created_at = now.to_rfc3339();
        let cached_until = (now + ttl).to_rfc3339();

        let rows: Vec<search_cache::ActiveModel> = results
            .iter()
            .map(|result| search_cache::ActiveModel {
                query: Set(query.to_string()),
                title: Set(result.title.clone()),
                source_url: Set(result.source_url.clone()),
                image_url: Set(result.image_url.clone()),
                source_name: Set(result.source_name.clone()),
                description: Set(result.description.clone()),
                relevance_score: Set(result.relevance_score),
                created_at: Set(created_at.clone()),
                cached_until: Set(cached_until.clone()),
                ..Default::default()
            })
            .collect();

        SearchCache::insert_many(rows).exec(&self.conn).await?;

        Ok(())
    }
}
