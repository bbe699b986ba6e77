// Catalog service: read-only access to the wellness libraries.
//
// The three catalogs filter differently on purpose. A resource belongs to a
// list of categories, so its filter is list membership (`Has`). Sound
// tracks and games carry a single category column, so their filter is
// scalar equality. Do not unify the two.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use serenity_core::models::{Resource, SoundTrack, TherapeuticGame};
use serenity_core::store::adapter::{FindQuery, SortBy, StoreAdapter, WhereClause};

use super::{decode_rows, with_deadline, ServiceConfig};

/// Typed access to the `resources`, `sound_tracks`, and `therapeutic_games`
/// tables. All reads; content management happens elsewhere.
#[derive(Debug)]
pub struct CatalogService {
    store: Arc<dyn StoreAdapter>,
    config: ServiceConfig,
}

impl CatalogService {
    /// Build with default configuration.
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    pub(crate) fn with_config(store: Arc<dyn StoreAdapter>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Library resources, newest first, optionally narrowed to entries
    /// whose categories list contains `category`. Degrades to empty when
    /// the store is unreachable.
    pub async fn get_resources(&self, category: Option<&str>) -> Vec<Resource> {
        self.fetch(
            "resources",
            category.map(|c| WhereClause::has("categories", c)),
        )
        .await
    }

    /// Sound tracks, newest first, optionally narrowed to one category.
    /// Degrades to empty when the store is unreachable.
    pub async fn get_sound_tracks(&self, category: Option<&str>) -> Vec<SoundTrack> {
        self.fetch(
            "sound_tracks",
            category.map(|c| WhereClause::eq("category", c)),
        )
        .await
    }

    /// Therapeutic games, newest first, optionally narrowed to one
    /// category. Degrades to empty when the store is unreachable.
    pub async fn get_games(&self, category: Option<&str>) -> Vec<TherapeuticGame> {
        self.fetch(
            "therapeutic_games",
            category.map(|c| WhereClause::eq("category", c)),
        )
        .await
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        table: &str,
        filter: Option<WhereClause>,
    ) -> Vec<T> {
        let query = FindQuery {
            where_clauses: filter.into_iter().collect(),
            sort_by: Some(SortBy::desc("created_at")),
            ..Default::default()
        };
        match with_deadline(self.config.deadline, self.store.find_many(table, query)).await {
            Ok(rows) => decode_rows(table, rows),
            Err(err) => {
                tracing::error!("Failed to load {} catalog: {}", table, err);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::FailingStore;

    #[tokio::test]
    async fn all_catalogs_degrade_to_empty() {
        let service = CatalogService::new(Arc::new(FailingStore));
        assert!(service.get_resources(None).await.is_empty());
        assert!(service.get_sound_tracks(Some("nature")).await.is_empty());
        assert!(service.get_games(None).await.is_empty());
    }
}
