// Progress service: append-only metric timeseries per user.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use serenity_core::error::{DataError, DataResult};
use serenity_core::models::UserProgress;
use serenity_core::store::adapter::{FindQuery, SortBy, StoreAdapter, WhereClause};

use super::{assign_generated_id, decode_rows, with_deadline, ServiceConfig};

/// Input for `add_progress_entry`.
#[derive(Debug, Clone, Serialize)]
pub struct NewProgressEntry {
    pub user_id: String,
    pub metric_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Defaults to now; set it to backdate an import.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl NewProgressEntry {
    pub fn new(user_id: impl Into<String>, metric_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            metric_name: metric_name.into(),
            metric_value: None,
            notes: None,
            recorded_at: None,
        }
    }
}

/// Typed access to the `user_progress` table.
#[derive(Debug)]
pub struct ProgressService {
    store: Arc<dyn StoreAdapter>,
    config: ServiceConfig,
}

impl ProgressService {
    /// Build with default configuration.
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    pub(crate) fn with_config(store: Arc<dyn StoreAdapter>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Progress history for a user, newest first, optionally narrowed to
    /// one metric. Degrades to empty when the store is unreachable.
    pub async fn get_user_progress(
        &self,
        user_id: &str,
        metric: Option<&str>,
    ) -> Vec<UserProgress> {
        let mut where_clauses = vec![WhereClause::eq("user_id", user_id)];
        if let Some(metric) = metric {
            where_clauses.push(WhereClause::eq("metric_name", metric));
        }
        let query = FindQuery {
            where_clauses,
            sort_by: Some(SortBy::desc("recorded_at")),
            ..Default::default()
        };
        match with_deadline(
            self.config.deadline,
            self.store.find_many("user_progress", query),
        )
        .await
        {
            Ok(rows) => decode_rows("user_progress", rows),
            Err(err) => {
                tracing::error!("Failed to load progress for {}: {}", user_id, err);
                Vec::new()
            }
        }
    }

    /// Append one timeseries point. History is never rewritten; corrections
    /// are new entries.
    pub async fn add_progress_entry(&self, input: NewProgressEntry) -> DataResult<UserProgress> {
        if input.metric_name.trim().is_empty() {
            return Err(DataError::Validation("metric_name must not be blank".into()));
        }

        let mut row = serde_json::to_value(&input)?;
        if let Some(obj) = row.as_object_mut() {
            obj.entry("recorded_at").or_insert(json!(Utc::now()));
        }
        assign_generated_id(&mut row, self.config.id_strategy);

        let created = with_deadline(
            self.config.deadline,
            self.store.create("user_progress", row),
        )
        .await?;
        Ok(serde_json::from_value(created)?)
    }
}
