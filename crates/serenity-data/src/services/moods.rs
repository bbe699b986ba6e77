// Mood service: append-only daily check-ins and history reads.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use serenity_core::error::{DataError, DataResult};
use serenity_core::models::{MoodEntry, MoodLevel};
use serenity_core::options::MoodOptions;
use serenity_core::store::adapter::{FindQuery, SortBy, StoreAdapter, WhereClause};

use super::{assign_generated_id, decode_rows, with_deadline, ServiceConfig};

/// Input for `add_mood_entry`. The level is the typed enum, so an unknown
/// level name already fails at parse time, before it gets here.
#[derive(Debug, Clone, Serialize)]
pub struct NewMoodEntry {
    pub user_id: String,
    pub mood_level: MoodLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anxiety_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f32>,
}

impl NewMoodEntry {
    pub fn new(user_id: impl Into<String>, mood_level: MoodLevel) -> Self {
        Self {
            user_id: user_id.into(),
            mood_level,
            notes: None,
            energy_level: None,
            anxiety_level: None,
            sleep_hours: None,
        }
    }
}

/// Rollup over an already-fetched batch of entries. Computed locally; the
/// store never aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodSummary {
    pub entry_count: usize,
    pub average_mood_score: Option<f64>,
    pub average_energy: Option<f64>,
    pub average_anxiety: Option<f64>,
}

impl MoodSummary {
    /// Averages over the given entries. Optional dimensions average only
    /// the entries that recorded them.
    pub fn from_entries(entries: &[MoodEntry]) -> Self {
        let entry_count = entries.len();
        let average_mood_score = if entry_count == 0 {
            None
        } else {
            let total: u32 = entries.iter().map(|e| u32::from(e.mood_level.score())).sum();
            Some(f64::from(total) / entry_count as f64)
        };
        Self {
            entry_count,
            average_mood_score,
            average_energy: average_of(entries.iter().filter_map(|e| e.energy_level)),
            average_anxiety: average_of(entries.iter().filter_map(|e| e.anxiety_level)),
        }
    }
}

fn average_of(values: impl Iterator<Item = i32>) -> Option<f64> {
    let mut sum = 0i64;
    let mut count = 0usize;
    for v in values {
        sum += i64::from(v);
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

/// Typed access to the `mood_entries` table.
#[derive(Debug)]
pub struct MoodService {
    store: Arc<dyn StoreAdapter>,
    config: ServiceConfig,
    options: MoodOptions,
}

impl MoodService {
    /// Build with default configuration.
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self::with_config(store, ServiceConfig::default(), MoodOptions::default())
    }

    pub(crate) fn with_config(
        store: Arc<dyn StoreAdapter>,
        config: ServiceConfig,
        options: MoodOptions,
    ) -> Self {
        Self {
            store,
            config,
            options,
        }
    }

    /// Recent mood history, newest first.
    ///
    /// `None` falls back to the configured default (30 by default); any
    /// request is clamped into 1..=max (365 by default) with a warning when
    /// it was out of range. Degrades to empty when the store is
    /// unreachable.
    pub async fn get_user_mood_entries(
        &self,
        user_id: &str,
        limit: Option<u32>,
    ) -> Vec<MoodEntry> {
        let query = FindQuery {
            where_clauses: vec![WhereClause::eq("user_id", user_id)],
            limit: Some(self.clamp_limit(limit)),
            sort_by: Some(SortBy::desc("created_at")),
        };
        match with_deadline(
            self.config.deadline,
            self.store.find_many("mood_entries", query),
        )
        .await
        {
            Ok(rows) => decode_rows("mood_entries", rows),
            Err(err) => {
                tracing::error!("Failed to load mood entries for {}: {}", user_id, err);
                Vec::new()
            }
        }
    }

    /// Record one check-in. Entries are immutable once written; several per
    /// day are fine.
    pub async fn add_mood_entry(&self, input: NewMoodEntry) -> DataResult<MoodEntry> {
        if let Some(energy) = input.energy_level {
            if !(0..=5).contains(&energy) {
                return Err(DataError::Validation(format!(
                    "energy_level {} outside 0..=5",
                    energy
                )));
            }
        }
        if let Some(anxiety) = input.anxiety_level {
            if !(0..=5).contains(&anxiety) {
                return Err(DataError::Validation(format!(
                    "anxiety_level {} outside 0..=5",
                    anxiety
                )));
            }
        }
        if let Some(sleep) = input.sleep_hours {
            if !(0.0..=24.0).contains(&sleep) {
                return Err(DataError::Validation(format!(
                    "sleep_hours {} outside 0..=24",
                    sleep
                )));
            }
        }

        let mut row = serde_json::to_value(&input)?;
        if let Some(obj) = row.as_object_mut() {
            obj.insert("created_at".to_string(), json!(Utc::now()));
        }
        assign_generated_id(&mut row, self.config.id_strategy);

        let created = with_deadline(
            self.config.deadline,
            self.store.create("mood_entries", row),
        )
        .await?;
        Ok(serde_json::from_value(created)?)
    }

    fn clamp_limit(&self, limit: Option<u32>) -> i64 {
        let requested = limit.unwrap_or(self.options.default_entry_limit);
        let clamped = requested.clamp(1, self.options.max_entry_limit);
        if clamped != requested {
            tracing::warn!(
                "Clamped mood history limit {} into 1..={}",
                requested,
                self.options.max_entry_limit
            );
        }
        i64::from(clamped)
    }
}
