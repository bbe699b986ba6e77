// SerenityOptions: configuration for the data layer.
//
// Everything has a workable default; `SerenityOptions::default()` is enough
// for tests and local development against the memory store.

use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// Top-level configuration for the Serenity data layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerenityOptions {
    /// Application name, for diagnostics only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// Remote store endpoint settings.
    #[serde(default)]
    pub store: StoreOptions,

    /// Query execution settings.
    #[serde(default)]
    pub query: QueryOptions,

    /// Mood history read limits.
    #[serde(default)]
    pub moods: MoodOptions,

    /// How record ids are assigned on insert.
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

impl Default for SerenityOptions {
    fn default() -> Self {
        Self {
            app_name: None,
            store: StoreOptions::default(),
            query: QueryOptions::default(),
            moods: MoodOptions::default(),
            id_strategy: IdStrategy::default(),
        }
    }
}

impl SerenityOptions {
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    pub fn store_url(mut self, url: impl Into<String>) -> Self {
        self.store.url = Some(url.into());
        self
    }

    pub fn access_key(mut self, key: impl Into<String>) -> Self {
        self.store.access_key = Some(key.into());
        self
    }

    pub fn deadline_secs(mut self, secs: u64) -> Self {
        self.query.deadline_secs = secs;
        self
    }

    pub fn id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    pub fn mood_limits(mut self, default_entry_limit: u32, max_entry_limit: u32) -> Self {
        self.moods.default_entry_limit = default_entry_limit;
        self.moods.max_entry_limit = max_entry_limit;
        self
    }

    /// Validate option coherence. Called by `SerenityData::with_options`
    /// before any service is built.
    pub fn validate(&self) -> DataResult<()> {
        if let Some(url) = &self.store.url {
            url::Url::parse(url)
                .map_err(|e| DataError::Config(format!("invalid store url {}: {}", url, e)))?;
        }
        if self.query.deadline_secs == 0 {
            return Err(DataError::Config(
                "query.deadlineSecs must be at least 1".into(),
            ));
        }
        if self.moods.default_entry_limit == 0 || self.moods.max_entry_limit == 0 {
            return Err(DataError::Config(
                "mood entry limits must be at least 1".into(),
            ));
        }
        if self.moods.default_entry_limit > self.moods.max_entry_limit {
            return Err(DataError::Config(format!(
                "moods.defaultEntryLimit ({}) exceeds moods.maxEntryLimit ({})",
                self.moods.default_entry_limit, self.moods.max_entry_limit
            )));
        }
        Ok(())
    }
}

// ─── Store Options ───────────────────────────────────────────────

/// Remote store endpoint settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreOptions {
    /// Base URL of the remote store.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Access key sent with every request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
}

impl StoreOptions {
    /// Reads `SERENITY_STORE_URL` and `SERENITY_STORE_KEY`.
    pub fn from_env() -> Self {
        Self {
            url: crate::env::get_store_url_from_env(),
            access_key: crate::env::get_store_key_from_env(),
        }
    }
}

// ─── Query Options ───────────────────────────────────────────────

/// Query execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOptions {
    /// Deadline for each store round trip, in seconds. A call that runs
    /// past it is reported as a transport failure.
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
}

fn default_deadline_secs() -> u64 { 10 }

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            deadline_secs: default_deadline_secs(),
        }
    }
}

// ─── Mood Options ────────────────────────────────────────────────

/// Read limits for mood history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodOptions {
    /// Entries returned when the caller passes no limit.
    #[serde(default = "default_entry_limit")]
    pub default_entry_limit: u32,
    /// Hard cap on requested history size. Requests above it are clamped.
    #[serde(default = "default_max_entry_limit")]
    pub max_entry_limit: u32,
}

fn default_entry_limit() -> u32 { 30 }
fn default_max_entry_limit() -> u32 { 365 }

impl Default for MoodOptions {
    fn default() -> Self {
        Self {
            default_entry_limit: default_entry_limit(),
            max_entry_limit: default_max_entry_limit(),
        }
    }
}

// ─── Id Strategy ─────────────────────────────────────────────────

/// How ids are assigned to rows created by write operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Leave id generation to the store backend (default).
    #[default]
    Store,
    /// Assign a nanoid before insert.
    Random,
    /// Assign a UUIDv4 before insert.
    Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_coherent() {
        let options = SerenityOptions::default();
        assert_eq!(options.query.deadline_secs, 10);
        assert_eq!(options.moods.default_entry_limit, 30);
        assert_eq!(options.moods.max_entry_limit, 365);
        assert_eq!(options.id_strategy, IdStrategy::Store);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn builder_chains() {
        let options = SerenityOptions::default()
            .app_name("serenity")
            .store_url("https://store.example.com")
            .access_key("sk_test")
            .deadline_secs(3)
            .id_strategy(IdStrategy::Uuid);
        assert_eq!(options.app_name.as_deref(), Some("serenity"));
        assert_eq!(options.query.deadline_secs, 3);
        assert_eq!(options.id_strategy, IdStrategy::Uuid);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_url() {
        let options = SerenityOptions::default().store_url("not a url");
        assert!(matches!(
            options.validate(),
            Err(DataError::Config(_))
        ));
    }

    #[test]
    fn validate_rejects_zero_deadline() {
        let options = SerenityOptions::default().deadline_secs(0);
        assert!(options.validate().is_err());
    }

    #[test]
    fn validate_rejects_default_limit_above_cap() {
        let options = SerenityOptions::default().mood_limits(100, 50);
        assert!(options.validate().is_err());
    }

    #[test]
    fn options_serialize_camel_case() {
        let v = serde_json::to_value(SerenityOptions::default()).unwrap();
        assert_eq!(v["query"]["deadlineSecs"], 10);
        assert_eq!(v["moods"]["defaultEntryLimit"], 30);
        assert_eq!(v["idStrategy"], "store");
    }
}
