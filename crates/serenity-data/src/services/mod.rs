// Per-entity data services and their shared plumbing.
//
// Every store round trip runs under the configured deadline; an elapsed
// deadline is indistinguishable from a store that never answered and is
// reported as a transport failure.

pub mod catalog;
pub mod messages;
pub mod moods;
pub mod profiles;
pub mod progress;
pub mod sessions;

pub use catalog::CatalogService;
pub use messages::{MessageService, NewMessage};
pub use moods::{MoodService, MoodSummary, NewMoodEntry};
pub use profiles::{NewProfile, ProfileService, ProfileUpdate};
pub use progress::{NewProgressEntry, ProgressService};
pub use sessions::{NewSession, SessionService};

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use serenity_core::error::{StoreError, StoreResult};
use serenity_core::options::{IdStrategy, SerenityOptions};

/// Configuration slice shared by every service.
#[derive(Debug, Clone)]
pub(crate) struct ServiceConfig {
    /// Deadline applied to each store round trip.
    pub deadline: Duration,
    /// How ids are assigned on insert.
    pub id_strategy: IdStrategy,
}

impl ServiceConfig {
    pub fn from_options(options: &SerenityOptions) -> Self {
        Self {
            deadline: Duration::from_secs(options.query.deadline_secs),
            id_strategy: options.id_strategy,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from_options(&SerenityOptions::default())
    }
}

/// Run a store future under the given deadline.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, fut: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Transport(format!(
            "store call exceeded the {}s deadline",
            deadline.as_secs()
        ))),
    }
}

/// Decode one row into a typed record. An undecodable row is logged and
/// dropped rather than failing the read.
pub(crate) fn decode_row<T: DeserializeOwned>(table: &str, row: Value) -> Option<T> {
    match serde_json::from_value(row) {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::error!("Dropping undecodable {} row: {}", table, err);
            None
        }
    }
}

/// Decode a batch of rows, skipping the ones that fail.
pub(crate) fn decode_rows<T: DeserializeOwned>(table: &str, rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| decode_row(table, row))
        .collect()
}

/// Assign an id per the configured strategy. `Store` leaves the row as-is
/// so the backend can mint one; a caller-supplied id always wins.
pub(crate) fn assign_generated_id(data: &mut Value, strategy: IdStrategy) {
    let id = match strategy {
        IdStrategy::Store => return,
        IdStrategy::Random => serenity_core::utils::generate_id(),
        IdStrategy::Uuid => uuid::Uuid::new_v4().to_string(),
    };
    if let Some(obj) = data.as_object_mut() {
        obj.entry("id").or_insert(Value::String(id));
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use serde_json::Value;

    use serenity_core::error::{StoreError, StoreResult};
    use serenity_core::store::adapter::{FindQuery, StoreAdapter, WhereClause};

    /// Store stub whose every call fails with a transport error.
    #[derive(Debug, Default)]
    pub struct FailingStore;

    #[async_trait]
    impl StoreAdapter for FailingStore {
        async fn create(&self, _table: &str, _data: Value) -> StoreResult<Value> {
            Err(StoreError::Transport("store offline".into()))
        }

        async fn find_one(
            &self,
            _table: &str,
            _where_clauses: &[WhereClause],
        ) -> StoreResult<Option<Value>> {
            Err(StoreError::Transport("store offline".into()))
        }

        async fn find_many(&self, _table: &str, _query: FindQuery) -> StoreResult<Vec<Value>> {
            Err(StoreError::Transport("store offline".into()))
        }

        async fn count(&self, _table: &str, _where_clauses: &[WhereClause]) -> StoreResult<i64> {
            Err(StoreError::Transport("store offline".into()))
        }

        async fn update(
            &self,
            _table: &str,
            _where_clauses: &[WhereClause],
            _data: Value,
        ) -> StoreResult<Option<Value>> {
            Err(StoreError::Transport("store offline".into()))
        }
    }

    /// Store stub that never answers. Drives the deadline tests.
    #[derive(Debug, Default)]
    pub struct StalledStore;

    #[async_trait]
    impl StoreAdapter for StalledStore {
        async fn create(&self, _table: &str, _data: Value) -> StoreResult<Value> {
            std::future::pending().await
        }

        async fn find_one(
            &self,
            _table: &str,
            _where_clauses: &[WhereClause],
        ) -> StoreResult<Option<Value>> {
            std::future::pending().await
        }

        async fn find_many(&self, _table: &str, _query: FindQuery) -> StoreResult<Vec<Value>> {
            std::future::pending().await
        }

        async fn count(&self, _table: &str, _where_clauses: &[WhereClause]) -> StoreResult<i64> {
            std::future::pending().await
        }

        async fn update(
            &self,
            _table: &str,
            _where_clauses: &[WhereClause],
            _data: Value,
        ) -> StoreResult<Option<Value>> {
            std::future::pending().await
        }
    }
}
