// Session service: therapy appointment booking and lifecycle.
//
// The status lifecycle is enforced here, not in the store:
// scheduled -> in_progress -> completed, scheduled -> cancelled. Everything
// else is rejected with `DataError::InvalidTransition`.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use serde_json::json;

use serenity_core::error::{DataError, DataResult};
use serenity_core::models::{SessionStatus, TherapySession};
use serenity_core::store::adapter::{FindQuery, Operator, SortBy, StoreAdapter, WhereClause};

use super::{assign_generated_id, decode_rows, with_deadline, ServiceConfig};

/// Input for `create_session`. Status is not accepted here; every new
/// session starts as scheduled.
#[derive(Debug, Clone, Serialize)]
pub struct NewSession {
    pub user_id: String,
    pub therapist_id: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl NewSession {
    pub fn new(
        user_id: impl Into<String>,
        therapist_id: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        duration_minutes: i32,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            therapist_id: therapist_id.into(),
            scheduled_at,
            duration_minutes,
            notes: None,
            cost: None,
        }
    }
}

/// Typed access to the `therapy_sessions` table.
#[derive(Debug)]
pub struct SessionService {
    store: Arc<dyn StoreAdapter>,
    config: ServiceConfig,
}

impl SessionService {
    /// Build with default configuration.
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    pub(crate) fn with_config(store: Arc<dyn StoreAdapter>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Full booking history for a user, newest first. Degrades to empty
    /// when the store is unreachable.
    pub async fn get_user_sessions(&self, user_id: &str) -> Vec<TherapySession> {
        let query = FindQuery {
            where_clauses: vec![WhereClause::eq("user_id", user_id)],
            sort_by: Some(SortBy::desc("scheduled_at")),
            ..Default::default()
        };
        match with_deadline(
            self.config.deadline,
            self.store.find_many("therapy_sessions", query),
        )
        .await
        {
            Ok(rows) => decode_rows("therapy_sessions", rows),
            Err(err) => {
                tracing::error!("Failed to load sessions for {}: {}", user_id, err);
                Vec::new()
            }
        }
    }

    /// Sessions still ahead of now and not yet started, soonest first.
    /// Degrades to empty when the store is unreachable.
    pub async fn get_upcoming_sessions(&self, user_id: &str) -> Vec<TherapySession> {
        let query = FindQuery {
            where_clauses: vec![
                WhereClause::eq("user_id", user_id),
                WhereClause::eq("status", SessionStatus::Scheduled.as_str()),
                WhereClause::new("scheduled_at", json!(Utc::now()), Operator::Gt),
            ],
            sort_by: Some(SortBy::asc("scheduled_at")),
            ..Default::default()
        };
        match with_deadline(
            self.config.deadline,
            self.store.find_many("therapy_sessions", query),
        )
        .await
        {
            Ok(rows) => decode_rows("therapy_sessions", rows),
            Err(err) => {
                tracing::error!("Failed to load upcoming sessions for {}: {}", user_id, err);
                Vec::new()
            }
        }
    }

    /// Book a new session. The slot must lie in the future and the duration
    /// must be positive; the status is forced to scheduled.
    pub async fn create_session(&self, input: NewSession) -> DataResult<TherapySession> {
        let now = Utc::now();
        if input.scheduled_at <= now {
            return Err(DataError::Validation(
                "sessions must be scheduled in the future".into(),
            ));
        }
        if input.duration_minutes <= 0 {
            return Err(DataError::Validation(
                "session duration must be positive".into(),
            ));
        }

        let mut row = serde_json::to_value(&input)?;
        if let Some(obj) = row.as_object_mut() {
            obj.insert("status".to_string(), json!(SessionStatus::Scheduled));
            obj.insert("created_at".to_string(), json!(now));
            obj.insert("updated_at".to_string(), json!(now));
        }
        assign_generated_id(&mut row, self.config.id_strategy);

        let created = with_deadline(
            self.config.deadline,
            self.store.create("therapy_sessions", row),
        )
        .await?;
        Ok(serde_json::from_value(created)?)
    }

    /// Move a scheduled session into in_progress.
    pub async fn start_session(&self, session_id: &str) -> DataResult<TherapySession> {
        self.transition(session_id, SessionStatus::InProgress).await
    }

    /// Complete a session that is in_progress.
    pub async fn complete_session(&self, session_id: &str) -> DataResult<TherapySession> {
        self.transition(session_id, SessionStatus::Completed).await
    }

    /// Cancel a session that has not started.
    pub async fn cancel_session(&self, session_id: &str) -> DataResult<TherapySession> {
        self.transition(session_id, SessionStatus::Cancelled).await
    }

    async fn transition(
        &self,
        session_id: &str,
        to: SessionStatus,
    ) -> DataResult<TherapySession> {
        let filter = [WhereClause::eq("id", session_id)];
        let current = with_deadline(
            self.config.deadline,
            self.store.find_one("therapy_sessions", &filter),
        )
        .await?
        .ok_or(DataError::NotFound)?;
        let current: TherapySession = serde_json::from_value(current)?;

        if !current.status.can_transition(to) {
            return Err(DataError::InvalidTransition {
                from: current.status,
                to,
            });
        }

        let changes = json!({ "status": to, "updated_at": Utc::now() });
        let updated = with_deadline(
            self.config.deadline,
            self.store.update("therapy_sessions", &filter, changes),
        )
        .await?
        .ok_or(DataError::NotFound)?;

        Ok(serde_json::from_value(updated)?)
    }

    /// Sessions of a therapist that would overlap the given slot.
    ///
    /// Only scheduled and in_progress sessions count; completed and
    /// cancelled ones never block a slot. The booking decision stays with
    /// the caller, this is just the probe. Degrades to empty when the store
    /// is unreachable.
    pub async fn find_conflicts(
        &self,
        therapist_id: &str,
        scheduled_at: DateTime<Utc>,
        duration_minutes: i32,
    ) -> Vec<TherapySession> {
        let query = FindQuery {
            where_clauses: vec![
                WhereClause::eq("therapist_id", therapist_id),
                WhereClause::new(
                    "status",
                    json!([SessionStatus::Scheduled, SessionStatus::InProgress]),
                    Operator::In,
                ),
            ],
            sort_by: Some(SortBy::asc("scheduled_at")),
            ..Default::default()
        };
        let rows = match with_deadline(
            self.config.deadline,
            self.store.find_many("therapy_sessions", query),
        )
        .await
        {
            Ok(rows) => rows,
            Err(err) => {
                tracing::error!(
                    "Failed to load sessions for therapist {}: {}",
                    therapist_id,
                    err
                );
                return Vec::new();
            }
        };

        let start = scheduled_at;
        let end = scheduled_at + TimeDelta::minutes(i64::from(duration_minutes));
        decode_rows::<TherapySession>("therapy_sessions", rows)
            .into_iter()
            .filter(|s| s.scheduled_at < end && s.ends_at() > start)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::FailingStore;

    fn offline_service() -> SessionService {
        SessionService::new(Arc::new(FailingStore))
    }

    #[tokio::test]
    async fn create_session_rejects_past_start() {
        let input = NewSession::new(
            "usr_1",
            "ther_1",
            Utc::now() - TimeDelta::hours(1),
            60,
        );
        let err = offline_service().create_session(input).await.unwrap_err();
        assert!(matches!(err, DataError::Validation(_)));
    }

    #[tokio::test]
    async fn create_session_rejects_non_positive_duration() {
        let input = NewSession::new("usr_1", "ther_1", Utc::now() + TimeDelta::hours(1), 0);
        let err = offline_service().create_session(input).await.unwrap_err();
        assert!(matches!(err, DataError::Validation(_)));
    }

    #[tokio::test]
    async fn get_user_sessions_degrades_to_empty() {
        assert!(offline_service().get_user_sessions("usr_1").await.is_empty());
    }

    #[tokio::test]
    async fn find_conflicts_degrades_to_empty() {
        let conflicts = offline_service()
            .find_conflicts("ther_1", Utc::now() + TimeDelta::hours(1), 60)
            .await;
        assert!(conflicts.is_empty());
    }

    #[tokio::test]
    async fn start_session_surfaces_transport_error() {
        let err = offline_service().start_session("sess_1").await.unwrap_err();
        assert!(matches!(err, DataError::Transport(_)));
    }
}
