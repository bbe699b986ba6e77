// Message service: direct messages between two users.
//
// A conversation is the union of both directions. The store has no OR
// filter, so the two directions are fetched as separate conjunctive
// queries and merged locally, oldest first.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use serenity_core::error::{DataError, DataResult};
use serenity_core::models::Message;
use serenity_core::store::adapter::{FindQuery, StoreAdapter, WhereClause};

use super::{assign_generated_id, decode_rows, with_deadline, ServiceConfig};

/// Input for `send_message`. Read state is not accepted here; every new
/// message starts unread.
#[derive(Debug, Clone, Serialize)]
pub struct NewMessage {
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
}

impl NewMessage {
    pub fn new(
        sender_id: impl Into<String>,
        recipient_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            sender_id: sender_id.into(),
            recipient_id: recipient_id.into(),
            content: content.into(),
        }
    }
}

/// Typed access to the `messages` table.
#[derive(Debug)]
pub struct MessageService {
    store: Arc<dyn StoreAdapter>,
    config: ServiceConfig,
}

impl MessageService {
    /// Build with default configuration.
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    pub(crate) fn with_config(store: Arc<dyn StoreAdapter>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Full conversation between two users, oldest first.
    ///
    /// Symmetric: (a, b) and (b, a) return the same messages. Degrades to
    /// empty when either direction cannot be fetched.
    pub async fn get_messages(&self, user_id: &str, other_user_id: &str) -> Vec<Message> {
        let sent = FindQuery {
            where_clauses: vec![
                WhereClause::eq("sender_id", user_id),
                WhereClause::eq("recipient_id", other_user_id),
            ],
            ..Default::default()
        };
        let received = FindQuery {
            where_clauses: vec![
                WhereClause::eq("sender_id", other_user_id),
                WhereClause::eq("recipient_id", user_id),
            ],
            ..Default::default()
        };

        let fetch = async {
            let sent = self.store.find_many("messages", sent).await?;
            let received = self.store.find_many("messages", received).await?;
            Ok((sent, received))
        };
        match with_deadline(self.config.deadline, fetch).await {
            Ok((sent, received)) => {
                let mut messages: Vec<Message> = decode_rows("messages", sent);
                messages.extend(decode_rows::<Message>("messages", received));
                messages.sort_by_key(|m| m.created_at);
                messages
            }
            Err(err) => {
                tracing::error!(
                    "Failed to load conversation between {} and {}: {}",
                    user_id,
                    other_user_id,
                    err
                );
                Vec::new()
            }
        }
    }

    /// Send a message. Content must be non-blank; `is_read` starts false
    /// regardless of input.
    pub async fn send_message(&self, input: NewMessage) -> DataResult<Message> {
        if input.content.trim().is_empty() {
            return Err(DataError::Validation(
                "message content must not be blank".into(),
            ));
        }

        let mut row = serde_json::to_value(&input)?;
        if let Some(obj) = row.as_object_mut() {
            obj.insert("is_read".to_string(), Value::Bool(false));
            obj.insert("created_at".to_string(), json!(Utc::now()));
        }
        assign_generated_id(&mut row, self.config.id_strategy);

        let created =
            with_deadline(self.config.deadline, self.store.create("messages", row)).await?;
        Ok(serde_json::from_value(created)?)
    }

    /// Flip a message to read. The flip is one-way; marking an already read
    /// message again is a no-op that returns the stored message.
    pub async fn mark_read(&self, message_id: &str) -> DataResult<Message> {
        let filter = [WhereClause::eq("id", message_id)];
        let current = with_deadline(self.config.deadline, self.store.find_one("messages", &filter))
            .await?
            .ok_or(DataError::NotFound)?;
        let current: Message = serde_json::from_value(current)?;

        if current.is_read {
            return Ok(current);
        }

        let updated = with_deadline(
            self.config.deadline,
            self.store
                .update("messages", &filter, json!({ "is_read": true })),
        )
        .await?
        .ok_or(DataError::NotFound)?;

        Ok(serde_json::from_value(updated)?)
    }

    /// Number of unread messages waiting for `user_id`. Degrades to 0 when
    /// the store is unreachable.
    pub async fn unread_count(&self, user_id: &str) -> i64 {
        let filter = [
            WhereClause::eq("recipient_id", user_id),
            WhereClause::eq("is_read", false),
        ];
        match with_deadline(self.config.deadline, self.store.count("messages", &filter)).await {
            Ok(count) => count,
            Err(err) => {
                tracing::error!("Failed to count unread messages for {}: {}", user_id, err);
                0
            }
        }
    }
}
