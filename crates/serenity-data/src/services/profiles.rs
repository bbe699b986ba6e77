// Profile service: account profiles for users and therapists.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use serenity_core::error::{DataError, DataResult};
use serenity_core::models::{Profile, UserRole};
use serenity_core::store::adapter::{FindQuery, StoreAdapter, WhereClause};

use super::{decode_row, decode_rows, with_deadline, ServiceConfig};

/// Input for `create_profile`.
///
/// The id comes from the external auth provider; profile creation never
/// mints its own.
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub license_number: Option<String>,
    pub years_experience: Option<i32>,
    pub hourly_rate: Option<f64>,
}

impl NewProfile {
    pub fn new(id: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role,
            first_name: None,
            last_name: None,
            specialties: None,
            license_number: None,
            years_experience: None,
            hourly_rate: None,
        }
    }
}

/// Partial profile update. `None` fields are not serialized, so the store
/// never sees them and the stored values stay untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_experience: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

/// Typed access to the `profiles` table.
#[derive(Debug)]
pub struct ProfileService {
    store: Arc<dyn StoreAdapter>,
    config: ServiceConfig,
}

impl ProfileService {
    /// Build with default configuration.
    pub fn new(store: Arc<dyn StoreAdapter>) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    pub(crate) fn with_config(store: Arc<dyn StoreAdapter>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Fetch one profile by id.
    ///
    /// `None` covers both a missing profile and an unreachable store; the
    /// store failure is logged, never surfaced.
    pub async fn get_profile(&self, user_id: &str) -> Option<Profile> {
        let filter = [WhereClause::eq("id", user_id)];
        match with_deadline(self.config.deadline, self.store.find_one("profiles", &filter)).await
        {
            Ok(Some(row)) => decode_row("profiles", row),
            Ok(None) => None,
            Err(err) => {
                tracing::error!("Failed to load profile {}: {}", user_id, err);
                None
            }
        }
    }

    /// Create the profile for a freshly signed-up account.
    ///
    /// Therapist profiles must arrive with their credentials
    /// (license_number and years_experience); everyone needs a plausible
    /// email. The stored email is lowercased.
    pub async fn create_profile(&self, input: NewProfile) -> DataResult<Profile> {
        validate_email(&input.email)?;
        if input.role == UserRole::Therapist
            && (input.license_number.is_none() || input.years_experience.is_none())
        {
            return Err(DataError::Validation(
                "therapist profiles require license_number and years_experience".into(),
            ));
        }

        let mut profile = Profile::new(input.id, input.email, input.role);
        profile.first_name = input.first_name;
        profile.last_name = input.last_name;
        profile.specialties = input.specialties;
        profile.license_number = input.license_number;
        profile.years_experience = input.years_experience;
        profile.hourly_rate = input.hourly_rate;

        let row = serde_json::to_value(&profile)?;
        let created =
            with_deadline(self.config.deadline, self.store.create("profiles", row)).await?;
        Ok(serde_json::from_value(created)?)
    }

    /// Apply a partial update to a profile. Fields left `None` stay
    /// untouched; the merge itself happens in the store.
    ///
    /// Guards evaluated against the current record: `is_verified` never
    /// reverts true -> false, and a profile that ends up with the therapist
    /// role must have credentials, incoming or already stored.
    pub async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> DataResult<Profile> {
        let filter = [WhereClause::eq("id", user_id)];
        let current = with_deadline(self.config.deadline, self.store.find_one("profiles", &filter))
            .await?
            .ok_or(DataError::NotFound)?;
        let current: Profile = serde_json::from_value(current)?;

        if let Some(email) = &update.email {
            validate_email(email)?;
        }
        if update.is_verified == Some(false) && current.is_verified {
            return Err(DataError::Validation(
                "is_verified cannot be reverted once set".into(),
            ));
        }
        let target_role = update.role.unwrap_or(current.role);
        if target_role == UserRole::Therapist {
            let license = update
                .license_number
                .as_ref()
                .or(current.license_number.as_ref());
            let years = update.years_experience.or(current.years_experience);
            if license.is_none() || years.is_none() {
                return Err(DataError::Validation(
                    "therapist profiles require license_number and years_experience".into(),
                ));
            }
        }

        let mut changes = serde_json::to_value(&update)?;
        if let Some(obj) = changes.as_object_mut() {
            if let Some(email) = obj.get("email").and_then(Value::as_str) {
                let lowered = email.to_lowercase();
                obj.insert("email".to_string(), Value::String(lowered));
            }
            obj.insert("updated_at".to_string(), json!(Utc::now()));
        }

        let updated = with_deadline(
            self.config.deadline,
            self.store.update("profiles", &filter, changes),
        )
        .await?
        .ok_or(DataError::NotFound)?;

        Ok(serde_json::from_value(updated)?)
    }

    /// Flip a therapist's `is_verified` flag to true.
    ///
    /// Rejects non-therapist profiles; calling it on an already verified
    /// therapist is a no-op that returns the stored profile.
    pub async fn verify_therapist(&self, user_id: &str) -> DataResult<Profile> {
        let filter = [WhereClause::eq("id", user_id)];
        let current = with_deadline(self.config.deadline, self.store.find_one("profiles", &filter))
            .await?
            .ok_or(DataError::NotFound)?;
        let current: Profile = serde_json::from_value(current)?;

        if current.role != UserRole::Therapist {
            return Err(DataError::Validation(format!(
                "profile {} is not a therapist",
                user_id
            )));
        }
        if current.is_verified {
            return Ok(current);
        }

        let changes = json!({ "is_verified": true, "updated_at": Utc::now() });
        let updated = with_deadline(
            self.config.deadline,
            self.store.update("profiles", &filter, changes),
        )
        .await?
        .ok_or(DataError::NotFound)?;

        Ok(serde_json::from_value(updated)?)
    }

    /// All verified therapist profiles. Degrades to empty when the store is
    /// unreachable.
    pub async fn get_verified_therapists(&self) -> Vec<Profile> {
        let query = FindQuery {
            where_clauses: vec![
                WhereClause::eq("role", UserRole::Therapist.as_str()),
                WhereClause::eq("is_verified", true),
            ],
            ..Default::default()
        };
        match with_deadline(self.config.deadline, self.store.find_many("profiles", query)).await {
            Ok(rows) => decode_rows("profiles", rows),
            Err(err) => {
                tracing::error!("Failed to list verified therapists: {}", err);
                Vec::new()
            }
        }
    }
}

/// Minimal email plausibility check. Real verification happens upstream in
/// the auth provider; this only rejects obviously broken input.
fn validate_email(email: &str) -> DataResult<()> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        return Err(DataError::Validation(format!("invalid email: {:?}", email)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::FailingStore;

    fn offline_service() -> ProfileService {
        ProfileService::new(Arc::new(FailingStore))
    }

    #[tokio::test]
    async fn get_profile_degrades_to_none_when_store_fails() {
        assert!(offline_service().get_profile("usr_1").await.is_none());
    }

    #[tokio::test]
    async fn get_verified_therapists_degrades_to_empty() {
        assert!(offline_service().get_verified_therapists().await.is_empty());
    }

    #[tokio::test]
    async fn update_profile_surfaces_transport_error() {
        let err = offline_service()
            .update_profile("usr_1", ProfileUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Transport(_)));
    }

    #[tokio::test]
    async fn create_profile_rejects_bad_email_before_any_store_call() {
        // The store would fail with Transport; Validation proves the input
        // was rejected first.
        let err = offline_service()
            .create_profile(NewProfile::new("usr_1", "not-an-email", UserRole::User))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Validation(_)));
    }

    #[tokio::test]
    async fn create_profile_rejects_therapist_without_credentials() {
        let err = offline_service()
            .create_profile(NewProfile::new("usr_2", "t@example.org", UserRole::Therapist))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Validation(_)));
    }

    #[test]
    fn profile_update_skips_absent_fields() {
        let update = ProfileUpdate {
            bio: Some("here to listen".into()),
            ..Default::default()
        };
        let v = serde_json::to_value(&update).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert!(obj.contains_key("bio"));
    }
}
