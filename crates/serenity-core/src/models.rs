// Domain records for the Serenity wellness platform.
//
// Field names serialize exactly as the store's column names (snake_case), so
// these structs double as the row codec for `StoreAdapter` backends.
// Optional columns are `Option` and are skipped when absent, which keeps
// partial updates from clobbering stored values.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

// ─── Profiles ────────────────────────────────────────────────────

/// Role attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    User,
    Therapist,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Therapist => "therapist",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "user" => Some(UserRole::User),
            "therapist" => Some(UserRole::Therapist),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// A user or therapist profile, stored under `profiles`.
///
/// Every account has exactly one profile, keyed by the id issued at sign-up.
/// Therapist profiles must carry `license_number` and `years_experience`,
/// and only become bookable once `is_verified` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub role: UserRole,
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
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Fresh profile with the given id, a lowercased email, and timestamps
    /// set to now. Verification always starts false.
    pub fn new(id: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            email: email.into().to_lowercase(),
            first_name: None,
            last_name: None,
            role,
            avatar_url: None,
            bio: None,
            specialties: None,
            license_number: None,
            years_experience: None,
            hourly_rate: None,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}

// ─── Therapy Sessions ────────────────────────────────────────────

/// Lifecycle state of a therapy session.
///
/// Legal moves: scheduled -> in_progress -> completed, and
/// scheduled -> cancelled. Completed and cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl SessionStatus {
    /// Whether the lifecycle allows moving from `self` to `to`.
    ///
    /// A session cannot complete without passing through in_progress, and
    /// only a session that has not started can be cancelled.
    pub fn can_transition(self, to: SessionStatus) -> bool {
        matches!(
            (self, to),
            (SessionStatus::Scheduled, SessionStatus::InProgress)
                | (SessionStatus::Scheduled, SessionStatus::Cancelled)
                | (SessionStatus::InProgress, SessionStatus::Completed)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(SessionStatus::Scheduled),
            "in_progress" => Some(SessionStatus::InProgress),
            "completed" => Some(SessionStatus::Completed),
            "cancelled" => Some(SessionStatus::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booked appointment between a user and a therapist, stored under
/// `therapy_sessions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TherapySession {
    pub id: String,
    pub user_id: String,
    pub therapist_id: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TherapySession {
    /// When the booked slot ends.
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.scheduled_at + TimeDelta::minutes(i64::from(self.duration_minutes))
    }

    /// Whether the session is still ahead of `now` and has not been started
    /// or cancelled.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.status == SessionStatus::Scheduled && self.scheduled_at > now
    }
}

// ─── Mood Tracking ───────────────────────────────────────────────

/// Five-level self-reported mood scale, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLevel {
    VeryLow,
    Low,
    Neutral,
    Good,
    VeryGood,
}

impl MoodLevel {
    /// Ordinal score: 1 (very_low) through 5 (very_good).
    pub fn score(self) -> u8 {
        match self {
            MoodLevel::VeryLow => 1,
            MoodLevel::Low => 2,
            MoodLevel::Neutral => 3,
            MoodLevel::Good => 4,
            MoodLevel::VeryGood => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLevel::VeryLow => "very_low",
            MoodLevel::Low => "low",
            MoodLevel::Neutral => "neutral",
            MoodLevel::Good => "good",
            MoodLevel::VeryGood => "very_good",
        }
    }

    /// Parses the wire name of a level. Anything outside the five levels is
    /// `None`; there is no catch-all.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "very_low" => Some(MoodLevel::VeryLow),
            "low" => Some(MoodLevel::Low),
            "neutral" => Some(MoodLevel::Neutral),
            "good" => Some(MoodLevel::Good),
            "very_good" => Some(MoodLevel::VeryGood),
            _ => None,
        }
    }
}

/// One mood check-in, stored under `mood_entries`.
///
/// Entries are append-only journal data: several per day are fine, and
/// nothing ever edits one after the fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    pub user_id: String,
    pub mood_level: MoodLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Self-reported energy, 0..=5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<i32>,
    /// Self-reported anxiety, 0..=5.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anxiety_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f32>,
    pub created_at: DateTime<Utc>,
}

// ─── Content Catalogs ────────────────────────────────────────────

/// Kind of library resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Article,
    Video,
    Audio,
    Exercise,
    Worksheet,
}

/// A curated wellness library item, stored under `resources`.
///
/// A resource belongs to any number of categories; category filtering is
/// list membership, not scalar equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time_minutes: Option<i32>,
    pub is_free: bool,
    pub rating: f32,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An ambient audio track, stored under `sound_tracks`. At most one
/// category per track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundTrack {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Difficulty rating for a therapeutic game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// An interactive exercise in the games catalog, stored under
/// `therapeutic_games`. At most one category per game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TherapeuticGame {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

// ─── Messaging ───────────────────────────────────────────────────

/// A direct message between two users, stored under `messages`.
///
/// `is_read` only ever moves false -> true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub recipient_id: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

// ─── Progress Tracking ───────────────────────────────────────────

/// One point in a user's progress timeseries, stored under `user_progress`.
/// Append-only; history is never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProgress {
    pub id: String,
    pub user_id: String,
    pub metric_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
}
