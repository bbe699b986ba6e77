#![doc = include_str!("../README.md")]

pub mod env;
pub mod error;
pub mod models;
pub mod options;
pub mod store;
pub mod utils;

// Re-exports for convenience
pub use error::{DataError, DataResult, StoreError, StoreResult};
pub use models::{
    Difficulty, Message, MoodEntry, MoodLevel, Profile, Resource, ResourceType, SessionStatus,
    SoundTrack, TherapeuticGame, TherapySession, UserProgress, UserRole,
};
pub use options::{IdStrategy, MoodOptions, QueryOptions, SerenityOptions, StoreOptions};
pub use store::adapter::{FindQuery, Operator, SortBy, SortDirection, StoreAdapter, WhereClause};
