// serenity-data: typed data access for the Serenity wellness platform.
//
// One service per entity family, each constructed over a shared
// `Arc<dyn StoreAdapter>`. `SerenityData` wires all of them from one
// options struct. Read operations log and degrade on store failure; write
// and transition operations return `DataResult`.

pub mod client;
pub mod services;

pub use client::SerenityData;
pub use services::{
    CatalogService, MessageService, MoodService, MoodSummary, NewMessage, NewMoodEntry,
    NewProfile, NewProgressEntry, NewSession, ProfileService, ProfileUpdate, ProgressService,
    SessionService,
};
